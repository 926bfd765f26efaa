use baklay_core::models::format_php;
use baklay_core::{booking, validation, DomainError, NewBooking};
use chrono::Local;

use crate::console::{prompt_int, prompt_validated, Console};
use crate::error::{recover, AppResult};
use crate::listing;
use crate::session::Session;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    loop {
        console.println(&format!("\n=== Customer Dashboard ({}) ===", session.name))?;
        console.println("1. View Treks")?;
        console.println("2. View Available Schedules")?;
        console.println("3. Book a Trek")?;
        console.println("4. View My Bookings")?;
        console.println("5. Cancel a Booking")?;
        console.println("6. Log Out")?;
        let Some(choice) = prompt_int(console, "Enter your choice: ")? else {
            return Ok(());
        };

        let result = match choice {
            1 => view_treks(ctx, console).await,
            2 => view_available(ctx, console).await,
            3 => book(ctx, console, session).await,
            4 => view_my_bookings(ctx, console, session).await,
            5 => cancel(ctx, console, session).await,
            6 => {
                console.println("Logged out.")?;
                return Ok(());
            }
            _ => {
                console.println("Invalid choice. Please try again.")?;
                Ok(())
            }
        };
        recover(console, result)?;
    }
}

async fn view_treks(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    listing::treks(console, &ctx.treks.list_treks().await?)
}

async fn view_available(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    let today = Local::now().date_naive();
    listing::schedules(console, &ctx.schedules.list_available(today).await?)
}

async fn book(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    view_available(ctx, console).await?;
    let Some(schedule_id) = prompt_int(console, "Enter schedule ID to book: ")? else {
        return Ok(());
    };
    let schedule = ctx
        .schedules
        .get_schedule(schedule_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Schedule ID {}", schedule_id)))?;
    booking::check_bookable_date(schedule.date, Local::now().date_naive())?;

    let Some(guest_count) =
        prompt_int(console, "Number of people (including yourself): ")?
    else {
        return Ok(());
    };
    // Fail before asking for names of a party that cannot fit
    booking::check_guest_count(guest_count, schedule.capacity)?;

    let mut guest_names = Vec::new();
    for i in 1..guest_count {
        let label = format!("Name of guest #{}: ", i);
        let Some(name) = prompt_validated(console, &label, |s| validation::required("Guest name", s))?
        else {
            return Ok(());
        };
        guest_names.push(name);
    }

    let created = ctx
        .bookings
        .create_booking(&NewBooking {
            customer_id: session.user_id,
            schedule_id,
            guest_count,
            guest_names,
        })
        .await?;

    console.println(&format!(
        "Booking successful! Booking ID: {}. Total: PHP {}. Status: {}.",
        created.id,
        format_php(created.total_centavos),
        created.status
    ))?;
    Ok(())
}

async fn view_my_bookings(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    let bookings = ctx.bookings.list_customer_bookings(session.user_id).await?;
    listing::bookings(console, &bookings)
}

async fn cancel(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    view_my_bookings(ctx, console, session).await?;
    let Some(booking_id) = prompt_int(console, "Enter booking ID to cancel: ")? else {
        return Ok(());
    };

    let cancelled = ctx.bookings.cancel_booking(booking_id, session.user_id).await?;
    console.println(&format!(
        "Booking ID {} cancelled. {} slot(s) returned to the schedule.",
        cancelled.id, cancelled.guest_count
    ))?;
    Ok(())
}
