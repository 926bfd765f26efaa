use baklay_core::{booking, DomainError};

use crate::console::{prompt_int, prompt_validated, Console};
use crate::error::{recover, AppResult};
use crate::listing;
use crate::session::Session;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    loop {
        console.println(&format!("\n=== Guide Dashboard ({}) ===", session.name))?;
        console.println("1. View Assigned Bookings")?;
        console.println("2. Update Booking Status")?;
        console.println("3. View Trek Members")?;
        console.println("4. Log Out")?;
        let Some(choice) = prompt_int(console, "Enter your choice: ")? else {
            return Ok(());
        };

        let result = match choice {
            1 => view_assigned(ctx, console, session).await,
            2 => update_status(ctx, console, session).await,
            3 => view_members(ctx, console, session).await,
            4 => {
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

fn not_assigned(booking_id: i64) -> DomainError {
    DomainError::NotFound(format!("Booking ID {} on your schedules", booking_id))
}

async fn view_assigned(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    let bookings = ctx.bookings.list_assigned_bookings(session.user_id).await?;
    listing::bookings(console, &bookings)
}

async fn update_status(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    view_assigned(ctx, console, session).await?;
    let Some(booking_id) = prompt_int(console, "Enter booking ID to update: ")? else {
        return Ok(());
    };

    let current = ctx
        .bookings
        .find_assigned_booking(booking_id, session.user_id)
        .await?
        .ok_or_else(|| not_assigned(booking_id))?;
    if current.status.is_terminal() {
        return Err(DomainError::Validation(format!(
            "Booking is already {}; it can no longer be updated.",
            current.status
        ))
        .into());
    }

    let Some(status) = prompt_validated(
        console,
        "New status (Confirmed/Completed/Cancelled): ",
        booking::parse_guide_status,
    )?
    else {
        return Ok(());
    };

    let updated = ctx
        .bookings
        .update_status_as_guide(
            booking_id,
            session.user_id,
            status,
            ctx.business_rules.refund_capacity_on_guide_cancel,
        )
        .await?;
    console.println(&format!("Booking ID {} updated to {}.", updated.id, updated.status))?;
    Ok(())
}

async fn view_members(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    view_assigned(ctx, console, session).await?;
    let Some(booking_id) = prompt_int(console, "Enter booking ID to view members: ")? else {
        return Ok(());
    };

    let manifest = ctx
        .bookings
        .manifest(booking_id, session.user_id)
        .await?
        .ok_or_else(|| not_assigned(booking_id))?;

    console.println(&format!("\n--- Members of Booking ID {} ---", manifest.booking_id))?;
    console.println(&format!("Trek: {}", manifest.trek_description))?;
    console.println(&format!(
        "Lead: {} (Contact: {})",
        manifest.lead_name, manifest.lead_contact
    ))?;
    console.println(&format!("Total people: {}", manifest.guest_count))?;
    for label in manifest.companion_labels() {
        console.println(&format!("  {}", label))?;
    }
    Ok(())
}
