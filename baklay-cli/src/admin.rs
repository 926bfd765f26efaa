use baklay_core::{booking, validation, DomainError, NewSchedule, NewTrek};

use crate::console::{
    prompt_int, prompt_int_validated, prompt_optional_int, prompt_validated, Console,
};
use crate::error::{recover, AppResult};
use crate::listing;
use crate::session::Session;
use crate::state::AppContext;

pub async fn run(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    loop {
        console.println(&format!("\n=== Admin Dashboard ({}) ===", session.name))?;
        console.println("1. Approve Account")?;
        console.println("2. Manage Treks")?;
        console.println("3. Manage Schedules")?;
        console.println("4. View All Bookings")?;
        console.println("5. Approve Booking (Assign Guide)")?;
        console.println("6. Log Out")?;
        let Some(choice) = prompt_int(console, "Enter your choice: ")? else {
            return Ok(());
        };

        let result = match choice {
            1 => approve_account(ctx, console).await,
            2 => manage_treks(ctx, console).await,
            3 => manage_schedules(ctx, console).await,
            4 => view_bookings(ctx, console).await,
            5 => approve_booking(ctx, console).await,
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

async fn approve_account(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    listing::users(console, &ctx.users.list_users().await?)?;
    let Some(id) = prompt_int(console, "Enter user ID to approve: ")? else {
        return Ok(());
    };

    ctx.users.approve_user(id).await?;
    console.println(&format!("User ID {} approved.", id))?;
    listing::users(console, &ctx.users.list_users().await?)
}

async fn manage_treks(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    loop {
        console.println("\n--- Manage Treks ---")?;
        console.println("1. Add Trek")?;
        console.println("2. View Treks")?;
        console.println("3. Update Trek Description")?;
        console.println("4. Delete Trek")?;
        console.println("5. Back")?;
        let Some(choice) = prompt_int(console, "Enter your choice: ")? else {
            return Ok(());
        };

        let result = match choice {
            1 => add_trek(ctx, console).await,
            2 => view_treks(ctx, console).await,
            3 => update_trek(ctx, console).await,
            4 => delete_trek(ctx, console).await,
            5 => return Ok(()),
            _ => {
                console.println("Invalid choice. Please try again.")?;
                Ok(())
            }
        };
        recover(console, result)?;
    }
}

async fn add_trek(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    let Some(code) = prompt_validated(console, "Trek code: ", |s| validation::required("Trek code", s))?
    else {
        return Ok(());
    };
    let Some(description) =
        prompt_validated(console, "Description: ", |s| validation::required("Description", s))?
    else {
        return Ok(());
    };
    let Some(difficulty) =
        prompt_validated(console, "Difficulty: ", |s| validation::required("Difficulty", s))?
    else {
        return Ok(());
    };
    let Some(price_centavos) = prompt_validated(console, "Price (PHP): ", validation::price)? else {
        return Ok(());
    };

    let id = ctx
        .treks
        .create_trek(&NewTrek {
            code,
            description,
            difficulty,
            price_centavos,
        })
        .await?;
    console.println(&format!("Trek added with ID {}.", id))?;
    Ok(())
}

async fn view_treks(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    listing::treks(console, &ctx.treks.list_treks().await?)
}

async fn update_trek(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    view_treks(ctx, console).await?;
    let Some(id) = prompt_int(console, "Enter trek ID to update: ")? else {
        return Ok(());
    };
    if ctx.treks.get_trek(id).await?.is_none() {
        return Err(DomainError::NotFound(format!("Trek ID {}", id)).into());
    }
    let Some(description) =
        prompt_validated(console, "New description: ", |s| validation::required("Description", s))?
    else {
        return Ok(());
    };

    ctx.treks.update_description(id, &description).await?;
    console.println(&format!("Trek ID {} updated.", id))?;
    Ok(())
}

async fn delete_trek(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    view_treks(ctx, console).await?;
    let Some(id) = prompt_int(console, "Enter trek ID to delete: ")? else {
        return Ok(());
    };

    ctx.treks.delete_trek(id).await?;
    console.println(&format!("Trek ID {} deleted.", id))?;
    Ok(())
}

async fn manage_schedules(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    loop {
        console.println("\n--- Manage Schedules ---")?;
        console.println("1. Add Schedule")?;
        console.println("2. View Schedules")?;
        console.println("3. Back")?;
        let Some(choice) = prompt_int(console, "Enter your choice: ")? else {
            return Ok(());
        };

        let result = match choice {
            1 => add_schedule(ctx, console).await,
            2 => view_schedules(ctx, console).await,
            3 => return Ok(()),
            _ => {
                console.println("Invalid choice. Please try again.")?;
                Ok(())
            }
        };
        recover(console, result)?;
    }
}

async fn add_schedule(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    view_treks(ctx, console).await?;
    let Some(trek_id) = prompt_int(console, "Enter trek ID: ")? else {
        return Ok(());
    };
    if ctx.treks.get_trek(trek_id).await?.is_none() {
        return Err(DomainError::NotFound(format!("Trek ID {}", trek_id)).into());
    }
    let Some(date) = prompt_validated(console, "Schedule date (YYYY-MM-DD): ", validation::date)? else {
        return Ok(());
    };
    let Some(capacity) = prompt_int_validated(console, "Capacity: ", validation::capacity)? else {
        return Ok(());
    };

    let id = ctx
        .schedules
        .create_schedule(&NewSchedule {
            trek_id,
            date,
            capacity,
            guide_id: None,
        })
        .await?;
    console.println(&format!("Schedule added with ID {}.", id))?;
    Ok(())
}

async fn view_schedules(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    listing::schedules(console, &ctx.schedules.list_schedules().await?)
}

async fn view_bookings(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    listing::bookings(console, &ctx.bookings.list_bookings().await?)
}

async fn approve_booking(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    view_bookings(ctx, console).await?;
    let Some(booking_id) = prompt_int(console, "Enter booking ID to approve: ")? else {
        return Ok(());
    };

    let view = ctx
        .bookings
        .get_booking(booking_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Booking ID {}", booking_id)))?;
    booking::check_approvable(view.status)?;

    let guide_id = match &view.guide_name {
        Some(guide_name) => {
            console.println(&format!("Schedule is already led by {}.", guide_name))?;
            None
        }
        None => {
            let guides = ctx.users.list_approved_guides().await?;
            if guides.is_empty() {
                console.println("No approved guides available.")?;
                None
            } else {
                console.println("Available guides:")?;
                listing::users(console, &guides)?;
                let Some(choice) =
                    prompt_optional_int(console, "Enter guide ID to assign (blank to skip): ")?
                else {
                    return Ok(());
                };
                choice
            }
        }
    };

    let approved = ctx.bookings.approve_booking(booking_id, guide_id).await?;
    match &approved.guide_name {
        Some(guide_name) => console.println(&format!(
            "Booking ID {} approved. Guide: {}.",
            approved.id, guide_name
        ))?,
        None => console.println(&format!(
            "Booking ID {} approved. Warning: its schedule has no guide assigned.",
            approved.id
        ))?,
    }
    Ok(())
}
