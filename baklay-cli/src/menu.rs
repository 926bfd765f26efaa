use baklay_core::UserType;
use tracing::info;

use crate::console::{prompt_int, Console};
use crate::error::{recover, AppResult};
use crate::session::Session;
use crate::state::AppContext;
use crate::{admin, auth, customer, guide};

/// Main menu loop. Returns when the user exits or input ends.
pub async fn run(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    console.println("Welcome to Baklay Cebu Trek Booking!")?;
    loop {
        console.println("\n=== Main Menu ===")?;
        console.println("1. Login")?;
        console.println("2. Register")?;
        console.println("3. Exit")?;
        let Some(choice) = prompt_int(console, "Enter your choice: ")? else {
            return Ok(());
        };

        match choice {
            1 => {
                let result = login_and_dispatch(ctx, console).await;
                recover(console, result)?;
            }
            2 => {
                let result = auth::register(ctx, console).await;
                recover(console, result)?;
            }
            3 => {
                console.println("Goodbye!")?;
                return Ok(());
            }
            _ => console.println("Invalid choice. Please try again.")?,
        }
    }
}

async fn login_and_dispatch(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    let Some(session) = auth::login(ctx, console).await? else {
        return Ok(());
    };

    dashboard(ctx, console, &session).await?;
    info!("User {} logged out", session.user_id);
    Ok(())
}

pub async fn dashboard(ctx: &AppContext, console: &mut dyn Console, session: &Session) -> AppResult<()> {
    match session.role {
        UserType::Admin => admin::run(ctx, console, session).await,
        UserType::Guide => guide::run(ctx, console, session).await,
        UserType::Customer => customer::run(ctx, console, session).await,
    }
}
