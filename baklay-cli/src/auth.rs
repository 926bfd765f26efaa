use baklay_core::{validation, CoreResult, DomainError, NewUser, UserStatus, UserType};
use tracing::{debug, info};

use crate::console::{prompt_int_validated, prompt_validated, Console};
use crate::error::AppResult;
use crate::session::Session;
use crate::state::AppContext;

/// Checks an email/password pair. Unknown email and wrong password are
/// indistinguishable to the caller.
pub async fn authenticate(ctx: &AppContext, email: &str, password: &str) -> CoreResult<Session> {
    let Some(credentials) = ctx.users.find_credentials(email).await? else {
        debug!("Login rejected for {}: unknown email", email);
        return Err(DomainError::InvalidCredentials);
    };

    if !ctx.hasher.verify(password.trim(), &credentials.password_hash) {
        debug!("Login rejected for {}: wrong password", email);
        return Err(DomainError::InvalidCredentials);
    }

    if credentials.user.status == UserStatus::Pending {
        debug!("Login rejected for {}: account pending", email);
        return Err(DomainError::AccountPending);
    }

    info!("User {} logged in as {}", credentials.user.id, credentials.user.user_type);
    Ok(Session::from(credentials.user))
}

/// `Ok(None)` when input ends before both fields are read.
pub async fn login(ctx: &AppContext, console: &mut dyn Console) -> AppResult<Option<Session>> {
    console.println("\n--- Login ---")?;
    let Some(email) = prompt_validated(console, "Email: ", |s| validation::required("Email", s))? else {
        return Ok(None);
    };
    let Some(password) =
        prompt_validated(console, "Password: ", |s| validation::required("Password", s))?
    else {
        return Ok(None);
    };

    let session = authenticate(ctx, &email, &password).await?;
    console.println(&format!("Login successful. Welcome, {}!", session.name))?;
    Ok(Some(session))
}

pub async fn register(ctx: &AppContext, console: &mut dyn Console) -> AppResult<()> {
    console.println("\n--- Register ---")?;
    let Some(name) = prompt_validated(console, "Name: ", |s| validation::required("Name", s))? else {
        return Ok(());
    };
    let Some(contact) = prompt_validated(console, "Contact number: ", validation::contact)? else {
        return Ok(());
    };

    let email = loop {
        let Some(email) = prompt_validated(console, "Email: ", validation::email)? else {
            return Ok(());
        };
        if ctx.users.email_exists(&email).await? {
            console.println("Email already exists. Please use a different email.")?;
            continue;
        }
        break email;
    };

    console.println("User type: 1. Admin  2. Guide  3. Customer")?;
    let Some(user_type) = prompt_int_validated(console, "Choose user type: ", |choice| {
        UserType::from_menu_choice(choice).ok_or_else(|| {
            DomainError::Validation("Invalid user type. Please choose 1, 2 or 3.".to_string())
        })
    })?
    else {
        return Ok(());
    };

    let min_length = ctx.business_rules.min_password_length;
    let Some(password) =
        prompt_validated(console, "Password: ", |s| validation::password(s, min_length))?
    else {
        return Ok(());
    };

    let password_hash = ctx.hasher.hash(&password)?;
    let id = ctx
        .users
        .create_user(&NewUser {
            name,
            email,
            contact,
            user_type,
            password_hash,
        })
        .await?;

    console.println(&format!(
        "Registration successful! Your user ID is {}. Your account is pending approval by an admin.",
        id
    ))?;
    Ok(())
}
