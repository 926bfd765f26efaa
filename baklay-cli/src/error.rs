use baklay_core::DomainError;
use tracing::{debug, error, warn, Level};

use crate::console::Console;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

/// Level a failed action is logged at here. Storage errors are already
/// logged with their driver detail where they are raised.
fn log_level(err: &DomainError) -> Option<Level> {
    match err {
        DomainError::Storage(_) => None,
        DomainError::Hashing(_) => Some(Level::ERROR),
        DomainError::InsufficientCapacity { .. }
        | DomainError::InvalidTransition { .. }
        | DomainError::Conflict(_) => Some(Level::WARN),
        _ => Some(Level::DEBUG),
    }
}

/// What the user sees for a failed action. Internal failures are shown
/// generically.
pub fn user_message(err: &DomainError) -> String {
    match log_level(err) {
        Some(Level::ERROR) => error!("Internal error: {}", err),
        Some(Level::WARN) => warn!("Rejected: {}", err),
        Some(_) => debug!("Rejected: {}", err),
        None => {}
    }
    match err {
        DomainError::Storage(_) | DomainError::Hashing(_) => {
            "Something went wrong, nothing was changed. Please try again.".to_string()
        }
        _ => err.to_string(),
    }
}

/// Reports a domain failure on the console and lets the menu loop continue.
/// Console I/O failures still propagate.
pub fn recover(console: &mut dyn Console, result: AppResult<()>) -> AppResult<()> {
    match result {
        Err(AppError::Domain(err)) => {
            console.println(&format!("Error: {}", user_message(&err)))?;
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    #[test]
    fn test_domain_errors_are_reported_not_propagated() {
        let mut console = ScriptedConsole::default();
        let result = recover(
            &mut console,
            Err(DomainError::NotFound("Booking ID 9".to_string()).into()),
        );
        assert!(result.is_ok());
        assert_eq!(console.output(), "Error: Booking ID 9 not found\n");
    }

    #[test]
    fn test_storage_detail_is_not_shown() {
        let message = user_message(&DomainError::Storage("disk I/O error".to_string()));
        assert!(!message.contains("disk"));
    }

    #[test]
    fn test_storage_errors_are_not_logged_twice() {
        assert_eq!(log_level(&DomainError::Storage("disk I/O error".to_string())), None);
        assert_eq!(log_level(&DomainError::Hashing("bad salt".to_string())), Some(Level::ERROR));
        assert_eq!(
            log_level(&DomainError::Conflict("Email already registered".to_string())),
            Some(Level::WARN)
        );
    }

    #[test]
    fn test_io_errors_propagate() {
        let mut console = ScriptedConsole::default();
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(matches!(recover(&mut console, Err(io.into())), Err(AppError::Io(_))));
    }
}
