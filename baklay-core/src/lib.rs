pub mod models;
pub mod booking;
pub mod repository;
pub mod validation;
pub mod password;

pub use models::{
    Booking, BookingStatus, BookingView, Manifest, NewBooking, NewSchedule, NewTrek, NewUser,
    ScheduleView, Trek, User, UserCredentials, UserStatus, UserType,
};
pub use password::{Argon2Config, PasswordHasher};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Requested {requested} slot(s) but only {available} remaining")]
    InsufficientCapacity { requested: i64, available: i64 },
    #[error("Booking is already {from}; it cannot be set to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account is pending, contact the admin")]
    AccountPending,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Storage and hashing failures are internal; everything else is the
    /// caller's input being rejected.
    pub fn is_internal(&self) -> bool {
        matches!(self, DomainError::Storage(_) | DomainError::Hashing(_))
    }
}

pub type CoreResult<T> = Result<T, DomainError>;
