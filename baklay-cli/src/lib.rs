pub mod admin;
pub mod auth;
pub mod console;
pub mod customer;
pub mod error;
pub mod guide;
pub mod listing;
pub mod menu;
pub mod session;
pub mod state;
pub mod table;

pub use error::{AppError, AppResult};
pub use state::AppContext;
