pub mod app_config;
pub mod database;
pub mod sql;
pub mod user_repo;
pub mod trek_repo;
pub mod schedule_repo;
pub mod booking_repo;

mod error;
mod rows;

pub use database::DbClient;
pub use user_repo::StoreUserRepository;
pub use trek_repo::StoreTrekRepository;
pub use schedule_repo::StoreScheduleRepository;
pub use booking_repo::StoreBookingRepository;
