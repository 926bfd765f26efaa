use std::sync::Arc;

use baklay_core::repository::{BookingRepository, ScheduleRepository, TrekRepository, UserRepository};
use baklay_core::PasswordHasher;
use baklay_store::app_config::BusinessRules;
use baklay_store::{
    DbClient, StoreBookingRepository, StoreScheduleRepository, StoreTrekRepository,
    StoreUserRepository,
};

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UserRepository>,
    pub treks: Arc<dyn TrekRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub hasher: PasswordHasher,
    pub business_rules: BusinessRules,
}

impl AppContext {
    pub fn new(db: &DbClient, hasher: PasswordHasher, business_rules: BusinessRules) -> Self {
        Self {
            users: Arc::new(StoreUserRepository::new(db.pool.clone())),
            treks: Arc::new(StoreTrekRepository::new(db.pool.clone())),
            schedules: Arc::new(StoreScheduleRepository::new(db.pool.clone())),
            bookings: Arc::new(StoreBookingRepository::new(db.pool.clone())),
            hasher,
            business_rules,
        }
    }
}
