use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{
    Booking, BookingStatus, BookingView, Manifest, NewBooking, NewSchedule, NewTrek, NewUser,
    ScheduleView, Trek, User, UserCredentials,
};
use crate::CoreResult;

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive email lookup
    async fn find_credentials(&self, email: &str) -> CoreResult<Option<UserCredentials>>;

    async fn email_exists(&self, email: &str) -> CoreResult<bool>;

    /// Inserts with status `Pending`. A duplicate email is a `Conflict`.
    async fn create_user(&self, user: &NewUser) -> CoreResult<i64>;

    async fn list_users(&self) -> CoreResult<Vec<User>>;

    async fn approve_user(&self, id: i64) -> CoreResult<()>;

    /// Guides eligible for assignment: type Guide, status Approved
    async fn list_approved_guides(&self) -> CoreResult<Vec<User>>;
}

/// Repository trait for the trek catalog
#[async_trait]
pub trait TrekRepository: Send + Sync {
    async fn create_trek(&self, trek: &NewTrek) -> CoreResult<i64>;

    async fn list_treks(&self) -> CoreResult<Vec<Trek>>;

    async fn get_trek(&self, id: i64) -> CoreResult<Option<Trek>>;

    async fn update_description(&self, id: i64, description: &str) -> CoreResult<()>;

    /// Fails with `Conflict` while schedules still reference the trek.
    async fn delete_trek(&self, id: i64) -> CoreResult<()>;
}

/// Repository trait for dated trek schedules
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn create_schedule(&self, schedule: &NewSchedule) -> CoreResult<i64>;

    async fn list_schedules(&self) -> CoreResult<Vec<ScheduleView>>;

    /// Schedules on or after `from` with at least one free slot
    async fn list_available(&self, from: NaiveDate) -> CoreResult<Vec<ScheduleView>>;

    async fn get_schedule(&self, id: i64) -> CoreResult<Option<ScheduleView>>;
}

/// Repository trait for bookings and their guest rows.
///
/// Every method that touches capacity runs in a single transaction.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert booking and guest rows, then take `guest_count` slots from the
    /// schedule. All or nothing.
    async fn create_booking(&self, booking: &NewBooking) -> CoreResult<Booking>;

    /// Customer cancellation: status `Cancelled` and the stored guest count
    /// returned to the schedule. Someone else's booking is `NotFound`.
    async fn cancel_booking(&self, booking_id: i64, customer_id: i64) -> CoreResult<Booking>;

    async fn list_bookings(&self) -> CoreResult<Vec<BookingView>>;

    async fn list_customer_bookings(&self, customer_id: i64) -> CoreResult<Vec<BookingView>>;

    async fn get_booking(&self, booking_id: i64) -> CoreResult<Option<BookingView>>;

    /// Optionally put `guide_id` on the booking's schedule, then approve the
    /// booking. The guide must be an approved guide.
    async fn approve_booking(&self, booking_id: i64, guide_id: Option<i64>) -> CoreResult<BookingView>;

    /// Approved/Confirmed bookings on schedules led by `guide_id`
    async fn list_assigned_bookings(&self, guide_id: i64) -> CoreResult<Vec<BookingView>>;

    /// Booking on a schedule led by `guide_id`, in any status
    async fn find_assigned_booking(&self, booking_id: i64, guide_id: i64) -> CoreResult<Option<BookingView>>;

    /// Guide status change. Capacity is only returned when the booking is
    /// cancelled and `refund_on_cancel` is set.
    async fn update_status_as_guide(
        &self,
        booking_id: i64,
        guide_id: i64,
        status: BookingStatus,
        refund_on_cancel: bool,
    ) -> CoreResult<Booking>;

    /// Members of an active booking assigned to `guide_id`
    async fn manifest(&self, booking_id: i64, guide_id: i64) -> CoreResult<Option<Manifest>>;
}
