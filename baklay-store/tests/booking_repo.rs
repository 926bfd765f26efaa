use baklay_core::repository::{BookingRepository, ScheduleRepository, TrekRepository, UserRepository};
use baklay_core::{BookingStatus, DomainError, NewBooking, NewSchedule, NewTrek, NewUser, UserType};
use baklay_store::{
    DbClient, StoreBookingRepository, StoreScheduleRepository, StoreTrekRepository,
    StoreUserRepository,
};
use chrono::NaiveDate;

struct Fixture {
    db: DbClient,
    users: StoreUserRepository,
    treks: StoreTrekRepository,
    schedules: StoreScheduleRepository,
    bookings: StoreBookingRepository,
}

impl Fixture {
    async fn new() -> Self {
        let db = DbClient::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        Self {
            users: StoreUserRepository::new(db.pool.clone()),
            treks: StoreTrekRepository::new(db.pool.clone()),
            schedules: StoreScheduleRepository::new(db.pool.clone()),
            bookings: StoreBookingRepository::new(db.pool.clone()),
            db,
        }
    }

    async fn user(&self, name: &str, user_type: UserType) -> i64 {
        let id = self
            .users
            .create_user(&NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                contact: "09171234567".to_string(),
                user_type,
                password_hash: "$argon2id$placeholder".to_string(),
            })
            .await
            .unwrap();
        self.users.approve_user(id).await.unwrap();
        id
    }

    /// Trek priced at 1,500.00 with one schedule of the given capacity
    async fn schedule(&self, capacity: i64, guide_id: Option<i64>) -> i64 {
        self.schedule_on(NaiveDate::from_ymd_opt(2099, 3, 14).unwrap(), capacity, guide_id)
            .await
    }

    async fn schedule_on(&self, date: NaiveDate, capacity: i64, guide_id: Option<i64>) -> i64 {
        let trek_id = self
            .treks
            .create_trek(&NewTrek {
                code: "OSM-01".to_string(),
                description: "Osmeña Peak Sunrise".to_string(),
                difficulty: "Easy".to_string(),
                price_centavos: 150_000,
            })
            .await
            .unwrap();
        self.schedules
            .create_schedule(&NewSchedule {
                trek_id,
                date,
                capacity,
                guide_id,
            })
            .await
            .unwrap()
    }

    async fn capacity(&self, schedule_id: i64) -> i64 {
        self.schedules.get_schedule(schedule_id).await.unwrap().unwrap().capacity
    }

    async fn book(&self, customer_id: i64, schedule_id: i64, guests: &[&str]) -> Result<i64, DomainError> {
        self.bookings
            .create_booking(&NewBooking {
                customer_id,
                schedule_id,
                guest_count: guests.len() as i64 + 1,
                guest_names: guests.iter().map(|g| g.to_string()).collect(),
            })
            .await
            .map(|b| b.id)
    }

    async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.db.pool)
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_book_then_cancel_restores_capacity() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;

    let booking_id = f.book(customer, schedule, &["Ana", "Ben"]).await.unwrap();
    assert_eq!(f.capacity(schedule).await, 2);

    let view = f.bookings.get_booking(booking_id).await.unwrap().unwrap();
    assert_eq!(view.guest_count, 3);
    assert_eq!(view.total_centavos, 450_000);
    assert_eq!(view.status, BookingStatus::Pending);
    assert_eq!(f.count("guests").await, 2);

    let cancelled = f.bookings.cancel_booking(booking_id, customer).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(f.capacity(schedule).await, 5);
}

#[tokio::test]
async fn test_over_capacity_booking_is_rejected_without_writes() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;

    let err = f
        .book(customer, schedule, &["A", "B", "C", "D", "E"])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InsufficientCapacity { requested: 6, available: 5 }));
    assert_eq!(f.capacity(schedule).await, 5);
    assert_eq!(f.count("bookings").await, 0);
    assert_eq!(f.count("guests").await, 0);
}

#[tokio::test]
async fn test_zero_guests_and_unknown_schedule_are_rejected() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;

    let zero = NewBooking { customer_id: customer, schedule_id: schedule, guest_count: 0, guest_names: vec![] };
    assert!(matches!(
        f.bookings.create_booking(&zero).await,
        Err(DomainError::Validation(_))
    ));

    assert!(matches!(
        f.book(customer, 999, &[]).await,
        Err(DomainError::NotFound(_))
    ));
    assert_eq!(f.capacity(schedule).await, 5);
}

#[tokio::test]
async fn test_failed_guest_insert_rolls_back_booking() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;

    sqlx::query(
        "CREATE TRIGGER reject_guest BEFORE INSERT ON guests WHEN NEW.name = 'BOOM' \
         BEGIN SELECT RAISE(ABORT, 'guest rejected'); END",
    )
    .execute(&f.db.pool)
    .await
    .unwrap();

    let err = f.book(customer, schedule, &["Ana", "BOOM"]).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
    assert_eq!(f.count("bookings").await, 0);
    assert_eq!(f.count("guests").await, 0);
    assert_eq!(f.capacity(schedule).await, 5);
}

#[tokio::test]
async fn test_cancel_twice_is_rejected() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;
    let booking_id = f.book(customer, schedule, &["Ana"]).await.unwrap();

    f.bookings.cancel_booking(booking_id, customer).await.unwrap();
    let err = f.bookings.cancel_booking(booking_id, customer).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition { from: BookingStatus::Cancelled, .. }
    ));
    assert_eq!(f.capacity(schedule).await, 5);
}

#[tokio::test]
async fn test_customer_cannot_touch_another_customers_booking() {
    let f = Fixture::new().await;
    let owner = f.user("Maria", UserType::Customer).await;
    let intruder = f.user("Pedro", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;
    let booking_id = f.book(owner, schedule, &["Ana"]).await.unwrap();

    assert!(matches!(
        f.bookings.cancel_booking(booking_id, intruder).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(f.bookings.list_customer_bookings(intruder).await.unwrap().is_empty());
    assert_eq!(f.bookings.list_customer_bookings(owner).await.unwrap().len(), 1);
    assert_eq!(f.capacity(schedule).await, 3);
}

#[tokio::test]
async fn test_capacity_matches_active_bookings_after_mixed_sequence() {
    let f = Fixture::new().await;
    let a = f.user("Maria", UserType::Customer).await;
    let b = f.user("Pedro", UserType::Customer).await;
    let schedule = f.schedule(10, None).await;

    let b1 = f.book(a, schedule, &["x", "y"]).await.unwrap();
    let b2 = f.book(b, schedule, &[]).await.unwrap();
    let _b3 = f.book(a, schedule, &["z", "w", "v"]).await.unwrap();
    f.bookings.cancel_booking(b1, a).await.unwrap();
    let _b4 = f.book(b, schedule, &["q"]).await.unwrap();
    f.bookings.cancel_booking(b2, b).await.unwrap();
    assert!(f.book(a, schedule, &["1", "2", "3", "4", "5", "6", "7"]).await.is_err());

    let active: i64 = f
        .bookings
        .list_bookings()
        .await
        .unwrap()
        .iter()
        .filter(|v| v.status != BookingStatus::Cancelled)
        .map(|v| v.guest_count)
        .sum();
    assert_eq!(active, 6);
    assert_eq!(f.capacity(schedule).await, 10 - active);
}

#[tokio::test]
async fn test_approve_assigns_guide_to_schedule() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let guide = f.user("Gido", UserType::Guide).await;
    let schedule = f.schedule(5, None).await;
    let booking_id = f.book(customer, schedule, &[]).await.unwrap();

    let approved = f.bookings.approve_booking(booking_id, Some(guide)).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);
    assert_eq!(approved.guide_id, Some(guide));
    assert_eq!(approved.guide_name.as_deref(), Some("Gido"));
    assert_eq!(f.schedules.get_schedule(schedule).await.unwrap().unwrap().guide_id, Some(guide));
}

#[tokio::test]
async fn test_approve_without_guide_is_allowed() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;
    let booking_id = f.book(customer, schedule, &[]).await.unwrap();

    let approved = f.bookings.approve_booking(booking_id, None).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);
    assert_eq!(approved.guide_id, None);
}

#[tokio::test]
async fn test_approve_with_ineligible_guide_changes_nothing() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;
    let booking_id = f.book(customer, schedule, &[]).await.unwrap();

    // A customer is not a guide
    let err = f.bookings.approve_booking(booking_id, Some(customer)).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    let view = f.bookings.get_booking(booking_id).await.unwrap().unwrap();
    assert_eq!(view.status, BookingStatus::Pending);
    assert_eq!(view.guide_id, None);
}

#[tokio::test]
async fn test_cancelled_booking_cannot_be_approved() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f.schedule(5, None).await;
    let booking_id = f.book(customer, schedule, &[]).await.unwrap();
    f.bookings.cancel_booking(booking_id, customer).await.unwrap();

    assert!(matches!(
        f.bookings.approve_booking(booking_id, None).await,
        Err(DomainError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_guide_update_requires_assignment() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let guide = f.user("Gido", UserType::Guide).await;
    let other_guide = f.user("Otso", UserType::Guide).await;
    let schedule = f.schedule(5, Some(guide)).await;
    let booking_id = f.book(customer, schedule, &[]).await.unwrap();
    f.bookings.approve_booking(booking_id, None).await.unwrap();

    let err = f
        .bookings
        .update_status_as_guide(booking_id, other_guide, BookingStatus::Confirmed, false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));

    let updated = f
        .bookings
        .update_status_as_guide(booking_id, guide, BookingStatus::Confirmed, false)
        .await
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(f.bookings.list_assigned_bookings(guide).await.unwrap().len(), 1);
    assert!(f.bookings.list_assigned_bookings(other_guide).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_guide_cancellation_refund_follows_flag() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let guide = f.user("Gido", UserType::Guide).await;
    let schedule = f.schedule(5, Some(guide)).await;

    let kept = f.book(customer, schedule, &["Ana"]).await.unwrap();
    f.bookings
        .update_status_as_guide(kept, guide, BookingStatus::Cancelled, false)
        .await
        .unwrap();
    assert_eq!(f.capacity(schedule).await, 3);

    let refunded = f.book(customer, schedule, &["Ana"]).await.unwrap();
    f.bookings
        .update_status_as_guide(refunded, guide, BookingStatus::Cancelled, true)
        .await
        .unwrap();
    assert_eq!(f.capacity(schedule).await, 3);

    // Terminal now
    assert!(matches!(
        f.bookings
            .update_status_as_guide(refunded, guide, BookingStatus::Confirmed, true)
            .await,
        Err(DomainError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn test_manifest_lists_guests_and_falls_back_on_mismatch() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let guide = f.user("Gido", UserType::Guide).await;
    let schedule = f.schedule(5, Some(guide)).await;
    let booking_id = f.book(customer, schedule, &["Ana", "Ben"]).await.unwrap();

    // Pending bookings are not on the guide's manifest yet
    assert!(f.bookings.manifest(booking_id, guide).await.unwrap().is_none());

    f.bookings.approve_booking(booking_id, None).await.unwrap();
    let manifest = f.bookings.manifest(booking_id, guide).await.unwrap().unwrap();
    assert_eq!(manifest.lead_name, "Maria");
    assert_eq!(manifest.guest_count, 3);
    assert_eq!(manifest.companion_labels(), vec!["Guest: Ana", "Guest: Ben"]);

    sqlx::query("DELETE FROM guests WHERE name = 'Ben'")
        .execute(&f.db.pool)
        .await
        .unwrap();
    let manifest = f.bookings.manifest(booking_id, guide).await.unwrap().unwrap();
    assert_eq!(manifest.companion_labels(), vec!["Guest #1", "Guest #2"]);

    // Refund still uses the stored guest count
    f.bookings.cancel_booking(booking_id, customer).await.unwrap();
    assert_eq!(f.capacity(schedule).await, 5);
}

#[tokio::test]
async fn test_past_schedule_cannot_be_booked() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let schedule = f
        .schedule_on(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 5, None)
        .await;

    let err = f.book(customer, schedule, &["Ana"]).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(f.capacity(schedule).await, 5);
    assert_eq!(f.count("bookings").await, 0);
}

#[tokio::test]
async fn test_customer_cannot_cancel_completed_booking() {
    let f = Fixture::new().await;
    let customer = f.user("Maria", UserType::Customer).await;
    let guide = f.user("Gido", UserType::Guide).await;
    let schedule = f.schedule(5, Some(guide)).await;
    let booking_id = f.book(customer, schedule, &["Ana"]).await.unwrap();
    f.bookings.approve_booking(booking_id, None).await.unwrap();
    f.bookings
        .update_status_as_guide(booking_id, guide, BookingStatus::Completed, false)
        .await
        .unwrap();
    assert_eq!(f.capacity(schedule).await, 3);

    let err = f.bookings.cancel_booking(booking_id, customer).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition { from: BookingStatus::Completed, to: BookingStatus::Cancelled }
    ));
    assert_eq!(f.capacity(schedule).await, 3);
    let view = f.bookings.get_booking(booking_id).await.unwrap().unwrap();
    assert_eq!(view.status, BookingStatus::Completed);
}
