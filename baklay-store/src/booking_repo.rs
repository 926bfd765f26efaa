use async_trait::async_trait;
use baklay_core::booking;
use baklay_core::repository::BookingRepository;
use baklay_core::{Booking, BookingStatus, BookingView, CoreResult, DomainError, Manifest, NewBooking};
use chrono::{Local, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use crate::error::storage;
use crate::rows::{BookingRow, BookingViewRow, ManifestRow};
use crate::sql;

pub struct StoreBookingRepository {
    pool: SqlitePool,
}

impl StoreBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn view(&self, booking_id: i64) -> CoreResult<Option<BookingView>> {
        let row: Option<BookingViewRow> = sqlx::query_as(sql::BOOKING_VIEW_BY_ID)
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.map(BookingViewRow::into_view).transpose()
    }

    async fn views(&self, query: &'static str, bind: Option<i64>) -> CoreResult<Vec<BookingView>> {
        let mut q = sqlx::query_as::<_, BookingViewRow>(query);
        if let Some(value) = bind {
            q = q.bind(value);
        }
        let rows = q.fetch_all(&self.pool).await.map_err(storage)?;
        rows.into_iter().map(BookingViewRow::into_view).collect()
    }

    async fn set_status(
        tx: &mut Transaction<'_, Sqlite>,
        booking_id: i64,
        status: BookingStatus,
    ) -> CoreResult<()> {
        sqlx::query(sql::SET_BOOKING_STATUS)
            .bind(status.as_str())
            .bind(booking_id)
            .execute(&mut **tx)
            .await
            .map_err(storage)?;
        Ok(())
    }

    async fn return_capacity(
        tx: &mut Transaction<'_, Sqlite>,
        schedule_id: i64,
        slots: i64,
    ) -> CoreResult<()> {
        sqlx::query(sql::RETURN_CAPACITY)
            .bind(slots)
            .bind(schedule_id)
            .execute(&mut **tx)
            .await
            .map_err(storage)?;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn create_booking(&self, new: &NewBooking) -> CoreResult<Booking> {
        booking::check_guest_names(new.guest_count, &new.guest_names)?;

        let mut tx = self.pool.begin().await.map_err(storage)?;

        let (capacity, unit_price, date): (i64, i64, NaiveDate) =
            sqlx::query_as(sql::SCHEDULE_FOR_BOOKING)
                .bind(new.schedule_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(storage)?
                .ok_or_else(|| DomainError::NotFound(format!("Schedule ID {}", new.schedule_id)))?;

        booking::check_bookable_date(date, Local::now().date_naive())?;
        booking::check_guest_count(new.guest_count, capacity)?;
        let total = booking::total_price(unit_price, new.guest_count)?;
        let created_at = Utc::now();

        let booking_id = sqlx::query(sql::INSERT_BOOKING)
            .bind(new.customer_id)
            .bind(new.schedule_id)
            .bind(new.guest_count)
            .bind(total)
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(storage)?
            .last_insert_rowid();

        for name in &new.guest_names {
            sqlx::query(sql::INSERT_GUEST)
                .bind(booking_id)
                .bind(name.trim())
                .execute(&mut *tx)
                .await
                .map_err(storage)?;
        }

        let taken = sqlx::query(sql::TAKE_CAPACITY)
            .bind(new.guest_count)
            .bind(new.schedule_id)
            .bind(new.guest_count)
            .execute(&mut *tx)
            .await
            .map_err(storage)?
            .rows_affected();

        if taken != 1 {
            // Someone else took the slots between our read and write; dropping
            // the transaction rolls back the booking and guest rows.
            warn!(
                "Schedule {} lost capacity while booking {} guest(s)",
                new.schedule_id, new.guest_count
            );
            return Err(DomainError::InsufficientCapacity {
                requested: new.guest_count,
                available: capacity,
            });
        }

        tx.commit().await.map_err(storage)?;

        info!(
            "Booking {} created: customer {} schedule {} guests {} total {}",
            booking_id, new.customer_id, new.schedule_id, new.guest_count, total
        );

        Ok(Booking {
            id: booking_id,
            customer_id: new.customer_id,
            schedule_id: new.schedule_id,
            guest_count: new.guest_count,
            total_centavos: total,
            status: BookingStatus::Pending,
            created_at,
        })
    }

    async fn cancel_booking(&self, booking_id: i64, customer_id: i64) -> CoreResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: BookingRow = sqlx::query_as(sql::BOOKING_BY_ID_FOR_CUSTOMER)
            .bind(booking_id)
            .bind(customer_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?
            .ok_or_else(|| DomainError::NotFound(format!("Booking ID {}", booking_id)))?;
        let mut current = row.into_booking()?;

        booking::check_cancellable(current.status)?;

        Self::set_status(&mut tx, booking_id, BookingStatus::Cancelled).await?;
        Self::return_capacity(&mut tx, current.schedule_id, current.guest_count).await?;

        tx.commit().await.map_err(storage)?;

        info!(
            "Booking {} cancelled by customer {}; {} slot(s) returned to schedule {}",
            booking_id, customer_id, current.guest_count, current.schedule_id
        );
        current.status = BookingStatus::Cancelled;
        Ok(current)
    }

    async fn list_bookings(&self) -> CoreResult<Vec<BookingView>> {
        self.views(sql::LIST_BOOKINGS, None).await
    }

    async fn list_customer_bookings(&self, customer_id: i64) -> CoreResult<Vec<BookingView>> {
        self.views(sql::LIST_CUSTOMER_BOOKINGS, Some(customer_id)).await
    }

    async fn get_booking(&self, booking_id: i64) -> CoreResult<Option<BookingView>> {
        self.view(booking_id).await
    }

    async fn approve_booking(&self, booking_id: i64, guide_id: Option<i64>) -> CoreResult<BookingView> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: BookingRow = sqlx::query_as(sql::BOOKING_BY_ID)
            .bind(booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?
            .ok_or_else(|| DomainError::NotFound(format!("Booking ID {}", booking_id)))?;
        let current = row.into_booking()?;

        booking::check_approvable(current.status)?;

        if let Some(guide_id) = guide_id {
            let eligible: bool = sqlx::query_scalar(sql::APPROVED_GUIDE_EXISTS)
                .bind(guide_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage)?;
            if !eligible {
                return Err(DomainError::NotFound(format!("Approved guide ID {}", guide_id)));
            }

            let assigned = sqlx::query(sql::ASSIGN_GUIDE)
                .bind(guide_id)
                .bind(current.schedule_id)
                .execute(&mut *tx)
                .await
                .map_err(storage)?
                .rows_affected();
            if assigned == 0 {
                return Err(DomainError::Conflict(format!(
                    "Schedule ID {} already has a guide.",
                    current.schedule_id
                )));
            }
            info!("Guide {} assigned to schedule {}", guide_id, current.schedule_id);
        }

        Self::set_status(&mut tx, booking_id, BookingStatus::Approved).await?;
        tx.commit().await.map_err(storage)?;

        info!("Booking {} approved", booking_id);

        self.view(booking_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Booking ID {}", booking_id)))
    }

    async fn list_assigned_bookings(&self, guide_id: i64) -> CoreResult<Vec<BookingView>> {
        self.views(sql::LIST_ASSIGNED_BOOKINGS, Some(guide_id)).await
    }

    async fn find_assigned_booking(&self, booking_id: i64, guide_id: i64) -> CoreResult<Option<BookingView>> {
        let row: Option<BookingViewRow> = sqlx::query_as(sql::ASSIGNED_BOOKING_VIEW)
            .bind(booking_id)
            .bind(guide_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        row.map(BookingViewRow::into_view).transpose()
    }

    async fn update_status_as_guide(
        &self,
        booking_id: i64,
        guide_id: i64,
        status: BookingStatus,
        refund_on_cancel: bool,
    ) -> CoreResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let row: BookingRow = sqlx::query_as(sql::BOOKING_BY_ID_FOR_GUIDE)
            .bind(booking_id)
            .bind(guide_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Booking ID {} on your schedules", booking_id))
            })?;
        let mut current = row.into_booking()?;

        booking::check_guide_transition(current.status, status)?;

        Self::set_status(&mut tx, booking_id, status).await?;
        let refund = status == BookingStatus::Cancelled && refund_on_cancel;
        if refund {
            Self::return_capacity(&mut tx, current.schedule_id, current.guest_count).await?;
        }

        tx.commit().await.map_err(storage)?;

        info!(
            "Guide {} set booking {} from {} to {}{}",
            guide_id,
            booking_id,
            current.status,
            status,
            if refund { " (capacity returned)" } else { "" }
        );
        current.status = status;
        Ok(current)
    }

    async fn manifest(&self, booking_id: i64, guide_id: i64) -> CoreResult<Option<Manifest>> {
        let header: Option<ManifestRow> = sqlx::query_as(sql::MANIFEST_HEADER)
            .bind(booking_id)
            .bind(guide_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;

        let Some(header) = header else {
            return Ok(None);
        };

        let guest_names: Vec<String> = sqlx::query_scalar(sql::GUEST_NAMES)
            .bind(booking_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;

        Ok(Some(Manifest {
            booking_id: header.id,
            trek_description: header.trek_description,
            lead_name: header.lead_name,
            lead_contact: header.lead_contact,
            guest_count: header.guest_count,
            guest_names,
        }))
    }
}
