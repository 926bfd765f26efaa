// Internal structs for type-safe querying
use baklay_core::{Booking, BookingView, CoreResult, ScheduleView, Trek, User};
use chrono::{DateTime, NaiveDate, Utc};

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub user_type: String,
    pub status: String,
}

impl UserRow {
    pub fn into_user(self) -> CoreResult<User> {
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            contact: self.contact,
            user_type: self.user_type.parse()?,
            status: self.status.parse()?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CredentialsRow {
    #[sqlx(flatten)]
    pub user: UserRow,
    pub password_hash: String,
}

#[derive(sqlx::FromRow)]
pub(crate) struct TrekRow {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub difficulty: String,
    pub price_centavos: i64,
}

impl From<TrekRow> for Trek {
    fn from(row: TrekRow) -> Self {
        Trek {
            id: row.id,
            code: row.code,
            description: row.description,
            difficulty: row.difficulty,
            price_centavos: row.price_centavos,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ScheduleRow {
    pub id: i64,
    pub trek_id: i64,
    pub trek_code: String,
    pub trek_description: String,
    pub price_centavos: i64,
    pub schedule_date: NaiveDate,
    pub capacity: i64,
    pub guide_id: Option<i64>,
    pub guide_name: Option<String>,
}

impl From<ScheduleRow> for ScheduleView {
    fn from(row: ScheduleRow) -> Self {
        ScheduleView {
            id: row.id,
            trek_id: row.trek_id,
            trek_code: row.trek_code,
            trek_description: row.trek_description,
            price_centavos: row.price_centavos,
            date: row.schedule_date,
            capacity: row.capacity,
            guide_id: row.guide_id,
            guide_name: row.guide_name,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BookingRow {
    pub id: i64,
    pub customer_id: i64,
    pub schedule_id: i64,
    pub guest_count: i64,
    pub total_centavos: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BookingRow {
    pub fn into_booking(self) -> CoreResult<Booking> {
        Ok(Booking {
            id: self.id,
            customer_id: self.customer_id,
            schedule_id: self.schedule_id,
            guest_count: self.guest_count,
            total_centavos: self.total_centavos,
            status: self.status.parse()?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BookingViewRow {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub schedule_id: i64,
    pub trek_description: String,
    pub schedule_date: NaiveDate,
    pub guide_id: Option<i64>,
    pub guide_name: Option<String>,
    pub guest_count: i64,
    pub total_centavos: i64,
    pub status: String,
}

impl BookingViewRow {
    pub fn into_view(self) -> CoreResult<BookingView> {
        Ok(BookingView {
            id: self.id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            schedule_id: self.schedule_id,
            trek_description: self.trek_description,
            schedule_date: self.schedule_date,
            guide_id: self.guide_id,
            guide_name: self.guide_name,
            guest_count: self.guest_count,
            total_centavos: self.total_centavos,
            status: self.status.parse()?,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ManifestRow {
    pub id: i64,
    pub trek_description: String,
    pub lead_name: String,
    pub lead_contact: String,
    pub guest_count: i64,
}
