use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Account role, fixed at registration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserType {
    Admin,
    Guide,
    Customer,
}

impl UserType {
    /// Registration menu: 1 - Admin, 2 - Guide, 3 - Customer
    pub fn from_menu_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(UserType::Admin),
            2 => Some(UserType::Guide),
            3 => Some(UserType::Customer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "Admin",
            UserType::Guide => "Guide",
            UserType::Customer => "Customer",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(UserType::Admin),
            "Guide" => Ok(UserType::Guide),
            "Customer" => Ok(UserType::Customer),
            other => Err(DomainError::Validation(format!("Unknown user type: {}", other))),
        }
    }
}

/// Account status; only an admin moves an account out of `Pending`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Pending,
    Approved,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "Pending",
            UserStatus::Approved => "Approved",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(UserStatus::Pending),
            "Approved" => Ok(UserStatus::Approved),
            other => Err(DomainError::Validation(format!("Unknown user status: {}", other))),
        }
    }
}

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Approved,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Cancelled and Completed bookings no longer hold capacity and never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Bookings a guide actively works on
    pub fn is_active_assignment(&self) -> bool {
        matches!(self, BookingStatus::Approved | BookingStatus::Confirmed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(BookingStatus::Pending),
            "Approved" => Ok(BookingStatus::Approved),
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Completed" => Ok(BookingStatus::Completed),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(DomainError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub user_type: UserType,
    pub status: UserStatus,
}

/// A user together with the stored password hash, only used by login
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub user_type: UserType,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trek {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub difficulty: String,
    pub price_centavos: i64,
}

#[derive(Debug, Clone)]
pub struct NewTrek {
    pub code: String,
    pub description: String,
    pub difficulty: String,
    pub price_centavos: i64,
}

/// A dated run of a trek, joined with its trek and (optional) guide
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleView {
    pub id: i64,
    pub trek_id: i64,
    pub trek_code: String,
    pub trek_description: String,
    pub price_centavos: i64,
    pub date: NaiveDate,
    pub capacity: i64,
    pub guide_id: Option<i64>,
    pub guide_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub trek_id: i64,
    pub date: NaiveDate,
    pub capacity: i64,
    pub guide_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub schedule_id: i64,
    /// Party size, lead booker included
    pub guest_count: i64,
    pub total_centavos: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for the booking transaction. `guest_names` holds the companions of
/// the lead booker, so a well-formed request has `guest_count - 1` names.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: i64,
    pub schedule_id: i64,
    pub guest_count: i64,
    pub guest_names: Vec<String>,
}

/// Booking row joined with customer, trek, schedule and guide for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingView {
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
    pub status: BookingStatus,
}

/// Trek members of one booking, as shown to the assigned guide
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub booking_id: i64,
    pub trek_description: String,
    pub lead_name: String,
    pub lead_contact: String,
    pub guest_count: i64,
    pub guest_names: Vec<String>,
}

impl Manifest {
    /// Companions excluding the lead booker
    pub fn companion_count(&self) -> i64 {
        (self.guest_count - 1).max(0)
    }

    /// Companion labels. Falls back to numbered placeholders when the stored
    /// guest rows disagree with the booking's guest count.
    pub fn companion_labels(&self) -> Vec<String> {
        let expected = self.companion_count();
        if self.guest_names.len() as i64 == expected {
            self.guest_names
                .iter()
                .map(|name| format!("Guest: {}", name))
                .collect()
        } else {
            (1..=expected).map(|i| format!("Guest #{}", i)).collect()
        }
    }
}

/// Render centavos as pesos with two decimals, e.g. `150050` -> `1500.50`
pub fn format_php(centavos: i64) -> String {
    let sign = if centavos < 0 { "-" } else { "" };
    let abs = centavos.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(guest_count: i64, names: &[&str]) -> Manifest {
        Manifest {
            booking_id: 1,
            trek_description: "Osmeña Peak".to_string(),
            lead_name: "Juan".to_string(),
            lead_contact: "0917".to_string(),
            guest_count,
            guest_names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn test_status_round_trip_through_db_text() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Approved,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("CANCELLED".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(!BookingStatus::Approved.is_terminal());
    }

    #[test]
    fn test_user_type_menu_choice() {
        assert_eq!(UserType::from_menu_choice(2), Some(UserType::Guide));
        assert_eq!(UserType::from_menu_choice(4), None);
    }

    #[test]
    fn test_manifest_uses_guest_names_when_consistent() {
        let m = manifest(3, &["Ana", "Ben"]);
        assert_eq!(m.companion_labels(), vec!["Guest: Ana", "Guest: Ben"]);
    }

    #[test]
    fn test_manifest_falls_back_to_placeholders_on_mismatch() {
        let m = manifest(3, &["Ana"]);
        assert_eq!(m.companion_labels(), vec!["Guest #1", "Guest #2"]);
    }

    #[test]
    fn test_manifest_solo_booking_has_no_companions() {
        assert!(manifest(1, &[]).companion_labels().is_empty());
    }

    #[test]
    fn test_format_php() {
        assert_eq!(format_php(150050), "1500.50");
        assert_eq!(format_php(7), "0.07");
        assert_eq!(format_php(-250), "-2.50");
    }
}
