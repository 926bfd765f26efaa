//! Booking rules shared by the console flows and the store transactions.
//!
//! The store re-runs these checks inside its transactions against the rows it
//! just read, so the console-side checks are only an early exit.

use chrono::NaiveDate;

use crate::models::BookingStatus;
use crate::{CoreResult, DomainError};

/// Statuses a guide may move an assigned booking to
pub const GUIDE_TARGET_STATUSES: [BookingStatus; 3] = [
    BookingStatus::Confirmed,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
];

/// A party must fit into the remaining slots of the schedule.
pub fn check_guest_count(requested: i64, capacity: i64) -> CoreResult<()> {
    if requested < 1 {
        return Err(DomainError::Validation(
            "Number of guests must be at least 1.".to_string(),
        ));
    }
    if requested > capacity {
        return Err(DomainError::InsufficientCapacity {
            requested,
            available: capacity.max(0),
        });
    }
    Ok(())
}

/// Schedules dated before `today` no longer take bookings.
pub fn check_bookable_date(date: NaiveDate, today: NaiveDate) -> CoreResult<()> {
    if date < today {
        return Err(DomainError::Validation(format!(
            "The trek on {} has already taken place.",
            date
        )));
    }
    Ok(())
}

/// One non-empty name per companion of the lead booker.
pub fn check_guest_names(guest_count: i64, names: &[String]) -> CoreResult<()> {
    let expected = (guest_count - 1).max(0);
    if names.len() as i64 != expected {
        return Err(DomainError::Validation(format!(
            "Expected {} guest name(s), got {}.",
            expected,
            names.len()
        )));
    }
    if names.iter().any(|n| n.trim().is_empty()) {
        return Err(DomainError::Validation("Guest name cannot be empty.".to_string()));
    }
    Ok(())
}

/// Price is captured at booking time: unit price times party size.
pub fn total_price(unit_centavos: i64, guest_count: i64) -> CoreResult<i64> {
    unit_centavos
        .checked_mul(guest_count)
        .ok_or_else(|| DomainError::Validation("Booking total is too large.".to_string()))
}

pub fn check_cancellable(current: BookingStatus) -> CoreResult<()> {
    if current.is_terminal() {
        return Err(DomainError::InvalidTransition {
            from: current,
            to: BookingStatus::Cancelled,
        });
    }
    Ok(())
}

/// Approval does not depend on a guide being assigned, only on the booking
/// still holding its capacity.
pub fn check_approvable(current: BookingStatus) -> CoreResult<()> {
    if current.is_terminal() {
        return Err(DomainError::InvalidTransition {
            from: current,
            to: BookingStatus::Approved,
        });
    }
    Ok(())
}

pub fn check_guide_transition(current: BookingStatus, target: BookingStatus) -> CoreResult<()> {
    if !GUIDE_TARGET_STATUSES.contains(&target) {
        return Err(DomainError::Validation(format!(
            "Guides cannot set a booking to {}.",
            target
        )));
    }
    if current.is_terminal() {
        return Err(DomainError::InvalidTransition { from: current, to: target });
    }
    Ok(())
}

/// Case-insensitive guide input, normalized to the capitalized status.
pub fn parse_guide_status(input: &str) -> CoreResult<BookingStatus> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation("Status cannot be empty.".to_string()));
    }
    GUIDE_TARGET_STATUSES
        .iter()
        .copied()
        .find(|s| s.as_str().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| {
            DomainError::Validation(
                "Invalid status. Please choose from: Confirmed, Completed, or Cancelled."
                    .to_string(),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5)]
    #[case(-1, 5)]
    #[case(6, 5)]
    #[case(1, 0)]
    fn test_guest_count_rejected(#[case] requested: i64, #[case] capacity: i64) {
        assert!(check_guest_count(requested, capacity).is_err());
    }

    #[rstest]
    #[case(1, 5)]
    #[case(5, 5)]
    fn test_guest_count_accepted(#[case] requested: i64, #[case] capacity: i64) {
        assert!(check_guest_count(requested, capacity).is_ok());
    }

    #[test]
    fn test_over_capacity_reports_remaining_slots() {
        match check_guest_count(6, 5) {
            Err(DomainError::InsufficientCapacity { requested, available }) => {
                assert_eq!((requested, available), (6, 5));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    #[case("2025-06-01", true)]
    #[case("2025-06-02", true)]
    #[case("2025-05-31", false)]
    fn test_bookable_date(#[case] date: &str, #[case] bookable: bool) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        assert_eq!(check_bookable_date(date, today).is_ok(), bookable);
    }

    #[test]
    fn test_guest_names_must_match_companions() {
        let names = vec!["Ana".to_string(), "Ben".to_string()];
        assert!(check_guest_names(3, &names).is_ok());
        assert!(check_guest_names(2, &names).is_err());
        assert!(check_guest_names(1, &[]).is_ok());
        assert!(check_guest_names(2, &["  ".to_string()]).is_err());
    }

    #[test]
    fn test_total_price() {
        assert_eq!(total_price(150000, 3).unwrap(), 450000);
        assert!(total_price(i64::MAX, 2).is_err());
    }

    #[rstest]
    #[case("confirmed", BookingStatus::Confirmed)]
    #[case("  COMPLETED ", BookingStatus::Completed)]
    #[case("Cancelled", BookingStatus::Cancelled)]
    fn test_parse_guide_status(#[case] input: &str, #[case] expected: BookingStatus) {
        assert_eq!(parse_guide_status(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("approved")]
    #[case("pending")]
    fn test_parse_guide_status_rejects(#[case] input: &str) {
        assert!(parse_guide_status(input).is_err());
    }

    #[test]
    fn test_cancel_twice_is_rejected() {
        assert!(check_cancellable(BookingStatus::Pending).is_ok());
        assert!(check_cancellable(BookingStatus::Cancelled).is_err());
        assert!(check_cancellable(BookingStatus::Completed).is_err());
    }

    #[test]
    fn test_guide_transition_out_of_terminal_state() {
        assert!(check_guide_transition(BookingStatus::Approved, BookingStatus::Confirmed).is_ok());
        assert!(check_guide_transition(BookingStatus::Cancelled, BookingStatus::Confirmed).is_err());
        assert!(check_guide_transition(BookingStatus::Approved, BookingStatus::Pending).is_err());
    }

    #[test]
    fn test_approval_ignores_guide_but_not_terminal_status() {
        assert!(check_approvable(BookingStatus::Pending).is_ok());
        assert!(check_approvable(BookingStatus::Confirmed).is_ok());
        assert!(check_approvable(BookingStatus::Cancelled).is_err());
    }
}
