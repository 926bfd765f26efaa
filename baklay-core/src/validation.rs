use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::{CoreResult, DomainError};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,6}$").expect("valid email regex")
});

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

fn invalid(msg: impl Into<String>) -> DomainError {
    DomainError::Validation(msg.into())
}

/// Trimmed, non-empty free text
pub fn required(field: &str, input: &str) -> CoreResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{} cannot be empty.", field)));
    }
    Ok(trimmed.to_string())
}

pub fn email(input: &str) -> CoreResult<String> {
    let trimmed = required("Email", input)?;
    if !EMAIL_PATTERN.is_match(&trimmed) {
        return Err(invalid("Invalid email format."));
    }
    Ok(trimmed)
}

pub fn contact(input: &str) -> CoreResult<String> {
    let trimmed = required("Contact number", input)?;
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("Contact number must contain only digits."));
    }
    Ok(trimmed)
}

/// Password is trimmed before both hashing and checking, so registration and
/// login agree on what was typed.
pub fn password(input: &str, min_length: usize) -> CoreResult<String> {
    let trimmed = required("Password", input)?;
    if trimmed.chars().count() < min_length {
        return Err(invalid(format!(
            "Password must be at least {} characters long.",
            min_length
        )));
    }
    Ok(trimmed)
}

/// `YYYY-MM-DD`, and an actual calendar date
pub fn date(input: &str) -> CoreResult<NaiveDate> {
    let trimmed = required("Date", input)?;
    if !DATE_PATTERN.is_match(&trimmed) {
        return Err(invalid("Invalid date format. Please use YYYY-MM-DD (e.g., 2024-12-31)."));
    }
    NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d")
        .map_err(|_| invalid(format!("{} is not a valid calendar date.", trimmed)))
}

/// Pesos with up to two decimals, returned in centavos. Must be positive.
pub fn price(input: &str) -> CoreResult<i64> {
    let trimmed = required("Price", input)?;
    let pesos: f64 = trimmed
        .parse()
        .map_err(|_| invalid("Invalid price format. Must be a number."))?;
    if !pesos.is_finite() || pesos > (i64::MAX / 100) as f64 {
        return Err(invalid("Invalid price format. Must be a number."));
    }
    let centavos = (pesos * 100.0).round() as i64;
    if centavos <= 0 {
        return Err(invalid("Price must be greater than zero."));
    }
    Ok(centavos)
}

/// Schedule capacity: at least one slot
pub fn capacity(value: i64) -> CoreResult<i64> {
    if value < 1 {
        return Err(invalid("Capacity must be at least 1."));
    }
    Ok(value)
}
