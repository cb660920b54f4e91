// Validation and value parsing utilities
// Author: Gabriel Demetrios Lafis

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Date layout accepted from users
pub const USER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an integer, accepting a float spelling with no fractional part (`17850.0`)
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();

    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }

    let value = parse_decimal(text)?;
    if value.fract().is_zero() {
        value.to_i64()
    } else {
        None
    }
}

/// Parse an exact decimal, plain or in scientific notation
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parse a timestamp with the first matching layout
///
/// Layouts are tried in order. RFC 3339 strings are accepted as a fallback and
/// keep their wall-clock time; a bare date is read as midnight.
pub fn parse_datetime(text: &str, formats: &[String]) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, USER_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a user-entered `YYYY-MM-DD` date
pub fn parse_user_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), USER_DATE_FORMAT)
        .map_err(|_| format!("'{}' is not a date in YYYY-MM-DD format", text.trim()))
}

/// Parse a user-entered integer identifier
pub fn parse_user_integer(text: &str, name: &str) -> Result<i64, String> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a valid {}", text.trim(), name))
}
