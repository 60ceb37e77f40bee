//! Tolerant scalar parsers for raw API values.
//!
//! None of these fail loudly: unparseable input yields `None` and the caller
//! treats the field as absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

/// Naive datetime layouts accepted after RFC 3339 fails. UTC is assumed.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a duration value into whole minutes.
///
/// Accepts a JSON number (minutes), or any string form understood by
/// [`parse_duration_str`].
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn parse_duration_minutes(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => {
            if let Some(minutes) = number.as_u64() {
                return u32::try_from(minutes).ok();
            }
            number
                .as_f64()
                .filter(|minutes| minutes.is_finite() && *minutes >= 0.0)
                .filter(|minutes| *minutes <= f64::from(u32::MAX))
                .map(|minutes| minutes.round() as u32)
        }
        Value::String(raw) => parse_duration_str(raw),
        _ => None,
    }
}

/// Parse `"90"`, `"1h 30m"`, `"2h"`, `"45m"`, `"1h30m"`, or `"01:30"` into minutes.
#[must_use]
pub fn parse_duration_str(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(minutes) = parse_digits(trimmed) {
        return Some(minutes);
    }
    if let Some((hours, minutes)) = trimmed.split_once(':') {
        return parse_clock_duration(hours, minutes);
    }
    parse_unit_duration(trimmed)
}

fn parse_digits(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_clock_duration(hours: &str, minutes: &str) -> Option<u32> {
    let hours = parse_digits(hours)?;
    let minutes = parse_digits(minutes)?;
    if minutes >= 60 {
        return None;
    }
    hours.checked_mul(60)?.checked_add(minutes)
}

fn parse_unit_duration(raw: &str) -> Option<u32> {
    let compact = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let mut rest = compact.as_str();
    let mut total: u32 = 0;
    let mut parts = 0usize;

    while !rest.is_empty() {
        let digits_end = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return None;
        }
        let amount: u32 = rest[..digits_end].parse().ok()?;
        rest = &rest[digits_end..];

        let unit_end = rest.find(|ch: char| ch.is_ascii_digit()).unwrap_or(rest.len());
        let factor = match &rest[..unit_end] {
            "h" | "hr" | "hrs" | "hour" | "hours" => 60,
            "m" | "min" | "mins" | "minute" | "minutes" => 1,
            _ => return None,
        };
        rest = &rest[unit_end..];

        total = total.checked_add(amount.checked_mul(factor)?)?;
        parts += 1;
    }

    (parts > 0).then_some(total)
}

/// Format whole minutes as `"Xh Ym"`, dropping a zero half (`"2h"`, `"45m"`).
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, rest) => format!("{rest}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h {rest}m"),
    }
}

/// Parse a timestamp value: RFC 3339, naive datetime (UTC), bare date
/// (midnight UTC), or epoch milliseconds.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_timestamp_str(raw),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

#[must_use]
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a wall-clock time `HH:MM` or `HH:MM:SS`.
#[must_use]
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Format a wall-clock time as `HH:MM`.
#[must_use]
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
