use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use fmdesk_core::enums::{Priority, TaskStatus};
use fmdesk_core::parse::{parse_clock_time, parse_duration_str, parse_timestamp_str};

fn invalid(field: &str, raw: &str) -> anyhow::Error {
    anyhow::anyhow!("invalid {field} '{raw}'")
}

/// Parse a status name or alias (`review`, `pending approval`, `done`, ...).
pub fn parse_status(raw: &str) -> anyhow::Result<TaskStatus> {
    TaskStatus::from_alias(raw).ok_or_else(|| invalid("status", raw))
}

pub fn parse_priority(raw: &str) -> anyhow::Result<Priority> {
    Priority::parse(raw).ok_or_else(|| invalid("priority", raw))
}

/// Due date as RFC 3339, naive datetime, or bare `YYYY-MM-DD`.
pub fn parse_due(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_timestamp_str(raw).ok_or_else(|| invalid("due date", raw))
}

pub fn parse_day(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| invalid("day", raw))
}

/// Estimate in minutes; zero is rejected later by request validation.
pub fn parse_estimate(raw: &str) -> anyhow::Result<u32> {
    parse_duration_str(raw).ok_or_else(|| invalid("estimate", raw))
}

pub fn parse_clock(raw: &str, field: &str) -> anyhow::Result<NaiveTime> {
    parse_clock_time(raw).ok_or_else(|| invalid(field, raw))
}
