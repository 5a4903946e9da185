use time::{macros::format_description, OffsetDateTime};
use tracing::warn;

/// Source of wall-clock timestamps for login bookkeeping.
pub trait Clock: Send + Sync {
    /// Current time rendered as `YYYY-MM-DD HH:MM:SS`.
    fn now_timestamp(&self) -> String;
}

/// Reads the system clock. Timestamps are UTC, not the host's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_timestamp(&self) -> String {
        format_timestamp(OffsetDateTime::now_utc())
    }
}

/// Always returns the same timestamp.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_timestamp(&self) -> String {
        self.0.clone()
    }
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    at.format(&fmt).unwrap_or_else(|e| {
        warn!(error = %e, "timestamp formatting failed; using default rendering");
        at.to_string()
    })
}
