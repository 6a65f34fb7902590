use chrono::{DateTime, Utc};

#[must_use]
pub fn format_completed_at(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("⏱ {seconds}s")
}
