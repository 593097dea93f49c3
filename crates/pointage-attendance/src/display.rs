//! French-style rendering of attendance times

use chrono::{DateTime, FixedOffset, Utc};

/// Offset from a number of minutes east of UTC, `None` past ±24h
pub fn utc_offset(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// `dd/mm/yyyy`
pub fn format_date(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%d/%m/%Y").to_string()
}

/// `HH:MM`, 24-hour clock
pub fn format_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant.with_timezone(&offset).format("%H:%M").to_string()
}

/// `dd/mm/yyyy à HH:MM`
pub fn format_date_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    format!(
        "{} à {}",
        format_date(instant, offset),
        format_time(instant, offset)
    )
}
