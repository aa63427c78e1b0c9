//! Timestamp display helpers for posts and comments.

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Render a server timestamp as `DD Mon YYYY HH:MM` (UTC).
///
/// Accepts RFC 3339 (`2024-05-01T10:30:00.000000Z`) and the plain
/// `YYYY-MM-DD HH:MM:SS` form. Anything else is returned verbatim.
pub fn format_timestamp(raw: &str) -> String {
    let display = format_description!("[day] [month repr:short] [year] [hour]:[minute]");
    let raw = raw.trim();
    let parsed = OffsetDateTime::parse(raw, &Rfc3339)
        .map(|dt| dt.to_offset(time::UtcOffset::UTC))
        .map(|dt| PrimitiveDateTime::new(dt.date(), dt.time()))
        .or_else(|_| {
            PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        });
    match parsed {
        Ok(dt) => dt.format(display).unwrap_or_else(|_| raw.to_owned()),
        Err(_) => raw.to_owned(),
    }
}
