//! Sitemap date handling
//!
//! `<lastmod>` values use the W3C Datetime profile of ISO 8601, which allows
//! anything from a bare year down to fractional seconds:
//!
//! ```text
//! 2023
//! 2023-05
//! 2023-05-01
//! 2023-05-01T10:30+02:00
//! 2023-05-01T10:30:15.5Z
//! ```
//!
//! Values are normalized to UTC. Anything unparsable falls back to
//! 2000-01-01 so that a page is never dropped for a bad date.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Date used for pages without a usable `<lastmod>`
pub fn default_publication_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Parses a `<lastmod>` value
pub fn parse_last_modified(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
        return Some(date_time.with_timezone(&Utc));
    }

    // Date and time without seconds, e.g. 2023-05-01T10:30+02:00
    let with_offset = match value.strip_suffix('Z') {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    };
    if let Ok(date_time) = DateTime::parse_from_str(&with_offset, "%Y-%m-%dT%H:%M%:z") {
        return Some(date_time.with_timezone(&Utc));
    }

    // No offset at all: read as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, format) {
            return Some(date_time.and_utc());
        }
    }

    let date = match value.len() {
        4 => value
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        7 => NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(value, "%Y-%m-%d").ok(),
    }?;

    date.and_hms_opt(0, 0, 0).map(|date_time| date_time.and_utc())
}

/// Publication date of a feed item
///
/// Years outside 0..=9999 cannot be written as an RFC 822 date and fall back
/// to the default like any other unusable value.
pub fn publication_date(last_modified: Option<&str>) -> DateTime<Utc> {
    let Some(value) = last_modified else {
        return default_publication_date();
    };

    parse_last_modified(value)
        .filter(|date| (0..=9999).contains(&date.year()))
        .unwrap_or_else(|| {
            debug!(lastmod = value, "unusable lastmod, using default date");
            default_publication_date()
        })
}

/// Formats a date the way RSS `pubDate` expects it
pub fn format_rfc822(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
