//! Post date parsing and formatting.
//!
//! Dates are normalised to 12:00 UTC of their calendar day so that rendering
//! in any timezone within twelve hours of UTC shows the same date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_yaml::Value;

/// Naive date-time layouts accepted in front-matter, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Formatted post date.
///
/// All fields are `None` for missing or invalid dates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PostDate {
    /// Milliseconds since the Unix epoch.
    pub ts: Option<i64>,
    /// Calendar date (`YYYY-MM-DD`).
    pub iso: Option<String>,
    /// Long English date (`January 1, 2024`).
    pub pretty: Option<String>,
}

/// Parse a raw front-matter date value.
///
/// Accepts date strings (`YYYY-MM-DD`, RFC 3339, naive date-times, RFC 2822)
/// and integer epoch milliseconds.
pub fn parse_date(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::Tagged(tagged) => parse_date(&tagged.value),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a raw front-matter date value.
pub fn format_date(raw: Option<&Value>) -> PostDate {
    let Some(normalized) = raw
        .and_then(parse_date)
        .and_then(|parsed| parsed.date_naive().and_hms_opt(12, 0, 0))
        .map(|noon| noon.and_utc())
    else {
        return PostDate::default();
    };

    PostDate {
        ts: Some(normalized.timestamp_millis()),
        iso: Some(normalized.format("%Y-%m-%d").to_string()),
        pretty: Some(normalized.format("%B %-d, %Y").to_string()),
    }
}
