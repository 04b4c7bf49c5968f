//! A single time-labelled measurement and the timestamp-to-label conversion.
//!
//! Labels are rendered as zero-padded 24-hour `HH:MM` in local time. Anything
//! that does not parse as a date/time is kept verbatim as its own label, so a
//! file with opaque markers in the `timestamp` column still plots.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// Layout used for every successfully parsed timestamp.
pub const TIME_LABEL_FORMAT: &str = "%H:%M";

/// Naive date-time layouts, interpreted as local wall-clock time.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// ISO date-time layouts accepted in front of a `Z` or `±HH[:MM]` suffix.
const ZONED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts that denote local midnight.
const LOCAL_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y"];

/// One replayable measurement: an axis label and a finite value.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time_label: String,
    pub value: f64,
}

impl Sample {
    pub fn new(time_label: impl Into<String>, value: f64) -> Self {
        Self {
            time_label: time_label.into(),
            value,
        }
    }

    /// Build a sample from a raw timestamp field, deriving the label via
    /// [`format_time_label`].
    pub fn from_raw_timestamp(raw: &str, value: f64) -> Self {
        Self::new(format_time_label(raw), value)
    }
}

/// Render `raw` as local `HH:MM`, or return it unchanged if it is not a
/// recognizable date/time.
pub fn format_time_label(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(TIME_LABEL_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Parse `raw` into local time.
///
/// Zoned inputs (RFC 3339, RFC 2822, ISO with `Z`/`±HH[:MM]`) are converted
/// to the local zone.
/// Naive date-times are taken as already local. A bare ISO date is midnight
/// UTC, other bare dates are local midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Local));
    }

    if let Some(dt) = parse_zoned(s) {
        return Some(dt);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_from_naive(ndt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local));
    }
    for fmt in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return local_from_naive(date.and_hms_opt(0, 0, 0)?);
        }
    }

    None
}

/// ISO date-time with a zone suffix, including the forms RFC 3339 rejects
/// (no seconds, `+HHMM`, `+HH`).
fn parse_zoned(s: &str) -> Option<DateTime<Local>> {
    let (base, offset) = split_offset(s)?;
    ZONED_DATETIME_FORMATS.iter().find_map(|fmt| {
        let ndt = NaiveDateTime::parse_from_str(base, fmt).ok()?;
        let dt = offset.from_local_datetime(&ndt).single()?;
        Some(dt.with_timezone(&Local))
    })
}

/// Split a trailing `Z`, `±HH`, `±HHMM` or `±HH:MM` off an ISO date-time.
fn split_offset(s: &str) -> Option<(&str, FixedOffset)> {
    if let Some(base) = s.strip_suffix(['Z', 'z']) {
        return Some((base, FixedOffset::east_opt(0)?));
    }

    // The date's own dashes sit before the time; the sign must follow it.
    let time_start = s.find(['T', ' '])?;
    let sign_pos = s.rfind(['+', '-']).filter(|&p| p > time_start)?;
    let sign = if s.as_bytes()[sign_pos] == b'-' { -1 } else { 1 };
    let suffix = &s[sign_pos + 1..];
    let digits = match suffix.len() {
        2 | 4 => suffix.to_string(),
        5 if suffix.as_bytes()[2] == b':' => suffix.replacen(':', "", 1),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 { digits[2..].parse().ok()? } else { 0 };
    if minutes >= 60 {
        return None;
    }
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    Some((&s[..sign_pos], offset))
}

fn local_from_naive(ndt: NaiveDateTime) -> Option<DateTime<Local>> {
    // Times inside a DST gap have no local mapping; shift forward an hour.
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(ndt + TimeDelta::hours(1)))
                .earliest()
        })
}
