//! CSV sample loader.
//!
//! Expected format:
//!   header: a row naming at least `timestamp` and `value` (any order)
//!   data:   one sample per row; other columns are ignored
//!
//! - Rows with a missing or empty `timestamp` or `value` are dropped.
//! - Rows whose `value` does not parse as a finite number are dropped.
//! - Rows the CSV reader rejects (bad UTF-8, ...) are dropped.
//! - If the timestamp cannot be parsed, the raw text becomes the label.
//!
//! Row-level problems are never reported. Only a failure to read the resource
//! as a whole surfaces as a [`LoadError`].

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use thiserror::Error;

use crate::data::sample::Sample;

/// Header name of the timestamp column.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Header name of the value column.
pub const VALUE_COLUMN: &str = "value";

/// Failure to read a sample file as a whole.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header could not be read, or the underlying reader failed mid-file.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Load every valid sample from the CSV file at `path`, in file order.
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<Sample>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = parse_samples(file)?;
    tracing::debug!(path = %path.display(), count = samples.len(), "loaded samples");
    Ok(samples)
}

/// Parse CSV text from `reader` into samples, in source order.
pub fn parse_samples<R: Read>(reader: R) -> Result<Vec<Sample>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let ts_col = headers.iter().position(|h| h == TIMESTAMP_COLUMN);
    let value_col = headers.iter().position(|h| h == VALUE_COLUMN);
    let (Some(ts_col), Some(value_col)) = (ts_col, value_col) else {
        // Without both columns no row can pass the field check.
        return Ok(Vec::new());
    };

    let mut samples = Vec::new();
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(_) => continue,
        };

        // Field presence check first, numeric check second.
        let (Some(raw_ts), Some(raw_value)) = (record.get(ts_col), record.get(value_col)) else {
            continue;
        };
        if raw_ts.is_empty() || raw_value.is_empty() {
            continue;
        }
        let Some(value) = parse_value(raw_value) else {
            continue;
        };

        samples.push(Sample::from_raw_timestamp(raw_ts, value));
    }
    Ok(samples)
}

/// Parse the longest leading decimal number in `raw`.
///
/// Leading whitespace is skipped and anything after the number is ignored, so
/// `"3.2uV"` yields `3.2`. Returns `None` if there is no number at the start
/// or the result is not finite.
pub fn parse_value(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when it has at least one digit.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Handle to a sample file being loaded on a background thread.
pub struct LoadHandle {
    rx: Receiver<Vec<Sample>>,
}

impl LoadHandle {
    /// Take the loaded samples if the background load has completed.
    ///
    /// Returns `None` while loading is still in progress and on every call
    /// after the result has been taken.
    pub fn try_take(&self) -> Option<Vec<Sample>> {
        self.rx.try_recv().ok()
    }

    /// Block until the load completes.
    pub fn wait(self) -> Vec<Sample> {
        self.rx.recv().unwrap_or_default()
    }
}

/// Load `path` on a background thread.
///
/// A failed load is logged and delivered as an empty sequence; there is no
/// retry. A loader thread that cannot be spawned is treated the same way.
pub fn spawn_load(path: impl Into<PathBuf>) -> LoadHandle {
    let path = path.into();
    let (tx, rx) = mpsc::channel();
    let fallback = tx.clone();
    let spawned = std::thread::Builder::new()
        .name("sample-loader".into())
        .spawn(move || {
            let samples = match load_samples(&path) {
                Ok(samples) => samples,
                Err(e) => {
                    tracing::error!("Error loading CSV: {e}");
                    Vec::new()
                }
            };
            let _ = tx.send(samples);
        });
    if let Err(e) = spawned {
        tracing::error!("failed to spawn sample loader: {e}");
        let _ = fallback.send(Vec::new());
    }
    LoadHandle { rx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_plain_decimals() {
        assert_eq!(parse_value("3.2"), Some(3.2));
        assert_eq!(parse_value("-0.5"), Some(-0.5));
        assert_eq!(parse_value("+7"), Some(7.0));
        assert_eq!(parse_value(".25"), Some(0.25));
        assert_eq!(parse_value("5."), Some(5.0));
        assert_eq!(parse_value("1.5e3"), Some(1500.0));
    }

    #[test]
    fn parse_value_uses_leading_number_only() {
        assert_eq!(parse_value("  12.5uV"), Some(12.5));
        assert_eq!(parse_value("4e"), Some(4.0));
        assert_eq!(parse_value("4e+x"), Some(4.0));
        assert_eq!(parse_value("1.2.3"), Some(1.2));
    }

    #[test]
    fn parse_value_rejects_non_numbers() {
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("-"), None);
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("Infinity"), None);
        assert_eq!(parse_value("1e999"), None);
    }

    #[test]
    fn missing_columns_yield_empty_sequence() {
        let csv = "time,reading\n2024-01-01 00:00:00,1.0\n";
        assert!(parse_samples(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn columns_are_found_by_name() {
        let csv = "channel,value,timestamp\nFp1,1.5,a\nFp2,2.5,b\n";
        let samples = parse_samples(csv.as_bytes()).unwrap();
        assert_eq!(samples, vec![Sample::new("a", 1.5), Sample::new("b", 2.5)]);
    }
}
