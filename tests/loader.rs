use std::io::Write;

use eeg_replay::{load_samples, parse_samples, LoadError, Sample};

fn parse(csv: &str) -> Vec<Sample> {
    parse_samples(csv.as_bytes()).expect("csv should parse")
}

#[test]
fn bad_date_keeps_raw_label() {
    let samples = parse("timestamp,value\nbad-date,3.2\n");
    assert_eq!(samples, vec![Sample::new("bad-date", 3.2)]);
}

#[test]
fn parsed_timestamps_become_hh_mm() {
    let samples = parse("timestamp,value\n2024-01-15 09:05:30,1.0\n2024-01-15 13:40:00,2.0\n");
    let labels: Vec<&str> = samples.iter().map(|s| s.time_label.as_str()).collect();
    assert_eq!(labels, vec!["09:05", "13:40"]);
}

#[test]
fn rows_missing_fields_are_dropped() {
    let csv = "timestamp,value\n\
               a,1.0\n\
               ,2.0\n\
               b,\n\
               c\n\
               d,4.0\n";
    let samples = parse(csv);
    assert_eq!(samples, vec![Sample::new("a", 1.0), Sample::new("d", 4.0)]);
    // Five data rows in, strictly fewer out.
    assert!(samples.len() < 5);
}

#[test]
fn non_numeric_values_are_dropped() {
    let samples = parse("timestamp,value\na,abc\nb,NaN\nc,-1.25\n");
    assert_eq!(samples, vec![Sample::new("c", -1.25)]);
}

#[test]
fn values_round_trip_source_decimals() {
    let inputs = ["0.1", "-12.345", "1e-3", "250", "3.14159265"];
    let mut csv = String::from("timestamp,value\n");
    for (i, v) in inputs.iter().enumerate() {
        csv.push_str(&format!("t{i},{v}\n"));
    }
    let samples = parse(&csv);
    assert_eq!(samples.len(), inputs.len());
    for (sample, raw) in samples.iter().zip(inputs) {
        let expected: f64 = raw.parse().unwrap();
        assert!((sample.value - expected).abs() <= f64::EPSILON * expected.abs().max(1.0));
    }
}

#[test]
fn extra_columns_are_ignored_and_order_kept() {
    let csv = "channel,timestamp,value,quality\nFp1,x,1,good\nFp2,y,2,bad\nFp1,z,3,good\n";
    let labels: Vec<String> = parse(csv).into_iter().map(|s| s.time_label).collect();
    assert_eq!(labels, vec!["x", "y", "z"]);
}

#[test]
fn invalid_utf8_row_is_dropped_without_aborting() {
    let bytes: &[u8] = b"timestamp,value\na,1.0\n\xff\xfe,2.0\nc,3.0\n";
    let samples = parse_samples(bytes).expect("a bad row must not fail the load");
    assert_eq!(samples, vec![Sample::new("a", 1.0), Sample::new("c", 3.0)]);
}

#[test]
fn empty_input_yields_empty_sequence() {
    assert!(parse("").is_empty());
    assert!(parse("timestamp,value\n").is_empty());
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,value").unwrap();
    writeln!(file, "2024-01-15 00:01:00,1.0").unwrap();
    writeln!(file, "2024-01-15 00:02:00,2.0").unwrap();
    file.flush().unwrap();

    let samples = load_samples(file.path()).unwrap();
    assert_eq!(
        samples,
        vec![Sample::new("00:01", 1.0), Sample::new("00:02", 2.0)]
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_samples(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "got {err:?}");
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn spawn_load_reports_failure_as_empty_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let handle = eeg_replay::spawn_load(dir.path().join("missing.csv"));
    assert!(handle.wait().is_empty());
}
