//! Replay a recorded signal CSV in a scrolling chart.
//!
//! Usage:
//!   eeg-replay [path/to/eeg-data.csv]
//!
//! The file needs a header with `timestamp` and `value` columns. Set
//! `RUST_LOG` to change log verbosity.

use std::path::PathBuf;

use anyhow::Result;
use eeg_replay::{run_replay, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CSV: &str = "eeg-data.csv";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eeg_replay=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV));

    run_replay(csv_path, ReplayConfig::default())
        .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
