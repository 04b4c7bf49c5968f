//! eeg-replay crate root: re-exports and module wiring.
//!
//! Replays recorded signal samples from a CSV file into a scrolling line
//! chart built on egui/eframe:
//! - `data::loader`: CSV parsing into [`Sample`]s
//! - `data::replay`: bounded display window and the replay state machine
//! - `ticker`: cancellable fixed-period timer driving the replay
//! - `config`: window, chart and cadence settings
//! - `app`: the eframe application and [`run_replay`] entry point

pub mod app;
pub mod config;
pub mod data;
pub mod ticker;

// Public re-exports for a compact external API
pub use app::{run_replay, ReplayApp};
pub use config::{ChartLabels, ReplayConfig};
pub use data::loader::{load_samples, parse_samples, spawn_load, LoadError, LoadHandle};
pub use data::replay::{DisplayWindow, Replay, ReplayDriver, ReplayState, TickOutcome};
pub use data::sample::{format_time_label, Sample};
pub use ticker::{CancelToken, Ticker, Waker};
