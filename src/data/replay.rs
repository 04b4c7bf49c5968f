//! Windowed replay of a loaded sample sequence.
//!
//! [`Replay`] is the timer-free core: a cursor into a fixed sequence, a
//! bounded [`DisplayWindow`] of the most recently consumed samples, and a pause
//! flag. Each call to [`Replay::tick`] consumes at most one sample.
//!
//! [`ReplayDriver`] pairs a `Replay` with a [`Ticker`] so that ticks arrive on a
//! fixed cadence. The driver owns the timer for exactly one sequence and
//! cancels it when the sequence is exhausted, replaced, or the driver dropped.

use std::collections::VecDeque;
use std::time::Duration;

use crate::config::ReplayConfig;
use crate::data::sample::Sample;
use crate::ticker::{CancelToken, Ticker, Waker};

/// Bounded FIFO of the samples currently on screen.
#[derive(Debug, Clone)]
pub struct DisplayWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl DisplayWindow {
    /// Create an empty window. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `sample`, evicting the oldest entry if the window overflows.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().cloned().collect()
    }
}

/// Lifecycle of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayState {
    /// No samples loaded (or an empty sequence).
    Idle,
    /// Consuming one sample per tick.
    Running,
    /// Ticks are ignored; position is kept.
    Paused,
    /// Every sample has been consumed.
    Finished,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened (idle, paused or already finished).
    Skipped,
    /// One sample was consumed and more remain.
    Advanced,
    /// The last sample was consumed.
    Finished,
}

/// Timer-free replay state machine.
#[derive(Debug, Clone)]
pub struct Replay {
    sequence: Vec<Sample>,
    cursor: usize,
    window: DisplayWindow,
    paused: bool,
}

impl Replay {
    pub fn new(capacity: usize) -> Self {
        Self {
            sequence: Vec::new(),
            cursor: 0,
            window: DisplayWindow::new(capacity),
            paused: false,
        }
    }

    /// Replace the sequence, rewinding the cursor and clearing the window.
    ///
    /// The pause flag is left untouched.
    pub fn load(&mut self, sequence: Vec<Sample>) {
        self.sequence = sequence;
        self.cursor = 0;
        self.window.clear();
    }

    /// Consume the sample at the cursor unless idle, paused or finished.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state() != ReplayState::Running {
            return TickOutcome::Skipped;
        }
        self.window.push(self.sequence[self.cursor].clone());
        self.cursor += 1;
        if self.cursor == self.sequence.len() {
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// Flip the pause flag. Cursor and window are not touched.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn state(&self) -> ReplayState {
        if self.sequence.is_empty() {
            ReplayState::Idle
        } else if self.cursor >= self.sequence.len() {
            ReplayState::Finished
        } else if self.paused {
            ReplayState::Paused
        } else {
            ReplayState::Running
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of samples consumed from the current sequence.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    pub fn window(&self) -> &DisplayWindow {
        &self.window
    }

    /// Sequence index of the oldest sample in the window.
    pub fn window_start(&self) -> usize {
        self.cursor - self.window.len()
    }
}

/// A [`Replay`] advanced by its own periodic timer.
pub struct ReplayDriver {
    replay: Replay,
    tick_period: Duration,
    ticker: Option<Ticker>,
    waker: Option<Waker>,
}

impl ReplayDriver {
    pub fn new(capacity: usize, tick_period: Duration) -> Self {
        Self {
            replay: Replay::new(capacity),
            tick_period,
            ticker: None,
            waker: None,
        }
    }

    pub fn from_config(cfg: &ReplayConfig) -> Self {
        Self::new(cfg.capacity, cfg.tick_period)
    }

    /// Callback run on the timer thread after each firing, e.g. a repaint request.
    ///
    /// Applies to timers started after this call.
    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    /// Start replaying `sequence` from the beginning.
    ///
    /// Any timer for a previous sequence is cancelled first. An empty sequence
    /// leaves the driver idle with no timer.
    pub fn load(&mut self, sequence: Vec<Sample>) {
        self.stop_timer();
        self.replay.load(sequence);
        if self.replay.state() == ReplayState::Idle {
            tracing::info!("no samples to replay");
            return;
        }
        tracing::info!(
            samples = self.replay.sequence_len(),
            period_ms = self.tick_period.as_millis() as u64,
            "starting replay"
        );
        match Ticker::start(self.tick_period, self.waker.clone()) {
            Ok(ticker) => self.ticker = Some(ticker),
            Err(e) => tracing::error!("failed to start replay timer: {e}"),
        }
    }

    /// Apply every tick that has fired since the last poll.
    ///
    /// Returns the number of samples consumed.
    pub fn poll(&mut self) -> usize {
        let fired = match &self.ticker {
            Some(ticker) => ticker.drain(),
            None => return 0,
        };
        let mut consumed = 0;
        for _ in 0..fired {
            match self.replay.tick() {
                TickOutcome::Skipped => {}
                TickOutcome::Advanced => consumed += 1,
                TickOutcome::Finished => {
                    consumed += 1;
                    tracing::info!(samples = self.replay.cursor(), "replay finished");
                    self.stop_timer();
                    break;
                }
            }
        }
        consumed
    }

    pub fn toggle_pause(&mut self) {
        self.replay.toggle_pause();
        tracing::debug!(paused = self.replay.is_paused(), "pause toggled");
    }

    /// Cancel the timer. The window keeps its contents.
    pub fn shutdown(&mut self) {
        self.stop_timer();
    }

    pub fn has_active_timer(&self) -> bool {
        self.ticker.is_some()
    }

    /// Cancellation token of the running timer, if any.
    pub fn timer_token(&self) -> Option<CancelToken> {
        self.ticker.as_ref().map(Ticker::token)
    }

    pub fn state(&self) -> ReplayState {
        self.replay.state()
    }

    pub fn is_paused(&self) -> bool {
        self.replay.is_paused()
    }

    pub fn window(&self) -> &DisplayWindow {
        self.replay.window()
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    fn stop_timer(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl Drop for ReplayDriver {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
