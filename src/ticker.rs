//! Cancellable fixed-period timer.
//!
//! A [`Ticker`] owns a background thread that fires once per `period` and
//! delivers each firing over a channel. The owner drains firings with
//! [`Ticker::drain`] on its own thread, so tick handling never runs
//! concurrently with other UI work. An optional waker is called after each
//! firing so an idle UI can repaint.
//!
//! Cancellation goes through a shared [`CancelToken`]. Cancelling (explicitly
//! or by dropping the `Ticker`) stops the thread promptly and guarantees that
//! [`Ticker::drain`] reports no further firings.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Callback invoked on the timer thread after every firing.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Shared flag marking a scheduled task as cancelled.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Handle to a running periodic timer.
pub struct Ticker {
    token: CancelToken,
    rx: Receiver<()>,
    thread: JoinHandle<()>,
}

impl Ticker {
    /// Start a timer firing every `period`, the first firing one period from now.
    ///
    /// Fails only if the timer thread cannot be spawned.
    pub fn start(period: Duration, waker: Option<Waker>) -> io::Result<Self> {
        let token = CancelToken::new();
        let (tx, rx) = mpsc::channel();
        let thread_token = token.clone();
        let thread = thread::Builder::new()
            .name("replay-ticker".into())
            .spawn(move || {
                let mut deadline = Instant::now() + period;
                loop {
                    // park_timeout may wake early; keep waiting until the deadline.
                    loop {
                        if thread_token.is_cancelled() {
                            return;
                        }
                        let now = Instant::now();
                        if now >= deadline {
                            break;
                        }
                        thread::park_timeout(deadline - now);
                    }
                    if tx.send(()).is_err() {
                        return;
                    }
                    if let Some(wake) = &waker {
                        wake();
                    }
                    deadline += period;
                }
            })?;
        Ok(Self {
            token,
            rx,
            thread,
        })
    }

    /// A clone of this timer's cancellation token.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stop the timer. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
        self.thread.thread().unpark();
    }

    /// Number of firings since the last call. Always 0 once cancelled.
    pub fn drain(&self) -> usize {
        if self.is_cancelled() {
            return 0;
        }
        self.rx.try_iter().count()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
