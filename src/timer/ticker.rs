//! One-second tick source.
//!
//! A `Ticker` owns at most one interval task at a time. Every `arm` cancels
//! the previous task and bumps a generation counter, and every tick carries
//! the generation it was produced under, so ticks queued by a cancelled task
//! can be told apart from live ones.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::trace;

/// Tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A tick produced by the interval task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation of the ticker that produced this tick
    pub generation: u64,
}

/// Cancellable one-second interval driver.
#[derive(Debug)]
pub struct Ticker {
    tick_tx: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
    period: Duration,
}

impl Ticker {
    /// Creates a disarmed ticker that will deliver ticks on `tick_tx`.
    pub fn new(tick_tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self::with_period(tick_tx, TICK_PERIOD)
    }

    /// Creates a disarmed ticker with a custom period.
    pub fn with_period(tick_tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            tick_tx,
            task: None,
            generation: 0,
            period,
        }
    }

    /// Starts a fresh interval task, cancelling any previous one.
    ///
    /// The first tick arrives one full period after arming.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self) {
        self.disarm();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let tx = self.tick_tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        trace!(generation, "Ticker armed");
    }

    /// Cancels the interval task, if any.
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Ticks already queued by the aborted task must not count
            self.generation += 1;
            trace!(generation = self.generation, "Ticker disarmed");
        }
    }

    /// Returns true while an interval task is active.
    pub fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Returns true if `tick` was produced by the live task.
    pub fn is_current(&self, tick: Tick) -> bool {
        self.is_armed() && tick.generation == self.generation
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.disarm();
    }
}

// ============================================================================
// Tests
// ============================================================================
