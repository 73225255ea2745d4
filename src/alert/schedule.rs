//! Cancellable schedule of delayed alert repeats.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::trace;

/// Offsets of the three alert plays from the moment of completion.
pub const REPEAT_OFFSETS: [Duration; 3] = [
    Duration::from_millis(0),
    Duration::from_millis(750),
    Duration::from_millis(1500),
];

/// A set of delayed actions that can be cancelled together.
///
/// Dropping the schedule cancels everything still pending.
#[derive(Debug, Default)]
pub struct AlertSchedule {
    tasks: Vec<JoinHandle<()>>,
}

impl AlertSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action(i)` once per offset, `offsets[i]` from now.
    ///
    /// Anything scheduled earlier is cancelled first. Must be called from
    /// within a tokio runtime.
    pub fn schedule<F>(&mut self, offsets: &[Duration], action: F)
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.cancel();

        let action = Arc::new(action);
        self.tasks = offsets
            .iter()
            .enumerate()
            .map(|(index, &offset)| {
                let action = Arc::clone(&action);
                tokio::spawn(async move {
                    tokio::time::sleep(offset).await;
                    action(index);
                })
            })
            .collect();
    }

    /// Cancels every action that has not run yet.
    pub fn cancel(&mut self) {
        let pending = self.pending();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if pending > 0 {
            trace!(pending, "Alert schedule cancelled");
        }
    }

    /// Number of actions still waiting to run.
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }
}

impl Drop for AlertSchedule {
    fn drop(&mut self) {
        self.cancel();
    }
}
