//! Timer engine for The Focus Study.
//!
//! This module provides the core countdown functionality:
//! - Mode selection (Focus / Short Break / Long Break)
//! - Start, pause, toggle and reset transitions
//! - One-second ticks with the running title mirrored to the presentation sink
//! - `SessionComplete` firing exactly once when the countdown reaches zero

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::presentation::{PresentationSink, TitleFormatter};
use crate::types::{Mode, Settings, SettingsError, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the completion pipeline and the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started (or resumed)
    Started {
        /// Mode being timed
        mode: Mode,
        /// Identifier of the session being timed
        session_id: Uuid,
    },
    /// Countdown paused
    Paused {
        /// Remaining seconds at the moment of pausing
        remaining_seconds: u32,
    },
    /// Countdown stopped and refilled
    Reset {
        /// Mode whose duration was restored
        mode: Mode,
    },
    /// A different mode was selected
    ModeSelected {
        /// The newly active mode
        mode: Mode,
    },
    /// Settings were applied
    SettingsApplied {
        /// Whether the countdown was reset because a duration changed
        countdown_reset: bool,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// The countdown reached zero
    SessionComplete {
        /// The mode that just finished
        mode: Mode,
        /// Identifier of the finished session
        session_id: Uuid,
    },
}

// ============================================================================
// TimerError
// ============================================================================

/// Errors returned by timer transitions.
#[derive(Debug, Error)]
pub enum TimerError {
    /// `start` was requested with nothing left on the clock.
    #[error("nothing left on the clock; reset the timer before starting again")]
    NothingRemaining,

    /// Settings failed validation and were not applied.
    #[error("settings rejected: {0}")]
    InvalidSettings(#[from] SettingsError),

    /// The event receiver is gone.
    #[error("timer event channel closed")]
    ChannelClosed,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the countdown state and its settings.
///
/// The engine is synchronous; a `Ticker` drives `tick()` from the outside.
pub struct TimerEngine {
    /// Current countdown state
    state: TimerState,
    /// Applied settings
    settings: Settings,
    /// Identifier of the session in progress (minted on start from full)
    session_id: Uuid,
    /// Window title output
    sink: Arc<dyn PresentationSink>,
    /// Title text generation
    titles: TitleFormatter,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates an idle engine in Focus mode holding the full focus duration.
    pub fn new(
        settings: Settings,
        sink: Arc<dyn PresentationSink>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let state = TimerState::new(Mode::Focus, settings.duration_for(Mode::Focus));
        Self {
            state,
            settings,
            session_id: Uuid::new_v4(),
            sink,
            titles: TitleFormatter::new(),
            event_tx,
        }
    }

    /// Switches to `mode`, stopping the countdown and refilling it.
    pub fn select_mode(&mut self, mode: Mode) -> Result<(), TimerError> {
        self.state.reset_to(mode, self.settings.duration_for(mode));
        debug!(mode = mode.as_str(), "Mode selected");
        self.emit(TimerEvent::ModeSelected { mode })
    }

    /// Starts the countdown.
    ///
    /// Starting an already running timer is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NothingRemaining` if the countdown is at zero,
    /// or `TimerError::ChannelClosed` if the event cannot be delivered. In
    /// both cases the state and the title are left untouched.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.state.is_running {
            return Ok(());
        }
        if self.state.is_exhausted() {
            return Err(TimerError::NothingRemaining);
        }

        let session_id = if self.state.remaining_seconds == self.duration() {
            Uuid::new_v4()
        } else {
            self.session_id
        };
        self.emit(TimerEvent::Started {
            mode: self.state.mode,
            session_id,
        })?;

        self.session_id = session_id;
        self.state.is_running = true;
        self.sink
            .set_title(&self.titles.running_title(self.state.remaining_seconds));

        info!(
            session = %self.session_id,
            mode = self.state.mode.as_str(),
            remaining = self.state.remaining_seconds,
            "Timer started"
        );
        Ok(())
    }

    /// Pauses the countdown. Pausing a stopped timer is a no-op.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if !self.state.is_running {
            return Ok(());
        }
        self.state.is_running = false;

        debug!(remaining = self.state.remaining_seconds, "Timer paused");
        self.emit(TimerEvent::Paused {
            remaining_seconds: self.state.remaining_seconds,
        })
    }

    /// Starts when stopped, pauses when running.
    pub fn toggle(&mut self) -> Result<(), TimerError> {
        if self.state.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stops the countdown and restores the full duration of the current mode.
    pub fn reset(&mut self) -> Result<(), TimerError> {
        let mode = self.state.mode;
        self.state.reset_to(mode, self.settings.duration_for(mode));
        self.sink.restore_title();

        debug!(mode = mode.as_str(), "Timer reset");
        self.emit(TimerEvent::Reset { mode })
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing while stopped. Returns true if this tick completed the
    /// session.
    pub fn tick(&mut self) -> Result<bool, TimerError> {
        if !self.state.is_running {
            return Ok(false);
        }

        let completed = self.state.tick();
        self.sink
            .set_title(&self.titles.running_title(self.state.remaining_seconds));
        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        })?;

        if completed {
            info!(
                session = %self.session_id,
                mode = self.state.mode.as_str(),
                "Session complete"
            );
            self.emit(TimerEvent::SessionComplete {
                mode: self.state.mode,
                session_id: self.session_id,
            })?;
        }

        Ok(completed)
    }

    /// Applies new settings.
    ///
    /// If any duration changed the countdown is stopped and refilled for the
    /// current mode. Cosmetic changes leave the countdown alone.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::InvalidSettings` if validation fails; nothing is
    /// changed in that case.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), TimerError> {
        if let Err(e) = settings.validate() {
            warn!("Rejected settings: {}", e);
            return Err(e.into());
        }

        let countdown_reset = self.settings.durations_differ(&settings);
        self.settings = settings;
        if countdown_reset {
            let mode = self.state.mode;
            self.state.reset_to(mode, self.settings.duration_for(mode));
            self.sink.restore_title();
        }

        debug!(countdown_reset, "Settings applied");
        self.emit(TimerEvent::SettingsApplied { countdown_reset })
    }

    /// Returns a reference to the current timer state.
    pub fn get_state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the applied settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns true if the countdown is ticking.
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Full duration of the current mode in seconds.
    pub fn duration(&self) -> u32 {
        self.settings.duration_for(self.state.mode)
    }

    /// Identifier of the current (or most recent) session.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn get_state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    fn emit(&self, event: TimerEvent) -> Result<(), TimerError> {
        self.event_tx
            .send(event)
            .map_err(|_| TimerError::ChannelClosed)
    }
}

// ============================================================================
// Tests
// ============================================================================
