//! Session controller: a `TimerEngine` paired with its `Ticker`.
//!
//! Every transition re-syncs the ticker so that the interval task is armed
//! exactly while the engine is running. Ticks from a cancelled task are
//! dropped here before they reach the engine.

use tracing::trace;

use super::engine::{TimerEngine, TimerError};
use super::ticker::{Tick, Ticker};
use crate::types::{Mode, Settings, TimerState};

/// Couples the countdown state machine with its one-second driver.
pub struct Session {
    engine: TimerEngine,
    ticker: Ticker,
}

impl Session {
    pub fn new(engine: TimerEngine, ticker: Ticker) -> Self {
        Self { engine, ticker }
    }

    pub fn select_mode(&mut self, mode: Mode) -> Result<(), TimerError> {
        let result = self.engine.select_mode(mode);
        self.sync_ticker();
        result
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        let result = self.engine.start();
        self.sync_ticker();
        result
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        let result = self.engine.pause();
        self.sync_ticker();
        result
    }

    pub fn toggle(&mut self) -> Result<(), TimerError> {
        let result = self.engine.toggle();
        self.sync_ticker();
        result
    }

    pub fn reset(&mut self) -> Result<(), TimerError> {
        let result = self.engine.reset();
        self.sync_ticker();
        result
    }

    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), TimerError> {
        let result = self.engine.apply_settings(settings);
        self.sync_ticker();
        result
    }

    /// Feeds a tick to the engine if it came from the live ticker.
    ///
    /// Returns true if the tick completed the session.
    pub fn on_tick(&mut self, tick: Tick) -> Result<bool, TimerError> {
        if !self.ticker.is_current(tick) {
            trace!(generation = tick.generation, "Dropping stale tick");
            return Ok(false);
        }
        let result = self.engine.tick();
        self.sync_ticker();
        result
    }

    /// Stops ticking for good (teardown).
    pub fn shutdown(&mut self) {
        self.ticker.disarm();
    }

    pub fn state(&self) -> &TimerState {
        self.engine.get_state()
    }

    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    /// Returns a mutable reference to the engine (for testing).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn engine_mut(&mut self) -> &mut TimerEngine {
        &mut self.engine
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    fn sync_ticker(&mut self) {
        match (self.engine.is_running(), self.ticker.is_armed()) {
            (true, false) => self.ticker.arm(),
            (false, true) => self.ticker.disarm(),
            _ => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
