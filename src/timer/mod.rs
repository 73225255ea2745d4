//! Timer module for The Focus Study.
//!
//! This module contains the countdown machinery:
//! - `engine`: Timer engine with mode selection, transitions and ticks
//! - `ticker`: Cancellable one-second interval driver
//! - `session`: Controller keeping the ticker armed exactly while running

pub mod engine;
pub mod session;
pub mod ticker;

pub use engine::{TimerEngine, TimerError, TimerEvent};
pub use session::Session;
pub use ticker::{Tick, Ticker, TICK_PERIOD};
