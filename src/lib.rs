//! The Focus Study Library
//!
//! This library provides the core functionality for The Focus Study timer.
//! It includes:
//! - Countdown engine and its one-second ticker
//! - Completion alerts: staggered sounds and desktop notifications
//! - Alert sound playback with synthesized fallback tones
//! - Bookmarked playlist catalog and dock state
//! - Terminal rendering and window title output
//! - CLI command parsing, key bindings and display utilities
//! - Type definitions for settings and timer state

pub mod alert;
pub mod app;
pub mod cli;
pub mod notification;
pub mod playlist;
pub mod presentation;
pub mod sound;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    AlertSound, Appearance, HexColor, Mode, SessionIntent, Settings, SettingsError, TimerState,
};

// Re-export timer types
pub use timer::{Session, Tick, Ticker, TimerEngine, TimerError, TimerEvent};

// Re-export alert types
pub use alert::{AlertPipeline, AlertSchedule, REPEAT_OFFSETS};

// Re-export notification types
pub use notification::{
    DesktopNotifier, MockNotifier, NotificationContent, NotificationError, Notifier, Permission,
};

// Re-export sound types
pub use sound::{
    play_alert_sound, AssetLocator, MockSoundPlayer, RodioSoundPlayer, SilentSoundPlayer,
    SoundError, SoundPlayer, SoundSource, Tone,
};

// Re-export presentation types
pub use presentation::{MockPresentationSink, PresentationSink, TerminalTitleSink};

// Re-export playlist types
pub use playlist::{Dock, DockMode, PlaylistBrowser, CATEGORIES};
