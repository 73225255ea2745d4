//! Presentation layer for The Focus Study.
//!
//! This module provides:
//! - `PresentationSink`: the one-way output channel for the window title
//! - `TerminalTitleSink`: writes the title through terminal escape sequences
//! - `title`: title and countdown text generation
//! - `screen`: full-screen rendering of the timer, settings and dock
//!
//! The timer engine only ever talks to a `PresentationSink`, so it can be
//! tested without a terminal.

pub mod screen;
pub mod title;

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::terminal::SetTitle;
use crossterm::QueueableCommand;
use tracing::debug;

pub use screen::{Frame, PromptView, Screen, SettingsPanelView, View};
pub use title::{format_time, TitleFormatter, APP_NAME};

/// Output channel for the host window title.
///
/// Titles are written, never read back.
pub trait PresentationSink: Send + Sync {
    /// Replaces the window title.
    fn set_title(&self, title: &str);

    /// Restores the idle title.
    fn restore_title(&self) {
        self.set_title(APP_NAME);
    }
}

/// Sets the terminal window title with an OSC escape sequence.
#[derive(Debug, Default)]
pub struct TerminalTitleSink;

impl TerminalTitleSink {
    pub fn new() -> Self {
        Self
    }
}

impl PresentationSink for TerminalTitleSink {
    fn set_title(&self, title: &str) {
        let mut stdout = io::stdout();
        let result = stdout
            .queue(SetTitle(title))
            .and_then(|out| out.flush());
        if let Err(e) = result {
            debug!("Failed to set terminal title: {}", e);
        }
    }
}

/// Presentation sink that records every title, for testing.
#[derive(Debug, Default)]
pub struct MockPresentationSink {
    titles: Mutex<Vec<String>>,
}

impl MockPresentationSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every title written so far, oldest first.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }

    /// Returns the most recent title.
    #[must_use]
    pub fn last_title(&self) -> Option<String> {
        self.titles.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.titles.lock().unwrap().clear();
    }
}

impl PresentationSink for MockPresentationSink {
    fn set_title(&self, title: &str) {
        self.titles.lock().unwrap().push(title.to_string());
    }
}
