//! Command definitions for The Focus Study.
//!
//! Uses clap derive macro for argument parsing. Running without a
//! subcommand opens the interactive timer with the given initial settings.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::sound::DEFAULT_ASSETS_DIR;
use crate::types::{
    AlertSound, Appearance, HexColor, SessionIntent, Settings, SettingsError, DEFAULT_TEXT_COLOR,
    PREDEFINED_THEMES,
};

// ============================================================================
// CLI Structure
// ============================================================================

/// The Focus Study - a focus timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "focus-study",
    version,
    about = "A calm focus timer for deep, intentional work",
    long_about = "A focus timer with three modes (Focus, Short Break, Long Break), \
                  staggered alert sounds, desktop notifications and a bookmarked \
                  playlist dock.\n\nLogs go to stderr; set RUST_LOG or pass -v.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the bookmarked playlists
    Playlists {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Session Arguments
// ============================================================================

/// Initial settings for the interactive timer
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Focus duration in minutes (1-60)
    #[arg(
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub focus: u32,

    /// Short break duration in minutes (1-30)
    #[arg(
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=30)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (1-60)
    #[arg(
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(1..=60)
    )]
    pub long_break: u32,

    /// Alert sound played when a session completes
    #[arg(long, value_enum, default_value_t = AlertSound::Bell)]
    pub sound: AlertSound,

    /// Background color (#RRGGBB)
    #[arg(long, value_parser = parse_color)]
    pub background: Option<HexColor>,

    /// Text color (#RRGGBB)
    #[arg(long, value_parser = parse_color)]
    pub text_color: Option<HexColor>,

    /// Background image file (kept as a reference only)
    #[arg(long)]
    pub background_image: Option<PathBuf>,

    /// What you are focusing on
    #[arg(short, long)]
    pub intent: Option<String>,

    /// Directory holding alert-<sound>.mp3 files
    #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
    pub assets: PathBuf,

    /// Disable alert sounds
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,
}

impl Default for SessionArgs {
    fn default() -> Self {
        Self {
            focus: 25,
            short_break: 5,
            long_break: 15,
            sound: AlertSound::Bell,
            background: None,
            text_color: None,
            background_image: None,
            intent: None,
            assets: PathBuf::from(DEFAULT_ASSETS_DIR),
            no_sound: false,
            no_notify: false,
        }
    }
}

impl SessionArgs {
    /// Builds the initial settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::BackgroundImageNotFound` if the image path
    /// does not name a file.
    pub fn to_settings(&self) -> Result<Settings, SettingsError> {
        let mut appearance = Appearance {
            background: self.background.unwrap_or(PREDEFINED_THEMES[0].color),
            text_color: self.text_color.unwrap_or(DEFAULT_TEXT_COLOR),
            custom_background: None,
        };
        if let Some(path) = &self.background_image {
            appearance.set_custom_background(path)?;
        }

        let settings = Settings {
            focus_minutes: self.focus,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            alert_sound: self.sound,
            appearance,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_intent(&self) -> SessionIntent {
        self.intent
            .as_deref()
            .map(SessionIntent::new)
            .unwrap_or_default()
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

fn parse_color(s: &str) -> Result<HexColor, String> {
    s.parse().map_err(|e: crate::types::ColorParseError| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
