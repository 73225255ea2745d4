//! Core data types for The Focus Study.
//!
//! This module defines the data structures used for:
//! - Timer modes and countdown state
//! - User settings with validation
//! - Appearance (colors, themes, custom background)
//! - The free-form session intent

use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Mode
// ============================================================================

/// The three timer categories, each with its own configured duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Deep work session
    #[default]
    Focus,
    /// Short break between focus sessions
    ShortBreak,
    /// Long break
    LongBreak,
}

impl Mode {
    /// All modes in display order.
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Returns the machine-readable name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Returns the human-readable label used in notifications and buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// AlertSound
// ============================================================================

/// Sound played when a session completes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertSound {
    #[default]
    Bell,
    Chime,
    Ding,
    /// No sound at all
    None,
}

impl AlertSound {
    /// All sounds in the order they are offered in settings.
    pub const ALL: [AlertSound; 4] = [
        AlertSound::Bell,
        AlertSound::Chime,
        AlertSound::Ding,
        AlertSound::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSound::Bell => "bell",
            AlertSound::Chime => "chime",
            AlertSound::Ding => "ding",
            AlertSound::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertSound::Bell => "Bell",
            AlertSound::Chime => "Chime",
            AlertSound::Ding => "Ding",
            AlertSound::None => "None",
        }
    }

    /// Returns true if this choice produces no sound.
    pub fn is_silent(&self) -> bool {
        matches!(self, AlertSound::None)
    }

    /// Returns the next choice, wrapping around (used by the settings panel).
    pub fn cycle(&self) -> Self {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for AlertSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// HexColor
// ============================================================================

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}': expected #RRGGBB or #RGB")]
pub struct ColorParseError(pub String);

/// An sRGB color written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #RGB → #RRGGBB
                let expand = |c: &str| channel(&c.repeat(2));
                Ok(Self::new(
                    expand(&hex[0..1])?,
                    expand(&hex[1..2])?,
                    expand(&hex[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ============================================================================
// Themes and Appearance
// ============================================================================

/// A named background color offered in the appearance settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub color: HexColor,
}

/// Background themes offered in the appearance settings.
pub const PREDEFINED_THEMES: [Theme; 6] = [
    Theme { name: "Classic Cream", color: HexColor::new(0xFD, 0xFB, 0xF7) },
    Theme { name: "Soft Blue", color: HexColor::new(0xE8, 0xF1, 0xF8) },
    Theme { name: "Mint Green", color: HexColor::new(0xE8, 0xF5, 0xE9) },
    Theme { name: "Warm Peach", color: HexColor::new(0xFF, 0xF3, 0xE0) },
    Theme { name: "Lavender", color: HexColor::new(0xF3, 0xE5, 0xF5) },
    Theme { name: "Rose", color: HexColor::new(0xFC, 0xE4, 0xEC) },
];

/// Default text color (dark slate).
pub const DEFAULT_TEXT_COLOR: HexColor = HexColor::new(0x2C, 0x3E, 0x50);

/// Accent used for the countdown once it reaches zero.
pub const ACCENT_COLOR: HexColor = HexColor::new(0xC5, 0xA0, 0x59);

/// Visual customization of the timer screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Solid background color (ignored while a custom image is set)
    pub background: HexColor,
    /// Foreground color for all text
    pub text_color: HexColor,
    /// Reference to a user-supplied background image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_background: Option<PathBuf>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background: PREDEFINED_THEMES[0].color,
            text_color: DEFAULT_TEXT_COLOR,
            custom_background: None,
        }
    }
}

impl Appearance {
    /// Selects a solid background and drops any custom image.
    pub fn select_background(&mut self, color: HexColor) {
        self.background = color;
        self.custom_background = None;
    }

    /// Advances to the next predefined theme (wrapping) and returns it.
    pub fn cycle_theme(&mut self) -> Theme {
        let next = PREDEFINED_THEMES
            .iter()
            .position(|t| t.color == self.background)
            .map(|idx| (idx + 1) % PREDEFINED_THEMES.len())
            .unwrap_or(0);
        let theme = PREDEFINED_THEMES[next];
        self.select_background(theme.color);
        theme
    }

    /// Uses an image file as the background.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::BackgroundImageNotFound` if the path does not
    /// name an existing file.
    pub fn set_custom_background(&mut self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SettingsError::BackgroundImageNotFound(path.to_path_buf()));
        }
        self.custom_background = Some(path.to_path_buf());
        Ok(())
    }

    /// Removes the custom background image.
    pub fn clear_custom_background(&mut self) {
        self.custom_background = None;
    }

    /// Returns the name of the active predefined theme, if any.
    pub fn theme_name(&self) -> Option<&'static str> {
        if self.custom_background.is_some() {
            return None;
        }
        PREDEFINED_THEMES
            .iter()
            .find(|t| t.color == self.background)
            .map(|t| t.name)
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Accepted focus duration in minutes.
pub const FOCUS_MINUTES: RangeInclusive<u32> = 1..=60;
/// Accepted short break duration in minutes.
pub const SHORT_BREAK_MINUTES: RangeInclusive<u32> = 1..=30;
/// Accepted long break duration in minutes.
pub const LONG_BREAK_MINUTES: RangeInclusive<u32> = 1..=60;

/// Errors raised when settings are applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("focus duration must be between 1 and 60 minutes (got {0})")]
    FocusOutOfRange(u32),

    #[error("short break duration must be between 1 and 30 minutes (got {0})")]
    ShortBreakOutOfRange(u32),

    #[error("long break duration must be between 1 and 60 minutes (got {0})")]
    LongBreakOutOfRange(u32),

    #[error("background image not found: {}", .0.display())]
    BackgroundImageNotFound(PathBuf),

    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
}

/// User-configurable session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Focus duration in minutes (1-60)
    pub focus_minutes: u32,
    /// Short break duration in minutes (1-30)
    pub short_break_minutes: u32,
    /// Long break duration in minutes (1-60)
    pub long_break_minutes: u32,
    /// Sound played on completion
    pub alert_sound: AlertSound,
    /// Screen colors and background
    pub appearance: Appearance,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            alert_sound: AlertSound::Bell,
            appearance: Appearance::default(),
        }
    }
}

impl Settings {
    pub fn with_focus_minutes(mut self, minutes: u32) -> Self {
        self.focus_minutes = minutes;
        self
    }

    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    pub fn with_alert_sound(mut self, sound: AlertSound) -> Self {
        self.alert_sound = sound;
        self
    }

    /// Returns the configured minutes for a mode.
    pub fn minutes_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::ShortBreak => self.short_break_minutes,
            Mode::LongBreak => self.long_break_minutes,
        }
    }

    /// Returns the configured duration of a mode in seconds.
    ///
    /// Saturates for minute counts beyond `validate`'s ranges.
    pub fn duration_for(&self, mode: Mode) -> u32 {
        self.minutes_for(mode).saturating_mul(60)
    }

    /// Returns true if any of the three durations differ from `other`.
    pub fn durations_differ(&self, other: &Settings) -> bool {
        Mode::ALL
            .iter()
            .any(|&mode| self.minutes_for(mode) != other.minutes_for(mode))
    }

    /// Validates the duration ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !FOCUS_MINUTES.contains(&self.focus_minutes) {
            return Err(SettingsError::FocusOutOfRange(self.focus_minutes));
        }
        if !SHORT_BREAK_MINUTES.contains(&self.short_break_minutes) {
            return Err(SettingsError::ShortBreakOutOfRange(self.short_break_minutes));
        }
        if !LONG_BREAK_MINUTES.contains(&self.long_break_minutes) {
            return Err(SettingsError::LongBreakOutOfRange(self.long_break_minutes));
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Countdown state of the timer.
///
/// `remaining_seconds` never exceeds the duration of `mode` and the timer is
/// never running at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Active mode
    pub mode: Mode,
    /// Seconds left in the current countdown
    pub remaining_seconds: u32,
    /// Whether the countdown is ticking
    pub is_running: bool,
}

impl TimerState {
    /// Creates an idle state holding the full duration of `mode`.
    pub fn new(mode: Mode, duration_seconds: u32) -> Self {
        Self {
            mode,
            remaining_seconds: duration_seconds,
            is_running: false,
        }
    }

    /// Stops the countdown and refills it for `mode`.
    pub fn reset_to(&mut self, mode: Mode, duration_seconds: u32) {
        self.mode = mode;
        self.remaining_seconds = duration_seconds;
        self.is_running = false;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true exactly on the transition to zero; the timer stops at that
    /// instant. Does nothing while stopped.
    pub fn tick(&mut self) -> bool {
        if !self.is_running || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.is_running = false;
            return true;
        }
        false
    }

    /// Returns true if the countdown has reached zero.
    pub fn is_exhausted(&self) -> bool {
        self.remaining_seconds == 0
    }
}

// ============================================================================
// SessionIntent
// ============================================================================

/// What the user is focusing on. Purely cosmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionIntent(String);

impl SessionIntent {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the intent with surrounding whitespace removed, or `None` if blank.
    pub fn display_text(&self) -> Option<&str> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================
