//! Window title and countdown text generation.
//!
//! This module handles:
//! - Formatting remaining seconds as `MM:SS`
//! - Generating the window title while a session runs
//!
//! The text generation logic is platform-independent and fully testable.

// ============================================================================
// Constants
// ============================================================================

/// Application name, used as the idle window title.
pub const APP_NAME: &str = "The Focus Study";

/// Separator between the countdown and the application name.
const TITLE_SEPARATOR: &str = " - ";

// ============================================================================
// TitleFormatter
// ============================================================================

/// Generates window titles for the running countdown.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleFormatter;

impl TitleFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Title shown while the countdown ticks.
    ///
    /// Format: `MM:SS - The Focus Study`
    ///
    /// # Examples
    ///
    /// ```
    /// use focus_study::presentation::title::TitleFormatter;
    ///
    /// assert_eq!(TitleFormatter::new().running_title(930), "15:30 - The Focus Study");
    /// ```
    pub fn running_title(&self, remaining_seconds: u32) -> String {
        format!("{}{}{}", format_time(remaining_seconds), TITLE_SEPARATOR, APP_NAME)
    }

    /// Title shown when no countdown is ticking.
    pub fn idle_title(&self) -> &'static str {
        APP_NAME
    }
}

/// Formats seconds as a zero-padded `MM:SS` string.
///
/// Minutes are not wrapped at 60, so 3600 seconds renders as `60:00`.
pub fn format_time(remaining_seconds: u32) -> String {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_zero() {
            assert_eq!(format_time(0), "00:00");
        }

        #[test]
        fn test_seconds_only() {
            assert_eq!(format_time(7), "00:07");
            assert_eq!(format_time(59), "00:59");
        }

        #[test]
        fn test_minutes_and_seconds() {
            assert_eq!(format_time(90), "01:30");
            assert_eq!(format_time(25 * 60), "25:00");
        }

        #[test]
        fn test_sixty_minutes_does_not_wrap() {
            assert_eq!(format_time(60 * 60), "60:00");
        }
    }

    mod title_formatter_tests {
        use super::*;

        #[test]
        fn test_running_title() {
            let formatter = TitleFormatter::new();
            assert_eq!(formatter.running_title(1499), "24:59 - The Focus Study");
        }

        #[test]
        fn test_idle_title() {
            assert_eq!(TitleFormatter::new().idle_title(), "The Focus Study");
        }
    }
}
