//! Plain console output for the non-interactive subcommands.

use std::fmt::Write as _;

use crate::playlist::{Category, CATEGORIES};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for console output.
pub struct Display;

impl Display {
    /// Prints the playlist catalog.
    pub fn show_playlists(json: bool) -> serde_json::Result<()> {
        if json {
            println!("{}", Self::playlists_json()?);
        } else {
            print!("{}", Self::playlists_text(&CATEGORIES));
        }
        Ok(())
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    fn playlists_json() -> serde_json::Result<String> {
        serde_json::to_string_pretty(&CATEGORIES)
    }

    fn playlists_text(categories: &[Category]) -> String {
        let mut out = String::new();
        for category in categories {
            let _ = writeln!(out, "{} ({})", category.name, category.id);
            for (i, playlist) in category.playlists.iter().enumerate() {
                let _ = writeln!(out, "  {}. {:<14} {}", i + 1, playlist.name, playlist.url);
            }
        }
        out
    }
}

// ============================================================================
// Tests
// ============================================================================
