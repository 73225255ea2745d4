//! Playlist dock.
//!
//! A fixed catalog of playlist embeds in two categories, a browser keeping
//! one position per category, and the dock that shows the current one. No
//! playback happens here; the dock only points at an external embed.

pub mod catalog;
pub mod dock;

pub use catalog::{find_category, Category, Playlist, CATEGORIES};
pub use dock::{Dock, DockMode, DockView, PlaylistBrowser};
