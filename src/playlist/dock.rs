//! Playlist browsing and the three-way dock.

use tracing::debug;

use super::catalog::{Category, Playlist, CATEGORIES};

// ============================================================================
// PlaylistBrowser
// ============================================================================

/// Active category plus one current index per category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaylistBrowser {
    active: usize,
    indices: [usize; CATEGORIES.len()],
}

impl PlaylistBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the category at `index` active. Out-of-range indices are ignored.
    pub fn select_category(&mut self, index: usize) {
        if index < CATEGORIES.len() {
            self.active = index;
        }
    }

    /// Moves to the next category tab, wrapping.
    pub fn next_category(&mut self) {
        self.active = (self.active + 1) % CATEGORIES.len();
    }

    /// Advances the active category's playlist, wrapping.
    pub fn next(&mut self) {
        let total = self.active_category().len();
        let index = &mut self.indices[self.active];
        *index = (*index + 1) % total;
    }

    /// Steps back in the active category's playlists, wrapping.
    pub fn prev(&mut self) {
        let total = self.active_category().len();
        let index = &mut self.indices[self.active];
        *index = (*index + total - 1) % total;
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_category(&self) -> &'static Category {
        &CATEGORIES[self.active]
    }

    /// Current playlist index of the category at `category`.
    pub fn index_of(&self, category: usize) -> Option<usize> {
        self.indices.get(category).copied()
    }

    /// Current playlist of the active category.
    pub fn current(&self) -> &'static Playlist {
        &self.active_category().playlists[self.indices[self.active]]
    }
}

// ============================================================================
// Dock
// ============================================================================

/// How the dock is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockMode {
    /// Centered overlay with the full embed
    Modal,
    /// Corner panel with the compact embed
    DockedExpanded,
    /// Icon only
    DockedCollapsed,
}

impl DockMode {
    /// Embed height in pixels.
    pub fn embed_height(&self) -> u16 {
        match self {
            DockMode::Modal => 352,
            DockMode::DockedExpanded | DockMode::DockedCollapsed => 152,
        }
    }
}

/// Everything needed to draw the dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockView {
    pub mode: DockMode,
    pub category: &'static Category,
    pub playlist: &'static Playlist,
    /// Index of `playlist` within `category`
    pub index: usize,
    pub embed_height: u16,
}

/// Dock display state.
///
/// A dock that has never been opened renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dock {
    open: bool,
    has_started: bool,
    docked_expanded: bool,
}

impl Default for Dock {
    fn default() -> Self {
        Self {
            open: false,
            has_started: false,
            docked_expanded: true,
        }
    }
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the modal.
    pub fn open(&mut self) {
        self.open = true;
        self.has_started = true;
        self.docked_expanded = true;
        debug!("Dock opened");
    }

    /// Leaves the modal. The dock stays in the corner once it has been shown.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Shrinks the docked panel to its icon. Ignored unless docked.
    pub fn collapse(&mut self) {
        if self.mode() == Some(DockMode::DockedExpanded) {
            self.docked_expanded = false;
        }
    }

    /// Restores the docked panel from its icon. Ignored unless docked.
    pub fn expand(&mut self) {
        if self.mode() == Some(DockMode::DockedCollapsed) {
            self.docked_expanded = true;
        }
    }

    /// Collapses an expanded dock or expands a collapsed one.
    pub fn toggle_collapsed(&mut self) {
        match self.mode() {
            Some(DockMode::DockedExpanded) => self.collapse(),
            Some(DockMode::DockedCollapsed) => self.expand(),
            _ => {}
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Current display mode, or `None` when nothing is rendered.
    pub fn mode(&self) -> Option<DockMode> {
        if self.open {
            Some(DockMode::Modal)
        } else if !self.has_started {
            None
        } else if self.docked_expanded {
            Some(DockMode::DockedExpanded)
        } else {
            Some(DockMode::DockedCollapsed)
        }
    }

    pub fn view(&self, browser: &PlaylistBrowser) -> Option<DockView> {
        let mode = self.mode()?;
        let category = browser.active_category();
        Some(DockView {
            mode,
            category,
            playlist: browser.current(),
            index: browser.index_of(browser.active_index()).unwrap_or(0),
            embed_height: mode.embed_height(),
        })
    }
}
