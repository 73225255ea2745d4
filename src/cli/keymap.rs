//! Key bindings for the interactive timer.
//!
//! Key presses are translated into `Action`s depending on what currently
//! has the keyboard: the main screen, the settings panel, or a text prompt.
//! The mapping is platform-independent and fully testable.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Mode;

// ============================================================================
// Action
// ============================================================================

/// What the user wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Main screen
    ToggleTimer,
    Reset,
    SelectMode(Mode),
    ToggleFullscreen,
    EditIntent,
    OpenSettings,
    ToggleDock,
    ToggleDockCollapsed,
    PrevPlaylist,
    NextPlaylist,
    NextCategory,
    /// Close whatever overlay is on top
    Dismiss,
    Quit,

    // Settings panel
    EditFocus,
    EditShortBreak,
    EditLongBreak,
    CycleSound,
    CycleTheme,
    EditTextColor,
    EditBackgroundImage,
    RemoveBackgroundImage,
    ApplySettings,
    DiscardSettings,

    // Text prompt
    Input(char),
    Backspace,
    Submit,
    Cancel,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SelectMode(mode) => write!(f, "select {}", mode.as_str()),
            Action::Input(c) => write!(f, "input {:?}", c),
            other => write!(f, "{:?}", other),
        }
    }
}

/// What currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyContext {
    #[default]
    Main,
    SettingsPanel,
    Prompt,
}

/// Maps a key press to an action in `context`.
///
/// Releases and repeats are ignored. Ctrl-C always quits.
pub fn map_key(context: KeyContext, key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match context {
        KeyContext::Main => map_main(key.code),
        KeyContext::SettingsPanel => map_panel(key.code),
        KeyContext::Prompt => map_prompt(key.code),
    }
}

fn map_main(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char(' ') => Action::ToggleTimer,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('1') => Action::SelectMode(Mode::Focus),
        KeyCode::Char('2') => Action::SelectMode(Mode::ShortBreak),
        KeyCode::Char('3') => Action::SelectMode(Mode::LongBreak),
        KeyCode::Char('f') => Action::ToggleFullscreen,
        KeyCode::Char('i') => Action::EditIntent,
        KeyCode::Char('s') => Action::OpenSettings,
        KeyCode::Char('m') => Action::ToggleDock,
        KeyCode::Char('c') => Action::ToggleDockCollapsed,
        KeyCode::Char('[') => Action::PrevPlaylist,
        KeyCode::Char(']') => Action::NextPlaylist,
        KeyCode::Tab => Action::NextCategory,
        KeyCode::Esc => Action::Dismiss,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn map_panel(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char('f') => Action::EditFocus,
        KeyCode::Char('b') => Action::EditShortBreak,
        KeyCode::Char('l') => Action::EditLongBreak,
        KeyCode::Char('a') => Action::CycleSound,
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('x') => Action::EditTextColor,
        KeyCode::Char('g') => Action::EditBackgroundImage,
        KeyCode::Char('d') => Action::RemoveBackgroundImage,
        KeyCode::Enter => Action::ApplySettings,
        KeyCode::Esc => Action::DiscardSettings,
        _ => return None,
    };
    Some(action)
}

fn map_prompt(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Char(c) => Action::Input(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Enter => Action::Submit,
        KeyCode::Esc => Action::Cancel,
        _ => return None,
    };
    Some(action)
}

// ============================================================================
// Tests
// ============================================================================
