//! Full-screen rendering of the timer.
//!
//! Rendering is split in two:
//! - `View::build` turns application state into centered lines of text
//!   (platform-independent, fully testable)
//! - `Screen` draws a `View` on the terminal's alternate screen
//!
//! The background and text colors come from the user's appearance settings.
//! The countdown switches to the accent color once it reaches zero.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{ExecutableCommand, QueueableCommand};
use tracing::debug;

use super::title::{format_time, APP_NAME};
use crate::playlist::{DockMode, DockView};
use crate::types::{HexColor, Mode, SessionIntent, Settings, TimerState, ACCENT_COLOR};

const TAGLINE: &str = "Cultivate deep work with intention";
const FOOTER: &str = "Designed for deep, intentional work";

// ============================================================================
// View
// ============================================================================

/// How a line is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Text color
    Normal,
    /// Text color, bold
    Strong,
    /// Text color faded toward the background
    Dim,
    /// Accent color
    Accent,
}

/// One centered line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Line {
    fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    fn blank() -> Self {
        Self::new("", Emphasis::Normal)
    }
}

/// Pending single-line text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptView<'a> {
    pub label: &'a str,
    pub buffer: &'a str,
}

/// Everything the screen shows at one instant.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub state: &'a TimerState,
    pub settings: &'a Settings,
    pub intent: &'a SessionIntent,
    pub dock: Option<DockView>,
    pub panel: Option<&'a SettingsPanelView>,
    pub prompt: Option<PromptView<'a>>,
    pub status: Option<&'a str>,
    pub fullscreen: bool,
}

/// A fully laid-out screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub background: HexColor,
    pub foreground: HexColor,
    pub lines: Vec<Line>,
}

impl View {
    /// Lays out `frame`.
    pub fn build(frame: &Frame<'_>) -> Self {
        let appearance = &frame.settings.appearance;
        let mut lines = if let Some(panel) = frame.panel {
            panel.lines()
        } else if frame.dock.as_ref().map(|d| d.mode) == Some(DockMode::Modal) {
            frame.dock.as_ref().map(dock_modal_lines).unwrap_or_default()
        } else if frame.fullscreen {
            fullscreen_lines(frame)
        } else {
            normal_lines(frame)
        };

        if let Some(prompt) = frame.prompt {
            lines.push(Line::blank());
            lines.push(Line::new(
                format!("{}: {}_", prompt.label, prompt.buffer),
                Emphasis::Strong,
            ));
            lines.push(Line::new("Enter confirm · Esc cancel", Emphasis::Dim));
        }
        if let Some(status) = frame.status {
            lines.push(Line::blank());
            lines.push(Line::new(status, Emphasis::Dim));
        }

        Self {
            background: appearance.background,
            foreground: appearance.text_color,
            lines,
        }
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn color_for(&self, emphasis: Emphasis) -> Color {
        match emphasis {
            Emphasis::Normal | Emphasis::Strong => to_color(self.foreground),
            Emphasis::Dim => to_color(blend(self.foreground, self.background, 0.4)),
            Emphasis::Accent => to_color(ACCENT_COLOR),
        }
    }
}

fn countdown_lines(state: &TimerState) -> Vec<Line> {
    let emphasis = if state.remaining_seconds == 0 {
        Emphasis::Accent
    } else {
        Emphasis::Normal
    };
    big_text(&format_time(state.remaining_seconds))
        .into_iter()
        .map(|row| Line::new(row, emphasis))
        .collect()
}

fn start_label(state: &TimerState) -> &'static str {
    if state.is_running {
        "Pause"
    } else {
        "Start"
    }
}

fn normal_lines(frame: &Frame<'_>) -> Vec<Line> {
    let mut lines = vec![
        Line::new(APP_NAME, Emphasis::Strong),
        Line::new(TAGLINE, Emphasis::Dim),
        Line::blank(),
    ];

    if let Some(intent) = frame.intent.display_text() {
        lines.push(Line::new(format!("\"{}\"", intent), Emphasis::Normal));
        lines.push(Line::blank());
    }

    lines.extend(countdown_lines(frame.state));
    lines.push(Line::blank());
    lines.push(Line::new(mode_bar(frame), Emphasis::Normal));
    lines.push(Line::blank());
    lines.push(Line::new(
        format!(
            "space {} · r Reset · f Fullscreen · m Music · s Settings · i Intent · q Quit",
            start_label(frame.state)
        ),
        Emphasis::Dim,
    ));

    if let Some(path) = &frame.settings.appearance.custom_background {
        lines.push(Line::new(
            format!("background image: {}", path.display()),
            Emphasis::Dim,
        ));
    }

    if let Some(dock) = &frame.dock {
        lines.push(Line::blank());
        lines.extend(docked_lines(dock));
    }

    lines.push(Line::blank());
    lines.push(Line::new(FOOTER, Emphasis::Dim));
    lines
}

fn fullscreen_lines(frame: &Frame<'_>) -> Vec<Line> {
    let mut lines = vec![Line::new(APP_NAME, Emphasis::Dim), Line::blank()];
    if let Some(intent) = frame.intent.display_text() {
        lines.push(Line::new("Focus On", Emphasis::Strong));
        lines.push(Line::new(format!("\"{}\"", intent), Emphasis::Normal));
    }
    lines.push(Line::blank());
    lines.extend(countdown_lines(frame.state));
    lines.push(Line::blank());
    lines.push(Line::new(
        format!(
            "space {} · r Reset · m Music · f Exit fullscreen",
            start_label(frame.state)
        ),
        Emphasis::Dim,
    ));
    if let Some(dock) = &frame.dock {
        lines.push(Line::blank());
        lines.extend(docked_lines(dock));
    }
    lines
}

fn mode_bar(frame: &Frame<'_>) -> String {
    Mode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            let label = format!(
                "{} {} ({}min)",
                i + 1,
                mode.label(),
                frame.settings.minutes_for(*mode)
            );
            if *mode == frame.state.mode {
                format!("[ {} ]", label)
            } else {
                format!("  {}  ", label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn playlist_dots(dock: &DockView) -> String {
    (0..dock.category.len())
        .map(|i| if i == dock.index { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn dock_modal_lines(dock: &DockView) -> Vec<Line> {
    let tabs = crate::playlist::CATEGORIES
        .iter()
        .map(|c| {
            if c.id == dock.category.id {
                format!("[ {} ]", c.name)
            } else {
                format!("  {}  ", c.name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        Line::new("Focus Music", Emphasis::Strong),
        Line::new("Select your vibe.", Emphasis::Dim),
        Line::blank(),
        Line::new(tabs, Emphasis::Normal),
        Line::blank(),
        Line::new(format!("♪ {}", dock.playlist.name), Emphasis::Strong),
        Line::new(dock.playlist.url, Emphasis::Normal),
        Line::blank(),
        Line::new(
            format!("[ Prev   {}   Next ]", playlist_dots(dock)),
            Emphasis::Normal,
        ),
        Line::blank(),
        Line::new(
            "tab Category · [ Prev · ] Next · m Close",
            Emphasis::Dim,
        ),
    ]
}

fn docked_lines(dock: &DockView) -> Vec<Line> {
    match dock.mode {
        DockMode::DockedCollapsed => vec![Line::new("♪", Emphasis::Strong)],
        DockMode::DockedExpanded | DockMode::Modal => vec![
            Line::new(
                format!(
                    "♪ Now Playing: {} ({})   {}",
                    dock.playlist.name,
                    dock.category.name,
                    playlist_dots(dock)
                ),
                Emphasis::Normal,
            ),
            Line::new(dock.playlist.url, Emphasis::Dim),
        ],
    }
}

// ============================================================================
// SettingsPanelView
// ============================================================================

/// The settings panel for a draft of the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPanelView {
    rows: Vec<(String, String)>,
}

impl SettingsPanelView {
    pub fn new(draft: &Settings) -> Self {
        let appearance = &draft.appearance;
        let background = match appearance.theme_name() {
            Some(name) => format!("{} ({})", name, appearance.background),
            None => appearance.background.to_string(),
        };
        let image = appearance
            .custom_background
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string());

        Self {
            rows: vec![
                ("Timer".into(), String::new()),
                ("f  Focus (min)".into(), draft.focus_minutes.to_string()),
                ("b  Short Break (min)".into(), draft.short_break_minutes.to_string()),
                ("l  Long Break (min)".into(), draft.long_break_minutes.to_string()),
                ("Sound".into(), String::new()),
                ("a  Alert Sound".into(), draft.alert_sound.label().to_string()),
                ("Appearance".into(), String::new()),
                ("t  Background".into(), background),
                ("x  Text Color".into(), appearance.text_color.to_string()),
                ("g  Custom Image".into(), image),
            ],
        }
    }

    /// Value shown next to `label`, if present.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l.ends_with(label))
            .map(|(_, v)| v.as_str())
    }

    fn lines(&self) -> Vec<Line> {
        let mut lines = vec![
            Line::new("Settings", Emphasis::Strong),
            Line::new(
                "Customize your focus environment to suit your workflow.",
                Emphasis::Dim,
            ),
        ];
        for (label, value) in &self.rows {
            if value.is_empty() {
                lines.push(Line::blank());
                lines.push(Line::new(format!("{:<44}", label), Emphasis::Strong));
            } else {
                lines.push(Line::new(format!("  {:<22}{:>20}", label, value), Emphasis::Normal));
            }
        }
        lines.push(Line::blank());
        lines.push(Line::new(
            "d Remove image · Enter Apply · Esc Discard",
            Emphasis::Dim,
        ));
        lines
    }
}

// ============================================================================
// Big digits
// ============================================================================

const GLYPH_ROWS: usize = 5;

fn glyph(c: char) -> [&'static str; GLYPH_ROWS] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}

/// Renders digits and colons in a five-row block font.
pub fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_ROWS)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

// ============================================================================
// Colors
// ============================================================================

fn to_color(color: HexColor) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Mixes `amount` of `to` into `from`.
fn blend(from: HexColor, to: HexColor, amount: f32) -> HexColor {
    let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * amount).round() as u8;
    HexColor::new(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}

// ============================================================================
// Screen
// ============================================================================

/// Terminal owner: raw mode plus the alternate screen.
pub struct Screen {
    out: Stdout,
    active: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            active: false,
        }
    }

    /// Switches the terminal into raw mode on the alternate screen.
    pub fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        self.out.execute(EnterAlternateScreen)?.execute(Hide)?;
        self.active = true;
        debug!("Entered alternate screen");
        Ok(())
    }

    /// Restores the terminal. Safe to call more than once.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.out
            .queue(ResetColor)?
            .queue(Show)?
            .queue(LeaveAlternateScreen)?
            .flush()?;
        disable_raw_mode()
    }

    pub fn draw(&mut self, view: &View) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let top = rows.saturating_sub(view.lines.len() as u16) / 2;

        self.out
            .queue(SetBackgroundColor(to_color(view.background)))?
            .queue(Clear(ClearType::All))?;

        for (i, line) in view.lines.iter().enumerate() {
            let y = top + i as u16;
            if y >= rows {
                break;
            }
            let width = line.text.chars().count() as u16;
            let x = cols.saturating_sub(width) / 2;

            self.out
                .queue(MoveTo(x, y))?
                .queue(SetForegroundColor(view.color_for(line.emphasis)))?;
            if line.emphasis == Emphasis::Strong {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            self.out.queue(Print(&line.text))?;
            if line.emphasis == Emphasis::Strong {
                self.out.queue(SetAttribute(Attribute::NormalIntensity))?;
            }
        }
        self.out.flush()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            debug!("Failed to restore terminal: {}", e);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::{Dock, PlaylistBrowser};
    use crate::types::AlertSound;

    struct Inputs {
        state: TimerState,
        settings: Settings,
        intent: SessionIntent,
    }

    impl Inputs {
        fn new() -> Self {
            let settings = Settings::default();
            Self {
                state: TimerState::new(Mode::Focus, settings.duration_for(Mode::Focus)),
                settings,
                intent: SessionIntent::default(),
            }
        }

        fn frame(&self) -> Frame<'_> {
            Frame {
                state: &self.state,
                settings: &self.settings,
                intent: &self.intent,
                dock: None,
                panel: None,
                prompt: None,
                status: None,
                fullscreen: false,
            }
        }
    }

    mod big_text_tests {
        use super::*;

        #[test]
        fn test_five_rows() {
            let rows = big_text("25:00");
            assert_eq!(rows.len(), GLYPH_ROWS);
            let width = rows[0].chars().count();
            assert!(rows.iter().all(|r| r.chars().count() == width));
        }
    }

    mod view_tests {
        use super::*;

        #[test]
        fn test_normal_layout() {
            let inputs = Inputs::new();
            let view = View::build(&inputs.frame());
            let text = view.text();

            assert!(text.contains(APP_NAME));
            assert!(text.contains(TAGLINE));
            assert!(text.contains("[ 1 Focus (25min) ]"));
            assert!(text.contains("2 Short Break (5min)"));
            assert!(text.contains("3 Long Break (15min)"));
            assert!(text.contains("space Start"));
            assert_eq!(view.background, inputs.settings.appearance.background);
            assert_eq!(view.foreground, inputs.settings.appearance.text_color);
        }

        #[test]
        fn test_running_shows_pause() {
            let mut inputs = Inputs::new();
            inputs.state.is_running = true;
            assert!(View::build(&inputs.frame()).text().contains("space Pause"));
        }

        #[test]
        fn test_intent_is_quoted_and_trimmed() {
            let mut inputs = Inputs::new();
            inputs.intent.set("  chapter 3  ");
            assert!(View::build(&inputs.frame()).text().contains("\"chapter 3\""));
        }

        #[test]
        fn test_countdown_accent_at_zero() {
            let mut inputs = Inputs::new();
            let view = View::build(&inputs.frame());
            assert!(!view.lines.iter().any(|l| l.emphasis == Emphasis::Accent));

            inputs.state.remaining_seconds = 0;
            let view = View::build(&inputs.frame());
            let accented = view
                .lines
                .iter()
                .filter(|l| l.emphasis == Emphasis::Accent)
                .count();
            assert_eq!(accented, GLYPH_ROWS);
        }

        #[test]
        fn test_fullscreen_layout() {
            let mut inputs = Inputs::new();
            inputs.intent.set("thesis");
            let mut frame = inputs.frame();
            frame.fullscreen = true;
            let text = View::build(&frame).text();

            assert!(text.contains("Focus On"));
            assert!(text.contains("\"thesis\""));
            assert!(!text.contains(TAGLINE));
            assert!(!text.contains("(25min)"));
        }

        #[test]
        fn test_fullscreen_without_intent_has_no_heading() {
            let mut inputs = Inputs::new();
            for intent in ["", "   "] {
                inputs.intent.set(intent);
                let mut frame = inputs.frame();
                frame.fullscreen = true;
                let text = View::build(&frame).text();

                assert!(!text.contains("Focus On"));
                assert!(text.contains("f Exit fullscreen"));
            }
        }

        #[test]
        fn test_dock_hidden_until_opened() {
            let inputs = Inputs::new();
            let mut frame = inputs.frame();
            frame.dock = Dock::new().view(&PlaylistBrowser::new());
            assert!(!View::build(&frame).text().contains("Now Playing"));
        }

        #[test]
        fn test_dock_modal_replaces_body() {
            let inputs = Inputs::new();
            let mut dock = Dock::new();
            dock.open();
            let mut frame = inputs.frame();
            frame.dock = dock.view(&PlaylistBrowser::new());
            let text = View::build(&frame).text();

            assert!(text.contains("Focus Music"));
            assert!(text.contains("[ Focus Deep ]"));
            assert!(text.contains("♪ Focus Flow"));
            assert!(!text.contains(TAGLINE));
        }

        #[test]
        fn test_docked_panel_below_timer() {
            let inputs = Inputs::new();
            let mut dock = Dock::new();
            dock.open();
            dock.close();
            let mut frame = inputs.frame();
            frame.dock = dock.view(&PlaylistBrowser::new());
            let text = View::build(&frame).text();

            assert!(text.contains(TAGLINE));
            assert!(text.contains("Now Playing: Focus Flow (Focus Deep)"));
        }

        #[test]
        fn test_prompt_and_status() {
            let inputs = Inputs::new();
            let mut frame = inputs.frame();
            frame.prompt = Some(PromptView {
                label: "Focus (min)",
                buffer: "4",
            });
            frame.status = Some("Settings applied");
            let text = View::build(&frame).text();

            assert!(text.contains("Focus (min): 4_"));
            assert!(text.contains("Settings applied"));
        }
    }

    mod settings_panel_tests {
        use super::*;

        #[test]
        fn test_shows_draft_values() {
            let draft = Settings::default()
                .with_focus_minutes(50)
                .with_alert_sound(AlertSound::Chime);
            let panel = SettingsPanelView::new(&draft);

            assert_eq!(panel.value_of("Focus (min)"), Some("50"));
            assert_eq!(panel.value_of("Short Break (min)"), Some("5"));
            assert_eq!(panel.value_of("Alert Sound"), Some("Chime"));
            assert_eq!(panel.value_of("Background"), Some("Classic Cream (#FDFBF7)"));
            assert_eq!(panel.value_of("Text Color"), Some("#2C3E50"));
            assert_eq!(panel.value_of("Custom Image"), Some("none"));
        }

        #[test]
        fn test_panel_replaces_body() {
            let inputs = Inputs::new();
            let panel = SettingsPanelView::new(&inputs.settings);
            let mut frame = inputs.frame();
            frame.panel = Some(&panel);
            let text = View::build(&frame).text();

            assert!(text.contains("Settings"));
            assert!(text.contains("Alert Sound"));
            assert!(!text.contains(TAGLINE));
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_blend_endpoints() {
            let a = HexColor::new(0, 0, 0);
            let b = HexColor::new(200, 100, 50);
            assert_eq!(blend(a, b, 0.0), a);
            assert_eq!(blend(a, b, 1.0), b);
            assert_eq!(blend(a, b, 0.5), HexColor::new(100, 50, 25));
        }
    }
}
