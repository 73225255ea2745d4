//! Interactive application: state, key handling and the event loop.
//!
//! `App` holds everything the screen shows and reacts to `Action`s, ticks
//! and timer events. It never touches the terminal, so it can be driven
//! directly in tests. `run` wires it to the real terminal, the ticker and
//! the completion side effects.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::alert::AlertPipeline;
use crate::cli::{map_key, Action, KeyContext, SessionArgs};
use crate::notification::{DesktopNotifier, Notifier};
use crate::playlist::{Dock, PlaylistBrowser};
use crate::presentation::{
    Frame, PresentationSink, PromptView, Screen, SettingsPanelView, TerminalTitleSink, View,
};
use crate::sound::{try_create_player, AssetLocator, SilentSoundPlayer, SoundPlayer};
use crate::timer::{Session, Tick, Ticker, TimerEngine, TimerError, TimerEvent};
use crate::types::{HexColor, SessionIntent, Settings, TimerState};

// ============================================================================
// Prompt
// ============================================================================

/// Field edited by a text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Intent,
    FocusMinutes,
    ShortBreakMinutes,
    LongBreakMinutes,
    TextColor,
    BackgroundImage,
}

impl PromptField {
    pub fn label(&self) -> &'static str {
        match self {
            PromptField::Intent => "What are you focusing on?",
            PromptField::FocusMinutes => "Focus (min)",
            PromptField::ShortBreakMinutes => "Short Break (min)",
            PromptField::LongBreakMinutes => "Long Break (min)",
            PromptField::TextColor => "Text Color (#RRGGBB)",
            PromptField::BackgroundImage => "Custom Image (path)",
        }
    }
}

/// A text prompt in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub field: PromptField,
    pub buffer: String,
}

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ============================================================================
// App
// ============================================================================

/// Application state behind the screen.
pub struct App {
    session: Session,
    alerts: AlertPipeline,
    intent: SessionIntent,
    dock: Dock,
    browser: PlaylistBrowser,
    fullscreen: bool,
    /// Settings being edited in the panel, if it is open
    draft: Option<Settings>,
    prompt: Option<Prompt>,
    status: Option<String>,
}

impl App {
    pub fn new(session: Session, alerts: AlertPipeline, intent: SessionIntent) -> Self {
        Self {
            session,
            alerts,
            intent,
            dock: Dock::new(),
            browser: PlaylistBrowser::new(),
            fullscreen: false,
            draft: None,
            prompt: None,
            status: None,
        }
    }

    /// What currently receives key presses.
    pub fn context(&self) -> KeyContext {
        if self.prompt.is_some() {
            KeyContext::Prompt
        } else if self.draft.is_some() {
            KeyContext::SettingsPanel
        } else {
            KeyContext::Main
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Flow {
        debug!(%action, "Action");
        if !matches!(action, Action::Input(_) | Action::Backspace) {
            self.status = None;
        }

        match action {
            Action::Quit => return Flow::Quit,

            Action::ToggleTimer => {
                let result = self.session.toggle();
                self.report(result);
            }
            Action::Reset => {
                let result = self.session.reset();
                self.report(result);
            }
            Action::SelectMode(mode) => {
                let result = self.session.select_mode(mode);
                self.report(result);
            }
            Action::ToggleFullscreen => self.fullscreen = !self.fullscreen,
            Action::EditIntent => self.open_prompt(PromptField::Intent),
            Action::OpenSettings => self.draft = Some(self.session.settings().clone()),
            Action::ToggleDock => self.dock.toggle(),
            Action::ToggleDockCollapsed => self.dock.toggle_collapsed(),
            Action::PrevPlaylist => self.browser.prev(),
            Action::NextPlaylist => self.browser.next(),
            Action::NextCategory => self.browser.next_category(),
            Action::Dismiss => {
                if self.dock.is_open() {
                    self.dock.close();
                } else {
                    self.fullscreen = false;
                }
            }

            Action::EditFocus => self.open_prompt(PromptField::FocusMinutes),
            Action::EditShortBreak => self.open_prompt(PromptField::ShortBreakMinutes),
            Action::EditLongBreak => self.open_prompt(PromptField::LongBreakMinutes),
            Action::EditTextColor => self.open_prompt(PromptField::TextColor),
            Action::EditBackgroundImage => self.open_prompt(PromptField::BackgroundImage),
            Action::CycleSound => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.alert_sound = draft.alert_sound.cycle();
                    self.alerts.preview(draft.alert_sound);
                }
            }
            Action::CycleTheme => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.appearance.cycle_theme();
                }
            }
            Action::RemoveBackgroundImage => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.appearance.clear_custom_background();
                }
            }
            Action::ApplySettings => self.apply_draft(),
            Action::DiscardSettings => self.draft = None,

            Action::Input(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.buffer.push(c);
                }
            }
            Action::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.buffer.pop();
                }
            }
            Action::Submit => self.submit_prompt(),
            Action::Cancel => self.prompt = None,
        }
        Flow::Continue
    }

    pub fn on_tick(&mut self, tick: Tick) {
        let result = self.session.on_tick(tick).map(|_| ());
        self.report(result);
    }

    pub fn on_event(&mut self, event: TimerEvent) {
        let sound = self.session.settings().alert_sound;
        self.alerts.handle_event(&event, sound);
    }

    /// Stops the ticker and any pending alert repeats.
    pub fn shutdown(&mut self) {
        self.session.shutdown();
        self.alerts.cancel_pending();
    }

    pub fn view(&self) -> View {
        let panel = self.draft.as_ref().map(SettingsPanelView::new);
        let frame = Frame {
            state: self.session.state(),
            // The panel previews its own colors
            settings: self.draft.as_ref().unwrap_or(self.session.settings()),
            intent: &self.intent,
            dock: self.dock.view(&self.browser),
            panel: panel.as_ref(),
            prompt: self.prompt.as_ref().map(|p| PromptView {
                label: p.field.label(),
                buffer: &p.buffer,
            }),
            status: self.status.as_deref(),
            fullscreen: self.fullscreen,
        };
        View::build(&frame)
    }

    pub fn state(&self) -> &TimerState {
        self.session.state()
    }

    pub fn settings(&self) -> &Settings {
        self.session.settings()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn intent(&self) -> &SessionIntent {
        &self.intent
    }

    pub fn dock(&self) -> &Dock {
        &self.dock
    }

    pub fn browser(&self) -> &PlaylistBrowser {
        &self.browser
    }

    pub fn draft(&self) -> Option<&Settings> {
        self.draft.as_ref()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn report(&mut self, result: Result<(), TimerError>) {
        match result {
            Ok(()) => {}
            Err(TimerError::NothingRemaining) => {
                self.status = Some("Nothing left on the clock. Press r to reset.".to_string());
            }
            Err(e) => {
                warn!("Timer operation failed: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn open_prompt(&mut self, field: PromptField) {
        let buffer = match (field, self.draft.as_ref()) {
            (PromptField::Intent, _) => self.intent.as_str().to_string(),
            (PromptField::FocusMinutes, Some(d)) => d.focus_minutes.to_string(),
            (PromptField::ShortBreakMinutes, Some(d)) => d.short_break_minutes.to_string(),
            (PromptField::LongBreakMinutes, Some(d)) => d.long_break_minutes.to_string(),
            (PromptField::TextColor, Some(d)) => d.appearance.text_color.to_string(),
            (PromptField::BackgroundImage, Some(d)) => d
                .appearance
                .custom_background
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            // Settings fields are only editable with the panel open
            (_, None) => return,
        };
        self.prompt = Some(Prompt { field, buffer });
    }

    fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let input = prompt.buffer.trim();

        if prompt.field == PromptField::Intent {
            self.intent.set(prompt.buffer.as_str());
            return;
        }
        let Some(draft) = self.draft.as_mut() else {
            return;
        };

        let outcome: Result<(), String> = match prompt.field {
            PromptField::FocusMinutes => parse_minutes(input).map(|m| draft.focus_minutes = m),
            PromptField::ShortBreakMinutes => {
                parse_minutes(input).map(|m| draft.short_break_minutes = m)
            }
            PromptField::LongBreakMinutes => {
                parse_minutes(input).map(|m| draft.long_break_minutes = m)
            }
            PromptField::TextColor => input
                .parse::<HexColor>()
                .map(|c| draft.appearance.text_color = c)
                .map_err(|e| e.to_string()),
            PromptField::BackgroundImage => draft
                .appearance
                .set_custom_background(PathBuf::from(input))
                .map_err(|e| e.to_string()),
            PromptField::Intent => Ok(()),
        };

        if let Err(message) = outcome {
            self.status = Some(message);
        }
    }

    fn apply_draft(&mut self) {
        let Some(draft) = self.draft.clone() else {
            return;
        };
        match self.session.apply_settings(draft) {
            Ok(()) => {
                self.draft = None;
                self.status = Some("Settings saved.".to_string());
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }
}

fn parse_minutes(input: &str) -> Result<u32, String> {
    input
        .parse()
        .map_err(|_| format!("'{}' is not a whole number of minutes", input))
}

// ============================================================================
// Event loop
// ============================================================================

/// Terminal input forwarded from the reader thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize,
}

/// Reads terminal events on a blocking thread and forwards them.
///
/// The thread exits once the receiver is dropped.
fn spawn_input_reader() -> Result<mpsc::UnboundedReceiver<Input>> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("input-reader".to_string())
        .spawn(move || {
            while !tx.is_closed() {
                match event::poll(Duration::from_millis(250)) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        warn!("Failed to poll terminal input: {}", e);
                        break;
                    }
                }
                let input = match event::read() {
                    Ok(Event::Key(key)) => Input::Key(key),
                    Ok(Event::Resize(..)) => Input::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Failed to read terminal input: {}", e);
                        break;
                    }
                };
                if tx.send(input).is_err() {
                    break;
                }
            }
            debug!("Input reader exiting");
        })
        .context("failed to spawn the input reader")?;
    Ok(rx)
}

/// Receivers feeding the event loop.
pub struct Channels {
    pub inputs: mpsc::UnboundedReceiver<Input>,
    pub ticks: mpsc::UnboundedReceiver<Tick>,
    pub events: mpsc::UnboundedReceiver<TimerEvent>,
}

/// Feeds input, ticks and timer events into `app`, redrawing after each.
///
/// Returns once the user quits or `shutdown` resolves. A closed input
/// channel ends the loop with an error, since nothing could quit it.
pub async fn event_loop<S, D>(
    app: &mut App,
    channels: &mut Channels,
    shutdown: S,
    mut draw: D,
) -> Result<()>
where
    S: Future<Output = ()>,
    D: FnMut(&View) -> Result<()>,
{
    tokio::pin!(shutdown);
    draw(&app.view())?;
    loop {
        tokio::select! {
            input = channels.inputs.recv() => match input {
                Some(Input::Key(key)) => {
                    if let Some(action) = map_key(app.context(), &key) {
                        if app.handle_action(action) == Flow::Quit {
                            break;
                        }
                    }
                }
                Some(Input::Resize) => {}
                None => return Err(anyhow!("terminal input closed")),
            },
            Some(tick) = channels.ticks.recv() => app.on_tick(tick),
            Some(event) = channels.events.recv() => app.on_event(event),
            () = &mut shutdown => break,
        }
        draw(&app.view())?;
    }
    Ok(())
}

/// Asks for notification permission on the blocking pool.
///
/// The answer may arrive after the first session starts; until then
/// completions are not notified.
fn request_permission_in_background(notifier: Arc<dyn Notifier>) {
    let request = tokio::task::spawn_blocking(move || notifier.request_permission());
    tokio::spawn(async move {
        match request.await {
            Ok(permission) => debug!("Notification permission settled: {:?}", permission),
            Err(e) => warn!("Notification permission request failed: {}", e),
        }
    });
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Runs the interactive timer until the user quits.
pub async fn run(args: &SessionArgs) -> Result<()> {
    let settings = args.to_settings().context("invalid initial settings")?;

    let sink: Arc<dyn PresentationSink> = Arc::new(TerminalTitleSink::new());
    let player: Arc<dyn SoundPlayer> = if args.no_sound {
        info!("Alert sounds disabled");
        Arc::new(SilentSoundPlayer)
    } else {
        try_create_player(false)
            .map(|player| player as Arc<dyn SoundPlayer>)
            .unwrap_or_else(|| Arc::new(SilentSoundPlayer))
    };
    let notifier: Arc<dyn Notifier> = if args.no_notify {
        Arc::new(DesktopNotifier::denied())
    } else {
        Arc::new(DesktopNotifier::new())
    };
    request_permission_in_background(Arc::clone(&notifier));

    let (event_tx, events) = mpsc::unbounded_channel();
    let (tick_tx, ticks) = mpsc::unbounded_channel();
    let engine = TimerEngine::new(settings, Arc::clone(&sink), event_tx);
    let session = Session::new(engine, Ticker::new(tick_tx));
    let alerts = AlertPipeline::new(
        Arc::clone(&sink),
        player,
        notifier,
        AssetLocator::new(&args.assets),
    );
    let mut app = App::new(session, alerts, args.to_intent());

    let mut screen = Screen::new();
    screen.enter().context("failed to set up the terminal")?;
    sink.restore_title();
    let mut channels = Channels {
        inputs: spawn_input_reader()?,
        ticks,
        events,
    };

    let result = event_loop(&mut app, &mut channels, ctrl_c(), |view| {
        screen.draw(view).context("failed to draw")
    })
    .await;

    app.shutdown();
    sink.restore_title();
    screen.leave().context("failed to restore the terminal")?;
    info!("Goodbye");
    result
}

// ============================================================================
// Tests
// ============================================================================
