//! Integration tests for the countdown and its completion side effects.
//!
//! These tests drive a `Session` with a real `Ticker` over paused tokio time
//! and feed its events through an `AlertPipeline` wired to mocks:
//! - One full session from start to completion
//! - Pause and resume across ticks
//! - Mode switches and settings changes while running
//! - Alert repeats cancelled by the next session
//! - A slow notification daemon never holding up the countdown

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Duration;

use focus_study::alert::AlertPipeline;
use focus_study::notification::{MockNotifier, Permission};
use focus_study::presentation::{MockPresentationSink, APP_NAME};
use focus_study::sound::{AssetLocator, MockSoundPlayer, SoundSource, Tone};
use focus_study::timer::{Session, Tick, Ticker, TimerEngine, TimerEvent, TICK_PERIOD};
use focus_study::types::{AlertSound, Mode, Settings};

// ============================================================================
// Test Helpers
// ============================================================================

/// A session plus everything it talks to.
struct Rig {
    session: Session,
    alerts: AlertPipeline,
    sink: Arc<MockPresentationSink>,
    player: Arc<MockSoundPlayer>,
    notifier: Arc<MockNotifier>,
    ticks: mpsc::UnboundedReceiver<Tick>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    /// Every event seen so far
    seen: Vec<TimerEvent>,
}

impl Rig {
    fn new(settings: Settings) -> Self {
        Self::with_notifier(settings, MockNotifier::granted())
    }

    fn with_notifier(settings: Settings, notifier: MockNotifier) -> Self {
        Self::build(settings, notifier, TICK_PERIOD)
    }

    fn build(settings: Settings, notifier: MockNotifier, tick_period: Duration) -> Self {
        let sink = Arc::new(MockPresentationSink::new());
        let player = Arc::new(MockSoundPlayer::new());
        let notifier = Arc::new(notifier);
        let (event_tx, events) = mpsc::unbounded_channel();
        let (tick_tx, ticks) = mpsc::unbounded_channel();

        let engine = TimerEngine::new(settings, sink.clone(), event_tx);
        let alerts = AlertPipeline::new(
            sink.clone(),
            player.clone(),
            notifier.clone(),
            AssetLocator::new("sounds"),
        );

        Self {
            session: Session::new(engine, Ticker::with_period(tick_tx, tick_period)),
            alerts,
            sink,
            player,
            notifier,
            ticks,
            events,
            seen: Vec::new(),
        }
    }

    /// Delivers queued ticks and events the way the event loop does.
    fn pump(&mut self) {
        loop {
            let mut progressed = false;
            while let Ok(tick) = self.ticks.try_recv() {
                self.session.on_tick(tick).unwrap();
                progressed = true;
            }
            while let Ok(event) = self.events.try_recv() {
                let sound = self.session.settings().alert_sound;
                self.alerts.handle_event(&event, sound);
                self.seen.push(event);
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
    }

    /// Sleeps paused time (kept off whole seconds), then pumps.
    async fn run_for(&mut self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        self.pump();
    }

    fn completions(&self) -> Vec<Mode> {
        self.seen
            .iter()
            .filter_map(|e| match e {
                TimerEvent::SessionComplete { mode, .. } => Some(*mode),
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// Full Session
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_focus_session_runs_to_completion() {
    let mut rig = Rig::new(Settings::default().with_focus_minutes(1));
    rig.session.start().unwrap();

    rig.run_for(30_500).await;
    assert_eq!(rig.session.state().remaining_seconds, 30);
    assert_eq!(
        rig.sink.last_title().as_deref(),
        Some("00:30 - The Focus Study")
    );

    rig.run_for(30_000).await;
    assert_eq!(rig.session.state().remaining_seconds, 0);
    assert!(!rig.session.state().is_running);
    assert!(!rig.session.ticker().is_armed());
    assert_eq!(rig.completions(), vec![Mode::Focus]);
    assert_eq!(rig.sink.last_title().as_deref(), Some(APP_NAME));

    // Repeats at 0, 750 and 1500 ms after completion
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(rig.player.play_count(), 1);
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(rig.player.play_count(), 2);
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(rig.player.play_count(), 3);

    let plays = rig.player.get_play_calls();
    assert!(plays.iter().all(|p| matches!(
        p,
        SoundSource::Asset { name, .. } if name == "bell"
    )));

    let sent = rig.notifier.get_notifications();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Timer Complete!");
    assert_eq!(sent[0].body, "Your Focus session is complete.");
}

#[tokio::test(start_paused = true)]
async fn test_completion_fires_once() {
    let mut rig = Rig::new(Settings::default().with_long_break_minutes(1));
    rig.session.select_mode(Mode::LongBreak).unwrap();
    rig.session.start().unwrap();

    rig.run_for(90_500).await;
    rig.run_for(2_000).await;

    assert_eq!(rig.completions(), vec![Mode::LongBreak]);
    assert_eq!(rig.notifier.notification_count(), 1);
    assert_eq!(rig.player.play_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_missing_assets_fall_back_to_tones() {
    let mut rig = Rig::new(
        Settings::default()
            .with_short_break_minutes(1)
            .with_alert_sound(AlertSound::Chime),
    );
    rig.player.set_assets_missing(true);
    rig.session.select_mode(Mode::ShortBreak).unwrap();
    rig.session.start().unwrap();

    rig.run_for(62_500).await;
    rig.run_for(2_000).await;

    let plays = rig.player.get_play_calls();
    assert_eq!(plays.len(), 3);
    assert!(plays.iter().all(|p| p.tone() == Some(&Tone::CHIME)));
}

#[tokio::test(start_paused = true)]
async fn test_silent_sound_still_notifies() {
    let mut rig = Rig::new(
        Settings::default()
            .with_focus_minutes(1)
            .with_alert_sound(AlertSound::None),
    );
    rig.session.start().unwrap();

    rig.run_for(62_500).await;
    rig.run_for(2_000).await;

    assert_eq!(rig.player.play_count(), 0);
    assert_eq!(rig.notifier.notification_count(), 1);
    assert_eq!(rig.sink.last_title().as_deref(), Some(APP_NAME));
}

#[tokio::test(start_paused = true)]
async fn test_denied_permission_skips_notification_only() {
    let mut rig = Rig::with_notifier(
        Settings::default().with_focus_minutes(1),
        MockNotifier::answering(Permission::Denied),
    );
    rig.session.start().unwrap();

    rig.run_for(62_500).await;
    rig.run_for(2_000).await;

    assert_eq!(rig.notifier.notification_count(), 0);
    assert_eq!(rig.player.play_count(), 3);
    assert_eq!(rig.sink.last_title().as_deref(), Some(APP_NAME));
}

#[tokio::test(start_paused = true)]
async fn test_failing_player_does_not_block_notification() {
    let mut rig = Rig::new(Settings::default().with_focus_minutes(1));
    rig.player.set_should_fail(true);
    rig.session.start().unwrap();

    rig.run_for(62_500).await;
    rig.run_for(2_000).await;

    assert_eq!(rig.player.play_count(), 0);
    assert_eq!(rig.notifier.notification_count(), 1);
}

// ============================================================================
// Pause / Resume
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_and_resume() {
    let mut rig = Rig::new(Settings::default());
    rig.session.start().unwrap();
    rig.run_for(10_500).await;

    rig.session.toggle().unwrap();
    assert!(!rig.session.state().is_running);
    rig.run_for(60_000).await;
    assert_eq!(rig.session.state().remaining_seconds, 1490);

    // Ticks now land on the half second
    rig.session.toggle().unwrap();
    rig.run_for(5_250).await;
    assert_eq!(rig.session.state().remaining_seconds, 1485);

    let started = rig
        .seen
        .iter()
        .filter(|e| matches!(e, TimerEvent::Started { .. }))
        .count();
    assert_eq!(started, 2);
    assert!(rig
        .seen
        .contains(&TimerEvent::Paused { remaining_seconds: 1490 }));
}

#[tokio::test(start_paused = true)]
async fn test_resume_keeps_session_id() {
    let mut rig = Rig::new(Settings::default());
    rig.session.start().unwrap();
    let first = rig.session.engine().session_id();
    rig.run_for(2_500).await;

    rig.session.pause().unwrap();
    rig.session.start().unwrap();
    assert_eq!(rig.session.engine().session_id(), first);

    rig.session.reset().unwrap();
    rig.session.start().unwrap();
    assert_ne!(rig.session.engine().session_id(), first);
}

// ============================================================================
// Mode and Settings Changes
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_mode_switch_while_running_stops_countdown() {
    let mut rig = Rig::new(Settings::default());
    rig.session.start().unwrap();
    rig.run_for(4_500).await;

    rig.session.select_mode(Mode::ShortBreak).unwrap();
    rig.run_for(5_000).await;

    assert_eq!(rig.session.state().mode, Mode::ShortBreak);
    assert_eq!(rig.session.state().remaining_seconds, 300);
    assert!(!rig.session.state().is_running);
    assert!(rig.completions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_duration_change_resets_countdown() {
    let mut rig = Rig::new(Settings::default());
    rig.session.start().unwrap();
    rig.run_for(3_500).await;

    rig.session
        .apply_settings(Settings::default().with_focus_minutes(50))
        .unwrap();
    rig.run_for(3_000).await;

    assert_eq!(rig.session.state().remaining_seconds, 3000);
    assert!(!rig.session.state().is_running);
    assert!(rig
        .seen
        .contains(&TimerEvent::SettingsApplied { countdown_reset: true }));
}

#[tokio::test(start_paused = true)]
async fn test_sound_change_applies_to_next_completion() {
    let mut rig = Rig::new(Settings::default().with_focus_minutes(1));
    rig.session.start().unwrap();
    rig.run_for(30_500).await;

    rig.session
        .apply_settings(
            Settings::default()
                .with_focus_minutes(1)
                .with_alert_sound(AlertSound::Ding),
        )
        .unwrap();
    assert!(rig.session.state().is_running);

    rig.run_for(32_000).await;
    rig.run_for(2_000).await;

    let plays = rig.player.get_play_calls();
    assert_eq!(plays.len(), 3);
    assert!(plays.iter().all(|p| matches!(
        p,
        SoundSource::Asset { name, .. } if name == "ding"
    )));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_settings_leave_timer_untouched() {
    let mut rig = Rig::new(Settings::default());
    rig.session.start().unwrap();
    rig.run_for(1_500).await;

    assert!(rig
        .session
        .apply_settings(Settings::default().with_focus_minutes(0))
        .is_err());
    rig.run_for(1_000).await;

    assert_eq!(rig.session.settings(), &Settings::default());
    assert!(rig.session.state().is_running);
    assert_eq!(rig.session.state().remaining_seconds, 1498);
}

// ============================================================================
// Alert Cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_next_start_cancels_pending_repeats() {
    let mut rig = Rig::new(Settings::default().with_focus_minutes(1));
    rig.session.start().unwrap();
    rig.run_for(60_500).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(rig.player.play_count(), 1);

    rig.session.reset().unwrap();
    rig.session.start().unwrap();
    rig.pump();
    assert_eq!(rig.alerts.pending_repeats(), 0);

    tokio::time::sleep(Duration::from_millis(1_900)).await;
    assert_eq!(rig.player.play_count(), 1);
}

// ============================================================================
// Slow Notification Daemon
// ============================================================================

#[tokio::test]
async fn test_slow_notifier_does_not_stall_ticks() {
    let notifier = MockNotifier::granted();
    notifier.set_delay(Duration::from_millis(800));
    // Real time with 5 ms ticks: one minute of countdown takes about 300 ms
    let mut rig = Rig::build(
        Settings::default()
            .with_focus_minutes(1)
            .with_alert_sound(AlertSound::None),
        notifier,
        Duration::from_millis(5),
    );
    rig.session.start().unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while rig.completions().is_empty() {
            rig.run_for(5).await;
        }
    })
    .await
    .expect("session should complete");
    assert_eq!(rig.sink.last_title().as_deref(), Some(APP_NAME));

    // The notification is still being delivered while the next session counts down
    rig.session.reset().unwrap();
    rig.session.start().unwrap();
    rig.run_for(100).await;

    assert!(rig.session.state().remaining_seconds < 60);
    assert_eq!(rig.notifier.notification_count(), 0);

    rig.session.pause().unwrap();
    rig.run_for(1_200).await;
    assert_eq!(rig.notifier.notification_count(), 1);
}
