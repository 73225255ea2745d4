//! Session-complete side effects.
//!
//! On `SessionComplete` the pipeline restores the idle title, plays the
//! configured alert sound three times (0 ms, 750 ms, 1500 ms) and shows a
//! desktop notification if permission was granted. The notification is
//! delivered from the blocking pool. Each step is independent: a failing or
//! disabled step never prevents the others.

pub mod schedule;

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

pub use schedule::{AlertSchedule, REPEAT_OFFSETS};

use crate::notification::{NotificationContent, Notifier};
use crate::presentation::PresentationSink;
use crate::sound::{play_alert_sound, AssetLocator, SoundPlayer, SoundSource};
use crate::timer::TimerEvent;
use crate::types::{AlertSound, Mode};

/// Reacts to timer events with the completion side effects.
pub struct AlertPipeline {
    sink: Arc<dyn PresentationSink>,
    player: Arc<dyn SoundPlayer>,
    notifier: Arc<dyn Notifier>,
    assets: AssetLocator,
    schedule: AlertSchedule,
}

impl AlertPipeline {
    pub fn new(
        sink: Arc<dyn PresentationSink>,
        player: Arc<dyn SoundPlayer>,
        notifier: Arc<dyn Notifier>,
        assets: AssetLocator,
    ) -> Self {
        Self {
            sink,
            player,
            notifier,
            assets,
            schedule: AlertSchedule::new(),
        }
    }

    /// Dispatches a timer event. `sound` is the currently applied alert sound.
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle_event(&mut self, event: &TimerEvent, sound: AlertSound) {
        match event {
            TimerEvent::SessionComplete { mode, session_id } => {
                self.on_session_complete(*mode, *session_id, sound);
            }
            TimerEvent::Started { .. } => self.schedule.cancel(),
            _ => {}
        }
    }

    /// Runs the three completion steps.
    pub fn on_session_complete(&mut self, mode: Mode, session_id: Uuid, sound: AlertSound) {
        self.sink.restore_title();
        self.schedule_alert(session_id, sound);
        self.notify(mode, session_id);
    }

    /// Plays `sound` once, immediately (settings preview).
    pub fn preview(&self, sound: AlertSound) -> Option<SoundSource> {
        play_alert_sound(self.player.as_ref(), sound, &self.assets)
    }

    /// Cancels alert repeats that have not played yet.
    pub fn cancel_pending(&mut self) {
        self.schedule.cancel();
    }

    pub fn pending_repeats(&self) -> usize {
        self.schedule.pending()
    }

    pub fn assets(&self) -> &AssetLocator {
        &self.assets
    }

    fn schedule_alert(&mut self, session_id: Uuid, sound: AlertSound) {
        if sound.is_silent() {
            debug!(session = %session_id, "Alert sound is off");
            return;
        }

        let player = Arc::clone(&self.player);
        let assets = self.assets.clone();
        self.schedule.schedule(&REPEAT_OFFSETS, move |repeat| {
            match play_alert_sound(player.as_ref(), sound, &assets) {
                Some(source) if source.is_synthesized() => {
                    debug!(session = %session_id, repeat, "Alert played (synthesized)")
                }
                Some(_) => debug!(session = %session_id, repeat, "Alert played"),
                None => debug!(session = %session_id, repeat, "Alert skipped"),
            }
        });
    }

    /// Shows the notification on the blocking pool. Delivery talks to the
    /// notification daemon synchronously and must not stall the event loop.
    fn notify(&self, mode: Mode, session_id: Uuid) {
        if !self.notifier.permission().is_granted() {
            debug!(session = %session_id, "Notification permission not granted");
            return;
        }
        let notifier = Arc::clone(&self.notifier);
        let content = NotificationContent::session_complete(mode);
        let delivery = tokio::task::spawn_blocking(move || notifier.notify(&content));
        tokio::spawn(async move {
            match delivery.await {
                Ok(Ok(())) => debug!(session = %session_id, "Notification shown"),
                Ok(Err(e)) => warn!(session = %session_id, "Failed to show notification: {}", e),
                Err(e) => warn!(session = %session_id, "Notification task failed: {}", e),
            }
        });
    }
}
