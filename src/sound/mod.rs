//! Sound playback for session alerts.
//!
//! - Asset playback (`alert-<name>.mp3` in the assets directory)
//! - Synthesized fallback tones
//! - Non-blocking playback on a dedicated audio thread
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ play_alert_sound │
//! └────────┬─────────┘
//!          │ AssetLocator
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundPlayer    │────▶│  alert-*.mp3     │
//! │                  │     ├──────────────────┤
//! │                  │────▶│  Synthesized     │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```

mod error;
mod player;
mod source;
pub mod synth;

pub use error::SoundError;
pub use player::{decode_asset, try_create_player, BoxedSource, RodioSoundPlayer};
pub use source::{AssetLocator, SoundSource, DEFAULT_ASSETS_DIR};
pub use synth::{Tone, ToneSource, Waveform};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::types::AlertSound;

/// Trait for sound playback implementations.
pub trait SoundPlayer: Send + Sync {
    /// Plays a sound from the given source without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be loaded or played.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if the audio system is available.
    fn is_available(&self) -> bool;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    fn enable(&self);

    fn disable(&self);
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_available(&self) -> bool {
        RodioSoundPlayer::is_available(self)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioSoundPlayer::enable(self)
    }

    fn disable(&self) {
        RodioSoundPlayer::disable(self)
    }
}

/// Player used when no output device could be opened. Plays nothing.
#[derive(Debug, Default)]
pub struct SilentSoundPlayer;

impl SoundPlayer for SilentSoundPlayer {
    fn play(&self, _source: &SoundSource) -> Result<(), SoundError> {
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }

    fn is_disabled(&self) -> bool {
        true
    }

    fn enable(&self) {}

    fn disable(&self) {}
}

/// Mock sound player for testing.
#[derive(Debug)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    available: AtomicBool,
    disabled: AtomicBool,
    should_fail: AtomicBool,
    assets_missing: AtomicBool,
}

impl Default for MockSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            play_calls: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            disabled: AtomicBool::new(false),
            should_fail: AtomicBool::new(false),
            assets_missing: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Makes every play fail with a playback error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Makes asset plays fail as if the file did not exist.
    pub fn set_assets_missing(&self, missing: bool) {
        self.assets_missing.store(missing, Ordering::SeqCst);
    }

    /// Number of sources that actually started playing.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.play_calls.lock().unwrap().clear();
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        if let SoundSource::Asset { path, .. } = source {
            if self.assets_missing.load(Ordering::SeqCst) {
                return Err(SoundError::FileNotFound(path.display().to_string()));
            }
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

/// Plays one instance of `sound`, falling back to its synthesized tone when
/// the asset cannot be loaded.
///
/// Never fails: errors are logged and the alert stays silent. Returns the
/// source that started playing, if any.
pub fn play_alert_sound(
    player: &dyn SoundPlayer,
    sound: AlertSound,
    assets: &AssetLocator,
) -> Option<SoundSource> {
    let preferred = assets.source_for(sound)?;

    let err = match player.play(&preferred) {
        Ok(()) => return Some(preferred),
        Err(e) => e,
    };

    if !err.should_fallback_to_synth() {
        warn!("Failed to play alert sound '{}': {}", sound.as_str(), err);
        return None;
    }

    debug!("Alert asset unavailable ({}), using synthesized tone", err);
    let fallback = AssetLocator::fallback_for(sound)?;
    match player.play(&fallback) {
        Ok(()) => Some(fallback),
        Err(e) => {
            warn!("Failed to play synthesized alert tone: {}", e);
            None
        }
    }
}
