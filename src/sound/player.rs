//! Sound player implementation using rodio.
//!
//! The rodio output stream cannot leave the thread that opened it, so the
//! player owns a dedicated audio thread and hands it ready-to-play sources
//! over a channel. Assets are opened and decoded on the caller's side, which
//! lets a missing or corrupt asset be reported synchronously.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, unbounded, Sender};
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;

/// A decoded source ready for the output stream.
pub type BoxedSource = Box<dyn Source<Item = f32> + Send>;

/// A sound player that uses rodio for audio playback.
///
/// Playback is non-blocking; sounds keep playing after `play` returns and
/// overlapping sounds are mixed.
pub struct RodioSoundPlayer {
    queue: Sender<BoxedSource>,
    disabled: AtomicBool,
}

impl RodioSoundPlayer {
    /// Opens the default output device on a new audio thread.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (queue, rx) = unbounded::<BoxedSource>();
        let (ready_tx, ready_rx) = bounded::<Result<(), String>>(1);

        thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => {
                        let _ = ready_tx.send(Ok(()));
                        pair
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };

                for source in rx.iter() {
                    match Sink::try_new(&handle) {
                        Ok(sink) => {
                            sink.append(source);
                            sink.detach();
                        }
                        Err(e) => warn!("Failed to open audio sink: {}", e),
                    }
                }
                debug!("Audio thread exiting");
            })
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(SoundError::DeviceNotAvailable(e)),
            Err(_) => {
                return Err(SoundError::DeviceNotAvailable(
                    "audio thread exited during startup".to_string(),
                ))
            }
        }

        debug!("Audio output stream initialized");

        Ok(Self {
            queue,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Starts playing `source` in the background.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` or `DecodeError` when an asset cannot be
    /// loaded, and `StreamError` if the audio thread is gone.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.is_disabled() {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        let decoded: BoxedSource = match source {
            SoundSource::Asset { name, path } => {
                debug!("Playing asset '{}' from {}", name, path.display());
                decode_asset(path)?
            }
            SoundSource::Synthesized(tone) => {
                debug!("Playing synthesized {:.2} Hz tone", tone.frequency_hz);
                Box::new(tone.source())
            }
        };

        self.queue
            .send(decoded)
            .map_err(|_| SoundError::StreamError("audio thread stopped".to_string()))
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }

    /// Always true once constructed; the stream is opened in `new`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.is_disabled())
            .finish_non_exhaustive()
    }
}

/// Opens and decodes an audio asset.
pub fn decode_asset(path: &Path) -> Result<BoxedSource, SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    let decoder = Decoder::new(BufReader::new(file))
        .map_err(|e| SoundError::DecodeError(format!("{}: {}", path.display(), e)))?;

    Ok(Box::new(decoder.convert_samples::<f32>()))
}

/// Creates a sound player, returning None if audio is unavailable.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
