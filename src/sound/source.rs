//! Sound source resolution.
//!
//! Alert sounds are first looked up as audio assets in the assets
//! directory (`alert-<name>.mp3`). When the asset cannot be used the
//! player falls back to a synthesized tone.

use std::path::{Path, PathBuf};

use super::synth::Tone;
use crate::types::AlertSound;

/// Default directory holding alert assets.
pub const DEFAULT_ASSETS_DIR: &str = "sounds";

/// What to play for one alert.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSource {
    /// An audio file on disk.
    Asset {
        /// The alert sound name (e.g., "bell").
        name: String,
        /// The full path to the asset.
        path: PathBuf,
    },
    /// A tone generated at play time.
    Synthesized(Tone),
}

impl SoundSource {
    #[must_use]
    pub fn asset(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Asset {
            name: name.into(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn synthesized(tone: Tone) -> Self {
        Self::Synthesized(tone)
    }

    #[must_use]
    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset { .. })
    }

    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized(_))
    }

    /// Returns the file path if this is an asset.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Asset { path, .. } => Some(path),
            Self::Synthesized(_) => None,
        }
    }

    /// Returns the tone if this is synthesized.
    #[must_use]
    pub fn tone(&self) -> Option<&Tone> {
        match self {
            Self::Synthesized(tone) => Some(tone),
            Self::Asset { .. } => None,
        }
    }
}

/// Maps alert sounds to asset files under a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocator {
    dir: PathBuf,
}

impl AssetLocator {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the asset for `sound`, or `None` for silence.
    #[must_use]
    pub fn asset_path(&self, sound: AlertSound) -> Option<PathBuf> {
        if sound.is_silent() {
            return None;
        }
        Some(self.dir.join(format!("alert-{}.mp3", sound.as_str())))
    }

    /// Preferred source for `sound`. Existence is not checked here.
    #[must_use]
    pub fn source_for(&self, sound: AlertSound) -> Option<SoundSource> {
        self.asset_path(sound)
            .map(|path| SoundSource::asset(sound.as_str(), path))
    }

    /// Fallback source for `sound`.
    #[must_use]
    pub fn fallback_for(sound: AlertSound) -> Option<SoundSource> {
        Tone::for_sound(sound).map(SoundSource::Synthesized)
    }
}

impl Default for AssetLocator {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS_DIR)
    }
}
