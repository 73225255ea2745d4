//! Synthesized alert tones.
//!
//! Used when an alert asset cannot be loaded. Each tone is a single
//! oscillator whose gain decays exponentially from its peak to
//! [`DECAY_FLOOR`] over the tone's duration.

use std::f32::consts::{PI, TAU};
use std::time::Duration;

use rodio::Source;

use crate::types::AlertSound;

/// Sample rate of synthesized tones.
pub const SAMPLE_RATE: u32 = 44_100;

/// Gain reached at the end of the decay envelope.
pub const DECAY_FLOOR: f32 = 0.001;

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

impl Waveform {
    /// Sample of a unit-amplitude wave at `phase` in `[0, 1)`.
    fn sample(&self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            // Starts at 0 and rises, in step with the sine
            Waveform::Triangle => (2.0 / PI) * (TAU * phase).sin().asin(),
        }
    }
}

/// Parameters of a synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Oscillator frequency in Hz
    pub frequency_hz: f32,
    /// Gain at the start of the envelope
    pub peak_gain: f32,
    /// Length of the decay (and of the tone)
    pub decay: Duration,
}

impl Tone {
    /// Bell: sine at C5.
    pub const BELL: Tone = Tone {
        waveform: Waveform::Sine,
        frequency_hz: 523.25,
        peak_gain: 0.5,
        decay: Duration::from_millis(2000),
    };

    /// Chime: triangle at E5.
    pub const CHIME: Tone = Tone {
        waveform: Waveform::Triangle,
        frequency_hz: 659.25,
        peak_gain: 0.3,
        decay: Duration::from_millis(1500),
    };

    /// Ding: sine at A5.
    pub const DING: Tone = Tone {
        waveform: Waveform::Sine,
        frequency_hz: 880.0,
        peak_gain: 0.5,
        decay: Duration::from_millis(1000),
    };

    /// Returns the fallback tone for an alert sound, or `None` for silence.
    pub fn for_sound(sound: AlertSound) -> Option<Tone> {
        match sound {
            AlertSound::Bell => Some(Self::BELL),
            AlertSound::Chime => Some(Self::CHIME),
            AlertSound::Ding => Some(Self::DING),
            AlertSound::None => None,
        }
    }

    /// Envelope gain `t` into the tone.
    pub fn gain_at(&self, t: Duration) -> f32 {
        let progress = (t.as_secs_f32() / self.decay.as_secs_f32()).clamp(0.0, 1.0);
        self.peak_gain * (DECAY_FLOOR / self.peak_gain).powf(progress)
    }

    /// Number of samples the tone spans at [`SAMPLE_RATE`].
    pub fn sample_count(&self) -> usize {
        (self.decay.as_secs_f64() * f64::from(SAMPLE_RATE)).round() as usize
    }

    /// Returns a playable source for this tone.
    pub fn source(&self) -> ToneSource {
        ToneSource::new(*self)
    }
}

/// A finite, mono `rodio::Source` rendering a [`Tone`].
#[derive(Debug, Clone)]
pub struct ToneSource {
    tone: Tone,
    position: usize,
    total: usize,
    // Per-sample multiplier of the exponential envelope
    decay_step: f32,
    gain: f32,
}

impl ToneSource {
    pub fn new(tone: Tone) -> Self {
        let total = tone.sample_count();
        let decay_step = (DECAY_FLOOR / tone.peak_gain).powf(1.0 / total.max(1) as f32);
        Self {
            tone,
            position: 0,
            total,
            decay_step,
            gain: tone.peak_gain,
        }
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total {
            return None;
        }
        let t = self.position as f32 / SAMPLE_RATE as f32;
        let phase = (t * self.tone.frequency_hz).fract();
        let sample = self.tone.waveform.sample(phase) * self.gain;

        self.position += 1;
        self.gain *= self.decay_step;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total.saturating_sub(self.position))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.tone.decay)
    }
}

// ============================================================================
// Tests
// ============================================================================
