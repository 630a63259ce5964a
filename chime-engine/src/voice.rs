//! Tone voices: one discrete synthesized blip from trigger to silence.
//!
//! A [`ToneVoice`] is the live counterpart of a [`ToneSpec`]: a free-running
//! oscillator paired with the fixed attack/decay envelope. The mixer owns
//! each voice for exactly as long as the envelope is audible and drops it
//! afterwards, so generator lifetime is scoped to the tone itself.

use chime_core::env::ToneEnv;
use chime_core::math::clamp01;
use chime_core::osc::{Osc, Waveform};

/// Parametric description of one tone. Immutable value type; no identity
/// beyond its fields.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ToneSpec {
    /// Oscillator frequency in Hz (positive).
    pub freq_hz: f32,
    /// Total tone length in seconds (positive).
    pub duration_s: f32,
    /// Waveform shape.
    pub wave: Waveform,
    /// Peak amplitude in [0,1], before the effects-volume scale.
    pub peak: f32,
}

impl ToneSpec {
    pub const fn new(freq_hz: f32, duration_s: f32, wave: Waveform, peak: f32) -> Self {
        Self { freq_hz, duration_s, wave, peak }
    }
}

/// A live tone: oscillator + envelope, born at trigger, dead at the
/// envelope floor.
#[derive(Copy, Clone, Debug)]
pub struct ToneVoice {
    osc: Osc,
    env: ToneEnv,
}

impl ToneVoice {
    /// Realize a spec at the given category volume (read at realization
    /// time, per the lazy effects-volume rule). Returns `None` (and warns)
    /// for specs that cannot form a valid generator; sound is best-effort
    /// and a bad spec must never take the caller down.
    pub fn spawn(spec: &ToneSpec, category_volume: f32, sr: f32) -> Option<Self> {
        if !spec.freq_hz.is_finite() || spec.freq_hz <= 0.0 {
            log::warn!("tone rejected: invalid frequency {} Hz", spec.freq_hz);
            return None;
        }
        if !spec.duration_s.is_finite() || spec.duration_s <= 0.0 {
            log::warn!("tone rejected: invalid duration {} s", spec.duration_s);
            return None;
        }
        let peak = clamp01(spec.peak) * clamp01(category_volume);
        Some(Self {
            osc: Osc::new(spec.freq_hz, spec.wave),
            env: ToneEnv::new(peak, spec.duration_s, sr),
        })
    }

    /// Next output sample.
    #[inline]
    pub fn next(&mut self, sr: f32) -> f32 {
        self.osc.next(sr) * self.env.next()
    }

    /// True once the envelope has decayed to silence; the voice can be dropped.
    #[inline]
    pub fn finished(&self) -> bool {
        self.env.finished()
    }
}
