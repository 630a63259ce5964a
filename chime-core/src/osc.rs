//! Free-running tone generator.
//!
//! Zero-allocation, per-sample oscillator designed for realtime use. The
//! same core serves audio-rate tones and LFO-rate modulators; higher layers
//! wire instances together.
//!
//! Notes:
//! - Frequency is **Hz**; `next` expects the current **sample rate**.
//! - Waveforms are naive (not bandlimited): fine for short game blips and
//!   ambient drones, which is all this engine synthesizes.

use crate::math::{sin, TAU};

/// Oscillator waveform shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One sample of the given shape at `phase01` in [0,1). Output in [-1,1].
#[inline]
fn shape_sample(phase01: f32, wave: Waveform) -> f32 {
    match wave {
        Waveform::Sine => sin(TAU * phase01), // swap to math::fast_sin under `fast-math` if needed
        Waveform::Triangle => 4.0 * (phase01 - 0.5).abs() - 1.0,
        Waveform::Square => {
            if phase01 < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Sawtooth => 2.0 * phase01 - 1.0,
    }
}

/// Free-running oscillator with a stable [0,1) phase accumulator.
#[derive(Copy, Clone, Debug)]
pub struct Osc {
    phase: f32, // [0,1)
    freq: f32,  // Hz
    wave: Waveform,
}

impl Osc {
    #[inline]
    pub fn new(freq_hz: f32, wave: Waveform) -> Self {
        Self { phase: 0.0, freq: freq_hz.max(0.0), wave }
    }

    #[inline]
    pub fn set_freq(&mut self, hz: f32) {
        self.freq = hz.max(0.0);
    }

    #[inline]
    pub fn freq(&self) -> f32 {
        self.freq
    }

    #[inline]
    pub fn wave(&self) -> Waveform {
        self.wave
    }

    /// Advance one sample and return the oscillator sample in [-1,1].
    #[inline]
    pub fn next(&mut self, sr: f32) -> f32 {
        self.phase = (self.phase + self.freq / sr.max(1.0)) % 1.0;
        shape_sample(self.phase, self.wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_toggles_between_rails() {
        let mut o = Osc::new(100.0, Waveform::Square);
        let sr = 48_000.0;
        let mut seen_hi = false;
        let mut seen_lo = false;
        for _ in 0..(sr as usize / 100) {
            let s = o.next(sr);
            assert!(s == 1.0 || s == -1.0);
            if s > 0.0 { seen_hi = true } else { seen_lo = true }
        }
        assert!(seen_hi && seen_lo);
    }

    #[test]
    fn triangle_stays_bounded() {
        let mut o = Osc::new(440.0, Waveform::Triangle);
        for _ in 0..4800 {
            let s = o.next(48_000.0);
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn sine_period_matches_freq() {
        // A 1 kHz sine at 48 kHz crosses zero upward once per 48 samples.
        let mut o = Osc::new(1000.0, Waveform::Sine);
        let sr = 48_000.0;
        let mut prev = o.next(sr);
        let mut crossings = 0;
        for _ in 0..(sr as usize) {
            let s = o.next(sr);
            if prev < 0.0 && s >= 0.0 {
                crossings += 1;
            }
            prev = s;
        }
        assert!((995..=1005).contains(&crossings), "crossings={crossings}");
    }

    #[test]
    fn negative_freq_is_clamped() {
        let mut o = Osc::new(-50.0, Waveform::Sine);
        assert_eq!(o.freq(), 0.0);
        // Phase never advances; output stays at sin(0) = 0.
        for _ in 0..16 {
            assert_eq!(o.next(48_000.0), 0.0);
        }
    }
}
