//! The fixed attack/decay amplitude envelope used by every synthesized tone.
//!
//! Shape (reproduced exactly; this is what keeps tone onsets/offsets free of
//! clicks and pops):
//! - **linear** ramp from 0 to `peak` over a fixed 10 ms attack,
//! - then **exponential** decay toward a near-zero floor (`1e-3`, not exactly
//!   zero, to satisfy the exponential-ramp precondition), reaching the floor
//!   at `duration` seconds from tone start.
//!
//! The envelope is `no_std` friendly and allocation-free. `next()` advances
//! one sample; once the floor is reached the envelope reports `finished()`
//! and outputs exact zero from then on.

use crate::math::{clamp01, powf_pos};

/// Fixed attack length in seconds.
pub const ATTACK_S: f32 = 0.010;

/// Near-zero decay target. Exponential decay cannot reach exact zero.
pub const DECAY_FLOOR: f32 = 1.0e-3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Attack,
    Decay,
    Done,
}

/// One-shot attack/decay envelope. Construct per tone; not retriggerable.
#[derive(Copy, Clone, Debug)]
pub struct ToneEnv {
    peak: f32,
    env: f32,
    stage: Stage,
    // cached per-sample steps
    a_inc: f32,
    d_ratio: f32,
}

impl ToneEnv {
    /// `peak` is the target amplitude in [0,1]; `duration_s` is the total
    /// tone length (attack included). A peak at or below the decay floor
    /// produces an envelope that is born finished (silence, not an error).
    #[inline]
    pub fn new(peak: f32, duration_s: f32, sr: f32) -> Self {
        let sr = sr.max(1.0);
        let peak = clamp01(peak);
        if peak <= DECAY_FLOOR {
            return Self { peak, env: 0.0, stage: Stage::Done, a_inc: 0.0, d_ratio: 0.0 };
        }

        let attack_samples = (ATTACK_S * sr).max(1.0);
        // Degenerate durations (<= attack) still get one sample of decay.
        let decay_samples = ((duration_s - ATTACK_S) * sr).max(1.0);
        Self {
            peak,
            env: 0.0,
            stage: Stage::Attack,
            a_inc: peak / attack_samples,
            d_ratio: powf_pos(DECAY_FLOOR / peak, 1.0 / decay_samples),
        }
    }

    /// Advance one sample and return the envelope value in [0, peak].
    #[inline]
    pub fn next(&mut self) -> f32 {
        match self.stage {
            Stage::Attack => {
                self.env += self.a_inc;
                if self.env >= self.peak {
                    self.env = self.peak;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                self.env *= self.d_ratio;
                if self.env <= DECAY_FLOOR {
                    self.env = 0.0;
                    self.stage = Stage::Done;
                }
            }
            Stage::Done => {
                self.env = 0.0;
            }
        }
        self.env
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.stage == Stage::Done
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48_000.0;

    #[test]
    fn attack_reaches_peak_at_10ms() {
        let mut e = ToneEnv::new(0.4, 0.2, SR);
        let attack_samples = (ATTACK_S * SR) as usize;
        let mut v = 0.0;
        for _ in 0..attack_samples {
            v = e.next();
        }
        assert!((v - 0.4).abs() < 1e-3, "v={v}");
        assert!(!e.finished());
    }

    #[test]
    fn decay_hits_floor_at_duration() {
        let dur = 0.1;
        let mut e = ToneEnv::new(0.5, dur, SR);
        let total = (dur * SR) as usize;
        for _ in 0..total {
            e.next();
        }
        // Within a couple of samples of the declared duration the envelope
        // must have snapped to exact zero.
        e.next();
        e.next();
        assert!(e.finished());
        assert_eq!(e.value(), 0.0);
    }

    #[test]
    fn envelope_is_monotone_after_peak() {
        let mut e = ToneEnv::new(1.0, 0.05, SR);
        // a couple of samples past the nominal attack, so the peak clamp
        // has definitely happened before we start measuring
        let attack_samples = (ATTACK_S * SR) as usize + 2;
        for _ in 0..attack_samples {
            e.next();
        }
        let mut prev = e.value();
        while !e.finished() {
            let v = e.next();
            assert!(v <= prev + 1e-6);
            prev = v;
        }
    }

    #[test]
    fn zero_peak_is_born_finished() {
        let mut e = ToneEnv::new(0.0, 0.1, SR);
        assert!(e.finished());
        assert_eq!(e.next(), 0.0);
    }

    #[test]
    fn degenerate_duration_does_not_panic() {
        let mut e = ToneEnv::new(0.5, 0.001, SR);
        for _ in 0..64 {
            e.next();
        }
        assert!(e.finished());
    }
}
