//! The generative ambient track: a persistent LFO-modulated drone texture.
//!
//! One session is three long-running generators wired as a unit:
//! - a low sine drone (60 Hz) at low amplitude,
//! - a higher triangle decoration (1200 Hz) at lower amplitude,
//! - a slow sine modulator (0.5 Hz) into the decoration's frequency with
//!   ±50 Hz depth, giving the layer its slow pitch-wobble.
//!
//! All three start together, advance together per sample, and stop together
//! when the session is dropped; there is no scheduled stop time. The engine
//! guarantees at most one live session at any instant.

use chime_core::osc::{Osc, Waveform};

const DRONE_HZ: f32 = 60.0;
const DRONE_GAIN: f32 = 0.1;
const DECOR_HZ: f32 = 1200.0;
const DECOR_GAIN: f32 = 0.05;
const LFO_HZ: f32 = 0.5;
const LFO_DEPTH_HZ: f32 = 50.0;

/// One live background-music session. Construct to start; drop to stop.
#[derive(Copy, Clone, Debug)]
pub struct AmbientSession {
    drone: Osc,
    decor: Osc,
    lfo: Osc,
}

impl AmbientSession {
    pub fn new() -> Self {
        Self {
            drone: Osc::new(DRONE_HZ, Waveform::Sine),
            decor: Osc::new(DECOR_HZ, Waveform::Triangle),
            lfo: Osc::new(LFO_HZ, Waveform::Sine),
        }
    }

    /// Next mono sample, pre master music gain.
    #[inline]
    pub fn next(&mut self, sr: f32) -> f32 {
        // modulator into the decoration's frequency input
        let wobble = self.lfo.next(sr) * LFO_DEPTH_HZ;
        self.decor.set_freq(DECOR_HZ + wobble);
        self.drone.next(sr) * DRONE_GAIN + self.decor.next(sr) * DECOR_GAIN
    }
}

impl Default for AmbientSession {
    fn default() -> Self {
        Self::new()
    }
}
