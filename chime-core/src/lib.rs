#![cfg_attr(not(feature = "std"), no_std)]
//! chime Core — no_std-ready DSP primitives for the procedural game-audio engine.
//!
//! Features
//! - `std`      : (default) use the Rust standard library
//! - `no-std`   : build with `#![no_std]` and use `libm`/`micromath` math backends
//! - `fast-math`: enable a polynomial sine approximation
//!
//! Modules
//! - [`math`] : math backend, unit-interval helpers, silence snapping
//! - [`osc`]  : free-running oscillator (sine/triangle/square/sawtooth)
//! - [`env`]  : the fixed 10 ms linear-attack / exponential-decay tone envelope
//!
//! Design
//! - No heap allocations; pure sample-by-sample primitives
//! - Everything here is `Copy`, cheap to move, and safe on the audio thread

pub mod env;
pub mod math;
pub mod osc;

/// Commonly used types/functions for convenience:
pub mod prelude {
    pub use crate::env::{ToneEnv, ATTACK_S, DECAY_FLOOR};
    pub use crate::math::{clamp01, fast_sin, lerp, powf_pos, snap_silent, TAU};
    pub use crate::osc::{Osc, Waveform};
}

#[cfg(test)]
mod smoke {

    #[test]
    fn prelude_exists() {
        use crate::prelude::*;
        let mut o = Osc::new(440.0, Waveform::Sine);
        let _ = o.next(48_000.0);
        let mut e = ToneEnv::new(0.5, 0.1, 48_000.0);
        let _ = e.next();
        let _ = clamp01(1.2);
    }
}
