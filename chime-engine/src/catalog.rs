//! The effect catalog: a static, read-only mapping from effect name to an
//! ordered, time-offset tone sequence.
//!
//! Every named sound the engine can make lives in this table; playback is a
//! single data-driven dispatch instead of one code path per effect. Offsets
//! are relative to the trigger instant, non-decreasing within a sequence
//! (simultaneous tones are allowed).

use crate::voice::ToneSpec;
use chime_core::osc::Waveform;

/// One catalog entry: a tone and its offset from the effect trigger.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimedTone {
    /// Offset from trigger time, milliseconds.
    pub at_ms: u32,
    pub tone: ToneSpec,
}

const fn tt(at_ms: u32, freq_hz: f32, duration_s: f32, wave: Waveform, peak: f32) -> TimedTone {
    TimedTone { at_ms, tone: ToneSpec::new(freq_hz, duration_s, wave, peak) }
}

use chime_core::osc::Waveform::{Sawtooth, Sine, Square, Triangle};

/// Crisp two-step "ding".
static EAT: [TimedTone; 2] = [
    tt(0, 800.0, 0.10, Sine, 0.4),
    tt(50, 1200.0, 0.05, Sine, 0.3),
];

static SPECIAL_FOOD: [TimedTone; 3] = [
    tt(0, 600.0, 0.10, Triangle, 0.4),
    tt(50, 900.0, 0.10, Sine, 0.3),
    tt(100, 1200.0, 0.10, Square, 0.2),
];

/// Descending seven-note run; shared by `collision` and `gameOver`.
static GAME_OVER: [TimedTone; 7] = [
    tt(0, 523.0, 0.20, Sawtooth, 0.4),
    tt(100, 494.0, 0.20, Sawtooth, 0.4),
    tt(200, 440.0, 0.20, Sawtooth, 0.4),
    tt(300, 392.0, 0.20, Sawtooth, 0.4),
    tt(400, 349.0, 0.20, Sawtooth, 0.4),
    tt(500, 330.0, 0.20, Sawtooth, 0.4),
    tt(600, 294.0, 0.20, Sawtooth, 0.4),
];

static CLICK: [TimedTone; 1] = [tt(0, 1000.0, 0.05, Square, 0.2)];

// C4 E4 G4 C5
static GAME_START: [TimedTone; 4] = [
    tt(0, 262.0, 0.15, Triangle, 0.3),
    tt(80, 330.0, 0.15, Triangle, 0.3),
    tt(160, 392.0, 0.15, Triangle, 0.3),
    tt(240, 523.0, 0.15, Triangle, 0.3),
];

static PAUSE: [TimedTone; 2] = [
    tt(0, 440.0, 0.10, Sine, 0.3),
    tt(100, 330.0, 0.10, Sine, 0.3),
];

static RESUME: [TimedTone; 2] = [
    tt(0, 330.0, 0.10, Sine, 0.3),
    tt(100, 440.0, 0.10, Sine, 0.3),
];

// C5 E5 G5 C6 E6
static ACHIEVEMENT: [TimedTone; 5] = [
    tt(0, 523.0, 0.30, Sine, 0.5),
    tt(150, 659.0, 0.30, Sine, 0.5),
    tt(300, 784.0, 0.30, Sine, 0.5),
    tt(450, 1047.0, 0.30, Sine, 0.5),
    tt(600, 1319.0, 0.30, Sine, 0.5),
];

static SKIN_UNLOCK: [TimedTone; 3] = [
    tt(0, 440.0, 0.20, Triangle, 0.4),
    tt(100, 554.0, 0.20, Sine, 0.4),
    tt(200, 659.0, 0.30, Triangle, 0.5),
];

// C5 E5 G5 C6
static MILESTONE: [TimedTone; 4] = [
    tt(0, 523.0, 0.20, Sine, 0.4),
    tt(100, 659.0, 0.20, Sine, 0.4),
    tt(200, 784.0, 0.20, Sine, 0.4),
    tt(300, 1047.0, 0.20, Sine, 0.4),
];

static SCORE_HUNDRED: [TimedTone; 1] = [tt(0, 1500.0, 0.20, Sine, 0.4)];

static SCORE_DEFAULT: [TimedTone; 1] = [tt(0, 1200.0, 0.10, Triangle, 0.3)];

static CATALOG: &[(&str, &[TimedTone])] = &[
    ("eat", &EAT),
    ("specialFood", &SPECIAL_FOOD),
    ("collision", &GAME_OVER),
    ("gameOver", &GAME_OVER),
    ("click", &CLICK),
    ("gameStart", &GAME_START),
    ("pause", &PAUSE),
    ("resume", &RESUME),
    ("achievement", &ACHIEVEMENT),
    ("skinUnlock", &SKIN_UNLOCK),
];

/// Look up a named effect sequence. `None` for unregistered names; the
/// caller decides how loudly to complain.
pub fn lookup(name: &str) -> Option<&'static [TimedTone]> {
    CATALOG.iter().find(|(n, _)| *n == name).map(|(_, seq)| *seq)
}

/// Names of all registered effects, catalog order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(n, _)| *n)
}

/// Score-dependent dispatch. Order is load-bearing: the 1000-multiple check
/// runs before the 100-multiple check, so every milestone score routes to
/// the milestone run even though it is also a multiple of 100. Zero is not
/// a positive multiple of anything and gets the default blip.
pub fn score_sequence(score: u32) -> &'static [TimedTone] {
    if score > 0 && score % 1000 == 0 {
        &MILESTONE
    } else if score > 0 && score % 100 == 0 {
        &SCORE_HUNDRED
    } else {
        &SCORE_DEFAULT
    }
}
