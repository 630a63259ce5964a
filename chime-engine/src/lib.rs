//! chime Engine — procedural game-audio: voices, catalog, scheduler,
//! ambient track, and realtime glue.
//!
//! Crate layout:
//! - [`voice`]    : `ToneSpec` and the live oscillator+envelope voice
//! - [`catalog`]  : the static effect-name → tone-sequence table
//! - [`sched`]    : clock-driven deferred tone scheduling
//! - [`ambient`]  : the LFO-modulated background drone session
//! - [`settings`] : the persisted preferences and the `SettingsStore` trait
//! - [`engine`]   : the engine owning all of the above plus the master mix
//! - [`player`]   : cpal output stream wrapper (feature `realtime`)
//!
//! Every sound is synthesized at runtime from the catalog's parametric tone
//! descriptions; there are no audio assets. The engine's public surface
//! never returns an error: playback is best-effort and every failure
//! degrades to silence with a logged warning.

pub mod ambient;
pub mod catalog;
pub mod engine;
pub mod sched;
pub mod settings;
pub mod voice;

#[cfg(feature = "realtime")]
pub mod player;

// Re-export some commonly used items to make downstream imports ergonomic.
pub use chime_core::osc::Waveform;
pub use engine::AudioEngine;
pub use settings::{JsonFileStore, MemStore, Settings, SettingsStore, StoreError};
pub use voice::ToneSpec;

#[cfg(feature = "realtime")]
pub use player::{Player, PlayerConfig};
