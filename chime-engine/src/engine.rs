//! The audio engine: owns the master mix, the settings, the scheduler, the
//! live voices, and the (at most one) ambient session.
//!
//! One engine per host process, explicitly owned and passed around — there
//! is no global instance. Every public entry point is a fast, non-blocking
//! registration of future work; actual sound is realized sample by sample
//! as the host pulls [`AudioEngine::next`] from its output callback (or a
//! test loop, which doubles as a virtual clock).
//!
//! Nothing here returns an error to the caller. Audio is a non-critical
//! enhancement; every failure degrades to "no sound produced" plus a
//! `log::warn!`.

use crate::ambient::AmbientSession;
use crate::catalog::{self, TimedTone};
use crate::sched::Scheduler;
use crate::settings::{Settings, SettingsStore};
use crate::voice::ToneVoice;
use chime_core::math::clamp01;

/// Headroom for concurrent one-shot voices before the mixer reallocates.
const VOICE_CAPACITY: usize = 32;

pub struct AudioEngine<S: SettingsStore> {
    sr: f32,
    /// Samples rendered since construction; the scheduling clock.
    clock: u64,
    settings: Settings,
    store: S,
    sched: Scheduler,
    voices: Vec<ToneVoice>,
    ambient: Option<AmbientSession>,
}

impl<S: SettingsStore> AudioEngine<S> {
    /// Build an engine at the given output sample rate, loading the
    /// persisted settings once. A failing load is a warning, not an error;
    /// defaults apply.
    pub fn new(sr: f32, store: S) -> Self {
        let settings = match store.load() {
            Ok(s) => s.clamped(),
            Err(e) => {
                log::warn!("failed to load audio settings, using defaults: {e}");
                Settings::default()
            }
        };
        Self {
            sr: sr.max(1.0),
            clock: 0,
            settings,
            store,
            sched: Scheduler::new(),
            voices: Vec::with_capacity(VOICE_CAPACITY),
            ambient: None,
        }
    }

    // ------------------------------- trigger surface ------------------------------

    /// Play a named effect from the catalog. Unknown names warn and stay
    /// silent; with effects disabled nothing is scheduled at all.
    pub fn play_sound(&mut self, name: &str) {
        match catalog::lookup(name) {
            Some(seq) => self.schedule(seq),
            None => log::warn!("unknown sound effect: {name:?}"),
        }
    }

    /// Play the score effect for the given score value (milestone run for
    /// positive multiples of 1000, single high blip for positive multiples
    /// of 100, default blip otherwise).
    pub fn play_score(&mut self, score: u32) {
        self.schedule(catalog::score_sequence(score));
    }

    fn schedule(&mut self, seq: &[TimedTone]) {
        if !self.settings.effects_enabled {
            return;
        }
        for t in seq {
            let offset = (f64::from(t.at_ms) * f64::from(self.sr) / 1000.0).round() as u64;
            self.sched.push(self.clock + offset, t.tone);
        }
    }

    // ------------------------------- ambient track --------------------------------

    /// Start the ambient track. No-op while music is disabled. If a session
    /// is already running it is stopped first, so two starts in a row leave
    /// exactly one live session.
    pub fn start_bgm(&mut self) {
        if !self.settings.music_enabled {
            return;
        }
        self.stop_bgm();
        self.ambient = Some(AmbientSession::new());
    }

    /// Stop the ambient track. Always safe to call, running or not.
    pub fn stop_bgm(&mut self) {
        // dropping the session stops all three generators as a unit
        self.ambient = None;
    }

    pub fn toggle_bgm(&mut self) {
        let enabled = !self.settings.music_enabled;
        self.set_bgm_enabled(enabled);
    }

    pub fn set_bgm_enabled(&mut self, enabled: bool) {
        self.settings.music_enabled = enabled;
        if enabled {
            self.start_bgm();
        } else {
            self.stop_bgm();
        }
        self.persist();
    }

    // -------------------------------- sfx switches --------------------------------

    pub fn toggle_sfx(&mut self) {
        let enabled = !self.settings.effects_enabled;
        self.set_sfx_enabled(enabled);
    }

    pub fn set_sfx_enabled(&mut self, enabled: bool) {
        self.settings.effects_enabled = enabled;
        self.persist();
    }

    // ---------------------------------- volumes -----------------------------------

    /// Set the music volume, clamped to [0,1]. Applied immediately at the
    /// ambient mix point.
    pub fn set_bgm_volume(&mut self, volume: f32) {
        self.settings.music_volume = clamp01(volume);
        self.persist();
    }

    /// Set the effects volume, clamped to [0,1]. Applied lazily, per tone,
    /// when each voice is realized.
    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.settings.effects_volume = clamp01(volume);
        self.persist();
    }

    /// A copy of the current settings snapshot.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            log::warn!("failed to persist audio settings: {e}");
        }
    }

    // --------------------------------- render path --------------------------------

    /// Produce one mono output sample and advance the clock.
    pub fn next(&mut self) -> f32 {
        self.clock += 1;

        // realize tones that have come due
        while let Some(due) = self.sched.pop_due(self.clock) {
            if !self.settings.effects_enabled {
                // disabled between trigger and fire: degrade to silence
                continue;
            }
            if let Some(v) = ToneVoice::spawn(&due.spec, self.settings.effects_volume, self.sr) {
                self.voices.push(v);
            }
        }

        let mut s = 0.0;
        for v in self.voices.iter_mut() {
            s += v.next(self.sr);
        }
        self.voices.retain(|v| !v.finished());

        if let Some(a) = self.ambient.as_mut() {
            // master music gain reads the live setting every sample
            s += a.next(self.sr) * self.settings.music_volume;
        }

        s.clamp(-1.0, 1.0)
    }

    /// Fill a mono buffer; convenience for block-based hosts.
    pub fn render(&mut self, out: &mut [f32]) {
        for o in out.iter_mut() {
            *o = self.next();
        }
    }

    // -------------------------------- introspection -------------------------------

    pub fn sample_rate(&self) -> f32 {
        self.sr
    }

    /// Samples rendered since construction.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Scheduled-but-not-yet-fired tone events.
    pub fn pending_tones(&self) -> usize {
        self.sched.len()
    }

    /// Currently sounding one-shot voices.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Whether an ambient session is live.
    pub fn bgm_running(&self) -> bool {
        self.ambient.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemStore;

    const SR: f32 = 48_000.0;

    fn engine() -> AudioEngine<MemStore> {
        AudioEngine::new(SR, MemStore::new())
    }

    #[test]
    fn eat_schedules_two_events() {
        let mut e = engine();
        e.play_sound("eat");
        assert_eq!(e.pending_tones(), 2);
    }

    #[test]
    fn unknown_effect_schedules_nothing() {
        let mut e = engine();
        e.play_sound("doesNotExist");
        assert_eq!(e.pending_tones(), 0);
    }

    #[test]
    fn disabled_effects_schedule_nothing() {
        let mut e = engine();
        e.set_sfx_enabled(false);
        e.play_sound("eat");
        e.play_score(1000);
        assert_eq!(e.pending_tones(), 0);
    }

    #[test]
    fn tones_fire_at_their_offsets() {
        let mut e = engine();
        e.play_sound("eat");
        // first tone is due on the very next sample
        e.next();
        assert_eq!(e.active_voices(), 1);
        assert_eq!(e.pending_tones(), 1);
        // advance to just past 50 ms
        for _ in 0..(0.051 * SR) as usize {
            e.next();
        }
        assert_eq!(e.pending_tones(), 0);
        assert_eq!(e.active_voices(), 2);
    }

    #[test]
    fn voices_are_dropped_after_their_duration() {
        let mut e = engine();
        e.play_sound("click"); // single 50 ms tone
        for _ in 0..(0.1 * SR) as usize {
            e.next();
        }
        assert_eq!(e.active_voices(), 0);
    }

    #[test]
    fn render_produces_audible_output_for_a_tone() {
        let mut e = engine();
        e.play_sound("click");
        let mut buf = [0.0_f32; 1024];
        e.render(&mut buf);
        assert!(buf.iter().any(|s| s.abs() > 1e-3));
    }

    #[test]
    fn double_start_keeps_one_session() {
        let mut e = engine();
        e.start_bgm();
        assert!(e.bgm_running());
        e.start_bgm();
        assert!(e.bgm_running());
        // ambient renders from a fresh session: still exactly one layer mix,
        // peak bounded by the session gains times music volume
        let mut peak = 0.0_f32;
        for _ in 0..4800 {
            peak = peak.max(e.next().abs());
        }
        assert!(peak <= 0.15 * e.settings().music_volume + 1e-3);
    }

    #[test]
    fn stop_when_stopped_is_a_noop() {
        let mut e = engine();
        assert!(!e.bgm_running());
        e.stop_bgm();
        e.stop_bgm();
        assert!(!e.bgm_running());
    }

    #[test]
    fn start_is_a_noop_when_music_disabled() {
        let mut e = engine();
        e.set_bgm_enabled(false);
        e.start_bgm();
        assert!(!e.bgm_running());
    }

    #[test]
    fn toggle_bgm_starts_and_stops() {
        let mut e = engine();
        e.set_bgm_enabled(false);
        e.toggle_bgm();
        assert!(e.settings().music_enabled);
        assert!(e.bgm_running());
        e.toggle_bgm();
        assert!(!e.settings().music_enabled);
        assert!(!e.bgm_running());
    }

    #[test]
    fn volume_setters_clamp() {
        let mut e = engine();
        e.set_bgm_volume(2.5);
        e.set_sfx_volume(-0.5);
        assert_eq!(e.settings().music_volume, 1.0);
        assert_eq!(e.settings().effects_volume, 0.0);
        // repeated identical sets are idempotent
        e.set_bgm_volume(2.5);
        assert_eq!(e.settings().music_volume, 1.0);
    }

    #[test]
    fn failing_store_never_reaches_the_caller() {
        let store = MemStore::new();
        store.set_failing(true);
        let mut e = AudioEngine::new(SR, store);
        // load failed: defaults apply
        assert_eq!(e.settings(), Settings::default());
        // save fails on every setter; in-memory state stays authoritative
        e.set_bgm_volume(0.9);
        assert_eq!(e.settings().music_volume, 0.9);
    }

    #[test]
    fn disable_between_trigger_and_fire_goes_silent() {
        let mut e = engine();
        e.play_sound("eat");
        assert_eq!(e.pending_tones(), 2);
        e.set_sfx_enabled(false);
        for _ in 0..(0.1 * SR) as usize {
            e.next();
        }
        assert_eq!(e.active_voices(), 0);
        assert_eq!(e.pending_tones(), 0);
    }
}
