//! End-to-end checks of the engine's trigger surface, driven by a virtual
//! clock (rendering samples instead of sleeping).

use chime_engine::{AudioEngine, JsonFileStore, MemStore, Settings, SettingsStore};

const SR: f32 = 48_000.0;

fn engine() -> AudioEngine<MemStore> {
    AudioEngine::new(SR, MemStore::new())
}

#[test]
fn score_dispatch_matches_the_contract() {
    // 1000 → milestone run of four ascending tones
    let mut e = engine();
    e.play_score(1000);
    assert_eq!(e.pending_tones(), 4);

    // 300 → single high blip
    let mut e = engine();
    e.play_score(300);
    assert_eq!(e.pending_tones(), 1);

    // 57 → single default blip
    let mut e = engine();
    e.play_score(57);
    assert_eq!(e.pending_tones(), 1);
}

#[test]
fn settings_reflect_the_last_value_set() {
    let mut e = engine();
    e.set_bgm_volume(0.7);
    e.set_sfx_volume(0.2);
    e.set_bgm_enabled(false);
    e.set_sfx_enabled(true);
    e.set_bgm_volume(0.7); // repeated identical set

    let s = e.settings();
    assert_eq!(s.music_volume, 0.7);
    assert_eq!(s.effects_volume, 0.2);
    assert!(!s.music_enabled);
    assert!(s.effects_enabled);
}

#[test]
fn settings_round_trip_through_a_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audio.json");

    {
        let mut e = AudioEngine::new(SR, JsonFileStore::new(&path));
        e.set_bgm_enabled(false);
    }

    // a fresh load of the same store yields musicEnabled=false, rest default
    let loaded = JsonFileStore::new(&path).load().unwrap();
    assert!(!loaded.music_enabled);
    assert!(loaded.effects_enabled);
    assert_eq!(loaded.music_volume, Settings::default().music_volume);
    assert_eq!(loaded.effects_volume, Settings::default().effects_volume);

    // and a fresh engine over that store comes up with it applied
    let e = AudioEngine::new(SR, JsonFileStore::new(&path));
    assert!(!e.settings().music_enabled);
}

#[test]
fn engine_boots_from_a_partial_snapshot() {
    let store = MemStore::with_doc(r#"{"effectsVolume": 0.9}"#);
    let e = AudioEngine::new(SR, store);
    let s = e.settings();
    assert_eq!(s.effects_volume, 0.9);
    assert!(s.music_enabled && s.effects_enabled);
}

#[test]
fn out_of_range_stored_volumes_are_clamped_on_load() {
    let store = MemStore::with_doc(r#"{"musicVolume": 7.0, "effectsVolume": -2.0}"#);
    let e = AudioEngine::new(SR, store);
    assert_eq!(e.settings().music_volume, 1.0);
    assert_eq!(e.settings().effects_volume, 0.0);
}

#[test]
fn overlapping_effects_are_independent() {
    let mut e = engine();
    e.play_sound("eat"); // events at 0 and 50 ms
    // advance 25 ms, then trigger a second sequence mid-flight
    for _ in 0..(0.025 * SR) as usize {
        e.next();
    }
    e.play_sound("pause"); // events at 0 and 100 ms relative to *now*
    // both sequences drain fully on their own clocks
    for _ in 0..(0.150 * SR) as usize {
        e.next();
    }
    assert_eq!(e.pending_tones(), 0);
}

#[test]
fn music_volume_applies_immediately_to_the_ambient_mix() {
    let mut e = engine();
    e.set_bgm_volume(1.0);
    e.start_bgm();
    let mut loud = 0.0_f32;
    for _ in 0..4800 {
        loud = loud.max(e.next().abs());
    }
    e.set_bgm_volume(0.1);
    let mut quiet = 0.0_f32;
    for _ in 0..4800 {
        quiet = quiet.max(e.next().abs());
    }
    assert!(loud > 0.0 && quiet > 0.0);
    assert!(quiet < loud * 0.5, "loud={loud} quiet={quiet}");
}

#[test]
fn disabling_categories_never_panics_and_silences_output() {
    let mut e = engine();
    e.start_bgm();
    e.play_sound("achievement");
    e.set_bgm_enabled(false);
    e.set_sfx_enabled(false);
    for _ in 0..(0.2 * SR) as usize {
        e.next();
    }
    assert!(!e.bgm_running());
    assert_eq!(e.active_voices(), 0);
}
