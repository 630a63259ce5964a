//! Realtime glue: an [`AudioEngine`] behind a cpal output stream.
//!
//! The engine itself is single-threaded; this module is the only place a
//! lock appears, because the host's control thread and the audio callback
//! both need the same engine. The mutex is `parking_lot` and every engine
//! entry point is a fast registration, so the callback never holds it long.
//!
//! If the audio environment is unavailable (no device, no usable config,
//! stream construction fails) the player comes up **silent**: the failure
//! is logged once as a warning and the engine keeps accepting every call,
//! producing no audio. The host application never sees an error.

use crate::engine::AudioEngine;
use crate::settings::SettingsStore;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;
use std::error::Error;
use std::sync::Arc;

/// Fallback engine rate when no output device exists. Only the scheduling
/// clock depends on it in that case; nothing is ever heard.
const SILENT_SR: f32 = 44_100.0;

/// Output options for [`Player::start_with`]. Everything is optional;
/// defaults mean "the host's default output device, its default sample
/// rate, unity output gain".
#[derive(Debug, Default, Clone)]
pub struct PlayerConfig {
    /// Exact name of the output device to use (see the host's device list).
    pub device_name: Option<String>,
    /// Requested sample rate in Hz, clamped into the device's supported range.
    pub sample_rate: Option<u32>,
    /// Final output gain applied after the engine mix.
    pub gain: Option<f32>,
}

pub struct Player<S: SettingsStore + Send + 'static> {
    engine: Arc<Mutex<AudioEngine<S>>>,
    // kept alive for the lifetime of the player; None when running silent
    stream: Option<cpal::Stream>,
}

impl<S: SettingsStore + Send + 'static> Player<S> {
    /// Open the default output device and start rendering. On any failure
    /// the player degrades to a silent engine instead of erroring.
    pub fn start(store: S) -> Self {
        Self::start_with(store, PlayerConfig::default())
    }

    /// Like [`Player::start`], but with explicit device/rate/gain choices.
    /// A requested device that does not exist is a failure like any other:
    /// one warning, then the silent fallback.
    pub fn start_with(store: S, pcfg: PlayerConfig) -> Self {
        let gain = pcfg.gain.unwrap_or(1.0).max(0.0);

        let (sr, output) = match pick_output(&pcfg) {
            Ok((device, cfg, fmt)) => (cfg.sample_rate.0 as f32, Some((device, cfg, fmt))),
            Err(e) => {
                log::warn!("audio output unavailable, running silent: {e}");
                (SILENT_SR, None)
            }
        };

        let engine = Arc::new(Mutex::new(AudioEngine::new(sr, store)));

        let stream = output.and_then(|(device, cfg, fmt)| {
            match open_stream(&device, &cfg, fmt, &engine, gain) {
                Ok(s) => Some(s),
                Err(e) => {
                    log::warn!("audio output unavailable, running silent: {e}");
                    None
                }
            }
        });

        Self { engine, stream }
    }

    /// Shared handle to the engine; hand clones to whoever triggers sounds.
    pub fn engine(&self) -> Arc<Mutex<AudioEngine<S>>> {
        Arc::clone(&self.engine)
    }

    /// False when the player fell back to the silent no-op mode.
    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }
}

fn pick_output(
    pcfg: &PlayerConfig,
) -> Result<(cpal::Device, cpal::StreamConfig, cpal::SampleFormat), Box<dyn Error>> {
    let device = pick_device(pcfg.device_name.as_deref())?;
    let sup_cfg = choose_config(&device, pcfg.sample_rate)?;
    let fmt = sup_cfg.sample_format();
    Ok((device, sup_cfg.config(), fmt))
}

fn pick_device(requested: Option<&str>) -> Result<cpal::Device, Box<dyn Error>> {
    let host = cpal::default_host();
    if let Some(name) = requested {
        for d in host.output_devices()? {
            if d.name()? == name {
                return Ok(d);
            }
        }
        return Err(format!("requested device not found: {name}").into());
    }
    host.default_output_device()
        .ok_or_else(|| "no default output device".into())
}

fn choose_config(
    device: &cpal::Device,
    req_sr: Option<u32>,
) -> Result<cpal::SupportedStreamConfig, Box<dyn Error>> {
    // If nothing requested, the default is already concrete.
    let Some(sr) = req_sr else {
        return Ok(device.default_output_config()?);
    };

    // Pick the supported range closest to the requested rate.
    let mut best: Option<(u32, cpal::SupportedStreamConfigRange)> = None;
    for range in device.supported_output_configs()? {
        let lo = range.min_sample_rate().0;
        let hi = range.max_sample_rate().0;
        let penalty = if (lo..=hi).contains(&sr) {
            0
        } else {
            lo.abs_diff(sr).min(hi.abs_diff(sr))
        };
        if best.as_ref().map_or(true, |(p, _)| penalty < *p) {
            best = Some((penalty, range));
        }
    }
    let (_, range) = best.ok_or("no supported output configs")?;

    let lo = range.min_sample_rate().0;
    let hi = range.max_sample_rate().0;
    Ok(range.with_sample_rate(cpal::SampleRate(sr.clamp(lo, hi))))
}

fn open_stream<S: SettingsStore + Send + 'static>(
    device: &cpal::Device,
    cfg: &cpal::StreamConfig,
    fmt: cpal::SampleFormat,
    engine: &Arc<Mutex<AudioEngine<S>>>,
    gain: f32,
) -> Result<cpal::Stream, Box<dyn Error>> {
    let err_fn = |e: cpal::StreamError| log::warn!("output stream error: {e}");
    let stream = match fmt {
        cpal::SampleFormat::F32 => build_stream::<f32, S>(device, cfg, engine, gain, err_fn)?,
        cpal::SampleFormat::I16 => build_stream::<i16, S>(device, cfg, engine, gain, err_fn)?,
        cpal::SampleFormat::U16 => build_stream::<u16, S>(device, cfg, engine, gain, err_fn)?,
        other => return Err(format!("unsupported device sample format: {other:?}").into()),
    };
    stream.play()?;
    Ok(stream)
}

fn build_stream<T, S>(
    device: &cpal::Device,
    cfg: &cpal::StreamConfig,
    engine: &Arc<Mutex<AudioEngine<S>>>,
    gain: f32,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::Sample + cpal::FromSample<f32> + cpal::SizedSample + Send + 'static,
    S: SettingsStore + Send + 'static,
{
    let channels = cfg.channels as usize;
    let engine = Arc::clone(engine);

    device.build_output_stream(
        cfg,
        move |output: &mut [T], _| {
            let mut eng = engine.lock();
            for frame in output.chunks_mut(channels) {
                let s = (eng.next() * gain).clamp(-1.0, 1.0);
                let v: T = T::from_sample(s);
                for ch in frame.iter_mut() {
                    *ch = v;
                }
            }
        },
        err_fn,
        None,
    )
}
