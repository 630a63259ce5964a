//! chime CLI — interactive realtime demo host for the game-audio engine.
//!
//! Stands in for the game/UI collaborator: type effect names to trigger
//! them, flip the background music, change volumes. Settings persist to a
//! JSON file between runs.

use chime_engine::{catalog, JsonFileStore, Player, PlayerConfig};
use cpal::traits::{DeviceTrait, HostTrait};
use std::error::Error;
use std::io::{BufRead, Write};

#[derive(Debug, Default)]
struct Args {
    list_devices: bool,
    settings_path: Option<String>,
    device_name: Option<String>,
    sample_rate: Option<u32>,
    gain: Option<f32>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Args {
    let mut a = Args::default();
    for s in args {
        if s == "--list-devices" { a.list_devices = true; continue; }
        if let Some(rest) = s.strip_prefix("--settings=")    { a.settings_path = Some(rest.to_string()); continue; }
        if let Some(rest) = s.strip_prefix("--device=")      { a.device_name   = Some(rest.to_string()); continue; }
        if let Some(rest) = s.strip_prefix("--sample-rate=") { a.sample_rate   = rest.parse().ok();      continue; }
        if let Some(rest) = s.strip_prefix("--gain=")        { a.gain          = rest.parse().ok();      continue; }
        eprintln!("[warn] unknown arg: {s}");
    }
    a
}

impl Args {
    fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            device_name: self.device_name.clone(),
            sample_rate: self.sample_rate,
            gain: self.gain,
        }
    }
}

fn list_output_devices() -> Result<(), Box<dyn Error>> {
    let host = cpal::default_host();
    println!("Available output devices:");
    for dev in host.output_devices()? {
        println!("- {}", dev.name()?);
    }
    Ok(())
}

fn print_help() {
    println!("commands:");
    print!("  effects :");
    for name in catalog::names() {
        print!(" {name}");
    }
    println!();
    println!("  score <n>        play the score effect for score n");
    println!("  bgm              toggle background music");
    println!("  sfx on|off       enable/disable sound effects");
    println!("  vol music <0-1>  set music volume");
    println!("  vol sfx <0-1>    set effects volume");
    println!("  settings         show the current snapshot");
    println!("  quit");
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = parse_args(std::env::args().skip(1));

    if args.list_devices {
        list_output_devices()?;
        return Ok(());
    }

    println!("chime-cli — procedural game-audio demo\n");

    let path = args.settings_path.clone().unwrap_or_else(|| "chime-settings.json".to_string());
    let player = Player::start_with(JsonFileStore::new(&path), args.player_config());
    if !player.is_live() {
        println!("(no audio device — commands still work, silently)");
    }
    let engine = player.engine();

    // background music comes up if the persisted settings allow it
    engine.lock().start_bgm();
    print_help();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["settings"] => println!("{:?}", engine.lock().settings()),
            ["bgm"] => engine.lock().toggle_bgm(),
            ["sfx", "on"] => engine.lock().set_sfx_enabled(true),
            ["sfx", "off"] => engine.lock().set_sfx_enabled(false),
            ["score", n] => match n.parse::<u32>() {
                Ok(score) => engine.lock().play_score(score),
                Err(_) => println!("score must be a non-negative integer"),
            },
            ["vol", which, v] => match (*which, v.parse::<f32>()) {
                ("music", Ok(vol)) => engine.lock().set_bgm_volume(vol),
                ("sfx", Ok(vol)) => engine.lock().set_sfx_volume(vol),
                _ => println!("usage: vol music|sfx <0-1>"),
            },
            [name] => engine.lock().play_sound(name),
            _ => println!("unrecognized command (try `help`)"),
        }
    }

    Ok(())
}
