//! Racetrack Gen command line
//!
//! Usage: `racetrack-gen [PRESET | CONFIG.json] [SEED | random]`
//!
//! Generates one track and prints the result as JSON on stdout. Progress
//! goes through `log`; set `RUST_LOG=debug` for the retry details.

use std::process::ExitCode;

use racetrack_gen::{Track, TrackConfig, TrackPreset};

fn load_config(arg: Option<&str>) -> Result<TrackConfig, String> {
    let Some(arg) = arg else {
        return Ok(TrackConfig::default());
    };
    if let Some(preset) = TrackPreset::from_str(arg) {
        return Ok(TrackConfig::from_preset(preset));
    }
    TrackConfig::load(arg).map_err(|e| format!("cannot load config {arg}: {e}"))
}

fn apply_seed(config: &mut TrackConfig, arg: Option<&str>) -> Result<(), String> {
    match arg {
        None => {}
        Some("random") => config.randomize_seed(&mut rand::rng()),
        Some(seed) => {
            config.seed = seed
                .parse()
                .map_err(|e| format!("invalid seed {seed}: {e}"))?;
        }
    }
    Ok(())
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = load_config(args.first().map(String::as_str))?;
    apply_seed(&mut config, args.get(1).map(String::as_str))?;

    let result = racetrack_gen::generate(&config).map_err(|e| e.to_string())?;
    let track = Track::from_result(
        config.seed,
        result.clone(),
        config.alpha,
        config.resolution as usize,
    );
    let geometry = track.geometry();
    log::info!(
        "Track seed {}: {} points, length {:.1}, {} triangles, {} collision quads",
        track.seed(),
        track.len(),
        track.centre().approximate_length(geometry.resolution()),
        geometry.triangles.len(),
        geometry.collision_polygons.len()
    );

    let json = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
