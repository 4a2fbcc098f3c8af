// Cellsong — CLI entry point.
//
// Seeds a Generations automaton, wires it to the sequencer driver, and
// either captures the performance to MIDI or plays it live in the
// terminal (grid preview at the step cadence).
//
// Usage:
//   cargo run -p cellsong_seq -- [output.mid] [--seed N] [--width N]
//     [--rows N] [--ticks N] [--bpm N] [--rate F] [--density F]
//     [--states N] [--loop N] [--scale NAME] [--root N] [--live]
//     [--snapshot STATE.json]
//
// Scales: major, minor, lydian, mixolydian, phrygian (random if omitted)

use cellsong_automata::engine::Automaton;
use cellsong_automata::rule::RuleConfig;
use cellsong_seq::driver::{DriverConfig, SequencerDriver};
use cellsong_seq::midi::write_midi;
use cellsong_seq::render::ansi_frame;
use cellsong_seq::scale::{Scale, ScaleKind, note_name};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse arguments
    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("pattern.mid");
    let seed: Option<u64> = parse_flag(&args, "--seed");
    let width: usize = parse_flag(&args, "--width").unwrap_or(8);
    let rows: usize = parse_flag(&args, "--rows").unwrap_or(8);
    let ticks: usize = parse_flag(&args, "--ticks").unwrap_or(width * 16);
    let bpm: f32 = parse_flag(&args, "--bpm").unwrap_or(120.0);
    let rate: f32 = parse_flag(&args, "--rate").unwrap_or(1.0);
    let density: f32 = parse_flag(&args, "--density").unwrap_or(0.5);
    let states: u32 = parse_flag(&args, "--states").unwrap_or(8);
    let loop_length: Option<u64> = parse_flag(&args, "--loop");
    let scale_name: Option<String> = parse_flag(&args, "--scale");
    let root: Option<u8> = parse_flag(&args, "--root");
    let snapshot: Option<String> = parse_flag(&args, "--snapshot");
    let live = args.iter().any(|a| a == "--live");

    let mut rng = if let Some(s) = seed {
        StdRng::seed_from_u64(s)
    } else {
        StdRng::from_os_rng()
    };

    println!("=== Cellsong ===");
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }

    // Build the automaton
    println!("[1/3] Seeding {}x{} automaton...", width, rows);
    let rules = RuleConfig {
        density,
        states,
        loop_length,
        ..RuleConfig::generations()
    };
    let engine = match Automaton::new(width, rows, rules, &mut rng) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    println!("  {} of {} cells live.", engine.population(), width * rows);

    // Pick the scale
    let scale = match (&scale_name, root) {
        (Some(name), _) => {
            let kind = parse_scale(name);
            Scale::new(kind, root.unwrap_or(45))
        }
        (None, Some(root)) => Scale::new(ScaleKind::Minor, root),
        (None, None) => Scale::random(&mut rng),
    };
    println!(
        "  Scale: {:?} rooted at {}",
        scale.kind,
        note_name(scale.root)
    );

    // Wire the driver
    println!("[2/3] Driving at {} BPM (rate x{})...", bpm, rate);
    let config = DriverConfig {
        bpm,
        rate,
        ..DriverConfig::default()
    };
    let mut driver = match SequencerDriver::new(engine, scale, config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Driver configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if live {
        run_live(&mut driver, ticks);
    } else {
        // Capture to MIDI
        println!("[3/3] Capturing {} ticks to {}...", ticks, output_path);
        match write_midi(&mut driver, ticks, Path::new(output_path)) {
            Ok(()) => {
                let seconds = ticks as f32 * driver.step_interval().as_secs_f32();
                println!("  Done! Duration: {:.0}s", seconds);
                println!();
                println!("Play with: timidity {} (or any MIDI player)", output_path);
            }
            Err(e) => {
                eprintln!("  Error writing MIDI: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Dump the final engine state for later resumption or inspection.
    if let Some(path) = snapshot {
        match save_snapshot(driver.engine(), Path::new(&path)) {
            Ok(()) => println!("Engine snapshot written to {}", path),
            Err(e) => {
                eprintln!("Error writing snapshot: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn save_snapshot(
    engine: &Automaton,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(engine)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Live mode: tick at the step cadence, print the grid each generation
/// and the struck note each step.
fn run_live(driver: &mut SequencerDriver, ticks: usize) {
    println!("[3/3] Playing live ({} ticks)...", ticks);
    let interval = driver.step_interval();
    for _ in 0..ticks {
        let out = match driver.tick() {
            Ok(out) => out,
            Err(e) => {
                eprintln!("Driver error: {}", e);
                std::process::exit(1);
            }
        };
        if let Some(note) = out.note {
            println!("  {} (vel {})", note_name(note.key), note.velocity);
        }
        if out.generation_boundary {
            println!(
                "-- generation {} --",
                driver.engine().generation()
            );
            print!("{}", ansi_frame(driver.engine()));
        }
        std::thread::sleep(interval);
    }
}

fn parse_scale(name: &str) -> ScaleKind {
    ScaleKind::parse(name).unwrap_or_else(|| {
        eprintln!("Unknown scale '{}'. Using minor.", name);
        ScaleKind::Minor
    })
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
