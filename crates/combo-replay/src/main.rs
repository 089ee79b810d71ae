// combo-replay: runs a recorded input script through the combo recognizer.
//
// Loads a combo configuration and a frame-by-frame input script, drives the
// recognizer one tick per frame, and prints every resolved action.

mod replay;
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use combo_input::ComboConfig;
use replay::run_replay;
use script::InputScript;

#[derive(Parser, Debug)]
#[command(name = "combo-replay", about = "Replay recorded input through the combo recognizer")]
struct Args {
    /// Path to the combo config JSON file (defaults are used if missing).
    #[arg(long, default_value = "combos.json")]
    config: PathBuf,

    /// Path to the input script JSON file.
    #[arg(long)]
    script: PathBuf,

    /// Print every finalized capture window.
    #[arg(long)]
    show_snapshots: bool,

    /// Enable debug logging.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = ComboConfig::load_from(&args.config)?;
    let script = InputScript::load_from(&args.script)?;
    info!(
        "replaying {} frames over {} buttons, {} combos",
        script.frames.len(),
        config.buttons.len(),
        config.combos.len()
    );

    let report = run_replay(&config, &script, args.show_snapshots)?;

    if let Some(ref snapshots) = report.snapshots {
        for record in snapshots {
            let pressed = if record.pressed.is_empty() {
                "-".to_string()
            } else {
                record.pressed.join("+")
            };
            println!("window {}: {pressed}", record.window);
        }
    }
    for (frame, action) in &report.actions {
        println!("frame {frame}: {action}");
    }
    info!(
        "{} combos matched, {} unmatched sequences",
        report.actions.len(),
        report.misses
    );

    Ok(())
}
