// Entry point for the pre-launch settings editor
// Loads persisted options, discovers effect plugins, runs the settings screen,
// then saves and/or starts the game depending on the chosen exit action

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process::Command;

// Module declarations
mod xtl_color; // Cross-platform color matching utilities
mod xtl_fx;    // Post-processing effect plugin discovery
mod xtl_opts;  // Option persistence and session state
mod xtl_text;  // Fixed name tables and option descriptions
mod xtl_ui;    // Settings screen rendering and event handling

use xtl_fx::EffectCatalog;
use xtl_opts::{OptionsModel, config_path, load_options, save_options};
use xtl_ui::run as run_ui;

/// A terminal-based pre-launch settings editor for games
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path of the options file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory scanned for post-processing effect plugins
    #[arg(long, default_value = "shaders")]
    effects: PathBuf,

    /// Game executable started by the launch actions
    #[arg(long)]
    game: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = args
        .config
        .or_else(config_path)
        .unwrap_or_else(|| PathBuf::from("options.cfg"));

    // Load persisted options (or defaults), then merge in the discovered
    // effects so a stale postfx index can never reach the settings screen
    let opts = load_options(&config);
    let catalog = EffectCatalog::scan(&args.effects);
    let mut model = OptionsModel::new(opts, &catalog);

    // Run the settings screen until one of the four exit actions is chosen
    let action = run_ui(&mut model, &catalog)?;

    if action.persist() {
        // Best-effort: a failed save only resets preferences next run
        save_options(&config, model.options());
    }

    if action.launch() {
        match args.game {
            Some(game) => {
                // Start the game as a child process; the editor's job is done
                if let Err(err) = Command::new(&game).spawn() {
                    eprintln!("failed to start {}: {}", game.display(), err);
                }
            }
            None => eprintln!("no --game executable configured, nothing to launch"),
        }
    }

    Ok(())
}
