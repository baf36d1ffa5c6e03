//! Interactive Bushfire Simulation Driver
//!
//! Seeds fires and firefighters from the command line, then runs the
//! simulation for a fixed number of ticks, printing a textual grid dump
//! after each one.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive -- --width 5 --height 5 --seed 42
//! ```
//!
//! # Pre-run commands
//!
//! - `fire <x> <y>` - set every tree in the cell on fire
//! - `extinguish <x> <y>` - deploy a firefighter at the cell
//! - `start` - begin the simulation
//! - `help` - show the command summary
//! - `quit` - leave without running

use bushfire_core::{render_ascii, BushfireModel, ModelConfig};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// Bushfire simulation driver with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "bushfire-sim")]
#[command(about = "Grid-based bushfire simulation with tree and firefighter agents", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 5)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 5)]
    height: u32,

    /// Probability that a cell starts with a tree (0-1)
    #[arg(long, default_value_t = 1.0)]
    tree_density: f64,

    /// Firefighters scattered at start-up when --auto-place-firefighters is set
    #[arg(long, default_value_t = 1)]
    num_firefighters: u32,

    /// Scatter firefighters at random cells during construction
    #[arg(long)]
    auto_place_firefighters: bool,

    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 5)]
    ticks: u32,

    /// Random seed for a reproducible run
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

const USAGE: &str =
    "Enter 'fire <x> <y>' to start a fire, 'extinguish <x> <y>' to deploy a firefighter, \
     or 'start' to begin the simulation";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut model = BushfireModel::new(ModelConfig {
        width: args.width,
        height: args.height,
        tree_density: args.tree_density,
        num_firefighters: args.num_firefighters,
        auto_place_firefighters: args.auto_place_firefighters,
        seed: args.seed,
    });

    println!(
        "Created a {}x{} forest with {} agents (seed {}).",
        args.width,
        args.height,
        model.schedule().len(),
        args.seed
    );
    println!("{USAGE}");

    if !pre_run(&mut model) {
        return;
    }

    for _ in 0..args.ticks {
        if let Err(err) = model.step() {
            // A core error mid-tick means a broken invariant; stop the run.
            eprintln!("simulation error: {err}");
            std::process::exit(1);
        }
        print!("{}", render_ascii(&model));
    }
}

/// The pre-run command loop. Returns false when the user quits before
/// starting the run.
fn pre_run(model: &mut BushfireModel) -> bool {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("Failed to create readline: {err}");
            return false;
        }
    };

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                if line.eq_ignore_ascii_case("start") {
                    return true;
                }
                if line.eq_ignore_ascii_case("quit") {
                    return false;
                }
                if line.eq_ignore_ascii_case("help") {
                    println!("{USAGE}");
                    continue;
                }
                // Malformed or rejected commands report and re-prompt; they
                // never terminate the session.
                if let Err(msg) = dispatch(model, line) {
                    println!("{msg}");
                    println!("{USAGE}");
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return false,
            Err(err) => {
                eprintln!("readline error: {err}");
                return false;
            }
        }
    }
}

/// Parse and apply one pre-run command line.
fn dispatch(model: &mut BushfireModel, line: &str) -> Result<(), String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [command, x, y] = parts.as_slice() else {
        return Err("Invalid input format.".to_string());
    };
    let x: i32 = x
        .parse()
        .map_err(|_| format!("'{x}' is not a valid coordinate."))?;
    let y: i32 = y
        .parse()
        .map_err(|_| format!("'{y}' is not a valid coordinate."))?;

    match command.to_ascii_lowercase().as_str() {
        "fire" => {
            model.ignite(x, y).map_err(|e| e.to_string())?;
            debug!(x, y, "fire command applied");
            Ok(())
        }
        // Kept from the reference behavior: 'extinguish' deploys a
        // firefighter at the cell rather than clearing the fire directly.
        // The firefighter puts fires out once the run starts.
        "extinguish" => {
            model.place_firefighter(x, y).map_err(|e| e.to_string())?;
            debug!(x, y, "firefighter deployed");
            Ok(())
        }
        other => Err(format!("Invalid command '{other}'.")),
    }
}
