use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod display;
mod keymap;
mod run;

/// Runs a Chip-8 ROM without a window and prints the screen as text
#[derive(Parser)]
#[command(name = "chip8", version)]
struct Args {
    /// Path to the ROM
    rom: PathBuf,

    /// Number of instructions to execute
    #[arg(long, default_value_t = 1000)]
    cycles: u64,

    /// Seed for the random number generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Keyboard keys held down for the whole run (1234/qwer/asdf/zxcv)
    #[arg(long, default_value = "")]
    keys: String,

    /// Print every redrawn frame, not just the last one
    #[arg(long)]
    frames: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    run::run(run::Options {
        rom: args.rom,
        cycles: args.cycles,
        seed: args.seed,
        keys: args.keys,
        frames: args.frames,
    })
}
