use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::info;

use chip8_vm::Chip8;

use crate::display::frame_to_text;
use crate::keymap::held_keys;

/// How a run is set up, straight from the command line
pub struct Options {
    pub rom: PathBuf,
    pub cycles: u64,
    pub seed: u64,
    pub keys: String,
    pub frames: bool,
}

pub fn run(options: Options) -> Result<()> {
    let mut chip8 = Chip8::from_seed(options.seed);

    // Load ROM
    let file = File::open(&options.rom)
        .with_context(|| format!("unable to open {}", options.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", options.rom.display()))?;

    let keys = held_keys(&options.keys).map_err(|key| anyhow!("no keypad key for {:?}", key))?;

    let mut beeping = false;
    for cycle in 0..options.cycles {
        chip8.set_keys(keys);

        chip8
            .cycle()
            .with_context(|| format!("machine halted on cycle {}", cycle))?;

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            if options.frames {
                println!("{}", frame_to_text(&frame));
            }
        }

        if chip8.sound_active() != beeping {
            beeping = !beeping;
            info!("beep {} on cycle {}", if beeping { "on" } else { "off" }, cycle);
        }
    }

    print!("{}", frame_to_text(&chip8.frame()));
    Ok(())
}
