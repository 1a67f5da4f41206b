use std::io::Read;

use log::{info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{MAX_ROM_SIZE, PROGRAM_START};
use crate::error::{LoadError, RuntimeError};
use crate::instruction::execute;
use crate::opcode::decode;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random generator used by `Cxkk`, supplied by the caller
///  - the last loaded `rom` so the machine can be reset
///  - the fault that halted the machine, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - setting, pressing and releasing keys
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8<R = StdRng> {
    state: State,
    rng: R,
    rom: Vec<u8>,
    fault: Option<RuntimeError>,
}

impl Chip8<StdRng> {
    /// A machine whose random numbers are reproducible from `seed`
    pub fn from_seed(seed: u64) -> Self {
        Chip8::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Chip8<R> {
    pub fn new(rng: R) -> Self {
        Chip8 {
            state: State::new(),
            rng,
            rom: Vec::new(),
            fault: None,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Power the machine back on with a program in memory at 0x200
    ///
    /// Registers, stack, timers, frame buffer and anything a previous program left in memory are
    /// cleared, as is any fault that halted it.
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_ROM_SIZE {
            return Err(LoadError::SizeExceeded {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.rom = program.to_vec();
        self.reset();
        info!("loaded {} byte ROM", program.len());
        Ok(())
    }

    /// Return to power-on state with the last loaded ROM back in place
    pub fn reset(&mut self) {
        self.state = State::new();
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + self.rom.len()].copy_from_slice(&self.rom);
        self.fault = None;
        info!("reset with {} byte ROM", self.rom.len());
    }

    /// Replace the pressed status of every key
    pub fn set_keys(&mut self, keys: [bool; 16]) {
        self.state.keys = keys;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.state.keys[(key & 0xF) as usize] = true;
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.state.keys[(key & 0xF) as usize] = false;
    }

    /// Advances the CPU by a single cycle
    /// - gets and executes the next opcode
    /// - decrements the timers
    ///
    /// A stack fault halts the machine: the timers are left alone and every later call returns the
    /// same error until the machine is reset or a new ROM is loaded.
    pub fn cycle(&mut self) -> Result<(), RuntimeError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let op = self.state.fetch();
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );

        if let Err(fault) = execute(&decode(op), &mut self.state, &mut self.rng) {
            self.fault = Some(fault);
            return Err(fault);
        }

        self.decrement_timers();
        Ok(())
    }

    /// Counts both timers down by one, stopping at 0
    ///
    /// `cycle` already does this once per instruction; embedders running the CPU faster than 60Hz
    /// can call this from their own 60Hz tick instead of relying on it.
    pub fn decrement_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// A copy of the current FrameBuffer
    pub fn frame(&self) -> FrameBuffer {
        self.state.frame_buffer
    }

    /// Whether the FrameBuffer changed since the last call; clears the flag
    pub fn consume_redraw_flag(&mut self) -> bool {
        std::mem::replace(&mut self.state.draw_flag, false)
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.consume_redraw_flag() {
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether a beep should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// The fault that halted the machine, if any
    pub fn fault(&self) -> Option<RuntimeError> {
        self.fault
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8<StdRng> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy())
    }
}
