use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, FONT_SET, MEMORY_SIZE, PROGRAM_START, STACK_SIZE,
};

/// The FrameBuffer is indexed as [y][x]; every cell is either 0 or 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// The Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is written by arithmetic and drawing instructions as a
///       carry, borrow or collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per cycle down to 0
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved; the font set lives at `FONT_BASE`
///     - programs are loaded at `PROGRAM_START`
/// - 32x64 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F, replaced wholesale by the embedder
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: [bool; 16],
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_BASE as usize;
        memory[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            keys: [false; 16],
        }
    }

    /// Reads a byte; addresses past the end of memory wrap around to 0x000
    pub fn read(&self, address: u16) -> u8 {
        self.memory[address as usize % MEMORY_SIZE]
    }

    /// Writes a byte; addresses past the end of memory wrap around to 0x000
    pub fn write(&mut self, address: u16, value: u8) {
        self.memory[address as usize % MEMORY_SIZE] = value;
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        let left = u16::from(self.read(self.pc));
        let right = u16::from(self.read(self.pc.wrapping_add(1)));
        left << 8 | right
    }

    /// Moves on to the next instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(0x2);
    }

    /// Skips the next instruction if `condition` holds, otherwise advances
    pub fn skip_if(&mut self, condition: bool) {
        let step = if condition { 0x4 } else { 0x2 };
        self.pc = self.pc.wrapping_add(step);
    }

    /// VF = flag
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = flag as u8;
    }

    /// The pressed status of the key named by the low nibble of `key`
    pub fn key(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_loads_font() {
        let state = State::new();
        let font = FONT_BASE as usize;
        assert_eq!(state.memory[font..font + 80], FONT_SET[..]);
        assert!(state.memory[..font].iter().all(|&b| b == 0));
        assert!(state.memory[PROGRAM_START as usize..].iter().all(|&b| b == 0));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fetch_combines_bytes() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), 0xAABB);
    }

    #[test]
    fn test_fetch_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.pc = 0xFFF;
        state.memory[0xFFF] = 0x12;
        state.memory[0x000] = 0x34;
        assert_eq!(state.fetch(), 0x1234);
    }

    #[test]
    fn test_write_wraps() {
        let mut state = State::new();
        state.write(0x1001, 0x7);
        assert_eq!(state.memory[0x001], 0x7);
        assert_eq!(state.read(0x1001), 0x7);
    }

    #[test]
    fn test_skip_if() {
        let mut state = State::new();
        state.skip_if(true);
        assert_eq!(state.pc, 0x204);
        state.skip_if(false);
        assert_eq!(state.pc, 0x206);
    }

    #[test]
    fn test_key_masks_index() {
        let mut state = State::new();
        state.keys[0x3] = true;
        assert!(state.key(0x13));
        assert!(!state.key(0x4));
    }
}
