use rand::RngCore;

use crate::opcode::{Instruction, Opcode};
use crate::operations::*;
use crate::state::State;

/// The shape shared by every operation in `operations`
pub type Operation = fn(op: &Instruction, state: &mut State, rng: &mut dyn RngCore) -> Step;

/// Selects the correct operation for a decoded Instruction.
///
/// Families 0x0, 0xE and 0xF are told apart by their low byte, 0x5, 0x8 and 0x9 by their low
/// nibble. Anything that doesn't match resolves to `unknown`.
pub fn from_op(op: &Instruction) -> Operation {
    match op.word.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rnd,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => moved,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => loads,
        (0xF, _, 0x1, 0x8) => ld,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => unknown,
    }
}

/// Applies a decoded Instruction to the state
pub fn execute(op: &Instruction, state: &mut State, rng: &mut dyn RngCore) -> Step {
    from_op(op)(op, state, rng)
}
