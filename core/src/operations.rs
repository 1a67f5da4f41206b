use log::warn;
use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, GLYPH_SIZE, STACK_SIZE};
use crate::error::RuntimeError;
use crate::opcode::Instruction;
use crate::state::State;

/// What every operation returns; only stack faults are errors
pub type Step = Result<(), RuntimeError>;

/// clear
pub fn clr(_op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
    state.advance();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    if state.sp == 0 {
        return Err(RuntimeError::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = nnn
pub fn jump(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.pc = op.nnn;
    Ok(())
}

/// STACK.push(PC + 2); PC = nnn
pub fn call(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    if state.sp as usize >= STACK_SIZE {
        return Err(RuntimeError::StackOverflow { pc: state.pc });
    }
    state.stack[state.sp as usize] = state.pc.wrapping_add(0x2);
    state.sp += 1;
    state.pc = op.nnn;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.skip_if(state.v[op.x] == op.kk);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.skip_if(state.v[op.x] != op.kk);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.skip_if(state.v[op.x] == state.v[op.y]);
    Ok(())
}

/// Vx = kk
pub fn load(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] = op.kk;
    state.advance();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] = state.v[op.x].wrapping_add(op.kk);
    state.advance();
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] = state.v[op.y];
    state.advance();
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] |= state.v[op.y];
    state.advance();
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] &= state.v[op.y];
    state.advance();
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] ^= state.v[op.y];
    state.advance();
    Ok(())
}

// Flag-setting operations read both operands first and write VF last, so when x is 0xF the
// flag replaces the result. This is what the COSMAC VIP interpreter and most later
// interpreters do, and what common test ROMs check for.

/// Vx += Vy; VF = overflow
pub fn addr(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let (res, over) = state.v[op.x].overflowing_add(state.v[op.y]);
    state.v[op.x] = res;
    state.set_flag(over);
    state.advance();
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let (vx, vy) = (state.v[op.x], state.v[op.y]);
    state.v[op.x] = vx.wrapping_sub(vy);
    state.set_flag(vx > vy);
    state.advance();
    Ok(())
}

/// Vx >>= 1; VF = lsb
/// Vy is ignored
pub fn shr(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let vx = state.v[op.x];
    state.v[op.x] = vx >> 1;
    state.v[0xF] = vx & 0x1;
    state.advance();
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let (vx, vy) = (state.v[op.x], state.v[op.y]);
    state.v[op.x] = vy.wrapping_sub(vx);
    state.set_flag(vy > vx);
    state.advance();
    Ok(())
}

/// Vx <<= 1; VF = msb
/// Vy is ignored
pub fn shl(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let vx = state.v[op.x];
    state.v[op.x] = vx << 1;
    state.v[0xF] = vx >> 7;
    state.advance();
    Ok(())
}

/// if Vx != Vy then pc +=2
pub fn skrne(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.skip_if(state.v[op.x] != state.v[op.y]);
    Ok(())
}

/// I = nnn
pub fn loadi(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.i = op.nnn;
    state.advance();
    Ok(())
}

/// PC = V0 + nnn
pub fn jumpi(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.pc = u16::from(state.v[0x0]) + op.nnn;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rnd(op: &Instruction, state: &mut State, rng: &mut dyn RngCore) -> Step {
    let rand_byte: u8 = rng.gen();
    state.v[op.x] = rand_byte & op.kk;
    state.advance();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased
pub fn draw(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let origin_x = state.v[op.x] as usize;
    let origin_y = state.v[op.y] as usize;
    let mut collision = 0x0;

    for row in 0..op.n as usize {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        let sprite_row = state.read(state.i.wrapping_add(row as u16));
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (sprite_row >> (7 - bit)) & 1;
            collision |= pixel_value & state.frame_buffer[y][x];
            state.frame_buffer[y][x] ^= pixel_value;
        }
    }

    state.v[0xF] = collision;
    state.draw_flag = true;
    state.advance();
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.skip_if(state.key(state.v[op.x]));
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.skip_if(!state.key(state.v[op.x]));
    Ok(())
}

/// Vx = DT
pub fn moved(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.v[op.x] = state.delay_timer;
    state.advance();
    Ok(())
}

/// await keypress for Vx
/// Leaves the pc in place until some key is down, so the wait is retried every cycle
pub fn keyd(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    if let Some(key) = state.keys.iter().position(|&pressed| pressed) {
        state.v[op.x] = key as u8;
        state.advance();
    }
    Ok(())
}

/// DT = Vx
pub fn loads(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.delay_timer = state.v[op.x];
    state.advance();
    Ok(())
}

/// ST = Vx
pub fn ld(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.sound_timer = state.v[op.x];
    state.advance();
    Ok(())
}

/// I += Vx
pub fn addi(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x]));
    state.advance();
    Ok(())
}

/// I = FONT_BASE + Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
/// See constants::FONT_SET for more details
pub fn ldspr(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    state.i = FONT_BASE + u16::from(state.v[op.x] & 0xF) * GLYPH_SIZE;
    state.advance();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    let vx = state.v[op.x];
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write(state.i.wrapping_add(offset as u16), *digit);
    }
    state.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    for register in 0..=op.x {
        state.write(state.i.wrapping_add(register as u16), state.v[register]);
    }
    state.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    for register in 0..=op.x {
        state.v[register] = state.read(state.i.wrapping_add(register as u16));
    }
    state.advance();
    Ok(())
}

/// Anything else, including 0nnn machine code routines
/// Reported and skipped so the program keeps running
pub fn unknown(op: &Instruction, state: &mut State, _rng: &mut dyn RngCore) -> Step {
    warn!("unrecognized opcode {:04X} at {:04X}, skipping", op.word, state.pc);
    state.advance();
    Ok(())
}
