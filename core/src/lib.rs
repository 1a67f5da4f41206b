pub use chip8::Chip8;
pub use error::{LoadError, RuntimeError};
pub use opcode::{decode, Instruction};
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
