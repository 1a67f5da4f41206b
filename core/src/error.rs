use thiserror::Error;

/// Reasons a ROM could not be placed in memory
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    SizeExceeded { size: usize, max: usize },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}

/// Conditions that halt the machine
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("stack overflow: call at {pc:#06X} exceeds the maximum call depth")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}
