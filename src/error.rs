use std::io;
use thiserror::Error;

/// which fixed-size store an out-of-range access hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Memory,
    Stack,
}

/// Everything that can stop the machine. Only `OutOfBounds` is raised by the
/// core itself; unknown opcodes are not errors.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("{region:?} access out of bounds at index {index:#06x}")]
    OutOfBounds { region: Region, index: usize },

    #[error("program is {size} bytes, but only {max} bytes fit above 0x200")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("sound device failed: {0}")]
    Sound(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Chip8Error {
    pub(crate) fn memory(index: usize) -> Self {
        Chip8Error::OutOfBounds {
            region: Region::Memory,
            index,
        }
    }

    pub(crate) fn stack(index: usize) -> Self {
        Chip8Error::OutOfBounds {
            region: Region::Stack,
            index,
        }
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
