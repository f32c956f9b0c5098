use crate::error::{Chip8Error, Result};
use std::io;

// NB. registers hold u16 addresses, but indices here are usize so that sums
//     like I + x land outside memory and fault rather than silently wrapping

/// Represents the addressable memory of the machine
pub trait MemoryMap {
    /// get a r/o slice of the underlying memory
    fn get_ro_slice(&self, index: usize, len: usize) -> Result<&[u8]>;

    /// get a r/w slice of the underlying memory
    fn get_rw_slice(&mut self, index: usize, len: usize) -> Result<&mut [u8]>;

    fn get(&self, index: usize) -> Result<u8> {
        Ok(self.get_ro_slice(index, 1)?[0])
    }

    fn set(&mut self, index: usize, byte: u8) -> Result<()> {
        self.get_rw_slice(index, 1)?[0] = byte;
        Ok(())
    }

    /// get a big-endian two-byte word (an instruction)
    fn get_word(&self, index: usize) -> Result<u16> {
        let word = self.get_ro_slice(index, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// write a chunk of bytes into "RAM"
    fn write(&mut self, data: &[u8], index: usize) -> Result<()> {
        self.get_rw_slice(index, data.len())?.copy_from_slice(data);
        Ok(())
    }
}

/// Defines the CHIP-8 memory map
///   0x0000-0x004f  font glyphs, 5 bytes each for 0-F
///   0x0050-0x01ff  reserved for the interpreter
///   0x0200-0x0fff  program and working data
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
}

impl MemoryMap for Chip8MemoryMap {
    fn get_ro_slice(&self, index: usize, len: usize) -> Result<&[u8]> {
        let end = checked_end(index, len)?;
        Ok(&self.bytes[index..end])
    }

    fn get_rw_slice(&mut self, index: usize, len: usize) -> Result<&mut [u8]> {
        let end = checked_end(index, len)?;
        Ok(&mut self.bytes[index..end])
    }
}

/// first index past the range, if the whole range is addressable
fn checked_end(index: usize, len: usize) -> Result<usize> {
    match index.checked_add(len) {
        Some(end) if end <= CHIP8_RAM_SIZE_BYTES => Ok(end),
        // report the first byte that doesn't exist
        _ => Err(Chip8Error::memory(index.max(CHIP8_RAM_SIZE_BYTES))),
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// where glyph 0 starts; glyph n is at n * CHIP8_FONT_GLYPH_BYTES
pub const CHIP8_FONT_ADDR: usize = 0x000;
pub const CHIP8_FONT_GLYPH_BYTES: usize = 5;

impl Chip8MemoryMap {
    /// zeroed RAM with the font baked in
    pub fn new() -> Self {
        let mut bytes = vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice();
        bytes[CHIP8_FONT_ADDR..CHIP8_FONT_ADDR + CHIP8_FONT.len()].copy_from_slice(&CHIP8_FONT);
        Chip8MemoryMap { bytes }
    }

    /// load a CHIP-8 program at 0x200, returning how many bytes were read
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let mut buf = Vec::new();
        let size = reader.read_to_end(&mut buf)?;
        let max = CHIP8_RAM_SIZE_BYTES - CHIP8_PROGRAM_ADDR as usize;
        if size > max {
            return Err(Chip8Error::ProgramTooLarge { size, max });
        }
        self.write(&buf, CHIP8_PROGRAM_ADDR as usize)?;
        Ok(size)
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
