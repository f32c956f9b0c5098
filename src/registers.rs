use crate::error::{Chip8Error, Result};

pub const CHIP8_REGISTER_COUNT: usize = 16;
pub const CHIP8_STACK_DEPTH: usize = 16;

/// index of the flag register
pub const VF: usize = 0xf;

/// The programmer-visible registers. VF doubles as the carry/borrow/collision
/// flag and is overwritten whenever an instruction defines it as one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; CHIP8_REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Registers {
    /// one 60Hz tick; each timer counts down to zero and stays there
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// step over the next instruction; PC is already past the current one
    pub fn skip_if(&mut self, cond: bool) {
        if cond {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// 16 return addresses, indexed by SP
#[derive(Debug, Default, Clone)]
pub struct Stack {
    slots: [u16; CHIP8_STACK_DEPTH],
}

impl Stack {
    pub fn push(&mut self, sp: &mut u8, addr: u16) -> Result<()> {
        let top = *sp as usize;
        if top >= CHIP8_STACK_DEPTH {
            return Err(Chip8Error::stack(top));
        }
        self.slots[top] = addr;
        *sp += 1;
        Ok(())
    }

    pub fn pop(&mut self, sp: &mut u8) -> Result<u16> {
        if *sp == 0 || *sp as usize > CHIP8_STACK_DEPTH {
            return Err(Chip8Error::stack(*sp as usize));
        }
        *sp -= 1;
        Ok(self.slots[*sp as usize])
    }
}
