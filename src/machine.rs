//! The execution engine: one `Machine` owns every piece of CHIP-8 state and
//! `execute` is the transition function from one state to the next.
//!
//! The engine never talks to the host directly. `Fx0A` comes back to the
//! caller as `Step::AwaitKey`; whoever drives the machine does the waiting
//! and hands the key over with `complete_key_wait`. `cycle` is the usual way
//! to do both for a single-threaded driver.
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::input::Input;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::{
    Chip8MemoryMap, MemoryMap, CHIP8_FONT_ADDR, CHIP8_FONT_GLYPH_BYTES, CHIP8_PROGRAM_ADDR,
};
use crate::registers::{Registers, Stack, VF};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

/// what the caller has to do after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Fx0A: block for a key, then call `complete_key_wait(x, key)`
    AwaitKey { x: usize },
}

/// whether the machine should keep going after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Running,
    /// the host asked to quit while the program was waiting for a key
    Halt,
}

pub struct Machine {
    pub memory: Chip8MemoryMap,
    pub registers: Registers,
    pub stack: Stack,
    pub framebuffer: Framebuffer,
    pub keypad: Keypad,
    rng: StdRng,
}

impl Machine {
    pub fn new(keypad: Keypad) -> Self {
        Self::with_rng(keypad, StdRng::from_entropy())
    }

    /// a machine whose Cxkk sequence is reproducible
    pub fn with_seed(keypad: Keypad, seed: u64) -> Self {
        Self::with_rng(keypad, StdRng::seed_from_u64(seed))
    }

    fn with_rng(keypad: Keypad, rng: StdRng) -> Self {
        Machine {
            memory: Chip8MemoryMap::new(),
            registers: Registers::default(),
            stack: Stack::default(),
            framebuffer: Framebuffer::new(),
            keypad,
            rng,
        }
    }

    /// copy a program to 0x200 and point PC at it
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        let size = self.memory.load_program(reader)?;
        self.registers.pc = CHIP8_PROGRAM_ADDR;
        tracing::info!("loaded {} byte program at {:#05x}", size, CHIP8_PROGRAM_ADDR);
        Ok(size)
    }

    /// read the instruction at PC and move PC past it
    pub fn fetch(&mut self) -> Result<u16> {
        let opcode = self.memory.get_word(self.registers.pc as usize)?;
        self.registers.pc = self.registers.pc.wrapping_add(2);
        Ok(opcode)
    }

    /// fetch and execute one instruction, blocking on `input` for Fx0A
    pub fn cycle(&mut self, input: &mut dyn Input) -> Result<Flow> {
        let opcode = self.fetch()?;
        match self.execute(opcode)? {
            Step::Continue => Ok(Flow::Running),
            Step::AwaitKey { x } => match self.keypad.await_keypress(input)? {
                Some(key) => {
                    self.complete_key_wait(x, key);
                    Ok(Flow::Running)
                }
                None => Ok(Flow::Halt),
            },
        }
    }

    pub fn complete_key_wait(&mut self, x: usize, key: u8) {
        self.registers.v[x] = key;
    }

    /// called by the pacing source at 60Hz
    pub fn tick_timers(&mut self) {
        self.registers.tick_timers();
    }

    /// Execute one instruction. PC has already been moved past it; only jumps,
    /// calls, returns and skips touch PC here.
    pub fn execute(&mut self, opcode: u16) -> Result<Step> {
        use Instruction::*;

        let instruction = Instruction::decode(opcode);
        tracing::trace!(
            "{:#05x}: {:04x} {:?}",
            self.registers.pc.wrapping_sub(2),
            opcode,
            instruction
        );

        let r = &mut self.registers;
        match instruction {
            Cls => self.framebuffer.clear(),
            Ret => r.pc = self.stack.pop(&mut r.sp)?,
            Jump { nnn } => r.pc = nnn,
            Call { nnn } => {
                self.stack.push(&mut r.sp, r.pc)?;
                r.pc = nnn;
            }
            SkipEqImm { x, kk } => r.skip_if(r.v[x] == kk),
            SkipNeImm { x, kk } => r.skip_if(r.v[x] != kk),
            SkipEqReg { x, y } => r.skip_if(r.v[x] == r.v[y]),
            LoadImm { x, kk } => r.v[x] = kk,
            AddImm { x, kk } => r.v[x] = r.v[x].wrapping_add(kk),
            Move { x, y } => r.v[x] = r.v[y],
            Or { x, y } => r.v[x] |= r.v[y],
            And { x, y } => r.v[x] &= r.v[y],
            Xor { x, y } => r.v[x] ^= r.v[y],
            // flag first, then the result, so the result wins when x is F
            AddCarry { x, y } => {
                let (sum, carry) = r.v[x].overflowing_add(r.v[y]);
                r.v[VF] = carry as u8;
                r.v[x] = sum;
            }
            Sub { x, y } => {
                r.v[VF] = (r.v[x] >= r.v[y]) as u8;
                r.v[x] = r.v[x].wrapping_sub(r.v[y]);
            }
            ShiftRight { x } => {
                r.v[VF] = r.v[x] & 1;
                r.v[x] >>= 1;
            }
            SubReverse { x, y } => {
                r.v[VF] = (r.v[y] >= r.v[x]) as u8;
                r.v[x] = r.v[y].wrapping_sub(r.v[x]);
            }
            ShiftLeft { x } => {
                r.v[VF] = (r.v[x] >> 7) & 1;
                r.v[x] <<= 1;
            }
            SkipNeReg { x, y } => r.skip_if(r.v[x] != r.v[y]),
            LoadI { nnn } => r.i = nnn,
            JumpV0 { nnn } => r.pc = nnn + r.v[0] as u16,
            Random { x, kk } => r.v[x] = self.rng.gen::<u8>() & kk,
            Draw { x, y, n } => {
                let sprite = self.memory.get_ro_slice(r.i as usize, n as usize)?;
                let collision =
                    self.framebuffer
                        .draw_sprite(r.v[x] as usize, r.v[y] as usize, sprite);
                r.v[VF] = collision as u8;
            }
            SkipKeyDown { x } => r.skip_if(self.keypad.is_down(r.v[x])),
            SkipKeyUp { x } => r.skip_if(!self.keypad.is_down(r.v[x])),
            LoadDelay { x } => r.v[x] = r.delay_timer,
            WaitKey { x } => return Ok(Step::AwaitKey { x }),
            SetDelay { x } => r.delay_timer = r.v[x],
            SetSound { x } => r.sound_timer = r.v[x],
            AddI { x } => r.i = r.i.wrapping_add(r.v[x] as u16),
            LoadGlyph { x } => {
                r.i = (CHIP8_FONT_ADDR + r.v[x] as usize * CHIP8_FONT_GLYPH_BYTES) as u16
            }
            StoreBcd { x } => {
                let vx = r.v[x];
                self.memory
                    .write(&[vx / 100, vx / 10 % 10, vx % 10], r.i as usize)?;
            }
            StoreRegs { x } => self.memory.write(&r.v[..=x], r.i as usize)?,
            LoadRegs { x } => {
                let src = self.memory.get_ro_slice(r.i as usize, x + 1)?;
                r.v[..=x].copy_from_slice(src);
            }
            Unknown(opcode) => tracing::debug!("ignoring unknown opcode {:04x}", opcode),
        }
        Ok(Step::Continue)
    }
}
