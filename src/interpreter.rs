//! # interpreter
//!
//! Glues a `Machine` to the host: a display, an input device and a buzzer.
//! The machine runs as fast as it likes for a frame's worth of instructions,
//! then the interpreter ticks the timers, updates the buzzer, draws, and
//! sleeps until the next 60Hz frame is due. Not cycle-accurate to the COSMAC
//! VIP, but the wallclock timing looks right.
use crate::error::{Chip8Error, Result};
use crate::input::{HostEvent, HostKey};
use crate::keypad::Keypad;
use crate::machine::{Flow, Machine};
use crate::{display, input, sound};
use std::io;
use std::time::{Duration, Instant};

/// timers and screen refresh
pub const CHIP8_FRAME_RATE: u32 = 60;

pub struct Chip8Interpreter<'a> {
    machine: Machine,
    display: &'a mut dyn display::Display,
    input: &'a mut dyn input::Input,
    sound: &'a mut dyn sound::Sound,
}

impl<'a> Chip8Interpreter<'a> {
    pub fn new(
        display: &'a mut dyn display::Display,
        input: &'a mut dyn input::Input,
        sound: &'a mut dyn sound::Sound,
        keymap: &[(HostKey, u8)],
    ) -> Chip8Interpreter<'a> {
        Self::with_machine(Machine::new(Keypad::new(keymap)), display, input, sound)
    }

    pub fn with_machine(
        machine: Machine,
        display: &'a mut dyn display::Display,
        input: &'a mut dyn input::Input,
        sound: &'a mut dyn sound::Sound,
    ) -> Chip8Interpreter<'a> {
        Chip8Interpreter {
            machine,
            display,
            input,
            sound,
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// load a chip8 program
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        self.machine.load_program(reader)
    }

    /// Run until the host quits, `frame_limit` frames have been shown, or the
    /// program faults. Returns the number of frames shown.
    pub fn main_loop(
        &mut self,
        instructions_per_second: u32,
        frame_limit: Option<u64>,
    ) -> Result<u64> {
        let frame_time = Duration::from_secs(1) / CHIP8_FRAME_RATE;
        let per_frame = (instructions_per_second / CHIP8_FRAME_RATE).max(1);
        let mut next_frame = Instant::now() + frame_time;
        let mut frames = 0;

        while frame_limit.map_or(true, |limit| frames < limit) {
            if self.frame(per_frame)? == Flow::Halt {
                break;
            }
            frames += 1;

            // a long key wait leaves us behind; don't try to catch up
            let now = Instant::now();
            if next_frame > now {
                spin_sleep::sleep(next_frame - now);
                next_frame += frame_time;
            } else {
                next_frame = now + frame_time;
            }
        }
        if let Err(e) = self.sound.stop() {
            tracing::warn!("couldn't silence the buzzer: {}", e);
        }
        tracing::info!("stopped after {} frames", frames);
        Ok(frames)
    }

    /// one 60Hz frame: input, instructions, timers, sound, display
    pub fn frame(&mut self, instructions: u32) -> Result<Flow> {
        for evt in self.input.poll_events()? {
            if evt == HostEvent::Quit {
                return Ok(Flow::Halt);
            }
            self.machine.keypad.apply(evt);
        }
        for _ in 0..instructions {
            if self.machine.cycle(self.input)? == Flow::Halt {
                return Ok(Flow::Halt);
            }
        }
        self.interrupt()?;
        Ok(Flow::Running)
    }

    /// external timer interrupt
    pub fn interrupt(&mut self) -> Result<()> {
        self.machine.tick_timers();
        let beeping = self.machine.registers.sound_timer > 0;
        if beeping != self.sound.is_beeping() {
            let result = if beeping {
                self.sound.beep()
            } else {
                self.sound.stop()
            };
            result.map_err(|e| Chip8Error::Sound(e.to_string()))?;
        }
        self.display.draw(&self.machine.framebuffer)?;
        Ok(())
    }
}
