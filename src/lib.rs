//! # chip8-vm
//!
//! An interpreter for the base CHIP-8 instruction set.
//!
//! ## Design
//!
//! * one `Machine` value owns all state; no globals
//! * decode each opcode into an `Instruction`, then one exhaustive match
//!   executes it, so no case can fall into the next
//! * the engine never fetches host input; `Fx0A` is handed back to the
//!   driver, which blocks on an injected `Input`
//! * abstract display, input and sound behind traits so alternatives can be
//!   plugged in; the binary uses a TUI in-console
//! * instructions run as fast as possible for a frame, then the driver
//!   sleeps until the next 60Hz tick; so not quite authentic
//!
//! Model
//!
//! Chip8Interpreter
//!  |-- display, input, sound (borrowed)
//!  `-- Machine
//!       |-- memory (font at 0x000, program at 0x200)
//!       |-- registers, stack
//!       |-- framebuffer
//!       `-- keypad(keymap)
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod sound;

pub use error::{Chip8Error, Result};
pub use machine::{Flow, Machine, Step};
