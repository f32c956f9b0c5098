use crate::input::HostKey;
use crate::keypad::{CHIP8_CONVENTIONAL_KEYMAP, CHIP8_LITERAL_KEYMAP, CHIP8_KEY_COUNT};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// how host keys are laid out over the hex keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Keymap {
    /// 1234 / qwer / asdf / zxcv, shaped like the COSMAC keypad
    Conventional,
    /// 0-9 and a-f stand for themselves
    Literal,
}

impl Keymap {
    pub fn table(&self) -> &'static [(HostKey, u8); CHIP8_KEY_COUNT] {
        match self {
            Keymap::Conventional => &CHIP8_CONVENTIONAL_KEYMAP,
            Keymap::Literal => &CHIP8_LITERAL_KEYMAP,
        }
    }
}

/// Run a CHIP-8 program in the terminal. Esc quits.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// program to load at 0x200
    pub rom: PathBuf,

    /// instructions executed per second
    #[arg(long, default_value_t = 700)]
    pub ips: u32,

    #[arg(long, value_enum, default_value_t = Keymap::Conventional)]
    pub keymap: Keymap,

    /// use the PC speaker for the sound timer
    #[arg(long)]
    pub beep: bool,

    /// stop after this many 60Hz frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// write tracing output here (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = Config::parse_from(["chip8-vm", "roms/pong.ch8"]);
        assert_eq!(c.rom, PathBuf::from("roms/pong.ch8"));
        assert_eq!(c.ips, 700);
        assert_eq!(c.keymap, Keymap::Conventional);
        assert!(!c.beep);
        assert_eq!(c.frames, None);
        assert_eq!(c.log_file, None);
    }

    #[test]
    fn test_flags() {
        let c = Config::parse_from([
            "chip8-vm",
            "--ips",
            "1000",
            "--keymap",
            "literal",
            "--beep",
            "--frames",
            "600",
            "--log-file",
            "chip8.log",
            "game.ch8",
        ]);
        assert_eq!(c.ips, 1000);
        assert_eq!(c.keymap.table()[0xa], ('a', 0xa));
        assert!(c.beep);
        assert_eq!(c.frames, Some(600));
        assert_eq!(c.log_file, Some(PathBuf::from("chip8.log")));
    }

    #[test]
    fn test_missing_rom_rejected() {
        assert!(Config::try_parse_from(["chip8-vm"]).is_err());
    }
}
