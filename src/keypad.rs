use crate::input::{HostEvent, HostKey, Input};
use std::collections::HashMap;
use std::io;

pub const CHIP8_KEY_COUNT: usize = 16;

/// map of characters typed on the host to the COSMAC key they stand for,
/// where '1' => 0x01 and 'a' => 0x0a
pub const CHIP8_LITERAL_KEYMAP: [(HostKey, u8); CHIP8_KEY_COUNT] = [
    ('0', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('4', 0x04),
    ('5', 0x05),
    ('6', 0x06),
    ('7', 0x07),
    ('8', 0x08),
    ('9', 0x09),
    ('a', 0x0a),
    ('b', 0x0b),
    ('c', 0x0c),
    ('d', 0x0d),
    ('e', 0x0e),
    ('f', 0x0f),
];

/// ditto using left-hand side of qwerty keyboard
pub const CHIP8_CONVENTIONAL_KEYMAP: [(HostKey, u8); CHIP8_KEY_COUNT] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// 16-key hex keypad state plus the host keymap it was configured with
pub struct Keypad {
    down: [bool; CHIP8_KEY_COUNT],
    keymap: HashMap<HostKey, u8>,
}

impl Keypad {
    pub fn new(keymap: &[(HostKey, u8)]) -> Self {
        Keypad {
            down: [false; CHIP8_KEY_COUNT],
            keymap: keymap
                .iter()
                .filter(|(_, key)| (*key as usize) < CHIP8_KEY_COUNT)
                .copied()
                .collect(),
        }
    }

    /// which logical key, if any, a host key stands for
    pub fn map(&self, host_key: HostKey) -> Option<u8> {
        self.keymap.get(&host_key).copied()
    }

    pub fn set_down(&mut self, key: u8) {
        if let Some(k) = self.down.get_mut(key as usize) {
            *k = true;
        }
    }

    pub fn set_up(&mut self, key: u8) {
        if let Some(k) = self.down.get_mut(key as usize) {
            *k = false;
        }
    }

    /// keys beyond 0xF are never down
    pub fn is_down(&self, key: u8) -> bool {
        self.down.get(key as usize).copied().unwrap_or(false)
    }

    /// apply one host event; returns the logical key if it was a mapped
    /// key-down
    pub fn apply(&mut self, evt: HostEvent) -> Option<u8> {
        match evt {
            HostEvent::KeyDown(host_key) => match self.map(host_key) {
                Some(key) => {
                    self.set_down(key);
                    Some(key)
                }
                None => {
                    tracing::warn!("can't map {:?} to a COSMAC key", host_key);
                    None
                }
            },
            HostEvent::KeyUp(host_key) => {
                if let Some(key) = self.map(host_key) {
                    self.set_up(key);
                }
                None
            }
            HostEvent::Quit => None,
        }
    }

    /// Block until a mapped key goes down and return it. Returns `None` if the
    /// host asks to quit first.
    pub fn await_keypress(&mut self, input: &mut dyn Input) -> Result<Option<u8>, io::Error> {
        loop {
            let evt = input.wait_event()?;
            if evt == HostEvent::Quit {
                return Ok(None);
            }
            if let Some(key) = self.apply(evt) {
                return Ok(Some(key));
            }
        }
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad::new(&CHIP8_CONVENTIONAL_KEYMAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DummyInput;

    #[test]
    fn test_map() {
        let k = Keypad::new(&CHIP8_CONVENTIONAL_KEYMAP);
        assert_eq!(k.map('x'), Some(0x0));
        assert_eq!(k.map('v'), Some(0xf));
        assert_eq!(k.map('p'), None);
        let k = Keypad::new(&CHIP8_LITERAL_KEYMAP);
        assert_eq!(k.map('b'), Some(0xb));
    }

    #[test]
    fn test_down_up() {
        let mut k = Keypad::default();
        assert!(!k.is_down(5));
        k.set_down(5);
        assert!(k.is_down(5));
        k.set_up(5);
        assert!(!k.is_down(5));
        // out of range keys are ignored
        k.set_down(0x42);
        assert!(!k.is_down(0x42));
    }

    #[test]
    fn test_apply_ignores_unmapped() {
        let mut k = Keypad::default();
        assert_eq!(k.apply(HostEvent::KeyDown('p')), None);
        assert_eq!(k.apply(HostEvent::KeyDown('w')), Some(5));
        assert!(k.is_down(5));
        assert_eq!(k.apply(HostEvent::KeyUp('w')), None);
        assert!(!k.is_down(5));
    }

    #[test]
    fn test_await_keypress() -> Result<(), io::Error> {
        let mut k = Keypad::default();
        k.set_down(1);
        let mut input = DummyInput::new(&[
            HostEvent::KeyUp('1'),
            HostEvent::KeyDown('p'),
            HostEvent::KeyDown('z'),
        ]);
        assert_eq!(k.await_keypress(&mut input)?, Some(0xa));
        // the release seen while waiting still counts
        assert!(!k.is_down(1));
        assert!(k.is_down(0xa));
        Ok(())
    }

    #[test]
    fn test_await_keypress_quit() -> Result<(), io::Error> {
        let mut k = Keypad::default();
        let mut input = DummyInput::new(&[HostEvent::KeyDown('p')]);
        assert_eq!(k.await_keypress(&mut input)?, None);
        Ok(())
    }
}
