use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::{Duration, Instant};

/// opaque identifier of a key on the host; for terminals, the character typed
pub type HostKey = char;

/// something that happened on the host that the interpreter cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    KeyDown(HostKey),
    KeyUp(HostKey),
    Quit,
}

/// reads key events from the host
pub trait Input {
    /// everything that has happened since the last call, without blocking
    fn poll_events(&mut self) -> Result<Vec<HostEvent>, io::Error>;

    /// block until the next event
    fn wait_event(&mut self) -> Result<HostEvent, io::Error>;
}

/// terminals only report presses (and autorepeats), so a key counts as
/// released once it hasn't repeated for this long
const KEY_HOLD: Duration = Duration::from_millis(120);

/// simple implementation of Input, using the terminal in raw mode
pub struct StdinInput {
    pending: VecDeque<HostEvent>,
    held: HashMap<HostKey, Instant>,
}

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            pending: VecDeque::new(),
            held: HashMap::new(),
        })
    }

    /// wait up to `timeout` for terminal events, then queue them along with
    /// any synthesised releases
    fn pump(&mut self, timeout: Duration) -> Result<(), io::Error> {
        if poll(timeout)? {
            loop {
                let evt = read()?;
                self.translate(evt);
                if !poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        self.release_stale(Instant::now());
        Ok(())
    }

    fn translate(&mut self, evt: Event) {
        match evt {
            Event::Key(KeyEvent {
                code: KeyCode::Esc, ..
            }) => self.pending.push_back(HostEvent::Quit),
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => {
                self.pending.push_back(HostEvent::Quit)
            }
            Event::Key(KeyEvent {
                code: KeyCode::Char(key),
                ..
            }) => {
                let key = key.to_ascii_lowercase();
                // a repeat just extends the hold
                if self.held.insert(key, Instant::now()).is_none() {
                    self.pending.push_back(HostEvent::KeyDown(key));
                }
            }
            other => tracing::debug!("ignoring terminal event {:?}", other),
        }
    }

    fn release_stale(&mut self, now: Instant) {
        let stale: Vec<HostKey> = self
            .held
            .iter()
            .filter(|(_, pressed)| now.duration_since(**pressed) >= KEY_HOLD)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            self.held.remove(&key);
            self.pending.push_back(HostEvent::KeyUp(key));
        }
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn poll_events(&mut self) -> Result<Vec<HostEvent>, io::Error> {
        self.pump(Duration::ZERO)?;
        Ok(self.pending.drain(..).collect())
    }

    fn wait_event(&mut self) -> Result<HostEvent, io::Error> {
        loop {
            if let Some(evt) = self.pending.pop_front() {
                return Ok(evt);
            }
            self.pump(KEY_HOLD)?;
        }
    }
}

/// dummy Input implementation for testing; replays a script of events, then
/// reports Quit forever so nothing blocks
pub struct DummyInput {
    events: VecDeque<HostEvent>,
}

impl DummyInput {
    pub fn new(events: &[HostEvent]) -> Self {
        DummyInput {
            events: events.iter().copied().collect(),
        }
    }
}

impl Input for DummyInput {
    fn poll_events(&mut self) -> Result<Vec<HostEvent>, io::Error> {
        Ok(self.events.drain(..).collect())
    }

    fn wait_event(&mut self) -> Result<HostEvent, io::Error> {
        Ok(self.events.pop_front().unwrap_or(HostEvent::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_replays_then_quits() -> Result<(), io::Error> {
        let mut input = DummyInput::new(&[HostEvent::KeyDown('q'), HostEvent::KeyUp('q')]);
        assert_eq!(input.wait_event()?, HostEvent::KeyDown('q'));
        assert_eq!(input.poll_events()?, vec![HostEvent::KeyUp('q')]);
        assert_eq!(input.wait_event()?, HostEvent::Quit);
        Ok(())
    }

    #[test]
    fn test_terminal_repeats_then_release() {
        // built by hand so the test doesn't need a tty
        let mut input = StdinInput {
            pending: VecDeque::new(),
            held: HashMap::new(),
        };
        let press = || Event::Key(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT));
        input.translate(press());
        input.translate(press());
        assert_eq!(
            input.pending.drain(..).collect::<Vec<_>>(),
            vec![HostEvent::KeyDown('w')]
        );
        input.release_stale(Instant::now());
        assert!(input.pending.is_empty());
        input.release_stale(Instant::now() + KEY_HOLD);
        assert_eq!(input.pending.pop_front(), Some(HostEvent::KeyUp('w')));
    }

    #[test]
    fn test_escape_quits() {
        let mut input = StdinInput {
            pending: VecDeque::new(),
            held: HashMap::new(),
        };
        input.translate(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        input.translate(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(
            input.pending.drain(..).collect::<Vec<_>>(),
            vec![HostEvent::Quit, HostEvent::Quit]
        );
    }
}
