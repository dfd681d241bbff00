//! Decoded keyboard events
//!
//! Converts raw tap data (UTF-16 units, flag bits, key code) into a
//! [`KeyEvent`] and rewrites navigation keys into arrow keys.

use bitflags::bitflags;

use crate::config::NavigationConfig;

pub const ENTER: char = '\r';
pub const ESCAPE: char = '\u{1b}';

/// Virtual key codes of the arrow keys
pub mod keycode {
    pub const LEFT: u16 = 123;
    pub const RIGHT: u16 = 124;
    pub const DOWN: u16 = 125;
    pub const UP: u16 = 126;
}

bitflags! {
    /// Modifier keys, using the platform's event flag bits
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u64 {
        const CAPS_LOCK = 0x0001_0000;
        const SHIFT     = 0x0002_0000;
        const CONTROL   = 0x0004_0000;
        const OPTION    = 0x0008_0000;
        const COMMAND   = 0x0010_0000;
    }
}

impl From<u64> for Modifiers {
    /// Keep the modifier bits of a raw event flag word
    fn from(flags: u64) -> Self {
        Modifiers::from_bits_truncate(flags)
    }
}

/// A single keyboard event as seen by the dispatcher
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Typed character (`'\0'` when the event carries none)
    pub character: char,
    /// Repeat count handed to the Buffer
    pub count: u32,
    pub modifiers: Modifiers,
    /// Virtual key code
    pub keycode: u16,
    pub autorepeat: bool,
}

impl KeyEvent {
    /// Plain key press with a repeat count of one
    pub fn new(character: char, modifiers: Modifiers) -> Self {
        Self {
            character,
            count: 1,
            modifiers,
            keycode: 0,
            autorepeat: false,
        }
    }

    /// Decode raw event data: the UTF-16 string the event produced, its flag
    /// word, key code and auto-repeat bit.
    pub fn decode(units: &[u16], flags: u64, keycode: u16, autorepeat: bool) -> Self {
        let character = char::decode_utf16(units.iter().copied())
            .next()
            .and_then(|c| c.ok())
            .unwrap_or('\0');
        Self {
            character,
            count: units.len() as u32,
            modifiers: Modifiers::from(flags),
            keycode,
            autorepeat,
        }
    }

    pub fn has(&self, modifiers: Modifiers) -> bool {
        self.modifiers.contains(modifiers)
    }
}

/// Characters rewritten to arrow keys on list-like elements
#[derive(Clone, Debug)]
pub struct NavigationMap {
    keys: [(char, u16); 4],
}

impl NavigationMap {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            keys: [
                (config.left, keycode::LEFT),
                (config.down, keycode::DOWN),
                (config.up, keycode::UP),
                (config.right, keycode::RIGHT),
            ],
        }
    }

    pub fn arrow_for(&self, character: char) -> Option<u16> {
        self.keys
            .iter()
            .find(|(key, _)| *key == character)
            .map(|(_, code)| *code)
    }

    /// Rewrite `event` into an arrow key press, or `None` if unmapped
    pub fn remap(&self, event: &KeyEvent) -> Option<KeyEvent> {
        let code = self.arrow_for(event.character)?;
        Some(KeyEvent {
            keycode: code,
            autorepeat: false,
            ..event.clone()
        })
    }
}
