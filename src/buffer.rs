//! The modal Buffer collaborator and the mirror it exposes.
//!
//! The command language itself lives behind the [`Buffer`] trait. The sync
//! core only reads and replaces the [`Mirror`] and compares the mode before
//! and after feeding a keystroke.

use crate::platform::TextRange;

/// Modal state of the Buffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// No mode chosen yet (fresh focus)
    #[default]
    Unset,
    Normal,
    Insert,
}

impl Mode {
    /// Insert or unset: keystrokes go to the native control.
    pub fn is_insert_like(self) -> bool {
        matches!(self, Mode::Insert | Mode::Unset)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Unset => "UNSET",
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }
}

/// Cursor state of the mirror
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Caret position
    pub position: usize,
    /// Selection length (0 for a plain caret)
    pub selection: usize,
    pub mode: Mode,
    /// Text was changed by the Buffer and must be written back
    pub dirty: bool,
}

impl Cursor {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.position, self.selection)
    }
}

/// Local copy of the focused element's text and cursor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mirror {
    pub text: String,
    pub cursor: Cursor,
}

impl Mirror {
    /// Reset to the empty state used after every invalidation
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Modal edit state machine driven by the dispatcher.
///
/// Implementations own the mirror. `clear` must leave it empty with the
/// mode unset.
pub trait Buffer {
    /// Called once when the session is created.
    fn begin(&mut self) {}

    fn clear(&mut self);

    /// Feed one keystroke. May change mode, text, cursor and the dirty flag.
    fn input(&mut self, character: char, count: u32);

    /// The mirror text was replaced from the platform.
    fn notify_text_reset(&mut self);

    /// The mirror cursor was replaced from the platform.
    fn notify_cursor_reset(&mut self);

    /// Runs before a text element's handle is released.
    fn on_focus_deactivate(&mut self);

    fn mirror(&self) -> &Mirror;

    fn mirror_mut(&mut self) -> &mut Mirror;
}

/// Buffer that only mirrors the platform.
///
/// Input is ignored, the mode stays unset and nothing is ever dirty.
#[derive(Debug, Default)]
pub struct PassiveBuffer {
    mirror: Mirror,
    text_resets: usize,
    cursor_resets: usize,
}

impl PassiveBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of text reset notifications received
    pub fn text_resets(&self) -> usize {
        self.text_resets
    }

    /// Number of cursor reset notifications received
    pub fn cursor_resets(&self) -> usize {
        self.cursor_resets
    }
}

impl Buffer for PassiveBuffer {
    fn clear(&mut self) {
        self.mirror.reset();
    }

    fn input(&mut self, _character: char, _count: u32) {}

    fn notify_text_reset(&mut self) {
        self.text_resets += 1;
    }

    fn notify_cursor_reset(&mut self) {
        self.cursor_resets += 1;
    }

    fn on_focus_deactivate(&mut self) {}

    fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    fn mirror_mut(&mut self) -> &mut Mirror {
        &mut self.mirror
    }
}
