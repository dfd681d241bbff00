//! Text and cursor synchronization between the mirror and the platform
//!
//! - **Pull** reads the element into the mirror, touching it only when the
//!   fetched value differs, and tells the Buffer what was reset.
//! - **Push** writes the mirror back. Text is written only when dirty; the
//!   cursor write waits for the platform to settle after a text write.

use std::thread;

use tracing::{debug, trace};

use super::classify::Role;
use super::session::{FocusedElement, Session};
use crate::buffer::Buffer;
use crate::error::{AxError, Result};
use crate::platform::{Accessibility, TextRange};

/// What a combined push did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PushReport {
    /// The text was written to the element
    pub text_written: bool,
    /// The settling delay ran before the cursor write
    pub settled: bool,
}

impl<P: Accessibility, B: Buffer> Session<P, B> {
    /// Read the element's text into the mirror.
    ///
    /// Returns whether the mirror changed. On error the mirror is untouched.
    pub fn pull_text(&mut self) -> Result<bool> {
        let element = self
            .tracked
            .as_ref()
            .filter(|el| el.role == Role::Text)
            .ok_or(AxError::NotOperable)?;
        let text = self.platform.text(&element.handle)?;

        if self.config.diagnostics.attributed_text {
            let range = TextRange::new(0, text.encode_utf16().count());
            match self.platform.attributed_text_summary(&element.handle, range) {
                Ok(Some(summary)) => debug!("Attributed text: {}", summary),
                Ok(None) => {}
                Err(e) => debug!("Attributed text unavailable: {}", e),
            }
        }

        let mirror = self.buffer.mirror_mut();
        if mirror.text == text {
            return Ok(false);
        }
        trace!("Text reset ({} -> {} bytes)", mirror.text.len(), text.len());
        mirror.text = text;
        self.buffer.notify_text_reset();
        Ok(true)
    }

    /// Read the element's selected range into the mirror cursor.
    pub fn pull_cursor(&mut self) -> Result<bool> {
        let element = self
            .tracked
            .as_ref()
            .filter(|el| el.role == Role::Text)
            .ok_or(AxError::NotOperable)?;
        let range = self.platform.selected_range(&element.handle)?;

        let cursor = &mut self.buffer.mirror_mut().cursor;
        if cursor.range() == range {
            return Ok(false);
        }
        trace!("Cursor reset to {}+{}", range.location, range.length);
        cursor.position = range.location;
        cursor.selection = range.length;
        self.buffer.notify_cursor_reset();
        Ok(true)
    }

    /// Text pull followed by cursor pull
    pub fn pull(&mut self) -> Result<()> {
        self.pull_text()?;
        self.pull_cursor()?;
        Ok(())
    }

    /// Write the mirror text if the Buffer marked it dirty.
    ///
    /// Returns whether a write was issued. The dirty flag is left alone.
    pub fn push_text(&mut self) -> Result<bool> {
        let element = operable(&self.tracked, self.supported)?;
        let mirror = self.buffer.mirror();
        if !mirror.cursor.dirty {
            return Ok(false);
        }
        self.platform.set_text(&element.handle, &mirror.text)?;
        trace!("Wrote {} bytes", mirror.text.len());
        Ok(true)
    }

    /// Write the mirror cursor, settling first if the text is dirty.
    pub fn push_cursor(&mut self) -> Result<bool> {
        let settle = self.buffer.mirror().cursor.dirty;
        self.write_cursor(settle)
    }

    /// Text push, then cursor push; the first failure stops the sequence.
    pub fn push(&mut self) -> Result<PushReport> {
        let text_written = self.push_text()?;
        let settled = self.write_cursor(text_written)?;
        Ok(PushReport {
            text_written,
            settled,
        })
    }

    fn write_cursor(&mut self, settle: bool) -> Result<bool> {
        let element = operable(&self.tracked, self.supported)?;
        let range = self.buffer.mirror().cursor.range();
        if settle {
            thread::sleep(self.config.settle_delay());
        }
        self.platform.set_selected_range(&element.handle, range)?;
        trace!("Cursor set to {}+{}", range.location, range.length);
        Ok(settle)
    }
}

fn operable<E>(tracked: &Option<FocusedElement<E>>, supported: bool) -> Result<&FocusedElement<E>> {
    match tracked {
        Some(element) if supported => Ok(element),
        _ => Err(AxError::NotOperable),
    }
}
