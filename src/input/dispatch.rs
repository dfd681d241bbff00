//! Per-keystroke dispatch
//!
//! Decides for every intercepted key whether the native control handles it,
//! whether it is rewritten, or whether the Buffer consumes it and the result
//! is written back through the accessibility API.

use tracing::{trace, warn};

use super::keys::{KeyEvent, Modifiers, NavigationMap, ENTER, ESCAPE};
use crate::buffer::{Buffer, Mode};
use crate::core::{Role, Session};
use crate::platform::Accessibility;

/// What to do with an intercepted event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Deliver the original event unchanged
    PassThrough,
    /// Deliver this rewritten event instead
    Remap(KeyEvent),
    /// Drop the event
    Suppress,
}

/// Why an event skipped the Buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassThroughRule {
    Command,
    ShiftEnter,
    ShiftEscape,
    /// Escape in normal mode goes to the host control
    NormalEscape,
    /// Enter in normal mode, e.g. to submit a form
    NormalEnter,
}

/// First matching pass-through rule for `event`, checked in order.
pub fn pass_through_rule(event: &KeyEvent, role: Role, mode: Mode) -> Option<PassThroughRule> {
    let shift = event.has(Modifiers::SHIFT);
    if event.has(Modifiers::COMMAND) {
        return Some(PassThroughRule::Command);
    }
    if event.character == ENTER && shift {
        return Some(PassThroughRule::ShiftEnter);
    }
    if event.character == ESCAPE && shift {
        return Some(PassThroughRule::ShiftEscape);
    }
    if role == Role::Text && mode == Mode::Normal {
        match event.character {
            ESCAPE => return Some(PassThroughRule::NormalEscape),
            ENTER => return Some(PassThroughRule::NormalEnter),
            _ => {}
        }
    }
    None
}

impl<P: Accessibility, B: Buffer> Session<P, B> {
    /// Handle one keyboard event.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Disposition {
        if !self.refresh() {
            return Disposition::PassThrough;
        }

        let role = self.role();
        let mode = self.buffer.mirror().cursor.mode;
        if let Some(rule) = pass_through_rule(event, role, mode) {
            trace!("Pass through: {:?}", rule);
            return Disposition::PassThrough;
        }

        match role {
            Role::Text => self.edit(event),
            role if role.is_navigable() && self.config.navigation.enabled => {
                match NavigationMap::new(&self.config.navigation).remap(event) {
                    Some(remapped) => Disposition::Remap(remapped),
                    None => Disposition::PassThrough,
                }
            }
            _ => Disposition::PassThrough,
        }
    }

    fn edit(&mut self, event: &KeyEvent) -> Disposition {
        let was_insert = self.buffer.mirror().cursor.mode.is_insert_like();
        self.buffer.input(event.character, event.count);
        let mode = self.buffer.mirror().cursor.mode;

        // Insert-mode typing is applied by the native control itself
        if was_insert && mode == Mode::Insert {
            return Disposition::PassThrough;
        }

        // Leaving insert: the control may already hold the keystroke
        if was_insert {
            if let Err(e) = self.pull() {
                warn!("Resync after leaving {} failed: {}", Mode::Insert.as_str(), e);
                return Disposition::PassThrough;
            }
        }

        match self.push() {
            Ok(report) => trace!(
                "Pushed (text written: {}, settled: {})",
                report.text_written,
                report.settled
            ),
            Err(e) => warn!("Push failed: {}", e),
        }
        Disposition::Suppress
    }
}
