//! Focus tracking
//!
//! Compares the platform's focused element against the tracked one and
//! reclassifies only when it changed.

use tracing::{debug, trace};

use super::classify::Role;
use super::session::{FocusedElement, Session};
use crate::buffer::{Buffer, Mode};
use crate::platform::Accessibility;

impl<P: Accessibility, B: Buffer> Session<P, B> {
    /// Query the focused element and update the tracked one.
    ///
    /// Returns whether an operable element is focused. The same element as
    /// before is left untouched; anything else invalidates the session
    /// first. A failed query counts as no focus.
    pub fn refresh_focus(&mut self) -> bool {
        let focused = match self.platform.focused_element() {
            Ok(focused) => focused,
            Err(e) => {
                debug!("Focus query failed: {}", e);
                self.invalidate();
                return false;
            }
        };

        if let (Some(current), Some(new)) = (&self.tracked, &focused) {
            if current.handle == *new {
                return true;
            }
        }

        self.invalidate();

        let Some(handle) = focused else {
            trace!("Nothing focused");
            return false;
        };

        let raw = match self.platform.role(&handle) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Role query failed: {}", e);
                None
            }
        };
        let role = self.classifier.classify(raw.as_deref());
        if !role.is_supported() {
            debug!("Unsupported focus: {}", raw.as_deref().unwrap_or("<no role>"));
            return false;
        }

        debug!(
            "Focused {:?} element ({})",
            role,
            raw.as_deref().unwrap_or_default()
        );
        self.tracked = Some(FocusedElement { handle, role });
        true
    }

    /// Per-event refresh: focus, then a ground-truth pull for text elements
    /// unless an insert-mode edit may be in flight.
    pub fn refresh(&mut self) -> bool {
        self.supported = self.refresh_focus();
        if !self.supported {
            return false;
        }

        if self.role() == Role::Text && self.buffer.mirror().cursor.mode != Mode::Insert {
            if let Err(e) = self.pull() {
                debug!("Pull failed: {}", e);
                return false;
            }
        }
        true
    }
}
