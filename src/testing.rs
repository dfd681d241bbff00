//! In-memory platform and scripted buffer for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::buffer::{Buffer, Mirror, Mode};
use crate::error::{AxError, Result};
use crate::platform::{attr, Accessibility, TextRange};

pub const ESC: char = '\u{1b}';

/// Handle into the fake tree; counts its own release
#[derive(Debug)]
pub struct FakeElement {
    pub id: u32,
    released: Rc<Cell<usize>>,
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for FakeElement {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

/// Platform call, in order of issue
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Focus,
    Role(u32),
    ReadText(u32),
    ReadRange(u32),
    AttributedText(u32, TextRange),
    WriteText(u32, String),
    WriteRange(u32, TextRange),
    ManualAccessibility(i32),
}

impl Call {
    pub fn is_write(&self) -> bool {
        matches!(self, Call::WriteText(..) | Call::WriteRange(..))
    }
}

#[derive(Default)]
pub struct FakePlatform {
    pub focused: Option<u32>,
    pub roles: HashMap<u32, String>,
    pub texts: HashMap<u32, String>,
    pub ranges: HashMap<u32, TextRange>,
    /// Focus query fails; the id still yields a handle
    pub fail_focus: bool,
    pub fail_text: bool,
    pub fail_range: bool,
    pub fail_set_text: bool,
    pub fail_set_range: bool,
    pub calls: RefCell<Vec<Call>>,
    acquired: Cell<usize>,
    released: Rc<Cell<usize>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: u32, role: &str, text: &str) -> Self {
        self.roles.insert(id, role.to_string());
        self.texts.insert(id, text.to_string());
        self.ranges.insert(id, TextRange::default());
        self
    }

    pub fn focus(mut self, id: u32) -> Self {
        self.focused = Some(id);
        self
    }

    /// Handles acquired and not yet released
    pub fn live_handles(&self) -> usize {
        self.acquired.get() - self.released.get()
    }

    /// Shared release counter, readable after the platform is dropped
    pub fn released_counter(&self) -> Rc<Cell<usize>> {
        self.released.clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls.borrow().iter().filter(|c| c.is_write()).cloned().collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self, id: u32) -> FakeElement {
        self.acquired.set(self.acquired.get() + 1);
        FakeElement {
            id,
            released: self.released.clone(),
        }
    }
}

fn query_failed(attribute: &'static str) -> AxError {
    AxError::QueryFailed {
        attribute,
        code: -25204,
    }
}

fn write_failed(attribute: &'static str) -> AxError {
    AxError::WriteFailed {
        attribute,
        code: -25200,
    }
}

impl Accessibility for FakePlatform {
    type Element = FakeElement;

    fn focused_element(&self) -> Result<Option<FakeElement>> {
        self.record(Call::Focus);
        let element = self.focused.map(|id| self.handle(id));
        if self.fail_focus {
            return Err(query_failed(attr::FOCUSED_ELEMENT));
        }
        Ok(element)
    }

    fn role(&self, element: &FakeElement) -> Result<Option<String>> {
        self.record(Call::Role(element.id));
        Ok(self.roles.get(&element.id).cloned())
    }

    fn text(&self, element: &FakeElement) -> Result<String> {
        self.record(Call::ReadText(element.id));
        if self.fail_text {
            return Err(query_failed(attr::VALUE));
        }
        self.texts
            .get(&element.id)
            .cloned()
            .ok_or(AxError::UnexpectedValue { attribute: attr::VALUE })
    }

    fn selected_range(&self, element: &FakeElement) -> Result<TextRange> {
        self.record(Call::ReadRange(element.id));
        if self.fail_range {
            return Err(query_failed(attr::SELECTED_TEXT_RANGE));
        }
        Ok(self.ranges.get(&element.id).copied().unwrap_or_default())
    }

    fn set_text(&mut self, element: &FakeElement, text: &str) -> Result<()> {
        self.record(Call::WriteText(element.id, text.to_string()));
        if self.fail_set_text {
            return Err(write_failed(attr::VALUE));
        }
        self.texts.insert(element.id, text.to_string());
        Ok(())
    }

    fn set_selected_range(&mut self, element: &FakeElement, range: TextRange) -> Result<()> {
        self.record(Call::WriteRange(element.id, range));
        if self.fail_set_range {
            return Err(write_failed(attr::SELECTED_TEXT_RANGE));
        }
        self.ranges.insert(element.id, range);
        Ok(())
    }

    fn attributed_text_summary(&self, element: &FakeElement, range: TextRange) -> Result<Option<String>> {
        self.record(Call::AttributedText(element.id, range));
        Ok(Some(format!("{} chars", range.length)))
    }

    fn enable_manual_accessibility(&mut self, pid: i32) -> Result<()> {
        self.record(Call::ManualAccessibility(pid));
        Ok(())
    }
}

/// Minimal vi-like buffer: `i` enters insert, Escape leaves it, `x` deletes
/// under the cursor, `h`/`l` move.
#[derive(Debug, Default)]
pub struct ScriptedBuffer {
    pub mirror: Mirror,
    pub inputs: Vec<(char, u32)>,
    pub text_resets: usize,
    pub cursor_resets: usize,
    pub clears: usize,
    pub deactivations: usize,
    pub began: bool,
}

impl ScriptedBuffer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Buffer for ScriptedBuffer {
    fn begin(&mut self) {
        self.began = true;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.mirror.reset();
    }

    fn input(&mut self, character: char, count: u32) {
        self.inputs.push((character, count));
        let cursor = &mut self.mirror.cursor;
        cursor.dirty = false;

        match (cursor.mode, character) {
            (Mode::Insert | Mode::Unset, ESC) => cursor.mode = Mode::Normal,
            (Mode::Insert | Mode::Unset, _) => {}
            (Mode::Normal, 'i') => cursor.mode = Mode::Insert,
            (Mode::Normal, 'x') => {
                let position = cursor.position;
                if let Some((at, ch)) = self.mirror.text.char_indices().nth(position) {
                    self.mirror.text.replace_range(at..at + ch.len_utf8(), "");
                    self.mirror.cursor.dirty = true;
                }
            }
            (Mode::Normal, 'l') => {
                let len = self.mirror.text.chars().count();
                cursor.position = (cursor.position + count as usize).min(len.saturating_sub(1));
            }
            (Mode::Normal, 'h') => {
                cursor.position = cursor.position.saturating_sub(count as usize);
            }
            (Mode::Normal, _) => {}
        }
    }

    fn notify_text_reset(&mut self) {
        self.text_resets += 1;
    }

    fn notify_cursor_reset(&mut self) {
        self.cursor_resets += 1;
    }

    fn on_focus_deactivate(&mut self) {
        self.deactivations += 1;
    }

    fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    fn mirror_mut(&mut self) -> &mut Mirror {
        &mut self.mirror
    }
}
