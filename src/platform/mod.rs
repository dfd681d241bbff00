//! Accessibility platform boundary.
//!
//! The core talks to the UI through the [`Accessibility`] trait:
//!
//! - **focused element** of the system-wide root
//! - **role**, **value** and **selected text range** attributes of an element
//! - optional diagnostics and application-level switches
//!
//! Element handles are owned values. Dropping a handle releases it, so the
//! tracker never pairs acquire/release calls by hand.
//!
//! # Backends
//!
//! - **macos**: `AXUIElement` via ApplicationServices (macOS only)

#[cfg(target_os = "macos")]
pub mod macos;

use crate::error::Result;

/// Attribute names of the accessibility protocol
pub mod attr {
    pub const FOCUSED_ELEMENT: &str = "AXFocusedUIElement";
    pub const ROLE: &str = "AXRole";
    pub const VALUE: &str = "AXValue";
    pub const SELECTED_TEXT_RANGE: &str = "AXSelectedTextRange";
    pub const ATTRIBUTED_STRING_FOR_RANGE: &str = "AXAttributedStringForRange";
    pub const MANUAL_ACCESSIBILITY: &str = "AXManualAccessibility";
}

/// A (location, length) range within an element's text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextRange {
    pub location: usize,
    pub length: usize,
}

impl TextRange {
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }
}

/// Read/write access to the platform accessibility tree.
///
/// Every call is synchronous and either succeeds or fails once; callers do
/// not retry.
pub trait Accessibility {
    /// Owned element handle. Equality is platform identity.
    type Element: PartialEq;

    /// Currently focused element of the system-wide root.
    fn focused_element(&self) -> Result<Option<Self::Element>>;

    /// Raw role identifier, `None` when the element has no role.
    fn role(&self, element: &Self::Element) -> Result<Option<String>>;

    /// Full text value
    fn text(&self, element: &Self::Element) -> Result<String>;

    fn selected_range(&self, element: &Self::Element) -> Result<TextRange>;

    fn set_text(&mut self, element: &Self::Element, text: &str) -> Result<()>;

    fn set_selected_range(&mut self, element: &Self::Element, range: TextRange) -> Result<()>;

    /// Human readable summary of the rich-text representation of `range`.
    fn attributed_text_summary(
        &self,
        _element: &Self::Element,
        _range: TextRange,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// Ask the application `pid` to expose its accessibility tree.
    fn enable_manual_accessibility(&mut self, _pid: i32) -> Result<()> {
        Ok(())
    }
}
