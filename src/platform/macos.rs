//! AXUIElement backend for macOS
//!
//! Wraps the ApplicationServices accessibility API. Every handle copied out of
//! the API is owned by an [`Element`] and released when it is dropped.

use std::ffi::c_void;
use std::ptr;

use accessibility_sys::{
    kAXErrorSuccess, kAXTrustedCheckOptionPrompt, kAXValueTypeCFRange,
    AXIsProcessTrustedWithOptions, AXUIElementCopyAttributeValue,
    AXUIElementCopyParameterizedAttributeValue, AXUIElementCreateApplication,
    AXUIElementCreateSystemWide, AXUIElementRef, AXUIElementSetAttributeValue, AXValueCreate,
    AXValueGetValue, AXValueRef,
};
use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::CFString;
use core_foundation_sys::base::{CFEqual, CFIndex, CFRange, CFRelease, CFTypeRef};

use super::{attr, Accessibility, TextRange};
use crate::error::{AxError, Result};

/// Longest attributed-text summary handed to the log
const SUMMARY_LIMIT: usize = 256;

/// Owned AXUIElement reference
pub struct Element(AXUIElementRef);

impl Element {
    /// Take ownership of a +1 reference; `None` for null.
    unsafe fn from_create_rule(raw: AXUIElementRef) -> Option<Self> {
        if raw.is_null() {
            None
        } else {
            Some(Self(raw))
        }
    }

    fn as_raw(&self) -> AXUIElementRef {
        self.0
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        unsafe { CFEqual(self.0 as CFTypeRef, other.0 as CFTypeRef) != 0 }
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        unsafe { CFRelease(self.0 as CFTypeRef) }
    }
}

/// System-wide accessibility access
pub struct MacAccessibility {
    root: Element,
}

impl MacAccessibility {
    /// Check for privileged access (optionally showing the consent prompt)
    /// and create the system-wide root element.
    pub fn acquire(prompt: bool) -> Result<Self> {
        let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
        let options = CFDictionary::from_CFType_pairs(&[(
            key.as_CFType(),
            CFBoolean::from(prompt).as_CFType(),
        )]);

        let trusted = unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) };
        if !trusted {
            return Err(AxError::PermissionDenied);
        }

        let root = unsafe { Element::from_create_rule(AXUIElementCreateSystemWide()) }
            .ok_or(AxError::PermissionDenied)?;
        Ok(Self { root })
    }
}

/// Copy an attribute value. The value is owned even when an error code is
/// returned alongside it.
fn copy_raw(element: AXUIElementRef, attribute: &'static str) -> (i32, CFTypeRef) {
    let name = CFString::from_static_string(attribute);
    let mut value: CFTypeRef = ptr::null();
    let code =
        unsafe { AXUIElementCopyAttributeValue(element, name.as_concrete_TypeRef(), &mut value) };
    (code, value)
}

fn copy_attribute(element: &Element, attribute: &'static str) -> Result<Option<CFType>> {
    let (code, raw) = copy_raw(element.as_raw(), attribute);
    let value = (!raw.is_null()).then(|| unsafe { CFType::wrap_under_create_rule(raw) });
    if code != kAXErrorSuccess {
        return Err(AxError::QueryFailed { attribute, code });
    }
    Ok(value)
}

fn set_attribute(element: &Element, attribute: &'static str, value: CFTypeRef) -> Result<()> {
    let name = CFString::from_static_string(attribute);
    let code =
        unsafe { AXUIElementSetAttributeValue(element.as_raw(), name.as_concrete_TypeRef(), value) };
    if code != kAXErrorSuccess {
        return Err(AxError::WriteFailed { attribute, code });
    }
    Ok(())
}

fn range_value(range: TextRange) -> Result<CFType> {
    let range = CFRange {
        location: range.location as CFIndex,
        length: range.length as CFIndex,
    };
    let raw = unsafe { AXValueCreate(kAXValueTypeCFRange, &range as *const CFRange as *const c_void) };
    if raw.is_null() {
        return Err(AxError::UnexpectedValue {
            attribute: attr::SELECTED_TEXT_RANGE,
        });
    }
    Ok(unsafe { CFType::wrap_under_create_rule(raw as CFTypeRef) })
}

fn expect_string(value: Option<CFType>, attribute: &'static str) -> Result<String> {
    value
        .and_then(|v| v.downcast_into::<CFString>())
        .map(|s| s.to_string())
        .ok_or(AxError::UnexpectedValue { attribute })
}

impl Accessibility for MacAccessibility {
    type Element = Element;

    fn focused_element(&self) -> Result<Option<Element>> {
        let (code, raw) = copy_raw(self.root.as_raw(), attr::FOCUSED_ELEMENT);
        let element = unsafe { Element::from_create_rule(raw as AXUIElementRef) };
        if code != kAXErrorSuccess {
            // `element` is released here
            return Err(AxError::QueryFailed {
                attribute: attr::FOCUSED_ELEMENT,
                code,
            });
        }
        Ok(element)
    }

    fn role(&self, element: &Element) -> Result<Option<String>> {
        let value = copy_attribute(element, attr::ROLE)?;
        Ok(value
            .and_then(|v| v.downcast_into::<CFString>())
            .map(|s| s.to_string()))
    }

    fn text(&self, element: &Element) -> Result<String> {
        let value = copy_attribute(element, attr::VALUE)?;
        expect_string(value, attr::VALUE)
    }

    fn selected_range(&self, element: &Element) -> Result<TextRange> {
        let value = copy_attribute(element, attr::SELECTED_TEXT_RANGE)?.ok_or(
            AxError::UnexpectedValue {
                attribute: attr::SELECTED_TEXT_RANGE,
            },
        )?;

        let mut range = CFRange {
            location: 0,
            length: 0,
        };
        let ok = unsafe {
            AXValueGetValue(
                value.as_CFTypeRef() as AXValueRef,
                kAXValueTypeCFRange,
                &mut range as *mut CFRange as *mut c_void,
            )
        };
        if !ok || range.location < 0 || range.length < 0 {
            return Err(AxError::UnexpectedValue {
                attribute: attr::SELECTED_TEXT_RANGE,
            });
        }
        Ok(TextRange::new(range.location as usize, range.length as usize))
    }

    fn set_text(&mut self, element: &Element, text: &str) -> Result<()> {
        let value = CFString::new(text);
        set_attribute(element, attr::VALUE, value.as_CFTypeRef())
    }

    fn set_selected_range(&mut self, element: &Element, range: TextRange) -> Result<()> {
        let value = range_value(range)?;
        set_attribute(element, attr::SELECTED_TEXT_RANGE, value.as_CFTypeRef())
    }

    fn attributed_text_summary(&self, element: &Element, range: TextRange) -> Result<Option<String>> {
        let attribute = attr::ATTRIBUTED_STRING_FOR_RANGE;
        let name = CFString::from_static_string(attribute);
        let parameter = range_value(range)?;
        let mut raw: CFTypeRef = ptr::null();
        let code = unsafe {
            AXUIElementCopyParameterizedAttributeValue(
                element.as_raw(),
                name.as_concrete_TypeRef(),
                parameter.as_CFTypeRef(),
                &mut raw,
            )
        };
        let value = (!raw.is_null()).then(|| unsafe { CFType::wrap_under_create_rule(raw) });
        if code != kAXErrorSuccess {
            return Err(AxError::QueryFailed { attribute, code });
        }

        Ok(value.map(|v| {
            let mut summary = format!("{:?}", v);
            if summary.len() > SUMMARY_LIMIT {
                let mut end = SUMMARY_LIMIT;
                while !summary.is_char_boundary(end) {
                    end -= 1;
                }
                summary.truncate(end);
                summary.push_str("...");
            }
            summary
        }))
    }

    fn enable_manual_accessibility(&mut self, pid: i32) -> Result<()> {
        let app = unsafe { Element::from_create_rule(AXUIElementCreateApplication(pid)) }.ok_or(
            AxError::UnexpectedValue {
                attribute: attr::MANUAL_ACCESSIBILITY,
            },
        )?;
        set_attribute(
            &app,
            attr::MANUAL_ACCESSIBILITY,
            CFBoolean::true_value().as_CFTypeRef(),
        )
    }
}
