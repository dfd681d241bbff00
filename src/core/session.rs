//! Session state
//!
//! One session exists for the lifetime of the process. It owns the platform
//! access, the tracked element (at most one) and the Buffer mirror, and every
//! core operation takes it by reference.

use tracing::{debug, warn};

use super::classify::{Classifier, Role};
use crate::buffer::Buffer;
use crate::config::Config;
use crate::platform::Accessibility;

/// Focused element handle together with its classified role.
///
/// The role is fixed for the life of the handle. Dropping it releases the
/// handle.
pub struct FocusedElement<E> {
    pub(crate) handle: E,
    pub(crate) role: Role,
}

/// Process-lifetime sync state
pub struct Session<P: Accessibility, B: Buffer> {
    pub(crate) platform: P,
    pub(crate) buffer: B,
    /// Never holds an element classified `Role::None`
    pub(crate) tracked: Option<FocusedElement<P::Element>>,
    /// Result of the last focus refresh
    pub(crate) supported: bool,
    pub(crate) classifier: Classifier,
    pub(crate) config: Config,
}

impl<P: Accessibility, B: Buffer> Session<P, B> {
    /// Create a session over an already privileged platform
    pub fn new(platform: P, mut buffer: B, config: Config) -> Self {
        buffer.begin();
        Self {
            platform,
            buffer,
            tracked: None,
            supported: false,
            classifier: Classifier::new(&config.roles),
            config,
        }
    }

    /// Role of the tracked element, `Role::None` when nothing is tracked
    pub fn role(&self) -> Role {
        self.tracked.as_ref().map_or(Role::None, |el| el.role)
    }

    pub fn is_tracking(&self) -> bool {
        self.tracked.is_some()
    }

    /// Whether the last focus refresh found an operable element
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Drop all per-element state.
    ///
    /// Clears the mirror, runs the Buffer's deactivation hook when a text
    /// element is being left, then releases the handle.
    pub fn invalidate(&mut self) {
        self.buffer.clear();

        if let Some(element) = self.tracked.take() {
            if element.role == Role::Text {
                self.buffer.on_focus_deactivate();
            }
            debug!("Released {:?} element", element.role);
        }

        self.supported = false;
    }

    /// Frontmost application changed to `pid`
    pub fn front_app_changed(&mut self, pid: i32) {
        if !self.config.manual_accessibility {
            return;
        }
        match self.platform.enable_manual_accessibility(pid) {
            Ok(()) => debug!("Enabled manual accessibility for pid {}", pid),
            Err(e) => warn!("Failed to enable manual accessibility for pid {}: {}", pid, e),
        }
    }
}

#[cfg(target_os = "macos")]
impl<B: Buffer> Session<crate::platform::macos::MacAccessibility, B> {
    /// Acquire privileged accessibility access and the system-wide root.
    ///
    /// Fails with `AxError::PermissionDenied` when access is not granted.
    pub fn bootstrap(buffer: B, config: Config) -> crate::error::Result<Self> {
        let platform = crate::platform::macos::MacAccessibility::acquire(config.prompt_for_access)?;
        Ok(Self::new(platform, buffer, config))
    }
}
