//! axmode - vi-style modal editing for native text controls
//!
//! axmode mirrors the focused text control through the accessibility API and
//! lets a modal Buffer edit that mirror. Each intercepted keystroke is either
//! passed to the control, rewritten, or consumed and written back.
//!
//! # Modules
//!
//! - **core**: focus tracking, role classification, text/cursor sync
//! - **input**: key decoding and the per-keystroke dispatcher
//! - **buffer**: the Buffer collaborator interface and mirror types
//! - **platform**: accessibility boundary (macOS backend)
//! - **config**: `~/.axmode/config.toml`

pub mod buffer;
pub mod config;
pub mod core;
pub mod error;
pub mod input;
pub mod platform;

#[cfg(test)]
mod testing;

pub use crate::buffer::{Buffer, Cursor, Mirror, Mode, PassiveBuffer};
pub use crate::config::Config;
pub use crate::core::{Role, Session};
pub use crate::error::{AxError, Result};
pub use crate::input::{Disposition, KeyEvent, Modifiers};
