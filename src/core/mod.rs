//! Focus tracking and text synchronization.
//!
//! - **classify**: raw role identifier to capability class
//! - **session**: process-lifetime state and invalidation
//! - **focus**: focused-element tracking
//! - **sync**: pull/push of text and cursor
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── Accessibility platform (root handle)
//! ├── FocusedElement (handle + Role, at most one)
//! ├── Classifier (role table)
//! └── Buffer (mirror: text + cursor)
//! ```

pub mod classify;
pub mod focus;
pub mod session;
pub mod sync;

pub use classify::{Classifier, Role};
pub use session::{FocusedElement, Session};
pub use sync::PushReport;
