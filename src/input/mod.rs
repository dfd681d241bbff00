//! Keyboard input handling.
//!
//! - **keys**: decoded key events, modifier flags, navigation remapping
//! - **dispatch**: per-keystroke pass-through / remap / suppress decision

pub mod dispatch;
pub mod keys;

pub use dispatch::{pass_through_rule, Disposition, PassThroughRule};
pub use keys::{KeyEvent, Modifiers, NavigationMap};
