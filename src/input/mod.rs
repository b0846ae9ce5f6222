//! Keyboard input: bindable actions and their shortcut categories.

/// Bindable actions.
pub mod keyboard;

pub use keyboard::{KeyAction, ShortcutCategory};
