//! Keystroke Filter - sorts key events before they reach the buffer.

use crate::state::{KeyState, KeyboardEvent};

/// Editing and navigation keys the mask understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
}

/// Classification of one key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// `0`-`9`, written at the caret.
    Digit(char),
    /// Caret movement or slot clearing.
    Navigation(NavKey),
    /// Left to whoever handles keys after the widget: Tab, Up/Down, chords
    /// and named keys the mask has no use for (Escape, Enter, F-keys).
    PassThrough,
    /// Release events. Not a keystroke at all.
    Ignored,
    /// Any other single printable character. Swallowed without touching
    /// the buffer.
    Rejected,
}

/// Classify a key event.
pub fn classify(event: &KeyboardEvent) -> KeyClass {
    if event.state == KeyState::Release {
        return KeyClass::Ignored;
    }

    let mods = event.modifiers;
    if mods.ctrl || mods.alt || mods.meta {
        return KeyClass::PassThrough;
    }

    match event.key.as_str() {
        "ArrowLeft" => KeyClass::Navigation(NavKey::Left),
        "ArrowRight" => KeyClass::Navigation(NavKey::Right),
        "Home" => KeyClass::Navigation(NavKey::Home),
        "End" => KeyClass::Navigation(NavKey::End),
        "Backspace" => KeyClass::Navigation(NavKey::Backspace),
        "Delete" => KeyClass::Navigation(NavKey::Delete),
        "Tab" | "ArrowUp" | "ArrowDown" => KeyClass::PassThrough,
        key => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() => KeyClass::Digit(c),
                (Some(c), None) if !c.is_control() => KeyClass::Rejected,
                _ => KeyClass::PassThrough,
            }
        }
    }
}
