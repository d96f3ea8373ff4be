//! State Module - Runtime state shared by all widgets
//!
//! - **Focus** - Focusable registry, Tab cycling, callbacks
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Input** - crossterm bridge and event routing

pub mod focus;
pub mod input;
pub mod keyboard;

pub use focus::{
    blur, focus, focus_next, focus_previous, get_focusable_indices, get_focused_index,
    has_focus, is_focused, register_callbacks, register_focusable, reset_focus_state,
    FocusCallbacks,
};
pub use keyboard::{
    dispatch, dispatch_focused, last_event, last_key, on, on_focused, reset_keyboard_state,
    KeyHandler, KeyState, KeyboardEvent, Modifiers,
};
