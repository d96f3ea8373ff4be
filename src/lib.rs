//! # spark-datefield
//!
//! Masked date entry for reactive terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity. The user types digits into a `__/__/____` mask and
//! the host receives `YYYY-MM-DD`.
//!
//! ## Modules
//!
//! - [`mask`] - Pure masking state machine (buffer, filter, cursor, normalize)
//! - [`engine`] - Component index registry
//! - [`state`] - Focus, keyboard routing, crossterm bridge
//! - [`primitives`] - The [`date_input`] widget
//! - [`error`] - Inbound value errors

pub mod engine;
pub mod error;
pub mod mask;
pub mod primitives;
pub mod state;

pub use error::ValueError;

pub use engine::{
    allocate_index, get_id, get_index, is_allocated, on_destroy, release_index, reset_registry,
};

pub use mask::{
    denormalize, normalize, transition, DateFormat, MaskBuffer, MaskInput, MaskState, Phase,
    Transition, EMPTY_MASK,
};

pub use primitives::{date_input, ChangeCallback, Cleanup, DateInput, DateInputProps, FocusCallback};

pub use state::{
    // Focus
    blur, focus, focus_next, focus_previous, get_focusable_indices, get_focused_index,
    has_focus, is_focused, register_callbacks, reset_focus_state, FocusCallbacks,
    // Keyboard
    dispatch as dispatch_keyboard, last_event, last_key, on as on_keyboard, on_focused,
    reset_keyboard_state, KeyState, KeyboardEvent, Modifiers,
};
