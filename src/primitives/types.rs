//! Primitive Types - props and callbacks for widgets.

use std::rc::Rc;

use crate::mask::DateFormat;

/// Cleanup function returned by primitives.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Callback Types
// =============================================================================

/// Value change callback. Receives the new `YYYY-MM-DD` value.
///
/// Rc so the same callback can be captured by several closures.
pub type ChangeCallback = Rc<dyn Fn(&str)>;

/// Focus or blur callback.
pub type FocusCallback = Rc<dyn Fn()>;

// =============================================================================
// DateInputProps
// =============================================================================

/// Properties for the masked date input.
///
/// ```ignore
/// let props = DateInputProps {
///     value: "2023-12-12".to_string(),
///     on_change: Some(Rc::new(|v| println!("{v}"))),
///     ..Default::default()
/// };
/// ```
#[derive(Default, Clone)]
pub struct DateInputProps {
    /// Optional component ID for lookup.
    pub id: Option<String>,

    /// Initial value: empty or `YYYY-MM-DD`. Later updates go through
    /// `DateInput::set_value`.
    pub value: String,

    /// Group order of the mask (default `MM/DD/YYYY`).
    pub format: DateFormat,

    /// Hint shown while the field is empty. Defaults to the format pattern.
    pub placeholder: Option<String>,

    /// Position in the Tab order (default 0).
    pub tab_index: Option<i32>,

    /// Called with the new value each time the date becomes complete or
    /// changes while complete.
    pub on_change: Option<ChangeCallback>,

    /// Called when the input gains focus.
    pub on_focus: Option<FocusCallback>,

    /// Called when the input loses focus.
    pub on_blur: Option<FocusCallback>,
}
