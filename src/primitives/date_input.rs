//! Date Input Primitive - masked `MM/DD/YYYY` entry field.
//!
//! Accepts free-form keystrokes and keeps the field text shaped like
//! `__/__/____`, emitting a `YYYY-MM-DD` value whenever the date is complete.
//!
//! # Features
//!
//! - Digits only; every other printable key is swallowed
//! - Caret skips the `/` separators in both directions
//! - Caret starts on the first slot the first time the field is focused
//! - Bracketed paste and raw text fill the slots in order
//! - `DD/MM/YYYY` group order via [`DateFormat::DayMonthYear`]
//!
//! # Data flow
//!
//! ```text
//!   host ── set_value("2023-12-12") ──▶ ┌───────────────┐
//!   keyboard / focus / paste ─────────▶ │ mask machine  │ ── on_change("2023-12-12") ──▶ host
//!                                       └───────────────┘
//!                                          │ display / cursor signals
//!                                          ▼
//!                                       renderer
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_datefield::{date_input, DateInputProps};
//! use std::rc::Rc;
//!
//! let field = date_input(DateInputProps {
//!     on_change: Some(Rc::new(|value| println!("picked {value}"))),
//!     ..Default::default()
//! });
//!
//! field.focus();
//! assert_eq!(field.display(), "__/__/____");
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use spark_signals::{derived, signal, Derived, Signal};
use tracing::debug;

use crate::engine::{allocate_index, on_destroy, release_index};
use crate::mask::{transition, MaskInput, MaskState, Phase};
use crate::state::{focus, input, keyboard, FocusCallbacks, KeyboardEvent};
use super::types::{ChangeCallback, Cleanup, DateInputProps};

// =============================================================================
// Shared Core
// =============================================================================

/// State shared between the handle and the registered handlers.
struct DateInputCore {
    state: RefCell<MaskState>,
    display: Signal<String>,
    cursor: Signal<u16>,
    on_change: Option<ChangeCallback>,
}

impl DateInputCore {
    /// Run one input through the machine, publish the result, emit if needed.
    /// Returns whether the input was consumed.
    fn apply(&self, input: MaskInput<'_>) -> bool {
        let step = {
            let mut state = self.state.borrow_mut();
            let step = transition(&state, &input);
            *state = step.state.clone();
            step
        };

        self.display.set(step.state.display());
        self.cursor.set(step.state.cursor as u16);

        if let (Some(value), Some(cb)) = (step.emission.as_deref(), self.on_change.as_ref()) {
            cb(value);
        }

        step.consumed
    }

    fn phase(&self) -> Phase {
        self.state.borrow().phase
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Handle to a mounted date input.
///
/// Dropping the handle leaves the widget mounted; call [`DateInput::destroy`]
/// (or run the closure from [`DateInput::into_cleanup`]) to release it.
pub struct DateInput {
    index: usize,
    core: Rc<DateInputCore>,
    placeholder: String,
}

impl DateInput {
    /// Component index used for focus and keyboard routing.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Live field text: `""` before first use, otherwise the 10-char mask.
    pub fn display(&self) -> String {
        self.core.display.get()
    }

    /// Reactive field text, for renderers.
    pub fn display_signal(&self) -> Signal<String> {
        self.core.display.clone()
    }

    /// Caret position in `0..=10`.
    pub fn cursor(&self) -> usize {
        self.core.cursor.get() as usize
    }

    /// Reactive caret position, for renderers.
    pub fn cursor_signal(&self) -> Signal<u16> {
        self.core.cursor.clone()
    }

    /// Hint text shown while the field is empty.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// What a renderer should draw: the field text, or the placeholder when
    /// the field text is empty.
    pub fn rendered_text(&self) -> String {
        let display = self.display();
        if display.is_empty() {
            self.placeholder.clone()
        } else {
            display
        }
    }

    /// Reactive [`DateInput::rendered_text`], for text content bindings.
    pub fn rendered(&self) -> Derived<String> {
        let display = self.core.display.clone();
        let placeholder = self.placeholder.clone();
        derived(move || {
            let text = display.get();
            if text.is_empty() { placeholder.clone() } else { text }
        })
    }

    /// Current machine phase.
    pub fn phase(&self) -> Phase {
        self.core.phase()
    }

    /// Complete `YYYY-MM-DD` value, if the buffer is full.
    pub fn value(&self) -> Option<String> {
        self.core.state.borrow().value()
    }

    /// Check whether this input has keyboard focus.
    pub fn is_focused(&self) -> bool {
        focus::is_focused(self.index)
    }

    /// Inbound value from the host (empty or `YYYY-MM-DD`). Never emits.
    pub fn set_value(&self, value: &str) {
        self.core.apply(MaskInput::SetValue(value));
    }

    /// Give this input keyboard focus.
    pub fn focus(&self) -> bool {
        focus::focus(self.index)
    }

    /// Remove keyboard focus from this input.
    pub fn blur(&self) {
        if self.is_focused() {
            focus::blur();
        }
    }

    /// Pointer press at buffer index `caret`.
    ///
    /// Focuses the input if needed. On a pristine input the caret still goes
    /// to the first slot.
    pub fn click(&self, caret: usize) {
        let pristine = self.phase() == Phase::Empty;
        self.focus();
        if !pristine {
            self.core.apply(MaskInput::Click(caret));
        }
    }

    /// Replace the field text with raw text (paste, autofill).
    pub fn input_text(&self, raw: &str) {
        self.core.apply(MaskInput::Text(raw));
    }

    /// Feed a key event directly, bypassing focus routing.
    /// Returns true if the input consumed it.
    pub fn handle_key(&self, event: &KeyboardEvent) -> bool {
        self.core.apply(MaskInput::Key(event))
    }

    /// Release the input and all its handlers.
    pub fn destroy(self) {
        release_index(self.index);
    }

    /// Turn the handle into a cleanup closure.
    pub fn into_cleanup(self) -> Cleanup {
        let index = self.index;
        Box::new(move || release_index(index))
    }
}

// =============================================================================
// Date Input Component
// =============================================================================

/// Create a masked date input.
///
/// The input is focusable, takes keystrokes while focused, and receives
/// bracketed paste while focused.
pub fn date_input(props: DateInputProps) -> DateInput {
    let index = allocate_index(props.id.as_deref());

    let initial = MaskState::with_value(&props.value, props.format);
    if !props.value.is_empty() && initial.phase == Phase::Empty {
        debug!(index, value = %props.value, "initial value not in YYYY-MM-DD form");
    }

    let core = Rc::new(DateInputCore {
        display: signal(initial.display()),
        cursor: signal(initial.cursor as u16),
        state: RefCell::new(initial),
        on_change: props.on_change.clone(),
    });

    let placeholder = props
        .placeholder
        .clone()
        .unwrap_or_else(|| props.format.pattern().to_string());

    // ==========================================================================
    // FOCUS
    // ==========================================================================

    let unregister_focusable = focus::register_focusable(index, props.tab_index.unwrap_or(0));

    let core_for_focus = core.clone();
    let core_for_blur = core.clone();
    let user_focus = props.on_focus.clone();
    let user_blur = props.on_blur.clone();
    let unregister_callbacks = focus::register_callbacks(index, FocusCallbacks {
        on_focus: Some(Rc::new(move || {
            core_for_focus.apply(MaskInput::Focus);
            if let Some(ref cb) = user_focus {
                cb();
            }
        })),
        on_blur: Some(Rc::new(move || {
            core_for_blur.apply(MaskInput::Blur);
            if let Some(ref cb) = user_blur {
                cb();
            }
        })),
    });

    // ==========================================================================
    // KEYBOARD + PASTE
    // ==========================================================================

    let core_for_key = core.clone();
    let key_cleanup = keyboard::on_focused(index, move |event| {
        core_for_key.apply(MaskInput::Key(event))
    });

    let core_for_paste = core.clone();
    let paste_cleanup = input::on_paste(index, move |text| {
        core_for_paste.apply(MaskInput::Text(text));
    });

    // ==========================================================================
    // CLEANUP
    // ==========================================================================

    on_destroy(index, move || {
        key_cleanup();
        paste_cleanup();
        unregister_callbacks();
        unregister_focusable();
        keyboard::cleanup_index(index);
    });

    DateInput {
        index,
        core,
        placeholder,
    }
}

// =============================================================================
// Tests
// =============================================================================
