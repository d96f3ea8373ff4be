//! Mask state machine.
//!
//! [`transition`] is a pure function `(state, input) -> (state', emission)`.
//! It knows nothing about signals, focus registries or terminals; the widget
//! in `primitives::date_input` feeds it events and forwards its emissions.
//!
//! ```text
//!   Empty ──focus/type/paste──▶ Editing ◀──clear a slot── Complete
//!                                  │                         ▲
//!                                  └──── fill last slot ─────┘
//! ```

use tracing::{debug, trace};

use super::buffer::MaskBuffer;
use super::cursor::{self, Direction, place_cursor};
use super::filter::{KeyClass, NavKey, classify};
use super::format::{DIGIT_SLOTS, DateFormat, MASK_LEN};
use super::normalize::{denormalize, normalize};
use crate::state::KeyboardEvent;

// =============================================================================
// TYPES
// =============================================================================

/// Lifecycle of the mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Never focused, never typed into. Displays as an empty string.
    #[default]
    Empty,
    /// At least one digit slot unfilled.
    Editing,
    /// Every digit slot filled.
    Complete,
}

/// Everything the machine remembers between events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskState {
    pub buffer: MaskBuffer,
    pub cursor: usize,
    pub phase: Phase,
    pub focused: bool,
    pub format: DateFormat,
}

/// One event fed to the machine.
#[derive(Clone, Copy, Debug)]
pub enum MaskInput<'a> {
    /// Focus gained without an explicit caret position.
    Focus,
    /// Focus lost.
    Blur,
    /// Pointer placed the caret at a buffer index.
    Click(usize),
    /// A key event from the keyboard router.
    Key(&'a KeyboardEvent),
    /// Raw text replacing the field contents (paste, programmatic fill).
    Text(&'a str),
    /// Inbound value from the host: empty or `YYYY-MM-DD`.
    SetValue(&'a str),
}

/// Result of one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: MaskState,
    /// New external value for the host, if one was produced.
    pub emission: Option<String>,
    /// Whether the event was handled here (false lets other handlers see it).
    pub consumed: bool,
}

// =============================================================================
// STATE
// =============================================================================

impl MaskState {
    /// Pristine state for `format`.
    pub fn new(format: DateFormat) -> Self {
        Self {
            buffer: MaskBuffer::new(),
            cursor: 0,
            phase: Phase::Empty,
            focused: false,
            format,
        }
    }

    /// State seeded from a host value. Malformed values give the pristine state.
    pub fn with_value(value: &str, format: DateFormat) -> Self {
        transition(&Self::new(format), &MaskInput::SetValue(value)).state
    }

    /// Text shown in the field: empty while pristine, the mask otherwise.
    pub fn display(&self) -> String {
        match self.phase {
            Phase::Empty => String::new(),
            _ => self.buffer.to_string(),
        }
    }

    /// The external value, when the buffer is complete.
    pub fn value(&self) -> Option<String> {
        match self.phase {
            Phase::Complete => normalize(&self.buffer, self.format),
            _ => None,
        }
    }

    /// Leave `Empty`: show the mask and put the caret on the first slot.
    fn activate(&mut self) {
        if self.phase == Phase::Empty {
            self.buffer = MaskBuffer::new();
            self.cursor = 0;
            self.phase = Phase::Editing;
        }
    }

    /// Back to `Empty`, keeping format and focus.
    fn reset(&mut self) {
        self.buffer = MaskBuffer::new();
        self.cursor = 0;
        self.phase = Phase::Empty;
        if self.focused {
            self.activate();
        }
    }

    fn sync_phase(&mut self) {
        if self.phase != Phase::Empty {
            self.phase = if self.buffer.is_complete() {
                Phase::Complete
            } else {
                Phase::Editing
            };
        }
    }
}

// =============================================================================
// TRANSITION
// =============================================================================

/// Apply one input to a state.
pub fn transition(state: &MaskState, input: &MaskInput<'_>) -> Transition {
    let mut next = state.clone();
    let mut consumed = true;
    let mut may_emit = true;

    match *input {
        MaskInput::Focus => {
            next.focused = true;
            if next.phase == Phase::Empty {
                next.activate();
            } else {
                next.cursor = place_cursor(next.cursor, Direction::Forward);
            }
        }

        MaskInput::Blur => {
            next.focused = false;
        }

        MaskInput::Click(index) => {
            next.focused = true;
            if next.phase == Phase::Empty {
                next.activate();
            } else {
                next.cursor = place_cursor(index, Direction::Forward);
            }
        }

        MaskInput::Key(event) => {
            let class = classify(event);
            trace!(key = %event.key, ?class, "keystroke");
            match class {
                KeyClass::Ignored | KeyClass::PassThrough => consumed = false,
                KeyClass::Rejected => {
                    debug!(key = %event.key, "rejected keystroke");
                }
                KeyClass::Digit(digit) => {
                    next.activate();
                    if let Some(slot) = cursor::current_slot(next.cursor) {
                        next.buffer.write_digit(slot, digit);
                        next.cursor = cursor::advance(slot);
                    }
                }
                KeyClass::Navigation(nav) => {
                    if next.phase != Phase::Empty {
                        apply_navigation(&mut next, nav);
                    }
                }
            }
        }

        MaskInput::Text(raw) => {
            next.activate();
            let (buffer, written) = MaskBuffer::from_digits(raw.chars());
            next.buffer = buffer;
            next.cursor = match written {
                0 => 0,
                n => cursor::advance(DIGIT_SLOTS[n - 1]),
            };
        }

        MaskInput::SetValue(value) => {
            may_emit = false;
            if value.is_empty() {
                next.reset();
            } else {
                match denormalize(value, next.format) {
                    Ok(buffer) => {
                        next.buffer = buffer;
                        next.cursor = MASK_LEN;
                        next.phase = Phase::Complete;
                    }
                    Err(err) => {
                        debug!(value, %err, "ignoring malformed value");
                        next.reset();
                    }
                }
            }
        }
    }

    next.sync_phase();

    let emission = if may_emit { emission_between(state, &next) } else { None };
    if let Some(ref value) = emission {
        debug!(value = %value, "date complete");
    }

    Transition {
        state: next,
        emission,
        consumed,
    }
}

fn apply_navigation(state: &mut MaskState, nav: NavKey) {
    match nav {
        NavKey::Left => state.cursor = cursor::step_left(state.cursor),
        NavKey::Right => state.cursor = cursor::step_right(state.cursor),
        NavKey::Home => state.cursor = 0,
        NavKey::End => state.cursor = MASK_LEN,
        NavKey::Backspace => {
            if let Some(slot) = cursor::previous_slot(state.cursor) {
                state.buffer.clear(slot);
                state.cursor = slot;
            }
        }
        NavKey::Delete => {
            if let Some(slot) = cursor::current_slot(state.cursor) {
                state.buffer.clear(slot);
                state.cursor = slot;
            }
        }
    }
}

/// A value is emitted on entering `Complete`, or when it changes inside it.
fn emission_between(prev: &MaskState, next: &MaskState) -> Option<String> {
    let value = next.value()?;
    if prev.phase == Phase::Complete && prev.value().as_deref() == Some(value.as_str()) {
        return None;
    }
    Some(value)
}

// =============================================================================
// TESTS
// =============================================================================
