//! Date Mask - the `MM/DD/YYYY` masking state machine.
//!
//! Four collaborating pieces, each usable on its own:
//! - [`buffer`] - fixed 10-cell display buffer
//! - [`filter`] - key classification
//! - [`cursor`] - caret placement that skips separators
//! - [`normalize`] - buffer ⇄ `YYYY-MM-DD`
//!
//! [`machine`] ties them into a pure transition function.

pub mod buffer;
pub mod cursor;
pub mod filter;
pub mod format;
pub mod machine;
pub mod normalize;

pub use buffer::MaskBuffer;
pub use cursor::{place_cursor, Direction};
pub use filter::{classify, KeyClass, NavKey};
pub use format::{DateFormat, EMPTY_MASK, MASK_LEN};
pub use machine::{transition, MaskInput, MaskState, Phase, Transition};
pub use normalize::{denormalize, normalize};
