//! Widgets - interactive components built on the state registries.
//!
//! Each widget:
//! 1. Allocates an index from the registry
//! 2. Registers itself as focusable, with keyboard and paste handlers
//! 3. Publishes what to draw through signals
//! 4. Hands back a handle whose `destroy` releases everything
//!
//! - [`date_input`] - masked `MM/DD/YYYY` entry emitting `YYYY-MM-DD`

mod types;
mod date_input;

pub use types::*;
pub use date_input::{date_input, DateInput};
