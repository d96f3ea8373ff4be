//! Engine - component index allocation.
//!
//! Components are not objects. They are small integer indices; focus,
//! keyboard and paste state are all keyed by them.

mod registry;

pub use registry::*;
