//! Pure counting logic: no I/O, no shared state.

pub mod counter;
pub mod histogram;

pub use counter::count_printable;
pub use histogram::{is_printable, Histogram, PRINTABLE_MAX, PRINTABLE_MIN, PRINTABLE_SPAN};
