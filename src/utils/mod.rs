//! Utility functions and helpers
//!
//! Atomic file writes and calendar date helpers.

pub mod atomic;
pub mod time;

pub use atomic::atomic_write;
pub use time::{is_iso_date, today};
