//! Infrastructure utilities
//!
//! Reusable helpers for timing and panic handling.

mod panic;
mod timing;

pub use panic::panic_message;
pub use timing::TimedOperation;
