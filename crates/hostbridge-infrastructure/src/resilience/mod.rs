//! Resilience
//!
//! Bounded retry with exponential backoff for flaky host calls.

pub mod retry;

pub use retry::{RetryError, RetryPolicy, RetryService, retry, retry_sync};
