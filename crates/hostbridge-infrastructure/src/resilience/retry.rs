//! Bounded retry with exponential backoff
//!
//! The operation runs up to `max_attempts` times. After failed attempt `n`
//! (except the last) the policy sleeps `delay * n^backoff_factor`. The first
//! success is returned immediately; exhaustion returns the last failure.
//!
//! Panicking operations are caught and turned into the policy's error type
//! through its mapper, so a retried host call can never unwind into the caller.
//!
//! ```
//! use hostbridge_domain::Error;
//! use hostbridge_infrastructure::resilience::{RetryPolicy, retry_sync};
//!
//! let policy = RetryPolicy::default().with_delay(std::time::Duration::ZERO);
//! let mut calls = 0;
//! let value = retry_sync(&policy, || {
//!     calls += 1;
//!     if calls < 3 { Err(Error::operation_failed("not yet")) } else { Ok(calls) }
//! })
//! .unwrap();
//! assert_eq!(value, 3);
//! ```

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use hostbridge_domain::constants::MIN_RETRY_ATTEMPTS;
use hostbridge_domain::{Error, Result};
use thiserror::Error as ThisError;
use tracing::{info, warn};

use crate::config::RetryConfig;
use crate::utils::{TimedOperation, panic_message};

type PanicMapper<E> = Arc<dyn Fn(String) -> E + Send + Sync>;

/// Why a retried operation did not produce a value
#[derive(Debug, ThisError)]
pub enum RetryError<E> {
    /// The policy cannot run; the operation was never invoked
    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),

    /// Every attempt failed; `last` is the final failure
    #[error("failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: E },
}

impl<E> RetryError<E> {
    /// The final failure, when the operation ran at all
    pub fn into_last(self) -> Option<E> {
        match self {
            Self::InvalidPolicy(_) => None,
            Self::Exhausted { last, .. } => Some(last),
        }
    }
}

impl From<RetryError<Error>> for Error {
    fn from(error: RetryError<Error>) -> Self {
        match error {
            RetryError::InvalidPolicy(message) => Error::invalid_retry_policy(message),
            RetryError::Exhausted { last, .. } => last,
        }
    }
}

/// How often and how patiently to retry
pub struct RetryPolicy<E> {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Base delay between attempts
    pub delay: Duration,
    /// Exponent applied to the attempt number
    pub backoff_factor: f64,
    /// Enables attempt and summary logging when set
    pub operation_name: Option<String>,
    map_panic: PanicMapper<E>,
}

impl<E> RetryPolicy<E> {
    /// Policy with default attempts and backoff
    ///
    /// `map_panic` turns the message of a panicking attempt into `E`.
    pub fn new<M>(map_panic: M) -> Self
    where
        M: Fn(String) -> E + Send + Sync + 'static,
    {
        Self::from_config(&RetryConfig::default(), map_panic)
    }

    /// Policy seeded from configuration
    pub fn from_config<M>(config: &RetryConfig, map_panic: M) -> Self
    where
        M: Fn(String) -> E + Send + Sync + 'static,
    {
        Self {
            max_attempts: config.max_attempts,
            delay: config.delay(),
            backoff_factor: config.backoff_factor,
            operation_name: None,
            map_panic: Arc::new(map_panic),
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_backoff_factor(mut self, backoff_factor: f64) -> Self {
        self.backoff_factor = backoff_factor;
        self
    }

    #[must_use]
    pub fn with_operation_name<S: Into<String>>(mut self, name: S) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Sleep after failed attempt `attempt` (1-based)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let scale = f64::from(attempt).powf(self.backoff_factor);
        Duration::try_from_secs_f64(self.delay.as_secs_f64() * scale).unwrap_or(Duration::MAX)
    }

    /// Check the policy before running anything
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_attempts < MIN_RETRY_ATTEMPTS {
            return Err(format!(
                "max_attempts must be at least {MIN_RETRY_ATTEMPTS}, got {}",
                self.max_attempts
            ));
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor < 0.0 {
            return Err(format!(
                "backoff_factor must be a non-negative number, got {}",
                self.backoff_factor
            ));
        }
        Ok(())
    }

    fn map_panic(&self, payload: &(dyn std::any::Any + Send)) -> E {
        (self.map_panic)(format!("operation panicked: {}", panic_message(payload)))
    }
}

impl Default for RetryPolicy<Error> {
    fn default() -> Self {
        Self::new(Error::operation_failed)
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            delay: self.delay,
            backoff_factor: self.backoff_factor,
            operation_name: self.operation_name.clone(),
            map_panic: Arc::clone(&self.map_panic),
        }
    }
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .field("backoff_factor", &self.backoff_factor)
            .field("operation_name", &self.operation_name)
            .finish_non_exhaustive()
    }
}

/// Retry an async operation
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy<E>,
    mut operation: F,
) -> std::result::Result<T, RetryError<E>>
where
    E: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    policy.validate().map_err(RetryError::InvalidPolicy)?;
    let timer = TimedOperation::start();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let outcome = match AssertUnwindSafe(async { operation().await })
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(payload) => Err(policy.map_panic(payload.as_ref())),
        };

        match outcome {
            Ok(value) => {
                log_success(policy, attempt, &timer);
                return Ok(value);
            }
            Err(e) if attempt >= policy.max_attempts => {
                log_exhausted(policy, attempt, &e, &timer);
                return Err(RetryError::Exhausted { attempts: attempt, last: e });
            }
            Err(e) => {
                let delay = policy.delay_for_attempt(attempt);
                log_attempt_failed(policy, attempt, &e, delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Retry a blocking operation, sleeping the current thread between attempts
pub fn retry_sync<T, E, F>(
    policy: &RetryPolicy<E>,
    mut operation: F,
) -> std::result::Result<T, RetryError<E>>
where
    E: fmt::Display,
    F: FnMut() -> std::result::Result<T, E>,
{
    policy.validate().map_err(RetryError::InvalidPolicy)?;
    let timer = TimedOperation::start();
    let mut attempt = 0;

    loop {
        attempt += 1;
        let outcome = match std::panic::catch_unwind(AssertUnwindSafe(&mut operation)) {
            Ok(outcome) => outcome,
            Err(payload) => Err(policy.map_panic(payload.as_ref())),
        };

        match outcome {
            Ok(value) => {
                log_success(policy, attempt, &timer);
                return Ok(value);
            }
            Err(e) if attempt >= policy.max_attempts => {
                log_exhausted(policy, attempt, &e, &timer);
                return Err(RetryError::Exhausted { attempts: attempt, last: e });
            }
            Err(e) => {
                let delay = policy.delay_for_attempt(attempt);
                log_attempt_failed(policy, attempt, &e, delay);
                std::thread::sleep(delay);
            }
        }
    }
}

fn log_attempt_failed<E: fmt::Display>(
    policy: &RetryPolicy<E>,
    attempt: u32,
    error: &E,
    delay: Duration,
) {
    if let Some(operation) = &policy.operation_name {
        warn!(
            operation = %operation,
            attempt,
            max_attempts = policy.max_attempts,
            retry_in_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %error,
            "Attempt failed, retrying"
        );
    }
}

fn log_exhausted<E: fmt::Display>(
    policy: &RetryPolicy<E>,
    attempts: u32,
    error: &E,
    timer: &TimedOperation,
) {
    if let Some(operation) = &policy.operation_name {
        warn!(
            operation = %operation,
            attempts,
            elapsed_ms = timer.elapsed_ms(),
            error = %error,
            "All attempts failed"
        );
    }
}

fn log_success<E>(policy: &RetryPolicy<E>, attempt: u32, timer: &TimedOperation) {
    if attempt == 1 {
        return;
    }
    if let Some(operation) = &policy.operation_name {
        info!(
            operation = %operation,
            attempt,
            elapsed_ms = timer.elapsed_ms(),
            "Succeeded after retrying"
        );
    }
}

/// Retry front-end seeded with the configured default policy
#[derive(Debug, Clone, Default)]
pub struct RetryService {
    config: RetryConfig,
}

impl RetryService {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Configured policy mapping panics to `OPERATION_FAILED`
    pub fn policy(&self) -> RetryPolicy<Error> {
        RetryPolicy::from_config(&self.config, Error::operation_failed)
    }

    /// Configured policy with a caller-supplied panic mapper
    pub fn policy_with_mapper<E, M>(&self, map_panic: M) -> RetryPolicy<E>
    where
        M: Fn(String) -> E + Send + Sync + 'static,
    {
        RetryPolicy::from_config(&self.config, map_panic)
    }

    /// Retry an async host call with the configured policy
    pub async fn retry<T, F, Fut>(&self, operation_name: &str, operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let policy = self.policy().with_operation_name(operation_name);
        retry(&policy, operation).await.map_err(Error::from)
    }

    /// Retry a blocking host call with the configured policy
    pub fn retry_sync<T, F>(&self, operation_name: &str, operation: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let policy = self.policy().with_operation_name(operation_name);
        retry_sync(&policy, operation).map_err(Error::from)
    }
}
