use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::time::sleep;

// Feature-activation delivery contract: 3 total attempts, fixed 500ms apart.
const ACTIVATION_MAX_ATTEMPTS: u32 = 3;
const ACTIVATION_DELAY_MS: u64 = 500;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts, including the initial one
    pub max_attempts: u32,
    /// Delay before the next attempt
    pub delay: Duration,
    /// Multiplier applied to the delay after each attempt (1.0 = fixed)
    pub backoff_multiplier: f64,
    /// Add jitter to prevent lockstep retries
    pub jitter: bool,
}

impl RetryPolicy {
    /// The activation-delivery policy: the content context may still be
    /// loading when the user triggers a feature, so delivery gets two more
    /// chances half a second apart.
    pub fn activation() -> Self {
        Self::fixed(
            ACTIVATION_MAX_ATTEMPTS,
            Duration::from_millis(ACTIVATION_DELAY_MS),
        )
    }

    /// Fixed-delay policy without jitter.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }
}

/// Why a retried operation did not produce a value.
#[derive(Debug, Error)]
pub enum RetryError<E: std::error::Error> {
    #[error("{operation} cancelled during attempt {attempts}")]
    Cancelled { operation: String, attempts: u32 },

    #[error("{operation} failed after {attempts} attempts: {source}")]
    Exhausted {
        operation: String,
        attempts: u32,
        #[source]
        source: E,
    },
}

impl<E: std::error::Error> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Cancelled { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Trait for errors that can indicate retryability
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for crate::BusError {
    fn is_retryable(&self) -> bool {
        self.is_retryable()
    }
}

/// Execute an async operation with retry and cancellation.
///
/// The shutdown receiver makes the waits cancellable: a shutdown arriving
/// mid-delay resolves immediately as `Cancelled` instead of sleeping out
/// the remaining schedule.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    shutdown: &mut broadcast::Receiver<()>,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + IsRetryable,
{
    let mut attempts = 0;
    let mut delay = policy.delay;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok(result);
            }
            Err(e) => {
                if !e.is_retryable() || attempts >= policy.max_attempts {
                    warn!(
                        "{} failed after {} attempts: {}",
                        operation_name, attempts, e
                    );
                    return Err(RetryError::Exhausted {
                        operation: operation_name.to_string(),
                        attempts,
                        source: e,
                    });
                }

                let actual_delay = if policy.jitter {
                    let jitter_factor = 0.5 + rand::random::<f64>(); // 0.5 to 1.5
                    Duration::from_secs_f64(delay.as_secs_f64() * jitter_factor)
                } else {
                    delay
                };

                debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name, attempts, e, actual_delay
                );

                tokio::select! {
                    _ = sleep(actual_delay) => {}
                    _ = shutdown.recv() => {
                        info!("{} cancelled during retry wait", operation_name);
                        return Err(RetryError::Cancelled {
                            operation: operation_name.to_string(),
                            attempts,
                        });
                    }
                }

                delay = Duration::from_secs_f64(delay.as_secs_f64() * policy.backoff_multiplier);
            }
        }
    }
}
