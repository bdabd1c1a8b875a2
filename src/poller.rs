//! # Async Operation Poller
//!
//! Turns a fire-and-forget asynchronous remote operation into a synchronous
//! result. Many service operations (template analysis, deck generation) return
//! immediately with an operation ID; this module polls the matching status
//! endpoint until the operation reaches a terminal state.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::PollingConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::OperationProgress;

/// Polling behavior for a single asynchronous operation
///
/// The interval/attempt pair bounds worst-case client-side wait
/// deterministically: at most `max_attempts` status requests, with one
/// `interval` sleep between consecutive requests.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between consecutive status checks
    pub interval: Duration,
    /// Maximum number of status checks before giving up
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            max_attempts: 60,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Total wait budget if every attempt reports a non-terminal status
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl From<&PollingConfig> for PollConfig {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.interval_secs),
            max_attempts: config.max_attempts,
        }
    }
}

/// Poll a status endpoint until the operation reaches a terminal state
///
/// `fetch` is invoked once per attempt; it typically wraps a GET against the
/// operation's status endpoint. The first payload whose status is terminal is
/// returned as-is: a remote-reported `partial` or `failed` is data for the
/// caller, not an error. Transport errors from `fetch` propagate immediately.
///
/// Each non-terminal poll emits one progress line; payloads lacking progress
/// fields fall back to 0 / "Processing...".
///
/// # Errors
///
/// Returns [`ClientError::Timeout`] when `max_attempts` polls all report a
/// non-terminal status. No request is made after the final attempt.
pub async fn poll_until_complete<T, F, Fut>(
    operation: &str,
    config: &PollConfig,
    fetch: F,
) -> ClientResult<T>
where
    T: OperationProgress,
    F: Fn() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    for attempt in 1..=config.max_attempts {
        let current = fetch().await?;

        if current.status().is_terminal() {
            debug!(
                operation = operation,
                status = %current.status(),
                attempt,
                "Async operation reached terminal state"
            );
            return Ok(current);
        }

        info!(
            operation = operation,
            attempt,
            max_attempts = config.max_attempts,
            "[{:.0}%] {}",
            current.progress(),
            current.current_step()
        );

        if attempt < config.max_attempts {
            tokio::time::sleep(config.interval).await;
        }
    }

    Err(ClientError::timeout(operation, config.budget()))
}
