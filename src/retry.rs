//! Retry coordination
//!
//! Wraps the prober with bounded retries and linear backoff, turning raw
//! probe outcomes into final per-URL verdicts. This layer never errors:
//! every failure mode becomes a broken verdict so a single URL can never
//! abort a batch.

use log::debug;
use tokio::time::{Duration, sleep};

use crate::core::constants::{defaults, reasons};
use crate::probe::{ProbeOutcome, Prober};
use crate::types::Verdict;

#[derive(Debug, Clone)]
pub struct RetryCoordinator {
    prober: Prober,
    max_retries: u32,
}

impl RetryCoordinator {
    pub fn new(prober: Prober, max_retries: u32) -> Self {
        Self {
            prober,
            max_retries,
        }
    }

    /// Produce the final verdict for one URL.
    ///
    /// Attempt budget is 1 initial probe plus `max_retries` retries. Only
    /// timeouts and non-definitive transport failures are retried; stable
    /// HTTP statuses and connect-level unreachability settle immediately.
    pub async fn verdict(&self, url: &str) -> Verdict {
        let mut last_failure = String::new();

        for attempt in 1..=self.max_retries + 1 {
            let outcome = match self.prober.probe(url).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    // Unexpected per-URL error; contained here, never raised.
                    debug!("unexpected probe error for {url}: {err}");
                    return Verdict::broken(format!("Error: {err}"));
                }
            };

            match outcome {
                ProbeOutcome::Success(_) | ProbeOutcome::Redirect(_) => {
                    return Verdict::valid();
                }
                ProbeOutcome::HttpError(code) => {
                    // A stable 404/500 is unlikely to change within the
                    // validation window.
                    return Verdict::broken(format!("HTTP {code}"));
                }
                ProbeOutcome::Unreachable(detail) => {
                    // Retrying a definitively unreachable host wastes the
                    // parallelism budget.
                    return Verdict::broken(format!(
                        "{} {detail}",
                        reasons::NETWORK_ERROR_PREFIX
                    ));
                }
                ProbeOutcome::Timeout => {
                    last_failure.clear();
                }
                ProbeOutcome::NetworkFailure(detail) => {
                    last_failure = detail;
                }
            }

            if attempt <= self.max_retries {
                let backoff = Duration::from_millis(defaults::BACKOFF_STEP_MS * attempt as u64);
                debug!("retrying {url} after {}ms (attempt {attempt} failed)", backoff.as_millis());
                sleep(backoff).await;
            }
        }

        if last_failure.is_empty() {
            Verdict::broken(reasons::TIMEOUT)
        } else {
            Verdict::broken(format!(
                "Failed after {} retries: {last_failure}",
                self.max_retries
            ))
        }
    }
}
