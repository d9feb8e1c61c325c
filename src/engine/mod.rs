//! Batch validation engine
//!
//! Drains the pending backlog in bounded batches: fetch, fan out to the
//! retry coordinator under a concurrency bound, collect verdicts as they
//! complete, commit the batch in one bulk update, repeat until the fetch
//! comes back empty. Sequential across batches, concurrent within one.

use chrono::Utc;
use futures::{StreamExt, stream};
use std::sync::{Arc, OnceLock};
use tokio::sync::{Mutex, watch};
use tokio::time::Instant;

use crate::config::Config;
use crate::core::error::{LinkProbeError, Result};
use crate::logging;
use crate::progress::ProgressReporter;
use crate::retry::RetryCoordinator;
use crate::store::LinkStore;
use crate::types::{LinkStatus, RunSummary};

/// Cancellation handle held by the caller of a run.
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

/// Cancellation signal observed by the engine. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelSource {
    pub fn new() -> (CancelSource, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelSource { tx }, CancelToken { rx })
    }

    /// Signal cancellation. In-flight probes are abandoned promptly;
    /// batches already committed stay committed.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

impl CancelToken {
    /// A token that never fires, for callers without a cancellation path.
    pub fn never() -> CancelToken {
        static NEVER: OnceLock<watch::Sender<bool>> = OnceLock::new();
        let tx = NEVER.get_or_init(|| watch::channel(false).0);
        CancelToken { rx: tx.subscribe() }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is signalled; pends forever otherwise.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                // Source dropped without cancelling - never resolve.
                std::future::pending::<()>().await;
            }
        }
    }
}

pub struct ValidationEngine {
    store: Arc<dyn LinkStore>,
    coordinator: RetryCoordinator,
    batch_size: u64,
    parallelism: usize,
    run_lock: Mutex<()>,
}

impl ValidationEngine {
    pub fn new(store: Arc<dyn LinkStore>, coordinator: RetryCoordinator, config: &Config) -> Self {
        Self {
            store,
            coordinator,
            batch_size: config.batch_size(),
            parallelism: config.max_parallelism(),
            run_lock: Mutex::new(()),
        }
    }

    /// Drive the pending backlog to completion and return the run summary.
    ///
    /// At most one run executes at a time; an overlapping call fails fast
    /// with `ValidationInProgress` instead of racing on the pending filter.
    /// A store failure aborts the run and propagates - batches committed
    /// before it stay committed.
    pub async fn validate_all(
        &self,
        cancel: &CancelToken,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<RunSummary> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| LinkProbeError::ValidationInProgress)?;

        let start = Instant::now();

        let pending = self.store.count_by_status(LinkStatus::Pending).await?;
        if pending == 0 {
            return Ok(RunSummary::empty(start.elapsed()));
        }

        // Estimate only: the backlog shrinks as batches commit.
        let expected_batches = pending.div_ceil(self.batch_size);
        logging::log_run_start(pending, expected_batches);

        if let Some(ref mut prog) = progress {
            prog.start_run(pending);
        }

        let mut total_processed = 0u64;
        let mut valid_count = 0u64;
        let mut broken_count = 0u64;
        let mut batch_number = 0u64;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            // Always re-fetch from the front of the pending filter. The
            // records just committed have left it, so a skip-based cursor
            // here would silently jump over unprocessed work.
            let batch = self
                .store
                .fetch_batch_by_status(LinkStatus::Pending, self.batch_size)
                .await?;
            if batch.is_empty() {
                break;
            }
            batch_number += 1;

            let mut verdicts = stream::iter(batch)
                .map(|record| {
                    let coordinator = &self.coordinator;
                    let cancel = cancel.clone();
                    async move {
                        let verdict = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => None,
                            verdict = coordinator.verdict(&record.url) => Some(verdict),
                        };
                        (record, verdict)
                    }
                })
                .buffer_unordered(self.parallelism);

            let mut updates = Vec::new();
            while let Some((mut record, verdict)) = verdicts.next().await {
                // Aborted probes leave their record pending for a later run.
                let Some(verdict) = verdict else { continue };

                logging::log_url_verdict(&record.url, &verdict);
                if verdict.is_valid {
                    valid_count += 1;
                } else {
                    broken_count += 1;
                }
                total_processed += 1;

                record.apply_verdict(&verdict, Utc::now());
                updates.push(record);
            }
            drop(verdicts);

            if !updates.is_empty() {
                // One bulk commit per batch; failure here is fatal for the
                // run and is not retried at this layer.
                if let Err(err) = self.store.bulk_update(&updates).await {
                    logging::log_error("batch commit failed", Some(&err));
                    return Err(err);
                }
            }

            logging::log_batch_complete(batch_number, expected_batches, updates.len());
            if let Some(ref mut prog) = progress {
                prog.update(total_processed);
            }
        }

        let summary = RunSummary {
            total_processed,
            valid_count,
            broken_count,
            duration: start.elapsed(),
        };

        if let Some(ref mut prog) = progress {
            prog.finish(&summary);
        }
        logging::log_run_complete(&summary);

        Ok(summary)
    }

}
