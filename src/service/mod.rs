//! Inbound operation surface
//!
//! `LinkService` is what callers (CLI, HTTP handlers, jobs) wire against:
//! ingest URLs, trigger a validation run, list broken links. Per-URL
//! failures never surface here - callers get a run summary or one fatal
//! store/config error.

use std::sync::Arc;

use crate::config::Config;
use crate::core::error::{LinkProbeError, Result};
use crate::engine::{CancelToken, ValidationEngine};
use crate::probe::Prober;
use crate::progress::ProgressReporter;
use crate::report::BrokenLinkReporter;
use crate::retry::RetryCoordinator;
use crate::store::LinkStore;
use crate::types::{BrokenLinksPage, RunSummary};

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    engine: ValidationEngine,
    reporter: BrokenLinkReporter,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, config: &Config) -> Result<Self> {
        config.validate()?;

        let prober = Prober::new(config)?;
        let coordinator = RetryCoordinator::new(prober, config.max_retries());
        let engine = ValidationEngine::new(store.clone(), coordinator, config);
        let reporter = BrokenLinkReporter::new(store.clone());

        Ok(Self {
            store,
            engine,
            reporter,
        })
    }

    /// Create one pending record per URL. Rejects an empty list and blank
    /// URL strings before touching the store. Returns the assigned ids.
    pub async fn add_links(&self, urls: &[String]) -> Result<Vec<u64>> {
        if urls.is_empty() {
            return Err(LinkProbeError::InvalidArgument(
                "at least one URL is required".to_string(),
            ));
        }
        if let Some(blank) = urls.iter().position(|u| u.trim().is_empty()) {
            return Err(LinkProbeError::InvalidArgument(format!(
                "URL at position {blank} is empty"
            )));
        }

        self.store.insert_many(urls).await
    }

    /// Synchronously drive the engine over the whole pending backlog.
    pub async fn validate_all(&self, cancel: &CancelToken) -> Result<RunSummary> {
        self.engine.validate_all(cancel, None).await
    }

    /// Like `validate_all`, with batch-level progress reporting.
    pub async fn validate_all_with_progress(
        &self,
        cancel: &CancelToken,
        progress: &mut ProgressReporter,
    ) -> Result<RunSummary> {
        self.engine.validate_all(cancel, Some(progress)).await
    }

    /// One page of broken links; see `BrokenLinkReporter::list_broken`.
    pub async fn list_broken(&self, page: u64, page_size: u64) -> Result<BrokenLinksPage> {
        self.reporter.list_broken(page, page_size).await
    }
}
