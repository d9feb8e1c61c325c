//! linkprobe - batch URL reachability validation with durable verdicts.
//!
//! The crate drains a backlog of pending link records in bounded batches,
//! probes each URL concurrently under a parallelism bound, classifies the
//! outcome, retries transient failures with linear backoff, and commits
//! final verdicts through a pluggable record store before advancing to
//! the next batch. Broken links are served back through a paginated
//! report.
//!
//! ```no_run
//! use linkprobe::config::Config;
//! use linkprobe::engine::CancelToken;
//! use linkprobe::service::LinkService;
//! use linkprobe::store::MemoryLinkStore;
//! use std::sync::Arc;
//!
//! # async fn demo() -> linkprobe::Result<()> {
//! let service = LinkService::new(Arc::new(MemoryLinkStore::new()), &Config::default())?;
//! service.add_links(&["https://example.com".to_string()]).await?;
//! let summary = service.validate_all(&CancelToken::never()).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod logging;
pub mod probe;
pub mod progress;
pub mod report;
pub mod retry;
pub mod service;
pub mod store;
pub mod types;
pub mod ui;

// Re-export commonly used items
pub use crate::config::Config;
pub use crate::core::error::{LinkProbeError, Result};
pub use crate::engine::{CancelSource, CancelToken, ValidationEngine};
pub use crate::probe::{ProbeOutcome, Prober};
pub use crate::report::BrokenLinkReporter;
pub use crate::retry::RetryCoordinator;
pub use crate::service::LinkService;
pub use crate::store::{LinkStore, MemoryLinkStore};
pub use crate::types::{BrokenLinksPage, LinkRecord, LinkStatus, RunSummary, Verdict};
