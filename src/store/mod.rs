//! Record store gateway
//!
//! The engine consumes link records through the `LinkStore` trait; the
//! storage engine behind it (indexing, replication) is out of scope.
//! `MemoryLinkStore` is the shipped implementation and the reference for
//! the contract a database-backed gateway must honor.

mod memory;

pub use memory::MemoryLinkStore;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::types::{LinkRecord, LinkStatus};

/// Query/update contract against the persisted link records.
///
/// Implementations must be safe to share across concurrent probes and
/// commits. Fetches filtered by status are ordered by record id and always
/// start from the front of the filtered set; the engine relies on
/// processed records leaving the `pending` filter between fetches, so a
/// skip-based cursor here would silently drop unprocessed records.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Count records currently in `status`.
    async fn count_by_status(&self, status: LinkStatus) -> Result<u64>;

    /// Fetch up to `limit` records in `status`, ordered by id ascending,
    /// from offset 0.
    async fn fetch_batch_by_status(
        &self,
        status: LinkStatus,
        limit: u64,
    ) -> Result<Vec<LinkRecord>>;

    /// Persist `status`/`reason`/`updated_at` for every given record as one
    /// bulk operation. Returns the modified count.
    async fn bulk_update(&self, records: &[LinkRecord]) -> Result<u64>;

    /// Create one pending record per URL. `created_at == updated_at` at
    /// creation. Returns the assigned ids in input order.
    async fn insert_many(&self, urls: &[String]) -> Result<Vec<u64>>;

    /// Count records in `broken` status.
    async fn count_broken(&self) -> Result<u64>;

    /// Fetch a slice of broken records ordered by id, skipping `skip`.
    async fn fetch_broken_page(&self, skip: u64, limit: u64) -> Result<Vec<LinkRecord>>;
}
