use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::core::error::{LinkProbeError, Result};
use crate::store::LinkStore;
use crate::types::{LinkRecord, LinkStatus};

/// Thread-safe in-memory link store.
///
/// Records live in a BTreeMap keyed by id, which gives the stable id
/// ordering the gateway contract requires for free. The mutex is never
/// held across an await point.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<u64, LinkRecord>,
    next_id: u64,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record, id order. Test and debugging aid.
    pub fn all_records(&self) -> Vec<LinkRecord> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner.records.values().cloned().collect()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn count_by_status(&self, status: LinkStatus) -> Result<u64> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .records
            .values()
            .filter(|r| r.status == status)
            .count() as u64)
    }

    async fn fetch_batch_by_status(
        &self,
        status: LinkStatus,
        limit: u64,
    ) -> Result<Vec<LinkRecord>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .records
            .values()
            .filter(|r| r.status == status)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn bulk_update(&self, records: &[LinkRecord]) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        // All-or-nothing: an unknown id rejects the whole batch before
        // anything mutates.
        if let Some(unknown) = records.iter().find(|r| !inner.records.contains_key(&r.id)) {
            return Err(LinkProbeError::Store(format!(
                "unknown record id {}",
                unknown.id
            )));
        }

        let mut modified = 0;
        for update in records {
            if let Some(existing) = inner.records.get_mut(&update.id) {
                // Only the mutable fields move; id/url/created_at stay put.
                existing.status = update.status;
                existing.reason = update.reason.clone();
                existing.updated_at = update.updated_at;
                modified += 1;
            }
        }

        Ok(modified)
    }

    async fn insert_many(&self, urls: &[String]) -> Result<Vec<u64>> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let now = Utc::now();
        let mut ids = Vec::with_capacity(urls.len());

        for url in urls {
            inner.next_id += 1;
            let id = inner.next_id;
            inner
                .records
                .insert(id, LinkRecord::new_pending(id, url.clone(), now));
            ids.push(id);
        }

        Ok(ids)
    }

    async fn count_broken(&self) -> Result<u64> {
        self.count_by_status(LinkStatus::Broken).await
    }

    async fn fetch_broken_page(&self, skip: u64, limit: u64) -> Result<Vec<LinkRecord>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .records
            .values()
            .filter(|r| r.status == LinkStatus::Broken)
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
