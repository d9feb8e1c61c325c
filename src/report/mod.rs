//! Broken-link reporting
//!
//! Serves previously-committed broken records with page-based slicing.
//! Read-only: no interaction with the engine's run state.

use std::sync::Arc;

use crate::core::constants::{pagination, reasons};
use crate::core::error::{LinkProbeError, Result};
use crate::store::LinkStore;
use crate::types::BrokenLinksPage;

/// Number of pages needed for `total` records at `page_size` per page.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}

pub struct BrokenLinkReporter {
    store: Arc<dyn LinkStore>,
}

impl BrokenLinkReporter {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Fetch one page of broken links. Pages are 1-indexed; `page_size`
    /// must be within [1, 10000]. Out-of-range arguments are rejected
    /// before the store is touched.
    pub async fn list_broken(&self, page: u64, page_size: u64) -> Result<BrokenLinksPage> {
        if page < pagination::MIN_PAGE {
            return Err(LinkProbeError::InvalidArgument(format!(
                "page must be at least {}",
                pagination::MIN_PAGE
            )));
        }
        if page_size < pagination::MIN_PAGE_SIZE || page_size > pagination::MAX_PAGE_SIZE {
            return Err(LinkProbeError::InvalidArgument(format!(
                "page_size must be between {} and {}",
                pagination::MIN_PAGE_SIZE,
                pagination::MAX_PAGE_SIZE
            )));
        }

        let total_count = self.store.count_broken().await?;
        // Only the lower bound on `page` is part of the contract; an
        // arbitrarily large page is a valid request whose skip simply
        // lands past the end, so the multiply must not wrap.
        let mut records = match (page - 1).checked_mul(page_size) {
            Some(skip) if skip < total_count => {
                self.store.fetch_broken_page(skip, page_size).await?
            }
            _ => Vec::new(),
        };

        // Reports never show a hole where a reason should be.
        for record in &mut records {
            if record.reason.is_none() {
                record.reason = Some(reasons::UNKNOWN.to_string());
            }
        }

        let total_pages = total_pages(total_count, page_size);
        Ok(BrokenLinksPage {
            records,
            total_count,
            page,
            page_size,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::store::MemoryLinkStore;
    use crate::types::{LinkStatus, Verdict};
    use async_trait::async_trait;
    use chrono::Utc;

    async fn store_with_broken(count: usize) -> Arc<MemoryLinkStore> {
        let store = Arc::new(MemoryLinkStore::new());
        let urls: Vec<String> = (0..count).map(|i| format!("https://dead{i}.test")).collect();
        store.insert_many(&urls).await.unwrap();

        let mut batch = store
            .fetch_batch_by_status(LinkStatus::Pending, count as u64)
            .await
            .unwrap();
        for record in &mut batch {
            record.apply_verdict(&Verdict::broken("HTTP 404"), Utc::now());
        }
        store.bulk_update(&batch).await.unwrap();
        store
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 2), 0);
        assert_eq!(total_pages(1, 2), 1);
        assert_eq!(total_pages(2, 2), 1);
        assert_eq!(total_pages(3, 2), 2);
        assert_eq!(total_pages(10_000, 1), 10_000);
    }

    #[tokio::test]
    async fn test_list_broken__three_records_page_size_two() {
        let reporter = BrokenLinkReporter::new(store_with_broken(3).await);

        let page1 = reporter.list_broken(1, 2).await.unwrap();
        assert_eq!(page1.records.len(), 2);
        assert_eq!(page1.total_count, 3);
        assert_eq!(page1.total_pages, 2);
        assert!(page1.has_next_page);
        assert!(!page1.has_previous_page);

        let page2 = reporter.list_broken(2, 2).await.unwrap();
        assert_eq!(page2.records.len(), 1);
        assert!(!page2.has_next_page);
        assert!(page2.has_previous_page);
    }

    #[tokio::test]
    async fn test_list_broken__page_past_the_end_is_empty() {
        let reporter = BrokenLinkReporter::new(store_with_broken(3).await);

        let page = reporter.list_broken(5, 2).await.unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total_count, 3);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[tokio::test]
    async fn test_list_broken__huge_page_is_empty_not_wrapped() {
        let reporter = BrokenLinkReporter::new(store_with_broken(3).await);

        let page = reporter.list_broken(u64::MAX, 10_000).await.unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total_count, 3);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[tokio::test]
    async fn test_list_broken__empty_store() {
        let reporter = BrokenLinkReporter::new(Arc::new(MemoryLinkStore::new()));

        let page = reporter.list_broken(1, 10).await.unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
        assert!(!page.has_previous_page);
    }

    /// Store that panics on any access - proves argument validation runs
    /// before the store is touched.
    struct UntouchableStore;

    #[async_trait]
    impl LinkStore for UntouchableStore {
        async fn count_by_status(&self, _: LinkStatus) -> Result<u64> {
            unreachable!("store must not be touched")
        }
        async fn fetch_batch_by_status(
            &self,
            _: LinkStatus,
            _: u64,
        ) -> Result<Vec<crate::types::LinkRecord>> {
            unreachable!("store must not be touched")
        }
        async fn bulk_update(&self, _: &[crate::types::LinkRecord]) -> Result<u64> {
            unreachable!("store must not be touched")
        }
        async fn insert_many(&self, _: &[String]) -> Result<Vec<u64>> {
            unreachable!("store must not be touched")
        }
        async fn count_broken(&self) -> Result<u64> {
            unreachable!("store must not be touched")
        }
        async fn fetch_broken_page(&self, _: u64, _: u64) -> Result<Vec<crate::types::LinkRecord>> {
            unreachable!("store must not be touched")
        }
    }

    #[tokio::test]
    async fn test_list_broken__rejects_page_zero_before_store_access() {
        let reporter = BrokenLinkReporter::new(Arc::new(UntouchableStore));

        let result = reporter.list_broken(0, 10).await;
        assert!(matches!(result, Err(LinkProbeError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_list_broken__rejects_bad_page_sizes_before_store_access() {
        let reporter = BrokenLinkReporter::new(Arc::new(UntouchableStore));

        assert!(matches!(
            reporter.list_broken(1, 0).await,
            Err(LinkProbeError::InvalidArgument(_))
        ));
        assert!(matches!(
            reporter.list_broken(1, 10_001).await,
            Err(LinkProbeError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_list_broken__page_size_bounds_accepted() {
        let reporter = BrokenLinkReporter::new(store_with_broken(1).await);

        assert!(reporter.list_broken(1, 1).await.is_ok());
        assert!(reporter.list_broken(1, 10_000).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_broken__missing_reason_defaults_to_unknown() {
        let store = Arc::new(MemoryLinkStore::new());
        store
            .insert_many(&["https://dead.test".to_string()])
            .await
            .unwrap();

        // Force a broken record without a reason through the store's own
        // update path.
        let mut record = store
            .fetch_batch_by_status(LinkStatus::Pending, 1)
            .await
            .unwrap()
            .remove(0);
        record.status = LinkStatus::Broken;
        record.reason = None;
        store.bulk_update(&[record]).await.unwrap();

        let reporter = BrokenLinkReporter::new(store);
        let page = reporter.list_broken(1, 10).await.unwrap();

        assert_eq!(page.records[0].reason.as_deref(), Some("Unknown"));
    }
}
