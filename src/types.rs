use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::core::constants::reasons;

/// Lifecycle state of a link record.
///
/// A record starts as `Pending` and transitions to `Valid` or `Broken`
/// exactly once, as the result of a completed validation. It never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Pending,
    Valid,
    Broken,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Pending => write!(f, "pending"),
            LinkStatus::Valid => write!(f, "valid"),
            LinkStatus::Broken => write!(f, "broken"),
        }
    }
}

/// A persisted link record: the unit of work and of storage.
///
/// Invariant: `status == Pending` implies `reason == None`; a record in
/// `Valid` or `Broken` always carries a reason. Only `status`, `reason`
/// and `updated_at` mutate after creation; `id`, `url` and `created_at`
/// are owned by the store and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Store-assigned identifier
    pub id: u64,
    /// The URL to validate
    pub url: String,
    /// Current lifecycle state
    pub status: LinkStatus,
    /// Human-readable classification, set when status leaves `Pending`
    pub reason: Option<String>,
    /// Set once at insertion
    pub created_at: DateTime<Utc>,
    /// Set at insertion and on every status mutation
    pub updated_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Create a fresh pending record. `created_at == updated_at` at creation.
    pub fn new_pending(id: u64, url: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            status: LinkStatus::Pending,
            reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a final verdict, moving the record out of `Pending`.
    pub fn apply_verdict(&mut self, verdict: &Verdict, now: DateTime<Utc>) {
        self.status = if verdict.is_valid {
            LinkStatus::Valid
        } else {
            LinkStatus::Broken
        };
        self.reason = Some(verdict.reason.clone());
        self.updated_at = now;
    }

    /// Reason for reporting, defaulting to "Unknown" when absent.
    pub fn reason_or_unknown(&self) -> &str {
        self.reason.as_deref().unwrap_or(reasons::UNKNOWN)
    }
}

impl fmt::Display for LinkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.id, self.status, self.url)?;
        if let Some(ref reason) = self.reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

/// Final outcome for one URL after all retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub is_valid: bool,
    pub reason: String,
}

impl Verdict {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: reasons::VALID.to_string(),
        }
    }

    pub fn broken<S: Into<String>>(reason: S) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            write!(f, "valid")
        } else {
            write!(f, "broken: {}", self.reason)
        }
    }
}

fn serialize_duration_ms<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Summary of one full engine run. Ephemeral, returned to the caller,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_processed: u64,
    pub valid_count: u64,
    pub broken_count: u64,
    #[serde(rename = "duration_ms", serialize_with = "serialize_duration_ms")]
    pub duration: Duration,
}

impl RunSummary {
    /// Summary for a run that found an empty backlog.
    pub fn empty(duration: Duration) -> Self {
        Self {
            total_processed: 0,
            valid_count: 0,
            broken_count: 0,
            duration,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} valid, {} broken in {}ms",
            self.total_processed,
            self.valid_count,
            self.broken_count,
            self.duration.as_millis()
        )
    }
}

/// One page of broken-link records plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLinksPage {
    pub records: Vec<LinkRecord>,
    pub total_count: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: LinkStatus, reason: Option<&str>) -> LinkRecord {
        let now = Utc::now();
        LinkRecord {
            id: 1,
            url: "https://example.com".to_string(),
            status,
            reason: reason.map(String::from),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_pending_invariant() {
        let now = Utc::now();
        let rec = LinkRecord::new_pending(7, "https://example.com".to_string(), now);

        assert_eq!(rec.id, 7);
        assert_eq!(rec.status, LinkStatus::Pending);
        assert_eq!(rec.reason, None);
        assert_eq!(rec.created_at, rec.updated_at);
    }

    #[test]
    fn test_apply_verdict_valid() {
        let mut rec = record(LinkStatus::Pending, None);
        let later = rec.created_at + chrono::Duration::seconds(5);

        rec.apply_verdict(&Verdict::valid(), later);

        assert_eq!(rec.status, LinkStatus::Valid);
        assert_eq!(rec.reason.as_deref(), Some("valid"));
        assert_eq!(rec.updated_at, later);
        assert!(rec.created_at < rec.updated_at);
    }

    #[test]
    fn test_apply_verdict_broken() {
        let mut rec = record(LinkStatus::Pending, None);

        rec.apply_verdict(&Verdict::broken("HTTP 404"), Utc::now());

        assert_eq!(rec.status, LinkStatus::Broken);
        assert_eq!(rec.reason.as_deref(), Some("HTTP 404"));
    }

    #[test]
    fn test_reason_or_unknown() {
        let with_reason = record(LinkStatus::Broken, Some("HTTP 500"));
        assert_eq!(with_reason.reason_or_unknown(), "HTTP 500");

        let without_reason = record(LinkStatus::Broken, None);
        assert_eq!(without_reason.reason_or_unknown(), "Unknown");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(LinkStatus::Pending.to_string(), "pending");
        assert_eq!(LinkStatus::Valid.to_string(), "valid");
        assert_eq!(LinkStatus::Broken.to_string(), "broken");
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&LinkStatus::Broken).unwrap(),
            "\"broken\""
        );
        let parsed: LinkStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, LinkStatus::Pending);
    }

    #[test]
    fn test_verdict_constructors() {
        let valid = Verdict::valid();
        assert!(valid.is_valid);
        assert_eq!(valid.reason, "valid");

        let broken = Verdict::broken("Network error: refused");
        assert!(!broken.is_valid);
        assert_eq!(broken.reason, "Network error: refused");
        assert_eq!(broken.to_string(), "broken: Network error: refused");
    }

    #[test]
    fn test_record_display() {
        let rec = record(LinkStatus::Broken, Some("HTTP 404"));
        assert_eq!(rec.to_string(), "1 - broken - https://example.com (HTTP 404)");

        let pending = record(LinkStatus::Pending, None);
        assert_eq!(pending.to_string(), "1 - pending - https://example.com");
    }

    #[test]
    fn test_run_summary_serializes_duration_as_millis() {
        let summary = RunSummary {
            total_processed: 3,
            valid_count: 1,
            broken_count: 2,
            duration: Duration::from_millis(1234),
        };

        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_processed"], 3);
        assert_eq!(json["duration_ms"], 1234);
    }

    #[test]
    fn test_run_summary_empty() {
        let summary = RunSummary::empty(Duration::from_millis(2));
        assert_eq!(summary.total_processed, 0);
        assert_eq!(summary.valid_count, 0);
        assert_eq!(summary.broken_count, 0);
        assert_eq!(summary.to_string(), "0 processed, 0 valid, 0 broken in 2ms");
    }
}
