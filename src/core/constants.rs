/// Application-wide constants to avoid magic values throughout the codebase.
/// HTTP status code constants
pub mod http_status {
    /// HTTP 405 Method Not Allowed - server rejects HEAD probes
    pub const METHOD_NOT_ALLOWED: u16 = 405;
}

/// Default configuration values
pub mod defaults {
    /// Records fetched from the backlog per batch
    pub const BATCH_SIZE: u64 = 1000;
    /// Maximum concurrent probes within a batch
    pub const MAX_PARALLELISM: usize = 10;
    /// Per-probe-attempt timeout in seconds
    pub const TIMEOUT_SECONDS: u64 = 5;
    /// Retries after the initial attempt for transient failures
    pub const MAX_RETRIES: u32 = 2;
    /// Redirect hops followed before the probe observes a terminal status
    pub const REDIRECT_LIMIT: usize = 5;
    /// Linear backoff step between retry attempts, in milliseconds
    pub const BACKOFF_STEP_MS: u64 = 100;
}

/// Timeout bounds used by config validation
pub mod timeouts {
    /// Minimum per-attempt timeout in seconds
    pub const MIN_TIMEOUT_SECONDS: u64 = 1;
    /// Maximum reasonable per-attempt timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
}

/// Pagination bounds for the broken-links report
pub mod pagination {
    /// Pages are 1-indexed
    pub const MIN_PAGE: u64 = 1;
    /// Smallest accepted page size
    pub const MIN_PAGE_SIZE: u64 = 1;
    /// Largest accepted page size
    pub const MAX_PAGE_SIZE: u64 = 10_000;
}

/// Verdict reason strings persisted with records
pub mod reasons {
    /// Reason for records that validated successfully
    pub const VALID: &str = "valid";
    /// Reason when every attempt timed out
    pub const TIMEOUT: &str = "Timeout - Request exceeded timeout limit";
    /// Prefix for connect-level failures (refused, host not found, DNS)
    pub const NETWORK_ERROR_PREFIX: &str = "Network error:";
    /// Fallback shown by the report when a reason is absent
    pub const UNKNOWN: &str = "Unknown";
}

/// Output format constants
pub mod output_formats {
    /// Plain text output
    pub const TEXT: &str = "text";
    /// JSON output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}
