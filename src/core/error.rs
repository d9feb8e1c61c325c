use std::fmt;

/// Comprehensive error types for linkprobe operations.
///
/// Per-URL transient failures and terminal HTTP statuses never appear
/// here; they are folded into verdicts by the retry coordinator. Only
/// input, configuration and store-level failures escalate to callers.
#[derive(Debug)]
pub enum LinkProbeError {
    /// Empty or malformed caller input (400-equivalent)
    InvalidArgument(String),

    /// Configuration error
    Config(String),

    /// Record store fetch/commit failure - fatal for a run
    Store(String),

    /// HTTP client construction or request-building error
    Http(reqwest::Error),

    /// IO error (config file reads, etc.)
    Io(std::io::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// A validation run is already holding the engine's run lock
    ValidationInProgress,
}

impl fmt::Display for LinkProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkProbeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            LinkProbeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LinkProbeError::Store(msg) => write!(f, "Store error: {msg}"),
            LinkProbeError::Http(err) => write!(f, "HTTP error: {err}"),
            LinkProbeError::Io(err) => write!(f, "IO error: {err}"),
            LinkProbeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LinkProbeError::ValidationInProgress => {
                write!(f, "Validation run already in progress")
            }
        }
    }
}

impl std::error::Error for LinkProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkProbeError::Http(err) => Some(err),
            LinkProbeError::Io(err) => Some(err),
            LinkProbeError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LinkProbeError {
    fn from(err: reqwest::Error) -> Self {
        LinkProbeError::Http(err)
    }
}

impl From<std::io::Error> for LinkProbeError {
    fn from(err: std::io::Error) -> Self {
        LinkProbeError::Io(err)
    }
}

impl From<toml::de::Error> for LinkProbeError {
    fn from(err: toml::de::Error) -> Self {
        LinkProbeError::TomlParsing(err)
    }
}

/// Type alias for Results using LinkProbeError
pub type Result<T> = std::result::Result<T, LinkProbeError>;
