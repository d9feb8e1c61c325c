//! URL probing
//!
//! This module issues a single validation attempt for one URL and
//! classifies the raw outcome. Retry policy lives one layer up.

use reqwest::StatusCode;
use reqwest::redirect::Policy;
use tokio::time::Duration;

use crate::config::Config;
use crate::core::constants::{defaults, http_status};
use crate::core::error::Result;

/// Classified result of exactly one logical network probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Terminal 2xx status
    Success(u16),
    /// Terminal 3xx status, observed after the transport followed up to
    /// the redirect hop limit. Treated as reachable.
    Redirect(u16),
    /// Terminal non-2xx/3xx status
    HttpError(u16),
    /// The attempt exceeded the per-attempt timeout
    Timeout,
    /// Connect-level failure: refused, host not found, DNS
    Unreachable(String),
    /// Other transport failure, not a timeout and not connect-level
    NetworkFailure(String),
}

impl ProbeOutcome {
    /// Whether this outcome counts as a reachable URL.
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_) | ProbeOutcome::Redirect(_))
    }
}

/// Issues reachability probes over a pooled HTTP client.
///
/// Certificate validation is deliberately disabled: a self-signed endpoint
/// is still reachable, which is all this probe measures.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(config: &Config) -> Result<Self> {
        let user_agent = config.user_agent.clone().unwrap_or_else(|| {
            concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
        });

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(Policy::limited(defaults::REDIRECT_LIMIT))
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(config.max_parallelism().min(20))
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self { client })
    }

    /// Perform one probe against `url` and classify the outcome.
    ///
    /// HEAD goes out first (cheaper); a 405 reply earns a single GET
    /// fallback within the same attempt. `Err` is reserved for request
    /// construction failures - transport failures are classified outcomes.
    pub async fn probe(&self, url: &str) -> Result<ProbeOutcome> {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.as_u16() == http_status::METHOD_NOT_ALLOWED {
                    // Server rejects HEAD; re-probe with a full request.
                    return match self.client.get(url).send().await {
                        Ok(response) => Ok(Self::classify_status(response.status())),
                        Err(err) => Self::classify_error(err),
                    };
                }
                Ok(Self::classify_status(status))
            }
            Err(err) => Self::classify_error(err),
        }
    }

    fn classify_status(status: StatusCode) -> ProbeOutcome {
        if status.is_success() {
            ProbeOutcome::Success(status.as_u16())
        } else if status.is_redirection() {
            ProbeOutcome::Redirect(status.as_u16())
        } else {
            ProbeOutcome::HttpError(status.as_u16())
        }
    }

    fn classify_error(err: reqwest::Error) -> Result<ProbeOutcome> {
        if err.is_timeout() {
            return Ok(ProbeOutcome::Timeout);
        }

        let detail = std::error::Error::source(&err)
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string());

        if err.is_connect() {
            return Ok(ProbeOutcome::Unreachable(detail));
        }
        if err.is_builder() {
            // Malformed URL or an unbuildable request - the caller's input
            // problem, not a network condition.
            return Err(err.into());
        }

        Ok(ProbeOutcome::NetworkFailure(detail))
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;

    fn prober() -> Prober {
        let config = Config {
            timeout_seconds: Some(5),
            ..Default::default()
        };
        Prober::new(&config).unwrap()
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(
            Prober::classify_status(StatusCode::OK),
            ProbeOutcome::Success(200)
        );
        assert_eq!(
            Prober::classify_status(StatusCode::NO_CONTENT),
            ProbeOutcome::Success(204)
        );
        assert_eq!(
            Prober::classify_status(StatusCode::MOVED_PERMANENTLY),
            ProbeOutcome::Redirect(301)
        );
        assert_eq!(
            Prober::classify_status(StatusCode::NOT_FOUND),
            ProbeOutcome::HttpError(404)
        );
        assert_eq!(
            Prober::classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            ProbeOutcome::HttpError(500)
        );
    }

    #[test]
    fn test_is_reachable() {
        assert!(ProbeOutcome::Success(200).is_reachable());
        assert!(ProbeOutcome::Redirect(302).is_reachable());
        assert!(!ProbeOutcome::HttpError(404).is_reachable());
        assert!(!ProbeOutcome::Timeout.is_reachable());
        assert!(!ProbeOutcome::Unreachable("refused".to_string()).is_reachable());
    }

    #[tokio::test]
    async fn test_probe__when_200__is_success() {
        let mut server = Server::new_async().await;
        let _m = server.mock("HEAD", "/ok").with_status(200).create();

        let outcome = prober().probe(&(server.url() + "/ok")).await.unwrap();

        assert_eq!(outcome, ProbeOutcome::Success(200));
    }

    #[tokio::test]
    async fn test_probe__when_404__is_http_error() {
        let mut server = Server::new_async().await;
        let _m = server.mock("HEAD", "/missing").with_status(404).create();

        let outcome = prober().probe(&(server.url() + "/missing")).await.unwrap();

        assert_eq!(outcome, ProbeOutcome::HttpError(404));
    }

    #[tokio::test]
    async fn test_probe__when_405__falls_back_to_get() {
        let mut server = Server::new_async().await;
        let _head = server
            .mock("HEAD", "/head-unsupported")
            .with_status(405)
            .expect(1)
            .create();
        let _get = server
            .mock("GET", "/head-unsupported")
            .with_status(200)
            .expect(1)
            .create();

        let outcome = prober()
            .probe(&(server.url() + "/head-unsupported"))
            .await
            .unwrap();

        assert_eq!(outcome, ProbeOutcome::Success(200));
    }

    #[tokio::test]
    async fn test_probe__when_405_and_get_also_fails() {
        let mut server = Server::new_async().await;
        let _head = server.mock("HEAD", "/both").with_status(405).create();
        let _get = server.mock("GET", "/both").with_status(500).create();

        let outcome = prober().probe(&(server.url() + "/both")).await.unwrap();

        assert_eq!(outcome, ProbeOutcome::HttpError(500));
    }

    #[tokio::test]
    async fn test_probe__terminal_redirect_without_location() {
        let mut server = Server::new_async().await;
        // A 301 without a Location header never triggers the transport's
        // redirect following, so the probe observes it as terminal.
        let _m = server.mock("HEAD", "/moved").with_status(301).create();

        let outcome = prober().probe(&(server.url() + "/moved")).await.unwrap();

        assert_eq!(outcome, ProbeOutcome::Redirect(301));
    }

    #[tokio::test]
    async fn test_probe__connection_refused_is_unreachable() {
        // Port 1 on localhost refuses immediately.
        let outcome = prober().probe("http://127.0.0.1:1/nope").await.unwrap();

        match outcome {
            ProbeOutcome::Unreachable(detail) => assert!(!detail.is_empty()),
            other => panic!("expected Unreachable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_probe__malformed_url_is_error() {
        let result = prober().probe("not a url at all").await;

        assert!(result.is_err());
    }
}
