use std::time::Duration;

use tracing::{info, warn};

use crate::error::{FetchErrorKind, Result, RuleError};
use crate::parser::parse_domain_list;
use crate::types::DomainSet;

/// Default timeout for a single upstream request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP fetcher for upstream domain lists.
///
/// Each URL gets exactly one attempt bounded by the configured timeout.
pub struct Fetcher {
    agent: ureq::Agent,
    user_agent: String,
    timeout: Duration,
}

impl Fetcher {
    /// Create a fetcher with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            user_agent: format!("domain-rules/{}", env!("CARGO_PKG_VERSION")),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and parse one upstream list, surfacing any failure.
    pub fn try_fetch(&self, url: &str) -> Result<DomainSet> {
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| classify(url, e))?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RuleError::fetch(FetchErrorKind::Body, url, e.to_string()))?;

        Ok(parse_domain_list(&body))
    }

    /// Fetch one upstream list, degrading to an empty set on any failure.
    pub fn fetch(&self, url: &str) -> DomainSet {
        info!(url, "fetching upstream");
        match self.try_fetch(url) {
            Ok(domains) => {
                info!(url, count = domains.len(), "fetched upstream domains");
                domains
            }
            Err(e) => {
                warn!(url, error = %e, "upstream fetch failed, using local list only");
                DomainSet::new()
            }
        }
    }

    /// Fetch every upstream in order and union the results.
    pub fn fetch_all<S: AsRef<str>>(&self, urls: &[S]) -> DomainSet {
        let mut merged = DomainSet::new();
        for url in urls {
            merged.extend_from(&self.fetch(url.as_ref()));
        }
        merged
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a ureq error onto a fetch error kind
fn classify(url: &str, err: ureq::Error) -> RuleError {
    let kind = match &err {
        ureq::Error::StatusCode(_) => FetchErrorKind::Status,
        ureq::Error::Timeout(_) => FetchErrorKind::Timeout,
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => FetchErrorKind::Timeout,
        _ => FetchErrorKind::Transport,
    };
    RuleError::fetch(kind, url, err.to_string())
}
