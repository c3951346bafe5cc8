use thiserror::Error;

/// Classifies upstream fetch failures for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Request exceeded the configured timeout
    Timeout,
    /// Upstream answered with a non-2xx status
    Status,
    /// Connection, DNS or TLS failure
    Transport,
    /// Response body could not be read as text
    Body,
}

/// Rule generation error types
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Fetch error for {url}: {message}")]
    Fetch {
        kind: FetchErrorKind,
        url: String,
        message: String,
    },

    #[error("Domain count too low: {count} < {min}, refusing to overwrite output")]
    BelowThreshold { count: usize, min: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RuleError {
    pub(crate) fn fetch(kind: FetchErrorKind, url: &str, message: impl Into<String>) -> Self {
        RuleError::Fetch {
            kind,
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Returns the fetch error kind, if this is a fetch error
    pub fn fetch_kind(&self) -> Option<FetchErrorKind> {
        match self {
            RuleError::Fetch { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kind_is_matchable() {
        let err = RuleError::fetch(FetchErrorKind::Timeout, "https://example.com/list", "timed out");
        match &err {
            RuleError::Fetch { kind, url, .. } => {
                assert!(matches!(kind, FetchErrorKind::Timeout));
                assert_eq!(url, "https://example.com/list");
            }
            _ => panic!("expected Fetch"),
        }
        assert_eq!(err.fetch_kind(), Some(FetchErrorKind::Timeout));
    }

    #[test]
    fn test_below_threshold_display() {
        let err = RuleError::BelowThreshold { count: 3, min: 5 };
        let display = format!("{}", err);
        assert!(display.contains("3 < 5"), "got: {}", display);
        assert_eq!(err.fetch_kind(), None);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RuleError = io.into();
        assert!(matches!(err, RuleError::Io(_)));
    }
}
