use http::StatusCode;
use std::fmt;

/// Failures talking to GitHub, classified by how the run should end
#[derive(Debug)]
pub enum FetchError {
    BadCredentials,
    NotFound,
    RateLimited,
    Unreachable(String),
    Api(String),
}

impl FetchError {
    /// Classify an HTTP error response from the GitHub API
    pub fn from_status(status: StatusCode, message: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => FetchError::BadCredentials,
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            StatusCode::FORBIDDEN if message.to_lowercase().contains("rate limit") => {
                FetchError::RateLimited
            }
            _ => FetchError::Api(format!("{} ({})", message, status)),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::BadCredentials => write!(f, "Invalid credentials"),
            FetchError::NotFound => write!(f, "Resource not found"),
            FetchError::RateLimited => write!(f, "Rate limit exceeded"),
            FetchError::Unreachable(msg) => write!(f, "Cannot reach GitHub: {}", msg),
            FetchError::Api(msg) => write!(f, "GitHub API error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<octocrab::Error> for FetchError {
    fn from(e: octocrab::Error) -> Self {
        match e {
            octocrab::Error::GitHub { source, .. } => {
                FetchError::from_status(source.status_code, &source.message)
            }
            transport @ (octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
            | octocrab::Error::Http { .. }) => FetchError::Unreachable(transport.to_string()),
            // Bad responses and local request-building failures
            other => FetchError::Api(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_error(status: StatusCode, message: &str) -> octocrab::Error {
        octocrab::Error::GitHub {
            source: octocrab::GitHubError {
                documentation_url: None,
                errors: None,
                message: message.to_string(),
                status_code: status,
            }
            .into(),
            backtrace: std::backtrace::Backtrace::capture(),
        }
    }

    #[test]
    fn test_github_401_converts_to_bad_credentials() {
        let err: FetchError = github_error(StatusCode::UNAUTHORIZED, "Bad credentials").into();
        assert!(matches!(err, FetchError::BadCredentials));
    }

    #[test]
    fn test_github_404_converts_to_not_found() {
        let err: FetchError = github_error(StatusCode::NOT_FOUND, "Not Found").into();
        assert!(matches!(err, FetchError::NotFound));
    }

    #[test]
    fn test_github_rate_limit_converts_to_rate_limited() {
        let err: FetchError =
            github_error(StatusCode::FORBIDDEN, "API rate limit exceeded for 203.0.113.7.").into();
        assert!(matches!(err, FetchError::RateLimited));
    }

    #[test]
    fn test_undecodable_response_is_api_error() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FetchError = octocrab::Error::Serde {
            source,
            backtrace: std::backtrace::Backtrace::capture(),
        }
        .into();
        assert!(matches!(err, FetchError::Api(_)));
    }

    #[test]
    fn test_unauthorized_is_bad_credentials() {
        assert!(matches!(
            FetchError::from_status(StatusCode::UNAUTHORIZED, "Bad credentials"),
            FetchError::BadCredentials
        ));
    }

    #[test]
    fn test_not_found() {
        assert!(matches!(
            FetchError::from_status(StatusCode::NOT_FOUND, "Not Found"),
            FetchError::NotFound
        ));
    }

    #[test]
    fn test_rate_limit_variants() {
        assert!(matches!(
            FetchError::from_status(
                StatusCode::FORBIDDEN,
                "API rate limit exceeded for 203.0.113.7."
            ),
            FetchError::RateLimited
        ));
        assert!(matches!(
            FetchError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            FetchError::RateLimited
        ));
    }

    #[test]
    fn test_forbidden_without_rate_limit_is_api_error() {
        let err = FetchError::from_status(StatusCode::FORBIDDEN, "Resource not accessible");
        assert!(matches!(err, FetchError::Api(_)));
        assert!(err.to_string().contains("Resource not accessible"));
    }
}
