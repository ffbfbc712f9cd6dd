pub mod prompt;

use std::fmt;

/// Environment variable name for providing a GitHub token without prompting
pub const ENV_TOKEN_VAR: &str = "GITHUB_EXPLORER_TOKEN";

pub use prompt::{prompt_for_credentials, resolve_credentials};

/// How requests to GitHub are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Anonymous,
    Basic { username: String, password: String },
    Token(String),
}

impl Credentials {
    /// Build credentials from prompt answers.
    /// An empty username together with an empty password means anonymous access.
    pub fn from_input(username: &str, password: &str) -> Self {
        if username.is_empty() && password.is_empty() {
            Credentials::Anonymous
        } else {
            Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            }
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Credentials::Anonymous)
    }
}

// Never print secrets, not even in verbose output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Anonymous => write!(f, "anonymous"),
            Credentials::Basic { username, .. } => write!(f, "basic auth as {}", username),
            Credentials::Token(_) => write!(f, "token from {}", ENV_TOKEN_VAR),
        }
    }
}

/// Check for a GitHub token in the GITHUB_EXPLORER_TOKEN environment variable.
/// Returns Some(token) if the env var is set and non-empty, None otherwise.
pub fn get_token_from_env() -> Option<String> {
    token_from_value(std::env::var(ENV_TOKEN_VAR).ok())
}

fn token_from_value(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
