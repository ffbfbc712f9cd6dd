use anyhow::{Context, Result};
use octocrab::Octocrab;

use crate::credentials::Credentials;

/// Create a GitHub client for the given credentials.
/// Anonymous clients work for public repositories but hit rate limits sooner.
pub fn create_client(credentials: &Credentials) -> Result<Octocrab> {
    let builder = Octocrab::builder();
    let builder = match credentials {
        Credentials::Anonymous => builder,
        Credentials::Basic { username, password } => {
            builder.basic_auth(username.clone(), password.clone())
        }
        Credentials::Token(token) => builder.personal_token(token.clone()),
    };
    builder.build().context("Failed to create GitHub client")
}
