use octocrab::Octocrab;

use super::error::FetchError;
use super::types::{RepoDetails, RepoName};

/// Look up a repository. Doubles as the reachability and access check.
pub async fn fetch_repository(
    client: &Octocrab,
    repo: &RepoName,
) -> Result<RepoDetails, FetchError> {
    let repository = client.repos(&repo.owner, &repo.name).get().await?;

    Ok(RepoDetails {
        full_name: repository.full_name.unwrap_or_else(|| repo.to_string()),
        name: repository.name,
        description: repository.description,
        updated_at: repository.updated_at,
    })
}
