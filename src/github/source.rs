use super::error::FetchError;
use super::types::PullRequest;

/// A feed of pull requests for one repository and state.
#[allow(async_fn_in_trait)]
pub trait PullSource {
    /// Next pull request, or None when the feed is exhausted
    async fn next_pull(&mut self) -> Result<Option<PullRequest>, FetchError>;

    /// Fill in merger, changed file count and changed file paths
    async fn enrich(&self, pr: &mut PullRequest) -> Result<(), FetchError>;

    /// Whether the feed yields pull requests newest-first by creation time
    fn newest_first(&self) -> bool {
        true
    }
}
