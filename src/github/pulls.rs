use http::Uri;
use octocrab::models::pulls::PullRequest as GitHubPull;
use octocrab::models::IssueState;
use octocrab::{params, Octocrab};

use super::error::FetchError;
use super::source::PullSource;
use super::types::{PullRequest, PullState, RepoName};

const PAGE_SIZE: u8 = 100;

/// Pull requests of one state, newest-first, fetched page by page on demand
pub struct RepoPulls<'a> {
    client: &'a Octocrab,
    repo: &'a RepoName,
    state: PullState,
    buffered: std::vec::IntoIter<GitHubPull>,
    next_page: Option<Uri>,
    started: bool,
    verbose: bool,
}

impl<'a> RepoPulls<'a> {
    pub fn new(client: &'a Octocrab, repo: &'a RepoName, state: PullState, verbose: bool) -> Self {
        Self {
            client,
            repo,
            state,
            buffered: Vec::new().into_iter(),
            next_page: None,
            started: false,
            verbose,
        }
    }

    /// Fetch the next page into the buffer. Returns false once no pages remain.
    async fn fetch_page(&mut self) -> Result<bool, FetchError> {
        let page = if !self.started {
            self.started = true;
            let state = match self.state {
                PullState::Open => params::State::Open,
                PullState::Closed => params::State::Closed,
            };
            let page = self
                .client
                .pulls(&self.repo.owner, &self.repo.name)
                .list()
                .state(state)
                .sort(params::pulls::Sort::Created)
                .direction(params::Direction::Descending)
                .per_page(PAGE_SIZE)
                .send()
                .await?;
            Some(page)
        } else if self.next_page.is_some() {
            self.client.get_page::<GitHubPull>(&self.next_page).await?
        } else {
            None
        };

        match page {
            Some(page) => {
                if self.verbose {
                    eprintln!(
                        "Fetched page of {} {} pull requests from {}",
                        page.items.len(),
                        self.state.as_str(),
                        self.repo
                    );
                }
                self.next_page = page.next;
                self.buffered = page.items.into_iter();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl PullSource for RepoPulls<'_> {
    async fn next_pull(&mut self) -> Result<Option<PullRequest>, FetchError> {
        loop {
            if let Some(pull) = self.buffered.next() {
                return convert_pull(pull).map(Some);
            }
            if !self.fetch_page().await? {
                return Ok(None);
            }
        }
    }

    async fn enrich(&self, pr: &mut PullRequest) -> Result<(), FetchError> {
        let pulls = self.client.pulls(&self.repo.owner, &self.repo.name);

        let details = pulls.get(pr.number).await?;
        if let Some(merged) = details.merged {
            pr.merged = merged;
        }
        pr.merged_by = details.merged_by.map(|user| user.login);
        pr.changed_files = details.changed_files.unwrap_or(0);

        let first_page = pulls.list_files(pr.number).await?;
        let files = self.client.all_pages(first_page).await?;
        pr.files = files.into_iter().map(|entry| entry.filename).collect();

        Ok(())
    }
}

/// Convert a listing entry. The listing carries no `merged` flag, so a merge
/// timestamp is taken as the merged signal until enrichment confirms it.
fn convert_pull(pull: GitHubPull) -> Result<PullRequest, FetchError> {
    let created_at = pull.created_at.ok_or_else(|| {
        FetchError::Api(format!("pull request #{} has no creation time", pull.number))
    })?;

    let state = match pull.state {
        Some(IssueState::Open) => PullState::Open,
        _ => PullState::Closed,
    };

    Ok(PullRequest {
        number: pull.number,
        title: pull.title.unwrap_or_default(),
        // Deleted accounts are shown as "ghost" on GitHub
        author: pull
            .user
            .map(|user| user.login)
            .unwrap_or_else(|| "ghost".to_string()),
        created_at,
        state,
        merged: pull.merged.unwrap_or(pull.merged_at.is_some()),
        merged_at: pull.merged_at,
        merged_by: pull.merged_by.map(|user| user.login),
        changed_files: pull.changed_files.unwrap_or(0),
        files: Vec::new(),
    })
}
