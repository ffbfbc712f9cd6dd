use crate::github::types::{PullRequest, PullState};

/// State shown in reports. GitHub keeps "merged" as a flag next to the
/// open/closed state, so a merged pull reports as merged whatever its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Open,
    Closed,
    Merged,
}

impl DisplayState {
    pub fn of(pr: &PullRequest) -> Self {
        if pr.merged {
            return DisplayState::Merged;
        }
        match pr.state {
            PullState::Open => DisplayState::Open,
            PullState::Closed => DisplayState::Closed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayState::Open => "open",
            DisplayState::Closed => "closed",
            DisplayState::Merged => "merged",
        }
    }
}

/// A title is offensive when a Jira key is configured and the title does not
/// mention it (case-sensitive). Without a key nothing is offensive.
pub fn is_offensive(title: &str, jira_key: Option<&str>) -> bool {
    match jira_key {
        Some(key) if !key.is_empty() => !title.contains(key),
        _ => false,
    }
}
