use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use std::fmt;

/// Raw state of a pull request as reported by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState {
    Open,
    Closed,
}

impl PullState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullState::Open => "open",
            PullState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub state: PullState,
    pub merged: bool,
    pub merged_at: Option<DateTime<Utc>>,
    pub merged_by: Option<String>, // Filled by enrichment
    pub changed_files: u64,        // Filled by enrichment
    pub files: Vec<String>,        // Filled by enrichment
}

impl PullRequest {
    /// Time from creation to merge, if merged
    pub fn merge_latency(&self) -> Option<chrono::Duration> {
        self.merged_at.map(|at| at - self.created_at)
    }
}

/// Repository metadata shown at the top of a report
#[derive(Debug, Clone)]
pub struct RepoDetails {
    pub full_name: String,
    pub name: String,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A repository reference in "owner/name" format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoName {
    pub owner: String,
    pub name: String,
}

impl RepoName {
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            bail!("Repository must be given as owner/name, got '{}'", s);
        }
        Ok(RepoName {
            owner: parts[0].to_string(),
            name: parts[1].to_string(),
        })
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
