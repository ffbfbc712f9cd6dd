use indexmap::IndexMap;

use super::classify::is_offensive;
use crate::github::types::{PullRequest, PullState};

/// Pull request tallies for one author or for the whole report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub total: u64,
    pub open: u64,
    pub closed: u64,
    pub merged: u64,
    pub offensive: u64,
}

impl Counters {
    fn record(&mut self, pr: &PullRequest, offensive: bool) {
        self.total += 1;
        match pr.state {
            PullState::Open => self.open += 1,
            PullState::Closed => self.closed += 1,
        }
        if pr.merged {
            self.merged += 1;
        }
        if offensive {
            self.offensive += 1;
        }
    }

    /// Closed pull requests that were never merged, `closed - merged`.
    /// Saturates at zero: a pull reported merged while still open makes the
    /// plain difference negative, and this reports 0 instead.
    pub fn closed_without_merge(&self) -> u64 {
        self.closed.saturating_sub(self.merged)
    }
}

/// Running totals over every pull request recorded in one report
#[derive(Debug, Clone, Default)]
pub struct PullRequestCounts {
    jira_key: Option<String>,
    totals: Counters,
    authors: IndexMap<String, Counters>,
}

impl PullRequestCounts {
    pub fn new(jira_key: Option<String>) -> Self {
        Self {
            jira_key,
            totals: Counters::default(),
            authors: IndexMap::new(),
        }
    }

    pub fn jira_key(&self) -> Option<&str> {
        self.jira_key.as_deref()
    }

    pub fn is_offensive(&self, pr: &PullRequest) -> bool {
        is_offensive(&pr.title, self.jira_key())
    }

    /// Record one pull request. Not idempotent: record each pull exactly once.
    /// Merged and closed are counted independently, so a merged pull that is
    /// also closed bumps both.
    pub fn count_pull(&mut self, pr: &PullRequest) {
        let offensive = self.is_offensive(pr);
        self.totals.record(pr, offensive);
        self.authors
            .entry(pr.author.clone())
            .or_default()
            .record(pr, offensive);
    }

    pub fn totals(&self) -> &Counters {
        &self.totals
    }

    pub fn author(&self, login: &str) -> Option<&Counters> {
        self.authors.get(login)
    }

    /// Open plus closed pull requests
    pub fn all_requests(&self) -> u64 {
        self.totals.open + self.totals.closed
    }

    /// Authors ordered by merged count, most first. Ties keep first-seen order.
    pub fn authors_by_merged(&self) -> Vec<(&str, &Counters)> {
        let mut authors: Vec<(&str, &Counters)> = self
            .authors
            .iter()
            .map(|(login, counters)| (login.as_str(), counters))
            .collect();
        // sort_by is stable
        authors.sort_by(|a, b| b.1.merged.cmp(&a.1.merged));
        authors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pr(author: &str, state: PullState, merged: bool, title: &str) -> PullRequest {
        PullRequest {
            number: 1,
            title: title.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
            state,
            merged,
            merged_at: if merged { Some(Utc::now()) } else { None },
            merged_by: None,
            changed_files: 0,
            files: vec![],
        }
    }

    #[test]
    fn test_scenario_with_jira_key() {
        let mut counts = PullRequestCounts::new(Some("ABC-".to_string()));
        counts.count_pull(&pr("alice", PullState::Open, false, "ABC-1 fix"));
        counts.count_pull(&pr("bob", PullState::Closed, true, "no ticket"));
        counts.count_pull(&pr("alice", PullState::Closed, false, "ABC-2 fix"));

        let totals = counts.totals();
        assert_eq!(totals.open, 1);
        assert_eq!(totals.closed, 2);
        assert_eq!(totals.merged, 1);
        assert_eq!(totals.offensive, 1);
        assert_eq!(counts.all_requests(), 3);
        assert_eq!(totals.closed_without_merge(), 1);

        let bob = counts.author("bob").unwrap();
        assert_eq!(bob.offensive, 1);
        assert_eq!(bob.merged, 1);
        assert_eq!(bob.closed, 1);
    }

    #[test]
    fn test_author_totals_sum_to_recorded() {
        let mut counts = PullRequestCounts::new(None);
        let authors = ["alice", "bob", "carol", "alice", "bob", "alice"];
        for (i, author) in authors.iter().enumerate() {
            let state = if i % 2 == 0 { PullState::Open } else { PullState::Closed };
            counts.count_pull(&pr(author, state, false, "t"));
        }

        let sum: u64 = counts.authors_by_merged().iter().map(|(_, c)| c.total).sum();
        assert_eq!(sum, authors.len() as u64);
        assert_eq!(counts.all_requests(), counts.totals().open + counts.totals().closed);
        assert_eq!(counts.author("alice").unwrap().total, 3);
    }

    #[test]
    fn test_no_jira_key_counts_nothing_offensive() {
        let mut counts = PullRequestCounts::new(None);
        counts.count_pull(&pr("alice", PullState::Open, false, "whatever"));
        assert_eq!(counts.totals().offensive, 0);
        assert_eq!(counts.jira_key(), None);
    }

    #[test]
    fn test_merged_while_open_is_tolerated() {
        let mut counts = PullRequestCounts::new(None);
        counts.count_pull(&pr("alice", PullState::Open, true, "odd"));
        let totals = counts.totals();
        assert_eq!(totals.open, 1);
        assert_eq!(totals.merged, 1);
        assert_eq!(totals.closed_without_merge(), 0);
    }

    #[test]
    fn test_double_count_is_not_guarded() {
        let mut counts = PullRequestCounts::new(None);
        let p = pr("alice", PullState::Closed, true, "t");
        counts.count_pull(&p);
        counts.count_pull(&p);
        assert_eq!(counts.author("alice").unwrap().total, 2);
        assert_eq!(counts.totals().merged, 2);
    }

    #[test]
    fn test_authors_sorted_by_merged_with_first_seen_ties() {
        let mut counts = PullRequestCounts::new(None);
        counts.count_pull(&pr("dave", PullState::Open, false, "t"));
        counts.count_pull(&pr("erin", PullState::Closed, true, "t"));
        counts.count_pull(&pr("frank", PullState::Open, false, "t"));
        counts.count_pull(&pr("grace", PullState::Closed, true, "t"));
        counts.count_pull(&pr("grace", PullState::Closed, true, "t"));

        let order: Vec<&str> = counts.authors_by_merged().iter().map(|(a, _)| *a).collect();
        assert_eq!(order, vec!["grace", "erin", "dave", "frank"]);
    }
}
