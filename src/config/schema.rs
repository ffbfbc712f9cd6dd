use serde::Deserialize;

/// Defaults for flags that are tedious to repeat on every run
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// History window, e.g. "2 weeks"
    #[serde(default)]
    pub history: Option<String>,
    /// Jira issue key every pull request title should mention, e.g. "ABC-"
    #[serde(default)]
    pub jira_key: Option<String>,
}
