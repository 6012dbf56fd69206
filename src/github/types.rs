//! Read-only views of GitHub items consumed by listing and dedupe logic.
//! These are never mutated locally; GitHub is the sole source of truth.
use serde::Deserialize;

/// Kind of open items to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Issues,
    PullRequests,
}

impl ListKind {
    /// Endpoint path segment under `/repos/{owner}/{repo}/`.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ListKind::Issues => "issues",
            ListKind::PullRequests => "pulls",
        }
    }
}

/// Issue or pull request label.
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Summary view of an issue or pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub state: String,
    /// Marker present when an entry from the issues listing is actually
    /// a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Summary {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }
}

/// Summary view of an issue or pull request comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentSummary {
    pub id: u64,
    #[serde(default)]
    pub body: String,
}
