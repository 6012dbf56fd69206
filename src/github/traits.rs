//! Traits for GitHub repository operations.
use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::Result,
    github::{
        action::Action,
        types::{CommentSummary, ListKind, Summary},
    },
};

/// Repository operations exposed to the command layer. The seam exists
/// so callers can be tested against a mock instead of the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepoOps {
    /// Dispatch one validated action as a single HTTP call.
    async fn execute(&self, action: Action) -> Result<Value>;

    /// List open items of the given kind, following pagination until
    /// exhausted or the cap is reached.
    async fn list_open(
        &self,
        kind: ListKind,
        cap: Option<usize>,
    ) -> Result<Vec<Summary>>;

    /// List all comments on an issue or pull request.
    async fn list_comments(&self, number: u64)
    -> Result<Vec<CommentSummary>>;
}
