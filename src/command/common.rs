//! Common functionality shared between commands, including the
//! check-before-create idempotency guards.
use log::*;
use serde_json::Value;

use crate::{
    error::Result,
    github::{
        action::{Action, CreateIssue, CreateTarget},
        dedupe,
        traits::RepoOps,
        types::{ListKind, Summary},
    },
};

/// Create an issue unless a similar open issue already exists. Returns
/// the created payload, or None when the create was skipped. The check
/// is optimistic: a concurrent create can still slip through, which is
/// accepted over blocking progress.
pub async fn guarded_create_issue(
    ops: &dyn RepoOps,
    issue: CreateIssue,
    force: bool,
) -> Result<Option<Value>> {
    if !force {
        let existing = ops.list_open(ListKind::Issues, None).await?;

        if let Some(found) = dedupe::find_duplicate(&issue.title, &existing)
        {
            warn!(
                "skipping create: similar open issue #{} already exists: {}",
                found.number, found.title
            );
            return Ok(None);
        }
    }

    let payload = ops
        .execute(Action::Create(CreateTarget::Issue(issue)))
        .await?;

    Ok(Some(payload))
}

/// Comment on an issue or pull request unless an equivalent comment has
/// already been posted.
pub async fn guarded_comment(
    ops: &dyn RepoOps,
    number: u64,
    body: String,
    force: bool,
) -> Result<Option<Value>> {
    if !force {
        let comments = ops.list_comments(number).await?;

        if dedupe::comment_exists(&body, &comments) {
            warn!(
                "skipping comment: equivalent comment already exists on #{number}"
            );
            return Ok(None);
        }
    }

    let payload = ops.execute(Action::Comment { number, body }).await?;

    Ok(Some(payload))
}

/// Print an action result payload for consumption by calling scripts.
pub fn print_payload(payload: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

/// Print open-item summaries one per line.
pub fn print_summaries(items: &[Summary]) {
    for item in items {
        let labels = item
            .label_names()
            .collect::<Vec<_>>()
            .join(", ");

        if labels.is_empty() {
            println!("#{} {}", item.number, item.title);
        } else {
            println!("#{} {} [{}]", item.number, item.title, labels);
        }
    }
}
