//! Issue management command implementations.
use log::*;

use crate::{
    cli::IssueCommand,
    command::common,
    error::Result,
    github::{
        action::{Action, CreateIssue, UpdateFields},
        client::GithubClient,
        traits::RepoOps,
        types::ListKind,
    },
};

/// Execute an issue subcommand.
pub async fn execute(
    client: &GithubClient,
    cmd: &IssueCommand,
) -> Result<()> {
    match cmd {
        IssueCommand::List { limit } => list(client, *limit).await,
        IssueCommand::Create {
            title,
            body,
            label,
            assignee,
            assign_actor,
            force,
        } => {
            let mut assignees = assignee.clone();
            if *assign_actor {
                assignees.push(client.config().actor.clone());
            }

            let issue = CreateIssue {
                title: title.clone(),
                body: non_empty(body),
                labels: non_empty_vec(label),
                assignees: if assignees.is_empty() {
                    None
                } else {
                    Some(assignees)
                },
            };

            create(client, issue, *force).await
        }
        IssueCommand::Update {
            number,
            title,
            body,
            state,
            label,
        } => {
            let fields = UpdateFields {
                title: title.clone(),
                body: body.clone(),
                state: state.clone(),
                labels: non_empty_vec(label),
                assignees: None,
            };

            update(client, *number, fields).await
        }
        IssueCommand::Close { number } => close(client, *number).await,
        IssueCommand::Comment {
            number,
            body,
            force,
        } => comment(client, *number, body.clone(), *force).await,
    }
}

async fn list(ops: &dyn RepoOps, limit: Option<usize>) -> Result<()> {
    let items = ops.list_open(ListKind::Issues, limit).await?;

    info!("found {} open issues", items.len());
    common::print_summaries(&items);

    Ok(())
}

async fn create(
    ops: &dyn RepoOps,
    issue: CreateIssue,
    force: bool,
) -> Result<()> {
    let title = issue.title.clone();

    if let Some(payload) =
        common::guarded_create_issue(ops, issue, force).await?
    {
        info!("created issue: {}", title);
        common::print_payload(&payload)?;
    }

    Ok(())
}

async fn update(
    ops: &dyn RepoOps,
    number: u64,
    fields: UpdateFields,
) -> Result<()> {
    let payload =
        ops.execute(Action::Update { number, fields }).await?;

    info!("updated issue #{number}");
    common::print_payload(&payload)
}

async fn close(ops: &dyn RepoOps, number: u64) -> Result<()> {
    let payload = ops.execute(Action::Close { number }).await?;

    info!("closed issue #{number}");
    common::print_payload(&payload)
}

async fn comment(
    ops: &dyn RepoOps,
    number: u64,
    body: String,
    force: bool,
) -> Result<()> {
    if let Some(payload) =
        common::guarded_comment(ops, number, body, force).await?
    {
        info!("commented on issue #{number}");
        common::print_payload(&payload)?;
    }

    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn non_empty_vec(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}
