//! Pull request management command implementations.
use log::*;

use crate::{
    cli::PrCommand,
    command::common,
    error::Result,
    github::{
        action::{Action, CreatePull, CreateTarget},
        client::GithubClient,
        traits::RepoOps,
        types::ListKind,
    },
};

/// Execute a pull request subcommand.
pub async fn execute(client: &GithubClient, cmd: &PrCommand) -> Result<()> {
    match cmd {
        PrCommand::List { limit } => list(client, *limit).await,
        PrCommand::Create {
            title,
            body,
            head,
            base,
        } => {
            let pull = CreatePull {
                title: title.clone(),
                body: body.clone(),
                head: head.clone(),
                base: base.clone(),
            };

            create(client, pull).await
        }
        PrCommand::Comment {
            number,
            body,
            force,
        } => comment(client, *number, body.clone(), *force).await,
        PrCommand::Merge { number, method } => {
            let payload = client
                .execute(Action::Merge {
                    number: *number,
                    method: *method,
                })
                .await?;

            info!("merged pull request #{number}");
            common::print_payload(&payload)
        }
        PrCommand::Review {
            number,
            event,
            body,
        } => {
            let payload = client
                .execute(Action::Review {
                    number: *number,
                    event: *event,
                    body: body.clone(),
                })
                .await?;

            info!("reviewed pull request #{number}");
            common::print_payload(&payload)
        }
    }
}

async fn list(ops: &dyn RepoOps, limit: Option<usize>) -> Result<()> {
    let items = ops.list_open(ListKind::PullRequests, limit).await?;

    info!("found {} open pull requests", items.len());
    common::print_summaries(&items);

    Ok(())
}

async fn create(ops: &dyn RepoOps, pull: CreatePull) -> Result<()> {
    let title = pull.title.clone();

    let payload = ops
        .execute(Action::Create(CreateTarget::Pull(pull)))
        .await?;

    info!("created pull request: {title}");
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
        info!("commented on pull request #{number}");
        common::print_payload(&payload)?;
    }

    Ok(())
}
