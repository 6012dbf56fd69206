//! CLI command execution.

/// Common functionality shared between commands.
pub mod common;

/// Issue management commands.
pub mod issue;

/// Pull request management commands.
pub mod pull;

/// Repository information command.
pub mod repo;

/// Workflow dispatch commands.
pub mod workflow;

use crate::{cli, error::Result, github::client::GithubClient};

/// Resolve credentials, build the facade, and dispatch the subcommand.
pub fn run(args: &cli::Args) -> Result<()> {
    let config = args.remote_config()?;
    let client = GithubClient::new(config)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        match &args.command {
            cli::Command::Issue(cmd) => issue::execute(&client, cmd).await,
            cli::Command::Pr(cmd) => pull::execute(&client, cmd).await,
            cli::Command::Workflow(cmd) => {
                workflow::execute(&client, cmd).await
            }
            cli::Command::Repo => repo::execute(&client).await,
        }
    })
}
