//! CLI argument parsing and GitHub connection configuration.
use clap::{Parser, Subcommand};

use crate::{
    error::Result,
    github::{
        action::{MergeMethod, ReviewEvent},
        config::RemoteConfig,
    },
};

/// Global CLI arguments for GitHub configuration and debugging.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "", global = true)]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub token: String,

    #[arg(long, default_value = "", global = true)]
    /// Target repository as owner/name. Falls back to GITHUB_REPOSITORY.
    pub repo: String,

    #[arg(long, default_value = "", global = true)]
    /// Actor name used for assignment defaults. Falls back to GITHUB_ACTOR.
    pub actor: String,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Repository maintenance subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage repository issues.
    #[command(subcommand)]
    Issue(IssueCommand),

    /// Manage pull requests.
    #[command(subcommand)]
    Pr(PrCommand),

    /// Manage workflow runs.
    #[command(subcommand)]
    Workflow(WorkflowCommand),

    /// Show repository information.
    Repo,
}

/// Issue operations.
#[derive(Subcommand, Debug)]
pub enum IssueCommand {
    /// List open issues.
    List {
        /// Stop listing after this many items.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Create an issue unless a similar open issue already exists.
    Create {
        /// Issue title.
        #[arg(long)]
        title: String,

        /// Issue body.
        #[arg(long, default_value = "")]
        body: String,

        /// Label to apply. Repeatable.
        #[arg(long)]
        label: Vec<String>,

        /// User to assign. Repeatable.
        #[arg(long)]
        assignee: Vec<String>,

        /// Also assign the configured actor.
        #[arg(long, default_value_t = false)]
        assign_actor: bool,

        /// Create even when a similar open issue exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Update fields on an existing issue.
    Update {
        /// Issue number.
        #[arg(long)]
        number: u64,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New body.
        #[arg(long)]
        body: Option<String>,

        /// New state: open or closed.
        #[arg(long)]
        state: Option<String>,

        /// Replacement label set. Repeatable.
        #[arg(long)]
        label: Vec<String>,
    },

    /// Close an issue.
    Close {
        /// Issue number.
        #[arg(long)]
        number: u64,
    },

    /// Comment on an issue unless an equivalent comment exists.
    Comment {
        /// Issue number.
        #[arg(long)]
        number: u64,

        /// Comment body.
        #[arg(long)]
        body: String,

        /// Comment even when an equivalent comment exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// Pull request operations.
#[derive(Subcommand, Debug)]
pub enum PrCommand {
    /// List open pull requests.
    List {
        /// Stop listing after this many items.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Open a pull request.
    Create {
        /// Pull request title.
        #[arg(long)]
        title: String,

        /// Pull request body.
        #[arg(long, default_value = "")]
        body: String,

        /// Source branch.
        #[arg(long)]
        head: String,

        /// Target branch.
        #[arg(long)]
        base: String,
    },

    /// Comment on a pull request unless an equivalent comment exists.
    Comment {
        /// Pull request number.
        #[arg(long)]
        number: u64,

        /// Comment body.
        #[arg(long)]
        body: String,

        /// Comment even when an equivalent comment exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Merge a pull request.
    Merge {
        /// Pull request number.
        #[arg(long)]
        number: u64,

        /// Merge strategy.
        #[arg(long, value_enum, default_value_t = MergeMethod::Merge)]
        method: MergeMethod,
    },

    /// Submit a review on a pull request.
    Review {
        /// Pull request number.
        #[arg(long)]
        number: u64,

        /// Review verdict.
        #[arg(long, value_enum, default_value_t = ReviewEvent::Comment)]
        event: ReviewEvent,

        /// Review body. Required unless approving.
        #[arg(long)]
        body: Option<String>,
    },
}

/// Workflow operations.
#[derive(Subcommand, Debug)]
pub enum WorkflowCommand {
    /// Trigger a workflow_dispatch run.
    Dispatch {
        /// Workflow filename, e.g. ci.yml.
        #[arg(long)]
        workflow: String,

        /// Git ref to run against.
        #[arg(long = "ref")]
        git_ref: String,

        /// Workflow input as key=value. Repeatable.
        #[arg(long)]
        input: Vec<String>,
    },
}

impl Args {
    /// Resolve the remote connection from CLI arguments with
    /// environment fallbacks.
    pub fn remote_config(&self) -> Result<RemoteConfig> {
        RemoteConfig::resolve(&self.token, &self.repo, &self.actor)
    }
}
