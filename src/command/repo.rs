//! Repository information command implementation.
use log::*;

use crate::{
    command::common, error::Result, github::client::GithubClient,
};

/// Fetch and print repository metadata.
pub async fn execute(client: &GithubClient) -> Result<()> {
    let payload = client.repo_info().await?;

    if let Some(default_branch) = payload["default_branch"].as_str() {
        info!(
            "repository {} default branch: {default_branch}",
            client.config().path()
        );
    }

    common::print_payload(&payload)
}
