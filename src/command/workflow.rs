//! Workflow dispatch command implementation.
use log::*;
use serde_json::{Map, Value};

use crate::{
    cli::WorkflowCommand,
    command::common,
    error::{HubcapError, Result},
    github::{action::Action, client::GithubClient, traits::RepoOps},
};

/// Execute a workflow subcommand.
pub async fn execute(
    client: &GithubClient,
    cmd: &WorkflowCommand,
) -> Result<()> {
    match cmd {
        WorkflowCommand::Dispatch {
            workflow,
            git_ref,
            input,
        } => {
            let payload = client
                .execute(Action::Dispatch {
                    workflow: workflow.clone(),
                    git_ref: git_ref.clone(),
                    inputs: parse_inputs(input)?,
                })
                .await?;

            info!("dispatched workflow {workflow} on {git_ref}");
            common::print_payload(&payload)
        }
    }
}

/// Parse repeated key=value arguments into a workflow inputs object.
fn parse_inputs(values: &[String]) -> Result<Map<String, Value>> {
    let mut inputs = Map::new();

    for value in values {
        let (key, val) = value.split_once('=').ok_or_else(|| {
            HubcapError::invalid_request(format!(
                "invalid workflow input: expected key=value, got: {value}"
            ))
        })?;

        if key.is_empty() {
            return Err(HubcapError::invalid_request(format!(
                "invalid workflow input: empty key in: {value}"
            )));
        }

        inputs.insert(key.to_string(), Value::String(val.to_string()));
    }

    Ok(inputs)
}
