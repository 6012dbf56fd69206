//! Tagged action vocabulary for GitHub operations.
//!
//! Each action knows its HTTP method, endpoint path, and JSON body.
//! Required-field preconditions are checked locally by [`Action::validate`]
//! so a malformed request never costs a network round trip.
use clap::ValueEnum;
use regex::Regex;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{
    error::{HubcapError, Result},
    github::{config::RemoteConfig, types::ListKind},
};

/// Merge strategies accepted by the pulls merge endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    #[default]
    Merge,
    Squash,
    Rebase,
}

/// Review verdicts accepted by the pulls review endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    Approve,
    RequestChanges,
    #[default]
    Comment,
}

/// Fields for a new issue. Optional fields are omitted from the JSON
/// body entirely when unset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

/// Fields for a new pull request. Serializes to exactly these four keys.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePull {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// Target of a create action.
#[derive(Debug, Clone)]
pub enum CreateTarget {
    Issue(CreateIssue),
    Pull(CreatePull),
}

/// Partial update of an existing issue or pull request. At least one
/// field must be set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

impl UpdateFields {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.state.is_none()
            && self.labels.is_none()
            && self.assignees.is_none()
    }
}

/// One intended GitHub operation with its parameters. Constructed
/// transiently per call and discarded after the result is produced.
#[derive(Debug, Clone)]
pub enum Action {
    List {
        kind: ListKind,
    },
    Create(CreateTarget),
    Update {
        number: u64,
        fields: UpdateFields,
    },
    Close {
        number: u64,
    },
    Comment {
        number: u64,
        body: String,
    },
    Merge {
        number: u64,
        method: MergeMethod,
    },
    Review {
        number: u64,
        event: ReviewEvent,
        body: Option<String>,
    },
    Dispatch {
        workflow: String,
        git_ref: String,
        inputs: Map<String, Value>,
    },
}

impl Action {
    /// Short action name used in logs and error diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Action::List { .. } => "list",
            Action::Create(_) => "create",
            Action::Update { .. } => "update",
            Action::Close { .. } => "close",
            Action::Comment { .. } => "comment",
            Action::Merge { .. } => "merge",
            Action::Review { .. } => "review",
            Action::Dispatch { .. } => "dispatch",
        }
    }

    /// HTTP method for this action. POST/PUT/PATCH carry a JSON body,
    /// GET does not.
    pub fn method(&self) -> Method {
        match self {
            Action::List { .. } => Method::GET,
            Action::Create(_)
            | Action::Comment { .. }
            | Action::Review { .. }
            | Action::Dispatch { .. } => Method::POST,
            Action::Update { .. } | Action::Close { .. } => Method::PATCH,
            Action::Merge { .. } => Method::PUT,
        }
    }

    /// Endpoint path relative to the API base URL.
    pub fn path(&self, config: &RemoteConfig) -> String {
        let repo = format!("repos/{}/{}", config.owner, config.repo);

        match self {
            Action::List { kind } => {
                format!("{repo}/{}", kind.endpoint())
            }
            Action::Create(CreateTarget::Issue(_)) => {
                format!("{repo}/issues")
            }
            Action::Create(CreateTarget::Pull(_)) => {
                format!("{repo}/pulls")
            }
            Action::Update { number, .. } | Action::Close { number } => {
                format!("{repo}/issues/{number}")
            }
            Action::Comment { number, .. } => {
                format!("{repo}/issues/{number}/comments")
            }
            Action::Merge { number, .. } => {
                format!("{repo}/pulls/{number}/merge")
            }
            Action::Review { number, .. } => {
                format!("{repo}/pulls/{number}/reviews")
            }
            Action::Dispatch { workflow, .. } => {
                format!("{repo}/actions/workflows/{workflow}/dispatches")
            }
        }
    }

    /// JSON body for this action, if its method carries one.
    pub fn body(&self) -> Option<Value> {
        match self {
            Action::List { .. } => None,
            Action::Create(CreateTarget::Issue(issue)) => {
                Some(json!(issue))
            }
            Action::Create(CreateTarget::Pull(pull)) => Some(json!(pull)),
            Action::Update { fields, .. } => Some(json!(fields)),
            Action::Close { .. } => Some(json!({ "state": "closed" })),
            Action::Comment { body, .. } => Some(json!({ "body": body })),
            Action::Merge { method, .. } => {
                Some(json!({ "merge_method": method }))
            }
            Action::Review { event, body, .. } => {
                let mut review = json!({ "event": event });
                if let Some(body) = body {
                    review["body"] = json!(body);
                }
                Some(review)
            }
            Action::Dispatch {
                git_ref, inputs, ..
            } => {
                let mut dispatch = json!({ "ref": git_ref });
                if !inputs.is_empty() {
                    dispatch["inputs"] = Value::Object(inputs.clone());
                }
                Some(dispatch)
            }
        }
    }

    /// Check required fields locally. Failures are caller errors that
    /// must never reach the network.
    pub fn validate(&self) -> Result<()> {
        match self {
            Action::List { .. } => Ok(()),
            Action::Create(CreateTarget::Issue(issue)) => {
                if issue.title.trim().is_empty() {
                    return Err(HubcapError::invalid_request(
                        "issue title must not be empty",
                    ));
                }
                Ok(())
            }
            Action::Create(CreateTarget::Pull(pull)) => {
                if pull.title.trim().is_empty() {
                    return Err(HubcapError::invalid_request(
                        "pull request title must not be empty",
                    ));
                }
                if pull.head.trim().is_empty() || pull.base.trim().is_empty()
                {
                    return Err(HubcapError::invalid_request(
                        "pull request requires head and base branches",
                    ));
                }
                Ok(())
            }
            Action::Update { number, fields } => {
                validate_number(*number)?;
                if fields.is_empty() {
                    return Err(HubcapError::invalid_request(
                        "update requires at least one field to change",
                    ));
                }
                Ok(())
            }
            Action::Close { number } => validate_number(*number),
            Action::Comment { number, body } => {
                validate_number(*number)?;
                if body.trim().is_empty() {
                    return Err(HubcapError::invalid_request(
                        "comment body must not be empty",
                    ));
                }
                Ok(())
            }
            Action::Merge { number, .. } => validate_number(*number),
            Action::Review {
                number,
                event,
                body,
            } => {
                validate_number(*number)?;
                let body_missing = body
                    .as_ref()
                    .is_none_or(|b| b.trim().is_empty());
                // the API rejects bodyless reviews unless approving
                if body_missing && *event != ReviewEvent::Approve {
                    return Err(HubcapError::invalid_request(
                        "review body is required unless approving",
                    ));
                }
                Ok(())
            }
            Action::Dispatch {
                workflow, git_ref, ..
            } => {
                let workflow_re =
                    Regex::new(r"^[A-Za-z0-9._-]+\.ya?ml$")?;
                if !workflow_re.is_match(workflow) {
                    return Err(HubcapError::invalid_request(format!(
                        "invalid workflow filename: {workflow}"
                    )));
                }
                if git_ref.trim().is_empty() {
                    return Err(HubcapError::invalid_request(
                        "workflow dispatch requires a git ref",
                    ));
                }
                Ok(())
            }
        }
    }
}

fn validate_number(number: u64) -> Result<()> {
    if number == 0 {
        return Err(HubcapError::invalid_request(
            "issue or pull request number must be positive",
        ));
    }
    Ok(())
}
