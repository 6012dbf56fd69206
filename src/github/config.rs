//! Configuration for GitHub API connections.
use regex::Regex;
use secrecy::SecretString;
use std::env;

use crate::error::{HubcapError, Result};

/// Base URL for the GitHub REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Accept header value pinning the API version.
pub const API_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
/// User agent sent on every request.
pub const USER_AGENT: &str =
    concat!("hubcap/", env!("CARGO_PKG_VERSION"));
/// Default page size for paginated listings.
pub const DEFAULT_PAGE_SIZE: u8 = 30;
/// Client-side timeout applied to every API call, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fallback actor name when GITHUB_ACTOR is not set.
const DEFAULT_ACTOR: &str = "owner";

/// Remote repository connection configuration for authenticating and
/// interacting with the GitHub API. Resolved once per process and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
    /// Actor name used for display and assignment defaults only.
    pub actor: String,
    /// API base URL, overridable for tests and GHE instances.
    pub base_url: String,
}

impl RemoteConfig {
    /// Build a config from explicit values, validating the repository
    /// identifier before it can reach any URL path.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
        actor: impl Into<String>,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();
        let token: String = token.into();

        if token.trim().is_empty() {
            return Err(HubcapError::invalid_config(
                "missing GitHub token: set GITHUB_TOKEN or pass --token",
            ));
        }

        validate_repo_identifier(&owner, &repo)?;

        let mut actor = actor.into();
        if actor.trim().is_empty() {
            actor = DEFAULT_ACTOR.to_string();
        }

        Ok(Self {
            owner,
            repo,
            token: SecretString::from(token),
            actor,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        })
    }

    /// Resolve config from CLI values with environment fallbacks:
    /// GITHUB_TOKEN, GITHUB_REPOSITORY (owner/name), GITHUB_ACTOR.
    pub fn resolve(
        token_arg: &str,
        repo_arg: &str,
        actor_arg: &str,
    ) -> Result<Self> {
        let token = non_empty(token_arg)
            .or_else(|| env_var("GITHUB_TOKEN"))
            .ok_or_else(|| {
                HubcapError::invalid_config(
                    "missing GitHub token: set GITHUB_TOKEN or pass --token",
                )
            })?;

        let path = non_empty(repo_arg)
            .or_else(|| env_var("GITHUB_REPOSITORY"))
            .ok_or_else(|| {
                HubcapError::invalid_config(
                    "missing repository: set GITHUB_REPOSITORY or pass --repo owner/name",
                )
            })?;

        let (owner, repo) = split_repo_path(&path)?;

        let actor = non_empty(actor_arg)
            .or_else(|| env_var("GITHUB_ACTOR"))
            .unwrap_or_else(|| DEFAULT_ACTOR.to_string());

        Self::new(owner, repo, token, actor)
    }

    /// Full `owner/name` path.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|v| non_empty(&v))
}

/// Split an `owner/name` identifier into its two parts.
pub fn split_repo_path(path: &str) -> Result<(String, String)> {
    match path.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(HubcapError::invalid_config(format!(
            "invalid repository identifier: expected owner/name, got: {path}"
        ))),
    }
}

/// Validate that owner and repository names are syntactically well formed
/// before interpolation into endpoint paths. The token is the trust
/// boundary; this only rejects identifiers that would produce a
/// malformed URL.
pub fn validate_repo_identifier(owner: &str, repo: &str) -> Result<()> {
    let owner_re = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$")?;
    let repo_re = Regex::new(r"^[A-Za-z0-9._-]+$")?;

    if !owner_re.is_match(owner) {
        return Err(HubcapError::invalid_config(format!(
            "invalid repository owner: {owner}"
        )));
    }

    if !repo_re.is_match(repo) {
        return Err(HubcapError::invalid_config(format!(
            "invalid repository name: {repo}"
        )));
    }

    Ok(())
}
