//! Hubcap: a typed facade over the GitHub REST API with a maintenance
//! CLI for automating issues, pull requests, and workflow runs.

pub mod cli;
pub mod command;
pub mod error;
pub mod github;

pub use error::{HubcapError, Result};
