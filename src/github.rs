//! Typed facade over the GitHub REST API.
//!
//! Provides token-based authentication, a tagged action vocabulary for
//! issue, pull request, and workflow operations, transparent pagination,
//! and the check-before-create idempotency guard.

/// The tagged action vocabulary and request validation.
pub mod action;

/// Facade implementation backed by reqwest.
pub mod client;

/// Credentials, repository identity, and API constants.
pub mod config;

/// Duplicate-detection heuristics for idempotent creates and comments.
pub mod dedupe;

/// Common trait for repository operations.
pub mod traits;

/// Shared read-only views of issues, pull requests, and comments.
pub mod types;
