//! GitHub infrastructure adapter.
//!
//! Implements the port traits defined in the [`bookkeeping`] crate
//! (`IssueTracker`, `PullRequestSource`, `ProjectBoard`, `ReleaseHistory`)
//! with one [`GitHubClient`] that speaks REST for issues, pull requests,
//! commits and releases, and GraphQL for Projects (v2).
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Authentication, pagination, and payload mapping are handled here; the
//! [`bookkeeping`] crate never sees them.

mod client;
mod error;
mod graphql;
mod ports;
mod rest;

pub use client::{ClientConfig, GitHubClient, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};
pub use error::GitHubError;
