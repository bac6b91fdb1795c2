//! Shared value types mirroring small slices of the GitHub schema.
//!
//! These are flat records: the only invariant they carry is that the IDs
//! inside them were issued by GitHub. Infrastructure crates map API payloads
//! into them; actions read them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CommitSha, FieldId, IssueNumber, NodeId, OptionId, ProjectId};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Issues and pull requests
// ---------------------------------------------------------------------------

/// Open/closed state shared by issues and pull requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
}

/// An issue (or a pull request seen through the issues API).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub number: IssueNumber,
    /// GraphQL node ID; this is what project boards reference.
    pub node_id: NodeId,
    pub title: String,
    pub state: IssueState,
    /// `true` when the number belongs to a pull request.
    pub is_pull_request: bool,
}

/// A pull request as needed by the labeling and footer actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: IssueNumber,
    pub node_id: NodeId,
    pub title: String,
    /// Description text. GitHub returns `null` for an empty body; that maps
    /// to the empty string.
    pub body: String,
    pub merged: bool,
    pub merged_at: Option<Timestamp>,
    pub head_sha: CommitSha,
}

// ---------------------------------------------------------------------------
// Commits and releases
// ---------------------------------------------------------------------------

/// One commit in a history range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: CommitSha,
    /// Full message: subject, body and footers.
    pub message: String,
    pub authored_at: Option<Timestamp>,
}

impl Commit {
    /// First line of the message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// A published (or draft) GitHub release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub name: Option<String>,
    pub published_at: Option<Timestamp>,
    pub draft: bool,
    pub prerelease: bool,
}

// ---------------------------------------------------------------------------
// Project boards
// ---------------------------------------------------------------------------

/// One selectable value of a single-select field; on a board this is a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: OptionId,
    pub name: String,
}

/// A project field. Only single-select fields carry options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectField {
    pub id: FieldId,
    pub name: String,
    pub options: Vec<FieldOption>,
}

impl ProjectField {
    /// `true` if the field can be used to place items in columns.
    pub fn is_single_select(&self) -> bool {
        !self.options.is_empty()
    }
}

/// A Projects (v2) board with its field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub fields: Vec<ProjectField>,
}
