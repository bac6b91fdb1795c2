//! Core domain for repository bookkeeping actions.
//!
//! This crate contains every domain rule the actions apply: closing-footer
//! validation, semantic versions, conventional-commit release planning,
//! manifest version detection, and project column lookup. It also defines the
//! port traits through which actions reach GitHub.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `ProjectId`, etc.) |
//! | [`types`] | Issue, pull request, commit, release, project records |
//! | [`errors`] | Domain error type |
//! | [`footer`] | `Closes: #<number>` footer rules |
//! | [`version`] | Semantic versions and bumps |
//! | [`commits`] | Conventional-commit classification and release plans |
//! | [`manifest`] | Manifest version extraction and release state |
//! | [`board`] | Project field / column lookup |
//! | [`ports`] | Async traits implemented by the GitHub adapter |

pub mod board;
pub mod commits;
pub mod errors;
pub mod footer;
pub mod identifiers;
pub mod manifest;
pub mod ports;
pub mod types;
pub mod version;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use board::{find_field, find_option, resolve_column, ColumnTarget};
pub use commits::{classify, is_merge_commit, ConventionalCommit, ReleasePlan};
pub use errors::BookkeepingError;
pub use footer::{
    closed_issues, footer_block, is_closing_footer, parse_closing_footer, validate_message,
    FooterProblem, FooterViolation, MessageKind,
};
pub use identifiers::{
    CommitSha, FieldId, IssueNumber, LabelName, NodeId, OptionId, ProjectId, ProjectItemId,
    ProjectNumber, RepositoryId,
};
pub use manifest::{manifest_version, ManifestKind, ReleaseState};
pub use ports::{ApiError, IssueTracker, ProjectBoard, PullRequestSource, ReleaseHistory};
pub use types::{
    Commit, FieldOption, Issue, IssueState, Project, ProjectField, PullRequest, Release, Timestamp,
};
pub use version::{Bump, Version};
