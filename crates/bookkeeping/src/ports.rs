//! GitHub-facing port traits.
//!
//! Actions are written against these traits; the `github` crate implements
//! them over REST and GraphQL. Tests implement them in memory.
//!
//! All methods return [`ApiError`], a transport-neutral summary of what went
//! wrong. Implementations keep their own richer error types internally.

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    Commit, FieldId, Issue, IssueNumber, LabelName, NodeId, OptionId, Project, ProjectId,
    ProjectItemId, ProjectNumber, PullRequest, Release, RepositoryId,
};

/// Failure of a call through one of the ports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The requested resource does not exist or is not visible to the token.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// GitHub answered with a non-success status.
    #[error("GitHub API returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// A GraphQL response carried errors.
    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQl { messages: Vec<String> },

    /// The request never produced a response.
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// The response could not be decoded into the expected shape.
    #[error("Unexpected response: {message}")]
    Decode { message: String },
}

/// Issue reads and label writes.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches an issue or pull request by number.
    async fn get_issue(&self, repo: &RepositoryId, number: IssueNumber) -> Result<Issue, ApiError>;

    /// Adds labels to an issue. Labels already present are left alone;
    /// labels that do not exist in the repository are created by GitHub.
    async fn add_labels(
        &self,
        repo: &RepositoryId,
        number: IssueNumber,
        labels: &[LabelName],
    ) -> Result<(), ApiError>;
}

/// Pull request reads.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn get_pull_request(
        &self,
        repo: &RepositoryId,
        number: IssueNumber,
    ) -> Result<PullRequest, ApiError>;

    /// Every commit on the pull request, oldest first.
    async fn list_pull_request_commits(
        &self,
        repo: &RepositoryId,
        number: IssueNumber,
    ) -> Result<Vec<Commit>, ApiError>;
}

/// Projects (v2) board access.
#[async_trait]
pub trait ProjectBoard: Send + Sync {
    /// Fetches a project with its fields, for a user or organisation owner.
    async fn get_project(&self, owner: &str, number: ProjectNumber) -> Result<Project, ApiError>;

    /// Adds an issue or pull request to the project and returns its item ID.
    ///
    /// Adding content that is already on the board returns the existing item.
    async fn add_project_item(
        &self,
        project: &ProjectId,
        content: &NodeId,
    ) -> Result<ProjectItemId, ApiError>;

    /// Sets a single-select field on an item, which moves it to that column.
    async fn set_single_select(
        &self,
        project: &ProjectId,
        item: &ProjectItemId,
        field: &FieldId,
        option: &OptionId,
    ) -> Result<(), ApiError>;
}

/// Release and commit history.
#[async_trait]
pub trait ReleaseHistory: Send + Sync {
    /// The latest published, non-prerelease release, if any.
    async fn latest_release(&self, repo: &RepositoryId) -> Result<Option<Release>, ApiError>;

    /// Commits reachable from `head` but not from `base_tag`, oldest first.
    ///
    /// With no base every commit reachable from `head` is returned.
    async fn commits_since(
        &self,
        repo: &RepositoryId,
        base_tag: Option<&str>,
        head: &str,
    ) -> Result<Vec<Commit>, ApiError>;
}
