//! Error type for the GitHub client.

use bookkeeping::ApiError;
use thiserror::Error;

/// Failures talking to the GitHub REST or GraphQL API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The client could not be constructed (bad token characters, bad URL).
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// The request failed before a response arrived, or the body could not
    /// be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A REST path returned 404.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Any other non-success status.
    #[error("GitHub API returned {status} for {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// A GraphQL response carried an `errors` array.
    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQl { messages: Vec<String> },

    /// The payload did not have the expected shape or values.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<GitHubError> for ApiError {
    fn from(err: GitHubError) -> Self {
        match err {
            GitHubError::NotFound { resource } => ApiError::NotFound { resource },
            GitHubError::Status { status, body, .. } => ApiError::Rejected {
                status,
                message: body,
            },
            GitHubError::GraphQl { messages } => ApiError::GraphQl { messages },
            GitHubError::Decode(message) => ApiError::Decode { message },
            GitHubError::Http(err) if err.is_decode() => ApiError::Decode {
                message: err.to_string(),
            },
            GitHubError::Http(err) => ApiError::Transport {
                message: err.to_string(),
            },
            GitHubError::Config(message) => ApiError::Transport { message },
        }
    }
}
