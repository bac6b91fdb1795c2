//! The webhook payload that triggered the workflow (`GITHUB_EVENT_PATH`).

use std::path::Path;

use bookkeeping::IssueNumber;
use serde_json::Value;

use crate::ToolkitError;

/// A parsed event payload with typed accessors for the parts actions use.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPayload(Value);

/// The `pull_request` object of a `pull_request` / `pull_request_target` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPullRequest {
    pub number: IssueNumber,
    pub body: String,
    pub merged: bool,
    pub head_sha: Option<String>,
}

impl EventPayload {
    /// Reads and parses the payload file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ToolkitError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ToolkitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value = serde_json::from_str(&contents).map_err(|source| ToolkitError::EventPayload {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self(value))
    }

    /// Wraps an already-parsed payload.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The pull request the event is about, if any.
    pub fn pull_request(&self) -> Option<EventPullRequest> {
        let pr = self.0.get("pull_request")?;
        let number = pr.get("number")?.as_u64().and_then(IssueNumber::new)?;
        Some(EventPullRequest {
            number,
            body: pr
                .get("body")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            merged: pr.get("merged").and_then(Value::as_bool).unwrap_or(false),
            head_sha: pr
                .pointer("/head/sha")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// The issue number of an `issues` / `issue_comment` event.
    pub fn issue_number(&self) -> Option<IssueNumber> {
        self.0
            .pointer("/issue/number")
            .and_then(Value::as_u64)
            .and_then(IssueNumber::new)
    }

    /// The issue or pull request the event is about, preferring the issue.
    pub fn subject_number(&self) -> Option<IssueNumber> {
        self.issue_number()
            .or_else(|| self.pull_request().map(|pr| pr.number))
    }
}
