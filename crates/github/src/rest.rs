//! REST payload shapes and their mapping into domain records.
//!
//! Only the fields the actions read are declared; serde ignores the rest.

use bookkeeping::{
    Commit, CommitSha, Issue, IssueNumber, IssueState, NodeId, PullRequest, Release, Timestamp,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::GitHubError;

#[derive(Debug, Deserialize)]
pub(crate) struct RestIssue {
    number: u64,
    node_id: String,
    title: String,
    state: String,
    /// Present (as an object of links) only when the issue is a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestPullRequest {
    number: u64,
    node_id: String,
    title: String,
    body: Option<String>,
    #[serde(default)]
    merged: Option<bool>,
    merged_at: Option<DateTime<Utc>>,
    head: RestRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestSignature {
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestCommitDetail {
    message: String,
    author: Option<RestSignature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestCommit {
    sha: String,
    commit: RestCommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestCompare {
    pub(crate) total_commits: usize,
    pub(crate) commits: Vec<RestCommit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RestRelease {
    tag_name: String,
    name: Option<String>,
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddLabelsBody<'a> {
    pub(crate) labels: Vec<&'a str>,
}

fn number(value: u64) -> Result<IssueNumber, GitHubError> {
    IssueNumber::new(value).ok_or_else(|| GitHubError::Decode(format!("invalid issue number {value}")))
}

fn node_id(value: String) -> Result<NodeId, GitHubError> {
    NodeId::new(value).ok_or_else(|| GitHubError::Decode("empty node_id".to_string()))
}

fn sha(value: String) -> Result<CommitSha, GitHubError> {
    CommitSha::new(value).ok_or_else(|| GitHubError::Decode("empty commit sha".to_string()))
}

impl TryFrom<RestIssue> for Issue {
    type Error = GitHubError;

    fn try_from(raw: RestIssue) -> Result<Self, Self::Error> {
        let state = match raw.state.as_str() {
            "open" => IssueState::Open,
            "closed" => IssueState::Closed,
            other => return Err(GitHubError::Decode(format!("unknown issue state '{other}'"))),
        };
        Ok(Self {
            number: number(raw.number)?,
            node_id: node_id(raw.node_id)?,
            title: raw.title,
            state,
            is_pull_request: raw.pull_request.is_some(),
        })
    }
}

impl TryFrom<RestPullRequest> for PullRequest {
    type Error = GitHubError;

    fn try_from(raw: RestPullRequest) -> Result<Self, Self::Error> {
        // List endpoints omit `merged`; `merged_at` is always present.
        let merged = raw.merged.unwrap_or(raw.merged_at.is_some());
        Ok(Self {
            number: number(raw.number)?,
            node_id: node_id(raw.node_id)?,
            title: raw.title,
            body: raw.body.unwrap_or_default(),
            merged,
            merged_at: raw.merged_at.map(Timestamp::from_utc),
            head_sha: sha(raw.head.sha)?,
        })
    }
}

impl TryFrom<RestCommit> for Commit {
    type Error = GitHubError;

    fn try_from(raw: RestCommit) -> Result<Self, Self::Error> {
        Ok(Self {
            sha: sha(raw.sha)?,
            message: raw.commit.message,
            authored_at: raw
                .commit
                .author
                .and_then(|author| author.date)
                .map(Timestamp::from_utc),
        })
    }
}

impl From<RestRelease> for Release {
    fn from(raw: RestRelease) -> Self {
        Self {
            tag_name: raw.tag_name,
            name: raw.name,
            published_at: raw.published_at.map(Timestamp::from_utc),
            draft: raw.draft,
            prerelease: raw.prerelease,
        }
    }
}

pub(crate) fn commits(raw: Vec<RestCommit>) -> Result<Vec<Commit>, GitHubError> {
    raw.into_iter().map(Commit::try_from).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn issue_with_pull_request_links_is_flagged() {
        let raw: RestIssue = serde_json::from_value(json!({
            "number": 5,
            "node_id": "PR_kw5",
            "title": "Add board sync",
            "state": "open",
            "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/5" }
        }))
        .unwrap();
        let issue = Issue::try_from(raw).unwrap();
        assert!(issue.is_pull_request);
        assert_eq!(issue.state, IssueState::Open);
    }

    #[test]
    fn null_pull_request_body_becomes_empty() {
        let raw: RestPullRequest = serde_json::from_value(json!({
            "number": 8,
            "node_id": "PR_kw8",
            "title": "t",
            "body": null,
            "merged_at": "2026-03-01T10:00:00Z",
            "head": { "sha": "abc123" }
        }))
        .unwrap();
        let pr = PullRequest::try_from(raw).unwrap();
        assert_eq!(pr.body, "");
        assert!(pr.merged);
    }

    #[test]
    fn unknown_issue_state_is_a_decode_error() {
        let raw: RestIssue = serde_json::from_value(json!({
            "number": 1, "node_id": "I_1", "title": "t", "state": "locked"
        }))
        .unwrap();
        assert!(matches!(Issue::try_from(raw), Err(GitHubError::Decode(_))));
    }
}
