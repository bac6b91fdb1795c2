//! In-memory GitHub used by the action tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bookkeeping::{
    ApiError, Commit, CommitSha, FieldId, FieldOption, Issue, IssueNumber, IssueState,
    IssueTracker, LabelName, NodeId, OptionId, Project, ProjectBoard, ProjectField, ProjectId,
    ProjectItemId, ProjectNumber, PullRequest, PullRequestSource, Release, ReleaseHistory,
    RepositoryId,
};

#[derive(Default)]
pub(crate) struct FakeGitHub {
    pub issues: HashMap<u64, Issue>,
    pub pull_requests: HashMap<u64, PullRequest>,
    pub pr_commits: HashMap<u64, Vec<Commit>>,
    pub project: Option<Project>,
    pub latest_release: Option<Release>,
    /// Commits returned by `commits_since`, keyed by base tag (`None` = all).
    pub history: HashMap<Option<String>, Vec<Commit>>,
    pub labeled: Mutex<Vec<(u64, Vec<String>)>>,
    pub added_items: Mutex<Vec<String>>,
    pub selections: Mutex<Vec<(String, String, String)>>,
}

pub(crate) fn repo() -> RepositoryId {
    RepositoryId::parse("octo-org/widgets").unwrap()
}

pub(crate) fn number(value: u64) -> IssueNumber {
    IssueNumber::new(value).unwrap()
}

pub(crate) fn issue(value: u64) -> Issue {
    Issue {
        number: number(value),
        node_id: NodeId::new(format!("I_{value}")).unwrap(),
        title: format!("Issue {value}"),
        state: IssueState::Open,
        is_pull_request: false,
    }
}

pub(crate) fn pull_request(value: u64, body: &str, merged: bool) -> PullRequest {
    PullRequest {
        number: number(value),
        node_id: NodeId::new(format!("PR_{value}")).unwrap(),
        title: format!("PR {value}"),
        body: body.to_string(),
        merged,
        merged_at: None,
        head_sha: CommitSha::new("f00d").unwrap(),
    }
}

pub(crate) fn commit(sha: &str, message: &str) -> Commit {
    Commit {
        sha: CommitSha::new(sha).unwrap(),
        message: message.to_string(),
        authored_at: None,
    }
}

pub(crate) fn release(tag: &str) -> Release {
    Release {
        tag_name: tag.to_string(),
        name: None,
        published_at: None,
        draft: false,
        prerelease: false,
    }
}

pub(crate) fn board() -> Project {
    let option = |id: &str, name: &str| FieldOption {
        id: OptionId::new(id).unwrap(),
        name: name.to_string(),
    };
    Project {
        id: ProjectId::new("PVT_board").unwrap(),
        title: "Roadmap".into(),
        fields: vec![ProjectField {
            id: FieldId::new("PVTSSF_status").unwrap(),
            name: "Status".into(),
            options: vec![option("todo", "Todo"), option("done", "Done")],
        }],
    }
}

fn not_found(resource: String) -> ApiError {
    ApiError::NotFound { resource }
}

#[async_trait]
impl IssueTracker for FakeGitHub {
    async fn get_issue(&self, _repo: &RepositoryId, number: IssueNumber) -> Result<Issue, ApiError> {
        self.issues
            .get(&number.as_u64())
            .cloned()
            .ok_or_else(|| not_found(format!("issue #{number}")))
    }

    async fn add_labels(
        &self,
        _repo: &RepositoryId,
        number: IssueNumber,
        labels: &[LabelName],
    ) -> Result<(), ApiError> {
        self.labeled.lock().unwrap().push((
            number.as_u64(),
            labels.iter().map(|l| l.as_str().to_string()).collect(),
        ));
        Ok(())
    }
}

#[async_trait]
impl PullRequestSource for FakeGitHub {
    async fn get_pull_request(
        &self,
        _repo: &RepositoryId,
        number: IssueNumber,
    ) -> Result<PullRequest, ApiError> {
        self.pull_requests
            .get(&number.as_u64())
            .cloned()
            .ok_or_else(|| not_found(format!("pull request #{number}")))
    }

    async fn list_pull_request_commits(
        &self,
        _repo: &RepositoryId,
        number: IssueNumber,
    ) -> Result<Vec<Commit>, ApiError> {
        Ok(self.pr_commits.get(&number.as_u64()).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ProjectBoard for FakeGitHub {
    async fn get_project(&self, owner: &str, number: ProjectNumber) -> Result<Project, ApiError> {
        self.project
            .clone()
            .ok_or_else(|| not_found(format!("project {owner}#{number}")))
    }

    async fn add_project_item(
        &self,
        _project: &ProjectId,
        content: &NodeId,
    ) -> Result<ProjectItemId, ApiError> {
        self.added_items.lock().unwrap().push(content.to_string());
        Ok(ProjectItemId::new(format!("PVTI_{content}")).unwrap())
    }

    async fn set_single_select(
        &self,
        _project: &ProjectId,
        item: &ProjectItemId,
        field: &FieldId,
        option: &OptionId,
    ) -> Result<(), ApiError> {
        self.selections
            .lock()
            .unwrap()
            .push((item.to_string(), field.to_string(), option.to_string()));
        Ok(())
    }
}

#[async_trait]
impl ReleaseHistory for FakeGitHub {
    async fn latest_release(&self, _repo: &RepositoryId) -> Result<Option<Release>, ApiError> {
        Ok(self.latest_release.clone())
    }

    async fn commits_since(
        &self,
        _repo: &RepositoryId,
        base_tag: Option<&str>,
        _head: &str,
    ) -> Result<Vec<Commit>, ApiError> {
        Ok(self
            .history
            .get(&base_tag.map(str::to_string))
            .cloned()
            .unwrap_or_default())
    }
}
