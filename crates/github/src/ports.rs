//! Port trait implementations for [`GitHubClient`].

use async_trait::async_trait;
use bookkeeping::{
    ApiError, Commit, FieldId, Issue, IssueNumber, IssueTracker, LabelName, NodeId, OptionId,
    Project, ProjectBoard, ProjectId, ProjectItemId, ProjectNumber, PullRequest,
    PullRequestSource, Release, ReleaseHistory, RepositoryId,
};
use serde::de::IgnoredAny;
use tracing::{debug, info, instrument};

use crate::client::PER_PAGE;
use crate::graphql::{
    AddItemResponse, AddItemVariables, ProjectResponse, ProjectVariables,
    SetSingleSelectVariables, ADD_ITEM_MUTATION, PROJECT_QUERY, SET_SINGLE_SELECT_MUTATION,
};
use crate::rest::{self, AddLabelsBody, RestCompare, RestIssue, RestPullRequest, RestRelease};
use crate::{GitHubClient, GitHubError};

fn repo_path(repo: &RepositoryId) -> String {
    format!("/repos/{}/{}", repo.owner(), repo.name())
}

#[async_trait]
impl IssueTracker for GitHubClient {
    #[instrument(skip(self), fields(repo = %repo, number = %number))]
    async fn get_issue(&self, repo: &RepositoryId, number: IssueNumber) -> Result<Issue, ApiError> {
        let path = format!("{}/issues/{number}", repo_path(repo));
        let raw: RestIssue = self.get_json(&path, &[]).await?;
        Ok(Issue::try_from(raw)?)
    }

    #[instrument(skip(self, labels), fields(repo = %repo, number = %number))]
    async fn add_labels(
        &self,
        repo: &RepositoryId,
        number: IssueNumber,
        labels: &[LabelName],
    ) -> Result<(), ApiError> {
        let path = format!("{}/issues/{number}/labels", repo_path(repo));
        let body = AddLabelsBody {
            labels: labels.iter().map(LabelName::as_str).collect(),
        };
        let _: IgnoredAny = self.post_json(&path, &body).await?;
        info!(count = labels.len(), "Added labels");
        Ok(())
    }
}

#[async_trait]
impl PullRequestSource for GitHubClient {
    #[instrument(skip(self), fields(repo = %repo, number = %number))]
    async fn get_pull_request(
        &self,
        repo: &RepositoryId,
        number: IssueNumber,
    ) -> Result<PullRequest, ApiError> {
        let path = format!("{}/pulls/{number}", repo_path(repo));
        let raw: RestPullRequest = self.get_json(&path, &[]).await?;
        Ok(PullRequest::try_from(raw)?)
    }

    #[instrument(skip(self), fields(repo = %repo, number = %number))]
    async fn list_pull_request_commits(
        &self,
        repo: &RepositoryId,
        number: IssueNumber,
    ) -> Result<Vec<Commit>, ApiError> {
        let path = format!("{}/pulls/{number}/commits", repo_path(repo));
        let raw = self.get_paginated(&path, &[]).await?;
        Ok(rest::commits(raw)?)
    }
}

#[async_trait]
impl ProjectBoard for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, number = %number))]
    async fn get_project(&self, owner: &str, number: ProjectNumber) -> Result<Project, ApiError> {
        let response: ProjectResponse = self
            .graphql(
                PROJECT_QUERY,
                ProjectVariables {
                    owner,
                    number: number.as_u64(),
                },
            )
            .await?;

        let node = response
            .repository_owner
            .and_then(|owner| owner.project)
            .ok_or_else(|| GitHubError::NotFound {
                resource: format!("project {owner}#{number}"),
            })?;

        let project = Project::try_from(node)?;
        debug!(project_id = %project.id, fields = project.fields.len(), "Fetched project");
        Ok(project)
    }

    #[instrument(skip(self), fields(project = %project, content = %content))]
    async fn add_project_item(
        &self,
        project: &ProjectId,
        content: &NodeId,
    ) -> Result<ProjectItemId, ApiError> {
        let response: AddItemResponse = self
            .graphql(
                ADD_ITEM_MUTATION,
                AddItemVariables {
                    project_id: project.as_str(),
                    content_id: content.as_str(),
                },
            )
            .await?;

        let item = response
            .add_project_v2_item_by_id
            .item
            .and_then(|item| ProjectItemId::new(item.id))
            .ok_or_else(|| GitHubError::Decode("addProjectV2ItemById returned no item".to_string()))?;
        Ok(item)
    }

    #[instrument(skip(self), fields(item = %item, field = %field, option = %option))]
    async fn set_single_select(
        &self,
        project: &ProjectId,
        item: &ProjectItemId,
        field: &FieldId,
        option: &OptionId,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .graphql(
                SET_SINGLE_SELECT_MUTATION,
                SetSingleSelectVariables {
                    project_id: project.as_str(),
                    item_id: item.as_str(),
                    field_id: field.as_str(),
                    option_id: option.as_str(),
                },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ReleaseHistory for GitHubClient {
    #[instrument(skip(self), fields(repo = %repo))]
    async fn latest_release(&self, repo: &RepositoryId) -> Result<Option<Release>, ApiError> {
        let path = format!("{}/releases/latest", repo_path(repo));
        match self.get_json::<RestRelease>(&path, &[]).await {
            Ok(raw) => Ok(Some(Release::from(raw))),
            Err(GitHubError::NotFound { .. }) => {
                debug!("Repository has no published release");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self), fields(repo = %repo))]
    async fn commits_since(
        &self,
        repo: &RepositoryId,
        base_tag: Option<&str>,
        head: &str,
    ) -> Result<Vec<Commit>, ApiError> {
        let Some(base) = base_tag else {
            // The commits endpoint lists newest first.
            let path = format!("{}/commits", repo_path(repo));
            let raw = self
                .get_paginated(&path, &[("sha", head.to_string())])
                .await?;
            let mut commits = rest::commits(raw)?;
            commits.reverse();
            return Ok(commits);
        };

        let path = format!("{}/compare/{base}...{head}", repo_path(repo));
        let mut collected = Vec::new();
        let mut page = 1usize;
        loop {
            let compare: RestCompare = self
                .get_json(
                    &path,
                    &[
                        ("per_page", PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            let total = compare.total_commits;
            let count = compare.commits.len();
            collected.extend(compare.commits);
            debug!(page, count, total, "Fetched compare page");

            if count == 0 || collected.len() >= total {
                break;
            }
            page += 1;
        }
        Ok(rest::commits(collected)?)
    }
}
