//! `release-version`: decide whether the commits since the last release
//! warrant a new one, and which version it should be.

use bookkeeping::{ReleaseHistory, ReleasePlan, RepositoryId, Version};
use toolkit::Outputs;
use tracing::{info, instrument};

use crate::ActionError;

/// First version released when a repository has no release yet.
pub const DEFAULT_INITIAL_VERSION: &str = "0.1.0";

#[derive(Debug, Clone)]
pub struct ReleaseVersionInput {
    pub repository: RepositoryId,
    /// Commit (or ref) the release would be cut from.
    pub head: String,
    pub initial_version: Version,
}

/// Plans the next release from conventional-commit messages.
///
/// Outputs: `should-release`, `version` (empty when no release is due),
/// `previous-version` (empty before the first release), `bump`,
/// `commit-count`.
#[instrument(skip_all, fields(repo = %input.repository, head = %input.head))]
pub async fn release_version<C>(
    github: &C,
    input: &ReleaseVersionInput,
) -> Result<Outputs, ActionError>
where
    C: ReleaseHistory + ?Sized,
{
    let latest = github.latest_release(&input.repository).await?;
    let previous = latest
        .as_ref()
        .map(|release| Version::parse(&release.tag_name))
        .transpose()?;

    let base_tag = latest.as_ref().map(|release| release.tag_name.as_str());
    let commits = github
        .commits_since(&input.repository, base_tag, &input.head)
        .await?;

    let plan = ReleasePlan::from_commits(previous, &commits, &input.initial_version)?;
    match &plan.next {
        Some(next) => info!(bump = %plan.bump, commits = plan.commit_count, "Next release is {next}"),
        None => info!(commits = plan.commit_count, "No release-worthy commits"),
    }

    let mut outputs = Outputs::new();
    outputs
        .set("should-release", plan.should_release())
        .set(
            "version",
            plan.next.as_ref().map(ToString::to_string).unwrap_or_default(),
        )
        .set(
            "previous-version",
            plan.previous
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        )
        .set("bump", plan.bump)
        .set("commit-count", plan.commit_count);
    Ok(outputs)
}
