//! `validate-footer`: require `Closes: #<number>` footers.

use bookkeeping::{
    is_merge_commit, validate_message, IssueNumber, MessageKind, PullRequestSource, RepositoryId,
};
use toolkit::{command, Outputs};
use tracing::{debug, info, instrument, warn};

use crate::ActionError;

/// What to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterSource {
    /// The description of a pull request.
    PullRequest(IssueNumber),
    /// Every non-merge commit message of a pull request.
    Commits(IssueNumber),
    /// A literal message passed in by the workflow.
    Text(String),
}

#[derive(Debug, Clone)]
pub struct ValidateFooterInput {
    pub repository: RepositoryId,
    pub source: FooterSource,
}

struct Message {
    label: String,
    text: String,
    kind: MessageKind,
}

/// Validates every message from the source.
///
/// Outputs: `valid`, `issues` (comma-separated, de-duplicated), `checked`
/// (number of messages validated). Any invalid message fails the step with
/// one line per offending message. A pull request with no non-merge commits
/// passes with a warning.
#[instrument(skip_all, fields(source = ?input.source))]
pub async fn validate_footer<C>(
    github: &C,
    input: &ValidateFooterInput,
) -> Result<Outputs, ActionError>
where
    C: PullRequestSource + ?Sized,
{
    let messages = match &input.source {
        FooterSource::PullRequest(number) => {
            let pr = github.get_pull_request(&input.repository, *number).await?;
            vec![Message {
                label: format!("pull request #{}", pr.number),
                text: pr.body,
                kind: MessageKind::Description,
            }]
        }
        FooterSource::Commits(number) => github
            .list_pull_request_commits(&input.repository, *number)
            .await?
            .into_iter()
            .filter(|commit| !is_merge_commit(&commit.message))
            .map(|commit| Message {
                label: format!(
                    "commit {} ({})",
                    short_sha(commit.sha.as_str()),
                    commit.subject()
                ),
                text: commit.message,
                kind: MessageKind::Commit,
            })
            .collect(),
        FooterSource::Text(text) => vec![Message {
            label: "text".to_string(),
            text: text.clone(),
            kind: MessageKind::Description,
        }],
    };

    if messages.is_empty() {
        let warning = "No non-merge commits to validate; no closing footer was checked";
        warn!("{warning}");
        command::warning(warning);
    }

    let mut issues: Vec<IssueNumber> = Vec::new();
    let mut failures = Vec::new();
    for message in &messages {
        match validate_message(&message.text, message.kind) {
            Ok(closed) => {
                debug!(message = %message.label, count = closed.len(), "Footer valid");
                for issue in closed {
                    if !issues.contains(&issue) {
                        issues.push(issue);
                    }
                }
            }
            Err(violation) => failures.push(format!("{}: {violation}", message.label)),
        }
    }

    let numbers: Vec<String> = issues.iter().map(ToString::to_string).collect();
    let mut outputs = Outputs::new();
    outputs
        .set("valid", failures.is_empty())
        .set("issues", numbers.join(","))
        .set("checked", messages.len());

    if !failures.is_empty() {
        return Err(ActionError::Rejected {
            message: format!(
                "{} of {} message(s) failed footer validation:\n{}",
                failures.len(),
                messages.len(),
                failures.join("\n")
            ),
            outputs,
        });
    }

    info!(messages = messages.len(), "All footers valid");
    Ok(outputs)
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{commit, number, pull_request, repo, FakeGitHub};

    fn input(source: FooterSource) -> ValidateFooterInput {
        ValidateFooterInput {
            repository: repo(),
            source,
        }
    }

    #[tokio::test]
    async fn valid_pull_request_body_passes() {
        let github = FakeGitHub {
            pull_requests: [(4, pull_request(4, "Adds a thing.\n\nCloses: #2", false))].into(),
            ..Default::default()
        };

        let outputs = validate_footer(&github, &input(FooterSource::PullRequest(number(4))))
            .await
            .unwrap();

        assert_eq!(outputs.get("valid"), Some("true"));
        assert_eq!(outputs.get("issues"), Some("2"));
        assert_eq!(outputs.get("checked"), Some("1"));
    }

    #[tokio::test]
    async fn commits_are_validated_individually() {
        let github = FakeGitHub {
            pr_commits: [(
                4,
                vec![
                    commit("aaaaaaaaaa", "feat: a\n\nCloses: #1"),
                    commit("bbbbbbbbbb", "Merge branch 'main' into feat"),
                    commit("cccccccccc", "fix: b\n\ncloses #1"),
                ],
            )]
            .into(),
            ..Default::default()
        };

        let err = validate_footer(&github, &input(FooterSource::Commits(number(4))))
            .await
            .unwrap_err();

        let ActionError::Rejected { message, outputs } = err else {
            panic!("expected a rejection");
        };
        assert_eq!(outputs.get("valid"), Some("false"));
        assert_eq!(outputs.get("issues"), Some("1"));
        assert_eq!(
            message,
            "1 of 2 message(s) failed footer validation:\n\
             commit ccccccc (fix: b): missing 'Closes: #<number>' footer; \
             malformed footer 'closes #1', expected 'Closes: #<number>'"
        );
    }

    #[tokio::test]
    async fn merge_only_pull_request_passes_with_nothing_checked() {
        let github = FakeGitHub {
            pr_commits: [(
                6,
                vec![commit("dddddddddd", "Merge pull request #5 from octo/feat")],
            )]
            .into(),
            ..Default::default()
        };

        let outputs = validate_footer(&github, &input(FooterSource::Commits(number(6))))
            .await
            .unwrap();

        assert_eq!(outputs.get("valid"), Some("true"));
        assert_eq!(outputs.get("checked"), Some("0"));
        assert_eq!(outputs.get("issues"), Some(""));
    }

    #[tokio::test]
    async fn literal_text_is_validated_without_api_calls() {
        let github = FakeGitHub::default();
        let outputs = validate_footer(&github, &input(FooterSource::Text("Closes: #9".into())))
            .await
            .unwrap();
        assert_eq!(outputs.get("issues"), Some("9"));
    }
}
