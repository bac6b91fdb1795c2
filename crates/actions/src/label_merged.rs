//! `label-merged`: label the issues a merged pull request closes.

use bookkeeping::{
    closed_issues, IssueNumber, IssueTracker, LabelName, MessageKind, PullRequestSource,
    RepositoryId,
};
use toolkit::{command, Outputs};
use tracing::{info, instrument, warn};

use crate::ActionError;

#[derive(Debug, Clone)]
pub struct LabelMergedInput {
    pub repository: RepositoryId,
    pub pull_request: IssueNumber,
    pub labels: Vec<LabelName>,
}

/// Adds `labels` to every issue named by a `Closes: #<number>` footer in the
/// pull request description. Unmerged pull requests are skipped.
///
/// Outputs: `labeled` (`true` if any issue was labeled), `issues`
/// (comma-separated issue numbers).
#[instrument(skip_all, fields(pull_request = %input.pull_request))]
pub async fn label_merged<C>(github: &C, input: &LabelMergedInput) -> Result<Outputs, ActionError>
where
    C: IssueTracker + PullRequestSource + ?Sized,
{
    let mut outputs = Outputs::new();
    outputs.set("labeled", false).set("issues", "");

    let pr = github
        .get_pull_request(&input.repository, input.pull_request)
        .await?;
    if !pr.merged {
        info!("Pull request #{} is not merged, nothing to label", pr.number);
        return Ok(outputs);
    }

    let issues: Vec<IssueNumber> = closed_issues(&pr.body, MessageKind::Description)
        .into_iter()
        .filter(|issue| *issue != pr.number)
        .collect();
    if issues.is_empty() {
        let warning = format!("Pull request #{} closes no issues", pr.number);
        warn!("{warning}");
        command::warning(&warning);
        return Ok(outputs);
    }

    for issue in &issues {
        github
            .add_labels(&input.repository, *issue, &input.labels)
            .await?;
        info!("Labeled #{issue}");
    }

    let numbers: Vec<String> = issues.iter().map(ToString::to_string).collect();
    outputs.set("labeled", true).set("issues", numbers.join(","));
    Ok(outputs)
}
