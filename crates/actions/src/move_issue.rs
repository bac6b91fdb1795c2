//! `move-issue`: place an issue or pull request in a project board column.

use bookkeeping::{
    resolve_column, IssueNumber, IssueTracker, ProjectBoard, ProjectNumber, RepositoryId,
};
use toolkit::Outputs;
use tracing::{info, instrument};

use crate::ActionError;

/// Field used when the workflow does not name one.
pub const DEFAULT_FIELD: &str = "Status";

#[derive(Debug, Clone)]
pub struct MoveIssueInput {
    pub repository: RepositoryId,
    /// Login of the user or organisation that owns the board.
    pub project_owner: String,
    pub project_number: ProjectNumber,
    pub issue: IssueNumber,
    /// Single-select field whose options are the board columns.
    pub field: String,
    pub column: String,
}

/// Adds the issue to the board (a no-op if it is already there) and sets its
/// column.
///
/// Outputs: `item-id`, `field-id`, `option-id`.
#[instrument(skip_all, fields(issue = %input.issue, column = %input.column))]
pub async fn move_issue<C>(github: &C, input: &MoveIssueInput) -> Result<Outputs, ActionError>
where
    C: IssueTracker + ProjectBoard + ?Sized,
{
    let project = github
        .get_project(&input.project_owner, input.project_number)
        .await?;
    // Resolve before touching the board so a typo never adds a stray card.
    let target = resolve_column(&project, &input.field, &input.column)?;

    let issue = github.get_issue(&input.repository, input.issue).await?;
    let item = github.add_project_item(&project.id, &issue.node_id).await?;
    github
        .set_single_select(&project.id, &item, &target.field_id, &target.option_id)
        .await?;

    info!(
        project = %project.title,
        item = %item,
        "Moved #{} to '{}'",
        issue.number,
        input.column
    );

    let mut outputs = Outputs::new();
    outputs
        .set("item-id", &item)
        .set("field-id", &target.field_id)
        .set("option-id", &target.option_id);
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::{board, issue, number, repo, FakeGitHub};

    fn input(column: &str) -> MoveIssueInput {
        MoveIssueInput {
            repository: repo(),
            project_owner: "octo-org".into(),
            project_number: ProjectNumber::new(1).unwrap(),
            issue: number(7),
            field: DEFAULT_FIELD.into(),
            column: column.into(),
        }
    }

    fn github() -> FakeGitHub {
        FakeGitHub {
            issues: [(7, issue(7))].into(),
            project: Some(board()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn moves_issue_to_named_column() {
        let github = github();
        let outputs = move_issue(&github, &input("done")).await.unwrap();

        assert_eq!(outputs.get("item-id"), Some("PVTI_I_7"));
        assert_eq!(outputs.get("option-id"), Some("done"));
        assert_eq!(*github.added_items.lock().unwrap(), vec!["I_7".to_string()]);
        assert_eq!(
            *github.selections.lock().unwrap(),
            vec![(
                "PVTI_I_7".to_string(),
                "PVTSSF_status".to_string(),
                "done".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn unknown_column_fails_before_any_mutation() {
        let github = github();
        let err = move_issue(&github, &input("Shipped")).await.unwrap_err();

        assert!(matches!(
            err,
            ActionError::Domain(bookkeeping::BookkeepingError::UnknownColumn { .. })
        ));
        assert!(github.added_items.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_issue_surfaces_api_error() {
        let github = FakeGitHub {
            project: Some(board()),
            ..Default::default()
        };
        let err = move_issue(&github, &input("Todo")).await.unwrap_err();
        assert!(matches!(err, ActionError::Api(bookkeeping::ApiError::NotFound { .. })));
    }
}
