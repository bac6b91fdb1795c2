//! Projects (v2) GraphQL documents and response shapes.

use bookkeeping::{FieldId, FieldOption, OptionId, Project, ProjectField, ProjectId};
use serde::{Deserialize, Serialize};

use crate::GitHubError;

/// `ProjectV2Owner` is implemented by both `User` and `Organization`, so one
/// query covers user and organisation boards.
pub(crate) const PROJECT_QUERY: &str = r"
    query ProjectFields($owner: String!, $number: Int!) {
        repositoryOwner(login: $owner) {
            ... on ProjectV2Owner {
                projectV2(number: $number) {
                    id
                    title
                    fields(first: 100) {
                        nodes {
                            ... on ProjectV2FieldCommon {
                                id
                                name
                            }
                            ... on ProjectV2SingleSelectField {
                                options {
                                    id
                                    name
                                }
                            }
                        }
                    }
                }
            }
        }
    }
";

pub(crate) const ADD_ITEM_MUTATION: &str = r"
    mutation AddProjectItem($projectId: ID!, $contentId: ID!) {
        addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
            item {
                id
            }
        }
    }
";

pub(crate) const SET_SINGLE_SELECT_MUTATION: &str = r"
    mutation SetSingleSelect($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
        updateProjectV2ItemFieldValue(
            input: {
                projectId: $projectId
                itemId: $itemId
                fieldId: $fieldId
                value: { singleSelectOptionId: $optionId }
            }
        ) {
            projectV2Item {
                id
            }
        }
    }
";

#[derive(Debug, Serialize)]
pub(crate) struct ProjectVariables<'a> {
    pub(crate) owner: &'a str,
    pub(crate) number: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddItemVariables<'a> {
    pub(crate) project_id: &'a str,
    pub(crate) content_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SetSingleSelectVariables<'a> {
    pub(crate) project_id: &'a str,
    pub(crate) item_id: &'a str,
    pub(crate) field_id: &'a str,
    pub(crate) option_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProjectResponse {
    pub(crate) repository_owner: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwnerNode {
    #[serde(rename = "projectV2", default)]
    pub(crate) project: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectNode {
    id: String,
    title: String,
    fields: FieldConnection,
}

#[derive(Debug, Deserialize)]
struct FieldConnection {
    #[serde(default)]
    nodes: Vec<Option<FieldNode>>,
}

#[derive(Debug, Deserialize)]
struct FieldNode {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    options: Vec<OptionNode>,
}

#[derive(Debug, Deserialize)]
struct OptionNode {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddItemResponse {
    pub(crate) add_project_v2_item_by_id: AddItemPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddItemPayload {
    pub(crate) item: Option<ItemNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemNode {
    pub(crate) id: String,
}

impl TryFrom<ProjectNode> for Project {
    type Error = GitHubError;

    fn try_from(node: ProjectNode) -> Result<Self, Self::Error> {
        let id = ProjectId::new(node.id)
            .ok_or_else(|| GitHubError::Decode("empty project id".to_string()))?;

        // Nodes without `id`/`name` are field types outside ProjectV2FieldCommon.
        let fields = node
            .fields
            .nodes
            .into_iter()
            .flatten()
            .filter_map(|field| {
                let id = FieldId::new(field.id?)?;
                let options = field
                    .options
                    .into_iter()
                    .filter_map(|option| {
                        Some(FieldOption {
                            id: OptionId::new(option.id)?,
                            name: option.name,
                        })
                    })
                    .collect();
                Some(ProjectField {
                    id,
                    name: field.name?,
                    options,
                })
            })
            .collect();

        Ok(Self {
            id,
            title: node.title,
            fields,
        })
    }
}
