use bookkeeping::{
    ApiError, IssueNumber, IssueTracker, LabelName, ProjectBoard, ProjectNumber,
    PullRequestSource, ReleaseHistory, RepositoryId,
};
use github::{ClientConfig, GitHubClient};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::new(
        ClientConfig::new("test-token")
            .with_api_url(server.uri())
            .with_graphql_url(format!("{}/graphql", server.uri())),
    )
    .unwrap()
}

fn repo() -> RepositoryId {
    RepositoryId::parse("octo-org/widgets").unwrap()
}

fn commit_json(index: usize) -> Value {
    json!({
        "sha": format!("{index:040x}"),
        "commit": {
            "message": format!("fix: change {index}"),
            "author": { "date": "2026-01-02T03:04:05Z" }
        }
    })
}

#[tokio::test]
async fn get_issue_sends_auth_headers_and_maps_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/issues/42"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("x-github-api-version", "2022-11-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 42,
            "node_id": "I_kwDOA42",
            "title": "Board sync drops cards",
            "state": "open"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let issue = client_for(&server)
        .await
        .get_issue(&repo(), IssueNumber::new(42).unwrap())
        .await
        .unwrap();

    assert_eq!(issue.node_id.as_str(), "I_kwDOA42");
    assert!(!issue.is_pull_request);
}

#[tokio::test]
async fn missing_issue_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/issues/7"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_issue(&repo(), IssueNumber::new(7).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn server_errors_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/pulls/3"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_pull_request(&repo(), IssueNumber::new(3).unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Rejected {
            status: 502,
            message: "bad gateway".to_string()
        }
    );
}

#[tokio::test]
async fn add_labels_posts_label_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octo-org/widgets/issues/12/labels"))
        .and(body_partial_json(json!({ "labels": ["released", "status: merged"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "released" },
            { "name": "status: merged" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let labels = [
        LabelName::new("released").unwrap(),
        LabelName::new("status: merged").unwrap(),
    ];
    client_for(&server)
        .await
        .add_labels(&repo(), IssueNumber::new(12).unwrap(), &labels)
        .await
        .unwrap();
}

#[tokio::test]
async fn pull_request_commits_are_paginated() {
    let server = MockServer::start().await;
    let first_page: Vec<Value> = (0..100).map(commit_json).collect();
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/pulls/9/commits"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/pulls/9/commits"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![commit_json(100)]))
        .mount(&server)
        .await;

    let commits = client_for(&server)
        .await
        .list_pull_request_commits(&repo(), IssueNumber::new(9).unwrap())
        .await
        .unwrap();

    assert_eq!(commits.len(), 101);
    assert_eq!(commits[100].message, "fix: change 100");
}

#[tokio::test]
async fn latest_release_is_none_when_repository_has_no_release() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/releases/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let release = client_for(&server).await.latest_release(&repo()).await.unwrap();
    assert_eq!(release, None);
}

#[tokio::test]
async fn latest_release_maps_tag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v1.4.0",
            "name": "1.4.0",
            "published_at": "2026-02-01T00:00:00Z",
            "draft": false,
            "prerelease": false
        })))
        .mount(&server)
        .await;

    let release = client_for(&server)
        .await
        .latest_release(&repo())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(release.tag_name, "v1.4.0");
    assert!(release.published_at.is_some());
}

#[tokio::test]
async fn commits_since_tag_uses_compare_until_total_is_reached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/compare/v1.0.0...abc123"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_commits": 2,
            "commits": [commit_json(1), commit_json(2)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let commits = client_for(&server)
        .await
        .commits_since(&repo(), Some("v1.0.0"), "abc123")
        .await
        .unwrap();

    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["fix: change 1", "fix: change 2"]);
}

#[tokio::test]
async fn compare_follows_pages_until_total_commits() {
    let server = MockServer::start().await;
    let first_page: Vec<Value> = (0..100).map(commit_json).collect();
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/compare/v2.0.0...abc123"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_commits": 101,
            "commits": first_page
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/compare/v2.0.0...abc123"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_commits": 101,
            "commits": [commit_json(100)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let commits = client_for(&server)
        .await
        .commits_since(&repo(), Some("v2.0.0"), "abc123")
        .await
        .unwrap();

    assert_eq!(commits.len(), 101);
    assert_eq!(commits[0].message, "fix: change 0");
    assert_eq!(commits[100].message, "fix: change 100");
}

#[tokio::test]
async fn commits_without_base_are_returned_oldest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octo-org/widgets/commits"))
        .and(query_param("sha", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![commit_json(2), commit_json(1)]))
        .mount(&server)
        .await;

    let commits = client_for(&server)
        .await
        .commits_since(&repo(), None, "abc123")
        .await
        .unwrap();

    assert_eq!(commits[0].message, "fix: change 1");
    assert_eq!(commits[1].message, "fix: change 2");
}

#[tokio::test]
async fn get_project_reads_fields_through_graphql() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "owner": "octo-org", "number": 3 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repositoryOwner": {
                    "projectV2": {
                        "id": "PVT_3",
                        "title": "Roadmap",
                        "fields": { "nodes": [
                            { "id": "PVTSSF_s", "name": "Status", "options": [
                                { "id": "aa", "name": "Todo" },
                                { "id": "bb", "name": "Done" }
                            ]}
                        ]}
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let project = client_for(&server)
        .await
        .get_project("octo-org", ProjectNumber::new(3).unwrap())
        .await
        .unwrap();

    assert_eq!(project.id.as_str(), "PVT_3");
    assert_eq!(project.fields[0].options.len(), 2);
}

#[tokio::test]
async fn unknown_project_owner_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "repositoryOwner": null } })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_project("nobody", ProjectNumber::new(1).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn graphql_errors_fail_the_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Could not resolve to a node with the global id of 'x'" }
            ]
        })))
        .mount(&server)
        .await;

    let project_id = bookkeeping::ProjectId::new("PVT_x").unwrap();
    let content = bookkeeping::NodeId::new("I_x").unwrap();
    let err = client_for(&server)
        .await
        .add_project_item(&project_id, &content)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::GraphQl {
            messages: vec!["Could not resolve to a node with the global id of 'x'".to_string()]
        }
    );
}

#[tokio::test]
async fn add_project_item_returns_item_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "projectId": "PVT_3", "contentId": "I_42" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "addProjectV2ItemById": { "item": { "id": "PVTI_9" } } }
        })))
        .mount(&server)
        .await;

    let item = client_for(&server)
        .await
        .add_project_item(
            &bookkeeping::ProjectId::new("PVT_3").unwrap(),
            &bookkeeping::NodeId::new("I_42").unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(item.as_str(), "PVTI_9");
}

#[tokio::test]
async fn set_single_select_sends_item_field_and_option() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": {
                "projectId": "PVT_3",
                "itemId": "PVTI_9",
                "fieldId": "PVTSSF_1",
                "optionId": "f75ad846"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "updateProjectV2ItemFieldValue": { "projectV2Item": { "id": "PVTI_9" } }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .set_single_select(
            &bookkeeping::ProjectId::new("PVT_3").unwrap(),
            &bookkeeping::ProjectItemId::new("PVTI_9").unwrap(),
            &bookkeeping::FieldId::new("PVTSSF_1").unwrap(),
            &bookkeeping::OptionId::new("f75ad846").unwrap(),
        )
        .await
        .unwrap();
}
