//! HTTP plumbing shared by every GitHub call: authentication headers, status
//! handling, REST pagination, and the GraphQL envelope.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::GitHubError;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// REST page size. GitHub caps `per_page` at 100.
pub(crate) const PER_PAGE: usize = 100;

const API_VERSION: &str = "2022-11-28";

/// Connection settings for [`GitHubClient`].
///
/// GitHub Enterprise runners expose their own endpoints through
/// `GITHUB_API_URL` and `GITHUB_GRAPHQL_URL`; the defaults point at github.com.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub token: String,
    pub api_url: String,
    pub graphql_url: String,
    pub user_agent: String,
}

impl ClientConfig {
    /// Settings for github.com with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            user_agent: concat!("repo-bookkeeper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }
}

/// GitHub REST + GraphQL client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    graphql_url: String,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<V: Serialize> {
    query: &'static str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GitHubClient {
    /// Builds a client with authentication and API-version headers applied
    /// to every request.
    pub fn new(config: ClientConfig) -> Result<Self, GitHubError> {
        if config.token.trim().is_empty() {
            return Err(GitHubError::Config("GitHub token is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.trim()))
            .map_err(|_| GitHubError::Config("GitHub token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| GitHubError::Config("User agent contains invalid characters".to_string()))?,
        );

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            graphql_url: config.graphql_url,
        })
    }

    /// GET a REST path (relative to the API root) and decode the JSON body.
    #[instrument(skip_all, fields(path = %path))]
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GitHubError> {
        let response = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .query(query)
            .send()
            .await?;
        let response = check_status(response, path).await?;
        Ok(response.json().await?)
    }

    /// POST a JSON body to a REST path and decode the JSON response.
    #[instrument(skip_all, fields(path = %path))]
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GitHubError> {
        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .json(body)
            .send()
            .await?;
        let response = check_status(response, path).await?;
        Ok(response.json().await?)
    }

    /// GET every page of a list endpoint.
    ///
    /// Stops at the first page shorter than [`PER_PAGE`].
    pub(crate) async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, GitHubError> {
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let mut page_query = query.to_vec();
            page_query.push(("per_page", PER_PAGE.to_string()));
            page_query.push(("page", page.to_string()));

            let batch: Vec<T> = self.get_json(path, &page_query).await?;
            let count = batch.len();
            items.extend(batch);
            debug!(path, page, count, "Fetched page");

            if count < PER_PAGE {
                return Ok(items);
            }
            page += 1;
        }
    }

    /// Execute a GraphQL query or mutation.
    ///
    /// Any entry in the `errors` array fails the call, even when partial data
    /// came back.
    pub(crate) async fn graphql<V: Serialize, R: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: V,
    ) -> Result<R, GitHubError> {
        let response = self
            .http
            .post(&self.graphql_url)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;
        let response = check_status(response, "graphql").await?;

        let body: GraphQlResponse<R> = response.json().await?;
        if !body.errors.is_empty() {
            return Err(GitHubError::GraphQl {
                messages: body.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        body.data
            .ok_or_else(|| GitHubError::Decode("no data in GraphQL response".to_string()))
    }
}

async fn check_status(response: Response, path: &str) -> Result<Response, GitHubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(GitHubError::NotFound {
            resource: path.to_string(),
        });
    }

    let body = response.text().await.unwrap_or_default();
    Err(GitHubError::Status {
        status: status.as_u16(),
        path: path.to_string(),
        body,
    })
}
