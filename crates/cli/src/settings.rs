//! Settings shared by every action: credentials, endpoints, and the
//! repository to operate on.

use anyhow::{Context, Result};
use bookkeeping::RepositoryId;
use github::ClientConfig;
use toolkit::Runner;

/// Resolved once per run from the runner snapshot. The event payload is not
/// part of it; inputs that fall back to the event load it themselves.
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub repository: RepositoryId,
    pub api_url: String,
    pub graphql_url: String,
    pub sha: Option<String>,
}

impl Settings {
    /// Reads the `github-token` and `repository` inputs, falling back to
    /// `GITHUB_TOKEN` and `GITHUB_REPOSITORY`.
    pub fn from_runner(runner: &Runner) -> Result<Self> {
        let context = runner.context();

        let token = runner
            .input("github-token")
            .or_else(|| runner.var("GITHUB_TOKEN").map(str::to_string))
            .context("No GitHub token: set the github-token input or GITHUB_TOKEN")?;

        let repository = match runner.parsed_input::<RepositoryId>("repository")? {
            Some(repository) => repository,
            None => context.repository()?,
        };

        Ok(Self {
            token,
            repository,
            api_url: context.api_url,
            graphql_url: context.graphql_url,
            sha: context.sha,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.token.clone())
            .with_api_url(self.api_url.clone())
            .with_graphql_url(self.graphql_url.clone())
    }
}
