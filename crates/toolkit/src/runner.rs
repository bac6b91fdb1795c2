//! Action inputs and runner context, read from a snapshot of the environment.
//!
//! The runner passes each `with:` input as `INPUT_<NAME>`: the name is
//! upper-cased and spaces become underscores. Hyphens are kept, so the input
//! `project-number` arrives as `INPUT_PROJECT-NUMBER`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use bookkeeping::RepositoryId;

use crate::{EventPayload, ToolkitError};

/// Public GitHub REST endpoint, used when `GITHUB_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Public GitHub GraphQL endpoint, used when `GITHUB_GRAPHQL_URL` is unset.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// A snapshot of the variables the Actions runner provides to a step.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    vars: HashMap<String, String>,
}

/// The `GITHUB_*` variables describing the workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerContext {
    pub repository: Option<String>,
    pub event_name: Option<String>,
    pub sha: Option<String>,
    pub api_url: String,
    pub graphql_url: String,
    pub debug: bool,
}

impl RunnerContext {
    /// The repository the workflow runs in.
    pub fn repository(&self) -> Result<RepositoryId, ToolkitError> {
        let value = self
            .repository
            .as_deref()
            .ok_or_else(|| ToolkitError::MissingVariable {
                name: "GITHUB_REPOSITORY".to_string(),
            })?;
        RepositoryId::parse(value).map_err(|e| ToolkitError::InvalidInput {
            name: "GITHUB_REPOSITORY".to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }
}

fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

impl Runner {
    /// Captures the current process environment.
    pub fn from_env() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Builds a runner from explicit variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A non-empty environment variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// An input value, trimmed. Empty inputs read as unset.
    pub fn input(&self, name: &str) -> Option<String> {
        self.vars
            .get(&input_var(name))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// An input value that must be present.
    pub fn required_input(&self, name: &str) -> Result<String, ToolkitError> {
        self.input(name).ok_or_else(|| ToolkitError::InputRequired {
            name: name.to_string(),
        })
    }

    /// A boolean input in the YAML 1.2 core schema spellings.
    pub fn bool_input(&self, name: &str, default: bool) -> Result<bool, ToolkitError> {
        match self.input(name).as_deref() {
            None => Ok(default),
            Some("true" | "True" | "TRUE") => Ok(true),
            Some("false" | "False" | "FALSE") => Ok(false),
            Some(other) => Err(ToolkitError::InvalidBoolean {
                name: name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// A list input, split on newlines and commas. Blank entries are dropped.
    pub fn list_input(&self, name: &str) -> Vec<String> {
        self.input(name)
            .map(|value| {
                value
                    .split(['\n', ','])
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// An optional input parsed with [`FromStr`].
    pub fn parsed_input<T>(&self, name: &str) -> Result<Option<T>, ToolkitError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.input(name)
            .map(|value| {
                value.parse::<T>().map_err(|e| ToolkitError::InvalidInput {
                    name: name.to_string(),
                    reason: e.to_string(),
                    value,
                })
            })
            .transpose()
    }

    /// A required input parsed with [`FromStr`].
    pub fn required_parsed_input<T>(&self, name: &str) -> Result<T, ToolkitError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parsed_input(name)?
            .ok_or_else(|| ToolkitError::InputRequired {
                name: name.to_string(),
            })
    }

    /// The workflow run context.
    pub fn context(&self) -> RunnerContext {
        RunnerContext {
            repository: self.var("GITHUB_REPOSITORY").map(str::to_string),
            event_name: self.var("GITHUB_EVENT_NAME").map(str::to_string),
            sha: self.var("GITHUB_SHA").map(str::to_string),
            api_url: self.var("GITHUB_API_URL").unwrap_or(DEFAULT_API_URL).to_string(),
            graphql_url: self
                .var("GITHUB_GRAPHQL_URL")
                .unwrap_or(DEFAULT_GRAPHQL_URL)
                .to_string(),
            debug: self.var("RUNNER_DEBUG") == Some("1"),
        }
    }

    /// Path of the step outputs file, when the runner provides one.
    pub fn output_file(&self) -> Option<PathBuf> {
        self.var("GITHUB_OUTPUT").map(PathBuf::from)
    }

    /// Loads the webhook payload that triggered the workflow, if any.
    pub fn event(&self) -> Result<Option<EventPayload>, ToolkitError> {
        match self.var("GITHUB_EVENT_PATH") {
            Some(path) => EventPayload::load(path).map(Some),
            None => Ok(None),
        }
    }
}
