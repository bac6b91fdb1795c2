//! Maps runner inputs (and the triggering event) onto action input structs.

use std::path::PathBuf;

use actions::{
    FooterSource, LabelMergedInput, MoveIssueInput, ReleaseInProgressInput, ReleaseVersionInput,
    ValidateFooterInput, DEFAULT_FIELD, DEFAULT_INITIAL_VERSION, DEFAULT_MANIFEST,
};
use anyhow::{anyhow, bail, Context, Result};
use bookkeeping::{IssueNumber, LabelName, ProjectNumber, Version};
use toolkit::{EventPayload, Runner};

use crate::settings::Settings;

pub fn move_issue(runner: &Runner, settings: &Settings) -> Result<MoveIssueInput> {
    let issue = match runner.parsed_input::<IssueNumber>("issue-number")? {
        Some(issue) => issue,
        None => event(runner)?
            .and_then(|event| event.subject_number())
            .context("issue-number is not set and the event has no issue or pull request")?,
    };

    Ok(MoveIssueInput {
        repository: settings.repository.clone(),
        project_owner: runner
            .input("project-owner")
            .unwrap_or_else(|| settings.repository.owner().to_string()),
        project_number: runner.required_parsed_input::<ProjectNumber>("project-number")?,
        issue,
        field: runner
            .input("field")
            .unwrap_or_else(|| DEFAULT_FIELD.to_string()),
        column: runner.required_input("column")?,
    })
}

pub fn label_merged(runner: &Runner, settings: &Settings) -> Result<LabelMergedInput> {
    let labels = runner
        .list_input("labels")
        .into_iter()
        .map(|name| LabelName::new(name.clone()).ok_or_else(|| anyhow!("Invalid label '{name}'")))
        .collect::<Result<Vec<_>>>()?;
    if labels.is_empty() {
        bail!("Input required and not supplied: labels");
    }

    Ok(LabelMergedInput {
        repository: settings.repository.clone(),
        pull_request: pull_request_number(runner)?,
        labels,
    })
}

pub fn validate_footer(runner: &Runner, settings: &Settings) -> Result<ValidateFooterInput> {
    let mode = runner
        .input("mode")
        .unwrap_or_else(|| "pull-request".to_string());
    let source = match mode.as_str() {
        "pull-request" => FooterSource::PullRequest(pull_request_number(runner)?),
        "commits" => FooterSource::Commits(pull_request_number(runner)?),
        "text" => FooterSource::Text(runner.required_input("text")?),
        other => bail!("Unknown mode '{other}', expected pull-request, commits, or text"),
    };

    Ok(ValidateFooterInput {
        repository: settings.repository.clone(),
        source,
    })
}

pub fn release_version(runner: &Runner, settings: &Settings) -> Result<ReleaseVersionInput> {
    let head = runner
        .input("head")
        .or_else(|| settings.sha.clone())
        .context("head is not set and GITHUB_SHA is empty")?;
    let initial_version = match runner.parsed_input::<Version>("initial-version")? {
        Some(version) => version,
        None => Version::parse(DEFAULT_INITIAL_VERSION)?,
    };

    Ok(ReleaseVersionInput {
        repository: settings.repository.clone(),
        head,
        initial_version,
    })
}

pub fn release_in_progress(runner: &Runner, settings: &Settings) -> Result<ReleaseInProgressInput> {
    Ok(ReleaseInProgressInput {
        repository: settings.repository.clone(),
        manifest: PathBuf::from(
            runner
                .input("manifest")
                .unwrap_or_else(|| DEFAULT_MANIFEST.to_string()),
        ),
    })
}

fn pull_request_number(runner: &Runner) -> Result<IssueNumber> {
    match runner.parsed_input::<IssueNumber>("pull-request")? {
        Some(number) => Ok(number),
        None => event(runner)?
            .and_then(|event| event.pull_request())
            .map(|pr| pr.number)
            .context("pull-request is not set and the event has no pull request"),
    }
}

/// Only read when an input falls back to the triggering event.
fn event(runner: &Runner) -> Result<Option<EventPayload>> {
    runner.event().context("Failed to load the event payload")
}
