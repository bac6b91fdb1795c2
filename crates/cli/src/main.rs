//! `bookkeeper`: the binary behind the repository bookkeeping actions.
//!
//! Each subcommand is one action. Inputs come from the runner (`INPUT_*`,
//! `GITHUB_*`, the event payload); outputs go to `GITHUB_OUTPUT`. A failed
//! action still writes whatever outputs it produced, then reports the error
//! as an `::error::` annotation and exits non-zero.

mod inputs;
mod settings;
mod telemetry;

use std::process::ExitCode;

use actions::ActionError;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use github::GitHubClient;
use toolkit::{command, Outputs, Runner};
use tracing::{error, info};

use settings::Settings;
use telemetry::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "bookkeeper", version, about = "Repository bookkeeping for GitHub Actions")]
struct Cli {
    /// Log line format on stderr.
    #[arg(long, env = "BOOKKEEPER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Place an issue or pull request in a project board column.
    MoveIssue,
    /// Label the issues closed by a merged pull request.
    LabelMerged,
    /// Require `Closes: #<number>` footers.
    ValidateFooter,
    /// Compute the next release version from conventional commits.
    ReleaseVersion,
    /// Tell whether the manifest version is ahead of the latest release.
    ReleaseInProgress,
}

impl Command {
    /// Subcommand name, as written in `action.yml`.
    fn name(self) -> &'static str {
        match self {
            Self::MoveIssue => "move-issue",
            Self::LabelMerged => "label-merged",
            Self::ValidateFooter => "validate-footer",
            Self::ReleaseVersion => "release-version",
            Self::ReleaseInProgress => "release-in-progress",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let runner = Runner::from_env();

    let telemetry = match telemetry::init(
        cli.log_format,
        runner.context().debug,
        runner.var("OTEL_EXPORTER_OTLP_ENDPOINT").is_some(),
    ) {
        Ok(telemetry) => telemetry,
        Err(err) => {
            command::set_failed(&format!("{err:#}"));
            return ExitCode::FAILURE;
        }
    };

    let result = run(cli.command, &runner).await;
    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Action failed");
            command::set_failed(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn run(action: Command, runner: &Runner) -> Result<()> {
    let settings = Settings::from_runner(runner)?;
    command::add_mask(&settings.token);
    let github = GitHubClient::new(settings.client_config())
        .context("Failed to build the GitHub client")?;

    let event = runner.context().event_name.unwrap_or_default();
    info!(action = action.name(), repo = %settings.repository, %event, "Running action");
    command::start_group(action.name());
    let result = dispatch(action, runner, &settings, &github).await;
    command::end_group();

    publish(runner, result?)
}

/// Builds the action input and runs it. The outer `Result` is an input
/// error; the inner one is the action's own outcome.
async fn dispatch(
    action: Command,
    runner: &Runner,
    settings: &Settings,
    github: &GitHubClient,
) -> Result<Result<Outputs, ActionError>> {
    let result = match action {
        Command::MoveIssue => {
            actions::move_issue(github, &inputs::move_issue(runner, settings)?).await
        }
        Command::LabelMerged => {
            actions::label_merged(github, &inputs::label_merged(runner, settings)?).await
        }
        Command::ValidateFooter => {
            actions::validate_footer(github, &inputs::validate_footer(runner, settings)?).await
        }
        Command::ReleaseVersion => {
            actions::release_version(github, &inputs::release_version(runner, settings)?).await
        }
        Command::ReleaseInProgress => {
            actions::release_in_progress(github, &inputs::release_in_progress(runner, settings)?)
                .await
        }
    };
    Ok(result)
}

/// Writes the action's outputs, including those attached to a rejection.
fn publish(runner: &Runner, result: Result<Outputs, ActionError>) -> Result<()> {
    match result {
        Ok(outputs) => {
            toolkit::write_outputs(runner, &outputs).context("Failed to write step outputs")?;
            Ok(())
        }
        Err(err) => {
            if let Some(outputs) = err.outputs() {
                toolkit::write_outputs(runner, outputs)
                    .context("Failed to write step outputs")?;
            }
            Err(err.into())
        }
    }
}
