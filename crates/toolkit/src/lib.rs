//! GitHub Actions runner contract.
//!
//! Everything an action needs from the runner, and nothing it needs from
//! GitHub's API:
//!
//! - [`Runner`]: inputs (`INPUT_*`) and context (`GITHUB_*`) from an
//!   environment snapshot.
//! - [`EventPayload`]: the webhook payload at `GITHUB_EVENT_PATH`.
//! - [`Outputs`]: step outputs, written to `GITHUB_OUTPUT`.
//! - [`command`]: workflow commands (annotations, groups, masks, failure).
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Environment variables, files, and stdout live here.
//! The `actions` crate only sees [`Outputs`].

pub mod command;
mod error;
mod event;
mod outputs;
mod runner;

pub use error::ToolkitError;
pub use event::{EventPayload, EventPullRequest};
pub use outputs::{append_to_file, render_file_commands, write_legacy, Outputs};
pub use runner::{Runner, RunnerContext, DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};

/// Writes outputs through whichever channel the runner supports.
pub fn write_outputs(runner: &Runner, outputs: &Outputs) -> Result<(), ToolkitError> {
    match runner.output_file() {
        Some(path) => append_to_file(&path, outputs),
        None => {
            let mut stdout = std::io::stdout().lock();
            write_legacy(&mut stdout, outputs).map_err(|source| ToolkitError::Io {
                path: "<stdout>".into(),
                source,
            })
        }
    }
}
