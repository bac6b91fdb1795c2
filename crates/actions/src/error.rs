//! Error type shared by every action.

use std::path::PathBuf;

use bookkeeping::{ApiError, BookkeepingError};
use thiserror::Error;
use toolkit::Outputs;

/// Why an action failed.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A domain rule rejected the input (bad version, unknown column, ...).
    #[error(transparent)]
    Domain(#[from] BookkeepingError),

    /// A GitHub call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The action ran to completion but its verdict fails the step.
    ///
    /// The outputs are still written so later steps can inspect them.
    #[error("{message}")]
    Rejected { message: String, outputs: Outputs },
}

impl ActionError {
    /// Outputs to publish before failing, if the action produced any.
    pub fn outputs(&self) -> Option<&Outputs> {
        match self {
            Self::Rejected { outputs, .. } => Some(outputs),
            _ => None,
        }
    }
}
