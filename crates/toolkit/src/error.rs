//! Error type for the runner contract.

use std::path::PathBuf;

use thiserror::Error;

/// Problems reading inputs and context, or writing outputs.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// A required input was empty or not set.
    #[error("Input required and not supplied: {name}")]
    InputRequired { name: String },

    /// A boolean input used a spelling outside the YAML 1.2 core schema.
    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\n\
         Support boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    InvalidBoolean { name: String, value: String },

    /// An input could not be parsed into the expected type.
    #[error("Invalid value '{value}' for input {name}: {reason}")]
    InvalidInput {
        name: String,
        value: String,
        reason: String,
    },

    /// A `GITHUB_*` variable the action depends on is missing.
    #[error("Environment variable {name} is not set")]
    MissingVariable { name: String },

    /// Reading the event payload or writing the outputs file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event payload file is not valid JSON.
    #[error("Event payload {path} is not valid JSON: {source}")]
    EventPayload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An output name or value contains the generated heredoc delimiter.
    #[error("Unexpected input: output '{name}' contains the delimiter")]
    DelimiterCollision { name: String },
}
