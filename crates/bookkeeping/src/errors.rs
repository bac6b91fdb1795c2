//! Top-level error type for the bookkeeping domain.
//!
//! [`BookkeepingError`] covers malformed inputs and lookups that cannot be
//! satisfied. Transport failures live in the `github` crate; these errors are
//! raised before or after any API call.

use thiserror::Error;

/// Errors produced by domain rules.
///
/// None of these are retryable: each one describes input that will fail
/// the same way on every run until a human fixes it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookkeepingError {
    /// A value could not be turned into the named identifier type.
    #[error("Invalid {kind}: '{value}'")]
    InvalidIdentifier {
        /// Identifier type name, e.g. `"IssueNumber"`.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A version string is not a valid semantic version.
    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion {
        /// The rejected input.
        value: String,
        /// Which rule the input broke.
        reason: String,
    },

    /// Bumping a version would push a component past `u64::MAX`.
    #[error("Cannot apply a {bump} bump to {version}: the component overflows")]
    VersionOverflow {
        /// Version being bumped.
        version: String,
        /// Requested bump level.
        bump: String,
    },

    /// A package manifest could not be read as the expected format.
    #[error("Manifest error: {message}")]
    Manifest {
        /// Description of the problem.
        message: String,
    },

    /// The manifest declares a version older than the latest release.
    #[error("Manifest version {manifest} is behind the latest release {released}")]
    ManifestBehind {
        /// Version found in the manifest.
        manifest: String,
        /// Version of the latest published release.
        released: String,
    },

    /// The project has no field with the requested name.
    #[error("Project field '{field}' not found (available: {})", available.join(", "))]
    UnknownField {
        /// Requested field name.
        field: String,
        /// Names of every field on the project.
        available: Vec<String>,
    },

    /// The requested field exists but has no options to pick from.
    #[error("Project field '{field}' is not a single-select field")]
    NotSingleSelect {
        /// Requested field name.
        field: String,
    },

    /// The field has no option (column) with the requested name.
    #[error("Column '{column}' not found in field '{field}' (available: {})", available.join(", "))]
    UnknownColumn {
        /// Field that was searched.
        field: String,
        /// Requested column name.
        column: String,
        /// Names of every option on the field.
        available: Vec<String>,
    },
}
