//! Newtype domain identifiers.
//!
//! Every GitHub concept that has an identity is represented as a distinct
//! newtype wrapping a primitive. This prevents accidentally interchanging, for
//! example, a [`ProjectId`] with a [`ProjectItemId`] even though both are
//! GraphQL global ID strings under the hood.

use serde::{Deserialize, Serialize};

use crate::BookkeepingError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new() returning Option<Self>, as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier, returning `None` for zero.
            ///
            /// GitHub numbers start at 1.
            pub fn new(value: u64) -> Option<Self> {
                if value == 0 { None } else { Some(Self(value)) }
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = BookkeepingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim().trim_start_matches('#');
                trimmed
                    .parse::<u64>()
                    .ok()
                    .and_then(Self::new)
                    .ok_or_else(|| BookkeepingError::InvalidIdentifier {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// The per-repository number of an issue or pull request.
    ///
    /// Issues and pull requests share one number space within a repository.
    IssueNumber
}

u64_id! {
    /// The per-owner number of a GitHub Projects (v2) board.
    ProjectNumber
}

// ---------------------------------------------------------------------------
// Identifiers: GraphQL global IDs
// ---------------------------------------------------------------------------

string_id! {
    /// GraphQL global node ID of an issue or pull request (e.g. `"I_kwDO..."`).
    NodeId
}

string_id! {
    /// GraphQL global ID of a Projects (v2) board (e.g. `"PVT_kwDO..."`).
    ProjectId
}

string_id! {
    /// GraphQL global ID of a card on a project board (e.g. `"PVTI_lADO..."`).
    ProjectItemId
}

string_id! {
    /// GraphQL global ID of a project field (e.g. `"PVTSSF_lADO..."`).
    FieldId
}

string_id! {
    /// ID of one option of a single-select project field.
    ///
    /// Option IDs are short hex strings, unique only within their field.
    OptionId
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (Git / labels)
// ---------------------------------------------------------------------------

string_id! {
    /// A Git commit SHA (40-character lowercase hex string).
    CommitSha
}

string_id! {
    /// The name of an issue label (e.g. `"status: merged"`).
    LabelName
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Identifies a GitHub repository in `"owner/repo"` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    /// Parses an `"owner/repo"` string.
    ///
    /// Exactly one `/` is allowed and both halves must be non-empty.
    pub fn parse(value: &str) -> Result<Self, BookkeepingError> {
        let invalid = || BookkeepingError::InvalidIdentifier {
            kind: "RepositoryId",
            value: value.to_string(),
        };

        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The user or organisation that owns the repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name without the owner.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepositoryId {
    type Err = BookkeepingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
