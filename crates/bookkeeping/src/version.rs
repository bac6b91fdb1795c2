//! Semantic versions (SemVer 2.0) and version bumps.
//!
//! Release tags in the wild usually carry a `v` prefix (`v1.4.0`); parsing
//! accepts it, rendering never emits it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::BookkeepingError;

/// A parsed semantic version.
///
/// `Ord` follows SemVer precedence and falls back to build metadata only to
/// break ties, so it agrees with `Eq`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(semver::Version);

/// Which component of a version a set of changes requires incrementing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl std::fmt::Display for Bump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        f.write_str(text)
    }
}

impl Version {
    /// Creates a release version with no pre-release or build metadata.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses `[v]MAJOR.MINOR.PATCH[-PRE][+BUILD]`.
    pub fn parse(text: &str) -> Result<Self, BookkeepingError> {
        let trimmed = text.trim();
        let rest = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        semver::Version::parse(rest)
            .map(Self)
            .map_err(|err| BookkeepingError::InvalidVersion {
                value: text.to_string(),
                reason: err.to_string(),
            })
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Compares by SemVer precedence, ignoring build metadata.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.0.cmp_precedence(&other.0)
    }

    /// Returns the next version for the given bump.
    ///
    /// Pre-release and build metadata are dropped. [`Bump::None`] returns the
    /// version unchanged apart from that. Fails when the bumped component
    /// would exceed `u64::MAX`.
    pub fn bump(&self, bump: Bump) -> Result<Self, BookkeepingError> {
        let overflow = || BookkeepingError::VersionOverflow {
            version: self.to_string(),
            bump: bump.to_string(),
        };
        let (major, minor, patch) = (self.major(), self.minor(), self.patch());

        let next = match bump {
            Bump::None => Self::new(major, minor, patch),
            Bump::Patch => Self::new(major, minor, patch.checked_add(1).ok_or_else(overflow)?),
            Bump::Minor => Self::new(major, minor.checked_add(1).ok_or_else(overflow)?, 0),
            Bump::Major => Self::new(major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        };
        Ok(next)
    }
}

impl std::str::FromStr for Version {
    type Err = BookkeepingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
