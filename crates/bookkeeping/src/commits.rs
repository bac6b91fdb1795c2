//! Conventional-commit classification and release planning.
//!
//! Header grammar: `type(scope)!: description`. The scope and the `!` are
//! optional; a `BREAKING CHANGE:` (or `BREAKING-CHANGE:`) footer marks the
//! commit as breaking just like `!` does.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BookkeepingError, Bump, Commit, Version};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[A-Za-z][A-Za-z0-9-]*)(?:\((?P<scope>[^()]*)\))?(?P<breaking>!)?: (?P<description>\S.*)$")
        .expect("Invalid conventional commit header regex")
});

const MERGE_PREFIXES: [&str; 3] = [
    "Merge pull request ",
    "Merge branch ",
    "Merge remote-tracking branch ",
];

/// A commit message that follows the conventional-commit header grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalCommit {
    /// Lower-cased type, e.g. `"feat"`.
    pub kind: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
}

impl ConventionalCommit {
    /// Parses a full commit message. Returns `None` when the subject line is
    /// not a conventional-commit header.
    pub fn parse(message: &str) -> Option<Self> {
        let mut lines = message.lines();
        let header = lines.next()?.trim_end();
        let captures = HEADER.captures(header)?;

        let footer_breaking = lines.any(|line| {
            line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:")
        });

        Some(Self {
            kind: captures["type"].to_ascii_lowercase(),
            scope: captures
                .name("scope")
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty()),
            breaking: captures.name("breaking").is_some() || footer_breaking,
            description: captures["description"].trim().to_string(),
        })
    }

    /// The version bump this commit asks for.
    pub fn bump(&self) -> Bump {
        if self.breaking {
            return Bump::Major;
        }
        match self.kind.as_str() {
            "feat" => Bump::Minor,
            "fix" | "perf" => Bump::Patch,
            _ => Bump::None,
        }
    }
}

/// Classifies a raw commit message. Non-conventional messages never bump.
pub fn classify(message: &str) -> Bump {
    ConventionalCommit::parse(message)
        .map(|commit| commit.bump())
        .unwrap_or_default()
}

/// `true` for the subjects GitHub and git generate for merge commits.
pub fn is_merge_commit(message: &str) -> bool {
    let subject = message.lines().next().unwrap_or_default();
    MERGE_PREFIXES
        .iter()
        .any(|prefix| subject.starts_with(prefix))
}

/// The outcome of inspecting the commits since the previous release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePlan {
    /// Latest released version, if any.
    pub previous: Option<Version>,
    /// Bump that was applied (after the pre-1.0 adjustment).
    pub bump: Bump,
    /// Version to release. `None` when no release is due.
    pub next: Option<Version>,
    /// Number of non-merge commits that were inspected.
    pub commit_count: usize,
}

impl ReleasePlan {
    /// Decides the next version from the commit list.
    ///
    /// The highest bump across all commits wins. Without a previous release
    /// the first release is `initial`. While the major version is `0`, a
    /// breaking change bumps the minor version instead.
    pub fn from_commits(
        previous: Option<Version>,
        commits: &[Commit],
        initial: &Version,
    ) -> Result<Self, BookkeepingError> {
        let relevant: Vec<&Commit> = commits
            .iter()
            .filter(|commit| !is_merge_commit(&commit.message))
            .collect();

        let requested = relevant
            .iter()
            .map(|commit| {
                let bump = classify(&commit.message);
                debug!(sha = %commit.sha, subject = commit.subject(), %bump, "Classified commit");
                bump
            })
            .max()
            .unwrap_or_default();

        let (bump, next) = match (&previous, requested) {
            (_, Bump::None) => (Bump::None, None),
            (None, requested) => (requested, Some(initial.clone())),
            (Some(prev), Bump::Major) if prev.major() == 0 => {
                (Bump::Minor, Some(prev.bump(Bump::Minor)?))
            }
            (Some(prev), requested) => (requested, Some(prev.bump(requested)?)),
        };

        Ok(Self {
            previous,
            bump,
            next,
            commit_count: relevant.len(),
        })
    }

    /// `true` when at least one commit warrants a release.
    pub fn should_release(&self) -> bool {
        self.next.is_some()
    }
}
