//! Closing-footer rules for commit messages and pull request descriptions.
//!
//! The only accepted closing footer is `Closes: #<number>`, on its own line,
//! in the last paragraph of the message. GitHub itself recognises a looser
//! family of keywords (`fixes #1`, `Resolved: #1`, ...); those are reported
//! as malformed so that every repository uses one spelling.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::IssueNumber;

static CLOSING_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Closes: #([0-9]+)$").expect("Invalid closing footer regex")
});

// Anything that starts like a closing keyword followed by `:`, `#` or a digit.
static CLOSING_LOOKALIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(close[sd]?|fix(e[sd])?|resolve[sd]?)(\s*:|\s+#|\s+[0-9])")
        .expect("Invalid closing keyword regex")
});

/// Where a message came from. Commit messages start with a subject line that
/// can never be the footer; descriptions have no subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Commit,
    Description,
}

/// Why a message failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterProblem {
    /// No `Closes: #<number>` line in the footer block.
    Missing,
    /// A line that reads like a closing footer but is spelled differently.
    Malformed { line: String },
}

impl std::fmt::Display for FooterProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing 'Closes: #<number>' footer"),
            Self::Malformed { line } => {
                write!(f, "malformed footer '{line}', expected 'Closes: #<number>'")
            }
        }
    }
}

/// Every problem found in one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", problems.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct FooterViolation {
    pub problems: Vec<FooterProblem>,
}

/// Returns `true` only for a line of the exact form `Closes: #<number>`.
///
/// Surrounding whitespace is ignored; anything else on the line is not.
pub fn is_closing_footer(line: &str) -> bool {
    parse_closing_footer(line).is_some()
}

/// Extracts the issue number from a `Closes: #<number>` line.
///
/// Leading zeros are accepted; a number that is zero or does not fit in a
/// `u64` is not.
pub fn parse_closing_footer(line: &str) -> Option<IssueNumber> {
    let captures = CLOSING_FOOTER.captures(line.trim())?;
    captures[1].parse::<u64>().ok().and_then(IssueNumber::new)
}

/// Returns the lines of the footer block: the last paragraph of the message.
///
/// For [`MessageKind::Commit`] a message with a single paragraph has no footer
/// block, since that paragraph is the subject.
pub fn footer_block(message: &str, kind: MessageKind) -> Vec<&str> {
    let mut paragraphs = paragraphs(message);
    if kind == MessageKind::Commit && paragraphs.len() < 2 {
        return Vec::new();
    }
    paragraphs.pop().unwrap_or_default()
}

/// Issue numbers named by closing footers, in order of appearance, without
/// duplicates.
pub fn closed_issues(message: &str, kind: MessageKind) -> Vec<IssueNumber> {
    let mut issues = Vec::new();
    for number in footer_block(message, kind)
        .into_iter()
        .filter_map(parse_closing_footer)
    {
        if !issues.contains(&number) {
            issues.push(number);
        }
    }
    issues
}

/// Checks that the message ends in at least one well-formed closing footer
/// and carries no misspelled ones.
///
/// Trailers unrelated to closing issues (`Signed-off-by:`, `Co-authored-by:`)
/// are allowed alongside.
pub fn validate_message(
    message: &str,
    kind: MessageKind,
) -> Result<Vec<IssueNumber>, FooterViolation> {
    let block = footer_block(message, kind);
    let mut problems: Vec<FooterProblem> = block
        .iter()
        .map(|line| line.trim())
        .filter(|line| !is_closing_footer(line) && CLOSING_LOOKALIKE.is_match(line))
        .map(|line| FooterProblem::Malformed {
            line: line.to_string(),
        })
        .collect();

    let issues = closed_issues(message, kind);
    if issues.is_empty() {
        problems.insert(0, FooterProblem::Missing);
    }

    if problems.is_empty() {
        Ok(issues)
    } else {
        Err(FooterViolation { problems })
    }
}

fn paragraphs(message: &str) -> Vec<Vec<&str>> {
    let mut paragraphs = Vec::new();
    let mut current = Vec::new();
    for line in message.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}
