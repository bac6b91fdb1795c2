//! Bookkeeping action implementations.
//!
//! One async function per action. Each takes a typed input struct and a
//! GitHub implementation behind the [`bookkeeping`] port traits, and returns
//! the step [`toolkit::Outputs`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Actions sequence calls between domain rules in
//! the [`bookkeeping`] crate and the port traits. They contain no rules of
//! their own and never read the environment; the `cli` crate maps runner
//! inputs into the input structs.
//!
//! | Action | Function |
//! |--------|----------|
//! | `move-issue` | [`move_issue`] |
//! | `label-merged` | [`label_merged`] |
//! | `validate-footer` | [`validate_footer`] |
//! | `release-version` | [`release_version`] |
//! | `release-in-progress` | [`release_in_progress`] |

mod error;
mod label_merged;
mod move_issue;
mod release_in_progress;
mod release_version;
mod validate_footer;

#[cfg(test)]
mod testing;

pub use error::ActionError;
pub use label_merged::{label_merged, LabelMergedInput};
pub use move_issue::{move_issue, MoveIssueInput, DEFAULT_FIELD};
pub use release_in_progress::{release_in_progress, ReleaseInProgressInput, DEFAULT_MANIFEST};
pub use release_version::{release_version, ReleaseVersionInput, DEFAULT_INITIAL_VERSION};
pub use validate_footer::{validate_footer, FooterSource, ValidateFooterInput};
