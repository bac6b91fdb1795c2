//! `release-in-progress`: compare the manifest version with the latest
//! release to tell whether a release is underway.

use std::path::PathBuf;

use bookkeeping::{
    manifest_version, ManifestKind, ReleaseHistory, ReleaseState, RepositoryId, Version,
};
use toolkit::Outputs;
use tracing::{info, instrument};

use crate::ActionError;

/// Manifest read when the workflow does not name one.
pub const DEFAULT_MANIFEST: &str = "package.json";

#[derive(Debug, Clone)]
pub struct ReleaseInProgressInput {
    pub repository: RepositoryId,
    /// Path to `package.json` or `Cargo.toml`, relative to the working
    /// directory (the checkout).
    pub manifest: PathBuf,
}

/// Outputs: `in-progress`, `manifest-version`, `released-version` (empty
/// before the first release). A manifest behind the latest release fails.
#[instrument(skip_all, fields(manifest = %input.manifest.display()))]
pub async fn release_in_progress<C>(
    github: &C,
    input: &ReleaseInProgressInput,
) -> Result<Outputs, ActionError>
where
    C: ReleaseHistory + ?Sized,
{
    let kind = ManifestKind::detect(&input.manifest)?;
    let contents = tokio::fs::read_to_string(&input.manifest)
        .await
        .map_err(|source| ActionError::Read {
            path: input.manifest.clone(),
            source,
        })?;
    let manifest = manifest_version(kind, &contents)?;

    let released = github
        .latest_release(&input.repository)
        .await?
        .map(|release| Version::parse(&release.tag_name))
        .transpose()?;

    let state = ReleaseState::compare(&manifest, released.as_ref())?;
    info!(?state, manifest = %manifest, "Compared manifest with latest release");

    let mut outputs = Outputs::new();
    outputs
        .set("in-progress", state == ReleaseState::InProgress)
        .set("manifest-version", &manifest)
        .set(
            "released-version",
            released.as_ref().map(ToString::to_string).unwrap_or_default(),
        );
    Ok(outputs)
}
