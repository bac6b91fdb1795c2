//! Package manifest versions and release-in-progress detection.
//!
//! Callers read the manifest file; this module only parses its contents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BookkeepingError, Version};

/// Supported manifest formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestKind {
    /// `package.json`
    Npm,
    /// `Cargo.toml`
    Cargo,
}

impl ManifestKind {
    /// Picks the format from the file name.
    pub fn detect(path: &Path) -> Result<Self, BookkeepingError> {
        match path.file_name().and_then(|name| name.to_str()) {
            Some("package.json") => Ok(Self::Npm),
            Some("Cargo.toml") => Ok(Self::Cargo),
            _ => Err(BookkeepingError::Manifest {
                message: format!(
                    "unsupported manifest '{}', expected package.json or Cargo.toml",
                    path.display()
                ),
            }),
        }
    }
}

/// Extracts the declared version from manifest contents.
pub fn manifest_version(kind: ManifestKind, contents: &str) -> Result<Version, BookkeepingError> {
    let raw = match kind {
        ManifestKind::Npm => npm_version(contents)?,
        ManifestKind::Cargo => cargo_version(contents)?,
    };
    Version::parse(&raw)
}

fn npm_version(contents: &str) -> Result<String, BookkeepingError> {
    let manifest: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| BookkeepingError::Manifest {
            message: format!("package.json is not valid JSON: {e}"),
        })?;

    manifest
        .get("version")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| BookkeepingError::Manifest {
            message: "package.json has no string \"version\" field".to_string(),
        })
}

fn cargo_version(contents: &str) -> Result<String, BookkeepingError> {
    let manifest: toml::Table = contents.parse().map_err(|e| BookkeepingError::Manifest {
        message: format!("Cargo.toml is not valid TOML: {e}"),
    })?;

    let package_version = manifest
        .get("package")
        .and_then(|package| package.get("version"));

    // `version.workspace = true` defers to [workspace.package].
    let version = match package_version {
        Some(toml::Value::String(version)) => Some(version.clone()),
        Some(toml::Value::Table(_)) | None => manifest
            .get("workspace")
            .and_then(|ws| ws.get("package"))
            .and_then(|package| package.get("version"))
            .and_then(toml::Value::as_str)
            .map(str::to_string),
        Some(_) => None,
    };

    version.ok_or_else(|| BookkeepingError::Manifest {
        message: "Cargo.toml declares no [package] or [workspace.package] version".to_string(),
    })
}

/// How a manifest version relates to the latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseState {
    /// The manifest is ahead of the latest release (or nothing is released).
    InProgress,
    /// The manifest version is already released.
    Released,
}

impl ReleaseState {
    /// Compares a manifest version with the latest released version.
    ///
    /// A manifest behind the latest release is an error: someone bumped the
    /// tag without bumping the manifest, or the reverse was reverted.
    pub fn compare(manifest: &Version, released: Option<&Version>) -> Result<Self, BookkeepingError> {
        let Some(released) = released else {
            return Ok(Self::InProgress);
        };
        match manifest.cmp_precedence(released) {
            std::cmp::Ordering::Greater => Ok(Self::InProgress),
            std::cmp::Ordering::Equal => Ok(Self::Released),
            std::cmp::Ordering::Less => Err(BookkeepingError::ManifestBehind {
                manifest: manifest.to_string(),
                released: released.to_string(),
            }),
        }
    }
}
