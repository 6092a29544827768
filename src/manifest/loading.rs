//! Loading the bundle manifest written by the build.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PreloadError, Result};
use crate::manifest::vite::ViteManifest;
use crate::models::{BundleEntry, BundleManifest};

/// Shape of the manifest JSON on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
  /// Vite's `.vite/manifest.json`, keyed by source id.
  #[default]
  Vite,
  /// The serialized output bundle, keyed by output file name.
  Bundle,
}

/// Load a manifest from disk.
///
/// A missing file yields `Ok(None)`: no bundle was produced for this build, so callers
/// leave their documents untouched.
pub fn load_manifest(path: &Path, format: ManifestFormat) -> Result<Option<BundleManifest>> {
  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "no manifest found");
      return Ok(None);
    }
    Err(source) => {
      return Err(PreloadError::ManifestRead {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  let manifest = parse_manifest(&content, format).map_err(|err| err.in_manifest(path))?;
  debug!(path = %path.display(), entries = manifest.len(), "loaded manifest");
  Ok(Some(manifest))
}

/// Parse manifest JSON already held in memory.
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<BundleManifest> {
  match format {
    ManifestFormat::Bundle => parse_bundle_manifest(content),
    ManifestFormat::Vite => {
      let manifest: ViteManifest = serde_json::from_str(content)?;
      Ok(manifest.into_bundle_manifest())
    }
  }
}

fn parse_bundle_manifest(content: &str) -> Result<BundleManifest> {
  let raw: BTreeMap<String, BundleEntry> = serde_json::from_str(content)?;
  let mut manifest = BundleManifest::new();

  for (key, mut entry) in raw {
    if entry.file_name().is_empty() {
      entry.set_file_name(&key);
    } else if entry.file_name() != key {
      return Err(PreloadError::ManifestMismatch {
        key,
        file_name: entry.file_name().to_string(),
      });
    }
    manifest.insert(entry);
  }

  Ok(manifest)
}
