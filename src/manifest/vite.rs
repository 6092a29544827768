//! Conversion from Vite's `.vite/manifest.json` into a [`BundleManifest`].
//!
//! The Vite manifest is keyed by source id and its `imports` refer to other keys, while
//! the rest of the crate works on output file names. Converting once up front keeps the
//! graph lookups identical for both formats.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::{AssetEntry, BundleEntry, BundleManifest, ChunkEntry, ChunkMetadata};

/// Deserialized `.vite/manifest.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ViteManifest {
  entries: BTreeMap<String, ViteManifestEntry>,
}

/// One record of the Vite manifest.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViteManifestEntry {
  /// Output file name.
  pub file: String,
  /// Source id the record was produced from.
  #[serde(default)]
  pub src: Option<String>,
  /// Logical chunk name.
  #[serde(default)]
  pub name: Option<String>,
  /// Whether the record is a build entry.
  #[serde(default)]
  pub is_entry: bool,
  /// Whether the record is only reachable through a dynamic import.
  #[serde(default)]
  pub is_dynamic_entry: bool,
  /// Manifest keys of statically imported chunks.
  #[serde(default)]
  pub imports: Vec<String>,
  /// Manifest keys of lazily imported chunks.
  #[serde(default)]
  pub dynamic_imports: Vec<String>,
  /// Output file names of stylesheets imported by the chunk.
  #[serde(default)]
  pub css: Vec<String>,
  /// Output file names of other assets imported by the chunk.
  #[serde(default)]
  pub assets: Vec<String>,
}

impl ViteManifest {
  /// Number of records.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// `true` when the manifest has no records.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Re-key the manifest by output file name.
  ///
  /// Only JavaScript records become chunks; stylesheets, images and fonts become assets.
  /// Import keys that have no record are dropped. Stylesheets and assets that are only
  /// referenced from a chunk become asset entries of their own.
  pub fn into_bundle_manifest(self) -> BundleManifest {
    let mut manifest = BundleManifest::new();

    for entry in self.entries.values() {
      if !is_javascript(&entry.file) {
        manifest.insert(BundleEntry::Asset(AssetEntry {
          file_name: entry.file.clone(),
          name: entry.name.clone(),
        }));
        continue;
      }

      manifest.insert(BundleEntry::Chunk(ChunkEntry {
        file_name: entry.file.clone(),
        name: entry.name.clone(),
        is_entry: entry.is_entry,
        is_dynamic_entry: entry.is_dynamic_entry,
        static_imports: self.resolve_keys(&entry.imports),
        dynamic_imports: self.resolve_keys(&entry.dynamic_imports),
        vite_metadata: ChunkMetadata {
          imported_css: entry.css.iter().cloned().collect(),
          imported_assets: entry.assets.iter().cloned().collect(),
        },
      }));
    }

    let referenced: Vec<&String> = self
      .entries
      .values()
      .flat_map(|entry| entry.css.iter().chain(entry.assets.iter()))
      .collect();
    for file_name in referenced {
      if manifest.get(file_name).is_none() {
        manifest.insert(BundleEntry::Asset(AssetEntry {
          file_name: file_name.clone(),
          name: None,
        }));
      }
    }

    manifest
  }

  fn resolve_keys(&self, keys: &[String]) -> Vec<String> {
    keys
      .iter()
      .filter_map(|key| self.entries.get(key))
      .map(|entry| entry.file.clone())
      .collect()
  }
}

fn is_javascript(file_name: &str) -> bool {
  file_name.ends_with(".js") || file_name.ends_with(".mjs")
}
