//! Data structures describing emitted build output and the links computed from it.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Public paths already referenced by `<link>` elements of an entry document.
pub type ExistingLinkSet = BTreeSet<String>;

/// One emitted output artifact, tagged the way the bundler serializes its output bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BundleEntry {
  /// Executable JavaScript output with import relationships.
  Chunk(ChunkEntry),
  /// Non-executable output such as a stylesheet.
  Asset(AssetEntry),
}

impl BundleEntry {
  /// Output file name, unique within one build.
  pub fn file_name(&self) -> &str {
    match self {
      Self::Chunk(chunk) => &chunk.file_name,
      Self::Asset(asset) => &asset.file_name,
    }
  }

  /// Optional logical name assigned by the bundler.
  pub fn name(&self) -> Option<&str> {
    match self {
      Self::Chunk(chunk) => chunk.name.as_deref(),
      Self::Asset(asset) => asset.name.as_deref(),
    }
  }

  /// Returns the chunk payload when the entry is a chunk.
  pub fn as_chunk(&self) -> Option<&ChunkEntry> {
    match self {
      Self::Chunk(chunk) => Some(chunk),
      Self::Asset(_) => None,
    }
  }

  /// `true` for chunks.
  pub fn is_chunk(&self) -> bool {
    matches!(self, Self::Chunk(_))
  }

  /// `true` for assets.
  pub fn is_asset(&self) -> bool {
    matches!(self, Self::Asset(_))
  }

  pub(crate) fn set_file_name(&mut self, file_name: &str) {
    match self {
      Self::Chunk(chunk) => chunk.file_name = file_name.to_string(),
      Self::Asset(asset) => asset.file_name = file_name.to_string(),
    }
  }
}

/// Emitted JavaScript chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkEntry {
  /// Output file name of the chunk.
  #[serde(default)]
  pub file_name: String,
  /// Logical chunk name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Whether the chunk is an entry point of the build.
  #[serde(default)]
  pub is_entry: bool,
  /// Whether the chunk is only reachable through a dynamic import.
  #[serde(default)]
  pub is_dynamic_entry: bool,
  /// File names of chunks imported statically, in import order.
  #[serde(default, rename = "imports")]
  pub static_imports: Vec<String>,
  /// File names of chunks imported lazily. Never expanded for preloading.
  #[serde(default)]
  pub dynamic_imports: Vec<String>,
  /// Metadata recorded while the chunk was rendered.
  #[serde(default)]
  pub vite_metadata: ChunkMetadata,
}

impl ChunkEntry {
  /// Stylesheets pulled in while building this chunk.
  pub fn imported_stylesheets(&self) -> &BTreeSet<String> {
    &self.vite_metadata.imported_css
  }
}

/// Per-chunk metadata about assets pulled in during the chunk's own processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
  /// Stylesheet file names imported by the chunk.
  #[serde(default)]
  pub imported_css: BTreeSet<String>,
  /// Other asset file names imported by the chunk.
  #[serde(default)]
  pub imported_assets: BTreeSet<String>,
}

/// Emitted non-executable asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
  /// Output file name of the asset.
  #[serde(default)]
  pub file_name: String,
  /// Logical asset name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

/// Immutable map of output file name to emitted entry for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BundleManifest {
  entries: BTreeMap<String, BundleEntry>,
}

impl BundleManifest {
  /// Create an empty manifest.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an entry keyed by its own file name, replacing any previous entry.
  pub fn insert(&mut self, entry: BundleEntry) {
    self.entries.insert(entry.file_name().to_string(), entry);
  }

  /// Look up an entry by output file name.
  pub fn get(&self, file_name: &str) -> Option<&BundleEntry> {
    self.entries.get(file_name)
  }

  /// Iterate entries in file-name order.
  pub fn entries(&self) -> btree_map::Values<'_, String, BundleEntry> {
    self.entries.values()
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// `true` when the build emitted nothing.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<BundleEntry> for BundleManifest {
  fn from_iter<I: IntoIterator<Item = BundleEntry>>(iter: I) -> Self {
    let mut manifest = Self::new();
    for entry in iter {
      manifest.insert(entry);
    }
    manifest
  }
}

/// Links to add to one entry document.
///
/// Both sets iterate in lexicographic code-point order, which is the order the elements
/// are injected in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkSets {
  /// Public paths that receive a `modulepreload` link.
  pub modules: BTreeSet<String>,
  /// Public paths that receive a `stylesheet` link.
  pub stylesheets: BTreeSet<String>,
}

impl LinkSets {
  /// `true` when nothing needs to be injected.
  pub fn is_empty(&self) -> bool {
    self.modules.is_empty() && self.stylesheets.is_empty()
  }

  /// Total number of links to inject.
  pub fn len(&self) -> usize {
    self.modules.len() + self.stylesheets.len()
  }
}
