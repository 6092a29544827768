//! Single-hop lookups over the bundle manifest.
//!
//! Neither function recurses; the link builder decides how far to walk.

use std::collections::BTreeSet;

use crate::models::{BundleEntry, BundleManifest};

/// Direct static imports of a chunk.
///
/// Assets and file names missing from the manifest yield an empty slice, so stale
/// references never abort a transform.
pub fn static_imports_of<'a>(manifest: &'a BundleManifest, file_name: &str) -> &'a [String] {
  match manifest.get(file_name) {
    Some(BundleEntry::Chunk(chunk)) => &chunk.static_imports,
    _ => &[],
  }
}

static NO_STYLESHEETS: BTreeSet<String> = BTreeSet::new();

/// Stylesheets recorded as imported while the chunk was built.
pub fn stylesheets_of<'a>(manifest: &'a BundleManifest, file_name: &str) -> &'a BTreeSet<String> {
  match manifest.get(file_name) {
    Some(BundleEntry::Chunk(chunk)) => chunk.imported_stylesheets(),
    _ => &NO_STYLESHEETS,
  }
}
