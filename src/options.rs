//! Toggles controlling which emitted files receive links.

use std::fmt;
use std::sync::Arc;

use crate::models::BundleEntry;

/// Per-entry veto consulted before an entry is classified.
pub trait ShouldPreload: Send + Sync {
  /// Returns `false` to keep the entry out of the injected links.
  fn should_preload(&self, entry: &BundleEntry) -> bool;
}

impl<F> ShouldPreload for F
where
  F: Fn(&BundleEntry) -> bool + Send + Sync,
{
  fn should_preload(&self, entry: &BundleEntry) -> bool {
    self(entry)
  }
}

/// Predicate admitting every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreloadAll;

impl ShouldPreload for PreloadAll {
  fn should_preload(&self, _entry: &BundleEntry) -> bool {
    true
  }
}

/// Options for one build. Every combination is valid; all toggles off is a no-op.
#[derive(Clone)]
pub struct PreloadOptions {
  /// Inject `modulepreload` links for hashed chunks.
  pub include_js: bool,
  /// Inject `stylesheet` links for hashed stylesheets.
  pub include_css: bool,
  /// Expand each eligible chunk by its direct static imports.
  pub preload_static_import_for_chunks: bool,
  should_preload: Arc<dyn ShouldPreload>,
}

impl Default for PreloadOptions {
  fn default() -> Self {
    Self {
      include_js: true,
      include_css: true,
      preload_static_import_for_chunks: true,
      should_preload: Arc::new(PreloadAll),
    }
  }
}

impl PreloadOptions {
  /// Toggle script preloads.
  pub fn with_include_js(mut self, include_js: bool) -> Self {
    self.include_js = include_js;
    self
  }

  /// Toggle stylesheet links.
  pub fn with_include_css(mut self, include_css: bool) -> Self {
    self.include_css = include_css;
    self
  }

  /// Toggle one-hop static import expansion.
  pub fn with_static_imports(mut self, enabled: bool) -> Self {
    self.preload_static_import_for_chunks = enabled;
    self
  }

  /// Replace the per-entry predicate.
  pub fn with_should_preload(mut self, predicate: impl ShouldPreload + 'static) -> Self {
    self.should_preload = Arc::new(predicate);
    self
  }

  /// Consult the configured predicate.
  pub fn should_preload(&self, entry: &BundleEntry) -> bool {
    self.should_preload.should_preload(entry)
  }
}

impl fmt::Debug for PreloadOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PreloadOptions")
      .field("include_js", &self.include_js)
      .field("include_css", &self.include_css)
      .field(
        "preload_static_import_for_chunks",
        &self.preload_static_import_for_chunks,
      )
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{AssetEntry, ChunkEntry};

  fn chunk(name: &str) -> BundleEntry {
    BundleEntry::Chunk(ChunkEntry {
      file_name: name.into(),
      ..ChunkEntry::default()
    })
  }

  #[test]
  fn defaults_enable_everything() {
    let options = PreloadOptions::default();
    assert!(options.include_js);
    assert!(options.include_css);
    assert!(options.preload_static_import_for_chunks);
    assert!(options.should_preload(&chunk("index-a1b2.js")));
    assert!(options.should_preload(&BundleEntry::Asset(AssetEntry::default())));
  }

  #[test]
  fn closures_act_as_predicates() {
    let options = PreloadOptions::default()
      .with_should_preload(|entry: &BundleEntry| entry.file_name().starts_with("index"));
    assert!(options.should_preload(&chunk("index-a1b2.js")));
    assert!(!options.should_preload(&chunk("vendor-c3d4.js")));
  }

  #[test]
  fn builder_toggles_are_independent() {
    let options = PreloadOptions::default()
      .with_include_js(false)
      .with_static_imports(false);
    assert!(!options.include_js);
    assert!(options.include_css);
    assert!(!options.preload_static_import_for_chunks);
  }
}
