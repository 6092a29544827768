//! Per-document orchestration: parse, plan links, inject, serialize.

use tracing::{debug, info};

use crate::asset_paths::PublicPathResolver;
use crate::error::Result;
use crate::html::{HtmlDocument, inject_links};
use crate::links::build_link_sets;
use crate::models::{BundleManifest, LinkSets};
use crate::options::PreloadOptions;

/// Rewrites HTML entry documents of one build.
///
/// Holds only read-only state, so a single instance can serve every entry document of the
/// build, from several threads if the predicate allows it.
#[derive(Debug, Clone, Default)]
pub struct PreloadTransform {
  options: PreloadOptions,
  resolver: PublicPathResolver,
}

impl PreloadTransform {
  /// Create a transform for the given options and public base path.
  pub fn new(options: PreloadOptions, resolver: PublicPathResolver) -> Self {
    Self { options, resolver }
  }

  /// Options in effect.
  pub fn options(&self) -> &PreloadOptions {
    &self.options
  }

  /// Compute the links that [`transform`](Self::transform) would inject.
  pub fn plan(&self, html: &str, manifest: &BundleManifest) -> Result<LinkSets> {
    let document = HtmlDocument::parse(html)?;
    Ok(self.plan_document(&document, manifest))
  }

  /// Inject preload and stylesheet links into one entry document.
  ///
  /// Without a manifest the input is returned unchanged. The output is a pure function of
  /// the inputs, so re-running on the same inputs is always safe.
  pub fn transform(&self, html: &str, manifest: Option<&BundleManifest>) -> Result<String> {
    let Some(manifest) = manifest else {
      debug!("no bundle manifest; leaving document untouched");
      return Ok(html.to_string());
    };

    let mut document = HtmlDocument::parse(html)?;
    let links = self.plan_document(&document, manifest);
    inject_links(&mut document, &links);
    info!(
      modules = links.modules.len(),
      stylesheets = links.stylesheets.len(),
      "injected preload links"
    );

    document.serialize()
  }

  fn plan_document(&self, document: &HtmlDocument, manifest: &BundleManifest) -> LinkSets {
    let existing_links = document.existing_links();
    build_link_sets(manifest, &self.options, &existing_links, &self.resolver)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::models::{AssetEntry, BundleEntry, ChunkEntry, ChunkMetadata};

  const INDEX_HTML: &str = "<!DOCTYPE html><html><head><title>App</title></head>\
<body><script type=\"module\" src=\"/index-a1b2.js\"></script></body></html>";

  fn manifest() -> BundleManifest {
    [
      BundleEntry::Chunk(ChunkEntry {
        file_name: "index-a1b2.js".into(),
        is_entry: true,
        static_imports: vec!["vendor-c3d4.js".into()],
        ..ChunkEntry::default()
      }),
      BundleEntry::Chunk(ChunkEntry {
        file_name: "vendor-c3d4.js".into(),
        vite_metadata: ChunkMetadata {
          imported_css: ["vendor-e5f6.css".to_string()].into_iter().collect(),
          ..ChunkMetadata::default()
        },
        ..ChunkEntry::default()
      }),
      BundleEntry::Asset(AssetEntry {
        file_name: "vendor-e5f6.css".into(),
        name: None,
      }),
    ]
    .into_iter()
    .collect()
  }

  #[test]
  fn returns_input_unchanged_without_manifest() {
    let html = "<p>not even a full document";
    let output = PreloadTransform::default().transform(html, None).unwrap();
    assert_eq!(output, html);
  }

  #[test]
  fn injects_links_for_entry_script() {
    let output = PreloadTransform::default()
      .transform(INDEX_HTML, Some(&manifest()))
      .unwrap();

    assert_eq!(
      output,
      "<!DOCTYPE html><html><head><title>App</title>\
<link rel=\"modulepreload\" href=\"/index-a1b2.js\">\
<link rel=\"modulepreload\" href=\"/vendor-c3d4.js\">\
<link rel=\"stylesheet\" href=\"/vendor-e5f6.css\"></head>\
<body><script type=\"module\" src=\"/index-a1b2.js\"></script></body></html>"
    );
  }

  #[test]
  fn plan_honours_existing_links() {
    let html = INDEX_HTML.replace(
      "<title>App</title>",
      "<title>App</title><link rel=\"modulepreload\" href=\"/vendor-c3d4.js\">",
    );
    let links = PreloadTransform::default().plan(&html, &manifest()).unwrap();

    assert_eq!(links.modules.into_iter().collect::<Vec<_>>(), vec!["/index-a1b2.js"]);
    assert_eq!(links.stylesheets.into_iter().collect::<Vec<_>>(), vec!["/vendor-e5f6.css"]);
  }

  #[test]
  fn noscript_fallback_links_are_not_duplicated() {
    let html = INDEX_HTML.replace(
      "<title>App</title>",
      "<title>App</title><noscript><link rel=\"stylesheet\" href=\"/vendor-e5f6.css\"></noscript>",
    );
    let output = PreloadTransform::default().transform(&html, Some(&manifest())).unwrap();

    assert_eq!(output.matches("href=\"/vendor-e5f6.css\"").count(), 1);
    assert!(output.contains("<link rel=\"modulepreload\" href=\"/vendor-c3d4.js\">"));
  }

  #[test]
  fn output_is_deterministic_and_idempotent() {
    let transform = PreloadTransform::new(PreloadOptions::default(), PublicPathResolver::new("/app"));
    let manifest = manifest();

    let first = transform.transform(INDEX_HTML, Some(&manifest)).unwrap();
    let second = transform.transform(INDEX_HTML, Some(&manifest)).unwrap();
    assert_eq!(first, second);

    let rerun = transform.transform(&first, Some(&manifest)).unwrap();
    assert_eq!(rerun, first);
  }

  #[test]
  fn vetoing_everything_only_normalises_markup() {
    let transform = PreloadTransform::new(
      PreloadOptions::default().with_should_preload(|_: &BundleEntry| false),
      PublicPathResolver::default(),
    );
    let output = transform.transform(INDEX_HTML, Some(&manifest())).unwrap();
    assert_eq!(output, INDEX_HTML);
  }
}
