//! Computes which emitted files an entry document should link to.

use tracing::{debug, trace};

use crate::asset_paths::{PublicPathResolver, is_script, is_stylesheet};
use crate::manifest::{static_imports_of, stylesheets_of};
use crate::models::{BundleEntry, BundleManifest, ExistingLinkSet, LinkSets};
use crate::options::PreloadOptions;

/// Build the module and stylesheet links for one document.
///
/// Entries whose public path is already linked, or that the predicate vetoes, are skipped
/// before classification. Static import expansion covers the direct imports of each
/// eligible chunk only; the imports of those imports are never followed, and the predicate
/// is not consulted for them.
pub fn build_link_sets(
  manifest: &BundleManifest,
  options: &PreloadOptions,
  existing_links: &ExistingLinkSet,
  resolver: &PublicPathResolver,
) -> LinkSets {
  let mut links = LinkSets::default();

  for entry in manifest.entries() {
    let file_name = entry.file_name();
    let path = resolver.to_public_path(file_name);

    if existing_links.contains(&path) {
      trace!(%path, "already linked");
      continue;
    }
    if !options.should_preload(entry) {
      debug!(%path, "vetoed by predicate");
      continue;
    }

    match entry {
      BundleEntry::Chunk(_) if options.include_js && is_script(file_name) => {
        if options.preload_static_import_for_chunks {
          add_static_imports(manifest, options, existing_links, resolver, file_name, &mut links);
        }
        links.modules.insert(path);
      }
      BundleEntry::Asset(_) if options.include_css && is_stylesheet(file_name) => {
        links.stylesheets.insert(path);
      }
      _ => {}
    }
  }

  debug!(
    modules = links.modules.len(),
    stylesheets = links.stylesheets.len(),
    "computed preload links"
  );
  links
}

fn add_static_imports(
  manifest: &BundleManifest,
  options: &PreloadOptions,
  existing_links: &ExistingLinkSet,
  resolver: &PublicPathResolver,
  file_name: &str,
  links: &mut LinkSets,
) {
  for import in static_imports_of(manifest, file_name) {
    if !manifest.get(import).is_some_and(BundleEntry::is_chunk) || !is_script(import) {
      continue;
    }

    let path = resolver.to_public_path(import);
    if !existing_links.contains(&path) {
      links.modules.insert(path);
    }

    if !options.include_css {
      continue;
    }
    for stylesheet in stylesheets_of(manifest, import) {
      if !manifest.get(stylesheet).is_some_and(BundleEntry::is_asset) || !is_stylesheet(stylesheet) {
        continue;
      }
      let path = resolver.to_public_path(stylesheet);
      if !existing_links.contains(&path) {
        links.stylesheets.insert(path);
      }
    }
  }
}
