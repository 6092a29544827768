//! Reading the bundle manifest and walking its import relationships.

mod graph;
mod loading;
mod vite;

pub use graph::{static_imports_of, stylesheets_of};
pub use loading::{ManifestFormat, load_manifest, parse_manifest};
pub use vite::{ViteManifest, ViteManifestEntry};
