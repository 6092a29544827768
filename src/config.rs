//! Project configuration loader describing where build output lives and what to preload.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::asset_paths::PublicPathResolver;
use crate::manifest::ManifestFormat;
use crate::options::PreloadOptions;
use crate::selection::{PreloadSelection, SelectionError};

/// Configuration file searched for in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "preload.config.json";

/// Discoverable project configuration; every key is optional and falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    /// Inject `modulepreload` links for hashed chunks.
    pub include_js: bool,
    /// Inject `stylesheet` links for hashed stylesheets.
    pub include_css: bool,
    /// Expand eligible chunks by their direct static imports.
    pub preload_static_import_for_chunks: bool,
    /// Public base path prepended to every output file name.
    pub base: String,
    /// Path of the manifest relative to the project directory.
    pub manifest: String,
    /// Shape of the manifest file.
    pub manifest_format: ManifestFormat,
    /// HTML entry documents to rewrite, relative to the project directory.
    pub html: Vec<String>,
    /// Globs an output file must match to be preloaded. Empty admits everything.
    pub include: Vec<String>,
    /// Globs excluding output files from preloading.
    pub exclude: Vec<String>,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            include_js: true,
            include_css: true,
            preload_static_import_for_chunks: true,
            base: String::new(),
            manifest: "dist/.vite/manifest.json".into(),
            manifest_format: ManifestFormat::Vite,
            html: vec!["dist/index.html".into()],
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl PreloadConfig {
    /// Load `preload.config.json` from `project_dir`, or defaults when it does not exist.
    pub fn discover(project_dir: &Path) -> Result<Self> {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Ok(Self::from_path(&candidate)?.unwrap_or_default())
    }

    /// Read configuration from a specific JSON file. A missing file yields `None`.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Build transform options, installing the include/exclude rules as the predicate.
    pub fn to_options(&self) -> Result<PreloadOptions, SelectionError> {
        let options = PreloadOptions::default()
            .with_include_js(self.include_js)
            .with_include_css(self.include_css)
            .with_static_imports(self.preload_static_import_for_chunks);

        let selection = PreloadSelection::new(self.include.clone(), self.exclude.clone())?;
        if selection.is_unfiltered() {
            return Ok(options);
        }
        Ok(options.with_should_preload(selection))
    }

    /// Resolver for the configured base path.
    pub fn resolver(&self) -> PublicPathResolver {
        PublicPathResolver::new(self.base.clone())
    }

    /// Manifest location relative to the project directory.
    pub fn manifest_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.manifest)
    }

    /// HTML entry document locations relative to the project directory.
    pub fn html_paths(&self, project_dir: &Path) -> Vec<PathBuf> {
        self.html.iter().map(|path| project_dir.join(path)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BundleEntry, ChunkEntry};
    use tempfile::tempdir;

    #[test]
    fn discovers_defaults_without_config_file() {
        let dir = tempdir().unwrap();
        let config = PreloadConfig::discover(dir.path()).unwrap();
        assert_eq!(config, PreloadConfig::default());
        assert_eq!(
            config.manifest_path(dir.path()),
            dir.path().join("dist/.vite/manifest.json")
        );
    }

    #[test]
    fn merges_partial_config_over_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{ "include_css": false, "base": "/app", "manifest_format": "bundle" }"#,
        )
        .unwrap();

        let config = PreloadConfig::discover(dir.path()).unwrap();
        assert!(config.include_js);
        assert!(!config.include_css);
        assert_eq!(config.manifest_format, ManifestFormat::Bundle);
        assert_eq!(config.resolver().to_public_path("a-1.js"), "/app/a-1.js");
        assert_eq!(config.html, vec!["dist/index.html".to_string()]);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ \"include_js\": \"yes\" }").unwrap();

        let err = PreloadConfig::discover(dir.path()).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn selection_rules_become_the_predicate() {
        let config = PreloadConfig {
            exclude: vec!["**/legacy-*.js".into()],
            ..PreloadConfig::default()
        };
        let options = config.to_options().unwrap();

        let legacy = BundleEntry::Chunk(ChunkEntry {
            file_name: "assets/legacy-0000.js".into(),
            ..ChunkEntry::default()
        });
        let index = BundleEntry::Chunk(ChunkEntry {
            file_name: "assets/index-a1b2.js".into(),
            ..ChunkEntry::default()
        });
        assert!(!options.should_preload(&legacy));
        assert!(options.should_preload(&index));
    }
}
