//! Error type shared by the manifest readers, the HTML layer and the transform.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::selection::SelectionError;

/// Errors produced while loading build output or rewriting an HTML entry document.
#[derive(Debug, Error)]
pub enum PreloadError {
  /// The manifest file exists but could not be read.
  #[error("failed to read manifest {}: {source}", .path.display())]
  ManifestRead {
    /// Manifest path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: std::io::Error,
  },

  /// The manifest file is not valid JSON for the requested format.
  #[error("failed to parse manifest {}: {source}", .path.display())]
  ManifestParse {
    /// Manifest path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },

  /// In-memory manifest JSON is invalid or has an unexpected shape.
  #[error("invalid manifest JSON")]
  ManifestJson(#[from] serde_json::Error),

  /// A bundle entry is stored under a key that differs from its own file name.
  #[error("manifest key `{key}` does not match entry file name `{file_name}`")]
  ManifestMismatch {
    /// Key the entry was stored under.
    key: String,
    /// File name recorded on the entry itself.
    file_name: String,
  },

  /// The HTML parser could not consume the document.
  #[error("failed to parse HTML document")]
  HtmlParse(#[source] std::io::Error),

  /// The rewritten DOM could not be serialized back to markup.
  #[error("failed to serialize HTML document")]
  HtmlSerialize(#[source] std::io::Error),

  /// A selection pattern could not be compiled.
  #[error(transparent)]
  Selection(#[from] SelectionError),
}

impl PreloadError {
  /// Attach the manifest location to a JSON error raised while parsing its contents.
  pub(crate) fn in_manifest(self, path: &Path) -> Self {
    match self {
      PreloadError::ManifestJson(source) => PreloadError::ManifestParse {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    }
  }
}

/// Result alias used across the crate.
pub type Result<T, E = PreloadError> = std::result::Result<T, E>;
