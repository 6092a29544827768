#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod config;
pub mod error;
pub mod html;
pub mod links;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod options;
pub mod selection;
pub mod transform;

pub use asset_paths::PublicPathResolver;
pub use error::{PreloadError, Result};
pub use links::build_link_sets;
pub use models::{BundleEntry, BundleManifest, LinkSets};
pub use options::{PreloadOptions, ShouldPreload};
pub use transform::PreloadTransform;
