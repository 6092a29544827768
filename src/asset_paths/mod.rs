//! Helpers for classifying emitted output files and mapping them to public paths.
//!
//! Filtering and path resolution live in separate submodules so the naming convention
//! and the base-path handling can be tested independently of the bundle graph.

mod filters;
mod public_path;

pub use filters::{
    SCRIPT_PATTERN, STYLESHEET_PATTERN, compile_glob, is_script, is_stylesheet,
};
pub use public_path::PublicPathResolver;
