//! DOM collaborator: parse an entry document, read its links and append new ones.

mod attrs;
mod dom;
mod inject;

pub use dom::{DomTraversal, DomVisitor, HtmlDocument, walk};
pub use inject::{inject_links, inject_module_preload, inject_stylesheet};
