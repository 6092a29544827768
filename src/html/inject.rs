//! Link elements appended to an entry document.

use std::cell::RefCell;

use markup5ever::{QualName, local_name, namespace_url, ns};
use markup5ever_rcdom::{Handle, Node, NodeData};

use crate::html::attrs::attribute;
use crate::html::dom::HtmlDocument;
use crate::models::LinkSets;

/// Append `<link rel="modulepreload" href="{path}">` to the document head.
pub fn inject_module_preload(document: &mut HtmlDocument, path: &str) {
  document.append_to_head(link_element("modulepreload", path));
}

/// Append `<link rel="stylesheet" href="{path}">` to the document head.
pub fn inject_stylesheet(document: &mut HtmlDocument, path: &str) {
  document.append_to_head(link_element("stylesheet", path));
}

/// Inject every computed link: modules first, then stylesheets, each in sorted order.
pub fn inject_links(document: &mut HtmlDocument, links: &LinkSets) {
  for path in &links.modules {
    inject_module_preload(document, path);
  }
  for path in &links.stylesheets {
    inject_stylesheet(document, path);
  }
}

fn link_element(rel: &str, href: &str) -> Handle {
  Node::new(NodeData::Element {
    name: QualName::new(None, ns!(html), local_name!("link")),
    attrs: RefCell::new(vec![
      attribute(local_name!("rel"), rel),
      attribute(local_name!("href"), href),
    ]),
    template_contents: RefCell::new(None),
    mathml_annotation_xml_integration_point: false,
  })
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  fn links(modules: &[&str], stylesheets: &[&str]) -> LinkSets {
    LinkSets {
      modules: modules.iter().map(|value| value.to_string()).collect(),
      stylesheets: stylesheets.iter().map(|value| value.to_string()).collect(),
    }
  }

  #[test]
  fn appends_modules_before_stylesheets_with_sibling_indentation() {
    let mut document = HtmlDocument::parse(
      "<!DOCTYPE html>\n<html>\n  <head>\n    <title>App</title>\n  </head>\n  <body></body>\n</html>\n",
    )
    .unwrap();

    inject_links(
      &mut document,
      &links(&["/vendor-c3d4.js", "/index-a1b2.js"], &["/vendor-e5f6.css"]),
    );

    assert_eq!(
      document.serialize().unwrap(),
      "<!DOCTYPE html><html><head>\n    <title>App</title>\n    \
<link rel=\"modulepreload\" href=\"/index-a1b2.js\">\n    \
<link rel=\"modulepreload\" href=\"/vendor-c3d4.js\">\n    \
<link rel=\"stylesheet\" href=\"/vendor-e5f6.css\">\n  </head>\n  <body>\n\n</body></html>"
    );
  }

  #[test]
  fn keeps_existing_children_in_place() {
    let mut document =
      HtmlDocument::parse("<head><meta charset=\"utf-8\"><link rel=\"icon\" href=\"/favicon.ico\"></head>")
        .unwrap();

    inject_stylesheet(&mut document, "/index-e5f6.css");

    assert_eq!(
      document.serialize().unwrap(),
      "<html><head><meta charset=\"utf-8\"><link rel=\"icon\" href=\"/favicon.ico\">\
<link rel=\"stylesheet\" href=\"/index-e5f6.css\"></head><body></body></html>"
    );
  }

  #[test]
  fn injected_links_are_reported_as_existing() {
    let mut document = HtmlDocument::parse("<p>x</p>").unwrap();
    inject_module_preload(&mut document, "/index-a1b2.js");

    assert!(document.existing_links().contains("/index-a1b2.js"));
  }
}
