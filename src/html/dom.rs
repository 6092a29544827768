//! Parsing, walking and serializing an entry document.

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::serialize::SerializeOpts;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document, serialize};
use markup5ever::{expanded_name, local_name, namespace_url, ns};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

use crate::error::{PreloadError, Result};
use crate::html::attrs::Attrs;
use crate::models::ExistingLinkSet;

/// Whether [`walk`] should keep going after a node.
#[derive(Debug, PartialEq, Eq)]
pub enum DomTraversal {
  /// Visit the node's children and the rest of the tree.
  Continue,
  /// End the walk immediately.
  Stop,
}

/// Callback invoked for every node reached by [`walk`].
pub trait DomVisitor {
  /// Inspect one node.
  fn visit_node(&mut self, node: &Handle) -> DomTraversal;
}

/// Depth-first walk in document order.
pub fn walk(root: &Handle, visitor: &mut impl DomVisitor) {
  let mut stack = vec![root.clone()];
  while let Some(node) = stack.pop() {
    if visitor.visit_node(&node) == DomTraversal::Stop {
      break;
    }

    let children = node.children.borrow();
    stack.extend(children.iter().rev().cloned());
  }
}

/// Parsed entry document, exclusively owned by one transform call.
pub struct HtmlDocument {
  dom: RcDom,
}

impl HtmlDocument {
  /// Parse markup into a DOM. The parser recovers from malformed markup the way browsers
  /// do, so only failures to consume the input surface as errors.
  ///
  /// Scripting is disabled so `<noscript>` contents are parsed as elements and their
  /// links count as existing.
  pub fn parse(html: &str) -> Result<Self> {
    let opts = ParseOpts {
      tree_builder: TreeBuilderOpts {
        scripting_enabled: false,
        ..TreeBuilderOpts::default()
      },
      ..ParseOpts::default()
    };
    let mut bytes = html.as_bytes();
    let dom = parse_document(RcDom::default(), opts)
      .from_utf8()
      .read_from(&mut bytes)
      .map_err(PreloadError::HtmlParse)?;
    Ok(Self { dom })
  }

  /// `href` values of every `<link>` element in the document.
  pub fn existing_links(&self) -> ExistingLinkSet {
    let mut visitor = LinkHrefCollector::default();
    walk(&self.dom.document, &mut visitor);
    visitor.hrefs
  }

  /// The `<head>` element, or the document root when the parser did not create one.
  pub fn head(&self) -> Handle {
    let mut visitor = HeadFinder::default();
    walk(&self.dom.document, &mut visitor);
    visitor.head.unwrap_or_else(|| self.dom.document.clone())
  }

  /// Append `element` as the last element of `<head>`.
  ///
  /// When the head's children are laid out one per line, the new element receives the
  /// same indentation and the whitespace before `</head>` stays last.
  pub fn append_to_head(&mut self, element: Handle) {
    let head = self.head();
    let mut children = head.children.borrow_mut();

    let ends_with_whitespace = children
      .last()
      .is_some_and(|last| whitespace_text(last).is_some());
    let trailing = if ends_with_whitespace {
      children.pop()
    } else {
      None
    };
    let indent = children
      .iter()
      .find_map(whitespace_text)
      .or_else(|| trailing.as_ref().and_then(whitespace_text))
      .filter(|text| text.contains('\n'));

    if let Some(indent) = indent {
      children.push(adopt(&head, text_node(&indent)));
    }
    children.push(adopt(&head, element));
    if let Some(trailing) = trailing {
      children.push(trailing);
    }
  }

  /// Serialize the document back to markup.
  pub fn serialize(&self) -> Result<String> {
    let document: SerializableHandle = self.dom.document.clone().into();
    let mut output = Vec::new();
    serialize(&mut output, &document, SerializeOpts::default())
      .map_err(PreloadError::HtmlSerialize)?;
    String::from_utf8(output).map_err(|err| {
      PreloadError::HtmlSerialize(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
  }
}

fn adopt(parent: &Handle, child: Handle) -> Handle {
  child.parent.set(Some(Rc::downgrade(parent)));
  child
}

fn text_node(contents: &str) -> Handle {
  Node::new(NodeData::Text {
    contents: RefCell::new(StrTendril::from_slice(contents)),
  })
}

fn whitespace_text(node: &Handle) -> Option<String> {
  match &node.data {
    NodeData::Text { contents } => {
      let contents = contents.borrow();
      contents.trim().is_empty().then(|| String::from(&**contents))
    }
    _ => None,
  }
}

#[derive(Default)]
struct LinkHrefCollector {
  hrefs: ExistingLinkSet,
}

impl DomVisitor for LinkHrefCollector {
  fn visit_node(&mut self, node: &Handle) -> DomTraversal {
    if let NodeData::Element { name, attrs, .. } = &node.data
      && name.expanded() == expanded_name!(html "link")
    {
      let attrs = attrs.borrow();
      if let Some(href) = Attrs::new(&attrs).get(expanded_name!("", "href")) {
        self.hrefs.insert(href.to_string());
      }
    }
    DomTraversal::Continue
  }
}

#[derive(Default)]
struct HeadFinder {
  head: Option<Handle>,
}

impl DomVisitor for HeadFinder {
  fn visit_node(&mut self, node: &Handle) -> DomTraversal {
    match &node.data {
      NodeData::Element { name, .. } if name.expanded() == expanded_name!(html "head") => {
        self.head = Some(node.clone());
        DomTraversal::Stop
      }
      _ => DomTraversal::Continue,
    }
  }
}
