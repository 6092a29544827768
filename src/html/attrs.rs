use html5ever::tendril::StrTendril;
use markup5ever::{Attribute, ExpandedName, LocalName, QualName, namespace_url, ns};

/// Read-only view over an element's attribute list.
pub struct Attrs<'a> {
  attributes: &'a [Attribute],
}

impl<'a> Attrs<'a> {
  pub fn new(attributes: &'a [Attribute]) -> Self {
    Self { attributes }
  }

  pub fn get(&self, name: ExpandedName) -> Option<&'a str> {
    self
      .attributes
      .iter()
      .find(|attr| attr.name.expanded() == name)
      .map(|attr| &*attr.value)
  }
}

/// Build an attribute in the null namespace, as the parser produces for HTML elements.
pub fn attribute(local: LocalName, value: &str) -> Attribute {
  Attribute {
    name: QualName::new(None, ns!(), local),
    value: StrTendril::from_slice(value),
  }
}
