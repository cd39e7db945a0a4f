//! Element identity for deduplication.
//!
//! An element's key is the first of [`KEY_ATTRIBUTES`] it declares.
//! Two elements of the same type with equal keys describe the same piece of head content,
//! so the later declaration supersedes the earlier one.

use crate::{
	dom::HeadDocument,
	element::{AttrValue, Attributes},
};
use std::borrow::Cow;

/// Identity attributes, by descending priority.
pub const KEY_ATTRIBUTES: [&str; 4] = ["key", "id", "name", "property"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementKey<'a> {
	pub name: &'static str,
	pub value: Cow<'a, AttrValue>,
}

impl<'a> ElementKey<'a> {
	/// Extracts the key of a declaration. Absent values don't count as declared.
	#[must_use]
	pub fn from_declaration(attrs: &'a Attributes) -> Option<Self> {
		KEY_ATTRIBUTES.iter().find_map(|&name| match attrs.get(name) {
			Some(value) if !value.is_absent() => Some(Self { name, value: Cow::Borrowed(value) }),
			_ => None,
		})
	}

	/// Extracts the key of a node in a live document.
	///
	/// `key` is never written to the DOM, so this usually falls through to `id`, `name` or `property`.
	#[must_use]
	pub fn from_dom_node<D: HeadDocument + ?Sized>(document: &D, element: &D::Element) -> Option<ElementKey<'static>> {
		KEY_ATTRIBUTES.iter().find_map(|&name| {
			document.get_attribute(element, name).map(|value| ElementKey {
				name,
				value: Cow::Owned(AttrValue::Text(value)),
			})
		})
	}
}

/// Where an [`ElementKey`] is read from. The variant is always known statically by the caller.
pub enum KeySource<'a, D: HeadDocument + ?Sized> {
	FromDeclaration(&'a Attributes),
	FromDomNode { document: &'a D, element: &'a D::Element },
}

impl<'a, D: HeadDocument + ?Sized> KeySource<'a, D> {
	#[must_use]
	pub fn element_key(self) -> Option<ElementKey<'a>> {
		match self {
			Self::FromDeclaration(attrs) => ElementKey::from_declaration(attrs),
			Self::FromDomNode { document, element } => ElementKey::from_dom_node(document, element),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::{ElementType, HeadElement};

	#[test]
	fn priority_order() {
		let element = HeadElement::new(ElementType::Meta).with_attr("property", "og:title").with_attr("name", "title").with_attr("content", "x");
		let key = ElementKey::from_declaration(&element.attrs).unwrap();
		assert_eq!(key.name, "name");
		assert_eq!(*key.value, AttrValue::from("title"));

		let element = element.with_attr("key", "k");
		assert_eq!(ElementKey::from_declaration(&element.attrs).unwrap().name, "key");
	}

	#[test]
	fn absent_values_are_skipped() {
		let element = HeadElement::new(ElementType::Meta).with_attr("id", AttrValue::Absent).with_attr("property", "og:image");
		assert_eq!(ElementKey::from_declaration(&element.attrs).unwrap().name, "property");

		let element = HeadElement::new(ElementType::Meta).with_attr("charset", "utf-8");
		assert_eq!(ElementKey::from_declaration(&element.attrs), None);
	}
}
