//! The document seam: everything the applier needs from a live DOM, plus the element factory built on top of it.

use crate::element::{HeadElement, CHILDREN, INNER_HTML, KEY, TEXT_CONTENT};
use core::fmt::Debug;

/// A live document that managed head content can be applied to.
///
/// Operations the host platform may reject return [`Result`]s.
/// The applier logs those failures and carries on with the next element.
///
/// Missing `<html>`, `<head>` or `<body>` elements are a broken precondition, and implementations may panic on them.
pub trait HeadDocument {
	/// A cheap handle to an element. [`Clone`] must preserve identity.
	type Element: Clone + Debug;
	type Error: Debug;

	/// The title as `document.title` reports it, with whitespace already [normalized](`crate::diff::normalize_title`).
	fn title(&self) -> String;
	fn set_title(&self, title: &str);

	fn head(&self) -> Self::Element;
	/// The root `<html>` element.
	fn html(&self) -> Self::Element;
	fn body(&self) -> Self::Element;

	/// Creates a detached element.
	fn create_element(&self, tag_name: &str) -> Result<Self::Element, Self::Error>;
	/// The element's tag name, in whichever case the document reports it.
	fn tag_name(&self, element: &Self::Element) -> String;

	fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
	fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<(), Self::Error>;
	fn remove_attribute(&self, element: &Self::Element, name: &str) -> Result<(), Self::Error>;
	fn set_text_content(&self, element: &Self::Element, text: &str);
	fn set_inner_html(&self, element: &Self::Element, html: &str);

	/// Finds the first `<meta name="…">` with the given name inside `<head>`.
	fn find_head_meta(&self, name: &str) -> Result<Option<Self::Element>, Self::Error>;
	fn previous_element_sibling(&self, element: &Self::Element) -> Option<Self::Element>;

	fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<(), Self::Error>;
	fn insert_before(&self, parent: &Self::Element, child: &Self::Element, reference: &Self::Element) -> Result<(), Self::Error>;
	/// Detaches the element from its parent.
	fn remove(&self, element: &Self::Element) -> Result<(), Self::Error>;

	/// Structural equality: same tag name, same attribute set, same content.
	fn is_equal_node(&self, a: &Self::Element, b: &Self::Element) -> bool;
}

/// Materializes a declaration as a detached node.
///
/// [`KEY`] and [`CHILDREN`] are never written. `false` and absent attributes are skipped.
/// [`TEXT_CONTENT`] and [`INNER_HTML`] become the node's content instead of attributes.
///
/// # Errors
///
/// Iff the document rejects the element or one of its attributes.
pub fn create_element<D: HeadDocument + ?Sized>(document: &D, element: &HeadElement) -> Result<D::Element, D::Error> {
	let node = document.create_element(element.ty.as_str())?;

	for (name, value) in &element.attrs {
		if name == KEY || name == CHILDREN {
			continue;
		}

		match name.as_str() {
			TEXT_CONTENT => {
				if let Some(text) = value.to_text() {
					document.set_text_content(&node, &text)
				}
			}
			INNER_HTML => {
				if let Some(html) = value.to_text() {
					document.set_inner_html(&node, &html)
				}
			}
			_ => {
				if let Some(value) = value.to_attribute_value() {
					document.set_attribute(&node, name, value)?
				}
			}
		}
	}

	Ok(node)
}
