//! Reading previously applied state back out of a live document.
//!
//! Everything here also works on freshly hydrated server markup, as long as it was produced by [`render_to_string`](`crate::render::render_to_string`).

use crate::{dom::HeadDocument, element::ElementType, HEAD_ATTRS_KEY, HEAD_COUNT_KEY};
use tracing::{instrument, warn};

/// The `<meta name="head:count">` node that closes the managed region of `<head>`.
#[derive(Debug, Clone)]
pub struct Sentinel<E> {
	pub element: E,
	/// How many elements directly precede the sentinel and are managed.
	pub count: usize,
}

/// Finds the sentinel.
///
/// # Errors
///
/// Iff the document fails the lookup.
#[instrument(skip(document))]
pub fn load_sentinel<D: HeadDocument + ?Sized>(document: &D) -> Result<Option<Sentinel<D::Element>>, D::Error> {
	Ok(document.find_head_meta(HEAD_COUNT_KEY)?.map(|element| {
		let count = match document.get_attribute(&element, "content") {
			Some(content) => content.trim().parse().unwrap_or_else(|_| {
				warn!("Unreadable {} content {:?}. Assuming no managed elements.", HEAD_COUNT_KEY, content);
				0
			}),
			None => 0,
		};
		Sentinel { element, count }
	}))
}

/// Walks `sentinel.count` element siblings backwards from the sentinel and collects those of type `ty`.
///
/// Siblings of other types still count towards the step budget.
/// The result is in reverse document order.
#[must_use]
pub fn load_managed_elements<D: HeadDocument + ?Sized>(document: &D, sentinel: &Sentinel<D::Element>, ty: ElementType) -> Vec<D::Element> {
	let mut managed = vec![];
	let mut current = document.previous_element_sibling(&sentinel.element);
	for _ in 0..sentinel.count {
		let element = match current {
			Some(element) => element,
			None => {
				warn!("The managed region ended early: {} declares more elements than precede it.", HEAD_COUNT_KEY);
				break;
			}
		};
		if document.tag_name(&element).eq_ignore_ascii_case(ty.as_str()) {
			managed.push(element.clone());
		}
		current = document.previous_element_sibling(&element);
	}
	managed
}

/// Lists the distinct known element types present in the managed region, nearest to the sentinel first.
#[must_use]
pub fn load_managed_types<D: HeadDocument + ?Sized>(document: &D, sentinel: &Sentinel<D::Element>) -> Vec<ElementType> {
	let mut types = vec![];
	let mut current = document.previous_element_sibling(&sentinel.element);
	for _ in 0..sentinel.count {
		let element = match current {
			Some(element) => element,
			None => break,
		};
		if let Some(ty) = ElementType::from_tag_name(&document.tag_name(&element)) {
			if !types.contains(&ty) {
				types.push(ty)
			}
		}
		current = document.previous_element_sibling(&element);
	}
	types
}

/// Reads the `data-head-attrs` marker: the attribute names set on `element` by the previous application.
#[must_use]
pub fn load_managed_attribute_names<D: HeadDocument + ?Sized>(document: &D, element: &D::Element) -> Vec<String> {
	document
		.get_attribute(element, HEAD_ATTRS_KEY)
		.map(|marker| marker.split(',').filter(|name| !name.is_empty()).map(ToOwned::to_owned).collect())
		.unwrap_or_default()
}
