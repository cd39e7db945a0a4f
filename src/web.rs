//! [`HeadDocument`] for the browser's DOM, via [`web_sys`].

use crate::{diff::EffectSummary, dom::HeadDocument, manager::HeadManager};
use tracing::instrument;
use wasm_bindgen::{JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, Node};

impl HeadDocument for Document {
	type Element = Element;
	type Error = JsValue;

	fn title(&self) -> String {
		Document::title(self)
	}

	fn set_title(&self, title: &str) {
		Document::set_title(self, title)
	}

	fn head(&self) -> Element {
		Document::head(self).expect_throw("headkit: The document has no <head>.").into()
	}

	fn html(&self) -> Element {
		self.document_element().expect_throw("headkit: The document has no root element.")
	}

	fn body(&self) -> Element {
		Document::body(self).expect_throw("headkit: The document has no <body>.").into()
	}

	fn create_element(&self, tag_name: &str) -> Result<Element, JsValue> {
		Document::create_element(self, tag_name)
	}

	fn tag_name(&self, element: &Element) -> String {
		element.tag_name()
	}

	fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
		element.get_attribute(name)
	}

	fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
		element.set_attribute(name, value)
	}

	fn remove_attribute(&self, element: &Element, name: &str) -> Result<(), JsValue> {
		element.remove_attribute(name)
	}

	fn set_text_content(&self, element: &Element, text: &str) {
		element.set_text_content(Some(text))
	}

	fn set_inner_html(&self, element: &Element, html: &str) {
		element.set_inner_html(html)
	}

	fn find_head_meta(&self, name: &str) -> Result<Option<Element>, JsValue> {
		HeadDocument::head(self).query_selector(&format!("meta[name=\"{}\"]", name.replace('\\', "\\\\").replace('"', "\\\"")))
	}

	fn previous_element_sibling(&self, element: &Element) -> Option<Element> {
		element.previous_element_sibling()
	}

	fn append_child(&self, parent: &Element, child: &Element) -> Result<(), JsValue> {
		parent.append_child(child).map(drop)
	}

	fn insert_before(&self, parent: &Element, child: &Element, reference: &Element) -> Result<(), JsValue> {
		let reference: &Node = reference;
		parent.insert_before(child, Some(reference)).map(drop)
	}

	fn remove(&self, element: &Element) -> Result<(), JsValue> {
		element.remove();
		Ok(())
	}

	fn is_equal_node(&self, a: &Element, b: &Element) -> bool {
		let b: &Node = b;
		a.is_equal_node(Some(b))
	}
}

/// Applies `manager`'s state to the current window's document.
///
/// # Panics
///
/// Iff there is no window or it has no document.
#[instrument(skip(manager))]
pub fn effect_window(manager: &HeadManager) -> EffectSummary {
	let document = web_sys::window()
		.expect_throw("headkit: No `window` found.")
		.document()
		.expect_throw("headkit: The window has no document.");
	manager.effect(&document)
}
