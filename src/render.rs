//! Rendering a [`CanonicalState`] to markup for server output.
//!
//! The output embeds the sentinel counter and the managed attribute markers,
//! so that [`effect`](`crate::diff::effect`) can pick up where the server left off once the page is live.

use crate::{
	element::{AttrValue, Attributes, Content, HeadElement, CHILDREN, INNER_HTML, KEY, TEXT_CONTENT},
	state::{managed_attribute_names, CanonicalState},
	HEAD_ATTRS_KEY, HEAD_COUNT_KEY,
};
use std::borrow::Cow;
use tracing::instrument;

/// Markup fragments for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedHead {
	/// Inner HTML of `<head>`.
	pub head: String,
	/// Attributes for `<html>`, with a leading space if not empty.
	pub html_attrs: String,
	/// Attributes for `<body>`, with a leading space if not empty.
	pub body_attrs: String,
}

/// Escapes `&`, `"`, `'`, `<` and `>`.
///
/// Carriage returns become `&#13;` too, since parsing folds a literal `\r\n` into `\n`.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
	if !text.contains(|c: char| matches!(c, '&' | '"' | '\'' | '<' | '>' | '\r')) {
		return Cow::Borrowed(text);
	}

	let mut escaped = String::with_capacity(text.len() + 8);
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'\r' => escaped.push_str("&#13;"),
			c => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

/// Renders attributes as ` name="value"` pairs.
///
/// Pseudo-attributes (`children`, `key`, `textContent`, `innerHTML`) as well as `false` and absent values are omitted.
/// `true` renders as a bare attribute name.
#[must_use]
pub fn stringify_attributes(attrs: &Attributes) -> String {
	let mut rendered = String::new();
	for (name, value) in attrs {
		if matches!(name.as_str(), CHILDREN | KEY | TEXT_CONTENT | INNER_HTML) {
			continue;
		}
		match value {
			AttrValue::Bool(false) | AttrValue::Absent => (),
			AttrValue::Bool(true) => {
				rendered.push(' ');
				rendered.push_str(&escape_html(name));
			}
			AttrValue::Text(value) => rendered.push_str(&format!(" {}=\"{}\"", escape_html(name), escape_html(value))),
		}
	}
	rendered
}

fn stringify_with_marker(attrs: &Attributes) -> String {
	let mut rendered = stringify_attributes(attrs);
	let managed = managed_attribute_names(attrs);
	if !managed.is_empty() {
		rendered.push_str(&format!(" {}=\"{}\"", HEAD_ATTRS_KEY, escape_html(&managed.join(","))));
	}
	rendered
}

fn element_to_string(element: &HeadElement) -> String {
	let ty = element.ty;
	let attrs = stringify_attributes(&element.attrs);
	if ty.is_void() {
		return format!("<{}{}>", ty, attrs);
	}

	let content = match element.content() {
		Some(Content::Text(text)) if !ty.is_raw_text() => escape_html(text),
		Some(Content::Text(raw) | Content::Html(raw)) => Cow::Borrowed(raw),
		None => Cow::Borrowed(""),
	};
	format!("<{ty}{attrs}>{content}</{ty}>", ty = ty, attrs = attrs, content = content)
}

/// Renders `state` for server output.
///
/// The title comes first, then each element, then the sentinel counting them.
#[must_use]
#[instrument(skip(state))]
pub fn render_to_string(state: &CanonicalState) -> RenderedHead {
	let mut head = String::new();

	if let Some(title) = &state.title {
		head.push_str(&format!("<title>{}</title>", escape_html(title)));
	}

	for element in &state.elements {
		head.push_str(&element_to_string(element));
	}

	head.push_str(&format!("<meta name=\"{}\" content=\"{}\">", HEAD_COUNT_KEY, state.elements.len()));

	RenderedHead {
		head,
		html_attrs: stringify_with_marker(&state.html_attrs),
		body_attrs: stringify_with_marker(&state.body_attrs),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::ElementType;

	#[test]
	fn escapes_all_five() {
		assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
		assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
		assert_eq!(escape_html("line1\r\nline2"), "line1&#13;\nline2");
	}

	#[test]
	fn stringify_skips_pseudo_and_false_attributes() {
		let element = HeadElement::new(ElementType::Script)
			.with_attr("key", "k")
			.with_attr("src", "/a.js?x=1&y=2")
			.with_attr("async", true)
			.with_attr("defer", false)
			.with_attr("nonce", AttrValue::Absent)
			.with_attr("children", "ignored")
			.with_text_content("ignored too");
		assert_eq!(stringify_attributes(&element.attrs), r#" src="/a.js?x=1&amp;y=2" async"#);
	}

	#[test]
	fn void_and_content_elements() {
		assert_eq!(element_to_string(&HeadElement::new(ElementType::Meta).with_attr("charset", "utf-8")), r#"<meta charset="utf-8">"#);
		assert_eq!(element_to_string(&HeadElement::new(ElementType::Style).with_text_content("a>b{}")), "<style>a>b{}</style>");
		assert_eq!(element_to_string(&HeadElement::new(ElementType::Script).with_inner_html("1<2")), "<script>1<2</script>");
		assert_eq!(element_to_string(&HeadElement::new(ElementType::Script).with_attr("src", "/a.js")), r#"<script src="/a.js"></script>"#);
	}
}
