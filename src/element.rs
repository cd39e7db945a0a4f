//! The shape of a single head declaration: a tag type plus an ordered attribute map.

use core::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};
use indexmap::IndexMap;
use std::borrow::Cow;

/// Pseudo-attribute carrying an element's text content.
pub const TEXT_CONTENT: &str = "textContent";
/// Pseudo-attribute carrying an element's raw inner HTML.
pub const INNER_HTML: &str = "innerHTML";
/// Identity-only attribute. Never written to the DOM or to markup.
pub const KEY: &str = "key";
/// Left over by some component bindings. Never written to markup.
pub const CHILDREN: &str = "children";

/// Attribute maps keep insertion order, which is also the order attributes are written in.
pub type Attributes = IndexMap<String, AttrValue>;

/// The closed vocabulary of declarable head content.
///
/// [`HtmlAttrs`](`ElementType::HtmlAttrs`) and [`BodyAttrs`](`ElementType::BodyAttrs`) don't produce nodes.
/// Their attributes are merged onto `<html>` and `<body>` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
	Title,
	Meta,
	Link,
	Base,
	Style,
	Script,
	HtmlAttrs,
	BodyAttrs,
}

impl ElementType {
	pub const ALL: [Self; 8] = [Self::Title, Self::Meta, Self::Link, Self::Base, Self::Style, Self::Script, Self::HtmlAttrs, Self::BodyAttrs];

	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Meta => "meta",
			Self::Link => "link",
			Self::Base => "base",
			Self::Style => "style",
			Self::Script => "script",
			Self::HtmlAttrs => "htmlAttrs",
			Self::BodyAttrs => "bodyAttrs",
		}
	}

	/// Resolves a tag name as reported by a DOM (any case) to one of the node-bearing types.
	#[must_use]
	pub fn from_tag_name(tag_name: &str) -> Option<Self> {
		Self::ALL.iter().copied().find(|ty| ty.is_node() && ty.as_str().eq_ignore_ascii_case(tag_name))
	}

	/// Whether declarations of this type become nodes inside the managed region of `<head>`.
	#[must_use]
	pub fn is_node(self) -> bool {
		!matches!(self, Self::Title | Self::HtmlAttrs | Self::BodyAttrs)
	}

	/// Void elements are rendered without content or closing tag.
	#[must_use]
	pub fn is_void(self) -> bool {
		matches!(self, Self::Meta | Self::Link | Self::Base)
	}

	/// Raw text elements, whose content is never escaped.
	#[must_use]
	pub fn is_raw_text(self) -> bool {
		matches!(self, Self::Style | Self::Script)
	}

	/// Types deduplicated by [`ElementKey`](`crate::key::ElementKey`) while folding.
	#[must_use]
	pub fn is_keyed(self) -> bool {
		matches!(self, Self::Meta | Self::Base | Self::Script)
	}
}

impl Display for ElementType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown head element type {0:?}")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
	type Err = UnknownElementType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL.iter().copied().find(|ty| ty.as_str() == s).ok_or_else(|| UnknownElementType(s.to_owned()))
	}
}

/// An attribute value as declared by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
	Text(String),
	Bool(bool),
	/// Declared but without value, equivalent to not declaring the attribute except that it still overwrites while merging.
	Absent,
}

static ABSENT: AttrValue = AttrValue::Absent;

impl AttrValue {
	#[must_use]
	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}

	/// The value's string form, as used for titles and text content.
	#[must_use]
	pub fn to_text(&self) -> Option<Cow<'_, str>> {
		match self {
			Self::Text(text) => Some(Cow::Borrowed(text)),
			Self::Bool(true) => Some(Cow::Borrowed("true")),
			Self::Bool(false) => Some(Cow::Borrowed("false")),
			Self::Absent => None,
		}
	}

	/// The value to write into a DOM attribute, or [`None`] if the attribute must not be present.
	///
	/// `true` maps to the empty string, which is also what parsing a bare attribute name yields.
	#[must_use]
	pub fn to_attribute_value(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Bool(true) => Some(""),
			Self::Bool(false) | Self::Absent => None,
		}
	}
}

impl From<&str> for AttrValue {
	fn from(text: &str) -> Self {
		Self::Text(text.to_owned())
	}
}

impl From<String> for AttrValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Absent, Into::into)
	}
}

/// Content rendered between an element's opening and closing tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
	Text(&'a str),
	Html(&'a str),
}

/// One declaration of head content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadElement {
	pub ty: ElementType,
	pub attrs: Attributes,
}

impl HeadElement {
	#[must_use]
	pub fn new(ty: ElementType) -> Self {
		Self { ty, attrs: Attributes::new() }
	}

	#[must_use]
	pub fn title(text: impl Into<String>) -> Self {
		Self::new(ElementType::Title).with_text_content(text)
	}

	#[must_use]
	pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.attrs.insert(name.into(), value.into());
		self
	}

	#[must_use]
	pub fn with_text_content(self, text: impl Into<String>) -> Self {
		self.with_attr(TEXT_CONTENT, text.into())
	}

	#[must_use]
	pub fn with_inner_html(self, html: impl Into<String>) -> Self {
		self.with_attr(INNER_HTML, html.into())
	}

	/// Looks up an attribute, treating undeclared ones as [`AttrValue::Absent`].
	#[must_use]
	pub fn attr(&self, name: &str) -> &AttrValue {
		self.attrs.get(name).unwrap_or(&ABSENT)
	}

	/// Text content takes precedence over inner HTML.
	#[must_use]
	pub fn content(&self) -> Option<Content<'_>> {
		match (self.attr(TEXT_CONTENT), self.attr(INNER_HTML)) {
			(AttrValue::Text(text), _) => Some(Content::Text(text)),
			(AttrValue::Bool(value), _) => Some(Content::Text(if *value { "true" } else { "false" })),
			(AttrValue::Absent, AttrValue::Text(html)) => Some(Content::Html(html)),
			(AttrValue::Absent, AttrValue::Bool(value)) => Some(Content::Html(if *value { "true" } else { "false" })),
			(AttrValue::Absent, AttrValue::Absent) => None,
		}
	}
}
