//! Document head management for component-based UIs.
//!
//! Any number of components declare `<title>`, `<meta>`, `<link>`, `<base>`, `<style>` and `<script>` elements
//! as well as attributes for `<html>` and `<body>` through one shared [`HeadManager`].
//! The manager merges them into one deduplicated [`CanonicalState`](`state::CanonicalState`),
//! which can be [applied](`HeadManager::effect`) to a live document with minimal DOM mutation
//! or [rendered](`HeadManager::render_to_string`) to markup for server output.
//!
//! Server markup carries enough bookkeeping that the first live update after hydration only touches what changed.

#![doc(html_root_url = "https://docs.rs/headkit/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod diff;
pub mod dom;
pub mod element;
pub mod key;
pub mod lifecycle;
pub mod load;
pub mod manager;
pub mod registry;
pub mod render;
pub mod state;
pub mod web;

pub use diff::EffectSummary;
pub use element::{AttrValue, Attributes, ElementType, HeadElement};
pub use manager::HeadManager;
pub use registry::Handle;
pub use render::RenderedHead;

/// `name` of the `<meta>` sentinel that closes the managed region of `<head>`. Its `content` is the number of managed elements.
pub const HEAD_COUNT_KEY: &str = "head:count";

/// Attribute on `<html>` and `<body>` listing the comma-separated names of the attributes set there by head management.
pub const HEAD_ATTRS_KEY: &str = "data-head-attrs";
