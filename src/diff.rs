//! Applying a [`CanonicalState`] to a live document with as few mutations as possible.
//!
//! Managed nodes live directly before the sentinel `<meta name="head:count">` in `<head>`, whose `content` records how many there are.
//! Each update only removes managed nodes that have no structurally equal counterpart in the new state,
//! and only inserts nodes that have no structurally equal managed predecessor.
//! Unchanged nodes keep their identity, so stylesheets aren't reloaded and scripts don't run again.
//!
//! Attributes on `<html>` and `<body>` are tracked through a `data-head-attrs` marker listing the names set last time.
//!
//! Updates aren't transactional: A failed DOM operation is logged and the remaining work continues.

use crate::{
	dom::{create_element, HeadDocument},
	element::{Attributes, ElementType, HeadElement},
	key::KeySource,
	load::{load_managed_attribute_names, load_managed_elements, load_managed_types, load_sentinel, Sentinel},
	state::{managed_attribute_names, CanonicalState},
	HEAD_ATTRS_KEY, HEAD_COUNT_KEY,
};
use hashbrown::HashSet;
use tracing::{debug, error, info, instrument, trace, trace_span};

/// What a call to [`effect`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectSummary {
	pub title_changed: bool,
	/// Attribute writes and removals on `<html>` and `<body>`, including the marker.
	pub attributes_written: usize,
	/// Managed nodes kept as they were.
	pub preserved: usize,
	pub removed: usize,
	pub inserted: usize,
}

impl EffectSummary {
	/// `true` iff nothing was written to the document.
	#[must_use]
	pub fn is_noop(&self) -> bool {
		!self.title_changed && self.attributes_written == 0 && self.removed == 0 && self.inserted == 0
	}
}

/// Applies `state` to `document`.
///
/// Applying the same state twice in a row performs no DOM writes the second time.
#[instrument(skip(document, state))]
pub fn effect<D: HeadDocument + ?Sized>(document: &D, state: &CanonicalState) -> EffectSummary {
	let mut summary = EffectSummary::default();

	if let Some(title) = &state.title {
		if normalize_title(title) != document.title() {
			document.set_title(title);
			summary.title_changed = true;
		}
	}

	summary.attributes_written += sync_attributes(document, &document.html(), &state.html_attrs);
	summary.attributes_written += sync_attributes(document, &document.body(), &state.body_attrs);

	let grouped = state.elements_by_type();

	// Types that were managed before but aren't declared anymore still need their nodes removed.
	let vanished = match load_sentinel(document) {
		Ok(Some(sentinel)) => load_managed_types(document, &sentinel).into_iter().filter(|ty| !grouped.contains_key(ty)).collect(),
		Ok(None) => vec![],
		Err(error) => {
			error!("Failed to look up the {} sentinel: {:?}", HEAD_COUNT_KEY, error);
			vec![]
		}
	};

	for (ty, elements) in &grouped {
		update_elements(document, *ty, elements, &mut summary);
	}
	for ty in vanished {
		update_elements(document, ty, &[], &mut summary);
	}

	info!(
		"Applied head state: {} preserved, {} removed, {} inserted, {} attribute write(s).",
		summary.preserved, summary.removed, summary.inserted, summary.attributes_written
	);
	summary
}

/// What `document.title` reports after setting it to `title`: ASCII whitespace stripped and collapsed into single spaces.
#[must_use]
pub fn normalize_title(title: &str) -> String {
	title.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the number of attribute writes.
#[instrument(skip(document, attrs))]
fn sync_attributes<D: HeadDocument + ?Sized>(document: &D, element: &D::Element, attrs: &Attributes) -> usize {
	let mut writes = 0;

	let managed = managed_attribute_names(attrs);
	let current: HashSet<&str> = managed.iter().copied().collect();
	for previous in load_managed_attribute_names(document, element) {
		if !current.contains(previous.as_str()) {
			trace!("Removing formerly managed attribute {:?}.", previous);
			writes += remove_attribute(document, element, &previous);
		}
	}

	for (name, value) in attrs {
		if value.is_absent() {
			continue;
		}
		match value.to_attribute_value() {
			None => writes += remove_attribute(document, element, name),
			Some(value) => {
				if document.get_attribute(element, name).as_deref() != Some(value) {
					match document.set_attribute(element, name, value) {
						Ok(()) => writes += 1,
						Err(error) => {
							if cfg!(feature = "dangerous-logging") {
								error!("Failed to set attribute {:?}={:?}: {:?}", name, value, error)
							} else {
								error!("Failed to set attribute {:?}: {:?}", name, error)
							}
						}
					}
				}
			}
		}
	}

	if managed.is_empty() {
		writes += remove_attribute(document, element, HEAD_ATTRS_KEY);
	} else {
		let marker = managed.join(",");
		if document.get_attribute(element, HEAD_ATTRS_KEY).as_deref() != Some(marker.as_str()) {
			match document.set_attribute(element, HEAD_ATTRS_KEY, &marker) {
				Ok(()) => writes += 1,
				Err(error) => error!("Failed to write the {} marker: {:?}", HEAD_ATTRS_KEY, error),
			}
		}
	}

	writes
}

/// Returns the number of attribute writes, which is zero if the attribute wasn't present.
fn remove_attribute<D: HeadDocument + ?Sized>(document: &D, element: &D::Element, name: &str) -> usize {
	if document.get_attribute(element, name).is_none() {
		return 0;
	}
	match document.remove_attribute(element, name) {
		Ok(()) => 1,
		Err(error) => {
			error!("Failed to remove attribute {:?}: {:?}", name, error);
			0
		}
	}
}

#[instrument(skip(document, elements, summary), fields(count = elements.len()))]
fn update_elements<D: HeadDocument + ?Sized>(document: &D, ty: ElementType, elements: &[&HeadElement], summary: &mut EffectSummary) {
	let head = document.head();
	let sentinel = match load_sentinel(document) {
		Ok(Some(sentinel)) => sentinel,
		Ok(None) => match create_sentinel(document, &head) {
			Ok(sentinel) => sentinel,
			Err(error) => return error!("Failed to create the {} sentinel: {:?}", HEAD_COUNT_KEY, error),
		},
		Err(error) => return error!("Failed to look up the {} sentinel: {:?}", HEAD_COUNT_KEY, error),
	};

	let mut old = load_managed_elements(document, &sentinel, ty);

	let mut new = Vec::with_capacity(elements.len());
	for element in elements {
		match create_element(document, element) {
			Ok(node) => new.push(node),
			Err(error) => error!("Failed to create <{}>: {:?}", ty, error),
		}
	}

	let created = new.len();
	new.retain(|node| match old.iter().position(|old| document.is_equal_node(old, node)) {
		Some(i) => {
			old.remove(i);
			false
		}
		None => true,
	});
	let preserved = created - new.len();

	let mut removed = 0;
	for stale in &old {
		let span = trace_span!("Removing stale element", %ty);
		let _enter = span.enter();
		if cfg!(feature = "dangerous-logging") {
			trace!("Key: {:?}", KeySource::FromDomNode { document, element: stale }.element_key());
		}
		match document.remove(stale) {
			Ok(()) => removed += 1,
			Err(error) => error!("Failed to remove <{}>: {:?}", ty, error),
		}
	}

	let mut inserted = 0;
	for node in &new {
		match document.insert_before(&head, node, &sentinel.element) {
			Ok(()) => inserted += 1,
			Err(error) => error!("Failed to insert <{}>: {:?}", ty, error),
		}
	}

	let count = sentinel.count.saturating_sub(removed) + inserted;
	if count != sentinel.count {
		if let Err(error) = document.set_attribute(&sentinel.element, "content", &count.to_string()) {
			error!("Failed to update the {} sentinel to {}: {:?}", HEAD_COUNT_KEY, count, error)
		}
	}

	debug!("<{}>: {} preserved, {} removed, {} inserted.", ty, preserved, removed, inserted);
	summary.preserved += preserved;
	summary.removed += removed;
	summary.inserted += inserted;
}

fn create_sentinel<D: HeadDocument + ?Sized>(document: &D, head: &D::Element) -> Result<Sentinel<D::Element>, D::Error> {
	trace!("Creating the {} sentinel.", HEAD_COUNT_KEY);
	let element = document.create_element(ElementType::Meta.as_str())?;
	document.set_attribute(&element, "name", HEAD_COUNT_KEY)?;
	document.set_attribute(&element, "content", "0")?;
	document.append_child(head, &element)?;
	Ok(Sentinel { element, count: 0 })
}
