//! Folding all registry entries into one canonical view.

use crate::{
	element::{Attributes, ElementType, HeadElement, TEXT_CONTENT},
	key::ElementKey,
	registry::Registry,
};
use indexmap::IndexMap;
use tracing::{instrument, trace};

/// The merged, deduplicated result of all connected declarations.
///
/// Derived on demand by [`compute_state`] and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalState {
	/// The last declared title, if any.
	pub title: Option<String>,
	/// Node-bearing declarations in document order.
	pub elements: Vec<HeadElement>,
	pub html_attrs: Attributes,
	pub body_attrs: Attributes,
}

impl CanonicalState {
	/// Groups [`elements`](`CanonicalState::elements`) by type, in order of each type's first appearance.
	#[must_use]
	pub fn elements_by_type(&self) -> IndexMap<ElementType, Vec<&HeadElement>> {
		let mut grouped = IndexMap::<_, Vec<_>>::new();
		for element in &self.elements {
			grouped.entry(element.ty).or_default().push(element);
		}
		grouped
	}
}

/// Names of the attributes the applier sets (or removes because of `false`), which is every name with a value.
#[must_use]
pub fn managed_attribute_names(attrs: &Attributes) -> Vec<&str> {
	attrs.iter().filter(|(_, value)| !value.is_absent()).map(|(name, _)| name.as_str()).collect()
}

/// Folds the registry in ascending handle order.
///
/// - The last `title` wins.
/// - `htmlAttrs` and `bodyAttrs` are shallow-merged, later keys overwriting earlier ones in place.
/// - A keyed `meta`, `base` or `script` removes an earlier element of the same type with the same key, then is appended.
/// - Everything else is appended.
#[must_use]
#[instrument(skip(registry))]
pub fn compute_state(registry: &Registry) -> CanonicalState {
	let mut state = CanonicalState::default();

	for (handle, elements) in registry.contributions() {
		for element in elements {
			match element.ty {
				ElementType::Title => {
					state.title = element.attr(TEXT_CONTENT).to_text().map(Into::into);
					continue;
				}
				ElementType::HtmlAttrs => {
					merge(&mut state.html_attrs, &element.attrs);
					continue;
				}
				ElementType::BodyAttrs => {
					merge(&mut state.body_attrs, &element.attrs);
					continue;
				}
				ty if ty.is_keyed() => {
					if let Some(key) = ElementKey::from_declaration(&element.attrs) {
						if let Some(superseded) = state.elements.iter().position(|prior| prior.ty == ty && prior.attr(key.name) == &*key.value) {
							state.elements.remove(superseded);
							if cfg!(feature = "dangerous-logging") {
								trace!("{} supersedes <{} {}={:?}>.", handle, ty, key.name, key.value);
							} else {
								trace!("{} supersedes a <{}> by {}.", handle, ty, key.name);
							}
						}
					}
				}
				_ => (),
			}

			state.elements.push(element.clone());
		}
	}

	state
}

fn merge(target: &mut Attributes, source: &Attributes) {
	for (name, value) in source {
		target.insert(name.clone(), value.clone());
	}
}
