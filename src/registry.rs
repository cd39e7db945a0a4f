//! Per-caller declaration lists, keyed by [`Handle`].

use crate::element::HeadElement;
use core::fmt::{self, Display, Formatter};
use std::collections::BTreeMap;
use tracing::{instrument, trace, warn};

/// Identifies one caller's contribution. Handles are issued in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u64);

impl Handle {
	#[must_use]
	pub fn get(self) -> u64 {
		self.0
	}
}

impl Display for Handle {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Maps each [`Handle`] to its caller's current declarations.
///
/// Disconnected entries stay in place as [`None`], so iteration order never depends on connection history beyond handle order.
///
/// Unknown handles aren't rejected: [`set`](`Registry::set`) simply creates the entry and [`disconnect`](`Registry::disconnect`) is inert.
/// Debug builds log a warning in these cases, since they usually point to a lifecycle mistake in the calling binding.
#[derive(Debug, Default, Clone)]
pub struct Registry {
	entries: BTreeMap<Handle, Option<Vec<HeadElement>>>,
	next_handle: u64,
}

impl Registry {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[instrument(skip(self))]
	pub fn connect(&mut self) -> Handle {
		let handle = Handle(self.next_handle);
		self.next_handle += 1;
		self.entries.insert(handle, Some(Vec::new()));
		trace!("Connected {}.", handle);
		handle
	}

	#[instrument(skip(self))]
	pub fn disconnect(&mut self, handle: Handle) {
		if cfg!(debug_assertions) {
			match self.entries.get(&handle) {
				None if !self.was_issued(handle) => warn!("Disconnecting {}, which was never issued.", handle),
				Some(None) => warn!("Disconnecting {} more than once.", handle),
				_ => (),
			}
		}
		self.entries.insert(handle, None);
		trace!("Disconnected {}.", handle);
	}

	/// Replaces the handle's declarations. [`None`] items are dropped, which allows conditionally declared elements.
	#[instrument(skip(self, elements))]
	pub fn set<I>(&mut self, handle: Handle, elements: I)
	where
		I: IntoIterator,
		I::Item: Into<Option<HeadElement>>,
	{
		if cfg!(debug_assertions) && !self.was_issued(handle) {
			warn!("Setting declarations for {}, which was never issued.", handle);
		}
		let elements: Vec<HeadElement> = elements.into_iter().filter_map(Into::into).collect();
		trace!("{} now declares {} element(s).", handle, elements.len());
		self.entries.insert(handle, Some(elements));
	}

	/// The handle's current declarations, or [`None`] if it is disconnected or unknown.
	#[must_use]
	pub fn get(&self, handle: Handle) -> Option<&[HeadElement]> {
		self.entries.get(&handle).and_then(Option::as_deref)
	}

	/// Connected contributions in ascending handle order.
	pub fn contributions(&self) -> impl Iterator<Item = (Handle, &[HeadElement])> {
		self.entries.iter().filter_map(|(&handle, elements)| elements.as_deref().map(|elements| (handle, elements)))
	}

	fn was_issued(&self, handle: Handle) -> bool {
		handle.0 < self.next_handle
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::element::ElementType;

	#[test]
	fn handles_increase_from_zero() {
		let mut registry = Registry::new();
		assert_eq!(registry.connect().get(), 0);
		assert_eq!(registry.connect().get(), 1);
		assert_eq!(registry.connect().get(), 2);
	}

	#[test]
	fn disconnected_entries_are_skipped_but_empty_ones_are_not() {
		let mut registry = Registry::new();
		let a = registry.connect();
		let b = registry.connect();
		registry.disconnect(a);

		assert_eq!(registry.get(a), None);
		assert_eq!(registry.get(b), Some(&[][..]));
		assert_eq!(registry.contributions().map(|(handle, _)| handle).collect::<Vec<_>>(), vec![b]);
	}

	#[test]
	fn set_drops_missing_items() {
		let mut registry = Registry::new();
		let handle = registry.connect();
		registry.set(handle, vec![None, Some(HeadElement::title("a")), None]);
		assert_eq!(registry.get(handle), Some(&[HeadElement::title("a")][..]));

		registry.set(handle, vec![HeadElement::new(ElementType::Meta)]);
		assert_eq!(registry.get(handle).map(<[_]>::len), Some(1));
	}

	#[test]
	fn unknown_handles_are_lenient() {
		let mut registry = Registry::new();
		let mut other = Registry::new();
		other.connect();
		let foreign = other.connect();

		registry.disconnect(foreign);
		assert_eq!(registry.contributions().count(), 0);

		registry.set(foreign, vec![HeadElement::title("x")]);
		assert_eq!(registry.contributions().count(), 1);

		// The connection counter is unaffected.
		assert_eq!(registry.connect().get(), 0);
	}
}
