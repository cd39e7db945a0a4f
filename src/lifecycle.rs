//! What a UI framework binding needs to drive a [`HeadManager`].

use crate::{dom::HeadDocument, element::HeadElement, manager::HeadManager, registry::Handle};
use tracing::{instrument, trace};

/// Lifecycle callbacks of a component that declares head content.
///
/// Framework bindings call these from their own mount, update and unmount hooks.
pub trait HeadLifecycle {
	fn on_mount(&mut self, manager: &mut HeadManager);
	fn on_update(&mut self, manager: &mut HeadManager);
	fn on_unmount(&mut self, manager: &mut HeadManager);
}

/// A component's slot in a [`HeadManager`].
///
/// Holds the component's [`Handle`] and a `collect` callback that produces its current declarations.
/// With a `document`, every lifecycle step re-applies the manager's state to it.
/// Without one (during a server render), declarations are collected as soon as the slot is created, since no lifecycle callbacks will run.
pub struct HeadSlot<'d, D: HeadDocument + ?Sized, F> {
	handle: Option<Handle>,
	document: Option<&'d D>,
	collect: F,
}

impl<'d, D, F, I> HeadSlot<'d, D, F>
where
	D: HeadDocument + ?Sized,
	F: FnMut() -> I,
	I: IntoIterator,
	I::Item: Into<Option<HeadElement>>,
{
	pub fn new(manager: &mut HeadManager, document: Option<&'d D>, collect: F) -> Self {
		let mut slot = Self {
			handle: Some(manager.connect()),
			document,
			collect,
		};
		if slot.document.is_none() {
			slot.collect(manager);
		}
		slot
	}

	/// [`None`] after unmounting.
	#[must_use]
	pub fn handle(&self) -> Option<Handle> {
		self.handle
	}

	fn collect(&mut self, manager: &mut HeadManager) {
		match self.handle {
			Some(handle) => manager.set(handle, (self.collect)()),
			None => trace!("Not collecting for an unmounted slot."),
		}
	}

	fn apply(&self, manager: &HeadManager) {
		if let Some(document) = self.document {
			manager.effect(document);
		}
	}
}

impl<'d, D, F, I> HeadLifecycle for HeadSlot<'d, D, F>
where
	D: HeadDocument + ?Sized,
	F: FnMut() -> I,
	I: IntoIterator,
	I::Item: Into<Option<HeadElement>>,
{
	#[instrument(skip(self, manager), fields(handle = ?self.handle))]
	fn on_mount(&mut self, manager: &mut HeadManager) {
		self.collect(manager);
		self.apply(manager);
	}

	#[instrument(skip(self, manager), fields(handle = ?self.handle))]
	fn on_update(&mut self, manager: &mut HeadManager) {
		self.collect(manager);
		self.apply(manager);
	}

	#[instrument(skip(self, manager), fields(handle = ?self.handle))]
	fn on_unmount(&mut self, manager: &mut HeadManager) {
		if let Some(handle) = self.handle.take() {
			manager.disconnect(handle);
			self.apply(manager);
		}
	}
}
