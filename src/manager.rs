use crate::{
	diff::{self, EffectSummary},
	dom::HeadDocument,
	element::HeadElement,
	registry::{Handle, Registry},
	render::{self, RenderedHead},
	state::{compute_state, CanonicalState},
};
use tracing::instrument;

/// The head state of one document or one server render.
///
/// Create one per root and hand it to every binding below that root.
/// Each binding [`connect`](`HeadManager::connect`)s once, [`set`](`HeadManager::set`)s its declarations whenever they change
/// and [`disconnect`](`HeadManager::disconnect`)s when it goes away.
///
/// Nothing is applied automatically: Call [`effect`](`HeadManager::effect`) after changes to update a live document,
/// or [`render_to_string`](`HeadManager::render_to_string`) to produce server markup.
#[derive(Debug, Default, Clone)]
pub struct HeadManager {
	registry: Registry,
}

impl HeadManager {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn connect(&mut self) -> Handle {
		self.registry.connect()
	}

	pub fn disconnect(&mut self, handle: Handle) {
		self.registry.disconnect(handle)
	}

	pub fn set<I>(&mut self, handle: Handle, elements: I)
	where
		I: IntoIterator,
		I::Item: Into<Option<HeadElement>>,
	{
		self.registry.set(handle, elements)
	}

	/// Computes the current canonical state. This is a full fold over all contributions on each call.
	#[must_use]
	pub fn state(&self) -> CanonicalState {
		compute_state(&self.registry)
	}

	/// Applies the current state to `document`.
	#[instrument(skip(self, document))]
	pub fn effect<D: HeadDocument + ?Sized>(&self, document: &D) -> EffectSummary {
		diff::effect(document, &self.state())
	}

	#[must_use]
	pub fn render_to_string(&self) -> RenderedHead {
		render::render_to_string(&self.state())
	}

	#[must_use]
	pub fn registry(&self) -> &Registry {
		&self.registry
	}
}
