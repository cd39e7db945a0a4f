use headkit::{
	dom::HeadDocument,
	lifecycle::{HeadLifecycle, HeadSlot},
	ElementType, HeadElement, HeadManager,
};
use std::cell::RefCell;

use memory_document_::MemoryDocument;

#[test]
fn live_slot_applies_on_every_step() {
	log_::init();
	let document = MemoryDocument::new();
	let mut manager = HeadManager::new();
	let description = RefCell::new("First".to_owned());

	let mut slot = HeadSlot::new(&mut manager, Some(&document), || {
		vec![
			Some(HeadElement::title("Slot")),
			Some(HeadElement::new(ElementType::Meta).with_attr("name", "description").with_attr("content", description.borrow().as_str())),
		]
	});
	assert!(slot.handle().is_some());
	// Nothing is collected before mounting in a live document.
	assert_eq!(manager.state().title, None);

	slot.on_mount(&mut manager);
	assert_eq!(document.title(), "Slot");
	assert_eq!(document.head_markup(), r#"<meta name="description" content="First"><meta name="head:count" content="1">"#);

	*description.borrow_mut() = "Second".to_owned();
	slot.on_update(&mut manager);
	assert_eq!(document.head_markup(), r#"<meta name="description" content="Second"><meta name="head:count" content="1">"#);

	slot.on_unmount(&mut manager);
	assert_eq!(slot.handle(), None);
	assert_eq!(document.head_markup(), r#"<meta name="head:count" content="0">"#);
	assert!(manager.state().elements.is_empty());

	// Unmounting twice is harmless.
	slot.on_unmount(&mut manager);
}

#[test]
fn server_slot_collects_immediately() {
	log_::init();
	let mut manager = HeadManager::new();

	let _outer = HeadSlot::new(&mut manager, None::<&MemoryDocument>, || vec![HeadElement::new(ElementType::HtmlAttrs).with_attr("lang", "en")]);
	let _inner = HeadSlot::new(&mut manager, None::<&MemoryDocument>, || vec![HeadElement::title("Server")]);

	let rendered = manager.render_to_string();
	assert_eq!(rendered.head, r#"<title>Server</title><meta name="head:count" content="0">"#);
	assert_eq!(rendered.html_attrs, r#" lang="en" data-head-attrs="lang""#);
}

#[test]
fn slots_keep_handle_order() {
	log_::init();
	let document = MemoryDocument::new();
	let mut manager = HeadManager::new();

	let mut layout = HeadSlot::new(&mut manager, Some(&document), || vec![HeadElement::title("Layout")]);
	let mut page = HeadSlot::new(&mut manager, Some(&document), || vec![HeadElement::title("Page")]);

	// Mount order is children first, but the page's handle is still the later one.
	page.on_mount(&mut manager);
	layout.on_mount(&mut manager);
	assert_eq!(document.title(), "Page");

	page.on_unmount(&mut manager);
	assert_eq!(document.title(), "Layout");
}
