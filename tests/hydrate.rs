use headkit::{dom::HeadDocument, ElementType, HeadElement, HeadManager, RenderedHead};

use memory_document_::{MemoryDocument, MemoryDomError};

fn single(elements: Vec<HeadElement>) -> HeadManager {
	let mut manager = HeadManager::new();
	let handle = manager.connect();
	manager.set(handle, elements);
	manager
}

#[test]
fn hydrates_rendered_markup() {
	log_::init();
	let document = MemoryDocument::hydrate(&RenderedHead {
		head: r#"<title>A &amp; B</title><meta name="description" content="&quot;x&quot;"><script async src="/a.js"></script><style>a>b{}</style><meta name="head:count" content="3">"#.to_owned(),
		html_attrs: r#" lang="en" data-head-attrs="lang""#.to_owned(),
		body_attrs: String::new(),
	});

	assert_eq!(document.title(), "A & B");
	assert_eq!(document.get_attribute(&document.html(), "lang").as_deref(), Some("en"));
	assert_eq!(document.head_children().len(), 4);

	let description = document.head_children()[0];
	assert_eq!(document.get_attribute(&description, "content").as_deref(), Some("\"x\""));
	let script = document.head_children()[1];
	assert_eq!(document.get_attribute(&script, "async").as_deref(), Some(""));
	assert_eq!(document.content(document.head_children()[2]), "a>b{}");
	assert_eq!(document.mutation_count(), 0);
}

#[test]
fn attribute_values_survive_parsing() {
	log_::init();
	let values = ["line1\r\nline2", "cr\ronly", "<b>\"quoted\" & 'single'</b>", "&amp; stays literal", "tab\there", "ünïcödé ✓"];
	let manager = single(
		values
			.iter()
			.enumerate()
			.map(|(i, value)| HeadElement::new(ElementType::Meta).with_attr("name", format!("m{}", i)).with_attr("content", *value))
			.chain(Some(HeadElement::new(ElementType::BodyAttrs).with_attr("data-note", values[0])))
			.collect::<Vec<_>>(),
	);
	let document = MemoryDocument::hydrate(&manager.render_to_string());

	for (i, value) in values.iter().enumerate() {
		let node = document.head_children()[i];
		assert_eq!(document.get_attribute(&node, "content").as_deref(), Some(*value));
	}
	assert_eq!(document.get_attribute(&document.body(), "data-note").as_deref(), Some(values[0]));

	let summary = manager.effect(&document);
	assert!(summary.is_noop(), "{:?}", summary);
	assert_eq!(document.mutation_count(), 0);
}

#[test]
fn titles_survive_parsing() {
	log_::init();
	let manager = single(vec![HeadElement::title("  Fish &amp; <Chips>\r\n  ")]);
	let document = MemoryDocument::hydrate(&manager.render_to_string());

	assert_eq!(document.title(), "Fish &amp; <Chips>");
	assert!(manager.effect(&document).is_noop());
}

#[test]
fn raw_inner_html_newlines_match_after_parsing() {
	log_::init();
	let manager = single(vec![HeadElement::new(ElementType::Script).with_inner_html("a();\r\nb();")]);
	let document = MemoryDocument::hydrate(&manager.render_to_string());

	assert_eq!(document.content(document.head_children()[0]), "a();\nb();");
	let summary = manager.effect(&document);
	assert!(summary.is_noop(), "{:?}", summary);
	assert_eq!(document.mutation_count(), 0);
}

#[test]
fn detached_writes_are_not_mutations() {
	let document = MemoryDocument::new();
	let meta = document.create_element("meta").unwrap();
	document.set_attribute(&meta, "name", "x").unwrap();
	assert_eq!(document.mutation_count(), 0);

	document.append_child(&document.head(), &meta).unwrap();
	document.set_attribute(&meta, "content", "y").unwrap();
	document.remove_attribute(&meta, "missing").unwrap();
	assert_eq!(document.mutation_count(), 2);

	assert_eq!(document.remove(&meta), Ok(()));
	assert_eq!(document.remove(&meta), Err(MemoryDomError::Detached(meta)));
}

#[test]
fn equality_ignores_attribute_order() {
	let document = MemoryDocument::new();
	let a = document.create_element("link").unwrap();
	document.set_attribute(&a, "rel", "stylesheet").unwrap();
	document.set_attribute(&a, "href", "/a.css").unwrap();
	let b = document.create_element("LINK").unwrap();
	document.set_attribute(&b, "href", "/a.css").unwrap();
	document.set_attribute(&b, "rel", "stylesheet").unwrap();
	assert!(document.is_equal_node(&a, &b));

	document.set_attribute(&b, "media", "print").unwrap();
	assert!(!document.is_equal_node(&a, &b));
}
