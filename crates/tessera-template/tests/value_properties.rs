//! Property-based tests for committed values.

use proptest::prelude::*;
use tessera_dom::{Node, mutations};
use tessera_template::{Value, html, render};

proptest! {
	/// Any string lands verbatim as text, whatever markup it resembles
	#[test]
	fn prop_text_round_trips(text in any::<String>()) {
		let container = Node::element("div");
		render(&html!("<p>", text.as_str(), "</p>"), &container).unwrap();
		prop_assert_eq!(container.text_content(), text);
	}

	/// Any string lands verbatim as an attribute value
	#[test]
	fn prop_attribute_round_trips(title in any::<String>()) {
		let container = Node::element("div");
		render(&html!("<abbr title=", title.as_str(), ">x</abbr>"), &container).unwrap();
		let abbr = container.first_child().unwrap();
		prop_assert_eq!(abbr.get_attribute("title"), Some(title));
	}

	/// Keyed reconciliation ends in the requested order and reuses every
	/// surviving node
	#[test]
	fn prop_keyed_order_and_identity(
		first in proptest::sample::subsequence((0u32..12).collect::<Vec<_>>(), 0..12),
		second in proptest::sample::subsequence((0u32..12).collect::<Vec<_>>(), 0..12)
			.prop_shuffle(),
	) {
		let view = |ids: &[u32]| {
			let items: Vec<Value> = ids
				.iter()
				.map(|id| Value::keyed(*id, html!("<li>", *id, "</li>")))
				.collect();
			html!("<ul>", items, "</ul>")
		};
		let container = Node::element("div");
		render(&view(&first), &container).unwrap();
		let list = container.first_child().unwrap();
		let before: Vec<(String, Node)> = list
			.children()
			.into_iter()
			.filter(Node::is_element)
			.map(|li| (li.text_content(), li))
			.collect();

		render(&view(&second), &container).unwrap();

		let after: Vec<Node> = list.children().into_iter().filter(Node::is_element).collect();
		let labels: Vec<String> = after.iter().map(Node::text_content).collect();
		prop_assert_eq!(labels, second.iter().map(u32::to_string).collect::<Vec<_>>());
		for li in &after {
			if let Some((_, old)) = before.iter().find(|(label, _)| *label == li.text_content()) {
				prop_assert!(old.ptr_eq(li));
			}
		}

		mutations::reset();
		render(&view(&second), &container).unwrap();
		prop_assert_eq!(mutations::snapshot().structural(), 0);
	}
}
