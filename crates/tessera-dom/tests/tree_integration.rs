//! Node Tree Integration Tests
//!
//! Structural operations, serialization and event delivery through the
//! public API only.

use rstest::{fixture, rstest};
use std::cell::Cell;
use std::rc::Rc;
use tessera_dom::{DomError, Event, EventListener, Node, NodeType, mutations};

#[fixture]
fn list() -> Node {
	let ul = Node::element("ul");
	for label in ["a", "b", "c"] {
		let li = Node::element("li");
		li.append_child(&Node::text(label)).unwrap();
		ul.append_child(&li).unwrap();
	}
	ul
}

// ============================================================================
// Structure
// ============================================================================

/// Re-inserting an attached node moves it
#[rstest]
fn test_insert_moves_existing_node(list: Node) {
	let last = list.last_child().unwrap();
	let first = list.first_child().unwrap();

	list.insert_before(&last, Some(&first)).unwrap();

	assert_eq!(list.text_content(), "cab");
	assert_eq!(list.child_count(), 3);
	assert!(last.next_sibling().unwrap().ptr_eq(&first));
}

/// Inserting a fragment moves its children and empties it
#[rstest]
fn test_fragment_insertion(list: Node) {
	let fragment = Node::fragment();
	fragment.append_child(&Node::element("li")).unwrap();
	fragment.append_child(&Node::element("li")).unwrap();

	list.append_child(&fragment).unwrap();

	assert_eq!(list.child_count(), 5);
	assert_eq!(fragment.child_count(), 0);
}

/// Cycles and foreign reference nodes are rejected
#[rstest]
fn test_hierarchy_errors(list: Node) {
	let item = list.first_child().unwrap();
	assert_eq!(item.append_child(&list), Err(DomError::HierarchyRequest));

	let stranger = Node::element("li");
	assert_eq!(
		list.insert_before(&Node::element("li"), Some(&stranger)),
		Err(DomError::NotAChild)
	);

	let text = Node::text("leaf");
	assert_eq!(
		text.append_child(&Node::element("b")),
		Err(DomError::NotAContainer(NodeType::Text))
	);
}

/// Connectivity follows attachment to a document
#[rstest]
fn test_connectivity(list: Node) {
	let document = Node::document();
	let item = list.first_child().unwrap();
	assert!(!item.is_connected());

	document.append_child(&list).unwrap();
	assert!(item.is_connected());
	assert!(item.root().ptr_eq(&document));

	list.remove();
	assert!(!item.is_connected());
}

/// Dropping the last strong reference to a parent releases children's link
#[rstest]
fn test_parent_is_weak() {
	let child = Node::element("span");
	{
		let parent = Node::element("div");
		parent.append_child(&child).unwrap();
		assert!(child.parent().is_some());
	}
	assert!(child.parent().is_none());
}

/// Deep clones copy attributes but not listeners
#[rstest]
fn test_deep_clone() {
	let button = Node::element("button");
	button.set_attribute("type", "submit").unwrap();
	button.append_child(&Node::text("send")).unwrap();
	button
		.add_event_listener("click", EventListener::new(|_| {}))
		.unwrap();

	let copy = button.deep_clone();

	assert!(!copy.ptr_eq(&button));
	assert_eq!(copy.to_html(), button.to_html());
	assert_eq!(copy.listener_count("click"), 0);
}

// ============================================================================
// Serialization
// ============================================================================

/// Text and attribute values are escaped; void elements have no end tag
#[rstest]
fn test_serialization() {
	let p = Node::element("p");
	p.set_attribute("title", "a \"quote\"").unwrap();
	p.append_child(&Node::text("1 < 2 & 3")).unwrap();
	p.append_child(&Node::element("br")).unwrap();
	p.append_child(&Node::comment("note")).unwrap();

	assert_eq!(
		p.to_html(),
		"<p title=\"a &quot;quote&quot;\">1 &lt; 2 &amp; 3<br><!--note--></p>"
	);
	assert_eq!(p.text_content(), "1 < 2 & 3");
}

// ============================================================================
// Events and accounting
// ============================================================================

/// Listeners run in registration order and can be removed by id
#[rstest]
fn test_event_dispatch() {
	let node = Node::element("a");
	let calls = Rc::new(Cell::new(0));
	let counter = calls.clone();
	let id = node
		.add_event_listener(
			"click",
			EventListener::new(move |event: &Event| {
				assert_eq!(event.event_type(), "click");
				counter.set(counter.get() + 1);
			}),
		)
		.unwrap();

	assert_eq!(node.dispatch_event(&Event::new("click")), 1);
	assert_eq!(node.dispatch_event(&Event::new("focus")), 0);
	assert!(node.remove_event_listener_by_id(id));
	assert_eq!(node.dispatch_event(&Event::new("click")), 0);
	assert_eq!(calls.get(), 1);
}

/// Mutation counters record every tree write on this thread
#[rstest]
fn test_mutation_counters(list: Node) {
	mutations::reset();
	let item = list.first_child().unwrap();
	item.set_attribute("class", "active").unwrap();
	item.remove_attribute("class");
	item.remove_attribute("class");
	list.append_child(&item).unwrap();

	let stats = mutations::take();
	assert_eq!(stats.attribute_sets, 1);
	assert_eq!(stats.attribute_removals, 1);
	assert_eq!(stats.insertions, 1);
	assert_eq!(mutations::snapshot().total(), 0);
}
