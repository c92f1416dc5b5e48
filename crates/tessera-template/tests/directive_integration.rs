//! Directive Integration Tests
//!
//! Built-in directives rendered through the public API, plus attribute
//! directives looked up from the process-wide registry.
//!
//! Test Categories:
//! - Category 1: Built-in child directives
//! - Category 2: Built-in attribute directives
//! - Category 3: Registered attribute directives

use rstest::rstest;
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use tessera_dom::{Node, mutations};
use tessera_template::directive::{class_map, repeat, unsafe_html, when, when_else};
use tessera_template::{
	Cleanup, RenderError, TemplateResult, Value, clear_attribute_directives, html,
	list_registered_directive_names, register_attribute_directive, render, unrender,
	unregister_attribute_directive,
};

fn items(parent: &Node) -> Vec<Node> {
	parent.children().into_iter().filter(Node::is_element).collect()
}

// ============================================================================
// Category 1: Built-in child directives
// ============================================================================

fn todo_list(entries: Vec<(u32, &'static str)>) -> TemplateResult {
	html!(
		"<ul>",
		repeat(entries, |(id, _)| *id, |(_, label)| html!("<li>", *label, "</li>")),
		"</ul>"
	)
}

/// Removing a middle item leaves the other item nodes untouched
#[rstest]
fn test_repeat_removal_keeps_siblings() {
	let container = Node::element("div");
	render(&todo_list(vec![(1, "a"), (2, "b"), (3, "c")]), &container).unwrap();
	let list = container.first_child().unwrap();
	let before = items(&list);

	render(&todo_list(vec![(1, "a"), (3, "c")]), &container).unwrap();

	let after = items(&list);
	assert_eq!(after.len(), 2);
	assert!(after[0].ptr_eq(&before[0]));
	assert!(after[1].ptr_eq(&before[2]));
	assert!(before[1].parent().is_none());
}

/// Same keys in the same order commit without structural changes
#[rstest]
fn test_repeat_unchanged_keys_do_not_move() {
	let container = Node::element("div");
	render(&todo_list(vec![(1, "a"), (2, "b")]), &container).unwrap();

	mutations::reset();
	render(&todo_list(vec![(1, "a"), (2, "b")]), &container).unwrap();

	assert_eq!(mutations::snapshot().structural(), 0);
}

/// Swapping two items moves a minimal number of nodes
#[rstest]
fn test_repeat_swap() {
	let container = Node::element("div");
	render(&todo_list(vec![(1, "a"), (2, "b"), (3, "c"), (4, "d")]), &container).unwrap();
	let list = container.first_child().unwrap();
	let before = items(&list);

	render(&todo_list(vec![(1, "a"), (3, "c"), (2, "b"), (4, "d")]), &container).unwrap();

	let after = items(&list);
	assert_eq!(list.text_content(), "acbd");
	assert!(after[1].ptr_eq(&before[2]));
	assert!(after[2].ptr_eq(&before[1]));
}

/// Duplicate keys render only the first occurrence
#[rstest]
fn test_repeat_duplicate_keys() {
	let container = Node::element("div");
	render(&todo_list(vec![(1, "a"), (1, "dup"), (2, "b")]), &container).unwrap();
	assert_eq!(container.text_content(), "ab");
}

fn banner(show: bool) -> TemplateResult {
	html!(
		"<header>",
		when(show, || html!("<strong>notice</strong>")),
		"</header>"
	)
}

/// `when` renders its branch only while the condition holds
#[rstest]
fn test_when_toggles() {
	let container = Node::element("div");
	render(&banner(false), &container).unwrap();
	assert_eq!(container.text_content(), "");

	render(&banner(true), &container).unwrap();
	assert_eq!(container.text_content(), "notice");
	let strong = items(&container.first_child().unwrap())[0].clone();

	render(&banner(true), &container).unwrap();
	assert!(items(&container.first_child().unwrap())[0].ptr_eq(&strong));

	render(&banner(false), &container).unwrap();
	assert_eq!(container.text_content(), "");
}

/// `when_else` switches between its two branches
#[rstest]
fn test_when_else_switches_branch() {
	let view = |signed_in: bool| {
		html!(
			"<nav>",
			when_else(signed_in, || html!("<a>logout</a>"), || html!("<a>login</a>")),
			"</nav>"
		)
	};
	let container = Node::element("div");
	render(&view(false), &container).unwrap();
	assert_eq!(container.text_content(), "login");

	render(&view(true), &container).unwrap();
	assert_eq!(container.text_content(), "logout");
}

/// A directive can be replaced by plain text in the same slot
#[rstest]
fn test_directive_replaced_by_text() {
	let view = |value: Value| html!("<div>", value, "</div>");
	let container = Node::element("section");
	render(&view(unsafe_html("<em>x</em>").into()), &container).unwrap();
	assert_eq!(container.text_content(), "x");

	render(&view(Value::from("plain")), &container).unwrap();
	let div = container.first_child().unwrap();
	assert_eq!(div.text_content(), "plain");
	assert!(items(&div).is_empty());
}

// ============================================================================
// Category 2: Built-in attribute directives
// ============================================================================

/// `class_map` leaves classes it did not apply alone
#[rstest]
fn test_class_map_preserves_foreign_classes() {
	let view = |active: bool| html!("<li class=", class_map([("active", active)]), "></li>");
	let container = Node::element("ul");
	render(&view(true), &container).unwrap();
	let li = container.first_child().unwrap();
	li.set_attribute("class", "active external").unwrap();

	render(&view(false), &container).unwrap();

	assert_eq!(li.get_attribute("class").as_deref(), Some("external"));
}

/// Child-only directives refuse attribute positions
#[rstest]
fn test_child_directive_in_attribute_position() {
	let container = Node::element("div");
	let result = render(
		&html!("<p title=", when(true, || html!("x")), "></p>"),
		&container,
	);
	assert!(matches!(
		result,
		Err(RenderError::UnsupportedPosition { .. })
	));
}

// ============================================================================
// Category 3: Registered attribute directives
// ============================================================================

static INVOCATIONS: AtomicUsize = AtomicUsize::new(0);
static CLEANUPS: AtomicUsize = AtomicUsize::new(0);

fn register_tooltip() {
	INVOCATIONS.store(0, Ordering::SeqCst);
	CLEANUPS.store(0, Ordering::SeqCst);
	register_attribute_directive("tooltip", |element, value, _name| {
		INVOCATIONS.fetch_add(1, Ordering::SeqCst);
		let text = value.to_text().unwrap_or_default();
		let _ = element.set_attribute("data-tooltip", text);
		let cleanup: Cleanup = Box::new(|| {
			CLEANUPS.fetch_add(1, Ordering::SeqCst);
		});
		Some(cleanup)
	});
}

fn tip(text: &str) -> TemplateResult {
	html!("<span :tooltip=", text, ">?</span>")
}

/// Cleanup runs once per invocation, before the next one and on teardown
#[rstest]
#[serial(attribute_directives)]
fn test_action_cleanup_runs_exactly_once() {
	register_tooltip();
	let container = Node::element("div");

	render(&tip("first"), &container).unwrap();
	render(&tip("first"), &container).unwrap();
	assert_eq!(INVOCATIONS.load(Ordering::SeqCst), 1);
	assert_eq!(CLEANUPS.load(Ordering::SeqCst), 0);

	render(&tip("second"), &container).unwrap();
	assert_eq!(INVOCATIONS.load(Ordering::SeqCst), 2);
	assert_eq!(CLEANUPS.load(Ordering::SeqCst), 1);
	let span = container.first_child().unwrap();
	assert_eq!(span.get_attribute("data-tooltip").as_deref(), Some("second"));

	unrender(&container);
	assert_eq!(CLEANUPS.load(Ordering::SeqCst), 2);

	unregister_attribute_directive("tooltip");
}

/// A static action value invokes the directive once
#[rstest]
#[serial(attribute_directives)]
fn test_static_action_runs_once() {
	register_tooltip();
	let container = Node::element("div");
	let view = |label: &str| html!("<span :tooltip=\"fixed\">", label, "</span>");

	render(&view("a"), &container).unwrap();
	render(&view("b"), &container).unwrap();

	assert_eq!(INVOCATIONS.load(Ordering::SeqCst), 1);
	let span = container.first_child().unwrap();
	assert_eq!(span.get_attribute("data-tooltip").as_deref(), Some("fixed"));

	unregister_attribute_directive("tooltip");
}

/// Unregistered names are skipped without failing the render
#[rstest]
#[serial(attribute_directives)]
fn test_unregistered_action_is_ignored() {
	clear_attribute_directives();
	let container = Node::element("div");

	render(&tip("x"), &container).unwrap();

	assert!(list_registered_directive_names().is_empty());
	assert_eq!(container.text_content(), "?");
}

fn register_exploding() {
	register_attribute_directive("explode", |_element, _value, _name| {
		panic!("directive failure");
	});
}

fn card(label: &str) -> TemplateResult {
	html!("<p :explode=", 1, ">kept</p><span>", label, "</span>")
}

/// A panicking directive is reported and the other parts still render
#[rstest]
#[serial(attribute_directives)]
fn test_directive_panic_is_isolated() {
	register_exploding();
	let container = Node::element("div");

	let result = render(&card("text"), &container);

	assert!(matches!(result, Err(RenderError::Directive { ref directive, .. }) if directive == "explode"));
	assert_eq!(container.inner_html(), "<p>kept</p><span>text</span>");

	unregister_attribute_directive("explode");
}

/// A nested template keeps its rendered content when one of its parts fails
#[rstest]
#[serial(attribute_directives)]
fn test_nested_directive_panic_keeps_siblings() {
	register_exploding();
	let container = Node::element("div");
	let page = |label: &str| html!("<section>", card(label), "</section>");

	assert!(render(&page("first"), &container).is_err());
	let section = container.first_child().unwrap();
	assert_eq!(section.text_content(), "keptfirst");
	let paragraph = section
		.children()
		.into_iter()
		.find(Node::is_element)
		.unwrap();

	assert!(render(&page("second"), &container).is_ok());
	assert_eq!(section.text_content(), "keptsecond");
	assert!(
		section
			.children()
			.into_iter()
			.find(Node::is_element)
			.unwrap()
			.ptr_eq(&paragraph)
	);

	unregister_attribute_directive("explode");
}

static SECOND_CLEANUPS: AtomicUsize = AtomicUsize::new(0);

fn failing_cleanup() {
	panic!("cleanup failure");
}

/// A panicking cleanup does not stop the cleanups of later parts
#[rstest]
#[serial(attribute_directives)]
fn test_cleanup_panic_does_not_stop_teardown() {
	SECOND_CLEANUPS.store(0, Ordering::SeqCst);
	register_attribute_directive("fragile", |_element, _value, _name| {
		let cleanup: Cleanup = Box::new(failing_cleanup);
		Some(cleanup)
	});
	register_attribute_directive("sturdy", |_element, _value, _name| {
		let cleanup: Cleanup = Box::new(|| {
			SECOND_CLEANUPS.fetch_add(1, Ordering::SeqCst);
		});
		Some(cleanup)
	});
	let container = Node::element("div");

	render(
		&html!("<i :fragile=", 1, "></i><b :sturdy=", 2, "></b>"),
		&container,
	)
	.unwrap();
	assert!(unrender(&container));

	assert_eq!(SECOND_CLEANUPS.load(Ordering::SeqCst), 1);
	assert_eq!(container.child_count(), 0);

	unregister_attribute_directive("fragile");
	unregister_attribute_directive("sturdy");
}
