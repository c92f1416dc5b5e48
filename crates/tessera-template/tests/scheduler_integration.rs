//! Update Scheduler Integration Tests
//!
//! Batched re-renders through the thread-local queue and the process-wide
//! flush hook.

use parking_lot::Mutex;
use rstest::rstest;
use serial_test::serial;
use std::cell::Cell;
use std::rc::Rc;
use tessera_dom::Node;
use tessera_template::{
	FlushReport, cancel_update, flush_updates, html, pending_updates, schedule_update,
	set_flush_scheduler,
};

type FlushTask = Box<dyn FnOnce() + Send>;

static POSTED: Mutex<Vec<FlushTask>> = Mutex::new(Vec::new());

fn install_hook() {
	set_flush_scheduler(|task| POSTED.lock().push(task));
}

fn attached(document: &Node, tag: &str) -> Node {
	let node = Node::element(tag);
	document.append_child(&node).unwrap();
	node
}

/// One flush task is posted per batch, and running it renders the batch
#[rstest]
#[serial(update_queue)]
fn test_flush_hook_posts_one_task_per_batch() {
	install_hook();
	POSTED.lock().clear();
	let document = Node::document();
	let header = attached(&document, "header");
	let footer = attached(&document, "footer");

	schedule_update(&header, || html!("<h1>", "top", "</h1>"));
	schedule_update(&footer, || html!("<small>", "bottom", "</small>"));
	schedule_update(&header, || html!("<h1>", "top again", "</h1>"));
	assert_eq!(pending_updates(), 2);

	let tasks: Vec<FlushTask> = std::mem::take(&mut *POSTED.lock());
	assert_eq!(tasks.len(), 1);
	for task in tasks {
		task();
	}

	assert_eq!(pending_updates(), 0);
	assert_eq!(header.text_content(), "top again");
	assert_eq!(footer.text_content(), "bottom");

	schedule_update(&header, || html!("<h1>", "next", "</h1>"));
	assert_eq!(POSTED.lock().len(), 1, "a new batch posts a new task");
	POSTED.lock().clear();
	flush_updates();
}

/// Containers render in the order they were first scheduled
#[rstest]
#[serial(update_queue)]
fn test_flush_order_follows_first_request() {
	let document = Node::document();
	let first = attached(&document, "div");
	let second = attached(&document, "div");
	let order = Rc::new(Cell::new(Vec::new()));

	let record = |label: &'static str, order: Rc<Cell<Vec<&'static str>>>| {
		move || {
			let mut seen = order.take();
			seen.push(label);
			order.set(seen);
			html!("<p>", label, "</p>")
		}
	};
	schedule_update(&first, record("first", order.clone()));
	schedule_update(&second, record("second", order.clone()));
	schedule_update(&first, record("first again", order.clone()));

	let report = flush_updates();

	assert_eq!(report.rendered, 2);
	assert_eq!(order.take(), vec!["first again", "second"]);
	POSTED.lock().clear();
}

/// Cancelled and detached containers are not rendered
#[rstest]
#[serial(update_queue)]
fn test_cancel_and_detach() {
	let document = Node::document();
	let kept = attached(&document, "div");
	let cancelled = attached(&document, "div");
	let detached = attached(&document, "div");

	schedule_update(&kept, || html!("<p>kept</p>"));
	schedule_update(&cancelled, || html!("<p>cancelled</p>"));
	schedule_update(&detached, || html!("<p>detached</p>"));
	assert!(cancel_update(&cancelled));
	assert!(!cancel_update(&cancelled));
	detached.remove();

	let report = flush_updates();

	assert_eq!(
		report,
		FlushReport {
			rendered: 1,
			skipped: 1,
			failed: 0,
		}
	);
	assert_eq!(cancelled.child_count(), 0);
	assert_eq!(detached.child_count(), 0);
	POSTED.lock().clear();
}

/// A failing render is counted and does not stop the batch
#[rstest]
#[serial(update_queue)]
fn test_failed_render_is_reported() {
	let document = Node::document();
	let broken = attached(&document, "div");
	let fine = attached(&document, "div");

	schedule_update(&broken, || html!("<p ", 1, "></p>"));
	schedule_update(&fine, || html!("<p>ok</p>"));

	let report = flush_updates();

	assert_eq!(report.failed, 1);
	assert_eq!(report.rendered, 1);
	assert_eq!(fine.text_content(), "ok");
	POSTED.lock().clear();
}
