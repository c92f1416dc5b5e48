//! Events and listener handles.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::node::Node;

/// Identifier returned when a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
	pub(crate) fn next() -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(1);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}
}

/// An event delivered to listeners through [`Node::dispatch_event`].
pub struct Event {
	event_type: String,
	detail: Option<String>,
	target: RefCell<Option<Node>>,
	default_prevented: Cell<bool>,
}

impl Event {
	/// Creates an event of the given type.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self {
			event_type: event_type.into(),
			detail: None,
			target: RefCell::new(None),
			default_prevented: Cell::new(false),
		}
	}

	/// Attaches a free-form detail payload.
	pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}

	/// Returns the event type (e.g. `"click"`).
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// Returns the detail payload, if any.
	pub fn detail(&self) -> Option<&str> {
		self.detail.as_deref()
	}

	/// Returns the node the event was dispatched on.
	pub fn target(&self) -> Option<Node> {
		self.target.borrow().clone()
	}

	pub(crate) fn set_target(&self, target: &Node) {
		*self.target.borrow_mut() = Some(target.clone());
	}

	/// Marks the event as having its default action cancelled.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Returns whether [`Event::prevent_default`] was called.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

impl fmt::Debug for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("event_type", &self.event_type)
			.field("detail", &self.detail)
			.field("default_prevented", &self.default_prevented.get())
			.finish()
	}
}

/// A cloneable event listener.
///
/// Listener identity is the identity of the wrapped closure: two clones of the
/// same listener compare equal, two listeners built from separate closures never do.
#[derive(Clone)]
pub struct EventListener {
	inner: Rc<dyn Fn(&Event) + 'static>,
}

impl EventListener {
	/// Wraps a closure as a listener.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Invokes the listener.
	pub fn call(&self, event: &Event) {
		(self.inner)(event)
	}

	/// Returns true if both handles wrap the same closure.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl PartialEq for EventListener {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl fmt::Debug for EventListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventListener")
			.field("inner", &"<function>")
			.finish()
	}
}
