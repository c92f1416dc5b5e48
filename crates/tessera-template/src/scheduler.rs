//! Batched re-rendering.
//!
//! Components request a re-render by scheduling a producer for their
//! container. Requests for the same container coalesce: only the most recent
//! producer runs, once, at the next flush. Flushing skips containers that were
//! dropped or detached from their document in the meantime.

use std::cell::{Cell, RefCell};
use std::thread::{self, ThreadId};

use tessera_dom::{Node, NodeId, WeakNode};

use crate::render::render;
use crate::strings::TemplateResult;

type Producer = Box<dyn FnOnce() -> TemplateResult>;

/// Type for flush scheduler function
type SchedulerFn = Box<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>;

/// Global flush scheduler
static SCHEDULER: std::sync::OnceLock<SchedulerFn> = std::sync::OnceLock::new();

/// Set the global scheduler used to flush the per-thread update queue.
///
/// The scheduler receives a task to run at some later point, typically the
/// next turn of an event loop. The task must run on the thread that scheduled
/// the update: queues are per thread, and a task run elsewhere does nothing,
/// leaving that thread's updates for [`flush_updates`]. Without a scheduler,
/// pending updates must be flushed manually with [`flush_updates`]. Only the
/// first call has effect.
///
/// # Example
///
/// ```ignore
/// tessera_template::scheduler::set_flush_scheduler(|task| {
///     event_loop.post(task);
/// });
/// ```
pub fn set_flush_scheduler<F>(scheduler: F)
where
	F: Fn(Box<dyn FnOnce() + Send>) + Send + Sync + 'static,
{
	let _ = SCHEDULER.set(Box::new(scheduler));
}

struct PendingRender {
	container: WeakNode,
	producer: Producer,
}

/// Outcome of one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
	/// Containers re-rendered successfully.
	pub rendered: usize,
	/// Containers skipped because they were dropped or disconnected.
	pub skipped: usize,
	/// Containers whose render returned an error.
	pub failed: usize,
}

/// Pending re-renders, at most one per container.
#[derive(Default)]
pub struct UpdateQueue {
	pending: RefCell<Vec<(NodeId, PendingRender)>>,
	flush_scheduled: Cell<bool>,
}

impl UpdateQueue {
	/// Creates an empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Schedules `producer` to re-render `container`.
	///
	/// Returns false if a render for the container was already pending; the
	/// new producer replaces the old one and keeps its place in the queue.
	pub fn schedule<F>(&self, container: &Node, producer: F) -> bool
	where
		F: FnOnce() -> TemplateResult + 'static,
	{
		let mut pending = self.pending.borrow_mut();
		let id = container.id();
		if let Some((_, entry)) = pending.iter_mut().find(|(pending_id, _)| *pending_id == id) {
			entry.producer = Box::new(producer);
			return false;
		}
		pending.push((
			id,
			PendingRender {
				container: container.downgrade(),
				producer: Box::new(producer),
			},
		));
		true
	}

	/// Drops the pending render for `container`. Returns true if there was one.
	pub fn cancel(&self, container: &Node) -> bool {
		let mut pending = self.pending.borrow_mut();
		let before = pending.len();
		pending.retain(|(id, _)| *id != container.id());
		pending.len() != before
	}

	/// Returns true if a render is pending for `container`.
	pub fn is_scheduled(&self, container: &Node) -> bool {
		self.pending
			.borrow()
			.iter()
			.any(|(id, _)| *id == container.id())
	}

	/// Number of pending renders.
	pub fn len(&self) -> usize {
		self.pending.borrow().len()
	}

	/// Returns true if nothing is pending.
	pub fn is_empty(&self) -> bool {
		self.pending.borrow().is_empty()
	}

	/// Runs every pending render in scheduling order.
	///
	/// Renders scheduled while flushing are left for the next flush.
	pub fn flush(&self) -> FlushReport {
		self.flush_scheduled.set(false);
		let batch = std::mem::take(&mut *self.pending.borrow_mut());
		let mut report = FlushReport::default();

		for (_, pending) in batch {
			let Some(container) = pending.container.upgrade().filter(Node::is_connected) else {
				tracing::debug!("skipping update for a dropped or detached container");
				report.skipped += 1;
				continue;
			};
			let template = (pending.producer)();
			match render(&template, &container) {
				Ok(()) => report.rendered += 1,
				Err(err) => {
					tracing::error!(container = ?container, error = %err, "scheduled render failed");
					report.failed += 1;
				}
			}
		}
		report
	}
}

thread_local! {
	static QUEUE: UpdateQueue = UpdateQueue::new();
}

/// Schedules a re-render of `container` on this thread's queue.
///
/// The first request after a flush hands a flush task to the scheduler set with
/// [`set_flush_scheduler`], if any.
pub fn schedule_update<F>(container: &Node, producer: F) -> bool
where
	F: FnOnce() -> TemplateResult + 'static,
{
	QUEUE.with(|queue| {
		let queued = queue.schedule(container, producer);
		if !queue.flush_scheduled.get() {
			queue.flush_scheduled.set(true);
			if let Some(scheduler) = SCHEDULER.get() {
				scheduler(flush_task(thread::current().id()));
			}
		}
		queued
	})
}

/// Task handed to the flush scheduler. It only flushes when run on `origin`,
/// since the queue it belongs to is thread-local.
fn flush_task(origin: ThreadId) -> Box<dyn FnOnce() + Send> {
	Box::new(move || {
		if thread::current().id() != origin {
			tracing::error!(
				?origin,
				"flush task ran off its scheduling thread; updates stay pending"
			);
			return;
		}
		QUEUE.with(|queue| {
			queue.flush();
		});
	})
}

/// Cancels a pending re-render on this thread's queue.
pub fn cancel_update(container: &Node) -> bool {
	QUEUE.with(|queue| queue.cancel(container))
}

/// Flushes this thread's queue.
pub fn flush_updates() -> FlushReport {
	QUEUE.with(UpdateQueue::flush)
}

/// Number of renders pending on this thread's queue.
pub fn pending_updates() -> usize {
	QUEUE.with(UpdateQueue::len)
}
