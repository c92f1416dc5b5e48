//! Per-thread mutation accounting.
//!
//! Every write that changes the tree is counted here. Tests use the counters
//! to verify that re-committing unchanged values touches nothing:
//!
//! ```
//! use tessera_dom::{Node, mutations};
//!
//! let el = Node::element("div");
//! mutations::reset();
//! el.set_attribute("id", "main").unwrap();
//! assert_eq!(mutations::snapshot().attribute_sets, 1);
//! ```

use std::cell::Cell;

/// Counters of tree mutations since the last [`reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationStats {
	/// Attribute writes.
	pub attribute_sets: usize,
	/// Attribute removals that actually removed something.
	pub attribute_removals: usize,
	/// Writes to text or comment data.
	pub text_writes: usize,
	/// Node insertions (including moves).
	pub insertions: usize,
	/// Node removals.
	pub removals: usize,
	/// Property assignments.
	pub property_sets: usize,
	/// Listeners attached.
	pub listeners_added: usize,
	/// Listeners detached.
	pub listeners_removed: usize,
}

impl MutationStats {
	/// Sum of all counters.
	pub fn total(&self) -> usize {
		self.attribute_sets
			+ self.attribute_removals
			+ self.text_writes
			+ self.insertions
			+ self.removals
			+ self.property_sets
			+ self.listeners_added
			+ self.listeners_removed
	}

	/// Insertions plus removals.
	pub fn structural(&self) -> usize {
		self.insertions + self.removals
	}
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Mutation {
	AttributeSet,
	AttributeRemoval,
	TextWrite,
	Insertion,
	Removal,
	PropertySet,
	ListenerAdded,
	ListenerRemoved,
}

thread_local! {
	static STATS: Cell<MutationStats> = Cell::new(MutationStats::default());
}

pub(crate) fn record(mutation: Mutation) {
	STATS.with(|stats| {
		let mut current = stats.get();
		match mutation {
			Mutation::AttributeSet => current.attribute_sets += 1,
			Mutation::AttributeRemoval => current.attribute_removals += 1,
			Mutation::TextWrite => current.text_writes += 1,
			Mutation::Insertion => current.insertions += 1,
			Mutation::Removal => current.removals += 1,
			Mutation::PropertySet => current.property_sets += 1,
			Mutation::ListenerAdded => current.listeners_added += 1,
			Mutation::ListenerRemoved => current.listeners_removed += 1,
		}
		stats.set(current);
	});
}

/// Returns the counters accumulated on this thread.
pub fn snapshot() -> MutationStats {
	STATS.with(Cell::get)
}

/// Resets this thread's counters to zero.
pub fn reset() {
	STATS.with(|stats| stats.set(MutationStats::default()));
}

/// Returns the counters and resets them.
pub fn take() -> MutationStats {
	STATS.with(|stats| stats.replace(MutationStats::default()))
}
