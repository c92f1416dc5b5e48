//! Keyed list reconciliation.
//!
//! [`KeyedList`] keeps one entry per key between a start and an end marker.
//! Reconciling against a new sequence:
//!
//! 1. takes a fast path when the keys are identical and in the same order,
//!    updating every entry in place;
//! 2. otherwise updates entries whose key survives and creates entries for
//!    new keys;
//! 3. removes entries whose key disappeared;
//! 4. walks forward from the start marker, moving an entry's nodes only when
//!    they are not already where they belong.
//!
//! Entries whose key survives keep their nodes, so a reorder moves the
//! existing nodes and never rebuilds them.

use std::collections::{HashMap, HashSet};

use tessera_dom::Node;

use crate::child::ChildPart;
use crate::directive::DirectiveState;
use crate::error::{RenderError, RenderResult};
use crate::value::{Key, Value};

/// Something a keyed list can position in the tree.
pub trait KeyedEntry {
	/// The contiguous nodes making up the entry, in order.
	fn nodes(&self) -> Vec<Node>;

	/// Releases the entry's resources once it leaves the list.
	fn dispose(&mut self) {}
}

impl KeyedEntry for Node {
	fn nodes(&self) -> Vec<Node> {
		vec![self.clone()]
	}
}

/// Entries keyed by identity, plus their current order.
#[derive(Debug)]
pub struct KeyedList<E> {
	entries: HashMap<Key, E>,
	order: Vec<Key>,
}

impl<E> Default for KeyedList<E> {
	fn default() -> Self {
		Self {
			entries: HashMap::new(),
			order: Vec::new(),
		}
	}
}

impl<E: KeyedEntry> KeyedList<E> {
	/// Creates an empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Returns true if the list has no entries.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Keys in rendered order.
	pub fn keys(&self) -> &[Key] {
		&self.order
	}

	/// The entry for `key`.
	pub fn get(&self, key: &Key) -> Option<&E> {
		self.entries.get(key)
	}

	/// Reconciles the entries between `start` and `end` with `items`.
	///
	/// `create` builds the entry for a new key and `update` refreshes a
	/// surviving one. A failing item is logged and skipped; the first error is
	/// returned after the rest of the list has been reconciled.
	pub fn reconcile<I>(
		&mut self,
		start: &Node,
		end: &Node,
		items: Vec<(Key, I)>,
		mut create: impl FnMut(&Key, &I) -> RenderResult<E>,
		mut update: impl FnMut(&mut E, &I) -> RenderResult<()>,
	) -> RenderResult<()> {
		let mut first_error: Option<RenderError> = None;
		let mut record = |result: RenderResult<()>, key: &Key| {
			if let Err(err) = result {
				tracing::error!(key = %key, error = %err, "keyed item failed to render");
				first_error.get_or_insert(err);
			}
		};

		let unchanged = items.len() == self.order.len()
			&& items.iter().zip(&self.order).all(|((key, _), old)| key == old);
		if unchanged {
			for (key, item) in &items {
				if let Some(entry) = self.entries.get_mut(key) {
					record(update(entry, item), key);
				}
			}
			return first_error.map_or(Ok(()), Err);
		}

		let mut seen: HashSet<Key> = HashSet::with_capacity(items.len());
		let mut order = Vec::with_capacity(items.len());
		for (key, item) in &items {
			if !seen.insert(key.clone()) {
				tracing::warn!(key = %key, "duplicate key in keyed list; later item ignored");
				continue;
			}
			match self.entries.get_mut(key) {
				Some(entry) => record(update(entry, item), key),
				None => match create(key, item) {
					Ok(entry) => {
						self.entries.insert(key.clone(), entry);
					}
					Err(err) => {
						record(Err(err), key);
						seen.remove(key);
						continue;
					}
				},
			}
			order.push(key.clone());
		}

		let stale: Vec<Key> = self
			.entries
			.keys()
			.filter(|key| !seen.contains(*key))
			.cloned()
			.collect();
		for key in stale {
			if let Some(mut entry) = self.entries.remove(&key) {
				for node in entry.nodes() {
					node.remove();
				}
				entry.dispose();
			}
		}

		let parent = end.parent().ok_or_else(|| RenderError::MissingParent {
			directive: "keyed list".to_string(),
		})?;
		let mut previous = start.clone();
		for key in &order {
			let Some(entry) = self.entries.get(key) else {
				continue;
			};
			for node in entry.nodes() {
				let next = previous.next_sibling();
				if next.as_ref() != Some(&node) {
					parent.insert_before(&node, next.as_ref())?;
				}
				previous = node;
			}
		}

		self.order = order;
		first_error.map_or(Ok(()), Err)
	}

	/// Disposes every entry and forgets the list.
	pub fn dispose_entries(&mut self) {
		for (_, mut entry) in self.entries.drain() {
			entry.dispose();
		}
		self.order.clear();
	}
}

impl KeyedList<ChildPart> {
	/// Reconciles child parts, one per item, committing each item's value.
	pub(crate) fn reconcile_parts(
		&mut self,
		start: &Node,
		end: &Node,
		items: Vec<(Key, Value)>,
	) -> RenderResult<()> {
		self.reconcile(
			start,
			end,
			items,
			|_, value| {
				let mut part = ChildPart::detached()?;
				part.commit(value)?;
				Ok(part)
			},
			|part, value| part.commit(value),
		)
	}
}

impl<E: KeyedEntry + 'static> DirectiveState for KeyedList<E> {
	fn dispose(&mut self) {
		self.dispose_entries();
	}
}
