//! Keyed list directives.
//!
//! [`repeat`] renders one template per item and reconciles by key, so a
//! reorder moves existing nodes instead of rebuilding them. [`keyed`] and
//! [`keyed_once`] do the same for caller-built nodes.

use tessera_dom::Node;

use super::{Directive, DirectiveTarget, DirectiveValue};
use crate::child::ChildPart;
use crate::error::RenderResult;
use crate::list::KeyedList;
use crate::value::{Key, Value};

struct Repeat {
	items: Vec<(Key, Value)>,
}

/// Renders `template(item)` for each item, keyed by `key(item)`.
///
/// # Examples
///
/// ```
/// use tessera_dom::Node;
/// use tessera_template::directive::repeat;
/// use tessera_template::{html, render};
///
/// let list = |items: Vec<(u32, &'static str)>| {
/// 	html!(
/// 		"<ul>",
/// 		repeat(items, |(id, _)| *id, |(_, label)| html!("<li>", *label, "</li>")),
/// 		"</ul>"
/// 	)
/// };
///
/// let container = Node::element("div");
/// render(&list(vec![(1, "a"), (2, "b")]), &container).unwrap();
/// render(&list(vec![(2, "b"), (1, "a")]), &container).unwrap();
/// assert_eq!(container.text_content(), "ba");
/// ```
pub fn repeat<T, K, V>(
	items: impl IntoIterator<Item = T>,
	key: impl Fn(&T) -> K,
	template: impl Fn(&T) -> V,
) -> DirectiveValue
where
	K: Into<Key>,
	V: Into<Value>,
{
	DirectiveValue::new(Repeat {
		items: items
			.into_iter()
			.map(|item| (key(&item).into(), template(&item).into()))
			.collect(),
	})
}

impl Directive for Repeat {
	type State = KeyedList<ChildPart>;

	fn name(&self) -> &'static str {
		"repeat"
	}

	fn render(
		&self,
		target: &mut DirectiveTarget<'_>,
		state: &mut Option<KeyedList<ChildPart>>,
	) -> RenderResult<()> {
		let part = target.require_child(self.name())?;
		let (start, end) = part.ensure_markers()?;
		state
			.get_or_insert_with(KeyedList::new)
			.reconcile_parts(&start, &end, self.items.clone())
	}
}

type CreateFn<T> = Box<dyn Fn(&T) -> Node>;
type UpdateFn<T> = Box<dyn Fn(&Node, &T)>;

struct Keyed<T> {
	name: &'static str,
	items: Vec<(Key, T)>,
	create: CreateFn<T>,
	update: Option<UpdateFn<T>>,
}

/// Reconciles caller-built nodes by key.
///
/// `create` builds the node for a new key; `update` refreshes the node of a
/// key that is still present.
pub fn keyed<T, K>(
	items: impl IntoIterator<Item = T>,
	key: impl Fn(&T) -> K,
	create: impl Fn(&T) -> Node + 'static,
	update: impl Fn(&Node, &T) + 'static,
) -> DirectiveValue
where
	T: 'static,
	K: Into<Key>,
{
	DirectiveValue::new(Keyed {
		name: "keyed",
		items: items.into_iter().map(|item| (key(&item).into(), item)).collect(),
		create: Box::new(create),
		update: Some(Box::new(update)),
	})
}

/// Like [`keyed`], but nodes are never updated after creation.
pub fn keyed_once<T, K>(
	items: impl IntoIterator<Item = T>,
	key: impl Fn(&T) -> K,
	create: impl Fn(&T) -> Node + 'static,
) -> DirectiveValue
where
	T: 'static,
	K: Into<Key>,
{
	DirectiveValue::new(Keyed {
		name: "keyed_once",
		items: items.into_iter().map(|item| (key(&item).into(), item)).collect(),
		create: Box::new(create),
		update: None,
	})
}

impl<T: 'static> Directive for Keyed<T> {
	type State = KeyedList<Node>;

	fn name(&self) -> &'static str {
		self.name
	}

	fn render(
		&self,
		target: &mut DirectiveTarget<'_>,
		state: &mut Option<KeyedList<Node>>,
	) -> RenderResult<()> {
		let part = target.require_child(self.name)?;
		let (start, end) = part.ensure_markers()?;
		let items: Vec<(Key, &T)> = self.items.iter().map(|(k, item)| (k.clone(), item)).collect();
		state.get_or_insert_with(KeyedList::new).reconcile(
			&start,
			&end,
			items,
			|_, item| Ok((self.create)(item)),
			|node, item| {
				if let Some(update) = &self.update {
					update(node, item);
				}
				Ok(())
			},
		)
	}
}
