//! Child-content parts.
//!
//! A [`ChildPart`] owns a region of its parent's children. The region starts at
//! an empty text node (the *anchor*) that replaced the template's marker. Text
//! values are written straight into the anchor. Any other content is placed
//! between a pair of comment markers created lazily after the anchor:
//!
//! ```text
//! #text(anchor)  <!---->  ...rendered nodes...  <!---->
//! ```
//!
//! Everything between the markers belongs to the part and nothing else.

use tessera_dom::Node;

use crate::cache;
use crate::directive::{DirectiveSlot, DirectiveTarget, DirectiveValue};
use crate::error::{RenderError, RenderResult};
use crate::instance::TemplateInstance;
use crate::list::{KeyedEntry, KeyedList};
use crate::strings::TemplateResult;
use crate::value::{Key, Value};

enum Content {
	Empty,
	Text,
	Template(TemplateInstance),
	Node(Node),
	List(Vec<ChildPart>),
	Keyed(KeyedList<ChildPart>),
}

/// A dynamic child position.
pub struct ChildPart {
	anchor: Node,
	markers: Option<(Node, Node)>,
	content: Content,
	directive: Option<DirectiveSlot>,
	previous: Option<Value>,
	holder: Option<Node>,
}

impl ChildPart {
	pub(crate) fn new(anchor: Node) -> Self {
		Self {
			anchor,
			markers: None,
			content: Content::Empty,
			directive: None,
			previous: None,
			holder: None,
		}
	}

	/// Creates a part in its own fragment, markers included, ready to be moved
	/// into place as a unit with [`nodes`](Self::nodes).
	pub(crate) fn detached() -> RenderResult<Self> {
		let holder = Node::fragment();
		let anchor = Node::text("");
		holder.append_child(&anchor)?;
		let mut part = Self::new(anchor);
		part.holder = Some(holder);
		part.ensure_markers()?;
		Ok(part)
	}

	/// The anchor text node.
	pub fn anchor(&self) -> &Node {
		&self.anchor
	}

	/// The node currently containing the region.
	pub fn parent(&self) -> Option<Node> {
		self.anchor.parent()
	}

	/// Start and end markers, if created.
	pub fn markers(&self) -> Option<&(Node, Node)> {
		self.markers.as_ref()
	}

	/// Creates the start and end markers after the anchor if they do not exist.
	pub fn ensure_markers(&mut self) -> RenderResult<(Node, Node)> {
		if let Some(markers) = &self.markers {
			return Ok(markers.clone());
		}
		let parent = self.anchor.parent().ok_or_else(|| RenderError::MissingParent {
			directive: "child content".to_string(),
		})?;
		let start = Node::comment("");
		let end = Node::comment("");
		parent.insert_before(&start, self.anchor.next_sibling().as_ref())?;
		parent.insert_before(&end, start.next_sibling().as_ref())?;
		self.markers = Some((start.clone(), end.clone()));
		Ok((start, end))
	}

	/// Nodes rendered between the markers.
	pub fn rendered_nodes(&self) -> Vec<Node> {
		let Some((start, end)) = &self.markers else {
			return Vec::new();
		};
		let mut nodes = Vec::new();
		let mut cursor = start.next_sibling();
		while let Some(node) = cursor {
			if node.ptr_eq(end) {
				break;
			}
			cursor = node.next_sibling();
			nodes.push(node);
		}
		nodes
	}

	/// Every node the part occupies, anchor and markers included.
	pub fn nodes(&self) -> Vec<Node> {
		let mut nodes = vec![self.anchor.clone()];
		if let Some((start, end)) = &self.markers {
			nodes.push(start.clone());
			nodes.extend(self.rendered_nodes());
			nodes.push(end.clone());
		}
		nodes
	}

	/// Removes every node between the markers.
	pub fn clear(&mut self) {
		for node in self.rendered_nodes() {
			node.remove();
		}
	}

	/// Inserts `node` (or a fragment's children) at the end of the region.
	pub fn insert(&mut self, node: &Node) -> RenderResult<()> {
		let (_, end) = self.ensure_markers()?;
		let parent = end.parent().ok_or_else(|| RenderError::MissingParent {
			directive: "child content".to_string(),
		})?;
		parent.insert_before(node, Some(&end))?;
		Ok(())
	}

	/// Renders `result` into the region, updating `current` in place when it
	/// was built from the same template and replacing it otherwise.
	pub fn render_template(
		&mut self,
		result: &TemplateResult,
		current: &mut Option<TemplateInstance>,
	) -> RenderResult<()> {
		if let Some(instance) = current.as_mut()
			&& instance.key() == result.key()
		{
			return instance.update(result.values());
		}
		if let Some(mut old) = current.take() {
			old.dispose();
		}
		self.clear();

		let compiled = cache::compiled_template(result)?;
		let (fragment, mut instance) = TemplateInstance::new(compiled)?;
		let outcome = instance.update(result.values());
		self.insert(&fragment)?;
		*current = Some(instance);
		outcome
	}

	/// Commits a value into this position.
	///
	/// Unchanged primitives and nodes are skipped. On failure the position is
	/// left empty and the error returned, except that a nested template which
	/// was instantiated keeps whatever its other parts rendered.
	pub(crate) fn commit(&mut self, mut value: &Value) -> RenderResult<()> {
		while let Value::Keyed(_, inner) = value {
			value = inner.as_ref();
		}
		if !value.is_directive()
			&& self
				.previous
				.as_ref()
				.is_some_and(|previous| previous.same_as(value))
		{
			return Ok(());
		}

		let result = match value {
			Value::Directive(directive) => self.commit_directive(directive),
			Value::Template(template) => self.commit_template(template),
			Value::Node(node) => self.commit_node(node),
			Value::List(items) => self.commit_list(items),
			Value::Keyed(_, inner) => self.commit(inner),
			Value::Handler(_) => {
				tracing::warn!("event handler placed in a child position renders nothing");
				self.commit_text(String::new())
			}
			primitive => {
				let text = primitive.to_text().unwrap_or_default();
				self.commit_text(text)
			}
		};

		match result {
			Ok(()) => {
				self.previous = (value.is_primitive() || matches!(value, Value::Node(_)))
					.then(|| value.clone());
				Ok(())
			}
			Err(err) => {
				// Lists keep the items that did render, and a live nested
				// instance keeps its other parts.
				let partial = matches!(value, Value::List(_))
					|| (matches!(value, Value::Template(_))
						&& matches!(self.content, Content::Template(_)));
				if !partial {
					self.reset();
				}
				self.previous = None;
				Err(err)
			}
		}
	}

	fn commit_text(&mut self, text: String) -> RenderResult<()> {
		if !matches!(self.content, Content::Empty | Content::Text) || self.directive.is_some() {
			self.reset();
		}
		if self.anchor.node_value().as_deref() != Some(text.as_str()) {
			self.anchor.set_text(text)?;
		}
		self.content = Content::Text;
		Ok(())
	}

	fn commit_template(&mut self, result: &TemplateResult) -> RenderResult<()> {
		let mut current = match self.take_content() {
			Content::Template(instance) if self.directive.is_none() => Some(instance),
			other => {
				self.content = other;
				self.reset();
				None
			}
		};
		let outcome = self.render_template(result, &mut current);
		if let Some(instance) = current {
			self.content = Content::Template(instance);
		}
		outcome
	}

	fn commit_node(&mut self, node: &Node) -> RenderResult<()> {
		if let Content::Node(current) = &self.content
			&& current.ptr_eq(node)
		{
			return Ok(());
		}
		self.reset();
		self.insert(node)?;
		self.content = Content::Node(node.clone());
		Ok(())
	}

	fn commit_list(&mut self, items: &[Value]) -> RenderResult<()> {
		let keyed: Option<Vec<(Key, Value)>> = items
			.iter()
			.map(|item| match item {
				Value::Keyed(key, value) => Some((key.clone(), (**value).clone())),
				_ => None,
			})
			.collect();
		match keyed {
			Some(entries) if !entries.is_empty() => self.commit_keyed(entries),
			_ => self.commit_unkeyed(items),
		}
	}

	fn commit_unkeyed(&mut self, items: &[Value]) -> RenderResult<()> {
		self.reset();
		self.ensure_markers()?;
		let mut parts = Vec::with_capacity(items.len());
		let mut first_error = None;
		for item in items {
			let mut part = ChildPart::detached()?;
			if let Err(err) = part.commit(item) {
				tracing::error!(error = %err, "list item failed to render");
				first_error.get_or_insert(err);
			}
			for node in part.nodes() {
				self.insert(&node)?;
			}
			parts.push(part);
		}
		self.content = Content::List(parts);
		first_error.map_or(Ok(()), Err)
	}

	fn commit_keyed(&mut self, entries: Vec<(Key, Value)>) -> RenderResult<()> {
		let (start, end) = self.ensure_markers()?;
		if !matches!(self.content, Content::Keyed(_)) || self.directive.is_some() {
			self.reset();
			self.content = Content::Keyed(KeyedList::new());
		}
		let Content::Keyed(list) = &mut self.content else {
			return Ok(());
		};
		list.reconcile_parts(&start, &end, entries)
	}

	fn commit_directive(&mut self, directive: &DirectiveValue) -> RenderResult<()> {
		if !matches!(self.content, Content::Empty) {
			self.reset();
		}
		let mut slot = self.directive.take();
		let result = {
			let mut target = DirectiveTarget::child(self);
			directive.apply(&mut target, &mut slot)
		};
		self.directive = slot;
		self.content = Content::Empty;
		result
	}

	fn take_content(&mut self) -> Content {
		std::mem::replace(&mut self.content, Content::Empty)
	}

	/// Disposes content and directive state without touching the tree.
	pub(crate) fn dispose(&mut self) {
		match self.take_content() {
			Content::Template(mut instance) => instance.dispose(),
			Content::List(mut parts) => {
				for part in &mut parts {
					part.dispose();
				}
			}
			Content::Keyed(mut list) => list.dispose_entries(),
			Content::Empty | Content::Text | Content::Node(_) => {}
		}
		if let Some(slot) = self.directive.take() {
			slot.dispose();
		}
		self.previous = None;
	}

	/// Disposes content and empties the region.
	fn reset(&mut self) {
		self.dispose();
		self.clear();
		if self.anchor.node_value().is_some_and(|text| !text.is_empty()) {
			// The anchor is a text node, so this cannot fail.
			let _ = self.anchor.set_text("");
		}
	}
}

impl KeyedEntry for ChildPart {
	fn nodes(&self) -> Vec<Node> {
		ChildPart::nodes(self)
	}

	fn dispose(&mut self) {
		ChildPart::dispose(self);
	}
}

impl std::fmt::Debug for ChildPart {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChildPart")
			.field("anchor", &self.anchor)
			.field("has_markers", &self.markers.is_some())
			.field("has_directive", &self.directive.is_some())
			.finish()
	}
}
