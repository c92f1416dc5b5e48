//! Reference-counted tree nodes.
//!
//! A [`Node`] is a cheap, cloneable handle. Children are owned by their parent;
//! the parent link is weak, so dropping the last handle to a detached subtree
//! frees it.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::DomError;
use crate::event::{Event, EventListener, ListenerId};
use crate::mutations::{self, Mutation};
use crate::property::PropertyValue;

/// Process-unique node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
	fn next() -> Self {
		static COUNTER: AtomicU64 = AtomicU64::new(1);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}

	/// Returns the raw identifier.
	pub fn as_u64(self) -> u64 {
		self.0
	}
}

/// The kind of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
	/// Root of a connected tree.
	Document,
	/// Detached container whose children move on insertion.
	Fragment,
	/// An element with a tag name.
	Element,
	/// Character data.
	Text,
	/// A comment.
	Comment,
}

struct RegisteredListener {
	id: ListenerId,
	event_type: String,
	listener: EventListener,
}

struct ElementData {
	tag: String,
	attributes: Vec<(String, String)>,
	properties: HashMap<String, PropertyValue>,
	listeners: Vec<RegisteredListener>,
}

enum NodeKind {
	Document,
	Fragment,
	Element(ElementData),
	Text(String),
	Comment(String),
}

impl NodeKind {
	fn node_type(&self) -> NodeType {
		match self {
			NodeKind::Document => NodeType::Document,
			NodeKind::Fragment => NodeType::Fragment,
			NodeKind::Element(_) => NodeType::Element,
			NodeKind::Text(_) => NodeType::Text,
			NodeKind::Comment(_) => NodeType::Comment,
		}
	}
}

struct NodeData {
	kind: NodeKind,
	parent: Weak<NodeInner>,
	children: Vec<Node>,
}

struct NodeInner {
	id: NodeId,
	data: RefCell<NodeData>,
}

/// A handle to a node in the tree.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

/// A non-owning handle to a node.
#[derive(Clone)]
pub struct WeakNode(Weak<NodeInner>);

impl WeakNode {
	/// Returns the node if it is still alive.
	pub fn upgrade(&self) -> Option<Node> {
		self.0.upgrade().map(Node)
	}
}

impl fmt::Debug for WeakNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.upgrade() {
			Some(node) => write!(f, "WeakNode({:?})", node),
			None => write!(f, "WeakNode(<dropped>)"),
		}
	}
}

impl Node {
	fn with_kind(kind: NodeKind) -> Self {
		Self(Rc::new(NodeInner {
			id: NodeId::next(),
			data: RefCell::new(NodeData {
				kind,
				parent: Weak::new(),
				children: Vec::new(),
			}),
		}))
	}

	/// Creates a document root.
	pub fn document() -> Self {
		Self::with_kind(NodeKind::Document)
	}

	/// Creates an empty fragment.
	pub fn fragment() -> Self {
		Self::with_kind(NodeKind::Fragment)
	}

	/// Creates an element with the given tag name.
	pub fn element(tag: impl Into<String>) -> Self {
		Self::with_kind(NodeKind::Element(ElementData {
			tag: tag.into(),
			attributes: Vec::new(),
			properties: HashMap::new(),
			listeners: Vec::new(),
		}))
	}

	/// Creates a text node.
	pub fn text(content: impl Into<String>) -> Self {
		Self::with_kind(NodeKind::Text(content.into()))
	}

	/// Creates a comment node.
	pub fn comment(content: impl Into<String>) -> Self {
		Self::with_kind(NodeKind::Comment(content.into()))
	}

	fn data(&self) -> Ref<'_, NodeData> {
		self.0.data.borrow()
	}

	fn data_mut(&self) -> RefMut<'_, NodeData> {
		self.0.data.borrow_mut()
	}

	/// Returns the node identity.
	pub fn id(&self) -> NodeId {
		self.0.id
	}

	/// Returns the node kind.
	pub fn node_type(&self) -> NodeType {
		self.data().kind.node_type()
	}

	/// Returns true for element nodes.
	pub fn is_element(&self) -> bool {
		self.node_type() == NodeType::Element
	}

	/// Returns true for text nodes.
	pub fn is_text(&self) -> bool {
		self.node_type() == NodeType::Text
	}

	/// Returns true for comment nodes.
	pub fn is_comment(&self) -> bool {
		self.node_type() == NodeType::Comment
	}

	/// Returns true for fragments.
	pub fn is_fragment(&self) -> bool {
		self.node_type() == NodeType::Fragment
	}

	/// Returns the tag name of an element.
	pub fn tag_name(&self) -> Option<String> {
		match &self.data().kind {
			NodeKind::Element(el) => Some(el.tag.clone()),
			_ => None,
		}
	}

	/// Returns a weak handle.
	pub fn downgrade(&self) -> WeakNode {
		WeakNode(Rc::downgrade(&self.0))
	}

	/// Returns true if both handles point to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	// ------------------------------------------------------------------
	// Navigation
	// ------------------------------------------------------------------

	/// Returns the parent node.
	pub fn parent(&self) -> Option<Node> {
		self.data().parent.upgrade().map(Node)
	}

	/// Returns a snapshot of the children.
	pub fn children(&self) -> Vec<Node> {
		self.data().children.clone()
	}

	/// Returns the number of children.
	pub fn child_count(&self) -> usize {
		self.data().children.len()
	}

	/// Returns the child at `index`.
	pub fn child_at(&self, index: usize) -> Option<Node> {
		self.data().children.get(index).cloned()
	}

	/// Returns the first child.
	pub fn first_child(&self) -> Option<Node> {
		self.data().children.first().cloned()
	}

	/// Returns the last child.
	pub fn last_child(&self) -> Option<Node> {
		self.data().children.last().cloned()
	}

	/// Returns this node's position among its parent's children.
	pub fn index_in_parent(&self) -> Option<usize> {
		let parent = self.parent()?;
		let data = parent.data();
		data.children.iter().position(|c| c.ptr_eq(self))
	}

	/// Returns the following sibling.
	pub fn next_sibling(&self) -> Option<Node> {
		let parent = self.parent()?;
		let data = parent.data();
		let index = data.children.iter().position(|c| c.ptr_eq(self))?;
		data.children.get(index + 1).cloned()
	}

	/// Returns the preceding sibling.
	pub fn previous_sibling(&self) -> Option<Node> {
		let parent = self.parent()?;
		let data = parent.data();
		let index = data.children.iter().position(|c| c.ptr_eq(self))?;
		index.checked_sub(1).and_then(|i| data.children.get(i).cloned())
	}

	/// Returns true if `other` is this node or one of its descendants.
	pub fn contains(&self, other: &Node) -> bool {
		let mut current = Some(other.clone());
		while let Some(node) = current {
			if node.ptr_eq(self) {
				return true;
			}
			current = node.parent();
		}
		false
	}

	/// Returns the topmost ancestor.
	pub fn root(&self) -> Node {
		let mut current = self.clone();
		while let Some(parent) = current.parent() {
			current = parent;
		}
		current
	}

	/// Returns true if the node is attached to a document.
	pub fn is_connected(&self) -> bool {
		self.root().node_type() == NodeType::Document
	}

	// ------------------------------------------------------------------
	// Structure
	// ------------------------------------------------------------------

	fn can_have_children(&self) -> bool {
		matches!(
			self.data().kind,
			NodeKind::Document | NodeKind::Fragment | NodeKind::Element(_)
		)
	}

	fn detach(&self) -> bool {
		let Some(parent) = self.parent() else {
			return false;
		};
		parent.data_mut().children.retain(|c| !c.ptr_eq(self));
		self.data_mut().parent = Weak::new();
		true
	}

	/// Appends `child` as the last child.
	pub fn append_child(&self, child: &Node) -> Result<(), DomError> {
		self.insert_before(child, None)
	}

	/// Inserts `child` before `reference`, or at the end when `reference` is `None`.
	///
	/// A node already in the tree is moved. Inserting a fragment moves its
	/// children and leaves the fragment empty.
	pub fn insert_before(&self, child: &Node, reference: Option<&Node>) -> Result<(), DomError> {
		if !self.can_have_children() {
			return Err(DomError::NotAContainer(self.node_type()));
		}
		if child.contains(self) {
			return Err(DomError::HierarchyRequest);
		}
		if let Some(reference) = reference
			&& !reference.parent().is_some_and(|p| p.ptr_eq(self))
		{
			return Err(DomError::NotAChild);
		}

		// Inserting a node before itself is a no-op move.
		let reference = match reference {
			Some(r) if r.ptr_eq(child) => child.next_sibling(),
			other => other.cloned(),
		};

		let moving: Vec<Node> = if child.is_fragment() {
			let taken = std::mem::take(&mut child.data_mut().children);
			for node in &taken {
				node.data_mut().parent = Weak::new();
			}
			taken
		} else {
			child.detach();
			vec![child.clone()]
		};

		let mut index = match &reference {
			Some(r) => self
				.data()
				.children
				.iter()
				.position(|c| c.ptr_eq(r))
				.ok_or(DomError::NotAChild)?,
			None => self.child_count(),
		};

		for node in moving {
			node.data_mut().parent = Rc::downgrade(&self.0);
			self.data_mut().children.insert(index, node);
			index += 1;
			mutations::record(Mutation::Insertion);
		}
		Ok(())
	}

	/// Removes `child` from this node.
	pub fn remove_child(&self, child: &Node) -> Result<(), DomError> {
		if !child.parent().is_some_and(|p| p.ptr_eq(self)) {
			return Err(DomError::NotAChild);
		}
		child.detach();
		mutations::record(Mutation::Removal);
		Ok(())
	}

	/// Replaces `old` with `new`.
	pub fn replace_child(&self, new: &Node, old: &Node) -> Result<(), DomError> {
		self.insert_before(new, Some(old))?;
		self.remove_child(old)
	}

	/// Detaches this node from its parent, if any.
	pub fn remove(&self) {
		if self.detach() {
			mutations::record(Mutation::Removal);
		}
	}

	/// Removes all children.
	pub fn clear_children(&self) {
		let children = std::mem::take(&mut self.data_mut().children);
		for child in children {
			child.data_mut().parent = Weak::new();
			mutations::record(Mutation::Removal);
		}
	}

	/// Clones this node and its subtree.
	///
	/// Attributes and character data are copied; properties and listeners are not.
	pub fn deep_clone(&self) -> Node {
		let copy = {
			let data = self.data();
			let kind = match &data.kind {
				NodeKind::Document => NodeKind::Document,
				NodeKind::Fragment => NodeKind::Fragment,
				NodeKind::Element(el) => NodeKind::Element(ElementData {
					tag: el.tag.clone(),
					attributes: el.attributes.clone(),
					properties: HashMap::new(),
					listeners: Vec::new(),
				}),
				NodeKind::Text(t) => NodeKind::Text(t.clone()),
				NodeKind::Comment(c) => NodeKind::Comment(c.clone()),
			};
			Node::with_kind(kind)
		};
		for child in self.children() {
			let cloned = child.deep_clone();
			cloned.data_mut().parent = Rc::downgrade(&copy.0);
			copy.data_mut().children.push(cloned);
		}
		copy
	}

	// ------------------------------------------------------------------
	// Attributes and properties
	// ------------------------------------------------------------------

	fn with_element<R>(
		&self,
		operation: &'static str,
		f: impl FnOnce(&ElementData) -> R,
	) -> Result<R, DomError> {
		match &self.data().kind {
			NodeKind::Element(el) => Ok(f(el)),
			other => Err(DomError::NotAnElement {
				operation,
				found: other.node_type(),
			}),
		}
	}

	fn with_element_mut<R>(
		&self,
		operation: &'static str,
		f: impl FnOnce(&mut ElementData) -> R,
	) -> Result<R, DomError> {
		match &mut self.data_mut().kind {
			NodeKind::Element(el) => Ok(f(el)),
			other => Err(DomError::NotAnElement {
				operation,
				found: other.node_type(),
			}),
		}
	}

	/// Returns an attribute value.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.with_element("get_attribute", |el| {
			el.attributes
				.iter()
				.find(|(n, _)| n == name)
				.map(|(_, v)| v.clone())
		})
		.ok()
		.flatten()
	}

	/// Returns true if the attribute is present.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.get_attribute(name).is_some()
	}

	/// Sets an attribute, keeping its position if it already exists.
	pub fn set_attribute(&self, name: &str, value: impl Into<String>) -> Result<(), DomError> {
		let value = value.into();
		self.with_element_mut("set_attribute", |el| {
			match el.attributes.iter_mut().find(|(n, _)| n == name) {
				Some((_, existing)) => *existing = value,
				None => el.attributes.push((name.to_string(), value)),
			}
		})?;
		mutations::record(Mutation::AttributeSet);
		Ok(())
	}

	/// Removes an attribute. Returns true if it was present.
	pub fn remove_attribute(&self, name: &str) -> bool {
		let removed = self
			.with_element_mut("remove_attribute", |el| {
				let before = el.attributes.len();
				el.attributes.retain(|(n, _)| n != name);
				before != el.attributes.len()
			})
			.unwrap_or(false);
		if removed {
			mutations::record(Mutation::AttributeRemoval);
		}
		removed
	}

	/// Returns the attribute names in insertion order.
	pub fn attribute_names(&self) -> Vec<String> {
		self.attributes().into_iter().map(|(n, _)| n).collect()
	}

	/// Returns all attributes in insertion order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.with_element("attributes", |el| el.attributes.clone())
			.unwrap_or_default()
	}

	/// Assigns a property.
	pub fn set_property(&self, name: &str, value: PropertyValue) -> Result<(), DomError> {
		self.with_element_mut("set_property", |el| {
			el.properties.insert(name.to_string(), value);
		})?;
		mutations::record(Mutation::PropertySet);
		Ok(())
	}

	/// Reads a property.
	pub fn property(&self, name: &str) -> Option<PropertyValue> {
		self.with_element("property", |el| el.properties.get(name).cloned())
			.ok()
			.flatten()
	}

	// ------------------------------------------------------------------
	// Events
	// ------------------------------------------------------------------

	/// Attaches a listener for `event_type`.
	pub fn add_event_listener(
		&self,
		event_type: &str,
		listener: EventListener,
	) -> Result<ListenerId, DomError> {
		let id = ListenerId::next();
		self.with_element_mut("add_event_listener", |el| {
			el.listeners.push(RegisteredListener {
				id,
				event_type: event_type.to_string(),
				listener,
			});
		})?;
		mutations::record(Mutation::ListenerAdded);
		Ok(id)
	}

	/// Detaches a previously attached listener. Returns true if it was attached.
	pub fn remove_event_listener(&self, event_type: &str, listener: &EventListener) -> bool {
		let removed = self
			.with_element_mut("remove_event_listener", |el| {
				let position = el
					.listeners
					.iter()
					.position(|l| l.event_type == event_type && l.listener.ptr_eq(listener));
				position.map(|i| el.listeners.remove(i)).is_some()
			})
			.unwrap_or(false);
		if removed {
			mutations::record(Mutation::ListenerRemoved);
		}
		removed
	}

	/// Detaches a listener by id. Returns true if it was attached.
	pub fn remove_event_listener_by_id(&self, id: ListenerId) -> bool {
		let removed = self
			.with_element_mut("remove_event_listener_by_id", |el| {
				let before = el.listeners.len();
				el.listeners.retain(|l| l.id != id);
				before != el.listeners.len()
			})
			.unwrap_or(false);
		if removed {
			mutations::record(Mutation::ListenerRemoved);
		}
		removed
	}

	/// Returns the number of listeners attached for `event_type`.
	pub fn listener_count(&self, event_type: &str) -> usize {
		self.with_element("listener_count", |el| {
			el.listeners
				.iter()
				.filter(|l| l.event_type == event_type)
				.count()
		})
		.unwrap_or(0)
	}

	/// Delivers `event` to this node's listeners for its type.
	///
	/// Returns the number of listeners invoked. Listeners may mutate the tree,
	/// including this node's listener list.
	pub fn dispatch_event(&self, event: &Event) -> usize {
		event.set_target(self);
		let listeners: Vec<EventListener> = self
			.with_element("dispatch_event", |el| {
				el.listeners
					.iter()
					.filter(|l| l.event_type == event.event_type())
					.map(|l| l.listener.clone())
					.collect()
			})
			.unwrap_or_default();
		for listener in &listeners {
			listener.call(event);
		}
		listeners.len()
	}

	// ------------------------------------------------------------------
	// Character data
	// ------------------------------------------------------------------

	/// Returns the data of a text or comment node, like DOM `nodeValue`.
	pub fn node_value(&self) -> Option<String> {
		match &self.data().kind {
			NodeKind::Text(t) | NodeKind::Comment(t) => Some(t.clone()),
			_ => None,
		}
	}

	/// Replaces the data of a text or comment node.
	pub fn set_text(&self, content: impl Into<String>) -> Result<(), DomError> {
		match &mut self.data_mut().kind {
			NodeKind::Text(t) | NodeKind::Comment(t) => *t = content.into(),
			other => return Err(DomError::NotCharacterData(other.node_type())),
		}
		mutations::record(Mutation::TextWrite);
		Ok(())
	}

	/// Concatenated text of all descendant text nodes.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		match &self.data().kind {
			NodeKind::Text(t) => out.push_str(t),
			NodeKind::Comment(_) => {}
			_ => {
				for child in &self.data().children {
					child.collect_text(out);
				}
			}
		}
	}

	pub(crate) fn visit<R>(&self, f: impl FnOnce(NodeView<'_>) -> R) -> R {
		let data = self.data();
		let view = match &data.kind {
			NodeKind::Document => NodeView::Container,
			NodeKind::Fragment => NodeView::Container,
			NodeKind::Element(el) => NodeView::Element {
				tag: &el.tag,
				attributes: &el.attributes,
			},
			NodeKind::Text(t) => NodeView::Text(t),
			NodeKind::Comment(c) => NodeView::Comment(c),
		};
		f(view)
	}
}

/// Borrowed view used by the serializer.
pub(crate) enum NodeView<'a> {
	Container,
	Element {
		tag: &'a str,
		attributes: &'a [(String, String)],
	},
	Text(&'a str),
	Comment(&'a str),
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Node {}

impl Hash for Node {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let id = self.id().as_u64();
		match &self.data().kind {
			NodeKind::Document => write!(f, "#document@{}", id),
			NodeKind::Fragment => write!(f, "#fragment@{}", id),
			NodeKind::Element(el) => write!(f, "<{}>@{}", el.tag, id),
			NodeKind::Text(t) => write!(f, "#text({:?})@{}", t, id),
			NodeKind::Comment(c) => write!(f, "<!--{}-->@{}", c, id),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn list_of(tags: &[&str]) -> (Node, Vec<Node>) {
		let parent = Node::element("ul");
		let children: Vec<Node> = tags.iter().map(|t| Node::element(*t)).collect();
		for child in &children {
			parent.append_child(child).unwrap();
		}
		(parent, children)
	}

	#[rstest]
	fn test_append_sets_parent() {
		let (parent, children) = list_of(&["a", "b"]);
		assert_eq!(parent.child_count(), 2);
		assert_eq!(children[0].parent(), Some(parent.clone()));
		assert_eq!(children[0].next_sibling(), Some(children[1].clone()));
		assert_eq!(children[1].previous_sibling(), Some(children[0].clone()));
		assert_eq!(children[1].next_sibling(), None);
	}

	#[rstest]
	fn test_insert_before_moves_existing_node() {
		let (parent, children) = list_of(&["a", "b", "c"]);
		parent.insert_before(&children[2], Some(&children[0])).unwrap();
		let tags: Vec<String> = parent
			.children()
			.iter()
			.filter_map(Node::tag_name)
			.collect();
		assert_eq!(tags, vec!["c", "a", "b"]);
	}

	#[rstest]
	fn test_insert_before_self_is_noop() {
		let (parent, children) = list_of(&["a", "b"]);
		parent.insert_before(&children[0], Some(&children[0])).unwrap();
		assert_eq!(parent.children(), children);
	}

	#[rstest]
	fn test_fragment_insertion_moves_children() {
		let parent = Node::element("div");
		let fragment = Node::fragment();
		fragment.append_child(&Node::text("x")).unwrap();
		fragment.append_child(&Node::text("y")).unwrap();
		parent.append_child(&fragment).unwrap();
		assert_eq!(parent.child_count(), 2);
		assert_eq!(fragment.child_count(), 0);
		assert_eq!(parent.text_content(), "xy");
	}

	#[rstest]
	fn test_hierarchy_violation_rejected() {
		let outer = Node::element("div");
		let inner = Node::element("span");
		outer.append_child(&inner).unwrap();
		assert_eq!(inner.append_child(&outer), Err(DomError::HierarchyRequest));
		assert_eq!(outer.append_child(&outer), Err(DomError::HierarchyRequest));
	}

	#[rstest]
	fn test_text_cannot_hold_children() {
		let text = Node::text("a");
		assert_eq!(
			text.append_child(&Node::text("b")),
			Err(DomError::NotAContainer(NodeType::Text))
		);
	}

	#[rstest]
	fn test_remove_child_requires_parent() {
		let (parent, children) = list_of(&["a"]);
		let stranger = Node::element("p");
		assert_eq!(parent.remove_child(&stranger), Err(DomError::NotAChild));
		parent.remove_child(&children[0]).unwrap();
		assert_eq!(children[0].parent(), None);
	}

	#[rstest]
	fn test_is_connected() {
		let doc = Node::document();
		let div = Node::element("div");
		assert!(!div.is_connected());
		doc.append_child(&div).unwrap();
		assert!(div.is_connected());
		div.remove();
		assert!(!div.is_connected());
	}

	#[rstest]
	fn test_deep_clone_skips_listeners() {
		let button = Node::element("button");
		button.set_attribute("type", "submit").unwrap();
		button
			.add_event_listener("click", EventListener::new(|_| {}))
			.unwrap();
		button.append_child(&Node::text("Go")).unwrap();

		let copy = button.deep_clone();
		assert_ne!(copy, button);
		assert_eq!(copy.get_attribute("type").as_deref(), Some("submit"));
		assert_eq!(copy.text_content(), "Go");
		assert_eq!(copy.listener_count("click"), 0);
	}

	#[rstest]
	fn test_attribute_roundtrip() {
		let el = Node::element("input");
		el.set_attribute("value", "a").unwrap();
		el.set_attribute("name", "q").unwrap();
		el.set_attribute("value", "b").unwrap();
		assert_eq!(el.attribute_names(), vec!["value", "name"]);
		assert!(el.remove_attribute("value"));
		assert!(!el.remove_attribute("value"));
		assert!(!el.has_attribute("value"));
	}

	#[rstest]
	fn test_listener_removal_by_identity() {
		let el = Node::element("button");
		let first = EventListener::new(|_| {});
		let second = EventListener::new(|_| {});
		el.add_event_listener("click", first.clone()).unwrap();
		assert!(!el.remove_event_listener("click", &second));
		assert!(el.remove_event_listener("click", &first));
		assert_eq!(el.listener_count("click"), 0);
	}

	#[rstest]
	fn test_set_text_on_element_fails() {
		let el = Node::element("p");
		assert_eq!(
			el.set_text("x"),
			Err(DomError::NotCharacterData(NodeType::Element))
		);
	}

	#[rstest]
	fn test_node_value_of_character_data() {
		let text = Node::text("a");
		text.set_text("b").unwrap();
		assert_eq!(text.node_value().as_deref(), Some("b"));
		assert_eq!(Node::comment("c").node_value().as_deref(), Some("c"));
		assert_eq!(Node::element("p").node_value(), None);
	}
}
