//! Live parts: part descriptors bound to nodes of one template instance.

use tessera_dom::{EventListener, Node};

use crate::child::ChildPart;
use crate::compiler::{Composite, PartDescriptor, PartKind};
use crate::directive::DirectiveSlot;
use crate::registry::Cleanup;
use crate::value::Value;

/// A dynamic position of a template instance.
#[derive(Debug)]
pub enum Part {
	/// Child content; carries the value index it reads.
	Child(usize, ChildPart),
	/// An attribute, simple or composite.
	Attribute(AttributePart),
	/// An element property.
	Property(PropertyPart),
	/// An event listener.
	Event(EventPart),
	/// A registered attribute directive.
	Action(ActionPart),
}

impl Part {
	/// Binds a non-node descriptor to its element.
	pub(crate) fn bind(element: &Node, descriptor: &PartDescriptor) -> Self {
		let name = descriptor.name.clone().unwrap_or_default();
		let index = descriptor.value_index.unwrap_or_default();
		match descriptor.kind {
			PartKind::Node | PartKind::Attribute => Self::Attribute(AttributePart {
				element: element.clone(),
				name,
				binding: match &descriptor.composite {
					Some(composite) => AttributeBinding::Composite(composite.clone()),
					None => AttributeBinding::Simple(index),
				},
				previous: None,
				last_written: None,
				directive: None,
			}),
			PartKind::Property => Self::Property(PropertyPart {
				element: element.clone(),
				name,
				index,
				previous: None,
			}),
			PartKind::Event => Self::Event(EventPart {
				element: element.clone(),
				event_type: name,
				index,
				listener: None,
			}),
			PartKind::Action => Self::Action(ActionPart {
				element: element.clone(),
				name,
				source: match (&descriptor.static_value, descriptor.value_index) {
					(Some(literal), None) => ActionSource::Static(literal.clone()),
					_ => ActionSource::Dynamic(index),
				},
				previous: None,
				cleanup: None,
				ran: false,
			}),
		}
	}

	/// The binding kind.
	pub fn kind(&self) -> PartKind {
		match self {
			Self::Child(..) => PartKind::Node,
			Self::Attribute(_) => PartKind::Attribute,
			Self::Property(_) => PartKind::Property,
			Self::Event(_) => PartKind::Event,
			Self::Action(_) => PartKind::Action,
		}
	}

	/// The element this part writes to, or the anchor of a child part.
	pub fn node(&self) -> &Node {
		match self {
			Self::Child(_, part) => part.anchor(),
			Self::Attribute(part) => &part.element,
			Self::Property(part) => &part.element,
			Self::Event(part) => &part.element,
			Self::Action(part) => &part.element,
		}
	}

	/// The child part, if this is one.
	pub fn as_child(&self) -> Option<&ChildPart> {
		match self {
			Self::Child(_, part) => Some(part),
			_ => None,
		}
	}

	/// Releases listeners, cleanups and nested state.
	///
	/// Calling this more than once is harmless.
	pub(crate) fn dispose(&mut self) {
		match self {
			Self::Child(_, part) => part.dispose(),
			Self::Attribute(part) => {
				if let Some(slot) = part.directive.take() {
					slot.dispose();
				}
			}
			Self::Property(_) => {}
			Self::Event(part) => {
				if let Some(listener) = part.listener.take() {
					part.element.remove_event_listener(&part.event_type, &listener);
				}
			}
			Self::Action(part) => part.run_cleanup(),
		}
	}
}

#[derive(Debug)]
pub(crate) enum AttributeBinding {
	Simple(usize),
	Composite(Composite),
}

/// An attribute binding.
#[derive(Debug)]
pub struct AttributePart {
	pub(crate) element: Node,
	pub(crate) name: String,
	pub(crate) binding: AttributeBinding,
	pub(crate) previous: Option<Value>,
	pub(crate) last_written: Option<String>,
	pub(crate) directive: Option<DirectiveSlot>,
}

impl AttributePart {
	/// Attribute name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns true for multi-slot or partially literal attributes.
	pub fn is_composite(&self) -> bool {
		matches!(self.binding, AttributeBinding::Composite(_))
	}
}

/// An element property binding.
#[derive(Debug)]
pub struct PropertyPart {
	pub(crate) element: Node,
	pub(crate) name: String,
	pub(crate) index: usize,
	pub(crate) previous: Option<Value>,
}

/// An event listener binding.
#[derive(Debug)]
pub struct EventPart {
	pub(crate) element: Node,
	pub(crate) event_type: String,
	pub(crate) index: usize,
	pub(crate) listener: Option<EventListener>,
}

impl EventPart {
	/// Event type.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// Returns true while a listener is attached.
	pub fn is_attached(&self) -> bool {
		self.listener.is_some()
	}
}

#[derive(Debug)]
pub(crate) enum ActionSource {
	Static(String),
	Dynamic(usize),
}

/// A registered attribute directive binding.
pub struct ActionPart {
	pub(crate) element: Node,
	pub(crate) name: String,
	pub(crate) source: ActionSource,
	pub(crate) previous: Option<Value>,
	pub(crate) cleanup: Option<Cleanup>,
	pub(crate) ran: bool,
}

impl ActionPart {
	/// Directive name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns true if the last invocation left a cleanup to run.
	pub fn has_cleanup(&self) -> bool {
		self.cleanup.is_some()
	}

	pub(crate) fn run_cleanup(&mut self) {
		let Some(cleanup) = self.cleanup.take() else {
			return;
		};
		if std::panic::catch_unwind(std::panic::AssertUnwindSafe(cleanup)).is_err() {
			tracing::error!(directive = %self.name, "attribute directive cleanup panicked");
		}
	}
}

impl std::fmt::Debug for ActionPart {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionPart")
			.field("element", &self.element)
			.field("name", &self.name)
			.field("source", &self.source)
			.field("has_cleanup", &self.cleanup.is_some())
			.finish()
	}
}
