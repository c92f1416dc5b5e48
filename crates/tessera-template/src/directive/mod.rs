//! Directive protocol and built-in directives.
//!
//! A directive is a value that takes over rendering of the position it is
//! placed in. Instead of being stringified or inserted, it is invoked with a
//! [`DirectiveTarget`] and the state it left behind on its previous commit to
//! the same position. State is typed per directive; when a different directive
//! type lands in a position, the old state is disposed first.
//!
//! ```
//! use tessera_template::directive::{Directive, DirectiveState, DirectiveTarget};
//! use tessera_template::{DirectiveValue, RenderResult};
//!
//! struct Counter;
//!
//! #[derive(Default)]
//! struct Count(u32);
//!
//! impl DirectiveState for Count {}
//!
//! impl Directive for Counter {
//! 	type State = Count;
//!
//! 	fn name(&self) -> &'static str {
//! 		"counter"
//! 	}
//!
//! 	fn render(&self, target: &mut DirectiveTarget<'_>, state: &mut Option<Count>) -> RenderResult<()> {
//! 		let count = state.get_or_insert_with(Count::default);
//! 		count.0 += 1;
//! 		if let Some(element) = target.element() {
//! 			element.set_attribute("data-renders", count.0.to_string())?;
//! 		}
//! 		Ok(())
//! 	}
//! }
//!
//! let value = DirectiveValue::new(Counter);
//! assert_eq!(value.name(), "counter");
//! ```

mod class_map;
mod relocate;
mod repeat;
mod unsafe_html;
mod when;

pub use class_map::{ClassMapState, StyleMapState, class_map, style_map};
pub use relocate::{RelocateState, relocate};
pub use repeat::{keyed, keyed_once, repeat};
pub use unsafe_html::{UnsafeHtmlState, unsafe_html};
pub use when::{WhenState, when, when_else};

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use tessera_dom::Node;

use crate::child::ChildPart;
use crate::error::{RenderError, RenderResult};

/// State a directive keeps between commits to the same position.
pub trait DirectiveState: 'static {
	/// Releases resources when the position is torn down or taken over by a
	/// different directive.
	fn dispose(&mut self) {}
}

impl DirectiveState for () {}

/// A renderer that takes over its position.
pub trait Directive: 'static {
	/// Per-position state.
	type State: DirectiveState;

	/// Name used in diagnostics.
	fn name(&self) -> &'static str;

	/// Renders into `target`. `state` holds whatever the previous commit of the
	/// same directive type left in this position.
	fn render(&self, target: &mut DirectiveTarget<'_>, state: &mut Option<Self::State>) -> RenderResult<()>;
}

pub(crate) trait ErasedState {
	fn dispose(&mut self);
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<S: DirectiveState> ErasedState for S {
	fn dispose(&mut self) {
		DirectiveState::dispose(self);
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}
}

trait ErasedDirective {
	fn name(&self) -> &'static str;
	fn state_type(&self) -> TypeId;
	fn render_erased(
		&self,
		target: &mut DirectiveTarget<'_>,
		slot: &mut Option<Box<dyn ErasedState>>,
	) -> RenderResult<()>;
}

impl<D: Directive> ErasedDirective for D {
	fn name(&self) -> &'static str {
		Directive::name(self)
	}

	fn state_type(&self) -> TypeId {
		TypeId::of::<D::State>()
	}

	fn render_erased(
		&self,
		target: &mut DirectiveTarget<'_>,
		slot: &mut Option<Box<dyn ErasedState>>,
	) -> RenderResult<()> {
		let mut typed: Option<D::State> = slot
			.take()
			.and_then(|state| state.into_any().downcast::<D::State>().ok())
			.map(|state| *state);
		let result = self.render(target, &mut typed);
		*slot = typed.map(|state| Box::new(state) as Box<dyn ErasedState>);
		result
	}
}

/// A directive placed into a template value slot.
#[derive(Clone)]
pub struct DirectiveValue(Rc<dyn ErasedDirective>);

impl DirectiveValue {
	/// Wraps a directive.
	pub fn new<D: Directive>(directive: D) -> Self {
		Self(Rc::new(directive))
	}

	/// Directive name.
	pub fn name(&self) -> &'static str {
		self.0.name()
	}

	/// Returns true if both values wrap the same directive instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Renders into `target`, reusing the state in `slot` when it belongs to
	/// this directive's state type and disposing it otherwise.
	pub(crate) fn apply(
		&self,
		target: &mut DirectiveTarget<'_>,
		slot: &mut Option<DirectiveSlot>,
	) -> RenderResult<()> {
		let state_type = self.0.state_type();
		let mut state = match slot.take() {
			Some(previous) if previous.state_type == state_type => Some(previous.state),
			Some(mut previous) => {
				tracing::debug!(
					from = previous.name,
					to = self.name(),
					"directive type changed; disposing previous state"
				);
				previous.state.dispose();
				if let Some(part) = target.child_part() {
					part.clear();
				}
				None
			}
			None => None,
		};
		let result = self.0.render_erased(target, &mut state);
		*slot = state.map(|state| DirectiveSlot {
			state_type,
			name: self.name(),
			state,
		});
		result
	}
}

impl fmt::Debug for DirectiveValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("DirectiveValue").field(&self.name()).finish()
	}
}

/// Directive state stored in a part between commits.
pub(crate) struct DirectiveSlot {
	state_type: TypeId,
	name: &'static str,
	state: Box<dyn ErasedState>,
}

impl fmt::Debug for DirectiveSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DirectiveSlot").field("directive", &self.name).finish()
	}
}

impl DirectiveSlot {
	pub(crate) fn dispose(mut self) {
		tracing::trace!(directive = self.name, "disposing directive state");
		self.state.dispose();
	}
}

enum TargetInner<'a> {
	Child(&'a mut ChildPart),
	Attribute { element: &'a Node, name: &'a str },
}

/// The position a directive renders into.
pub struct DirectiveTarget<'a> {
	inner: TargetInner<'a>,
}

impl<'a> DirectiveTarget<'a> {
	pub(crate) fn child(part: &'a mut ChildPart) -> Self {
		Self {
			inner: TargetInner::Child(part),
		}
	}

	pub(crate) fn attribute(element: &'a Node, name: &'a str) -> Self {
		Self {
			inner: TargetInner::Attribute { element, name },
		}
	}

	/// `"child"` or `"attribute"`.
	pub fn position(&self) -> &'static str {
		match self.inner {
			TargetInner::Child(_) => "child",
			TargetInner::Attribute { .. } => "attribute",
		}
	}

	/// The owning element: the attribute's element, or the element enclosing a
	/// child position.
	pub fn element(&self) -> Option<Node> {
		match &self.inner {
			TargetInner::Attribute { element, .. } => Some((*element).clone()),
			TargetInner::Child(part) => part.parent().filter(Node::is_element),
		}
	}

	/// Attribute name in attribute position.
	pub fn attribute_name(&self) -> Option<&str> {
		match &self.inner {
			TargetInner::Attribute { name, .. } => Some(*name),
			TargetInner::Child(_) => None,
		}
	}

	/// The child part in child position.
	pub fn child_part(&mut self) -> Option<&mut ChildPart> {
		match &mut self.inner {
			TargetInner::Child(part) => Some(&mut **part),
			TargetInner::Attribute { .. } => None,
		}
	}

	/// The child part, or an error naming `directive` in any other position.
	pub fn require_child(&mut self, directive: &str) -> RenderResult<&mut ChildPart> {
		let position = self.position();
		self.child_part()
			.ok_or_else(|| RenderError::UnsupportedPosition {
				directive: directive.to_string(),
				position,
			})
	}

	/// The owning element, or an error naming `directive` if there is none.
	pub fn require_element(&self, directive: &str) -> RenderResult<Node> {
		self.element().ok_or_else(|| RenderError::MissingParent {
			directive: directive.to_string(),
		})
	}
}
