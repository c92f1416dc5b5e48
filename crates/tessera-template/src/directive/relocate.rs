//! Moving an element elsewhere in the tree.

use tessera_dom::Node;

use super::{Directive, DirectiveState, DirectiveTarget, DirectiveValue};
use crate::error::{RenderError, RenderResult};

struct Relocate {
	destination: Node,
	persist: bool,
}

/// Tracks a relocated element and the placeholder marking its origin.
#[derive(Debug)]
pub struct RelocateState {
	element: Node,
	placeholder: Node,
	persist: bool,
}

impl DirectiveState for RelocateState {
	fn dispose(&mut self) {
		if !self.persist
			&& let Some(parent) = self.placeholder.parent()
			&& let Err(err) = parent.insert_before(&self.element, Some(&self.placeholder))
		{
			tracing::warn!(error = %err, "failed to return relocated element");
		}
		self.placeholder.remove();
	}
}

/// Moves the owning element to the end of `destination` on first commit,
/// leaving a placeholder comment where it was.
///
/// When the owning template is torn down the element returns to the
/// placeholder, unless `persist` is set, in which case it stays at the
/// destination.
pub fn relocate(destination: &Node, persist: bool) -> DirectiveValue {
	DirectiveValue::new(Relocate {
		destination: destination.clone(),
		persist,
	})
}

impl Directive for Relocate {
	type State = RelocateState;

	fn name(&self) -> &'static str {
		"relocate"
	}

	fn render(
		&self,
		target: &mut DirectiveTarget<'_>,
		state: &mut Option<RelocateState>,
	) -> RenderResult<()> {
		if let Some(state) = state.as_mut() {
			state.persist = self.persist;
			return Ok(());
		}
		let element = target.require_element(self.name())?;
		let parent = element.parent().ok_or_else(|| RenderError::MissingParent {
			directive: self.name().to_string(),
		})?;
		let placeholder = Node::comment("relocated");
		parent.insert_before(&placeholder, Some(&element))?;
		self.destination.append_child(&element)?;
		tracing::debug!(element = ?element, destination = ?self.destination, "relocated element");
		*state = Some(RelocateState {
			element,
			placeholder,
			persist: self.persist,
		});
		Ok(())
	}
}
