//! Conditional rendering.

use super::{Directive, DirectiveState, DirectiveTarget, DirectiveValue};
use crate::error::RenderResult;
use crate::instance::TemplateInstance;
use crate::strings::TemplateResult;

type Branch = Box<dyn Fn() -> TemplateResult>;

struct When {
	condition: bool,
	then: Branch,
	otherwise: Option<Branch>,
}

/// State of a conditional position: the instance of the branch on screen.
#[derive(Debug, Default)]
pub struct WhenState {
	instance: Option<TemplateInstance>,
}

impl DirectiveState for WhenState {
	fn dispose(&mut self) {
		if let Some(mut instance) = self.instance.take() {
			instance.dispose();
		}
	}
}

/// Renders `then()` while `condition` holds and nothing otherwise.
///
/// Only the active branch is evaluated.
pub fn when<F>(condition: bool, then: F) -> DirectiveValue
where
	F: Fn() -> TemplateResult + 'static,
{
	DirectiveValue::new(When {
		condition,
		then: Box::new(then),
		otherwise: None,
	})
}

/// Renders `then()` or `otherwise()` depending on `condition`.
pub fn when_else<F, G>(condition: bool, then: F, otherwise: G) -> DirectiveValue
where
	F: Fn() -> TemplateResult + 'static,
	G: Fn() -> TemplateResult + 'static,
{
	DirectiveValue::new(When {
		condition,
		then: Box::new(then),
		otherwise: Some(Box::new(otherwise)),
	})
}

impl Directive for When {
	type State = WhenState;

	fn name(&self) -> &'static str {
		"when"
	}

	fn render(&self, target: &mut DirectiveTarget<'_>, state: &mut Option<WhenState>) -> RenderResult<()> {
		let part = target.require_child(self.name())?;
		let state = state.get_or_insert_with(WhenState::default);

		let branch = if self.condition {
			Some(&self.then)
		} else {
			self.otherwise.as_ref()
		};
		match branch {
			Some(branch) => part.render_template(&branch(), &mut state.instance),
			None => {
				state.dispose();
				part.clear();
				Ok(())
			}
		}
	}
}
