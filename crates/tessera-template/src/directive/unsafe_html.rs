//! Raw markup insertion.

use super::{Directive, DirectiveState, DirectiveTarget, DirectiveValue};
use crate::error::RenderResult;
use crate::skeleton::Skeleton;

struct UnsafeHtml {
	markup: String,
}

/// Markup rendered by the previous commit.
#[derive(Debug, Default)]
pub struct UnsafeHtmlState {
	markup: String,
}

impl DirectiveState for UnsafeHtmlState {}

/// Parses `markup` and inserts the resulting nodes without escaping.
///
/// The markup is trusted as-is. Unchanged markup is not re-parsed.
pub fn unsafe_html(markup: impl Into<String>) -> DirectiveValue {
	DirectiveValue::new(UnsafeHtml {
		markup: markup.into(),
	})
}

impl Directive for UnsafeHtml {
	type State = UnsafeHtmlState;

	fn name(&self) -> &'static str {
		"unsafe_html"
	}

	fn render(
		&self,
		target: &mut DirectiveTarget<'_>,
		state: &mut Option<UnsafeHtmlState>,
	) -> RenderResult<()> {
		let part = target.require_child(self.name())?;
		if state
			.as_ref()
			.is_some_and(|previous| previous.markup == self.markup)
		{
			return Ok(());
		}
		part.clear();
		let fragment = Skeleton::parse(&self.markup)?.materialize()?;
		part.insert(&fragment)?;
		*state = Some(UnsafeHtmlState {
			markup: self.markup.clone(),
		});
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RenderError;
	use crate::{html, render};
	use rstest::rstest;
	use tessera_dom::Node;

	#[rstest]
	fn test_markup_is_not_escaped() {
		let container = Node::element("div");
		let view = |markup: &str| html!("<article>", unsafe_html(markup), "</article>");
		render(&view("<em>hi</em> there"), &container).unwrap();
		let article = container.first_child().unwrap();
		assert!(article.inner_html().contains("<em>hi</em> there"));

		tessera_dom::mutations::reset();
		render(&view("<em>hi</em> there"), &container).unwrap();
		assert_eq!(tessera_dom::mutations::snapshot().structural(), 0);

		render(&view("<b>bye</b>"), &container).unwrap();
		assert!(article.inner_html().contains("<b>bye</b>"));
		assert!(!article.inner_html().contains("<em>"));
	}

	#[rstest]
	fn test_rejects_attribute_position() {
		let container = Node::element("div");
		let result = render(&html!("<p title=", unsafe_html("<b></b>"), "></p>"), &container);
		assert!(matches!(
			result,
			Err(RenderError::UnsupportedPosition { position: "attribute", .. })
		));
	}
}
