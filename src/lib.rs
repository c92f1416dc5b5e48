//! # Tessera
//!
//! Tagged-template rendering into a live node tree.
//!
//! Templates are written with [`html!`] as static markup segments interleaved
//! with dynamic values. Each call site is compiled once and cached; rendering
//! the same call site again into the same container only commits the values
//! that changed. Lists can be reconciled by key so reordering moves nodes
//! instead of rebuilding them.
//!
//! ## Crates
//!
//! - [`dom`] - the reference-counted node tree that templates render into
//! - [`template`] - compiler, template cache, commit engine, directives and
//!   the update scheduler
//!
//! ## Quick Example
//!
//! ```
//! use tessera::prelude::*;
//!
//! let greeting = |name: &str| html!("<h1>Hello, ", name, "!</h1>");
//!
//! let container = Node::element("main");
//! render(&greeting("world"), &container).unwrap();
//! let heading = container.first_child().unwrap();
//!
//! render(&greeting("tessera"), &container).unwrap();
//! assert!(container.first_child().unwrap().ptr_eq(&heading));
//! assert_eq!(container.text_content(), "Hello, tessera!");
//! ```

pub use tessera_dom as dom;
pub use tessera_template as template;

pub use tessera_dom::{DomError, Event, Node, NodeType};
pub use tessera_template::{
	CacheConfig, CompileError, Directive, DirectiveState, DirectiveTarget, DirectiveValue, Key,
	RenderError, RenderResult, TemplateResult, Value, cache_statistics, clear_template_cache,
	configure_cache, css, flush_updates, html, on, render, schedule_update, unrender,
};

/// Prelude module for convenient imports
///
/// Brings the macros, the render entry points and the built-in directives
/// into scope.
pub mod prelude {
	pub use crate::{
		CacheConfig, Directive, DirectiveState, DirectiveTarget, DirectiveValue, Key, Node,
		RenderError, RenderResult, TemplateResult, Value, cache_statistics, css, flush_updates,
		html, on, render, schedule_update, unrender,
	};

	pub use tessera_template::directive::{
		class_map, keyed, keyed_once, relocate, repeat, style_map, unsafe_html, when, when_else,
	};
}

#[cfg(test)]
mod tests {
	use super::prelude::*;
	use rstest::rstest;
	use serial_test::serial;

	fn todo(items: Vec<(u32, &'static str)>, done: bool) -> TemplateResult {
		html!(
			"<ul class=",
			if done { "done" } else { "open" },
			">",
			repeat(items, |(id, _)| *id, |(_, label)| html!("<li>", *label, "</li>")),
			"</ul>",
			when(done, || html!("<p>all done</p>")),
			""
		)
	}

	#[rstest]
	#[serial(template_cache)]
	fn test_prelude_renders_and_reuses_call_site() {
		crate::clear_template_cache();
		let container = Node::element("main");

		render(&todo(vec![(1, "a"), (2, "b")], false), &container).unwrap();
		let list = container.first_child().unwrap();
		render(&todo(vec![(2, "b"), (1, "a")], true), &container).unwrap();

		assert!(container.first_child().unwrap().ptr_eq(&list));
		assert_eq!(list.get_attribute("class").as_deref(), Some("done"));
		assert_eq!(container.text_content(), "baall done");
		let stats = cache_statistics();
		assert!(stats.hits >= 1);
	}

	#[rstest]
	fn test_unrender_through_facade() {
		let container = Node::element("main");
		render(&html!("<b>", 1, "</b>"), &container).unwrap();
		assert!(unrender(&container));
		assert_eq!(container.child_count(), 0);
		assert!(!unrender(&container));
	}
}
