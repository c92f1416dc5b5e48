//! Tessera Template - tagged-template rendering into a live node tree
//!
//! A template is a sequence of static markup segments with dynamic values in
//! between, written with the [`html!`] macro. The static segments are compiled
//! once per call site into a parsed skeleton with a list of dynamic *parts*.
//! Rendering instantiates the skeleton into a container the first time and,
//! on later renders of the same call site, commits only the values that
//! changed.
//!
//! ## Pipeline
//!
//! 1. [`compiler`] turns segments into marked-up source and part descriptors.
//! 2. [`skeleton`] parses that source; [`indexer`] records where each marker sits.
//! 3. [`cache`] keeps compiled templates by call-site identity (FIFO, 500 entries).
//! 4. [`instance`] materializes a skeleton and binds parts to its nodes.
//! 5. [`commit`] writes values into parts with minimal tree mutation.
//!
//! ## Value positions
//!
//! | Syntax                 | Part       | Behavior                                   |
//! |------------------------|------------|--------------------------------------------|
//! | `<p>${v}</p>`          | child      | text, nested template, node, list          |
//! | `name=${v}`            | attribute  | `null`/`false` remove, `true` sets empty   |
//! | `class="a ${v} b"`     | attribute  | joined with the literal text               |
//! | `.name=${v}`           | property   | assigned to the element property           |
//! | `@name=${f}`           | event      | listener swapped when the handler changes  |
//! | `:name=${v}`           | action     | registered attribute directive             |
//!
//! ## Example
//!
//! ```
//! use tessera_dom::Node;
//! use tessera_template::{Value, html, render};
//!
//! let items = ["one", "two"];
//! let container = Node::element("div");
//! let view = html!(
//!     "<ul class=\"list ",
//!     "compact",
//!     "\">",
//!     items.iter().map(|i| html!("<li>", *i, "</li>")).map(Value::from).collect::<Vec<_>>(),
//!     "</ul>"
//! );
//! render(&view, &container).unwrap();
//! assert_eq!(container.text_content(), "onetwo");
//! ```

#![warn(missing_docs)]

pub mod cache;
pub mod child;
pub mod commit;
pub mod compiler;
pub mod config;
pub mod directive;
pub mod error;
pub mod indexer;
pub mod instance;
pub mod list;
pub mod part;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod skeleton;
pub mod strings;
pub mod template;
pub mod value;

pub use cache::{
	CacheStatistics, DEFAULT_CACHE_CAPACITY, TemplateCache, cache_statistics, clear_template_cache,
	compiled_template, configure_cache,
};
pub use child::ChildPart;
pub use compiler::{Composite, PartDescriptor, PartKind};
pub use config::{CacheConfig, CacheConfigBuilder};
pub use directive::{Directive, DirectiveState, DirectiveTarget, DirectiveValue};
pub use error::{CompileError, RenderError, RenderResult};
pub use instance::TemplateInstance;
pub use list::{KeyedEntry, KeyedList};
pub use part::Part;
pub use registry::{
	AttributeDirectiveFn, Cleanup, clear_attribute_directives, get_attribute_directive,
	list_registered_directive_names, register_attribute_directive, unregister_attribute_directive,
};
pub use render::{is_rendered, prune_bindings, render, rendered_key, unrender};
pub use scheduler::{
	FlushReport, UpdateQueue, cancel_update, flush_updates, pending_updates, schedule_update,
	set_flush_scheduler,
};
pub use strings::{TemplateKey, TemplateResult, TemplateStrings};
pub use template::CompiledTemplate;
pub use value::{Key, Value};

/// Wraps a closure as an event handler value.
///
/// Shorthand for [`Value::handler`].
pub fn on<F>(f: F) -> Value
where
	F: Fn(&tessera_dom::Event) + 'static,
{
	Value::handler(f)
}
