//! Registry of attribute directives.
//!
//! `:name=${value}` bindings look up `name` here at commit time. A directive
//! receives the element, the bound value and its own name, and may return a
//! cleanup that runs before the next invocation and when the owning template is
//! torn down.
//!
//! ```
//! use tessera_template::registry::{get_attribute_directive, register_attribute_directive};
//!
//! register_attribute_directive("autofocus-doc", |element, _value, _name| {
//! 	let _ = element.set_attribute("data-focused", "");
//! 	None
//! });
//! assert!(get_attribute_directive("autofocus-doc").is_some());
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tessera_dom::Node;

use crate::value::Value;

/// Work to run when an attribute directive is re-invoked or torn down.
pub type Cleanup = Box<dyn FnOnce()>;

/// A registered attribute directive.
pub type AttributeDirectiveFn = Arc<dyn Fn(&Node, &Value, &str) -> Option<Cleanup> + Send + Sync>;

static REGISTRY: LazyLock<RwLock<HashMap<String, AttributeDirectiveFn>>> =
	LazyLock::new(|| RwLock::new(HashMap::new()));

/// Registers `directive` under `name`, returning the directive it replaced.
pub fn register_attribute_directive<F>(
	name: impl Into<String>,
	directive: F,
) -> Option<AttributeDirectiveFn>
where
	F: Fn(&Node, &Value, &str) -> Option<Cleanup> + Send + Sync + 'static,
{
	let name = name.into();
	tracing::debug!(directive = %name, "registering attribute directive");
	REGISTRY.write().insert(name, Arc::new(directive))
}

/// Looks up a directive by name.
pub fn get_attribute_directive(name: &str) -> Option<AttributeDirectiveFn> {
	REGISTRY.read().get(name).cloned()
}

/// Removes a directive. Returns true if it was registered.
pub fn unregister_attribute_directive(name: &str) -> bool {
	REGISTRY.write().remove(name).is_some()
}

/// Sorted names of all registered directives.
pub fn list_registered_directive_names() -> Vec<String> {
	let mut names: Vec<String> = REGISTRY.read().keys().cloned().collect();
	names.sort();
	names
}

/// Removes every registered directive.
pub fn clear_attribute_directives() {
	REGISTRY.write().clear();
}
