//! Rendering templates into containers.
//!
//! The first render into a container replaces its children with a fresh
//! instance. Later renders of the same template identity update that instance
//! in place. A different identity disposes the old instance and starts over.
//!
//! Bindings live in a per-thread side table keyed by container id, holding the
//! container weakly so a dropped container does not stay alive through its
//! binding. [`prune_bindings`] drops bindings whose container is gone.

use std::cell::RefCell;
use std::collections::HashMap;

use tessera_dom::{Node, NodeId, WeakNode};

use crate::cache;
use crate::error::RenderResult;
use crate::instance::TemplateInstance;
use crate::strings::{TemplateKey, TemplateResult};

struct Binding {
	container: WeakNode,
	instance: TemplateInstance,
}

thread_local! {
	static BINDINGS: RefCell<HashMap<NodeId, Binding>> = RefCell::new(HashMap::new());
}

/// Renders `result` into `container`.
///
/// # Examples
///
/// ```
/// use tessera_dom::Node;
/// use tessera_template::{html, render};
///
/// let container = Node::element("main");
/// let page = |n: i64| html!("<p>count: ", n, "</p>");
///
/// render(&page(1), &container).unwrap();
/// let paragraph = container.first_child().unwrap();
/// render(&page(2), &container).unwrap();
///
/// assert_eq!(container.inner_html(), "<p>count: 2</p>");
/// assert!(container.first_child().unwrap().ptr_eq(&paragraph));
/// ```
pub fn render(result: &TemplateResult, container: &Node) -> RenderResult<()> {
	let compiled = cache::compiled_template(result)?;

	let existing = BINDINGS.with(|bindings| bindings.borrow_mut().remove(&container.id()));
	if let Some(mut binding) = existing {
		if binding.instance.key() == result.key() {
			let outcome = binding.instance.update(result.values());
			store(container, binding);
			return outcome;
		}
		tracing::debug!(
			container = ?container,
			from = %binding.instance.key(),
			to = %result.key(),
			"template identity changed; replacing instance"
		);
		binding.instance.dispose();
	}

	container.clear_children();
	let (fragment, mut instance) = TemplateInstance::new(compiled)?;
	let outcome = instance.update(result.values());
	container.append_child(&fragment)?;
	store(
		container,
		Binding {
			container: container.downgrade(),
			instance,
		},
	);
	outcome
}

fn store(container: &Node, binding: Binding) {
	let displaced = BINDINGS.with(|bindings| bindings.borrow_mut().insert(container.id(), binding));
	// A nested render into the same container replaced us mid-update.
	if let Some(mut displaced) = displaced {
		displaced.instance.dispose();
	}
}

/// Tears down the instance rendered into `container` and empties it.
///
/// Listeners are detached and directive cleanups run before the nodes are
/// removed. Returns false if nothing was rendered there.
pub fn unrender(container: &Node) -> bool {
	let binding = BINDINGS.with(|bindings| bindings.borrow_mut().remove(&container.id()));
	match binding {
		Some(mut binding) => {
			binding.instance.dispose();
			container.clear_children();
			true
		}
		None => false,
	}
}

/// Returns true if a template is currently rendered into `container`.
pub fn is_rendered(container: &Node) -> bool {
	BINDINGS.with(|bindings| bindings.borrow().contains_key(&container.id()))
}

/// Identity of the template rendered into `container`.
pub fn rendered_key(container: &Node) -> Option<TemplateKey> {
	BINDINGS.with(|bindings| {
		bindings
			.borrow()
			.get(&container.id())
			.map(|binding| binding.instance.key().clone())
	})
}

/// Drops bindings whose container no longer exists. Returns how many.
pub fn prune_bindings() -> usize {
	let dead: Vec<Binding> = BINDINGS.with(|bindings| {
		let mut bindings = bindings.borrow_mut();
		let ids: Vec<NodeId> = bindings
			.iter()
			.filter(|(_, binding)| binding.container.upgrade().is_none())
			.map(|(id, _)| *id)
			.collect();
		ids.iter().filter_map(|id| bindings.remove(id)).collect()
	});
	let count = dead.len();
	// Dropping disposes each instance; done outside the borrow.
	drop(dead);
	if count > 0 {
		tracing::debug!(count, "pruned bindings of dropped containers");
	}
	count
}
