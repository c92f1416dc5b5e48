//! Template instances.

use std::sync::Arc;

use tessera_dom::Node;

use crate::child::ChildPart;
use crate::commit;
use crate::compiler::{PartKind, marker_name};
use crate::error::{CompileError, RenderResult};
use crate::part::Part;
use crate::strings::TemplateKey;
use crate::template::CompiledTemplate;
use crate::value::Value;

/// A live copy of a compiled template and the parts bound into it.
#[derive(Debug)]
pub struct TemplateInstance {
	template: Arc<CompiledTemplate>,
	parts: Vec<Part>,
}

impl TemplateInstance {
	/// Instantiates `template`, returning the fragment holding its nodes and
	/// the instance owning its parts.
	///
	/// Each recorded path is replayed against the fresh fragment. Node markers
	/// are swapped for empty anchor text nodes and synthetic marker attributes
	/// are stripped. No values are committed yet.
	pub fn new(template: Arc<CompiledTemplate>) -> RenderResult<(Node, Self)> {
		let fragment = template.skeleton().materialize()?;
		let mut parts = Vec::with_capacity(template.paths().len());

		for path in template.paths() {
			let node = locate(&fragment, &path.path).ok_or(CompileError::MarkerMismatch {
				expected: template.paths().len(),
				found: parts.len(),
			})?;
			let descriptor = &path.descriptor;
			let part = if descriptor.kind == PartKind::Node {
				let anchor = Node::text("");
				let parent = node.parent().ok_or(CompileError::MarkerMismatch {
					expected: template.paths().len(),
					found: parts.len(),
				})?;
				parent.replace_child(&anchor, &node)?;
				Part::Child(
					descriptor.value_index.unwrap_or_default(),
					ChildPart::new(anchor),
				)
			} else {
				node.remove_attribute(&marker_name(path.descriptor_index));
				Part::bind(&node, descriptor)
			};
			parts.push(part);
		}

		Ok((fragment, Self { template, parts }))
	}

	/// Identity of the template this instance was built from.
	pub fn key(&self) -> &TemplateKey {
		self.template.key()
	}

	/// The compiled template.
	pub fn template(&self) -> &Arc<CompiledTemplate> {
		&self.template
	}

	/// Bound parts in descriptor order.
	pub fn parts(&self) -> &[Part] {
		&self.parts
	}

	/// Commits a new set of values into the parts.
	pub fn update(&mut self, values: &[Value]) -> RenderResult<()> {
		let slots = self.template.slot_count();
		if values.len() != slots {
			return Err(CompileError::ValueCountMismatch {
				slots,
				values: values.len(),
			}
			.into());
		}
		commit::commit(&mut self.parts, values)
	}

	/// Detaches listeners, runs cleanups and disposes nested state.
	pub fn dispose(&mut self) {
		for part in &mut self.parts {
			part.dispose();
		}
	}
}

impl Drop for TemplateInstance {
	fn drop(&mut self) {
		self.dispose();
	}
}

fn locate(root: &Node, path: &[usize]) -> Option<Node> {
	path.iter()
		.try_fold(root.clone(), |node, &index| node.child_at(index))
}
