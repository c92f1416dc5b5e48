//! Locates part markers in a parsed skeleton.
//!
//! Each marker becomes a [`PartPath`]: the child-index route from the root to
//! the marked node. Paths are recorded once per compiled template and replayed
//! against every materialized instance, so no instance is ever searched.

use crate::compiler::{PartDescriptor, PartKind, parse_marker};
use crate::error::CompileError;
use crate::skeleton::{Skeleton, SkeletonNode};

/// Route to the node a part binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartPath {
	/// Child indices from the root fragment down to the node.
	pub path: Vec<usize>,
	/// Index of the descriptor (and marker) this path belongs to.
	pub descriptor_index: usize,
	/// The descriptor itself.
	pub descriptor: PartDescriptor,
}

/// Walks the skeleton and pairs every marker with its descriptor.
///
/// Node markers are comments and attribute markers are attribute names; both
/// carry the descriptor index. The result is ordered by descriptor index.
pub fn index_parts(
	skeleton: &Skeleton,
	descriptors: &[PartDescriptor],
) -> Result<Vec<PartPath>, CompileError> {
	let mut found: Vec<(usize, Vec<usize>)> = Vec::with_capacity(descriptors.len());
	let mut route = Vec::new();
	walk(skeleton.roots(), &mut route, &mut found);

	let mismatch = || CompileError::MarkerMismatch {
		expected: descriptors.len(),
		found: found.len(),
	};
	if found.len() != descriptors.len() {
		return Err(mismatch());
	}

	let node_order: Vec<usize> = found
		.iter()
		.map(|(index, _)| *index)
		.filter(|index| descriptors.get(*index).is_some_and(|d| d.kind == PartKind::Node))
		.collect();
	debug_assert!(
		node_order.windows(2).all(|w| w[0] < w[1]),
		"node markers must appear in source order"
	);

	found.sort_by_key(|(index, _)| *index);
	let mut paths = Vec::with_capacity(found.len());
	for (position, (index, path)) in found.into_iter().enumerate() {
		if index != position {
			return Err(CompileError::MarkerMismatch {
				expected: descriptors.len(),
				found: position,
			});
		}
		paths.push(PartPath {
			path,
			descriptor_index: index,
			descriptor: descriptors[index].clone(),
		});
	}
	Ok(paths)
}

fn walk(nodes: &[SkeletonNode], route: &mut Vec<usize>, found: &mut Vec<(usize, Vec<usize>)>) {
	for (i, node) in nodes.iter().enumerate() {
		route.push(i);
		match node {
			SkeletonNode::Comment(text) => {
				if let Some(index) = parse_marker(text) {
					found.push((index, route.clone()));
				}
			}
			SkeletonNode::Element {
				attributes,
				children,
				..
			} => {
				for (name, _) in attributes {
					if let Some(index) = parse_marker(name) {
						found.push((index, route.clone()));
					}
				}
				walk(children, route, found);
			}
			SkeletonNode::Text(_) => {}
		}
		route.pop();
	}
}
