//! Compiled templates.

use crate::compiler::{self, PartDescriptor};
use crate::error::CompileError;
use crate::indexer::{self, PartPath};
use crate::skeleton::Skeleton;
use crate::strings::TemplateKey;

/// Everything derived once from a template's static segments.
///
/// Compiled templates are immutable and shared between all instances through
/// the process-wide cache.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
	key: TemplateKey,
	skeleton: Skeleton,
	descriptors: Vec<PartDescriptor>,
	paths: Vec<PartPath>,
	slot_count: usize,
}

impl CompiledTemplate {
	/// Compiles, parses and indexes the given segments.
	pub fn compile(key: TemplateKey, segments: &[&str]) -> Result<Self, CompileError> {
		let source = compiler::compile(segments)?;
		let skeleton = Skeleton::parse(&source.markup)?;
		let paths = indexer::index_parts(&skeleton, &source.descriptors)?;
		tracing::debug!(
			key = %key,
			parts = paths.len(),
			"compiled template"
		);
		Ok(Self {
			key,
			skeleton,
			descriptors: source.descriptors,
			paths,
			slot_count: segments.len().saturating_sub(1),
		})
	}

	/// Identity key.
	pub fn key(&self) -> &TemplateKey {
		&self.key
	}

	/// Parsed markup with markers still in place.
	pub fn skeleton(&self) -> &Skeleton {
		&self.skeleton
	}

	/// Part descriptors in marker order.
	pub fn descriptors(&self) -> &[PartDescriptor] {
		&self.descriptors
	}

	/// Part paths in descriptor order.
	pub fn paths(&self) -> &[PartPath] {
		&self.paths
	}

	/// Number of values an invocation must supply.
	pub fn slot_count(&self) -> usize {
		self.slot_count
	}
}
