//! Error types for template compilation and rendering.

use tessera_dom::DomError;

/// Shape errors detected while compiling a template's static segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
	/// A value slot appears inside a tag but outside any attribute value.
	#[error("value {index} is inside a tag but not inside an attribute value")]
	SlotInTag {
		/// Index of the offending value.
		index: usize,
	},
	/// A value slot appears inside an HTML comment.
	#[error("value {index} is inside a comment")]
	SlotInComment {
		/// Index of the offending value.
		index: usize,
	},
	/// A value slot appears inside a raw-text element such as `<style>`.
	#[error("value {index} is inside raw-text element <{tag}>")]
	SlotInRawText {
		/// Index of the offending value.
		index: usize,
		/// The enclosing element.
		tag: String,
	},
	/// An event, property or action binding mixes literal text or several values.
	#[error("binding `{name}` must be a single value with no surrounding text")]
	CompositeBinding {
		/// Attribute name as written.
		name: String,
	},
	/// An event or property binding has no value slot.
	#[error("binding `{name}` requires a value")]
	StaticBinding {
		/// Attribute name as written.
		name: String,
	},
	/// The binding name is not a valid identifier.
	#[error("invalid binding name `{name}`")]
	InvalidBindingName {
		/// Attribute name as written.
		name: String,
	},
	/// The template ends inside a dynamic attribute value.
	#[error("attribute `{name}` is not terminated")]
	UnterminatedAttribute {
		/// Attribute name as written.
		name: String,
	},
	/// The parsed skeleton does not contain one marker per part descriptor.
	#[error("expected {expected} part markers, found {found}")]
	MarkerMismatch {
		/// Descriptors declared by the compiler.
		expected: usize,
		/// Markers discovered in the skeleton.
		found: usize,
	},
	/// The number of values does not match the number of slots.
	#[error("template has {slots} slots but {values} values were supplied")]
	ValueCountMismatch {
		/// Slots in the static segments.
		slots: usize,
		/// Values supplied.
		values: usize,
	},
	/// The intermediate markup could not be tokenized.
	#[error("failed to parse template markup: {0}")]
	Parse(String),
}

/// Errors surfaced by `render` and the commit engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
	/// The template could not be compiled.
	#[error(transparent)]
	Compile(#[from] CompileError),
	/// A tree operation failed.
	#[error(transparent)]
	Dom(#[from] DomError),
	/// A directive required a parent node that the part does not have.
	#[error("directive `{directive}` requires a part attached to a parent node")]
	MissingParent {
		/// Directive name.
		directive: String,
	},
	/// A directive was used in a position it does not support.
	#[error("directive `{directive}` cannot be used in {position} position")]
	UnsupportedPosition {
		/// Directive name.
		directive: String,
		/// Position kind (`attribute`, `child`).
		position: &'static str,
	},
	/// A directive or user callback failed.
	#[error("directive `{directive}` failed: {message}")]
	Directive {
		/// Directive name.
		directive: String,
		/// Failure description.
		message: String,
	},
}

/// Result alias used across the engine.
pub type RenderResult<T> = Result<T, RenderError>;
