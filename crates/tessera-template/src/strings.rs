//! Template invocations and their identity.
//!
//! A template is identified by *where it was written*, not by what it contains.
//! Every [`html!`](crate::html) call site expands to its own `static`
//! [`TemplateStrings`], and the address of that static is the cache key. Two
//! call sites producing identical markup are therefore distinct templates.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Static string segments of one template call site.
#[derive(Debug)]
pub struct TemplateStrings {
	segments: &'static [&'static str],
}

impl TemplateStrings {
	/// Wraps the segments of a call site. Used by the `html!` and `css!` macros.
	pub const fn new(segments: &'static [&'static str]) -> Self {
		Self { segments }
	}

	/// Returns the segments.
	pub fn segments(&self) -> &'static [&'static str] {
		self.segments
	}

	/// Returns the identity key of this call site.
	pub fn key(&'static self) -> TemplateKey {
		TemplateKey::Static(self as *const TemplateStrings as usize)
	}
}

/// Cache key of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateKey {
	/// Address of a call site's `static` segments.
	Static(usize),
	/// Content-join of segments assembled at runtime.
	Content(Arc<str>),
}

impl fmt::Display for TemplateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Static(addr) => write!(f, "static@{:#x}", addr),
			Self::Content(joined) => write!(f, "content({} bytes)", joined.len()),
		}
	}
}

#[derive(Clone)]
enum Segments {
	Static(&'static TemplateStrings),
	Owned(Arc<[String]>),
}

/// One template invocation: static segments plus the dynamic values between them.
#[derive(Clone)]
pub struct TemplateResult {
	segments: Segments,
	key: TemplateKey,
	values: Vec<Value>,
}

/// Separator used to build content keys; cannot appear in a static segment by accident.
const CONTENT_KEY_SEPARATOR: char = '\u{1}';

impl TemplateResult {
	/// Creates a result for a call site's static segments.
	pub fn new(strings: &'static TemplateStrings, values: Vec<Value>) -> Self {
		debug_assert_eq!(
			strings.segments().len(),
			values.len() + 1,
			"template segments and values are out of step"
		);
		Self {
			segments: Segments::Static(strings),
			key: strings.key(),
			values,
		}
	}

	/// Creates a result from segments assembled at runtime.
	///
	/// Such results have no stable call-site identity, so they are keyed by the
	/// joined segment content instead.
	pub fn from_segments(segments: Vec<String>, values: Vec<Value>) -> Self {
		debug_assert_eq!(
			segments.len(),
			values.len() + 1,
			"template segments and values are out of step"
		);
		let mut joined = String::new();
		for (i, segment) in segments.iter().enumerate() {
			if i > 0 {
				joined.push(CONTENT_KEY_SEPARATOR);
			}
			joined.push_str(segment);
		}
		Self {
			segments: Segments::Owned(segments.into()),
			key: TemplateKey::Content(joined.into()),
			values,
		}
	}

	/// Returns the identity key.
	pub fn key(&self) -> &TemplateKey {
		&self.key
	}

	/// Returns the static segments.
	pub fn segments(&self) -> Vec<&str> {
		match &self.segments {
			Segments::Static(strings) => strings.segments().to_vec(),
			Segments::Owned(owned) => owned.iter().map(String::as_str).collect(),
		}
	}

	/// Number of value slots between the segments.
	pub fn slot_count(&self) -> usize {
		match &self.segments {
			Segments::Static(strings) => strings.segments().len().saturating_sub(1),
			Segments::Owned(owned) => owned.len().saturating_sub(1),
		}
	}

	/// Returns the dynamic values.
	pub fn values(&self) -> &[Value] {
		&self.values
	}
}

impl fmt::Debug for TemplateResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TemplateResult")
			.field("key", &self.key)
			.field("segments", &self.segments())
			.field("values", &self.values)
			.finish()
	}
}

/// Builds a [`TemplateResult`] from alternating segments and values.
///
/// Segments must be string literals; values are any expression convertible
/// into [`Value`](crate::Value). The invocation always starts and ends with a
/// segment.
///
/// ```
/// use tessera_template::html;
///
/// let name = "world";
/// let greeting = html!("<p class=\"greeting\">Hello, ", name, "!</p>");
/// assert_eq!(greeting.slot_count(), 1);
/// ```
#[macro_export]
macro_rules! html {
	($first:literal $(, $value:expr, $segment:literal)*) => {{
		static STRINGS: $crate::TemplateStrings =
			$crate::TemplateStrings::new(&[$first $(, $segment)*]);
		$crate::TemplateResult::new(&STRINGS, ::std::vec![$($crate::Value::from($value)),*])
	}};
}

/// Builds a [`TemplateResult`] for style content.
///
/// Identical to [`html!`]: the engine does not distinguish markup from styles.
///
/// ```
/// use tessera_template::css;
///
/// let accent = "rebeccapurple";
/// let styles = css!(":host { color: ", accent, "; }");
/// assert_eq!(styles.values().len(), 1);
/// ```
#[macro_export]
macro_rules! css {
	($first:literal $(, $value:expr, $segment:literal)*) => {{
		static STRINGS: $crate::TemplateStrings =
			$crate::TemplateStrings::new(&[$first $(, $segment)*]);
		$crate::TemplateResult::new(&STRINGS, ::std::vec![$($crate::Value::from($value)),*])
	}};
}
