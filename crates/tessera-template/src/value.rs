//! Dynamic values committed into template parts.

use std::fmt;
use std::rc::Rc;

use tessera_dom::{Event, EventListener, Node, PropertyValue};

use crate::directive::DirectiveValue;
use crate::strings::TemplateResult;

/// Identity of an item in a keyed list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
	/// Integer key.
	Int(i64),
	/// String key.
	Str(Rc<str>),
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(i) => write!(f, "{}", i),
			Self::Str(s) => write!(f, "{}", s),
		}
	}
}

macro_rules! key_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Key {
				fn from(value: $ty) -> Self {
					Self::Int(value as i64)
				}
			}
		)*
	};
}

key_from_int!(i32, i64, u32, u64, usize);

impl From<&str> for Key {
	fn from(value: &str) -> Self {
		Self::Str(value.into())
	}
}

impl From<String> for Key {
	fn from(value: String) -> Self {
		Self::Str(value.into())
	}
}

/// A dynamic value placed into a template slot.
#[derive(Clone, Default)]
pub enum Value {
	/// Absent value: renders nothing, removes attributes.
	#[default]
	Null,
	/// A boolean.
	Bool(bool),
	/// An integer.
	Int(i64),
	/// A float.
	Float(f64),
	/// A string.
	Str(Rc<str>),
	/// A nested template.
	Template(TemplateResult),
	/// A caller-owned node inserted as-is.
	Node(Node),
	/// A list of values; keyed when every item is [`Value::Keyed`].
	List(Vec<Value>),
	/// A list item carrying its reconciliation key.
	Keyed(Key, Box<Value>),
	/// An event handler.
	Handler(EventListener),
	/// A directive that takes over rendering of its position.
	Directive(DirectiveValue),
}

impl Value {
	/// Wraps a closure as an event handler value.
	pub fn handler<F>(f: F) -> Self
	where
		F: Fn(&Event) + 'static,
	{
		Self::Handler(EventListener::new(f))
	}

	/// Wraps a value with a reconciliation key.
	pub fn keyed(key: impl Into<Key>, value: impl Into<Value>) -> Self {
		Self::Keyed(key.into(), Box::new(value.into()))
	}

	/// Identity comparison used to skip unchanged commits.
	///
	/// Primitives compare by value; nodes, handlers and directives by pointer.
	/// Templates and lists are rebuilt on every render and never compare equal.
	pub fn same_as(&self, other: &Value) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::Node(a), Self::Node(b)) => a.ptr_eq(b),
			(Self::Handler(a), Self::Handler(b)) => a.ptr_eq(b),
			(Self::Directive(a), Self::Directive(b)) => a.ptr_eq(b),
			_ => false,
		}
	}

	/// Returns true for values that stringify.
	pub fn is_primitive(&self) -> bool {
		matches!(
			self,
			Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_)
		)
	}

	/// Returns true for directive values.
	pub fn is_directive(&self) -> bool {
		matches!(self, Self::Directive(_))
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Stringifies a primitive value. `Null` becomes the empty string.
	pub fn to_text(&self) -> Option<String> {
		match self {
			Self::Null => Some(String::new()),
			Self::Bool(b) => Some(b.to_string()),
			Self::Int(i) => Some(i.to_string()),
			Self::Float(f) => Some(format_float(*f)),
			Self::Str(s) => Some(s.to_string()),
			_ => None,
		}
	}

	/// Converts the value for assignment to an element property.
	pub fn to_property(&self) -> PropertyValue {
		match self {
			Self::Null => PropertyValue::Null,
			Self::Bool(b) => PropertyValue::Bool(*b),
			Self::Int(i) => PropertyValue::Number(*i as f64),
			Self::Float(f) => PropertyValue::Number(*f),
			Self::Str(s) => PropertyValue::Text(s.to_string()),
			other => PropertyValue::Opaque(Rc::new(other.clone())),
		}
	}

	/// Short description of the variant for diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::Str(_) => "string",
			Self::Template(_) => "template",
			Self::Node(_) => "node",
			Self::List(_) => "list",
			Self::Keyed(_, _) => "keyed item",
			Self::Handler(_) => "handler",
			Self::Directive(_) => "directive",
		}
	}
}

fn format_float(f: f64) -> String {
	if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
		format!("{}", f as i64)
	} else {
		f.to_string()
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "Null"),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
			Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
			Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
			Self::Template(t) => f.debug_tuple("Template").field(t.key()).finish(),
			Self::Node(n) => f.debug_tuple("Node").field(n).finish(),
			Self::List(items) => f.debug_tuple("List").field(items).finish(),
			Self::Keyed(k, v) => f.debug_tuple("Keyed").field(k).field(v).finish(),
			Self::Handler(_) => write!(f, "Handler(<function>)"),
			Self::Directive(d) => f.debug_tuple("Directive").field(&d.name()).finish(),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! value_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Int(value as i64)
				}
			}
		)*
	};
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Float(value as f64)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value.into())
	}
}

impl From<&String> for Value {
	fn from(value: &String) -> Self {
		Self::Str(value.as_str().into())
	}
}

impl From<Rc<str>> for Value {
	fn from(value: Rc<str>) -> Self {
		Self::Str(value)
	}
}

impl From<TemplateResult> for Value {
	fn from(value: TemplateResult) -> Self {
		Self::Template(value)
	}
}

impl From<Node> for Value {
	fn from(value: Node) -> Self {
		Self::Node(value)
	}
}

impl From<&Node> for Value {
	fn from(value: &Node) -> Self {
		Self::Node(value.clone())
	}
}

impl From<EventListener> for Value {
	fn from(value: EventListener) -> Self {
		Self::Handler(value)
	}
}

impl From<DirectiveValue> for Value {
	fn from(value: DirectiveValue) -> Self {
		Self::Directive(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Self::List(value.into_iter().map(Into::into).collect())
	}
}
