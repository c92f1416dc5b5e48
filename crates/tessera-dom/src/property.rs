//! Values assignable to element properties.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A property value stored on an element.
///
/// Properties, unlike attributes, are not stringified and are not serialized.
#[derive(Clone, Default)]
pub enum PropertyValue {
	/// No value.
	#[default]
	Null,
	/// A boolean.
	Bool(bool),
	/// A number.
	Number(f64),
	/// A string.
	Text(String),
	/// Any other value, compared by pointer identity.
	Opaque(Rc<dyn Any>),
}

impl PropertyValue {
	/// Returns the boolean, if this is one.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Returns the number, if this is one.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Returns the string, if this is one.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}

	/// Downcasts an opaque value.
	pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
		match self {
			Self::Opaque(any) => any.downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Returns true for [`PropertyValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}
}

impl PartialEq for PropertyValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Number(a), Self::Number(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Opaque(a), Self::Opaque(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl fmt::Debug for PropertyValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "Null"),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
			Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
			Self::Opaque(_) => write!(f, "Opaque(..)"),
		}
	}
}

impl From<bool> for PropertyValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for PropertyValue {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<&str> for PropertyValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<String> for PropertyValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
