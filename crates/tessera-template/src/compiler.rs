//! Template compiler.
//!
//! Turns the static segments of a template into intermediate markup with a
//! unique marker at every dynamic position, plus an ordered list of
//! [`PartDescriptor`]s saying what each marker binds to.
//!
//! Positions are classified by a small lexical state machine that follows the
//! markup as it is accumulated:
//!
//! | State at a slot            | Result                                      |
//! |----------------------------|---------------------------------------------|
//! | text content               | node part, `<!--tsr-part-N-->` marker        |
//! | right after `name=`        | attribute value opens with a value          |
//! | inside an attribute value  | value joins the attribute (composite)       |
//! | comment / raw text / tag   | [`CompileError`]                            |
//!
//! Dynamic attributes are buffered until they close, then rewritten to a single
//! synthetic `tsr-part-N` attribute. An attribute such as
//! `class="a ${x} b ${y}"` therefore yields one composite descriptor holding the
//! literal fragments `["a ", " b ", ""]` and the slot indices `[x, y]`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CompileError;
use crate::value::Value;

/// Prefix of synthetic marker comments and attributes.
pub const PART_MARKER: &str = "tsr-part-";

/// Elements whose content is raw text and cannot host node parts.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

static BINDING_NAME: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$\-:.]*$").expect("binding name pattern is valid")
});

/// Returns the marker name for descriptor `index`.
pub fn marker_name(index: usize) -> String {
	format!("{}{}", PART_MARKER, index)
}

/// Parses a marker name back into a descriptor index.
pub fn parse_marker(name: &str) -> Option<usize> {
	name.strip_prefix(PART_MARKER)?.parse().ok()
}

/// What a dynamic position binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
	/// Child content between surrounding nodes.
	Node,
	/// An attribute value (`name=`).
	Attribute,
	/// An element property (`.name=`).
	Property,
	/// An event listener (`@name=`).
	Event,
	/// A registered attribute directive (`:name=`).
	Action,
}

/// Literal fragments interleaved with value slots in one attribute.
///
/// `strings.len()` is always `indices.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
	/// Literal text around the slots.
	pub strings: Vec<String>,
	/// Value indices between consecutive literals.
	pub indices: Vec<usize>,
}

impl Composite {
	/// Joins literals and the current slot values into the attribute string.
	///
	/// Non-primitive values contribute nothing.
	pub fn join(&self, values: &[Value]) -> String {
		let mut out = String::new();
		for (i, literal) in self.strings.iter().enumerate() {
			out.push_str(literal);
			if let Some(value) = self.indices.get(i).and_then(|&idx| values.get(idx)) {
				match value.to_text() {
					Some(text) => out.push_str(&text),
					None => tracing::warn!(
						kind = value.kind_name(),
						"non-primitive value interpolated into an attribute renders as empty"
					),
				}
			}
		}
		out
	}

	/// Returns true when every literal fragment is empty.
	pub fn literals_empty(&self) -> bool {
		self.strings.iter().all(String::is_empty)
	}
}

/// A dynamic position declared at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDescriptor {
	/// Binding kind.
	pub kind: PartKind,
	/// First (or only) value index; `None` for static action directives.
	pub value_index: Option<usize>,
	/// Attribute, property, event or directive name.
	pub name: Option<String>,
	/// Fixed literal of a static action directive.
	pub static_value: Option<String>,
	/// Literal fragments of a multi-slot or partially literal attribute.
	pub composite: Option<Composite>,
}

impl PartDescriptor {
	fn node(index: usize) -> Self {
		Self {
			kind: PartKind::Node,
			value_index: Some(index),
			name: None,
			static_value: None,
			composite: None,
		}
	}

	/// All value indices this descriptor consumes, in order.
	pub fn slot_indices(&self) -> Vec<usize> {
		match (&self.composite, self.value_index) {
			(Some(composite), _) => composite.indices.clone(),
			(None, Some(index)) => vec![index],
			(None, None) => Vec::new(),
		}
	}
}

/// Output of [`compile`].
#[derive(Debug, Clone)]
pub struct CompiledSource {
	/// Intermediate markup containing markers.
	pub markup: String,
	/// Descriptors in source order; descriptor `i` owns marker `tsr-part-i`.
	pub descriptors: Vec<PartDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
	Double,
	Single,
	Unquoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
	Text,
	Comment,
	RawText(String),
	TagName,
	InTag,
	AttrName,
	AfterAttrName,
	BeforeAttrValue,
	AttrValue(Quote),
}

#[derive(Debug, Default)]
struct PendingAttr {
	name: String,
	quote: Option<Quote>,
	strings: Vec<String>,
	current: String,
	indices: Vec<usize>,
}

struct Compiler {
	out: String,
	state: State,
	tag: String,
	closing_tag: bool,
	attr: Option<PendingAttr>,
	descriptors: Vec<PartDescriptor>,
}

/// Compiles static segments into marked-up source and part descriptors.
pub fn compile(segments: &[&str]) -> Result<CompiledSource, CompileError> {
	let mut compiler = Compiler {
		out: String::new(),
		state: State::Text,
		tag: String::new(),
		closing_tag: false,
		attr: None,
		descriptors: Vec::new(),
	};

	let last = segments.len().saturating_sub(1);
	for (index, segment) in segments.iter().enumerate() {
		compiler.feed(segment)?;
		if index < last {
			compiler.slot(index)?;
		}
	}
	compiler.finish()?;

	debug_assert_eq!(
		compiler
			.descriptors
			.iter()
			.flat_map(PartDescriptor::slot_indices)
			.collect::<Vec<_>>(),
		(0..last).collect::<Vec<_>>(),
		"descriptor slots must cover every value exactly once, in order"
	);

	Ok(CompiledSource {
		markup: compiler.out,
		descriptors: compiler.descriptors,
	})
}

impl Compiler {
	fn feed(&mut self, segment: &str) -> Result<(), CompileError> {
		let mut chars = segment.char_indices().peekable();
		while let Some((pos, c)) = chars.next() {
			let rest = &segment[pos..];
			match self.state.clone() {
				State::Text => {
					if rest.starts_with("<!--") {
						self.out.push_str("<!--");
						chars.nth(2);
						self.state = State::Comment;
					} else if c == '<' && starts_tag(&rest[1..]) {
						self.out.push('<');
						self.tag.clear();
						self.closing_tag = false;
						self.state = State::TagName;
					} else if rest.starts_with("</") && starts_tag(&rest[2..]) {
						self.out.push_str("</");
						chars.next();
						self.tag.clear();
						self.closing_tag = true;
						self.state = State::TagName;
					} else {
						self.out.push(c);
					}
				}
				State::Comment => {
					self.out.push(c);
					if self.out.ends_with("-->") {
						self.state = State::Text;
					}
				}
				State::RawText(tag) => {
					let closes = rest.starts_with("</")
						&& rest
							.get(2..2 + tag.len())
							.is_some_and(|name| name.eq_ignore_ascii_case(&tag));
					if closes {
						self.out.push_str("</");
						chars.next();
						self.tag.clear();
						self.closing_tag = true;
						self.state = State::TagName;
					} else {
						self.out.push(c);
					}
				}
				State::TagName => {
					if c.is_whitespace() {
						self.state = State::InTag;
					} else if c == '>' {
						self.close_tag();
					} else if c == '/' {
						self.out.push(c);
						self.state = State::InTag;
					} else {
						self.tag.push(c.to_ascii_lowercase());
						self.out.push(c);
					}
				}
				State::InTag => {
					if c == '>' {
						self.close_tag();
					} else if c == '/' {
						self.out.push(c);
					} else if !c.is_whitespace() {
						self.start_attr(c);
					}
				}
				State::AttrName => {
					if c.is_whitespace() {
						self.state = State::AfterAttrName;
					} else if c == '=' {
						self.state = State::BeforeAttrValue;
					} else if c == '>' {
						self.flush_attr()?;
						self.close_tag();
					} else if c == '/' {
						self.flush_attr()?;
						self.out.push(c);
						self.state = State::InTag;
					} else if let Some(attr) = self.attr.as_mut() {
						attr.name.push(c);
					}
				}
				State::AfterAttrName => {
					if c == '=' {
						self.state = State::BeforeAttrValue;
					} else if c == '>' {
						self.flush_attr()?;
						self.close_tag();
					} else if c == '/' {
						self.flush_attr()?;
						self.out.push(c);
						self.state = State::InTag;
					} else if !c.is_whitespace() {
						self.flush_attr()?;
						self.start_attr(c);
					}
				}
				State::BeforeAttrValue => {
					if c.is_whitespace() {
						continue;
					}
					if c == '>' {
						self.open_value(Quote::Unquoted);
						self.flush_attr()?;
						self.close_tag();
					} else if c == '"' {
						self.open_value(Quote::Double);
					} else if c == '\'' {
						self.open_value(Quote::Single);
					} else {
						self.open_value(Quote::Unquoted);
						self.push_value_char(c);
					}
				}
				State::AttrValue(quote) => {
					let ends = match quote {
						Quote::Double => c == '"',
						Quote::Single => c == '\'',
						Quote::Unquoted => c.is_whitespace() || c == '>',
					};
					if ends {
						self.flush_attr()?;
						if c == '>' {
							self.close_tag();
						} else {
							self.state = State::InTag;
						}
					} else {
						self.push_value_char(c);
					}
				}
			}
		}
		Ok(())
	}

	fn slot(&mut self, index: usize) -> Result<(), CompileError> {
		match self.state.clone() {
			State::Text => {
				let descriptor_index = self.descriptors.len();
				self.descriptors.push(PartDescriptor::node(index));
				self.out.push_str("<!--");
				self.out.push_str(&marker_name(descriptor_index));
				self.out.push_str("-->");
			}
			State::Comment => return Err(CompileError::SlotInComment { index }),
			State::RawText(tag) => return Err(CompileError::SlotInRawText { index, tag }),
			State::TagName | State::InTag | State::AttrName | State::AfterAttrName => {
				return Err(CompileError::SlotInTag { index });
			}
			State::BeforeAttrValue => {
				self.open_value(Quote::Unquoted);
				self.push_value_slot(index);
			}
			State::AttrValue(_) => self.push_value_slot(index),
		}
		Ok(())
	}

	fn finish(&mut self) -> Result<(), CompileError> {
		let Some(attr) = self.attr.as_ref() else {
			return Ok(());
		};
		let open_quoted = matches!(self.state, State::AttrValue(Quote::Double | Quote::Single));
		if open_quoted && !attr.indices.is_empty() {
			return Err(CompileError::UnterminatedAttribute {
				name: attr.name.clone(),
			});
		}
		self.flush_attr()
	}

	fn close_tag(&mut self) {
		self.out.push('>');
		self.state = if !self.closing_tag && RAW_TEXT_ELEMENTS.contains(&self.tag.as_str()) {
			State::RawText(self.tag.clone())
		} else {
			State::Text
		};
	}

	fn start_attr(&mut self, first: char) {
		self.attr = Some(PendingAttr {
			name: first.to_string(),
			..PendingAttr::default()
		});
		self.state = State::AttrName;
	}

	fn open_value(&mut self, quote: Quote) {
		if let Some(attr) = self.attr.as_mut() {
			attr.quote = Some(quote);
		}
		self.state = State::AttrValue(quote);
	}

	fn push_value_char(&mut self, c: char) {
		if let Some(attr) = self.attr.as_mut() {
			attr.current.push(c);
		}
	}

	fn push_value_slot(&mut self, index: usize) {
		if let Some(attr) = self.attr.as_mut() {
			let literal = std::mem::take(&mut attr.current);
			attr.strings.push(literal);
			attr.indices.push(index);
		}
	}

	fn flush_attr(&mut self) -> Result<(), CompileError> {
		let Some(attr) = self.attr.take() else {
			return Ok(());
		};
		let PendingAttr {
			name,
			quote,
			mut strings,
			current,
			indices,
		} = attr;
		strings.push(current);

		let kind = match name.chars().next() {
			Some('@') => PartKind::Event,
			Some('.') => PartKind::Property,
			Some(':') => PartKind::Action,
			_ => PartKind::Attribute,
		};

		if kind == PartKind::Attribute && indices.is_empty() {
			self.emit_static_attr(&name, quote, &strings[0]);
			return Ok(());
		}

		let descriptor = if kind == PartKind::Attribute {
			let composite = if indices.len() == 1 && strings.iter().all(String::is_empty) {
				None
			} else {
				Some(Composite {
					strings: strings.iter().map(|s| decode_entities(s)).collect(),
					indices: indices.clone(),
				})
			};
			PartDescriptor {
				kind,
				value_index: indices.first().copied(),
				name: Some(name.to_ascii_lowercase()),
				static_value: None,
				composite,
			}
		} else {
			let bare = &name[1..];
			if !BINDING_NAME.is_match(bare) {
				return Err(CompileError::InvalidBindingName { name });
			}
			match indices.as_slice() {
				[] if kind == PartKind::Action => PartDescriptor {
					kind,
					value_index: None,
					name: Some(bare.to_string()),
					static_value: Some(decode_entities(&strings.concat())),
					composite: None,
				},
				[] => return Err(CompileError::StaticBinding { name }),
				[index] if strings.iter().all(String::is_empty) => PartDescriptor {
					kind,
					value_index: Some(*index),
					name: Some(bare.to_string()),
					static_value: None,
					composite: None,
				},
				_ => return Err(CompileError::CompositeBinding { name }),
			}
		};

		let descriptor_index = self.descriptors.len();
		self.descriptors.push(descriptor);
		self.out.push(' ');
		self.out.push_str(&marker_name(descriptor_index));
		Ok(())
	}

	fn emit_static_attr(&mut self, name: &str, quote: Option<Quote>, raw: &str) {
		self.out.push(' ');
		self.out.push_str(name);
		match quote {
			None => {}
			Some(Quote::Double) => {
				self.out.push_str("=\"");
				self.out.push_str(raw);
				self.out.push('"');
			}
			Some(Quote::Single) => {
				self.out.push_str("='");
				self.out.push_str(raw);
				self.out.push('\'');
			}
			Some(Quote::Unquoted) => {
				self.out.push('=');
				self.out.push_str(raw);
			}
		}
	}
}

fn starts_tag(rest: &str) -> bool {
	rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn decode_entities(s: &str) -> String {
	if !s.contains('&') {
		return s.to_string();
	}
	s.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&apos;", "'")
		.replace("&amp;", "&")
}
