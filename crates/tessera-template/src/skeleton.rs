//! Parsed template markup.
//!
//! A [`Skeleton`] is the inert tree parsed once per compiled template from the
//! compiler's intermediate markup. It is plain data, shareable across threads,
//! and [`materialize`](Skeleton::materialize)d into fresh live nodes for every
//! instance.

use html5gum::{State, Token, Tokenizer};
use tessera_dom::{DomError, Node, is_void_element};

use crate::error::CompileError;

/// A node of the parsed markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkeletonNode {
	/// An element with its attributes in tokenizer order.
	Element {
		/// Lower-cased tag name.
		tag: String,
		/// Attribute name/value pairs.
		attributes: Vec<(String, String)>,
		/// Child nodes.
		children: Vec<SkeletonNode>,
	},
	/// A text run; adjacent runs are merged.
	Text(String),
	/// A comment.
	Comment(String),
}

impl SkeletonNode {
	fn materialize(&self) -> Result<Node, DomError> {
		match self {
			Self::Element {
				tag,
				attributes,
				children,
			} => {
				let element = Node::element(tag.as_str());
				for (name, value) in attributes {
					element.set_attribute(name, value.as_str())?;
				}
				for child in children {
					element.append_child(&child.materialize()?)?;
				}
				Ok(element)
			}
			Self::Text(text) => Ok(Node::text(text.as_str())),
			Self::Comment(text) => Ok(Node::comment(text.as_str())),
		}
	}
}

/// Root-level nodes of parsed markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skeleton {
	roots: Vec<SkeletonNode>,
}

struct OpenElement {
	tag: String,
	attributes: Vec<(String, String)>,
	children: Vec<SkeletonNode>,
}

impl OpenElement {
	fn close(self) -> SkeletonNode {
		SkeletonNode::Element {
			tag: self.tag,
			attributes: self.attributes,
			children: self.children,
		}
	}
}

impl Skeleton {
	/// Parses markup leniently: stray end tags are dropped and unclosed
	/// elements are closed at the end of input.
	pub fn parse(markup: &str) -> Result<Self, CompileError> {
		let mut tokenizer = Tokenizer::new(markup);
		let mut stack: Vec<OpenElement> = Vec::new();
		let mut roots: Vec<SkeletonNode> = Vec::new();

		while let Some(token) = tokenizer.next() {
			let token = token.map_err(|_| CompileError::Parse("tokenizer error".into()))?;
			match token {
				Token::StartTag(tag) => {
					let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
					let attributes = tag
						.attributes
						.iter()
						.map(|(k, v)| {
							(
								String::from_utf8_lossy(k).into_owned(),
								String::from_utf8_lossy(v).into_owned(),
							)
						})
						.collect();
					let element = OpenElement {
						tag: name.clone(),
						attributes,
						children: Vec::new(),
					};
					if tag.self_closing || is_void_element(&name) {
						attach(&mut stack, &mut roots, element.close());
					} else {
						match name.as_str() {
							"script" | "style" => tokenizer.set_state(State::ScriptData),
							"textarea" | "title" => tokenizer.set_state(State::RcData),
							_ => {}
						}
						stack.push(element);
					}
				}
				Token::EndTag(tag) => {
					let name = String::from_utf8_lossy(&tag.name).to_ascii_lowercase();
					if let Some(idx) = stack.iter().rposition(|open| open.tag == name) {
						while stack.len() > idx {
							if let Some(open) = stack.pop() {
								attach(&mut stack, &mut roots, open.close());
							}
						}
					}
				}
				Token::String(text) => {
					let text = String::from_utf8_lossy(&text);
					let children = match stack.last_mut() {
						Some(open) => &mut open.children,
						None => &mut roots,
					};
					push_text(children, &text);
				}
				Token::Comment(text) => {
					let comment = SkeletonNode::Comment(String::from_utf8_lossy(&text).into_owned());
					attach(&mut stack, &mut roots, comment);
				}
				Token::Doctype(_) | Token::Error(_) => {}
			}
		}

		while let Some(open) = stack.pop() {
			attach(&mut stack, &mut roots, open.close());
		}

		Ok(Self { roots })
	}

	/// Root-level nodes.
	pub fn roots(&self) -> &[SkeletonNode] {
		&self.roots
	}

	/// Builds a fresh fragment holding live copies of the root nodes.
	pub fn materialize(&self) -> Result<Node, DomError> {
		let fragment = Node::fragment();
		for root in &self.roots {
			fragment.append_child(&root.materialize()?)?;
		}
		Ok(fragment)
	}
}

fn attach(stack: &mut [OpenElement], roots: &mut Vec<SkeletonNode>, node: SkeletonNode) {
	match stack.last_mut() {
		Some(parent) => parent.children.push(node),
		None => roots.push(node),
	}
}

fn push_text(children: &mut Vec<SkeletonNode>, text: &str) {
	if text.is_empty() {
		return;
	}
	if let Some(SkeletonNode::Text(last)) = children.last_mut() {
		last.push_str(text);
	} else {
		children.push(SkeletonNode::Text(text.to_string()));
	}
}
