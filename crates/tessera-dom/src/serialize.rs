//! HTML serialization of a subtree.

use crate::node::{Node, NodeView};

/// Elements rendered without a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Elements whose text content is emitted verbatim.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Returns true if `tag` never has a closing tag.
pub fn is_void_element(tag: &str) -> bool {
	VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Escapes text content.
pub fn escape_text(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// Escapes a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('"', "&quot;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

impl Node {
	/// Serializes this node and its subtree.
	///
	/// Documents and fragments serialize as their children.
	pub fn to_html(&self) -> String {
		let mut out = String::new();
		write_node(self, false, &mut out);
		out
	}

	/// Serializes the children of this node.
	pub fn inner_html(&self) -> String {
		let raw = self
			.tag_name()
			.is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t.as_str()));
		let mut out = String::new();
		for child in self.children() {
			write_node(&child, raw, &mut out);
		}
		out
	}
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
	let mut element_tag = None;
	node.visit(|view| match view {
		NodeView::Container => {}
		NodeView::Text(t) if raw_text => out.push_str(t),
		NodeView::Text(t) => out.push_str(&escape_text(t)),
		NodeView::Comment(c) => {
			out.push_str("<!--");
			out.push_str(c);
			out.push_str("-->");
		}
		NodeView::Element { tag, attributes } => {
			out.push('<');
			out.push_str(tag);
			for (name, value) in attributes {
				out.push(' ');
				out.push_str(name);
				if !value.is_empty() {
					out.push_str("=\"");
					out.push_str(&escape_attr(value));
					out.push('"');
				}
			}
			out.push('>');
			element_tag = Some(tag.to_string());
		}
	});

	match element_tag {
		Some(tag) if is_void_element(&tag) => {}
		Some(tag) => {
			let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
			for child in node.children() {
				write_node(&child, raw, out);
			}
			out.push_str("</");
			out.push_str(&tag);
			out.push('>');
		}
		None => {
			if !node.is_text() && !node.is_comment() {
				for child in node.children() {
					write_node(&child, raw_text, out);
				}
			}
		}
	}
}
