//! `class_map` and `style_map`: apply keyed entries to an element, removing
//! the entries that disappeared since the previous commit.

use std::collections::BTreeSet;

use super::{Directive, DirectiveState, DirectiveTarget, DirectiveValue};
use crate::error::RenderResult;

struct ClassMap {
	entries: Vec<(String, bool)>,
}

/// Class names applied by the previous commit.
#[derive(Debug, Default)]
pub struct ClassMapState {
	applied: BTreeSet<String>,
}

impl DirectiveState for ClassMapState {}

/// Toggles class names on the owning element.
///
/// Each key may hold several space-separated names. Names applied by an earlier
/// commit and now false or absent are removed; other classes on the element
/// are left alone.
pub fn class_map<I, K>(entries: I) -> DirectiveValue
where
	I: IntoIterator<Item = (K, bool)>,
	K: Into<String>,
{
	DirectiveValue::new(ClassMap {
		entries: entries.into_iter().map(|(k, on)| (k.into(), on)).collect(),
	})
}

impl Directive for ClassMap {
	type State = ClassMapState;

	fn name(&self) -> &'static str {
		"class_map"
	}

	fn render(
		&self,
		target: &mut DirectiveTarget<'_>,
		state: &mut Option<ClassMapState>,
	) -> RenderResult<()> {
		let element = target.require_element(self.name())?;
		let previous = state.take().map(|s| s.applied).unwrap_or_default();

		let mut wanted: Vec<&str> = Vec::new();
		let mut unwanted: BTreeSet<&str> = BTreeSet::new();
		for (key, on) in &self.entries {
			for name in key.split_whitespace() {
				if *on {
					if !wanted.contains(&name) {
						wanted.push(name);
					}
				} else {
					unwanted.insert(name);
				}
			}
		}

		let current = element.get_attribute("class").unwrap_or_default();
		let mut tokens: Vec<&str> = current
			.split_whitespace()
			.filter(|token| {
				!unwanted.contains(token) && !(previous.contains(*token) && !wanted.contains(token))
			})
			.collect();
		for name in &wanted {
			if !tokens.contains(name) {
				tokens.push(*name);
			}
		}

		let next = tokens.join(" ");
		if next != current {
			if next.is_empty() {
				element.remove_attribute("class");
			} else {
				element.set_attribute("class", next)?;
			}
		}
		*state = Some(ClassMapState {
			applied: wanted.into_iter().map(String::from).collect(),
		});
		Ok(())
	}
}

struct StyleMap {
	entries: Vec<(String, String)>,
}

/// Style properties applied by the previous commit.
#[derive(Debug, Default)]
pub struct StyleMapState {
	applied: BTreeSet<String>,
}

impl DirectiveState for StyleMapState {}

/// Sets inline style declarations on the owning element.
///
/// Properties set by an earlier commit and absent now are removed. An empty
/// value removes its property.
pub fn style_map<I, K, V>(entries: I) -> DirectiveValue
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	DirectiveValue::new(StyleMap {
		entries: entries
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect(),
	})
}

fn parse_declarations(style: &str) -> Vec<(String, String)> {
	style
		.split(';')
		.filter_map(|declaration| {
			let (property, value) = declaration.split_once(':')?;
			let property = property.trim();
			(!property.is_empty()).then(|| (property.to_string(), value.trim().to_string()))
		})
		.collect()
}

impl Directive for StyleMap {
	type State = StyleMapState;

	fn name(&self) -> &'static str {
		"style_map"
	}

	fn render(
		&self,
		target: &mut DirectiveTarget<'_>,
		state: &mut Option<StyleMapState>,
	) -> RenderResult<()> {
		let element = target.require_element(self.name())?;
		let previous = state.take().map(|s| s.applied).unwrap_or_default();
		let current = element.get_attribute("style").unwrap_or_default();

		let mut declarations: Vec<(String, String)> = parse_declarations(&current)
			.into_iter()
			.filter(|(property, _)| {
				!previous.contains(property) || self.entries.iter().any(|(k, _)| k == property)
			})
			.collect();

		let mut applied = BTreeSet::new();
		for (property, value) in &self.entries {
			let existing = declarations.iter().position(|(p, _)| p == property);
			match (existing, value.is_empty()) {
				(Some(index), true) => {
					declarations.remove(index);
				}
				(Some(index), false) => declarations[index].1 = value.clone(),
				(None, true) => {}
				(None, false) => declarations.push((property.clone(), value.clone())),
			}
			if !value.is_empty() {
				applied.insert(property.clone());
			}
		}

		let next = declarations
			.iter()
			.map(|(p, v)| format!("{}: {}", p, v))
			.collect::<Vec<_>>()
			.join("; ");
		if next != current {
			if next.is_empty() {
				element.remove_attribute("style");
			} else {
				element.set_attribute("style", next)?;
			}
		}
		*state = Some(StyleMapState { applied });
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{html, render};
	use rstest::rstest;
	use tessera_dom::Node;

	fn button(active: bool, busy: bool) -> crate::TemplateResult {
		html!(
			"<button class=",
			class_map([("btn primary", true), ("active", active), ("busy", busy)]),
			">go</button>"
		)
	}

	#[rstest]
	fn test_class_map_toggles_names() {
		let container = Node::element("div");
		render(&button(true, false), &container).unwrap();
		let element = container.first_child().unwrap();
		assert_eq!(element.get_attribute("class").as_deref(), Some("btn primary active"));

		render(&button(false, true), &container).unwrap();
		assert_eq!(element.get_attribute("class").as_deref(), Some("btn primary busy"));
	}

	#[rstest]
	fn test_class_map_removes_names_dropped_from_map() {
		let container = Node::element("div");
		let view = |names: Vec<&'static str>| {
			html!(
				"<p class=",
				class_map(names.into_iter().map(|n| (n, true))),
				"></p>"
			)
		};
		render(&view(vec!["a", "b"]), &container).unwrap();
		render(&view(vec!["b"]), &container).unwrap();
		let element = container.first_child().unwrap();
		assert_eq!(element.get_attribute("class").as_deref(), Some("b"));

		render(&view(vec![]), &container).unwrap();
		assert!(!element.has_attribute("class"));
	}

	#[rstest]
	fn test_style_map_sets_and_removes() {
		let container = Node::element("div");
		let view = |entries: Vec<(&'static str, &'static str)>| {
			html!("<div style=", style_map(entries), "></div>")
		};
		render(&view(vec![("color", "red"), ("width", "2px")]), &container).unwrap();
		let element = container.first_child().unwrap();
		assert_eq!(
			element.get_attribute("style").as_deref(),
			Some("color: red; width: 2px")
		);

		render(&view(vec![("color", "blue")]), &container).unwrap();
		assert_eq!(element.get_attribute("style").as_deref(), Some("color: blue"));
	}

	#[rstest]
	fn test_parse_declarations() {
		assert_eq!(
			parse_declarations("color: red; ;margin:0"),
			vec![
				("color".to_string(), "red".to_string()),
				("margin".to_string(), "0".to_string())
			]
		);
	}
}
