//! The commit engine.
//!
//! Walks an instance's parts in order and writes each new value to the tree
//! with the minimal mutation its part kind allows:
//!
//! - attributes are skipped when the value is unchanged, removed for
//!   `null`/`false` and set to the empty string for `true`;
//! - composite attributes are rejoined and written only when the joined
//!   string differs from the last write;
//! - properties are assigned when the value changed;
//! - event listeners are swapped only when the handler changed;
//! - action directives run through the registry, with their previous cleanup
//!   invoked first.
//!
//! A failing part is logged and left unrendered, and later parts are still
//! committed. The first error is returned.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::directive::DirectiveTarget;
use crate::error::{RenderError, RenderResult};
use crate::part::{ActionPart, ActionSource, AttributeBinding, AttributePart, EventPart, Part, PropertyPart};
use crate::registry;
use crate::value::Value;

/// Commits `values` into `parts`.
pub fn commit(parts: &mut [Part], values: &[Value]) -> RenderResult<()> {
	let mut first_error: Option<RenderError> = None;
	for part in parts.iter_mut() {
		if let Err(err) = part.commit(values) {
			tracing::error!(kind = ?part.kind(), error = %err, "failed to commit part");
			first_error.get_or_insert(err);
		}
	}
	first_error.map_or(Ok(()), Err)
}

impl Part {
	fn commit(&mut self, values: &[Value]) -> RenderResult<()> {
		let null = Value::Null;
		let value_at = |index: usize| values.get(index).unwrap_or(&null);
		match self {
			Self::Child(index, part) => part.commit(value_at(*index)),
			Self::Attribute(part) => match part.binding {
				AttributeBinding::Simple(index) => part.commit_simple(value_at(index)),
				AttributeBinding::Composite(_) => part.commit_composite(values),
			},
			Self::Property(part) => part.commit(value_at(part.index)),
			Self::Event(part) => part.commit(value_at(part.index)),
			Self::Action(part) => {
				let value = match &part.source {
					ActionSource::Static(literal) => Value::from(literal.as_str()),
					ActionSource::Dynamic(index) => value_at(*index).clone(),
				};
				part.commit(value)
			}
		}
	}
}

impl AttributePart {
	fn commit_simple(&mut self, value: &Value) -> RenderResult<()> {
		if let Value::Directive(directive) = value {
			self.previous = None;
			let mut slot = self.directive.take();
			let result = {
				let mut target = DirectiveTarget::attribute(&self.element, &self.name);
				directive.apply(&mut target, &mut slot)
			};
			self.directive = slot;
			return result;
		}

		if self
			.previous
			.as_ref()
			.is_some_and(|previous| previous.same_as(value))
		{
			return Ok(());
		}
		if let Some(slot) = self.directive.take() {
			slot.dispose();
		}

		match value {
			Value::Null | Value::Bool(false) => {
				self.element.remove_attribute(&self.name);
			}
			Value::Bool(true) => self.element.set_attribute(&self.name, "")?,
			other => match other.to_text() {
				Some(text) => self.element.set_attribute(&self.name, text)?,
				None => {
					tracing::warn!(
						attribute = %self.name,
						kind = other.kind_name(),
						"value cannot be written to an attribute; removing it"
					);
					self.element.remove_attribute(&self.name);
				}
			},
		}
		self.previous = value.is_primitive().then(|| value.clone());
		Ok(())
	}

	fn commit_composite(&mut self, values: &[Value]) -> RenderResult<()> {
		let AttributeBinding::Composite(composite) = &self.binding else {
			return Ok(());
		};
		let joined = composite.join(values);
		if self.last_written.as_deref() == Some(joined.as_str()) {
			return Ok(());
		}
		if joined.is_empty() && composite.literals_empty() {
			self.element.remove_attribute(&self.name);
		} else {
			self.element.set_attribute(&self.name, joined.as_str())?;
		}
		self.last_written = Some(joined);
		Ok(())
	}
}

impl PropertyPart {
	fn commit(&mut self, value: &Value) -> RenderResult<()> {
		if self
			.previous
			.as_ref()
			.is_some_and(|previous| previous.same_as(value))
		{
			return Ok(());
		}
		self.element.set_property(&self.name, value.to_property())?;
		self.previous = Some(value.clone());
		Ok(())
	}
}

impl EventPart {
	fn commit(&mut self, value: &Value) -> RenderResult<()> {
		match value {
			Value::Handler(handler) => {
				if self
					.listener
					.as_ref()
					.is_some_and(|current| current.ptr_eq(handler))
				{
					return Ok(());
				}
				if let Some(old) = self.listener.take() {
					self.element.remove_event_listener(&self.event_type, &old);
				}
				self.element
					.add_event_listener(&self.event_type, handler.clone())?;
				self.listener = Some(handler.clone());
			}
			other => {
				if let Some(old) = self.listener.take() {
					self.element.remove_event_listener(&self.event_type, &old);
				}
				if !other.is_null() {
					tracing::warn!(
						event = %self.event_type,
						kind = other.kind_name(),
						"non-callable value bound to an event; no listener attached"
					);
				}
			}
		}
		Ok(())
	}
}

impl ActionPart {
	fn commit(&mut self, value: Value) -> RenderResult<()> {
		let unchanged = match self.source {
			ActionSource::Static(_) => self.ran,
			ActionSource::Dynamic(_) => {
				self.ran
					&& self
						.previous
						.as_ref()
						.is_some_and(|previous| previous.same_as(&value))
			}
		};
		if unchanged {
			return Ok(());
		}

		self.run_cleanup();
		self.ran = true;

		let Some(directive) = registry::get_attribute_directive(&self.name) else {
			tracing::warn!(directive = %self.name, "attribute directive is not registered");
			self.previous = Some(value);
			return Ok(());
		};

		let invocation = catch_unwind(AssertUnwindSafe(|| {
			directive(&self.element, &value, &self.name)
		}));
		self.previous = Some(value);
		match invocation {
			Ok(cleanup) => {
				self.cleanup = cleanup;
				Ok(())
			}
			Err(_) => {
				tracing::error!(directive = %self.name, "attribute directive panicked");
				Err(RenderError::Directive {
					directive: self.name.clone(),
					message: "directive panicked".to_string(),
				})
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::compiled_template;
	use crate::html;
	use crate::instance::TemplateInstance;
	use crate::strings::TemplateResult;
	use rstest::rstest;
	use std::cell::Cell;
	use std::rc::Rc;
	use tessera_dom::{Event, Node};

	fn mount(result: &TemplateResult) -> (Node, TemplateInstance) {
		let compiled = compiled_template(result).unwrap();
		let (fragment, mut instance) = TemplateInstance::new(compiled).unwrap();
		instance.update(result.values()).unwrap();
		let host = Node::element("div");
		host.append_child(&fragment).unwrap();
		(host, instance)
	}

	fn link(href: Value) -> TemplateResult {
		html!("<a href=", href, ">x</a>")
	}

	#[rstest]
	#[case(Value::Null, None)]
	#[case(Value::from(false), None)]
	#[case(Value::from(true), Some(""))]
	#[case(Value::from("/home"), Some("/home"))]
	#[case(Value::from(3), Some("3"))]
	fn test_attribute_values(#[case] value: Value, #[case] expected: Option<&str>) {
		let (host, _instance) = mount(&link(value));
		let anchor = host.first_child().unwrap();
		assert_eq!(anchor.get_attribute("href").as_deref(), expected);
	}

	#[rstest]
	fn test_unchanged_attribute_is_not_rewritten() {
		let (_host, mut instance) = mount(&link(Value::from("/a")));
		tessera_dom::mutations::reset();
		instance.update(link(Value::from("/a")).values()).unwrap();
		assert_eq!(tessera_dom::mutations::snapshot().attribute_sets, 0);
	}

	#[rstest]
	fn test_composite_attribute_rewrites_joined_value() {
		let row = |a: &str, b: &str| html!("<div class=\"", a, " mid ", b, "\"></div>");
		let (host, mut instance) = mount(&row("x", "y"));
		let div = host.first_child().unwrap();
		assert_eq!(div.get_attribute("class").as_deref(), Some("x mid y"));

		tessera_dom::mutations::reset();
		instance.update(row("x", "z").values()).unwrap();
		assert_eq!(div.get_attribute("class").as_deref(), Some("x mid z"));
		assert_eq!(tessera_dom::mutations::snapshot().attribute_sets, 1);
	}

	#[rstest]
	fn test_property_assignment() {
		let field = |v: &str| html!("<input .value=", v, ">");
		let (host, mut instance) = mount(&field("a"));
		let input = host.first_child().unwrap();
		assert_eq!(input.property("value").unwrap().as_text(), Some("a"));
		assert!(!input.has_attribute("value"));
		instance.update(field("b").values()).unwrap();
		assert_eq!(input.property("value").unwrap().as_text(), Some("b"));
	}

	#[rstest]
	fn test_event_listener_swap() {
		let first = Rc::new(Cell::new(0));
		let second = Rc::new(Cell::new(0));
		let (a, b) = (first.clone(), second.clone());
		let handler_a = Value::handler(move |_| a.set(a.get() + 1));
		let handler_b = Value::handler(move |_| b.set(b.get() + 1));
		let button = |h: Value| html!("<button @click=", h, ">go</button>");

		let (host, mut instance) = mount(&button(handler_a.clone()));
		let element = host.first_child().unwrap();
		instance.update(button(handler_a).values()).unwrap();
		assert_eq!(element.listener_count("click"), 1);

		instance.update(button(handler_b).values()).unwrap();
		element.dispatch_event(&Event::new("click"));
		assert_eq!((first.get(), second.get()), (0, 1));
		assert_eq!(element.listener_count("click"), 1);

		instance.update(button(Value::Null).values()).unwrap();
		assert_eq!(element.listener_count("click"), 0);
	}

	#[rstest]
	fn test_dispose_detaches_listeners() {
		let button = html!("<button @click=", Value::handler(|_| {}), ">go</button>");
		let (host, mut instance) = mount(&button);
		instance.dispose();
		assert_eq!(host.first_child().unwrap().listener_count("click"), 0);
	}

	#[rstest]
	fn test_failing_part_does_not_stop_later_parts() {
		let broken = TemplateResult::from_segments(vec!["<!-- ".into(), " -->".into()], vec![Value::Null]);
		let page = html!("<p>", broken, "</p><p>", "after", "</p>");
		let compiled = compiled_template(&page).unwrap();
		let (fragment, mut instance) = TemplateInstance::new(compiled).unwrap();
		assert!(instance.update(page.values()).is_err());
		assert_eq!(fragment.text_content(), "after");
	}
}
