//! Tessera DOM - the live tree tessera templates render into
//!
//! A small, single-threaded node tree with the operations a template engine
//! needs: structural edits, attributes, properties, event listeners and
//! character data. It stands in for a browser DOM so the rendering engine can
//! be driven and inspected natively.
//!
//! ## Example
//!
//! ```
//! use tessera_dom::{Event, EventListener, Node};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let doc = Node::document();
//! let button = Node::element("button");
//! doc.append_child(&button).unwrap();
//!
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! button
//!     .add_event_listener("click", EventListener::new(move |_| counter.set(counter.get() + 1)))
//!     .unwrap();
//!
//! button.dispatch_event(&Event::new("click"));
//! assert_eq!(clicks.get(), 1);
//! assert!(button.is_connected());
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod mutations;
pub mod node;
pub mod property;
pub mod serialize;

pub use error::DomError;
pub use event::{Event, EventListener, ListenerId};
pub use mutations::MutationStats;
pub use node::{Node, NodeId, NodeType, WeakNode};
pub use property::PropertyValue;
pub use serialize::{escape_attr, escape_text, is_void_element};
