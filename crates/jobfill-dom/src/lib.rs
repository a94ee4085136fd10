//! In-memory DOM for form analysis and filling.
//!
//! Pages are parsed from HTML into an arena of nodes. Elements carry the
//! live state a browser would keep outside the markup (current value,
//! checkedness, selection, focus) plus enough layout and style information
//! to answer "is this control visible?" without a rendering engine.
//!
//! ## Layout
//!
//! There is no layout engine. Each element gets a nominal box stacked in
//! document order unless one is assigned with [`Document::set_layout`];
//! inline `width: 0` / `height: 0` collapse the nominal box.

mod document;
mod dom_types;
mod error;
mod node;
mod parse;
mod serialize;
mod style;

pub use document::{collapse_whitespace, Document};
pub use dom_types::{BoundingBox, DomEvent, EventKind, ViewportInfo};
pub use error::DomError;
pub use node::NodeId;
pub use style::ComputedStyle;

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
