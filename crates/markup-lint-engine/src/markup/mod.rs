//! Markup primitives: tag scanning, attribute lookup, element extraction and
//! tree building.

pub mod attribute;
pub mod extractor;
pub mod scan;
pub mod tree;

pub use attribute::{AttributeKind, AttributeKinds, AttributeMatch, inline_value, locate};
pub use extractor::{ElementSink, ElementSource, extract};
pub use tree::{Attribute, AttributeValue, Element, build, build_at};
