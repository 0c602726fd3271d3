//! Diagnostic tags, suppression rules and quick-fix edits.

pub mod codes;
pub mod edit;
pub mod suppression;
pub mod tag;

pub use edit::{TextChange, TextEdit};
pub use suppression::{TagList, TagSuppression};
pub use tag::{Axis, DefinitionsToAdd, DiagnosticTag, Severity, TagPayload, element_identifier};
