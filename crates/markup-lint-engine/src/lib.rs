pub mod analysis;
pub mod cache;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod handlers;
pub mod markup;
pub mod project;
pub mod span;
pub mod text;

// Re-export key types for easier usage
pub use analysis::{Analyzer, analyze, is_markup_file};
pub use cache::SizeLimitedMap;
pub use diagnostics::{DiagnosticTag, Severity, TagPayload, TagSuppression, TextChange, TextEdit, codes};
pub use error::{HandlerError, ScanError};
pub use grid::{InsertOptions, InsertPosition, Replacement, RowInsertion, compute_insertion, compute_insertion_with};
pub use project::ProjectKind;
pub use span::Span;
