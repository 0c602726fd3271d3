use thiserror::Error;

/// A local failure while scanning raw markup.
///
/// These never escape the public entry points: callers log them and fall back
/// to "not found" results so the rest of the document is still analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("attribute `{attribute}` has no closing quote")]
    MissingClosingQuote { attribute: String },

    #[error("element `{name}` is never closed")]
    UnterminatedElement { name: String },

    #[error("no opening tag found")]
    MissingOpeningTag,
}

/// Failure reported by an element handler.
///
/// The dispatcher logs these and moves on to the next handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("malformed `{element}` element: {reason}")]
    Malformed {
        element: String,
        reason: &'static str,
    },
}
