//! Error types for translation and rendering.

use thiserror::Error;

/// Errors raised while translating a query string into [`crate::QueryIr`].
///
/// Every variant carries the offending input text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Input is neither a FLWOR, path, nor predicate expression
    #[error("unrecognized expression shape: '{0}'")]
    UnrecognizedShape(String),

    /// FLWOR input without a `for $var in collection(...)` binding
    #[error("missing or malformed for clause (expected `for $var in collection(\"name\")`): '{0}'")]
    MissingForClause(String),

    /// Where-clause condition matching none of the predicate forms
    #[error("unsupported condition: '{0}'")]
    UnsupportedCondition(String),

    /// Bracketed predicate matching none of the predicate forms
    #[error("unsupported predicate: '{0}'")]
    UnsupportedPredicate(String),

    /// `text()` used without an enclosing element path
    #[error("text() requires an element path context: '{0}'")]
    MissingContextPath(String),

    /// Path or predicate expression without a leading `collection(...)` call
    #[error("collection reference not found: '{0}'")]
    CollectionNotFound(String),
}

/// Errors raised while rendering an IR that violates its own invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// `And`/`Or` node without children
    #[error("empty ${0} connective")]
    EmptyConnective(&'static str),

    /// Field path with no segments used as a key
    #[error("empty field path")]
    EmptyFieldPath,

    /// NaN or infinite comparison value
    #[error("non-finite number {0} cannot be rendered")]
    NonFiniteNumber(f64),

    /// Collection name that cannot follow `db.`
    #[error("collection name '{0}' cannot be rendered as db.<name>")]
    InvalidCollection(String),
}
