//! Expression shape detection.
//!
//! Rules are checked in order and the first match wins. FLWOR detection runs
//! first because FLWOR bodies also contain `/` and `[...]`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TranslateError;

/// `for $var in` binding anywhere in the input
static FOR_BINDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bfor\s+\$[A-Za-z_][\w\-]*\s+in\b").unwrap());

/// Bracketed predicate with some content
static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*\]").unwrap());

/// Translation strategy selected for an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `for $x in collection(...) where ... return ...`
    Flwor,
    /// `collection(...)/a/b[...]/c`
    PathExpression,
    /// `collection(...)[...]`
    PredicateExpression,
}

/// Classify a trimmed input string.
pub fn classify(input: &str) -> Result<Shape, TranslateError> {
    if FOR_BINDING_RE.is_match(input) {
        Ok(Shape::Flwor)
    } else if input.contains('/') {
        Ok(Shape::PathExpression)
    } else if BRACKET_RE.is_match(input) {
        Ok(Shape::PredicateExpression)
    } else {
        Err(TranslateError::UnrecognizedShape(input.to_string()))
    }
}
