use serde::Serialize;

use crate::ast::FieldPath;

/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
}

impl CompareOp {
    /// Parse the query-language spelling of an operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(CompareOp::GreaterThan),
            ">=" => Some(CompareOp::GreaterEqual),
            "<" => Some(CompareOp::LessThan),
            "<=" => Some(CompareOp::LessEqual),
            _ => None,
        }
    }

}

/// Boolean condition tree selecting documents.
///
/// `And` and `Or` nodes always hold at least one child when produced by the
/// translator; the renderer rejects empty ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterExpr {
    /// Field equals a string literal
    ///
    /// # Example
    /// ```text
    /// $b/genre = "fantasy"
    /// ```
    Equals { path: FieldPath, value: String },

    /// Numeric comparison, the literal always stored as `f64`
    ///
    /// # Example
    /// ```text
    /// price >= 10
    /// ```
    Compare {
        path: FieldPath,
        op: CompareOp,
        value: f64,
    },

    /// Case-insensitive substring match
    ///
    /// # Example
    /// ```text
    /// contains(title, "ring")
    /// ```
    MatchesSubstring { path: FieldPath, pattern: String },

    /// Field is present
    ///
    /// # Example
    /// ```text
    /// exists(isbn)
    /// ```
    Exists { path: FieldPath },

    /// Text content of the context element equals a literal
    ///
    /// # Example
    /// ```text
    /// collection("books")/book/title[text() = "Dune"]
    /// ```
    TextEquals { path: FieldPath, value: String },

    /// All children hold, in source order
    And(Vec<FilterExpr>),

    /// Any child holds, in source order
    Or(Vec<FilterExpr>),
}

impl FilterExpr {
    /// The field a leaf condition tests, `None` for connectives.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            FilterExpr::Equals { path, .. }
            | FilterExpr::Compare { path, .. }
            | FilterExpr::MatchesSubstring { path, .. }
            | FilterExpr::Exists { path }
            | FilterExpr::TextEquals { path, .. } => Some(path),
            FilterExpr::And(_) | FilterExpr::Or(_) => None,
        }
    }
}
