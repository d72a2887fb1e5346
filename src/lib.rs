pub mod ast;
pub mod classify;
pub mod clauses;
pub mod cli;
pub mod compose;
pub mod error;
pub mod flwor;
pub mod literal;
pub mod output;
pub mod path;
pub mod predicate;
pub mod render;
pub mod translator;

pub use ast::{CompareOp, FieldPath, FilterExpr, Operation, Projection, QueryIr};
pub use classify::{Shape, classify};
pub use error::{RenderError, TranslateError};
pub use render::{CommandRenderer, RenderOptions};
pub use translator::{TranslateOptions, Translator};

/// Translate a query string with default options.
///
/// ```
/// use xqmql::{translate, CompareOp, FieldPath, FilterExpr, Projection};
///
/// let ir = translate(r#"for $b in collection("books") where $b/price > 10 return $b"#).unwrap();
/// assert_eq!(ir.collection, "books");
/// assert_eq!(
///     ir.filter,
///     Some(FilterExpr::Compare {
///         path: FieldPath::from_segments(["price"]),
///         op: CompareOp::GreaterThan,
///         value: 10.0,
///     })
/// );
/// assert_eq!(ir.projection, Projection::None);
/// ```
pub fn translate(input: &str) -> Result<QueryIr, TranslateError> {
    Translator::new().translate(input)
}

/// Render a translated query as pretty-printed command text.
///
/// ```
/// let ir = xqmql::translate(r#"for $b in collection("books") where $b/price > 10 return $b"#).unwrap();
/// assert_eq!(
///     xqmql::render(ir).unwrap(),
///     "db.books.find({\n  \"price\": {\n    \"$gt\": 10.0\n  }\n})"
/// );
/// ```
pub fn render(ir: QueryIr) -> Result<String, RenderError> {
    CommandRenderer::default().render(&ir)
}
