/// A structured literal as it appears in command text.
///
/// Unlike a JSON document model, objects keep their keys in insertion order so
/// operator documents such as `{"$regex": ..., "$options": "i"}` render exactly
/// as built.
///
/// # Examples
///
/// ```
/// use xqmql::literal::Literal;
/// use xqmql::output::to_literal_text;
///
/// let doc = Literal::object([
///     ("price", Literal::object([("$gt", Literal::Float(10.0))])),
/// ]);
/// assert_eq!(to_literal_text(&doc), r#"{"price":{"$gt":10.0}}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Boolean(bool),

    /// Rendered without a decimal point (projection flags)
    Integer(i64),

    /// Rendered with full precision and always with a decimal point or exponent
    Float(f64),

    String(String),

    Array(Vec<Literal>),

    /// Ordered key/value pairs
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// Build an object from ordered pairs.
    pub fn object<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Literal)>,
        K: Into<String>,
    {
        Literal::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn empty_object() -> Self {
        Literal::Object(Vec::new())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Literal::String(s.into())
    }
}
