//! Structured-literal serialization for command text.
//!
//! This module prints [`Literal`] values in either compact or pretty form.
//! Output is deterministic: object keys appear in the order they were built.
//!
//! # Features
//!
//! - **Compact output** via [`to_literal_text()`] - no whitespace
//! - **Pretty output** via [`to_literal_text_pretty()`] - 2-space indentation
//! - **String quoting** - JSON escaping only
//! - **Float precision** - shortest representation that round-trips, `10.0` not `10`
//!
//! # Examples
//!
//! ```
//! use xqmql::literal::Literal;
//! use xqmql::output::{to_literal_text, to_literal_text_pretty};
//!
//! let value = Literal::Float(0.1);
//! assert_eq!(to_literal_text(&value), "0.1");
//! assert_eq!(to_literal_text_pretty(&value), "0.1");
//!
//! let doc = Literal::object([("name", Literal::Integer(1))]);
//! assert_eq!(to_literal_text_pretty(&doc), "{\n  \"name\": 1\n}");
//! ```

use crate::literal::Literal;

pub struct LiteralPrinter {
    pretty: bool,
}

impl LiteralPrinter {
    pub fn new(pretty: bool) -> Self {
        LiteralPrinter { pretty }
    }

    pub fn print(&self, value: &Literal) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &Literal, indent: usize) -> String {
        match value {
            Literal::Boolean(b) => b.to_string(),
            Literal::Integer(n) => n.to_string(),
            // Debug keeps the decimal point on whole numbers
            Literal::Float(n) => format!("{:?}", n),
            Literal::String(s) => quote(s),
            Literal::Array(arr) => self.print_array(arr, indent),
            Literal::Object(pairs) => self.print_object(pairs, indent),
        }
    }

    fn print_array(&self, arr: &[Literal], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        if self.pretty {
            let mut result = "[\n".to_string();
            let items: Vec<String> = arr
                .iter()
                .map(|v| {
                    format!(
                        "{}{}",
                        self.indent(indent + 1),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push(']');
            result
        } else {
            let items: Vec<String> = arr.iter().map(|v| self.print_value(v, indent)).collect();
            format!("[{}]", items.join(","))
        }
    }

    fn print_object(&self, pairs: &[(String, Literal)], indent: usize) -> String {
        if pairs.is_empty() {
            return "{}".to_string();
        }

        if self.pretty {
            let mut result = "{\n".to_string();
            let items: Vec<String> = pairs
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{}{}: {}",
                        self.indent(indent + 1),
                        quote(k),
                        self.print_value(v, indent + 1)
                    )
                })
                .collect();
            result.push_str(&items.join(",\n"));
            result.push('\n');
            result.push_str(&self.indent(indent));
            result.push('}');
            result
        } else {
            let items: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{}:{}", quote(k), self.print_value(v, indent)))
                .collect();
            format!("{{{}}}", items.join(","))
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }
}

/// Quote a string with JSON escaping.
fn quote(s: &str) -> String {
    // Serializing a str cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

/// Converts a literal to compact text.
pub fn to_literal_text(value: &Literal) -> String {
    LiteralPrinter::new(false).print(value)
}

/// Converts a literal to pretty-printed text with 2-space indentation.
///
/// # Examples
///
/// ```
/// use xqmql::literal::Literal;
/// use xqmql::output::to_literal_text_pretty;
///
/// let doc = Literal::object([(
///     "$and",
///     Literal::Array(vec![
///         Literal::object([("tag", Literal::string("sale"))]),
///         Literal::object([("stock", Literal::object([("$gt", Literal::Float(0.0))]))]),
///     ]),
/// )]);
///
/// let text = to_literal_text_pretty(&doc);
/// assert!(text.starts_with("{\n  \"$and\": [\n    {\n      \"tag\": \"sale\""));
/// ```
pub fn to_literal_text_pretty(value: &Literal) -> String {
    LiteralPrinter::new(true).print(value)
}
