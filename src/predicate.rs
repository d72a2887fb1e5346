//! Single-condition predicate parsing.
//!
//! A condition is tried against an ordered table of matchers and the first
//! one that recognizes it wins:
//!
//! 1. `field = "literal"` → [`FilterExpr::Equals`]
//! 2. `field > 10` (`>`, `>=`, `<`, `<=`) → [`FilterExpr::Compare`]
//! 3. `text() = "literal"` → [`FilterExpr::TextEquals`]
//! 4. `contains(field, "literal")` → [`FilterExpr::MatchesSubstring`]
//! 5. `exists(field)` → [`FilterExpr::Exists`]
//!
//! Fields are written either bare (`address/city`) or through the loop
//! variable of a FLWOR expression (`$b/address/city`). Either way the
//! context prefix, if any, is prepended.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::{
    ast::{CompareOp, FieldPath, FilterExpr},
    error::TranslateError,
};

/// Optional `$var/` qualifier followed by a slash-separated field path
const FIELD: &str =
    r"(?:\$(?P<var>[A-Za-z_][\w\-]*)/)?(?P<field>@?[A-Za-z_][\w\-]*(?:/@?[A-Za-z_][\w\-]*)*)";

/// Single- or double-quoted string literal
const LITERAL: &str = r#"(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#;

const NUMBER: &str = r"(?P<num>[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)";

static EQUALS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?is)^\s*{FIELD}\s*=\s*{LITERAL}\s*$")).unwrap());

static COMPARE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?is)^\s*{FIELD}\s*(?P<op>>=|<=|>|<)\s*{NUMBER}\s*$")).unwrap()
});

static TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?is)^\s*(?:\$(?P<var>[A-Za-z_][\w\-]*)(?P<field>(?:/@?[A-Za-z_][\w\-]*)*)/)?text\s*\(\s*\)\s*=\s*{LITERAL}\s*$"
    ))
    .unwrap()
});

static CONTAINS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?is)^\s*contains\s*\(\s*{FIELD}\s*,\s*{LITERAL}\s*\)\s*$"
    ))
    .unwrap()
});

static EXISTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?is)^\s*exists\s*\(\s*{FIELD}\s*\)\s*$")).unwrap());

/// Per-call parsing context.
///
/// Built fresh for every translation and never stored between calls.
#[derive(Debug, Clone, Default)]
pub struct PredicateContext<'a> {
    /// Element path the predicate applies to (empty for none)
    pub prefix: FieldPath,
    /// Loop variable accepted in `$var/field` references
    pub bound_var: Option<&'a str>,
}

impl<'a> PredicateContext<'a> {
    /// Context for a bracketed predicate under `prefix`.
    pub fn with_prefix(prefix: FieldPath) -> Self {
        PredicateContext {
            prefix,
            bound_var: None,
        }
    }

    /// Context for a FLWOR where clause binding `var`.
    pub fn for_variable(var: &'a str) -> Self {
        PredicateContext {
            prefix: FieldPath::root(),
            bound_var: Some(var),
        }
    }

    /// Resolve the `var`/`field` captures of a match against this context.
    ///
    /// A `$var/` qualifier naming anything but the bound variable makes the
    /// rule not apply.
    fn resolve_field(&self, caps: &Captures<'_>) -> Option<FieldPath> {
        if !self.accepts_variable(caps) {
            return None;
        }
        let field = caps.name("field").map_or("", |m| m.as_str());
        let field = FieldPath::from_slashed(field)?;
        Some(self.prefix.join(&field))
    }

    fn accepts_variable(&self, caps: &Captures<'_>) -> bool {
        match caps.name("var") {
            Some(var) => self.bound_var == Some(var.as_str()),
            None => true,
        }
    }
}

type Matcher = fn(&str, &PredicateContext<'_>) -> Result<Option<FilterExpr>, TranslateError>;

/// Matchers in precedence order.
const RULES: [(&str, Matcher); 5] = [
    ("equality", match_equality),
    ("comparison", match_comparison),
    ("text", match_text),
    ("contains", match_contains),
    ("exists", match_exists),
];

/// Parse one condition into a filter node.
///
/// # Errors
///
/// - [`TranslateError::MissingContextPath`] for `text()` with no element path
/// - [`TranslateError::UnsupportedCondition`] when no rule matches
///
/// # Examples
///
/// ```
/// use xqmql::predicate::{parse_condition, PredicateContext};
/// use xqmql::{CompareOp, FieldPath, FilterExpr};
///
/// let ctx = PredicateContext::with_prefix(FieldPath::from_segments(["book"]));
/// let expr = parse_condition("price >= 10", &ctx).unwrap();
/// assert_eq!(
///     expr,
///     FilterExpr::Compare {
///         path: FieldPath::from_segments(["book", "price"]),
///         op: CompareOp::GreaterEqual,
///         value: 10.0,
///     }
/// );
/// ```
pub fn parse_condition(
    text: &str,
    ctx: &PredicateContext<'_>,
) -> Result<FilterExpr, TranslateError> {
    for (name, matcher) in RULES {
        if let Some(expr) = matcher(text, ctx)? {
            let field = expr.path().map(FieldPath::dotted);
            trace!(
                rule = name,
                field = field.as_deref(),
                condition = text,
                "predicate rule matched"
            );
            return Ok(expr);
        }
    }

    trace!(condition = text, "no predicate rule matched");
    Err(TranslateError::UnsupportedCondition(text.trim().to_string()))
}

fn literal(caps: &Captures<'_>) -> String {
    caps.name("dq")
        .or_else(|| caps.name("sq"))
        .map_or_else(String::new, |m| m.as_str().to_string())
}

fn match_equality(
    text: &str,
    ctx: &PredicateContext<'_>,
) -> Result<Option<FilterExpr>, TranslateError> {
    Ok(EQUALS_RE.captures(text).and_then(|caps| {
        let path = ctx.resolve_field(&caps)?;
        Some(FilterExpr::Equals {
            path,
            value: literal(&caps),
        })
    }))
}

fn match_comparison(
    text: &str,
    ctx: &PredicateContext<'_>,
) -> Result<Option<FilterExpr>, TranslateError> {
    Ok(COMPARE_RE.captures(text).and_then(|caps| {
        let path = ctx.resolve_field(&caps)?;
        let op = CompareOp::from_symbol(&caps["op"])?;
        let value = caps["num"].parse::<f64>().ok()?;
        Some(FilterExpr::Compare { path, op, value })
    }))
}

fn match_text(
    text: &str,
    ctx: &PredicateContext<'_>,
) -> Result<Option<FilterExpr>, TranslateError> {
    let Some(caps) = TEXT_RE.captures(text) else {
        return Ok(None);
    };
    if !ctx.accepts_variable(&caps) {
        return Ok(None);
    }

    // `text()` addresses the element itself, so the field may be absent
    let field = caps
        .name("field")
        .and_then(|m| FieldPath::from_slashed(m.as_str()))
        .unwrap_or_default();
    let path = ctx.prefix.join(&field);
    if path.is_empty() {
        return Err(TranslateError::MissingContextPath(text.trim().to_string()));
    }

    Ok(Some(FilterExpr::TextEquals {
        path,
        value: literal(&caps),
    }))
}

fn match_contains(
    text: &str,
    ctx: &PredicateContext<'_>,
) -> Result<Option<FilterExpr>, TranslateError> {
    Ok(CONTAINS_RE.captures(text).and_then(|caps| {
        let path = ctx.resolve_field(&caps)?;
        Some(FilterExpr::MatchesSubstring {
            path,
            pattern: literal(&caps),
        })
    }))
}

fn match_exists(
    text: &str,
    ctx: &PredicateContext<'_>,
) -> Result<Option<FilterExpr>, TranslateError> {
    Ok(EXISTS_RE.captures(text).and_then(|caps| {
        let path = ctx.resolve_field(&caps)?;
        Some(FilterExpr::Exists { path })
    }))
}
