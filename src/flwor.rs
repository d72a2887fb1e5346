//! FLWOR expression translation.
//!
//! ```text
//! for $p in collection("products")
//! where $p/tag = "sale" and $p/stock > 0
//! return $p/name
//! ```
//!
//! The `for` clause names the collection, the `where` clause becomes the
//! filter and the `return` clause becomes the projection.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::{
    ast::{FieldPath, FilterExpr, Projection},
    clauses::{Conditions, extract_flwor, split_conditions},
    compose::QueryParts,
    error::TranslateError,
    predicate::{PredicateContext, parse_condition},
};

/// `$var/path`, optionally ending in a function step such as `text()`
static VAR_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$(?P<var>[A-Za-z_][\w\-]*)/(?P<path>@?[A-Za-z_][\w\-]*(?:/@?[A-Za-z_][\w\-]*)*)(?P<call>\s*\(\s*\))?",
    )
    .unwrap()
});

/// `"name": $var/path` pair inside an object constructor
static RENAME_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[A-Za-z_][\w\-]*))\s*:\s*\$(?P<var>[A-Za-z_][\w\-]*)/(?P<path>@?[A-Za-z_][\w\-]*(?:/@?[A-Za-z_][\w\-]*)*)(?P<call>\s*\(\s*\))?"#,
    )
    .unwrap()
});

/// Translate a FLWOR expression into query parts.
pub fn translate_flwor(input: &str) -> Result<QueryParts, TranslateError> {
    let clauses = extract_flwor(input)?;
    debug!(
        var = %clauses.bound_var,
        collection = %clauses.collection,
        "extracted for clause"
    );

    if clauses.has_order_by {
        warn!("order by clause is not translated and will be ignored");
    }

    let ctx = PredicateContext::for_variable(&clauses.bound_var);
    let filter = match clauses.filter_text.as_deref() {
        Some(text) => Some(parse_where(text, &ctx)?),
        None => None,
    };

    let projection = match clauses.return_text.as_deref() {
        Some(text) => parse_return(text, &clauses.bound_var),
        None => Projection::None,
    };

    Ok(QueryParts {
        collection: clauses.collection,
        filter,
        projection,
    })
}

/// Parse a where clause into a single condition, an `And` or an `Or`.
fn parse_where(text: &str, ctx: &PredicateContext<'_>) -> Result<FilterExpr, TranslateError> {
    match split_conditions(text) {
        Conditions::Single(condition) => parse_condition(&condition, ctx),
        Conditions::All(parts) => Ok(FilterExpr::And(parse_each(&parts, ctx)?)),
        Conditions::Any(parts) => Ok(FilterExpr::Or(parse_each(&parts, ctx)?)),
    }
}

fn parse_each(
    parts: &[String],
    ctx: &PredicateContext<'_>,
) -> Result<Vec<FilterExpr>, TranslateError> {
    parts.iter().map(|part| parse_condition(part, ctx)).collect()
}

/// Parse a return clause into a projection.
///
/// An object constructor with `"name": $var/path` pairs produces a rename,
/// which takes precedence over plain `$var/path` references.
fn parse_return(text: &str, bound_var: &str) -> Projection {
    if text.trim() == format!("${bound_var}") {
        return Projection::None;
    }

    let mut projection = Projection::inclusion(
        VAR_REF_RE
            .captures_iter(text)
            .filter_map(|caps| referenced_path(&caps, bound_var)),
    );

    if text.contains('{') && text.contains('}') {
        let rename = Projection::rename(RENAME_PAIR_RE.captures_iter(text).filter_map(|caps| {
            let name = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("bare"))?
                .as_str()
                .to_string();
            Some((name, referenced_path(&caps, bound_var)?))
        }));
        if !rename.is_none() {
            projection = rename;
        }
    }

    if projection.is_none() {
        debug!(clause = text, "return clause projects the whole document");
    }
    projection
}

/// Field path of a `$var/path` capture.
fn referenced_path(caps: &Captures<'_>, bound_var: &str) -> Option<FieldPath> {
    if &caps["var"] != bound_var {
        return None;
    }

    match caps.name("call") {
        Some(call) => FieldPath::from_slashed(&format!("{}{}", &caps["path"], call.as_str())),
        None => FieldPath::from_slashed(&caps["path"]),
    }
}
