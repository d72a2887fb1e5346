//! Path and predicate expression translation.
//!
//! Handles expressions without a FLWOR wrapper:
//!
//! ```text
//! collection("books")                         whole collection
//! collection("books")/*                       whole collection
//! db.collection("users")/name                 projection
//! collection("books")/book[price > 10]/title  filter under `book`, projection `book.title`
//! db.collection("items")[price > 5]           filter only
//! ```

use crate::{
    ast::{FieldPath, Projection},
    clauses::{extract_path, split_predicate},
    compose::QueryParts,
    error::TranslateError,
    predicate::{PredicateContext, parse_condition},
};

/// Translate a `collection(...)/path[predicate]/path` expression.
pub fn translate_path(input: &str) -> Result<QueryParts, TranslateError> {
    let clauses = extract_path(input)?;
    let path = clauses.path_text.as_str();

    if !path.contains('[') {
        return Ok(QueryParts {
            collection: clauses.collection,
            filter: None,
            projection: Projection::inclusion(single_steps(path)),
        });
    }

    let split = split_predicate(path)
        .ok_or_else(|| TranslateError::UnsupportedPredicate(path.to_string()))?;
    let element = FieldPath::from_slashed(&split.element).unwrap_or_default();

    let ctx = PredicateContext::with_prefix(element.clone());
    let filter = parse_condition(&split.predicate, &ctx).map_err(into_predicate_error)?;

    let projection = Projection::inclusion(
        single_steps(&split.remaining).map(|step| element.join(&step)),
    );

    Ok(QueryParts {
        collection: clauses.collection,
        filter: Some(filter),
        projection,
    })
}

/// Translate a bracketed `collection(...)[predicate]` expression.
pub fn translate_predicate(input: &str) -> Result<QueryParts, TranslateError> {
    let clauses = extract_path(input)?;
    if split_predicate(&clauses.path_text).is_none() {
        return Err(TranslateError::UnsupportedPredicate(clauses.path_text));
    }
    translate_path(input)
}

/// Each step that survives normalization as its own one-segment path.
fn single_steps(path: &str) -> impl Iterator<Item = FieldPath> + '_ {
    path.split('/')
        .filter_map(FieldPath::from_slashed)
}

fn into_predicate_error(err: TranslateError) -> TranslateError {
    match err {
        TranslateError::UnsupportedCondition(text) => TranslateError::UnsupportedPredicate(text),
        other => other,
    }
}
