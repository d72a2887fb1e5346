//! Query composition.

use crate::ast::{FilterExpr, Operation, Projection, QueryIr};

/// Output of a translator, before the operation kind is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParts {
    pub collection: String,
    pub filter: Option<FilterExpr>,
    pub projection: Projection,
}

/// Assemble the final IR. Fields are copied through without further checks.
pub fn compose(parts: QueryParts, operation: Operation) -> QueryIr {
    QueryIr {
        collection: parts.collection,
        operation,
        filter: parts.filter,
        projection: parts.projection,
    }
}
