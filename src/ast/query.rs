use serde::Serialize;

use crate::ast::{FilterExpr, Projection};

/// Command form the renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Operation {
    /// `db.<collection>.find(...)`
    #[default]
    Find,
    /// `db.<collection>.aggregate([...])`
    Aggregate,
}

/// Complete translation result.
///
/// Built once per translation call and consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryIr {
    /// Target collection, copied verbatim from the `collection(...)` call
    pub collection: String,

    pub operation: Operation,

    /// Document filter (`None` selects every document)
    pub filter: Option<FilterExpr>,

    pub projection: Projection,
}
