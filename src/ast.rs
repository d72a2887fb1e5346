//! # Query Intermediate Representation
//!
//! This module defines the typed intermediate representation (IR) produced by
//! translating an XQuery-subset expression and consumed by the command
//! renderer.
//!
//! ## Architecture Overview
//!
//! - **[field_path]** - Dot-joined field paths built from slash-separated steps
//! - **[filter]** - Boolean filter trees (equality, comparison, substring, existence)
//! - **[projection]** - Which fields (or renamed fields) a query returns
//! - **[query]** - The complete translation result
//!
//! ## Example
//!
//! ```text
//! for $b in collection("books") where $b/price > 10 return $b/title
//! ```
//!
//! becomes
//!
//! ```text
//! QueryIr {
//!     collection: "books",
//!     operation: Find,
//!     filter: Some(Compare(price, >, 10.0)),
//!     projection: Inclusion([title]),
//! }
//! ```
//!
//! The IR never carries target syntax: operator names such as `$gt` or
//! `$project` are produced only by [`crate::render`].
pub mod field_path;
pub mod filter;
pub mod projection;
pub mod query;

pub use field_path::FieldPath;
pub use filter::{CompareOp, FilterExpr};
pub use projection::Projection;
pub use query::{Operation, QueryIr};
