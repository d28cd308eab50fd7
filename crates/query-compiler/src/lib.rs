//! # Tradeflow Query Compiler
//!
//! This crate turns a validated analytics request into one well-formed
//! aggregate query over the trade-execution table. It is the core of the
//! system: all the branching lives here, the rest of the workspace is
//! plumbing around it.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate with no knowledge of external
//!   systems. It depends only on `core-types` (Layer 0).
//! - **Structured Before Textual:** `compile` produces a `CompiledQuery`, a
//!   data representation of the query (source relation, optional ranking
//!   sub-view, aggregate expression, grouping, predicates). Only `render`
//!   turns it into text, with `$n` placeholders and an ordered parameter
//!   list. Request values never appear inside the query text itself.
//! - **Total Over Valid Input:** `compile` cannot fail for a request that
//!   passed validation. `render` fails only on an internal invariant
//!   violation, which indicates a defect rather than bad user input.
//!
//! ## Public API
//!
//! - `QueryConfig`: carries the base relation name (configuration, not a
//!   hard-coded constant).
//! - `compile`: `&AnalyticsRequest -> CompiledQuery`.
//! - `render`: `&CompiledQuery -> RenderedQuery` (query text + parameters).
//! - `CompilerError`: the defect-class errors `render` can return.

// Declare the modules that constitute this crate.
pub mod compile;
pub mod error;
pub mod predicate;
pub mod render;

// Re-export the key components to create a clean, public-facing API.
pub use compile::{compile, AggregateExpr, CompiledQuery, Grouping, QueryConfig, RankingView, Source};
pub use error::CompilerError;
pub use predicate::{CmpOp, Predicate, ScalarValue};
pub use render::{render, RenderedQuery};
