//! SQL generation module.
//!
//! A small type-safe SQL builder for the legacy BigQuery queries the funnel
//! compiler emits:
//!
//! - [`query`] - SELECT query builder (subqueries, joins, grouping, ordering)
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types and compact/pretty serialization

pub mod expr;
pub mod query;
pub mod token;

// Re-export commonly used types at the sql module level
pub use expr::{
    col, count, func, lit_int, max, min, raw_sql, sum, table_col, BinaryOperator, Expr, ExprExt,
};
pub use query::{Join, OrderByExpr, Query, SelectExpr, TableRef, TableSource};
pub use token::{Layout, Token, TokenStream};
