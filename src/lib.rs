#![deny(missing_docs)]
//! Backend-agnostic relational query descriptions.
//!
//! A [`Query`] names a table, an optional projection, an optional
//! [`Condition`] tree and an optional sort order. The same description can
//! be rendered as SQL ([`ToSql`]), as a PostgREST request path
//! ([`ToPostgrest`]), or evaluated directly against an in-memory
//! [`Database`].
//!
//! ```
//! use relational_query::{one, Condition, Field, OrderKey, Query, ToSql};
//!
//! let query = Query::new("person")
//!     .fields(vec![Field::renamed("name", "surname"), Field::plain("prename")])
//!     .condition(one([
//!         Condition::equal_text("prename", "Bert"),
//!         Condition::similar_text("prename", "C*", "*"),
//!     ]))
//!     .order_by(vec![OrderKey::field("name")]);
//!
//! assert_eq!(
//!     query.sql(),
//!     "SELECT name AS surname,prename FROM person \
//!      WHERE (prename='Bert' OR prename LIKE 'C%') ORDER BY name"
//! );
//! ```

/// Recursive boolean filter tree, its visitor and the fluent builder.
pub mod condition;
/// Projection fields and sort keys.
pub mod field;
/// In-memory tables and the query evaluator.
pub mod inmem;
mod observability;
/// Execution and loading options.
pub mod option;
/// Query description.
pub mod query;
/// SQL and PostgREST renderers.
pub mod render;
/// Stored cell values and column kinds.
pub mod value;

pub use crate::{
    condition::{all, not_all, not_one, one, Condition, ConditionBuilder, ConditionVisitor},
    field::{Field, OrderDirection, OrderKey},
    inmem::{Database, FieldDefinition, ResultSet, Row, Table, TableError},
    option::{ExecuteOptions, LoadOptions, SortComparison},
    query::Query,
    render::{encode_component, quote_identifier, quote_text, ToPostgrest, ToSql},
    value::{DataType, Value},
};
