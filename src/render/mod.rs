//! Textual renderings of a [`Query`](crate::Query) for concrete backends.
//!
//! Renderers are pure and total: every structurally valid query renders, and
//! rendering the same value twice yields identical text.

mod postgrest;
mod sql;

pub use postgrest::{encode_component, ToPostgrest};
pub use sql::{quote_identifier, quote_text, ToSql};
