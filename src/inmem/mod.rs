//! In-memory row store used to evaluate queries without a database.
//!
//! - `table` holds declared columns plus rows and builds tables from JSON.
//! - `execute` filters, sorts and projects rows for a [`Query`](crate::Query).
//! - `result` contains the result set and its tabular display form.

mod error;
mod execute;
mod result;
mod table;

use std::collections::HashMap;

pub use error::TableError;
pub use result::ResultSet;
pub use table::{FieldDefinition, Table};

use crate::value::Value;

/// One row: column name to stored value. Keys need not cover every declared column.
pub type Row = HashMap<String, Value>;

/// Named tables available to the evaluator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Database {
    tables: HashMap<String, Table>,
}

impl Database {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table and returns the database.
    #[must_use]
    pub fn with_table(mut self, name: impl Into<String>, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    /// Adds or replaces a table, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) -> Option<Table> {
        self.tables.insert(name.into(), table)
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Iterates table names in no particular order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl<N> FromIterator<(N, Table)> for Database
where
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, Table)>>(iter: I) -> Self {
        Database {
            tables: iter
                .into_iter()
                .map(|(name, table)| (name.into(), table))
                .collect(),
        }
    }
}
