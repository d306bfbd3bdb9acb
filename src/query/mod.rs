//! Backend-agnostic description of a single query.

use serde::{Deserialize, Serialize};

use crate::{condition::Condition, field::Field, field::OrderKey};

/// Table, projection, filter and sort order of one query.
///
/// Absent parts keep their neutral meaning: no projection selects every
/// declared column, no condition matches every row and no order keeps the
/// source order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    /// Table the query reads from.
    pub table: String,
    /// Projected columns in output order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    /// Root filter condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Sort keys, most significant first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<OrderKey>>,
}

impl Query {
    /// Selects every column of `table` without filter or order.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Query {
            table: table.into(),
            fields: None,
            condition: None,
            order: None,
        }
    }

    /// Sets the projection.
    #[must_use]
    pub fn fields(self, fields: Vec<Field>) -> Self {
        Query {
            fields: Some(fields),
            ..self
        }
    }

    /// Sets the root filter.
    #[must_use]
    pub fn condition(self, condition: Condition) -> Self {
        Query {
            condition: Some(condition),
            ..self
        }
    }

    /// Sets the sort keys.
    #[must_use]
    pub fn order_by(self, order: Vec<OrderKey>) -> Self {
        Query {
            order: Some(order),
            ..self
        }
    }

    /// Serializes the query to its JSON interchange form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a query from its JSON interchange form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_fill_optional_parts() {
        let query = Query::new("person")
            .fields(vec![Field::plain("name")])
            .condition(Condition::equal_integer("age", 3))
            .order_by(vec![OrderKey::field("name")]);
        assert_eq!(query.table, "person");
        assert_eq!(query.fields, Some(vec![Field::plain("name")]));
        assert_eq!(query.condition, Some(Condition::equal_integer("age", 3)));
        assert_eq!(query.order, Some(vec![OrderKey::field("name")]));
    }

    #[test]
    fn json_omits_absent_parts() {
        let json = Query::new("person").to_json().unwrap();
        assert_eq!(json, r#"{"table":"person"}"#);
        assert_eq!(Query::from_json(&json).unwrap(), Query::new("person"));
    }
}
