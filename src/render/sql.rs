use std::convert::Infallible;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    condition::{substitute_wildcard, Condition, ConditionVisitor},
    field::{Field, OrderDirection, OrderKey},
    query::Query,
};

static BARE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Types with a SQL rendering.
pub trait ToSql {
    /// Renders `self` as SQL text.
    fn sql(&self) -> String;
}

/// Quotes an identifier unless it is a bare name.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if BARE_IDENTIFIER.is_match(name) {
        name.to_owned()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Quotes a string literal, doubling embedded single quotes.
#[must_use]
pub fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

impl ToSql for Field {
    fn sql(&self) -> String {
        match self {
            Field::Plain { name } => quote_identifier(name),
            Field::Renamed { name, alias } => {
                format!("{} AS {}", quote_identifier(name), quote_identifier(alias))
            }
        }
    }
}

impl ToSql for OrderDirection {
    fn sql(&self) -> String {
        match self {
            OrderDirection::Ascending => "ASC",
            OrderDirection::Descending => "DESC",
        }
        .to_owned()
    }
}

impl ToSql for OrderKey {
    fn sql(&self) -> String {
        match self {
            OrderKey::ByField { name } => quote_identifier(name),
            OrderKey::ByFieldDirection { name, direction } => {
                format!("{} {}", quote_identifier(name), direction.sql())
            }
        }
    }
}

impl ToSql for Condition {
    fn sql(&self) -> String {
        match self.accept(&mut SqlVisitor) {
            Ok(text) => text,
            Err(never) => match never {},
        }
    }
}

impl ToSql for Query {
    fn sql(&self) -> String {
        let projection = match &self.fields {
            Some(fields) => join(fields, ","),
            None => "*".to_owned(),
        };
        let mut statement = format!("SELECT {projection} FROM {}", quote_identifier(&self.table));
        if let Some(condition) = &self.condition {
            statement.push_str(" WHERE ");
            statement.push_str(&condition.sql());
        }
        if let Some(order) = &self.order {
            statement.push_str(" ORDER BY ");
            statement.push_str(&join(order, ","));
        }
        statement
    }
}

fn join<T: ToSql>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToSql::sql)
        .collect::<Vec<_>>()
        .join(separator)
}

struct SqlVisitor;

impl SqlVisitor {
    fn group(children: Vec<String>, separator: &str, empty: &str) -> String {
        if children.is_empty() {
            // Empty groups keep their truth value; `()` is not valid SQL.
            format!("({empty})")
        } else {
            format!("({})", children.join(separator))
        }
    }
}

impl ConditionVisitor for SqlVisitor {
    type Error = Infallible;
    type Value = String;

    fn visit_leaf(&mut self, leaf: &Condition) -> Result<String, Infallible> {
        let text = match leaf {
            Condition::EqualText { field, value } => {
                format!("{}={}", quote_identifier(field), quote_text(value))
            }
            Condition::EqualInteger { field, value } => {
                format!("{}={value}", quote_identifier(field))
            }
            Condition::SmallerInteger { field, than } => {
                format!("{}<{than}", quote_identifier(field))
            }
            Condition::SmallerOrEqualInteger { field, than } => {
                format!("{}<={than}", quote_identifier(field))
            }
            Condition::GreaterInteger { field, than } => {
                format!("{}>{than}", quote_identifier(field))
            }
            Condition::GreaterOrEqualInteger { field, than } => {
                format!("{}>={than}", quote_identifier(field))
            }
            Condition::EqualBoolean { field, value } => {
                format!("{}={value}", quote_identifier(field))
            }
            Condition::SimilarText {
                field,
                template,
                wildcard,
            } => format!(
                "{} LIKE {}",
                quote_identifier(field),
                quote_text(&substitute_wildcard(template, wildcard, "%"))
            ),
            Condition::Not { .. } | Condition::And { .. } | Condition::Or { .. } => {
                // Logical nodes are dispatched to the combine methods.
                return self.visit_condition(leaf);
            }
        };
        Ok(text)
    }

    fn combine_not(&mut self, _original: &Condition, child: String) -> Result<String, Infallible> {
        Ok(format!("NOT {child}"))
    }

    fn combine_and(
        &mut self,
        _original: &Condition,
        children: Vec<String>,
    ) -> Result<String, Infallible> {
        Ok(Self::group(children, " AND ", "1=1"))
    }

    fn combine_or(
        &mut self,
        _original: &Condition,
        children: Vec<String>,
    ) -> Result<String, Infallible> {
        Ok(Self::group(children, " OR ", "1=0"))
    }
}
