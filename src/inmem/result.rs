use std::{collections::HashMap, fmt};

use super::Row;

/// Rows produced by executing a query, restricted to the output columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    fields: Vec<String>,
    rows: Vec<Row>,
    widths: HashMap<String, usize>,
}

impl ResultSet {
    /// Builds a result set and measures its display widths.
    #[must_use]
    pub fn new(fields: Vec<String>, rows: Vec<Row>) -> Self {
        let mut widths = HashMap::with_capacity(fields.len());
        for field in &fields {
            let width = rows
                .iter()
                .filter_map(|row| row.get(field))
                .map(|value| value.to_string().chars().count())
                .fold(field.chars().count(), usize::max);
            widths.insert(field.clone(), width);
        }
        Self {
            fields,
            rows,
            widths,
        }
    }

    /// Result of a query against a table that does not exist.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Output column names in output order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Result rows in result order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no row matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display width of a column: the longest of its header and cells.
    #[must_use]
    pub fn column_width(&self, field: &str) -> usize {
        self.widths.get(field).copied().unwrap_or(0)
    }

    /// Consumes the result set and returns its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    fn line<'a, I>(&self, cells: I) -> String
    where
        I: Iterator<Item = (&'a String, String)>,
    {
        cells
            .map(|(field, cell)| {
                let width = self.column_width(field);
                format!("{cell:<width$}")
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.line(self.fields.iter().map(|field| (field, field.clone())));
        let separator = self
            .fields
            .iter()
            .map(|field| "-".repeat(self.column_width(field)))
            .collect::<Vec<_>>()
            .join("-|-");
        write!(f, "{header}\n{separator}")?;
        for row in &self.rows {
            let cells = self.fields.iter().map(|field| {
                let cell = row.get(field).map(ToString::to_string).unwrap_or_default();
                (field, cell)
            });
            write!(f, "\n{}", self.line(cells))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn row(cells: &[(&str, Value)]) -> Row {
        cells
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.clone()))
            .collect()
    }

    #[test]
    fn widths_cover_header_and_cells() {
        let result = ResultSet::new(
            vec!["name".into(), "age".into()],
            vec![
                row(&[("name", Value::from("Schneider")), ("age", Value::Integer(7))]),
                row(&[("name", Value::from("Li"))]),
            ],
        );
        assert_eq!(result.column_width("name"), 9);
        assert_eq!(result.column_width("age"), 3);
        assert_eq!(result.column_width("missing"), 0);
    }

    #[test]
    fn renders_padded_table() {
        let result = ResultSet::new(
            vec!["name".into(), "member".into()],
            vec![
                row(&[("name", Value::from("Schneider")), ("member", Value::from(true))]),
                row(&[("name", Value::from("Müller"))]),
            ],
        );
        assert_eq!(
            result.to_string(),
            "name      | member\n\
             ----------|-------\n\
             Schneider | true  \n\
             Müller    |       "
        );
    }

    #[test]
    fn empty_result_set() {
        let result = ResultSet::empty();
        assert!(result.is_empty());
        assert!(result.fields().is_empty());
        assert_eq!(result.to_string(), "\n");
    }
}
