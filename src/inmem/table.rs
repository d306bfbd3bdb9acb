use serde_json::{Map as JsonMap, Value as JsonValue};

use super::{Row, TableError};
use crate::{observability::log_warn, option::LoadOptions, value::DataType, value::Value};

/// Declared column of a table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDefinition {
    /// Column name.
    pub name: String,
    /// Declared kind.
    pub data_type: DataType,
}

impl FieldDefinition {
    /// Declares a column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl<N: Into<String>> From<(N, DataType)> for FieldDefinition {
    fn from((name, data_type): (N, DataType)) -> Self {
        FieldDefinition::new(name, data_type)
    }
}

/// Declared columns plus rows of one in-memory table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    definitions: Vec<FieldDefinition>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table without rows.
    pub fn new<I>(definitions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldDefinition>,
    {
        Self::with_rows(definitions, Vec::new())
    }

    /// Creates a table from already typed rows.
    pub fn with_rows<I>(definitions: I, rows: Vec<Row>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldDefinition>,
    {
        Self {
            definitions: definitions.into_iter().map(Into::into).collect(),
            rows,
        }
    }

    /// Creates a table from JSON objects using the default [`LoadOptions`].
    pub fn from_values<I>(
        definitions: I,
        rows: Vec<JsonMap<String, JsonValue>>,
    ) -> Result<Self, TableError>
    where
        I: IntoIterator,
        I::Item: Into<FieldDefinition>,
    {
        let mut table = Self::new(definitions);
        let options = LoadOptions::default();
        for row in rows {
            let row = table.convert_row(row, &options)?;
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Creates a table from a parsed JSON array of objects.
    pub fn from_json_value<I>(definitions: I, json: JsonValue) -> Result<Self, TableError>
    where
        I: IntoIterator,
        I::Item: Into<FieldDefinition>,
    {
        Self::load(definitions, json, &LoadOptions::default())
    }

    /// Creates a table from JSON text holding an array of objects.
    pub fn from_json_str<I>(definitions: I, text: &str) -> Result<Self, TableError>
    where
        I: IntoIterator,
        I::Item: Into<FieldDefinition>,
    {
        let json: JsonValue = serde_json::from_str(text)?;
        Self::from_json_value(definitions, json)
    }

    /// Creates a table from a parsed JSON array of objects with explicit options.
    ///
    /// # Errors
    ///
    /// [`TableError::MalformedShape`] if `json` is not an array of objects and
    /// [`TableError::MalformedValue`] for cells that are neither strings,
    /// integers nor booleans.
    pub fn load<I>(
        definitions: I,
        json: JsonValue,
        options: &LoadOptions,
    ) -> Result<Self, TableError>
    where
        I: IntoIterator,
        I::Item: Into<FieldDefinition>,
    {
        let items = match json {
            JsonValue::Array(items) => items,
            other => {
                return Err(TableError::MalformedShape(format!(
                    "expected an array of objects, got {}",
                    json_kind(&other)
                )))
            }
        };
        let mut table = Self::new(definitions);
        for (index, item) in items.into_iter().enumerate() {
            let object = match item {
                JsonValue::Object(object) => object,
                other => {
                    return Err(TableError::MalformedShape(format!(
                        "row {index} is {}, expected an object",
                        json_kind(&other)
                    )))
                }
            };
            let row = table.convert_row(object, options)?;
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Declared columns in declaration order.
    #[must_use]
    pub fn definitions(&self) -> &[FieldDefinition] {
        &self.definitions
    }

    /// Stored rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Appends an already typed row.
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Declared kind of `name`, if the column is declared.
    #[must_use]
    pub fn data_type(&self, name: &str) -> Option<DataType> {
        self.definitions
            .iter()
            .find(|definition| definition.name == name)
            .map(|definition| definition.data_type)
    }

    fn convert_row(
        &self,
        object: JsonMap<String, JsonValue>,
        options: &LoadOptions,
    ) -> Result<Row, TableError> {
        let mut row = Row::with_capacity(object.len());
        for (column, value) in object {
            let value = self.convert_value(&column, value, options)?;
            row.insert(column, value);
        }
        Ok(row)
    }

    fn convert_value(
        &self,
        column: &str,
        value: JsonValue,
        options: &LoadOptions,
    ) -> Result<Value, TableError> {
        match value {
            JsonValue::String(text) => Ok(Value::Text(text)),
            JsonValue::Bool(flag) => Ok(Value::Boolean(flag)),
            JsonValue::Number(number) => match number.as_i64() {
                Some(integer)
                    if options.integer_booleans
                        && self.data_type(column) == Some(DataType::Boolean) =>
                {
                    Ok(Value::Boolean(integer != 0))
                }
                Some(integer) => Ok(Value::Integer(integer)),
                None => Err(malformed(column, JsonValue::Number(number))),
            },
            other => Err(malformed(column, other)),
        }
    }
}

fn malformed(column: &str, value: JsonValue) -> TableError {
    log_warn!(
        component = "loader",
        event = "value_rejected",
        column = %column,
        value = %value,
    );
    TableError::MalformedValue {
        column: column.to_owned(),
        value,
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
