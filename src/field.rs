use serde::{Deserialize, Serialize};

/// Column reference used in a projection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Selects the column under its own name.
    #[serde(rename = "field")]
    Plain {
        /// Column name.
        name: String,
    },
    /// Selects `name` and exposes it as `alias`.
    #[serde(rename = "renamingField")]
    Renamed {
        /// Source column name.
        name: String,
        /// Name the column is exposed under.
        #[serde(rename = "to")]
        alias: String,
    },
}

impl Field {
    /// Selects a column unchanged.
    #[must_use]
    pub fn plain(name: impl Into<String>) -> Self {
        Field::Plain { name: name.into() }
    }

    /// Selects a column and renames it on output.
    #[must_use]
    pub fn renamed(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Field::Renamed {
            name: name.into(),
            alias: alias.into(),
        }
    }

    /// Name of the source column.
    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            Field::Plain { name } | Field::Renamed { name, .. } => name,
        }
    }

    /// Name under which the column appears in the result.
    #[must_use]
    pub fn output_name(&self) -> &str {
        match self {
            Field::Plain { name } => name,
            Field::Renamed { alias, .. } => alias,
        }
    }
}

/// Direction of a single sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "DirectionRepr", into = "DirectionRepr")]
pub enum OrderDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl OrderDirection {
    /// Sign applied to an ascending comparison.
    #[must_use]
    pub fn factor(self) -> i32 {
        match self {
            OrderDirection::Ascending => 1,
            OrderDirection::Descending => -1,
        }
    }
}

// Directions travel as `{"descending":{}}` in the JSON interchange form.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum DirectionRepr {
    Ascending {},
    Descending {},
}

impl From<DirectionRepr> for OrderDirection {
    fn from(value: DirectionRepr) -> Self {
        match value {
            DirectionRepr::Ascending {} => OrderDirection::Ascending,
            DirectionRepr::Descending {} => OrderDirection::Descending,
        }
    }
}

impl From<OrderDirection> for DirectionRepr {
    fn from(value: OrderDirection) -> Self {
        match value {
            OrderDirection::Ascending => DirectionRepr::Ascending {},
            OrderDirection::Descending => DirectionRepr::Descending {},
        }
    }
}

/// One column of a multi-key sort.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKey {
    /// Sorts ascending by the named column.
    #[serde(rename = "field")]
    ByField {
        /// Column name.
        name: String,
    },
    /// Sorts by the named column in an explicit direction.
    #[serde(rename = "fieldWithDirection")]
    ByFieldDirection {
        /// Column name.
        name: String,
        /// Sort direction.
        direction: OrderDirection,
    },
}

impl OrderKey {
    /// Ascending key with an implicit direction.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        OrderKey::ByField { name: name.into() }
    }

    /// Key with an explicit direction.
    #[must_use]
    pub fn with_direction(name: impl Into<String>, direction: OrderDirection) -> Self {
        OrderKey::ByFieldDirection {
            name: name.into(),
            direction,
        }
    }

    /// Column this key sorts by.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            OrderKey::ByField { name } | OrderKey::ByFieldDirection { name, .. } => name,
        }
    }

    /// Effective direction, ascending unless stated.
    #[must_use]
    pub fn direction(&self) -> OrderDirection {
        match self {
            OrderKey::ByField { .. } => OrderDirection::Ascending,
            OrderKey::ByFieldDirection { direction, .. } => *direction,
        }
    }
}
