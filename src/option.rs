/// How sort keys compare stored values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortComparison {
    /// Text, integer and boolean values each order against values of the
    /// same kind.
    #[default]
    AllKinds,
    /// Only text values decide; keys over other kinds never reorder rows.
    TextOnly,
}

/// Options for [`Query::execute_with`](crate::Query::execute_with).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub(crate) sort_comparison: SortComparison,
}

impl ExecuteOptions {
    /// Sets how sort keys compare values.
    #[must_use]
    pub fn sort_comparison(mut self, sort_comparison: SortComparison) -> Self {
        self.sort_comparison = sort_comparison;
        self
    }
}

/// Options for building tables from loosely typed rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub(crate) integer_booleans: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            integer_booleans: true,
        }
    }
}

impl LoadOptions {
    /// Whether integers in `Boolean` columns load as `n != 0`.
    ///
    /// When disabled such integers load as `Integer` values.
    #[must_use]
    pub fn integer_booleans(mut self, integer_booleans: bool) -> Self {
        self.integer_booleans = integer_booleans;
        self
    }
}
