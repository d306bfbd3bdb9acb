//! Recursive boolean filter tree over column comparisons.

mod builder;
mod visitor;

pub use builder::{all, not_all, not_one, one, ConditionBuilder};
use serde::{Deserialize, Serialize};
pub use visitor::ConditionVisitor;

/// A node of the boolean filter tree.
///
/// Children are owned exclusively by their parent; trees are built by
/// wrapping existing nodes and are never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Text column equals the value.
    EqualText {
        /// Column name.
        field: String,
        /// Expected text.
        value: String,
    },
    /// Integer column equals the value.
    EqualInteger {
        /// Column name.
        field: String,
        /// Expected integer.
        value: i64,
    },
    /// Integer column is strictly smaller than the bound.
    SmallerInteger {
        /// Column name.
        field: String,
        /// Exclusive upper bound.
        than: i64,
    },
    /// Integer column is smaller than or equal to the bound.
    SmallerOrEqualInteger {
        /// Column name.
        field: String,
        /// Inclusive upper bound.
        than: i64,
    },
    /// Integer column is strictly greater than the bound.
    GreaterInteger {
        /// Column name.
        field: String,
        /// Exclusive lower bound.
        than: i64,
    },
    /// Integer column is greater than or equal to the bound.
    GreaterOrEqualInteger {
        /// Column name.
        field: String,
        /// Inclusive lower bound.
        than: i64,
    },
    /// Boolean column equals the value.
    EqualBoolean {
        /// Column name.
        field: String,
        /// Expected flag.
        value: bool,
    },
    /// Text column matches a template in which `wildcard` stands for any run
    /// of characters. The match covers the whole text.
    SimilarText {
        /// Column name.
        field: String,
        /// Template text.
        template: String,
        /// Placeholder for zero or more characters.
        wildcard: String,
    },
    /// Logical negation.
    Not {
        /// Negated condition.
        condition: Box<Condition>,
    },
    /// Conjunction, vacuously true when empty.
    And {
        /// Clauses that all have to hold.
        conditions: Vec<Condition>,
    },
    /// Disjunction, false when empty.
    Or {
        /// Clauses of which one has to hold.
        conditions: Vec<Condition>,
    },
}

impl Condition {
    /// `field = value` on a text column.
    #[must_use]
    pub fn equal_text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::EqualText {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field = value` on an integer column.
    #[must_use]
    pub fn equal_integer(field: impl Into<String>, value: i64) -> Self {
        Condition::EqualInteger {
            field: field.into(),
            value,
        }
    }

    /// `field < than`.
    #[must_use]
    pub fn smaller_integer(field: impl Into<String>, than: i64) -> Self {
        Condition::SmallerInteger {
            field: field.into(),
            than,
        }
    }

    /// `field <= than`.
    #[must_use]
    pub fn smaller_or_equal_integer(field: impl Into<String>, than: i64) -> Self {
        Condition::SmallerOrEqualInteger {
            field: field.into(),
            than,
        }
    }

    /// `field > than`.
    #[must_use]
    pub fn greater_integer(field: impl Into<String>, than: i64) -> Self {
        Condition::GreaterInteger {
            field: field.into(),
            than,
        }
    }

    /// `field >= than`.
    #[must_use]
    pub fn greater_or_equal_integer(field: impl Into<String>, than: i64) -> Self {
        Condition::GreaterOrEqualInteger {
            field: field.into(),
            than,
        }
    }

    /// `field = value` on a boolean column.
    #[must_use]
    pub fn equal_boolean(field: impl Into<String>, value: bool) -> Self {
        Condition::EqualBoolean {
            field: field.into(),
            value,
        }
    }

    /// Template match where `wildcard` stands for any run of characters.
    #[must_use]
    pub fn similar_text(
        field: impl Into<String>,
        template: impl Into<String>,
        wildcard: impl Into<String>,
    ) -> Self {
        Condition::SimilarText {
            field: field.into(),
            template: template.into(),
            wildcard: wildcard.into(),
        }
    }

    /// Template match when `template` contains `wildcard`, plain text equality otherwise.
    #[must_use]
    pub fn potential_template(
        field: impl Into<String>,
        template: impl Into<String>,
        wildcard: impl Into<String>,
    ) -> Self {
        let template = template.into();
        let wildcard = wildcard.into();
        if !wildcard.is_empty() && template.contains(wildcard.as_str()) {
            Condition::SimilarText {
                field: field.into(),
                template,
                wildcard,
            }
        } else {
            Condition::EqualText {
                field: field.into(),
                value: template,
            }
        }
    }

    /// Negates `condition`.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(condition: Condition) -> Self {
        Condition::Not {
            condition: Box::new(condition),
        }
    }

    /// Conjunction of `conditions`, kept as given.
    #[must_use]
    pub fn and(conditions: Vec<Condition>) -> Self {
        Condition::And { conditions }
    }

    /// Disjunction of `conditions`, kept as given.
    #[must_use]
    pub fn or(conditions: Vec<Condition>) -> Self {
        Condition::Or { conditions }
    }

    /// Returns true for comparison nodes without children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Condition::Not { .. } | Condition::And { .. } | Condition::Or { .. }
        )
    }

    /// Column a leaf compares against; `None` for logical nodes.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Condition::EqualText { field, .. }
            | Condition::EqualInteger { field, .. }
            | Condition::SmallerInteger { field, .. }
            | Condition::SmallerOrEqualInteger { field, .. }
            | Condition::GreaterInteger { field, .. }
            | Condition::GreaterOrEqualInteger { field, .. }
            | Condition::EqualBoolean { field, .. }
            | Condition::SimilarText { field, .. } => Some(field),
            Condition::Not { .. } | Condition::And { .. } | Condition::Or { .. } => None,
        }
    }

    /// Accepts a visitor that walks the tree bottom-up.
    pub fn accept<V>(&self, visitor: &mut V) -> Result<V::Value, V::Error>
    where
        V: ConditionVisitor + ?Sized,
    {
        visitor.visit_condition(self)
    }
}

/// Replaces every occurrence of `wildcard` in `template` with `marker`.
///
/// An empty wildcard matches nothing, so the template is returned unchanged.
pub(crate) fn substitute_wildcard(template: &str, wildcard: &str, marker: &str) -> String {
    if wildcard.is_empty() {
        template.to_owned()
    } else {
        template.replace(wildcard, marker)
    }
}
