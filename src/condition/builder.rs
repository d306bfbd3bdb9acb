//! Flattening of condition fragments into logical nodes.

use super::Condition;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BuilderCombine {
    One,
    All,
    NotOne,
    NotAll,
}

impl BuilderCombine {
    fn combine(self, mut conditions: Vec<Condition>) -> Condition {
        let negated = matches!(self, BuilderCombine::NotOne | BuilderCombine::NotAll);
        if negated && conditions.len() == 1 {
            if let Some(single) = conditions.pop() {
                return Condition::not(single);
            }
        }
        match self {
            BuilderCombine::One => Condition::Or { conditions },
            BuilderCombine::All => Condition::And { conditions },
            BuilderCombine::NotOne => Condition::not(Condition::Or { conditions }),
            BuilderCombine::NotAll => Condition::not(Condition::And { conditions }),
        }
    }
}

fn flatten<I>(fragments: I) -> Vec<Condition>
where
    I: IntoIterator,
    I::Item: Into<Option<Condition>>,
{
    fragments.into_iter().filter_map(Into::into).collect()
}

/// Disjunction of the present fragments, kept as `Or` even for zero or one clause.
#[must_use]
pub fn one<I>(fragments: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Option<Condition>>,
{
    BuilderCombine::One.combine(flatten(fragments))
}

/// Conjunction of the present fragments, kept as `And` even for zero or one clause.
#[must_use]
pub fn all<I>(fragments: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Option<Condition>>,
{
    BuilderCombine::All.combine(flatten(fragments))
}

/// Negated disjunction; a single fragment is negated directly.
#[must_use]
pub fn not_one<I>(fragments: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Option<Condition>>,
{
    BuilderCombine::NotOne.combine(flatten(fragments))
}

/// Negated conjunction; a single fragment is negated directly.
#[must_use]
pub fn not_all<I>(fragments: I) -> Condition
where
    I: IntoIterator,
    I::Item: Into<Option<Condition>>,
{
    BuilderCombine::NotAll.combine(flatten(fragments))
}

/// Builder for collecting condition fragments incrementally.
///
/// Fragments keep their insertion order; absent ones are dropped.
#[derive(Debug)]
pub struct ConditionBuilder {
    combine: BuilderCombine,
    clauses: Vec<Condition>,
}

impl ConditionBuilder {
    const fn new(combine: BuilderCombine) -> Self {
        Self {
            combine,
            clauses: Vec::new(),
        }
    }

    /// Creates a builder that emits an `Or` of all clauses.
    #[must_use]
    pub fn one() -> Self {
        Self::new(BuilderCombine::One)
    }

    /// Creates a builder that emits an `And` of all clauses.
    #[must_use]
    pub fn all() -> Self {
        Self::new(BuilderCombine::All)
    }

    /// Creates a builder that emits a negated `Or`.
    #[must_use]
    pub fn not_one() -> Self {
        Self::new(BuilderCombine::NotOne)
    }

    /// Creates a builder that emits a negated `And`.
    #[must_use]
    pub fn not_all() -> Self {
        Self::new(BuilderCombine::NotAll)
    }

    /// Adds a single condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.clauses.push(condition);
        self
    }

    /// Adds the condition if present.
    #[must_use]
    pub fn optional(mut self, condition: Option<Condition>) -> Self {
        self.clauses.extend(condition);
        self
    }

    /// Adds every present fragment in order.
    #[must_use]
    pub fn extend<I>(mut self, fragments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Condition>>,
    {
        self.clauses.extend(flatten(fragments));
        self
    }

    /// Applies `then` only when `flag` holds.
    #[must_use]
    pub fn when<F>(self, flag: bool, then: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        if flag {
            then(self)
        } else {
            self
        }
    }

    /// Applies exactly one of the two arms.
    #[must_use]
    pub fn either<F, G>(self, flag: bool, first: F, second: G) -> Self
    where
        F: FnOnce(Self) -> Self,
        G: FnOnce(Self) -> Self,
    {
        if flag {
            first(self)
        } else {
            second(self)
        }
    }

    fn group<F>(mut self, combine: BuilderCombine, build: F) -> Self
    where
        F: FnOnce(ConditionBuilder) -> ConditionBuilder,
    {
        let condition = build(ConditionBuilder::new(combine)).build();
        self.clauses.push(condition);
        self
    }

    /// Adds a nested disjunction built by the supplied closure.
    #[must_use]
    pub fn one_group<F>(self, build: F) -> Self
    where
        F: FnOnce(ConditionBuilder) -> ConditionBuilder,
    {
        self.group(BuilderCombine::One, build)
    }

    /// Adds a nested conjunction built by the supplied closure.
    #[must_use]
    pub fn all_group<F>(self, build: F) -> Self
    where
        F: FnOnce(ConditionBuilder) -> ConditionBuilder,
    {
        self.group(BuilderCombine::All, build)
    }

    /// Adds a nested negated disjunction built by the supplied closure.
    #[must_use]
    pub fn not_one_group<F>(self, build: F) -> Self
    where
        F: FnOnce(ConditionBuilder) -> ConditionBuilder,
    {
        self.group(BuilderCombine::NotOne, build)
    }

    /// Adds a nested negated conjunction built by the supplied closure.
    #[must_use]
    pub fn not_all_group<F>(self, build: F) -> Self
    where
        F: FnOnce(ConditionBuilder) -> ConditionBuilder,
    {
        self.group(BuilderCombine::NotAll, build)
    }

    /// Consumes the builder and returns the composed condition.
    #[must_use]
    pub fn build(self) -> Condition {
        self.combine.combine(self.clauses)
    }
}
