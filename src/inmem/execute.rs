use std::{cmp::Ordering, collections::HashMap, convert::Infallible};

use regex::Regex;

use super::{Database, ResultSet, Row};
use crate::{
    condition::{Condition, ConditionVisitor},
    field::{Field, OrderKey},
    observability::{log_debug, log_trace},
    option::{ExecuteOptions, SortComparison},
    query::Query,
    value::Value,
};

impl Query {
    /// Executes the query against an in-memory database with default options.
    #[must_use]
    pub fn execute(&self, database: &Database) -> ResultSet {
        self.execute_with(database, &ExecuteOptions::default())
    }

    /// Executes the query against an in-memory database.
    ///
    /// A missing table yields an empty result set without columns. Comparisons
    /// against missing or differently typed cells are false.
    #[must_use]
    pub fn execute_with(&self, database: &Database, options: &ExecuteOptions) -> ResultSet {
        let Some(table) = database.table(&self.table) else {
            log_debug!(
                component = "evaluator",
                event = "table_missing",
                table = %self.table,
            );
            return ResultSet::empty();
        };

        let mut rows: Vec<&Row> = match &self.condition {
            Some(condition) => {
                let mut patterns = PatternCache::default();
                table
                    .rows()
                    .iter()
                    .filter(|row| matches_row(condition, row, &mut patterns))
                    .collect()
            }
            None => table.rows().iter().collect(),
        };

        if let Some(order) = &self.order {
            stable_sort_by(&mut rows, |lhs, rhs| {
                compare_by_keys(order, lhs, rhs, options.sort_comparison)
            });
        }

        let result = match &self.fields {
            Some(fields) => project(fields, &rows),
            None => {
                let names: Vec<String> = table
                    .definitions()
                    .iter()
                    .map(|definition| definition.name.clone())
                    .collect();
                let projected = rows
                    .iter()
                    .map(|row| {
                        names
                            .iter()
                            .filter_map(|name| row.get_key_value(name))
                            .map(|(name, value)| (name.clone(), value.clone()))
                            .collect()
                    })
                    .collect();
                ResultSet::new(names, projected)
            }
        };

        log_debug!(
            component = "evaluator",
            event = "query_executed",
            table = %self.table,
            scanned = table.rows().len(),
            returned = result.len(),
        );
        result
    }
}

impl Condition {
    /// Evaluates the condition against a single row.
    #[must_use]
    pub fn check(&self, row: &Row) -> bool {
        matches_row(self, row, &mut PatternCache::default())
    }
}

impl OrderKey {
    /// Compares two rows by this key, already adjusted for direction.
    ///
    /// Rows missing the column, or holding values that are not comparable
    /// under `comparison`, compare equal.
    #[must_use]
    pub fn compare_rows(&self, lhs: &Row, rhs: &Row, comparison: SortComparison) -> Ordering {
        let ordering = match (lhs.get(self.name()), rhs.get(self.name())) {
            (Some(lhs), Some(rhs)) => compare_values(lhs, rhs, comparison),
            _ => Ordering::Equal,
        };
        match self.direction().factor() {
            1 => ordering,
            _ => ordering.reverse(),
        }
    }
}

fn compare_values(lhs: &Value, rhs: &Value, comparison: SortComparison) -> Ordering {
    let ordering = match comparison {
        SortComparison::AllKinds => lhs.compare(rhs),
        SortComparison::TextOnly => match (lhs, rhs) {
            (Value::Text(lhs), Value::Text(rhs)) => Some(lhs.cmp(rhs)),
            _ => None,
        },
    };
    ordering.unwrap_or(Ordering::Equal)
}

fn compare_by_keys(order: &[OrderKey], lhs: &Row, rhs: &Row, comparison: SortComparison) -> Ordering {
    order
        .iter()
        .map(|key| key.compare_rows(lhs, rhs, comparison))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Bottom-up merge sort that keeps equal elements in input order.
///
/// Key comparisons treat missing cells as equal to everything, which is not a
/// total order; `slice::sort_by` may panic on such comparators.
fn stable_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    let mut buffer = Vec::with_capacity(len);
    let mut width = 1;
    while width < len {
        buffer.clear();
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right) = (start, mid);
            while left < mid && right < end {
                if compare(&items[right], &items[left]) == Ordering::Less {
                    buffer.push(items[right]);
                    right += 1;
                } else {
                    buffer.push(items[left]);
                    left += 1;
                }
            }
            buffer.extend_from_slice(&items[left..mid]);
            buffer.extend_from_slice(&items[right..end]);
            start = end;
        }
        std::mem::swap(items, &mut buffer);
        width *= 2;
    }
}

fn project(fields: &[Field], rows: &[&Row]) -> ResultSet {
    let names = fields
        .iter()
        .map(|field| field.output_name().to_owned())
        .collect();
    let projected = rows
        .iter()
        .map(|row| {
            let mut output = Row::with_capacity(fields.len());
            for field in fields {
                if let Some(value) = row.get(field.source_name()) {
                    output.insert(field.output_name().to_owned(), value.clone());
                }
            }
            output
        })
        .collect();
    ResultSet::new(names, projected)
}

fn matches_row(condition: &Condition, row: &Row, patterns: &mut PatternCache) -> bool {
    let mut matcher = RowMatcher { row, patterns };
    match condition.accept(&mut matcher) {
        Ok(matched) => matched,
        Err(never) => match never {},
    }
}

/// Compiled similarity templates, keyed by their regular expression.
#[derive(Default)]
struct PatternCache {
    compiled: HashMap<String, Option<Regex>>,
}

impl PatternCache {
    fn is_full_match(&mut self, template: &str, wildcard: &str, text: &str) -> bool {
        let pattern = template_pattern(template, wildcard);
        let regex = self.compiled.entry(pattern).or_insert_with_key(|pattern| {
            let compiled = Regex::new(pattern).ok();
            if compiled.is_none() {
                log_trace!(
                    component = "evaluator",
                    event = "template_rejected",
                    pattern = %pattern,
                );
            }
            compiled
        });
        regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }
}

// Every wildcard occurrence becomes `.*`; the rest matches literally.
fn template_pattern(template: &str, wildcard: &str) -> String {
    let body = if wildcard.is_empty() {
        regex::escape(template)
    } else {
        template
            .split(wildcard)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*")
    };
    format!("(?s)^{body}$")
}

struct RowMatcher<'a> {
    row: &'a Row,
    patterns: &'a mut PatternCache,
}

impl RowMatcher<'_> {
    fn integer(&self, field: &str) -> Option<i64> {
        self.row.get(field).and_then(Value::as_integer)
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.row.get(field).and_then(Value::as_text)
    }
}

impl ConditionVisitor for RowMatcher<'_> {
    type Error = Infallible;
    type Value = bool;

    fn visit_leaf(&mut self, leaf: &Condition) -> Result<bool, Infallible> {
        let matched = match leaf {
            Condition::EqualText { field, value } => self.text(field) == Some(value.as_str()),
            Condition::EqualInteger { field, value } => self.integer(field) == Some(*value),
            Condition::SmallerInteger { field, than } => {
                self.integer(field).is_some_and(|stored| stored < *than)
            }
            Condition::SmallerOrEqualInteger { field, than } => {
                self.integer(field).is_some_and(|stored| stored <= *than)
            }
            Condition::GreaterInteger { field, than } => {
                self.integer(field).is_some_and(|stored| stored > *than)
            }
            Condition::GreaterOrEqualInteger { field, than } => {
                self.integer(field).is_some_and(|stored| stored >= *than)
            }
            Condition::EqualBoolean { field, value } => {
                self.row.get(field).and_then(Value::as_boolean) == Some(*value)
            }
            Condition::SimilarText {
                field,
                template,
                wildcard,
            } => match self.row.get(field).and_then(Value::as_text) {
                Some(text) => self.patterns.is_full_match(template, wildcard, text),
                None => false,
            },
            Condition::Not { .. } | Condition::And { .. } | Condition::Or { .. } => {
                return self.visit_condition(leaf);
            }
        };
        Ok(matched)
    }

    fn combine_not(&mut self, _original: &Condition, child: bool) -> Result<bool, Infallible> {
        Ok(!child)
    }

    fn combine_and(
        &mut self,
        _original: &Condition,
        children: Vec<bool>,
    ) -> Result<bool, Infallible> {
        Ok(children.into_iter().all(|matched| matched))
    }

    fn combine_or(
        &mut self,
        _original: &Condition,
        children: Vec<bool>,
    ) -> Result<bool, Infallible> {
        Ok(children.into_iter().any(|matched| matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{field::OrderDirection, inmem::Table, value::DataType};

    fn row(cells: &[(&str, Value)]) -> Row {
        cells
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.clone()))
            .collect()
    }

    fn people() -> Database {
        let table = Table::with_rows(
            [
                ("prename", DataType::Text),
                ("name", DataType::Text),
                ("age", DataType::Integer),
                ("member", DataType::Boolean),
            ],
            vec![
                row(&[
                    ("prename", Value::from("Gwen")),
                    ("name", Value::from("Portillo")),
                    ("age", Value::Integer(45)),
                    ("member", Value::from(false)),
                ]),
                row(&[
                    ("prename", Value::from("Wallace")),
                    ("name", Value::from("Todd")),
                    ("age", Value::Integer(27)),
                ]),
                row(&[
                    ("prename", Value::from("Ahmad")),
                    ("name", Value::from("Johnson")),
                    ("age", Value::from("26")),
                    ("member", Value::from(true)),
                ]),
            ],
        );
        Database::new().with_table("person", table)
    }

    fn prenames(result: &ResultSet) -> Vec<String> {
        result
            .rows()
            .iter()
            .map(|row| row["prename"].to_string())
            .collect()
    }

    #[test]
    fn missing_table_is_empty() {
        let result = Query::new("nobody").execute(&people());
        assert!(result.is_empty());
        assert!(result.fields().is_empty());
    }

    #[test]
    fn type_mismatch_and_missing_cells_are_false() {
        let database = people();
        let older = Query::new("person").condition(Condition::greater_integer("age", 20));
        assert_eq!(prenames(&older.execute(&database)), ["Gwen", "Wallace"]);

        let members = Query::new("person").condition(Condition::equal_boolean("member", false));
        assert_eq!(prenames(&members.execute(&database)), ["Gwen"]);

        let text_age = Query::new("person").condition(Condition::equal_text("age", "26"));
        assert_eq!(prenames(&text_age.execute(&database)), ["Ahmad"]);
    }

    #[test]
    fn empty_groups() {
        let database = people();
        let every = Query::new("person").condition(Condition::and(Vec::new()));
        assert_eq!(every.execute(&database).len(), 3);
        let none = Query::new("person").condition(Condition::or(Vec::new()));
        assert!(none.execute(&database).is_empty());
        let negated = Query::new("person").condition(Condition::not(Condition::or(Vec::new())));
        assert_eq!(negated.execute(&database).len(), 3);
    }

    #[test]
    fn similarity_is_anchored() {
        let check = |template: &str, text: &str| {
            Condition::similar_text("name", template, "*")
                .check(&row(&[("name", Value::from(text))]))
        };
        assert!(check("D*", "David"));
        assert!(check("D*", "D"));
        assert!(!check("D*", "XDavid"));
        assert!(!check("D", "Davidson"));
        assert!(check("*son", "Davidson"));
        assert!(!check("*son", "Davidsons"));
        assert!(check("*", ""));
        assert!(check("a.c*", "a.cd"));
        assert!(!check("a.c*", "abcd"));
        assert!(check("line*", "line\nbreak"));
        let number = row(&[("name", Value::Integer(1))]);
        assert!(!Condition::similar_text("name", "*", "*").check(&number));
    }

    #[test]
    fn multi_character_and_empty_wildcards() {
        let text = row(&[("name", Value::from("Portillo"))]);
        assert!(Condition::similar_text("name", "Po%%o", "%%").check(&text));
        assert!(!Condition::similar_text("name", "Pa%", "%").check(&text));
        assert!(Condition::similar_text("name", "Portillo", "").check(&text));
        assert!(!Condition::similar_text("name", "Port", "").check(&text));
    }

    #[test]
    fn projection_renames_and_skips_absent() {
        let query = Query::new("person")
            .fields(vec![
                Field::renamed("name", "surname"),
                Field::plain("member"),
                Field::plain("member"),
            ])
            .condition(Condition::equal_text("prename", "Wallace"));
        let result = query.execute(&people());
        assert_eq!(result.fields(), ["surname", "member", "member"]);
        assert_eq!(result.rows()[0], row(&[("surname", Value::from("Todd"))]));
    }

    #[test]
    fn no_projection_uses_declared_columns() {
        let database = Database::new().with_table(
            "t",
            Table::with_rows(
                [("b", DataType::Integer), ("a", DataType::Integer)],
                vec![row(&[("a", Value::Integer(1)), ("z", Value::Integer(2))])],
            ),
        );
        let result = Query::new("t").execute(&database);
        assert_eq!(result.fields(), ["b", "a"]);
        assert_eq!(result.rows()[0], row(&[("a", Value::Integer(1))]));
    }

    #[test]
    fn order_key_compare() {
        let first = row(&[("prename", Value::from("Wallace")), ("name", Value::from("Portillo"))]);
        let second = row(&[("prename", Value::from("Gwen")), ("name", Value::from("Todd"))]);
        let all = SortComparison::AllKinds;

        assert_eq!(
            OrderKey::field("prename").compare_rows(&first, &second, all),
            Ordering::Greater
        );
        assert_eq!(
            OrderKey::with_direction("prename", OrderDirection::Ascending)
                .compare_rows(&first, &second, all),
            Ordering::Greater
        );
        assert_eq!(
            OrderKey::with_direction("prename", OrderDirection::Descending)
                .compare_rows(&first, &second, all),
            Ordering::Less
        );
        assert_eq!(
            OrderKey::field("name").compare_rows(&first, &second, all),
            Ordering::Less
        );
        assert_eq!(
            OrderKey::with_direction("name", OrderDirection::Descending)
                .compare_rows(&first, &second, all),
            Ordering::Greater
        );
        assert_eq!(
            OrderKey::field("age").compare_rows(&first, &second, all),
            Ordering::Equal
        );
    }

    #[test]
    fn sort_comparison_scope() {
        let database = people();
        let by_age = Query::new("person").order_by(vec![OrderKey::field("age")]);
        // Ahmad's age is stored as text and never decides against integers.
        assert_eq!(prenames(&by_age.execute(&database)), ["Wallace", "Gwen", "Ahmad"]);

        let text_only = ExecuteOptions::default().sort_comparison(SortComparison::TextOnly);
        assert_eq!(
            prenames(&by_age.execute_with(&database, &text_only)),
            ["Gwen", "Wallace", "Ahmad"]
        );

        let by_member = Query::new("person")
            .order_by(vec![OrderKey::with_direction("member", OrderDirection::Descending)]);
        assert_eq!(
            prenames(&by_member.execute(&database)),
            ["Ahmad", "Gwen", "Wallace"]
        );
    }

    #[test]
    fn merge_sort_is_stable() {
        let mut items: Vec<(u8, usize)> = [3, 1, 2, 1, 3, 2, 1]
            .into_iter()
            .enumerate()
            .map(|(index, key)| (key, index))
            .collect();
        stable_sort_by(&mut items, |lhs, rhs| lhs.0.cmp(&rhs.0));
        assert_eq!(
            items,
            [(1, 1), (1, 3), (1, 6), (2, 2), (2, 5), (3, 0), (3, 4)]
        );

        let mut random: Vec<(u8, usize)> = (0..257)
            .map(|index| (fastrand::u8(0..8), index))
            .collect();
        let mut expected = random.clone();
        expected.sort_by_key(|item| item.0);
        stable_sort_by(&mut random, |lhs, rhs| lhs.0.cmp(&rhs.0));
        assert_eq!(random, expected);

        let mut empty: Vec<u8> = Vec::new();
        stable_sort_by(&mut empty, u8::cmp);
        assert!(empty.is_empty());
    }
}
