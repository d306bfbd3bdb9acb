use std::convert::Infallible;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{
    condition::{substitute_wildcard, Condition, ConditionVisitor},
    field::{Field, OrderDirection, OrderKey},
    query::Query,
};

// Characters outside the URL query set. Punctuation the dialect relies on
// (`;/?:@&=+$,` among others) stays readable.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Types with a PostgREST query-string rendering.
///
/// See <https://docs.postgrest.org/en/v13/references/api/tables_views.html>.
pub trait ToPostgrest {
    /// Renders `self` in the PostgREST query-string dialect.
    fn postgrest(&self) -> String;
}

/// Percent-encodes a name or value component.
#[must_use]
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

impl ToPostgrest for Field {
    fn postgrest(&self) -> String {
        match self {
            Field::Plain { name } => encode_component(name),
            Field::Renamed { name, alias } => {
                format!("{}:{}", encode_component(alias), encode_component(name))
            }
        }
    }
}

impl ToPostgrest for OrderDirection {
    fn postgrest(&self) -> String {
        match self {
            OrderDirection::Ascending => "asc",
            OrderDirection::Descending => "desc",
        }
        .to_owned()
    }
}

impl ToPostgrest for OrderKey {
    fn postgrest(&self) -> String {
        match self {
            OrderKey::ByField { name } => encode_component(name),
            OrderKey::ByFieldDirection { name, direction } => {
                format!("{}.{}", encode_component(name), direction.postgrest())
            }
        }
    }
}

impl ToPostgrest for Condition {
    /// Renders the condition as the sole top-level filter.
    fn postgrest(&self) -> String {
        self.postgrest_term().top_level()
    }
}

impl Condition {
    /// Renders the condition nested inside a logical group.
    #[must_use]
    pub fn postgrest_nested(&self) -> String {
        self.postgrest_term().nested()
    }

    fn postgrest_term(&self) -> Term {
        match self.accept(&mut PostgrestVisitor) {
            Ok(term) => term,
            Err(never) => match never {},
        }
    }
}

impl ToPostgrest for Query {
    fn postgrest(&self) -> String {
        let mut segments = Vec::new();
        if let Some(fields) = &self.fields {
            segments.push(format!("select={}", join(fields)));
        }
        if let Some(condition) = &self.condition {
            segments.push(condition.postgrest());
        }
        if let Some(order) = &self.order {
            segments.push(format!("order={}", join(order)));
        }
        format!("{}?{}", encode_component(&self.table), segments.join("&"))
    }
}

fn join<T: ToPostgrest>(items: &[T]) -> String {
    items
        .iter()
        .map(ToPostgrest::postgrest)
        .collect::<Vec<_>>()
        .join(",")
}

/// A rendered condition whose separator depends on its position.
///
/// At top level every node is written `head=tail`; nested, comparisons and
/// negations use `head.tail` while groups use `head(tail)`.
struct Term {
    head: String,
    nested_separator: &'static str,
    tail: String,
}

impl Term {
    fn top_level(&self) -> String {
        format!("{}={}", self.head, self.tail)
    }

    fn nested(&self) -> String {
        format!("{}{}{}", self.head, self.nested_separator, self.tail)
    }

    fn comparison(field: &str, operator: &str, value: impl std::fmt::Display) -> Self {
        Term {
            head: encode_component(field),
            nested_separator: ".",
            tail: format!("{operator}.{value}"),
        }
    }

    fn group(head: &str, children: Vec<Term>) -> Self {
        let nested: Vec<_> = children.iter().map(Term::nested).collect();
        Term {
            head: head.to_owned(),
            nested_separator: "",
            tail: format!("({})", nested.join(",")),
        }
    }
}

struct PostgrestVisitor;

impl ConditionVisitor for PostgrestVisitor {
    type Error = Infallible;
    type Value = Term;

    fn visit_leaf(&mut self, leaf: &Condition) -> Result<Term, Infallible> {
        let term = match leaf {
            Condition::EqualText { field, value } => {
                Term::comparison(field, "eq", encode_component(value))
            }
            Condition::EqualInteger { field, value } => Term::comparison(field, "eq", value),
            Condition::SmallerInteger { field, than } => Term::comparison(field, "lt", than),
            Condition::SmallerOrEqualInteger { field, than } => {
                Term::comparison(field, "lte", than)
            }
            Condition::GreaterInteger { field, than } => Term::comparison(field, "gt", than),
            Condition::GreaterOrEqualInteger { field, than } => {
                Term::comparison(field, "gte", than)
            }
            Condition::EqualBoolean { field, value } => Term::comparison(field, "eq", value),
            Condition::SimilarText {
                field,
                template,
                wildcard,
            } => Term::comparison(
                field,
                "like",
                encode_component(&substitute_wildcard(template, wildcard, "*")),
            ),
            Condition::Not { .. } | Condition::And { .. } | Condition::Or { .. } => {
                return self.visit_condition(leaf);
            }
        };
        Ok(term)
    }

    fn combine_not(&mut self, _original: &Condition, child: Term) -> Result<Term, Infallible> {
        Ok(Term {
            head: "not".to_owned(),
            nested_separator: ".",
            tail: child.nested(),
        })
    }

    fn combine_and(
        &mut self,
        _original: &Condition,
        children: Vec<Term>,
    ) -> Result<Term, Infallible> {
        Ok(Term::group("and", children))
    }

    fn combine_or(
        &mut self,
        _original: &Condition,
        children: Vec<Term>,
    ) -> Result<Term, Infallible> {
        Ok(Term::group("or", children))
    }
}
