use super::Condition;

/// Visitor that walks condition trees bottom-up and folds them into a value.
pub trait ConditionVisitor {
    /// Error type used when evaluation fails.
    type Error;
    /// Concrete value type produced while walking the condition.
    type Value;

    /// Evaluates a comparison leaf.
    fn visit_leaf(&mut self, leaf: &Condition) -> Result<Self::Value, Self::Error>;

    /// Combines the result of a negated child.
    fn combine_not(
        &mut self,
        original: &Condition,
        child: Self::Value,
    ) -> Result<Self::Value, Self::Error>;

    /// Combines an `AND` node from its child results, which may be empty.
    fn combine_and(
        &mut self,
        original: &Condition,
        children: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;

    /// Combines an `OR` node from its child results, which may be empty.
    fn combine_or(
        &mut self,
        original: &Condition,
        children: Vec<Self::Value>,
    ) -> Result<Self::Value, Self::Error>;

    /// Visits the supplied condition by walking the expression tree.
    fn visit_condition(&mut self, condition: &Condition) -> Result<Self::Value, Self::Error> {
        match condition {
            Condition::Not { condition: inner } => {
                let child = self.visit_condition(inner)?;
                self.combine_not(condition, child)
            }
            Condition::And { conditions } => {
                let children = self.visit_children(conditions)?;
                self.combine_and(condition, children)
            }
            Condition::Or { conditions } => {
                let children = self.visit_children(conditions)?;
                self.combine_or(condition, children)
            }
            leaf => {
                debug_assert!(leaf.is_leaf(), "non-leaf nodes handled earlier");
                self.visit_leaf(leaf)
            }
        }
    }

    /// Internal helper that visits sibling clauses in order.
    fn visit_children(
        &mut self,
        clauses: &[Condition],
    ) -> Result<Vec<Self::Value>, Self::Error> {
        let mut children = Vec::with_capacity(clauses.len());
        for clause in clauses {
            children.push(self.visit_condition(clause)?);
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;

    // Counts leaves and the deepest nesting level.
    struct ShapeVisitor {
        leaves: usize,
    }

    impl ConditionVisitor for ShapeVisitor {
        type Error = Infallible;
        type Value = usize;

        fn visit_leaf(&mut self, _leaf: &Condition) -> Result<usize, Infallible> {
            self.leaves += 1;
            Ok(1)
        }

        fn combine_not(&mut self, _original: &Condition, child: usize) -> Result<usize, Infallible> {
            Ok(child + 1)
        }

        fn combine_and(
            &mut self,
            _original: &Condition,
            children: Vec<usize>,
        ) -> Result<usize, Infallible> {
            Ok(children.into_iter().max().unwrap_or(0) + 1)
        }

        fn combine_or(
            &mut self,
            original: &Condition,
            children: Vec<usize>,
        ) -> Result<usize, Infallible> {
            self.combine_and(original, children)
        }
    }

    #[test]
    fn walks_every_clause() {
        let condition = Condition::or(vec![
            Condition::equal_text("prename", "Bert"),
            Condition::and(vec![
                Condition::not(Condition::similar_text("name", "D*", "*")),
                Condition::equal_boolean("member", true),
            ]),
            Condition::and(Vec::new()),
        ]);
        let mut visitor = ShapeVisitor { leaves: 0 };
        let depth = condition.accept(&mut visitor).unwrap();
        assert_eq!(visitor.leaves, 3);
        assert_eq!(depth, 4);
    }
}
