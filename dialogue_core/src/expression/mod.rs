//! Expression Evaluator - condition strings over dialogue state.
//!
//! The grammar is deliberately flat:
//!
//! 1. Split the expression on `||` into OR-groups
//! 2. Split each group on `&&` into clauses
//! 3. Each clause is either a bare flag name / `true` / `false`, or a
//!    comparison `left <op> right` with `==`, `!=`, `>=`, `<=`, `>` or `<`
//!
//! There are no parentheses and no negation. AND binds tighter than OR.
//! Evaluation never fails: anything unknown or malformed is false.

mod clause;

pub use clause::*;

use dialogue_rules::DialogueState;

/// A parsed condition expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    source: String,
    /// OR-groups of AND-clauses, empty clauses already removed.
    groups: Vec<Vec<Clause>>,
}

impl Expression {
    /// Parse an expression. Parsing cannot fail; see the module docs.
    pub fn parse(source: &str) -> Self {
        let groups = source
            .split("||")
            .map(|group| {
                group
                    .split("&&")
                    .map(str::trim)
                    .filter(|clause| !clause.is_empty())
                    .map(Clause::parse)
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            source: source.to_string(),
            groups,
        }
    }

    /// Evaluate against the state.
    ///
    /// True iff some OR-group has every clause true. A group left empty by
    /// skipped clauses holds vacuously, but an expression with no clauses
    /// at all is false.
    pub fn evaluate(&self, state: &DialogueState) -> bool {
        if self.is_empty() {
            return false;
        }
        self.groups
            .iter()
            .any(|clauses| clauses.iter().all(|clause| clause.evaluate(state)))
    }

    /// The text this expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn groups(&self) -> &[Vec<Clause>] {
        &self.groups
    }

    /// Whether the expression has no clauses and so can never hold.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }
}

impl From<&str> for Expression {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse and evaluate a condition string in one step.
pub fn evaluate(expr: &str, state: &DialogueState) -> bool {
    Expression::parse(expr).evaluate(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DialogueState {
        DialogueState::new()
            .with_trust(2)
            .with_last_topic("autonomy")
            .with_skill("observation", 1)
            .with_flag("met_guard", true)
            .with_flag("door_open", false)
    }

    #[test]
    fn test_trust_comparisons() {
        assert!(evaluate("trust >= 2", &DialogueState::new().with_trust(2)));
        assert!(!evaluate("trust >= 2", &DialogueState::new().with_trust(1)));
        assert!(evaluate("trust <= -1", &DialogueState::new().with_trust(-3)));
        assert!(evaluate("trust == 2", &state()));
        assert!(evaluate("trust != 3", &state()));
        assert!(evaluate("trust > 1", &state()));
        assert!(!evaluate("trust < 2", &state()));
    }

    #[test]
    fn test_names_ignore_case() {
        assert!(evaluate("TRUST >= 2", &state()));
        assert!(evaluate("Last_Topic == autonomy", &state()));
        assert!(evaluate("Skill.observation >= 1", &state()));
    }

    #[test]
    fn test_skill_flag_and_topic_values_ignore_case() {
        let state = state();
        assert!(evaluate("skill.Observation >= 1", &state));
        assert!(evaluate("MET_GUARD", &state));
        assert!(evaluate("Door_Open == false", &state));
        assert!(evaluate("last_topic == AUTONOMY", &state));
        assert!(evaluate(r#"last_topic != "Family""#, &state));
    }

    #[test]
    fn test_non_numeric_right_side_is_zero() {
        assert!(evaluate("trust > lots", &state()));
        assert!(evaluate("trust == abc", &DialogueState::new()));
    }

    #[test]
    fn test_last_topic_quotes_stripped() {
        assert!(evaluate(r#"last_topic == "autonomy""#, &state()));
        assert!(evaluate("last_topic == autonomy", &state()));
        assert!(evaluate(r#"last_topic != "family""#, &state()));
    }

    #[test]
    fn test_last_topic_ordering_is_false() {
        assert!(!evaluate("last_topic >= a", &state()));
        assert!(!evaluate("last_topic < z", &state()));
    }

    #[test]
    fn test_skill_defaults_to_zero() {
        let state = DialogueState::new().with_skill("observation", 0);
        assert!(!evaluate("skill.observation >= 1", &state));
        assert!(evaluate("skill.lockpicking == 0", &state));
        assert!(!evaluate("skill.lockpicking > 0", &state));
    }

    #[test]
    fn test_bare_flags() {
        assert!(evaluate("met_guard", &state()));
        assert!(!evaluate("door_open", &state()));
        assert!(!evaluate("never_set", &state()));
    }

    #[test]
    fn test_literals() {
        assert!(evaluate("true", &DialogueState::new()));
        assert!(evaluate("True", &DialogueState::new()));
        assert!(!evaluate("FALSE", &DialogueState::new()));
    }

    #[test]
    fn test_flag_comparisons() {
        assert!(evaluate("met_guard == true", &state()));
        assert!(evaluate("door_open == FALSE", &state()));
        assert!(evaluate("door_open != true", &state()));
        assert!(!evaluate("met_guard == false", &state()));
        // Only equality is meaningful for flags.
        assert!(!evaluate("met_guard >= true", &state()));
        // The right side must be a boolean literal.
        assert!(!evaluate("met_guard == yes", &state()));
        // Undefined names are false whatever the comparison.
        assert!(!evaluate("never_set == false", &state()));
        assert!(!evaluate("never_set != true", &state()));
    }

    #[test]
    fn test_and_or() {
        let state = state();
        assert!(evaluate("trust >= 2 && met_guard", &state));
        assert!(!evaluate("trust >= 2 && door_open", &state));
        assert!(evaluate("door_open || met_guard", &state));
        assert!(!evaluate("door_open || never_set", &state));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let state = state();
        // (door_open && met_guard) || trust == 2
        assert!(evaluate("door_open && met_guard || trust == 2", &state));
        // met_guard || (door_open && trust == 2)
        assert!(evaluate("met_guard || door_open && trust == 2", &state));
        // (met_guard && door_open) || (never_set && true)
        assert!(!evaluate("met_guard && door_open || never_set && true", &state));
    }

    #[test]
    fn test_combinators_match_parts() {
        let state = state();
        let parts = ["trust >= 2", "door_open", "met_guard", "skill.observation > 3"];
        for a in parts {
            for b in parts {
                assert_eq!(
                    evaluate(&format!("{a} || {b}"), &state),
                    evaluate(a, &state) || evaluate(b, &state)
                );
                assert_eq!(
                    evaluate(&format!("{a} && {b}"), &state),
                    evaluate(a, &state) && evaluate(b, &state)
                );
            }
        }
    }

    #[test]
    fn test_empty_expressions_are_false() {
        assert!(!evaluate("", &state()));
        assert!(!evaluate("   ", &state()));
        assert!(!evaluate("||", &state()));
        assert!(Expression::parse(" && ").is_empty());
    }

    #[test]
    fn test_empty_clauses_are_skipped() {
        assert!(evaluate("met_guard && && trust == 2", &state()));
        assert!(evaluate("met_guard &&", &state()));
    }

    #[test]
    fn test_empty_or_branch_holds() {
        let state = DialogueState::new();
        assert!(!evaluate("door_open", &state));
        // The empty branch has no false clause, so it holds.
        assert!(evaluate("door_open ||", &state));
        assert!(evaluate("door_open ||   ", &state));
        assert!(evaluate("door_open || && || never_set", &state));
        // Still nothing to evaluate at all.
        assert!(!evaluate("|| &&", &state));
    }

    #[test]
    fn test_parse_once_evaluate_many() {
        let expr = Expression::parse("skill.observation >= 2");
        let mut state = DialogueState::new();
        assert!(!expr.evaluate(&state));
        state.add_skill("observation", 2);
        assert!(expr.evaluate(&state));
        assert_eq!(expr.to_string(), "skill.observation >= 2");
        assert_eq!(expr.groups().len(), 1);
    }
}
