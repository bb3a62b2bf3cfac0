//! Single clauses of a condition expression.

use dialogue_rules::{
    parse_bool, parse_int, strip_prefix_ignore_case, DialogueState, SKILL_PREFIX,
};
use std::cmp::Ordering;

/// Comparison operators, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Comparator {
    /// All comparators. Earlier entries win when two start at the same
    /// position, so `>=` is found before `>`.
    pub const ALL: [Comparator; 6] = [
        Comparator::Eq,
        Comparator::Ne,
        Comparator::Ge,
        Comparator::Le,
        Comparator::Gt,
        Comparator::Lt,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Ge => ">=",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
        }
    }

    /// Find the leftmost comparator in `text`, returning it and its byte offset.
    pub fn find(text: &str) -> Option<(Comparator, usize)> {
        let mut found: Option<(Comparator, usize)> = None;
        for comparator in Self::ALL {
            if let Some(pos) = text.find(comparator.symbol()) {
                if found.map_or(true, |(_, best)| pos < best) {
                    found = Some((comparator, pos));
                }
            }
        }
        found
    }

    /// Whether an ordering between left and right satisfies this comparator.
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Ne => ordering != Ordering::Equal,
            Comparator::Ge => ordering != Ordering::Less,
            Comparator::Le => ordering != Ordering::Greater,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Lt => ordering == Ordering::Less,
        }
    }

    /// Equality-only comparison for strings and booleans.
    fn accepts_equality(&self, equal: bool) -> bool {
        match self {
            Comparator::Eq => equal,
            Comparator::Ne => !equal,
            _ => false,
        }
    }
}

impl std::fmt::Display for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One AND-clause of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// A bare `true` or `false`.
    Literal(bool),
    /// A bare name, checked as a flag.
    Flag(String),
    /// `<left> <comparator> <right>`, with quotes already stripped from `right`.
    Compare {
        left: String,
        comparator: Comparator,
        right: String,
    },
}

impl Clause {
    /// Parse a non-empty, trimmed clause.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        let Some((comparator, pos)) = Comparator::find(text) else {
            return match parse_bool(text) {
                Some(value) => Clause::Literal(value),
                None => Clause::Flag(text.to_string()),
            };
        };

        let left = text[..pos].trim();
        let right = text[pos + comparator.symbol().len()..].trim();

        Clause::Compare {
            left: left.to_string(),
            comparator,
            right: strip_quotes(right).to_string(),
        }
    }

    /// Evaluate against the state. Unknown names are false.
    pub fn evaluate(&self, state: &DialogueState) -> bool {
        match self {
            Clause::Literal(value) => *value,
            Clause::Flag(name) => state.is_flag_set(name),
            Clause::Compare {
                left,
                comparator,
                right,
            } => compare(state, left, *comparator, right),
        }
    }
}

fn compare(state: &DialogueState, left: &str, comparator: Comparator, right: &str) -> bool {
    if left.eq_ignore_ascii_case("trust") {
        return comparator.accepts(state.trust.cmp(&parse_int(right)));
    }

    if left.eq_ignore_ascii_case("last_topic") {
        return comparator.accepts_equality(state.last_topic.eq_ignore_ascii_case(right));
    }

    if let Some(skill) = strip_prefix_ignore_case(left, SKILL_PREFIX) {
        return comparator.accepts(state.skill(skill).cmp(&parse_int(right)));
    }

    match (state.flag(left), parse_bool(right)) {
        (Some(flag), Some(expected)) => comparator.accepts_equality(flag == expected),
        _ => false,
    }
}

/// Strip one pair of surrounding double quotes.
fn strip_quotes(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}
