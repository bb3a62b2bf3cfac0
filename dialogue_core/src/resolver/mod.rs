//! Node/Choice Resolver - what a node says and offers for a given state.
//!
//! Line resolution:
//! 1. The first alternate line whose condition holds replaces the base line
//! 2. Every append line whose condition holds is added after it, in order
//!
//! Choice resolution drops locked choices entirely, so a displayed index is
//! a position in the filtered list rather than the authored one.
//!
//! Empty conditions never hold here; they mark an entry as not applicable.

use dialogue_rules::{Choice, ConditionalLine, DialogueNode, DialogueState, Effect};

use crate::expression::evaluate;

/// Separator placed before each appended line.
pub const DEFAULT_APPEND_SEPARATOR: &str = " ";

/// A choice as it should be shown to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChoice<'a> {
    /// Display text after alternate-text substitution.
    pub text: String,
    /// Position of the choice in the node's authored list.
    pub authored_index: usize,
    /// The authored choice.
    pub choice: &'a Choice,
}

impl<'a> ResolvedChoice<'a> {
    pub fn effects(&self) -> &'a [Effect] {
        &self.choice.effects
    }

    pub fn next_node(&self) -> Option<&'a str> {
        self.choice.next_node()
    }

    pub fn failure_node(&self) -> Option<&'a str> {
        self.choice.failure_node()
    }
}

/// Resolve the line a node displays.
pub fn resolve_line(node: &DialogueNode, state: &DialogueState) -> String {
    resolve_line_with(node, state, DEFAULT_APPEND_SEPARATOR)
}

/// Resolve the line a node displays, joining append lines with `separator`.
pub fn resolve_line_with(node: &DialogueNode, state: &DialogueState, separator: &str) -> String {
    let mut line = first_match(&node.alt_lines, state)
        .unwrap_or(&node.base_line)
        .to_string();

    for append in &node.append_lines {
        if condition_holds(&append.condition, state) {
            line.push_str(separator);
            line.push_str(&append.text);
        }
    }

    line
}

/// Resolve the choices a node offers, in authored order, locked ones omitted.
pub fn resolve_choices<'a>(
    node: &'a DialogueNode,
    state: &DialogueState,
) -> Vec<ResolvedChoice<'a>> {
    node.choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| is_unlocked(choice, state))
        .map(|(authored_index, choice)| ResolvedChoice {
            text: resolve_choice_text(choice, state).to_string(),
            authored_index,
            choice,
        })
        .collect()
}

/// Whether every requirement of a choice holds. Blank requirements are skipped.
pub fn is_unlocked(choice: &Choice, state: &DialogueState) -> bool {
    choice
        .requirements
        .iter()
        .filter(|requirement| !requirement.trim().is_empty())
        .all(|requirement| evaluate(requirement, state))
}

/// The text a choice displays.
pub fn resolve_choice_text<'a>(choice: &'a Choice, state: &DialogueState) -> &'a str {
    first_match(&choice.alt_texts, state).unwrap_or(&choice.text)
}

fn first_match<'a>(lines: &'a [ConditionalLine], state: &DialogueState) -> Option<&'a str> {
    lines
        .iter()
        .find(|line| condition_holds(&line.condition, state))
        .map(|line| line.text.as_str())
}

fn condition_holds(condition: &str, state: &DialogueState) -> bool {
    !condition.trim().is_empty() && evaluate(condition, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn guard_node() -> DialogueNode {
        DialogueNode::new("gate", "Guard", "Halt! Who goes there?")
            .with_alt_line("trust <= -1", "You again. Get lost.")
            .with_alt_line("trust >= 2", "Ah, welcome back.")
            .with_alt_line("trust >= 1", "Oh, it's you.")
            .with_append_line("door_open", "(The gate stands open.)")
            .with_append_line("skill.observation >= 1", "(He looks nervous.)")
            .with_append_line("", "(Never shown.)")
    }

    #[test]
    fn test_base_line_when_nothing_matches() {
        let line = resolve_line(&guard_node(), &DialogueState::new());
        assert_eq!(line, "Halt! Who goes there?");
    }

    #[test]
    fn test_first_alt_line_wins() {
        // trust 3 satisfies both `>= 2` and `>= 1`; the earlier entry wins.
        let line = resolve_line(&guard_node(), &DialogueState::new().with_trust(3));
        assert_eq!(line, "Ah, welcome back.");

        let line = resolve_line(&guard_node(), &DialogueState::new().with_trust(-2));
        assert_eq!(line, "You again. Get lost.");
    }

    #[test]
    fn test_all_append_lines_in_order() {
        let state = DialogueState::new()
            .with_trust(1)
            .with_flag("door_open", true)
            .with_skill("observation", 2);

        let line = resolve_line(&guard_node(), &state);
        assert_eq!(
            line,
            "Oh, it's you. (The gate stands open.) (He looks nervous.)"
        );
    }

    #[test]
    fn test_custom_separator() {
        let state = DialogueState::new().with_flag("door_open", true);
        let line = resolve_line_with(&guard_node(), &state, "\n");
        assert_eq!(line, "Halt! Who goes there?\n(The gate stands open.)");
    }

    #[test]
    fn test_empty_alt_condition_never_matches() {
        let node = DialogueNode::new("n", "", "base").with_alt_line("", "alt");
        assert_eq!(resolve_line(&node, &DialogueState::new()), "base");
    }

    #[test]
    fn test_resolve_line_is_idempotent() {
        let state = DialogueState::new().with_trust(1).with_flag("door_open", true);
        let node = guard_node();
        assert_eq!(resolve_line(&node, &state), resolve_line(&node, &state));
    }

    #[test]
    fn test_locked_choices_are_omitted() {
        let node = DialogueNode::new("n", "Mara", "Well?")
            .with_choice(Choice::new("Tell me the truth").with_requirement("trust >= 5"))
            .with_choice(Choice::new("Goodbye"));

        let choices = resolve_choices(&node, &DialogueState::new());
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].text, "Goodbye");
        assert_eq!(choices[0].authored_index, 1);
    }

    #[test]
    fn test_all_requirements_must_hold() {
        let choice = Choice::new("Pick the lock")
            .with_requirement("skill.lockpicking >= 1")
            .with_requirement("door_open == false");

        let state = DialogueState::new().with_skill("lockpicking", 1);
        // door_open is undefined, so the comparison is false.
        assert!(!is_unlocked(&choice, &state));

        let state = state.with_flag("door_open", false);
        assert!(is_unlocked(&choice, &state));
    }

    #[test]
    fn test_blank_requirements_are_skipped() {
        let choice = Choice::new("Anything").with_requirement("").with_requirement("  ");
        assert!(is_unlocked(&choice, &DialogueState::new()));
        assert!(is_unlocked(&Choice::new("No requirements"), &DialogueState::new()));
    }

    #[test]
    fn test_alt_text_overrides() {
        let choice = Choice::new("Ask about the cinema")
            .with_alt_text("", "Never used")
            .with_alt_text(r#"last_topic == "cinema""#, "Ask about the cinema again")
            .with_alt_text("true", "Fallback");

        assert_eq!(
            resolve_choice_text(&choice, &DialogueState::new().with_last_topic("cinema")),
            "Ask about the cinema again"
        );
        assert_eq!(resolve_choice_text(&choice, &DialogueState::new()), "Fallback");
    }

    #[test]
    fn test_resolved_choice_keeps_authored_fields() {
        let node = DialogueNode::new("n", "", "").with_choice(
            Choice::new("Go")
                .with_effect(Effect::add("trust", "1"))
                .with_next("next")
                .with_failure("fail"),
        );

        let choices = resolve_choices(&node, &DialogueState::new());
        let choice = &choices[0];
        assert_eq!(choice.effects().len(), 1);
        assert_eq!(choice.next_node(), Some("next"));
        assert_eq!(choice.failure_node(), Some("fail"));
    }
}
