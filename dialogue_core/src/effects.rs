//! Effect Applier - mutates dialogue state from a choice's effects.

use dialogue_rules::{Attribute, DialogueState, Effect, StateChange};

/// Apply effects in order. Later effects see the changes of earlier ones.
///
/// Every step is infallible; effects with no meaning for their attribute
/// are skipped.
pub fn apply(effects: &[Effect], state: &mut DialogueState) {
    for effect in effects {
        apply_one(effect, state);
    }
}

/// Apply a single effect.
pub fn apply_one(effect: &Effect, state: &mut DialogueState) {
    match (&effect.attribute, &effect.change) {
        (Attribute::Trust, StateChange::IntDelta(delta)) => state.add_trust(*delta),
        (Attribute::Trust, StateChange::IntSet(value)) => state.trust = *value,
        (Attribute::LastTopic, StateChange::StringSet(topic)) => state.last_topic.clone_from(topic),
        (Attribute::Skill(name), StateChange::IntDelta(delta)) => state.add_skill(name, *delta),
        (Attribute::Flag(name), StateChange::BoolSet(value)) => state.set_flag(name, *value),
        (Attribute::Flag(name), StateChange::BoolToggle) => {
            state.toggle_flag(name);
        }
        (attribute, change) => {
            tracing::debug!(
                "Ignoring {:?} effect on {} ({:?})",
                effect.operation(),
                attribute,
                change
            );
        }
    }
}
