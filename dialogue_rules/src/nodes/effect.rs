//! Effect definitions - state changes triggered by choosing a choice.

use serde::{Deserialize, Serialize};

use crate::attributes::{parse_bool, parse_int, Attribute};

/// Authored effect operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EffectOp {
    /// Numeric add, e.g. trust +1.
    #[serde(alias = "add", alias = "ADD")]
    Add,
    /// Assign a value, e.g. `last_topic = "autonomy"`.
    #[default]
    #[serde(alias = "set", alias = "SET")]
    Set,
    /// Flip a boolean flag.
    #[serde(alias = "toggle", alias = "TOGGLE")]
    Toggle,
}

/// What an effect does to its attribute, resolved from the authored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// Add to an integer attribute.
    IntDelta(i32),
    /// Overwrite an integer attribute.
    IntSet(i32),
    /// Overwrite a string attribute.
    StringSet(String),
    /// Overwrite a flag.
    BoolSet(bool),
    /// Flip a flag.
    BoolToggle,
    /// The operation has no meaning for this attribute.
    Ignored,
}

impl StateChange {
    /// Resolve an authored operation and value against an attribute.
    pub fn compile(attribute: &Attribute, operation: EffectOp, value: &str) -> Self {
        match (attribute, operation) {
            (Attribute::Trust, EffectOp::Add) => StateChange::IntDelta(parse_int(value)),
            (Attribute::Trust, EffectOp::Set) => StateChange::IntSet(parse_int(value)),
            (Attribute::LastTopic, EffectOp::Add | EffectOp::Set) => {
                StateChange::StringSet(value.to_string())
            }
            (Attribute::Skill(_), EffectOp::Add) => StateChange::IntDelta(parse_int(value)),
            (Attribute::Flag(_), EffectOp::Set) => match parse_bool(value) {
                Some(flag) => StateChange::BoolSet(flag),
                None => StateChange::Ignored,
            },
            (Attribute::Flag(_), EffectOp::Toggle) => StateChange::BoolToggle,
            _ => StateChange::Ignored,
        }
    }
}

/// An effect in the shape writers author it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthoredEffect {
    /// e.g. `trust`, `last_topic`, `skill.observation`, `Clue_Cinema_MainDoor`.
    #[serde(alias = "Attribute")]
    pub attribute: String,
    #[serde(alias = "Operation")]
    pub operation: EffectOp,
    /// Numeric string for Add, any string for Set.
    #[serde(alias = "Value")]
    pub value: String,
}

/// A compiled effect.
///
/// The attribute and change are decided when the effect is built, so
/// applying it never re-parses strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuthoredEffect", into = "AuthoredEffect")]
pub struct Effect {
    pub attribute: Attribute,
    pub change: StateChange,

    /// Authored operation, kept for serialization.
    operation: EffectOp,
    /// Authored value, kept for serialization.
    value: String,
}

impl Effect {
    /// Compile an effect from its authored parts.
    pub fn new(attribute: &str, operation: EffectOp, value: impl Into<String>) -> Self {
        let attribute = Attribute::parse(attribute);
        let value = value.into();
        let change = StateChange::compile(&attribute, operation, &value);
        Self {
            attribute,
            change,
            operation,
            value,
        }
    }

    /// Shorthand for an Add effect.
    pub fn add(attribute: &str, value: impl Into<String>) -> Self {
        Self::new(attribute, EffectOp::Add, value)
    }

    /// Shorthand for a Set effect.
    pub fn set(attribute: &str, value: impl Into<String>) -> Self {
        Self::new(attribute, EffectOp::Set, value)
    }

    /// Shorthand for a Toggle effect.
    pub fn toggle(attribute: &str) -> Self {
        Self::new(attribute, EffectOp::Toggle, "")
    }

    pub fn operation(&self) -> EffectOp {
        self.operation
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether applying this effect changes anything.
    pub fn is_ignored(&self) -> bool {
        self.change == StateChange::Ignored
    }
}

impl From<AuthoredEffect> for Effect {
    fn from(authored: AuthoredEffect) -> Self {
        Effect::new(&authored.attribute, authored.operation, authored.value)
    }
}

impl From<Effect> for AuthoredEffect {
    fn from(effect: Effect) -> Self {
        AuthoredEffect {
            attribute: effect.attribute.as_string(),
            operation: effect.operation,
            value: effect.value,
        }
    }
}
