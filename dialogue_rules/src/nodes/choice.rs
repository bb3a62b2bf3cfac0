//! Choice definitions.

use serde::{Deserialize, Serialize};

use super::{AltText, Effect};

/// A player choice as authored by writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Choice {
    /// Default text for the choice.
    #[serde(alias = "Text")]
    pub text: String,

    /// Alternate texts; the first whose condition holds replaces `text`.
    #[serde(alias = "AltTexts")]
    pub alt_texts: Vec<AltText>,

    /// Condition strings that must all hold for the choice to be offered.
    /// e.g. `["trust >= 2", "skill.observation >= 1"]`
    #[serde(alias = "Requirements")]
    pub requirements: Vec<String>,

    /// Applied in order when the choice is selected.
    #[serde(alias = "Effects")]
    pub effects: Vec<Effect>,

    /// Node to continue at. Empty ends the dialogue.
    #[serde(alias = "NextNodeID", alias = "next_node")]
    pub next_node_id: String,

    /// Node intended for a failed requirement. Not routed to by sessions.
    #[serde(alias = "FailureNodeID")]
    pub failure_node_id: String,
}

impl Choice {
    /// Create a choice that ends the dialogue.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the node to continue at.
    pub fn with_next(mut self, node_id: impl Into<String>) -> Self {
        self.next_node_id = node_id.into();
        self
    }

    /// Add an alternate text.
    pub fn with_alt_text(mut self, condition: impl Into<String>, text: impl Into<String>) -> Self {
        self.alt_texts.push(AltText::new(condition, text));
        self
    }

    /// Add a requirement.
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirements.push(requirement.into());
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the failure branch.
    pub fn with_failure(mut self, node_id: impl Into<String>) -> Self {
        self.failure_node_id = node_id.into();
        self
    }

    /// The node to continue at, if any.
    pub fn next_node(&self) -> Option<&str> {
        non_empty(&self.next_node_id)
    }

    /// The failure branch, if any.
    pub fn failure_node(&self) -> Option<&str> {
        non_empty(&self.failure_node_id)
    }

    /// Whether selecting this choice ends the dialogue.
    pub fn ends_dialogue(&self) -> bool {
        self.next_node().is_none()
    }
}

pub(crate) fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
