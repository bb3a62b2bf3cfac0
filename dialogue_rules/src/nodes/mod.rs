//! Authored dialogue nodes.
//!
//! A node is one unit of dialogue: a speaker, a line with conditional
//! variants, and the choices offered after it. Nodes are immutable once
//! loaded.

mod choice;
mod effect;

pub use choice::*;
pub use effect::*;

use serde::{Deserialize, Serialize};

use choice::non_empty;

/// A line that applies when its condition holds.
///
/// An empty condition never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConditionalLine {
    /// e.g. `trust <= -1` or `last_topic == "autonomy"`.
    #[serde(alias = "Condition")]
    pub condition: String,
    #[serde(alias = "Text")]
    pub text: String,
}

impl ConditionalLine {
    pub fn new(condition: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            text: text.into(),
        }
    }
}

/// Alternate text for a choice. Same shape as a conditional line.
pub type AltText = ConditionalLine;

/// Top-level authored node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DialogueNode {
    /// Unique key in the graph.
    #[serde(alias = "ID", alias = "Id")]
    pub id: String,

    #[serde(alias = "Speaker")]
    pub speaker: String,

    /// The primary line.
    #[serde(alias = "BaseLine")]
    pub base_line: String,

    /// Replace the base line; first match wins.
    #[serde(alias = "AltLines")]
    pub alt_lines: Vec<ConditionalLine>,

    /// Appended after the resolved line; every match is used.
    #[serde(alias = "AppendLines")]
    pub append_lines: Vec<ConditionalLine>,

    #[serde(alias = "Choices")]
    pub choices: Vec<Choice>,

    /// Continue here automatically when there are no choices.
    #[serde(alias = "NextNodeID", alias = "next_node")]
    pub next_node_id: String,
}

impl DialogueNode {
    /// Create a node with a speaker and a base line.
    pub fn new(
        id: impl Into<String>,
        speaker: impl Into<String>,
        base_line: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            base_line: base_line.into(),
            ..Default::default()
        }
    }

    /// Add an alternate line.
    pub fn with_alt_line(mut self, condition: impl Into<String>, text: impl Into<String>) -> Self {
        self.alt_lines.push(ConditionalLine::new(condition, text));
        self
    }

    /// Add an appended line.
    pub fn with_append_line(
        mut self,
        condition: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.append_lines.push(ConditionalLine::new(condition, text));
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Set the auto-advance target.
    pub fn with_next(mut self, node_id: impl Into<String>) -> Self {
        self.next_node_id = node_id.into();
        self
    }

    /// The auto-advance target, if any.
    pub fn next_node(&self) -> Option<&str> {
        non_empty(&self.next_node_id)
    }

    /// A node with no choices and nowhere to go ends the dialogue.
    pub fn is_terminal(&self) -> bool {
        self.choices.is_empty() && self.next_node().is_none()
    }
}
