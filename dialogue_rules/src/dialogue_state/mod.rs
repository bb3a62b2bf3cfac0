//! Dialogue state - the runtime facts conditions read and effects write.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// The mutable state a dialogue is interpreted against.
///
/// Conditions only read it. Effects are the only authored way to change it;
/// the setters here exist so an embedding layer can seed or restore state.
///
/// Skill and flag names are case-insensitive. Keys are stored lowercased,
/// so write through the methods rather than the maps directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DialogueState {
    /// How much the other party trusts the player. May go negative.
    pub trust: i32,

    /// The topic most recently raised.
    pub last_topic: String,

    /// Skill name -> level. Absent skills read as 0.
    #[serde(deserialize_with = "lowercase_keys")]
    pub skills: HashMap<String, i32>,

    /// Named boolean facts, created on first write.
    #[serde(deserialize_with = "lowercase_keys")]
    pub flags: HashMap<String, bool>,
}

impl DialogueState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting trust.
    pub fn with_trust(mut self, trust: i32) -> Self {
        self.trust = trust;
        self
    }

    /// Set the starting topic.
    pub fn with_last_topic(mut self, topic: impl Into<String>) -> Self {
        self.last_topic = topic.into();
        self
    }

    /// Set a starting skill level.
    pub fn with_skill(mut self, name: impl Into<String>, level: i32) -> Self {
        let name: String = name.into();
        self.skills.insert(key(&name), level);
        self
    }

    /// Set a starting flag.
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        let name: String = name.into();
        self.flags.insert(key(&name), value);
        self
    }

    /// Get a skill level, 0 if the skill was never set.
    pub fn skill(&self, name: &str) -> i32 {
        self.skills.get(&key(name)).copied().unwrap_or(0)
    }

    /// Get a flag if it exists.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.flags.get(&key(name)).copied()
    }

    /// Check whether a flag exists and is set.
    pub fn is_flag_set(&self, name: &str) -> bool {
        self.flag(name).unwrap_or(false)
    }

    /// Add to trust, saturating at the integer bounds.
    pub fn add_trust(&mut self, delta: i32) {
        self.trust = self.trust.saturating_add(delta);
    }

    /// Add to a skill, creating it at 0 first if absent.
    pub fn add_skill(&mut self, name: &str, delta: i32) {
        let level = self.skills.entry(key(name)).or_insert(0);
        *level = level.saturating_add(delta);
    }

    /// Set a flag, creating it if absent.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.flags.insert(key(name), value);
    }

    /// Flip a flag. An absent flag becomes `true`.
    ///
    /// Returns the new value.
    pub fn toggle_flag(&mut self, name: &str) -> bool {
        let value = self.flags.entry(key(name)).or_insert(false);
        *value = !*value;
        *value
    }
}

/// Normalized map key for a skill or flag name.
fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

fn lowercase_keys<'de, D, V>(deserializer: D) -> Result<HashMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let map = HashMap::<String, V>::deserialize(deserializer)?;
    Ok(map.into_iter().map(|(name, value)| (key(&name), value)).collect())
}
