//! Dialogue Session - runs one conversation over a shared graph.
//!
//! A session moves through three states:
//!
//! - **Idle**: created, no node yet
//! - **Active**: a current node is set and has been published
//! - **Ended**: a choice or auto-advance led nowhere
//!
//! Every transition into Active publishes the resolved line and choices to
//! the registered observers. Bad node IDs and out-of-range indices never
//! fail; they degrade and are logged.

mod config;

pub use config::*;

use dialogue_rules::{DialogueGraph, DialogueNode, DialogueState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effects;
use crate::events::{DialogueEvent, DialogueObserver, ListenerId, ObserverList};
use crate::resolver::{resolve_choices, resolve_line_with, ResolvedChoice};

/// Unique identifier for sessions, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Ended,
}

/// One conversation: a current node, its own state, and observers.
///
/// The graph is borrowed, so many sessions can run over one graph. The
/// state is owned; seed it with [`DialogueSession::with_state`] and take it
/// back with [`DialogueSession::into_state`] when it must outlive the session.
#[derive(Debug)]
pub struct DialogueSession<'g> {
    id: SessionId,
    graph: &'g DialogueGraph,
    config: SessionConfig,
    state: DialogueState,
    current_node_id: Option<String>,
    status: SessionStatus,
    observers: ObserverList<'g>,
}

impl<'g> DialogueSession<'g> {
    /// Create an idle session with default configuration.
    pub fn new(graph: &'g DialogueGraph) -> Self {
        Self::with_config(graph, SessionConfig::default())
    }

    /// Create an idle session with the given configuration.
    pub fn with_config(graph: &'g DialogueGraph, config: SessionConfig) -> Self {
        Self {
            id: SessionId::new(),
            graph,
            config,
            state: DialogueState::new(),
            current_node_id: None,
            status: SessionStatus::Idle,
            observers: ObserverList::default(),
        }
    }

    /// Replace the state this session starts with.
    pub fn with_state(mut self, state: DialogueState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn graph(&self) -> &'g DialogueGraph {
        self.graph
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    /// Mutable access for the embedding layer. Changes show up on the next
    /// resolution.
    pub fn state_mut(&mut self) -> &mut DialogueState {
        &mut self.state
    }

    /// Consume the session, keeping its state.
    pub fn into_state(self) -> DialogueState {
        self.state
    }

    /// Register an observer. Returns a handle for removing it.
    pub fn add_observer<O>(&mut self, observer: O) -> ListenerId
    where
        O: DialogueObserver + 'g,
    {
        self.observers.add(Box::new(observer))
    }

    /// Register a closure as an observer.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&DialogueEvent<'_>) + 'g,
    {
        self.observers.add(Box::new(callback))
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn remove_observer(&mut self, id: ListenerId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// ID of the current node, if a dialogue is running.
    pub fn current_node_id(&self) -> Option<&str> {
        self.current_node_id.as_deref()
    }

    /// The current node, if there is one and it exists in the graph.
    pub fn get_current_node(&self) -> Option<&'g DialogueNode> {
        let graph = self.graph;
        self.current_node_id.as_deref().and_then(|id| graph.get(id))
    }

    /// Speaker of the current node.
    pub fn speaker(&self) -> Option<&'g str> {
        self.get_current_node().map(|node| node.speaker.as_str())
    }

    /// The line for the current node, or the missing-node line.
    pub fn get_current_line(&self) -> String {
        match self.get_current_node() {
            Some(node) => resolve_line_with(node, &self.state, &self.config.append_separator),
            None => self.config.missing_node_line.clone(),
        }
    }

    /// Unlocked choices for the current node. Empty if there is none.
    pub fn get_available_choices(&self) -> Vec<ResolvedChoice<'g>> {
        self.get_current_node()
            .map(|node| resolve_choices(node, &self.state))
            .unwrap_or_default()
    }

    /// Start (or restart) the dialogue at a node and publish it.
    pub fn start(&mut self, node_id: &str) {
        tracing::debug!("Session {} starting at node '{}'", self.id, node_id);
        self.current_node_id = Some(node_id.to_string());
        self.status = SessionStatus::Active;
        self.publish();
    }

    /// Start at the configured start node.
    pub fn begin(&mut self) {
        let start = self.config.start_node_id.clone();
        self.start(&start);
    }

    /// Select a choice by its index in the available (filtered) list.
    ///
    /// Applies the choice's effects, then moves to its next node or ends the
    /// dialogue. Returns false, changing nothing, if the session is not
    /// active or the index is out of range.
    pub fn select_choice(&mut self, index: usize) -> bool {
        if !self.is_active() {
            tracing::debug!("Session {} ignoring choice {}: not active", self.id, index);
            return false;
        }

        let choices = self.get_available_choices();
        let Some(selected) = choices.get(index) else {
            tracing::debug!(
                "Session {} ignoring choice {}: only {} available",
                self.id,
                index,
                choices.len()
            );
            return false;
        };
        let choice = selected.choice;

        effects::apply(&choice.effects, &mut self.state);

        match choice.next_node() {
            Some(next) => self.start(next),
            None => self.end(),
        }
        true
    }

    /// Continue from a node without choices.
    ///
    /// Moves to the node's next node, or ends the dialogue if it has none.
    /// A node with choices is left alone; the caller must select one.
    /// Returns whether anything happened.
    pub fn advance(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }

        let Some(node) = self.get_current_node() else {
            // Nothing to continue from.
            self.end();
            return true;
        };

        if !node.choices.is_empty() {
            tracing::debug!(
                "Session {} not advancing: node '{}' has choices",
                self.id,
                node.id
            );
            return false;
        }

        match node.next_node() {
            Some(next) => self.start(next),
            None => self.end(),
        }
        true
    }

    /// Resolve the current node and notify observers.
    fn publish(&mut self) {
        let Some(node) = self.get_current_node() else {
            tracing::warn!(
                "Session {}: node '{}' not found",
                self.id,
                self.current_node_id.as_deref().unwrap_or_default()
            );
            self.observers.notify(&DialogueEvent::LineUpdated {
                speaker: "",
                line: &self.config.missing_node_line,
            });
            self.observers.notify(&DialogueEvent::ChoicesUpdated { choices: &[] });
            return;
        };

        let line = resolve_line_with(node, &self.state, &self.config.append_separator);
        let choices = resolve_choices(node, &self.state);

        self.observers.notify(&DialogueEvent::LineUpdated {
            speaker: &node.speaker,
            line: &line,
        });
        self.observers.notify(&DialogueEvent::ChoicesUpdated { choices: &choices });
    }

    fn end(&mut self) {
        tracing::debug!("Session {} ended", self.id);
        self.current_node_id = None;
        self.status = SessionStatus::Ended;
        self.observers.notify(&DialogueEvent::Ended);
    }
}
