//! Dialogue graph - every node of a conversation, keyed by node ID.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::nodes::DialogueNode;

/// Errors raised while loading a graph from authored data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dialogue file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dialogue JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dialogue JSON must be an object keyed by node ID")]
    NotAnObject,
}

/// How one node leads to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// The node's own auto-advance target.
    AutoAdvance,
    /// A choice's next node.
    Choice,
    /// A choice's failure branch.
    Failure,
}

/// A directed link between two nodes of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// Horizontal position of every node in [`DialogueGraph::layout`].
pub const LAYOUT_X: f32 = 100.0;

/// Vertical distance between consecutive nodes in [`DialogueGraph::layout`].
pub const LAYOUT_SPACING: f32 = 150.0;

/// Where an editor should draw a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub node_id: String,
    pub x: f32,
    pub y: f32,
}

/// All nodes of a dialogue.
///
/// Built once and then only read. Sessions borrow it, so any number of them
/// can share one graph.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DialogueGraph {
    nodes: HashMap<String, DialogueNode>,
}

impl DialogueGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from nodes, keyed by their IDs.
    ///
    /// A later node replaces an earlier one with the same ID.
    pub fn from_nodes(nodes: impl IntoIterator<Item = DialogueNode>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.insert(node);
        }
        graph
    }

    /// Parse a graph from a JSON object mapping node ID to node.
    ///
    /// The key is authoritative for the node's ID. Entries that are not
    /// objects or do not convert to a node are skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let root: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(entries) = root else {
            return Err(LoadError::NotAnObject);
        };

        let mut graph = Self::new();
        for (node_id, body) in entries {
            if !body.is_object() {
                tracing::warn!("Skipping dialogue node {}: not an object", node_id);
                continue;
            }

            match serde_json::from_value::<DialogueNode>(body) {
                Ok(mut node) => {
                    node.id = node_id;
                    graph.insert(node);
                }
                Err(e) => tracing::warn!("Failed to convert dialogue node {}: {}", node_id, e),
            }
        }

        tracing::debug!("Loaded {} dialogue nodes", graph.len());
        Ok(graph)
    }

    /// Read and parse a graph from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let graph = Self::from_json_str(&json)?;
        tracing::info!("Loaded {} dialogue nodes from {}", graph.len(), path.display());
        Ok(graph)
    }

    /// Add a node, returning the node it replaced.
    pub fn insert(&mut self, node: DialogueNode) -> Option<DialogueNode> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Get a node by ID.
    pub fn get(&self, node_id: &str) -> Option<&DialogueNode> {
        self.nodes.get(node_id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.values()
    }

    /// All node IDs, sorted.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// List every link between nodes that exist in the graph.
    ///
    /// Targets naming a missing node are left out. Edges are ordered by
    /// source ID, then in authored order within a node.
    pub fn edges(&self) -> Vec<GraphEdge> {
        let mut edges = Vec::new();

        for from in self.node_ids() {
            let Some(node) = self.get(from) else {
                continue;
            };

            let mut push = |to: &str, kind: EdgeKind| {
                if !to.is_empty() && self.contains(to) {
                    edges.push(GraphEdge {
                        from: from.to_string(),
                        to: to.to_string(),
                        kind,
                    });
                }
            };

            push(&node.next_node_id, EdgeKind::AutoAdvance);
            for choice in &node.choices {
                push(&choice.next_node_id, EdgeKind::Choice);
                push(&choice.failure_node_id, EdgeKind::Failure);
            }
        }

        edges
    }

    /// Place every node in a single column for visualization.
    ///
    /// Nodes are ordered by ID, all at `x = 100`, with `y = index * 150`.
    pub fn layout(&self) -> Vec<NodePosition> {
        self.node_ids()
            .into_iter()
            .enumerate()
            .map(|(index, node_id)| NodePosition {
                node_id: node_id.to_string(),
                x: LAYOUT_X,
                y: index as f32 * LAYOUT_SPACING,
            })
            .collect()
    }
}

impl FromIterator<DialogueNode> for DialogueGraph {
    fn from_iter<I: IntoIterator<Item = DialogueNode>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}
