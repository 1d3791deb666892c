//! Renderable graph snapshot and deadlock report.
//!
//! These are the structures a presentation layer draws: a node list, an
//! edge list, and the detected cycles as node-id paths.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A process (`P{pid}`).
    Process,
    /// A resource (`R{rid}`).
    Resource,
}

/// Kind of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Resource → process: the process holds instances.
    Allocation,
    /// Process → resource: the process waits for instances.
    Request,
}

/// A node in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node identifier (`P1`, `R2`, ...).
    pub id: String,
    /// Display label.
    pub label: String,
    /// Process or resource.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Declared instances, for declared resources only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
}

/// A directed edge in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Allocation or request.
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    /// Instances held or requested.
    pub instances: u32,
}

/// Node and edge lists for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes: processes, then declared resources, then identifiers seen only on edges.
    pub nodes: Vec<GraphNode>,
    /// Edges: allocations, then requests.
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges of one kind.
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}

/// Outcome of a deadlock query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockReport {
    /// Whether at least one cycle exists.
    pub has_deadlock: bool,
    /// Simple cycles as node-id paths (start node not repeated).
    pub cycles: Vec<Vec<String>>,
    /// Graph that was analysed.
    #[serde(rename = "graph_data")]
    pub graph: GraphSnapshot,
    /// Set by bounded detection when more cycles exist than were returned.
    #[serde(default)]
    pub truncated: bool,
}

impl DeadlockReport {
    /// Ids of process nodes that lie on any cycle, sorted and deduplicated.
    pub fn deadlocked_processes(&self) -> Vec<String> {
        self.nodes_on_cycles(NodeKind::Process)
    }

    /// Ids of resource nodes that lie on any cycle, sorted and deduplicated.
    pub fn deadlocked_resources(&self) -> Vec<String> {
        self.nodes_on_cycles(NodeKind::Resource)
    }

    /// One `A → B → C` line per cycle.
    pub fn describe_cycles(&self) -> Vec<String> {
        self.cycles.iter().map(|c| c.join(" → ")).collect()
    }

    fn nodes_on_cycles(&self, kind: NodeKind) -> Vec<String> {
        let on_cycle: BTreeSet<&String> = self.cycles.iter().flatten().collect();
        on_cycle
            .into_iter()
            .filter(|id| self.graph.node(id).is_some_and(|n| n.kind == kind))
            .cloned()
            .collect()
    }
}

impl fmt::Display for DeadlockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_deadlock {
            return f.write_str("No deadlock detected");
        }
        write!(f, "Deadlock detected: {}", self.describe_cycles().join("; "))?;
        if self.truncated {
            f.write_str(" (more cycles omitted)")?;
        }
        Ok(())
    }
}
