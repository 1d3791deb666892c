//! Resource-allocation graph and deadlock detection.
//!
//! Processes and resources are the two node classes of a bipartite
//! directed graph. An allocation is an edge resource → process, a request
//! an edge process → resource. With single-unit resources a cycle in this
//! graph is a deadlock.
//!
//! # Admission
//!
//! [`ResourceAllocationGraph::allocate`] and
//! [`ResourceAllocationGraph::request`] only compare the requested count
//! against the resource's *declared* total. Instances already held by other
//! processes are not subtracted, so over-commitment across processes is
//! accepted. [`ResourceAllocationGraph::allocate_strict`] is the separate,
//! availability-checking variant.
//!
//! # Reference
//! Holt (1972), "Some Deadlock Properties of Computer Systems"

mod cycles;
mod snapshot;

pub use snapshot::{DeadlockReport, EdgeKind, GraphEdge, GraphNode, GraphSnapshot, NodeKind};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, warn};
use thiserror::Error;

use crate::models::Pid;

/// Errors raised by the resource-allocation graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RagError {
    #[error("Resource {rid} must have a positive number of instances (got {instances})")]
    InvalidInstanceCount { rid: String, instances: u32 },
    #[error("Edge references node {0} that is not in the graph")]
    UnknownNode(String),
}

/// Node id of a process.
pub fn process_node_id(pid: Pid) -> String {
    format!("P{pid}")
}

/// Node id of a resource.
pub fn resource_node_id(rid: &str) -> String {
    format!("R{rid}")
}

/// A resource-allocation graph.
///
/// Node sets and edge maps are maintained independently: edges may name
/// processes or resources that were never added, and detection still
/// includes them.
///
/// # Example
/// ```
/// use u_procsched::rag::ResourceAllocationGraph;
///
/// let mut rag = ResourceAllocationGraph::new();
/// rag.add_process(1);
/// rag.add_process(2);
/// rag.add_resource("1", 1).unwrap();
/// rag.add_resource("2", 1).unwrap();
/// assert!(rag.allocate(1, "1", 1));
/// assert!(rag.allocate(2, "2", 1));
/// assert!(rag.request(1, "2", 1));
/// assert!(rag.request(2, "1", 1));
///
/// let report = rag.detect_deadlock();
/// assert!(report.has_deadlock);
/// assert_eq!(report.describe_cycles(), vec!["P1 → R2 → P2 → R1"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceAllocationGraph {
    processes: BTreeSet<Pid>,
    resources: BTreeMap<String, u32>,
    allocations: BTreeMap<(Pid, String), u32>,
    requests: BTreeMap<(Pid, String), u32>,
}

impl ResourceAllocationGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a process node. Adding an existing pid is a no-op.
    pub fn add_process(&mut self, pid: Pid) {
        self.processes.insert(pid);
    }

    /// Declares a resource with `instances` total units, replacing any
    /// earlier declaration.
    pub fn add_resource(&mut self, rid: impl Into<String>, instances: u32) -> Result<(), RagError> {
        let rid = rid.into();
        if instances == 0 {
            return Err(RagError::InvalidInstanceCount { rid, instances });
        }
        debug!("declare resource {rid} with {instances} instances");
        self.resources.insert(rid, instances);
        Ok(())
    }

    /// Declared total of a resource (0 if undeclared).
    pub fn total_instances(&self, rid: &str) -> u32 {
        self.resources.get(rid).copied().unwrap_or(0)
    }

    /// Records that `pid` holds `instances` of `rid`, replacing any earlier
    /// allocation for the same pair.
    ///
    /// Accepted iff `1 <= instances <= declared total`. Returns whether the
    /// allocation was recorded.
    pub fn allocate(&mut self, pid: Pid, rid: &str, instances: u32) -> bool {
        if !self.admits(rid, instances) {
            warn!("rejected allocation of {instances} x {rid} to P{pid}");
            return false;
        }
        self.allocations.insert((pid, rid.to_string()), instances);
        true
    }

    /// Records that `pid` waits for `instances` of `rid`, replacing any
    /// earlier request for the same pair.
    ///
    /// Same admission rule as [`allocate`](Self::allocate).
    pub fn request(&mut self, pid: Pid, rid: &str, instances: u32) -> bool {
        if !self.admits(rid, instances) {
            warn!("rejected request of {instances} x {rid} by P{pid}");
            return false;
        }
        self.requests.insert((pid, rid.to_string()), instances);
        true
    }

    /// Instances of `rid` not held by any process, saturating at 0.
    pub fn available(&self, rid: &str) -> u32 {
        let held: u32 = self
            .allocations
            .iter()
            .filter(|((_, r), _)| r == rid)
            .map(|(_, &n)| n)
            .sum();
        self.total_instances(rid).saturating_sub(held)
    }

    /// Availability-checking allocation.
    ///
    /// Unlike [`allocate`](Self::allocate), admits only when `instances`
    /// fits into what other processes leave free. An existing allocation of
    /// the same pair is treated as released before the check.
    pub fn allocate_strict(&mut self, pid: Pid, rid: &str, instances: u32) -> bool {
        let key = (pid, rid.to_string());
        let own = self.allocations.get(&key).copied().unwrap_or(0);
        let free = self.available(rid).saturating_add(own);
        if instances == 0 || instances > free {
            warn!("rejected strict allocation of {instances} x {rid} to P{pid} ({free} free)");
            return false;
        }
        self.allocations.insert(key, instances);
        true
    }

    /// Removes the allocation of `rid` to `pid`, returning its instance count.
    pub fn release(&mut self, pid: Pid, rid: &str) -> Option<u32> {
        self.allocations.remove(&(pid, rid.to_string()))
    }

    /// Removes the request of `rid` by `pid`, returning its instance count.
    pub fn cancel_request(&mut self, pid: Pid, rid: &str) -> Option<u32> {
        self.requests.remove(&(pid, rid.to_string()))
    }

    /// Registered process ids, ascending.
    pub fn processes(&self) -> impl Iterator<Item = Pid> + '_ {
        self.processes.iter().copied()
    }

    /// Declared resources and their totals, by id.
    pub fn resources(&self) -> impl Iterator<Item = (&str, u32)> {
        self.resources.iter().map(|(r, &n)| (r.as_str(), n))
    }

    /// Allocation records as `(pid, rid, instances)`.
    pub fn allocations(&self) -> impl Iterator<Item = (Pid, &str, u32)> {
        self.allocations
            .iter()
            .map(|((p, r), &n)| (*p, r.as_str(), n))
    }

    /// Request records as `(pid, rid, instances)`.
    pub fn requests(&self) -> impl Iterator<Item = (Pid, &str, u32)> {
        self.requests.iter().map(|((p, r), &n)| (*p, r.as_str(), n))
    }

    /// Whether the graph holds no nodes and no edges.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
            && self.resources.is_empty()
            && self.allocations.is_empty()
            && self.requests.is_empty()
    }

    /// Removes all processes, resources, allocations and requests.
    pub fn clear(&mut self) {
        self.processes.clear();
        self.resources.clear();
        self.allocations.clear();
        self.requests.clear();
    }

    /// Reports every simple cycle in the graph.
    ///
    /// If the graph cannot be indexed the report degrades to "no deadlock"
    /// with an empty cycle list; the snapshot is still returned.
    pub fn detect_deadlock(&self) -> DeadlockReport {
        self.detect(None)
    }

    /// Like [`detect_deadlock`](Self::detect_deadlock) but stops after
    /// `max_cycles` cycles.
    ///
    /// This changes the reported cycle list on large graphs: when more
    /// cycles exist, only the first `max_cycles` are returned and
    /// `truncated` is set. `has_deadlock` stays accurate.
    pub fn detect_deadlock_bounded(&self, max_cycles: usize) -> DeadlockReport {
        self.detect(Some(max_cycles))
    }

    fn detect(&self, limit: Option<usize>) -> DeadlockReport {
        let graph = self.snapshot();

        let adjacency = match index_edges(&graph) {
            Ok(adjacency) => adjacency,
            Err(e) => {
                warn!("deadlock detection degraded to no-deadlock: {e}");
                return DeadlockReport {
                    graph,
                    ..Default::default()
                };
            }
        };

        let found = cycles::simple_cycles(&adjacency, limit);
        let cycles: Vec<Vec<String>> = found
            .cycles
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|v| graph.nodes[v].id.clone()).collect())
            .collect();

        debug!(
            "deadlock detection: {} nodes, {} edges, {} cycles{}",
            graph.nodes.len(),
            graph.edges.len(),
            cycles.len(),
            if found.truncated { " (truncated)" } else { "" }
        );

        DeadlockReport {
            has_deadlock: !cycles.is_empty() || found.truncated,
            cycles,
            graph,
            truncated: found.truncated,
        }
    }

    /// Node and edge lists of the current graph.
    pub fn snapshot(&self) -> GraphSnapshot {
        let mut snapshot = GraphSnapshot::default();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        let mut add_node = |snapshot: &mut GraphSnapshot, id: String, kind, instances| {
            if seen.insert(id.clone()) {
                snapshot.nodes.push(GraphNode {
                    label: id.clone(),
                    id,
                    kind,
                    instances,
                });
            }
        };

        for &pid in &self.processes {
            add_node(&mut snapshot, process_node_id(pid), NodeKind::Process, None);
        }
        for (rid, &n) in &self.resources {
            add_node(&mut snapshot, resource_node_id(rid), NodeKind::Resource, Some(n));
        }
        for (pid, rid) in self.allocations.keys().chain(self.requests.keys()) {
            add_node(&mut snapshot, process_node_id(*pid), NodeKind::Process, None);
            add_node(&mut snapshot, resource_node_id(rid), NodeKind::Resource, None);
        }

        for ((pid, rid), &n) in &self.allocations {
            snapshot.edges.push(GraphEdge {
                from: resource_node_id(rid),
                to: process_node_id(*pid),
                kind: EdgeKind::Allocation,
                instances: n,
            });
        }
        for ((pid, rid), &n) in &self.requests {
            snapshot.edges.push(GraphEdge {
                from: process_node_id(*pid),
                to: resource_node_id(rid),
                kind: EdgeKind::Request,
                instances: n,
            });
        }

        snapshot
    }

    fn admits(&self, rid: &str, instances: u32) -> bool {
        instances > 0 && instances <= self.total_instances(rid)
    }
}

/// Adjacency lists over snapshot node indices.
fn index_edges(graph: &GraphSnapshot) -> Result<Vec<Vec<usize>>, RagError> {
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();
    let lookup = |id: &str| {
        index
            .get(id)
            .copied()
            .ok_or_else(|| RagError::UnknownNode(id.to_string()))
    };

    let mut adjacency = vec![Vec::new(); graph.nodes.len()];
    for edge in &graph.edges {
        let from = lookup(&edge.from)?;
        let to = lookup(&edge.to)?;
        if !adjacency[from].contains(&to) {
            adjacency[from].push(to);
        }
    }
    Ok(adjacency)
}
