//! Simple-cycle enumeration over a directed graph.
//!
//! # Algorithm
//! Johnson's algorithm. For each start vertex `s` (in index order), restrict
//! the graph to vertices `>= s`, take the strongly connected component of
//! `s`, and enumerate circuits through `s` with a blocked-set backtracking
//! search. Every simple cycle is reported exactly once, rooted at its
//! lowest-index vertex.
//!
//! The backtracking search and the unblock cascade keep explicit stacks,
//! so call-stack depth stays constant however long the cycles are.
//!
//! # Complexity
//! O((V + E)(C + 1)) for C cycles.
//!
//! # Reference
//! Johnson (1975), "Finding All the Elementary Circuits of a Directed Graph"

use std::collections::VecDeque;

/// Result of a cycle search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CycleEnumeration {
    /// Cycles as vertex sequences; the first vertex is not repeated at the end.
    pub cycles: Vec<Vec<usize>>,
    /// Whether the search stopped early because the limit was hit.
    pub truncated: bool,
}

/// Enumerates simple cycles of `adjacency`.
///
/// With `limit = Some(k)` at most `k` cycles are returned and the search
/// stops at the first cycle beyond that, setting `truncated`.
pub(crate) fn simple_cycles(adjacency: &[Vec<usize>], limit: Option<usize>) -> CycleEnumeration {
    let n = adjacency.len();
    let mut reverse = vec![Vec::new(); n];
    for (v, successors) in adjacency.iter().enumerate() {
        for &w in successors {
            reverse[w].push(v);
        }
    }

    let mut search = Johnson {
        adjacency,
        in_component: vec![false; n],
        blocked: vec![false; n],
        blocked_by: vec![Vec::new(); n],
        closed: vec![false; n],
        stack: Vec::new(),
        limit,
        result: CycleEnumeration::default(),
    };

    for start in 0..n {
        if search.result.truncated {
            break;
        }
        let component = component_of(adjacency, &reverse, start);
        let size = component.iter().filter(|&&member| member).count();
        if size < 2 && !adjacency[start].contains(&start) {
            continue;
        }

        for v in 0..n {
            if component[v] {
                search.blocked[v] = false;
                search.blocked_by[v].clear();
            }
        }
        search.in_component = component;
        search.circuit(start);
    }

    search.result
}

/// Strongly connected component of `start` within vertices `>= start`.
fn component_of(adjacency: &[Vec<usize>], reverse: &[Vec<usize>], start: usize) -> Vec<bool> {
    let forward = reachable(adjacency, start);
    let backward = reachable(reverse, start);
    forward
        .into_iter()
        .zip(backward)
        .map(|(f, b)| f && b)
        .collect()
}

/// Vertices `>= start` reachable from `start` (breadth-first).
fn reachable(edges: &[Vec<usize>], start: usize) -> Vec<bool> {
    let mut seen = vec![false; edges.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;

    while let Some(v) = queue.pop_front() {
        for &w in &edges[v] {
            if w >= start && !seen[w] {
                seen[w] = true;
                queue.push_back(w);
            }
        }
    }
    seen
}

struct Johnson<'a> {
    adjacency: &'a [Vec<usize>],
    in_component: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<Vec<usize>>,
    /// Whether a circuit through `start` was found below this vertex.
    closed: Vec<bool>,
    stack: Vec<usize>,
    limit: Option<usize>,
    result: CycleEnumeration,
}

impl Johnson<'_> {
    /// Enumerates circuits through `start` inside the current component.
    ///
    /// `frames` holds `(vertex, next successor index)` for every vertex on
    /// the current path, in the same order as `stack`.
    fn circuit(&mut self, start: usize) {
        let adjacency = self.adjacency;
        let mut frames: Vec<(usize, usize)> = vec![(start, 0)];
        self.stack.push(start);
        self.blocked[start] = true;
        self.closed[start] = false;

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;

            if let Some(&w) = adjacency[v].get(frame.1) {
                frame.1 += 1;
                if !self.in_component[w] {
                    continue;
                }
                if w == start {
                    self.record();
                    if self.result.truncated {
                        self.stack.clear();
                        return;
                    }
                    for &u in &self.stack {
                        self.closed[u] = true;
                    }
                } else if !self.blocked[w] {
                    self.stack.push(w);
                    self.blocked[w] = true;
                    self.closed[w] = false;
                    frames.push((w, 0));
                }
                continue;
            }

            // All successors of `v` explored.
            if self.closed[v] {
                self.unblock(v);
            } else {
                for &w in &adjacency[v] {
                    if self.in_component[w] && !self.blocked_by[w].contains(&v) {
                        self.blocked_by[w].push(v);
                    }
                }
            }
            frames.pop();
            self.stack.pop();
        }
    }

    fn unblock(&mut self, v: usize) {
        let mut pending = vec![v];
        while let Some(u) = pending.pop() {
            if self.blocked[u] {
                self.blocked[u] = false;
                pending.append(&mut self.blocked_by[u]);
            }
        }
    }

    fn record(&mut self) {
        if let Some(limit) = self.limit {
            if self.result.cycles.len() >= limit {
                self.result.truncated = true;
                return;
            }
        }
        self.result.cycles.push(self.stack.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cycles: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        cycles.sort();
        cycles
    }

    #[test]
    fn test_no_vertices() {
        let result = simple_cycles(&[], None);
        assert!(result.cycles.is_empty());
        assert!(!result.truncated);
    }

    #[test]
    fn test_acyclic_chain() {
        // 0 → 1 → 2
        let adj = vec![vec![1], vec![2], vec![]];
        assert!(simple_cycles(&adj, None).cycles.is_empty());
    }

    #[test]
    fn test_single_cycle_rooted_at_lowest_vertex() {
        // 2 → 0 → 1 → 2
        let adj = vec![vec![1], vec![2], vec![0]];
        assert_eq!(simple_cycles(&adj, None).cycles, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_self_loop() {
        let adj = vec![vec![0], vec![]];
        assert_eq!(simple_cycles(&adj, None).cycles, vec![vec![0]]);
    }

    #[test]
    fn test_complete_digraph_three_vertices() {
        // Every ordered pair connected: three 2-cycles and two 3-cycles.
        let adj = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
        let cycles = sorted(simple_cycles(&adj, None).cycles);
        assert_eq!(
            cycles,
            vec![vec![0, 1], vec![0, 1, 2], vec![0, 2], vec![0, 2, 1], vec![1, 2]]
        );
    }

    #[test]
    fn test_two_cycles_sharing_a_vertex() {
        // 0 ⇄ 1 and 1 ⇄ 2 via 1
        let adj = vec![vec![1], vec![0, 2], vec![1]];
        let cycles = sorted(simple_cycles(&adj, None).cycles);
        assert_eq!(cycles, vec![vec![0, 1], vec![1, 2]]);
    }

    #[test]
    fn test_disjoint_components() {
        let adj = vec![vec![1], vec![0], vec![3], vec![2], vec![]];
        assert_eq!(simple_cycles(&adj, None).cycles.len(), 2);
    }

    #[test]
    fn test_long_ring() {
        // One cycle through every vertex.
        let n = 5_000;
        let adj: Vec<Vec<usize>> = (0..n).map(|v| vec![(v + 1) % n]).collect();
        let result = simple_cycles(&adj, None);
        assert_eq!(result.cycles.len(), 1);
        assert_eq!(result.cycles[0].len(), n);
        assert_eq!(result.cycles[0][0], 0);
    }

    #[test]
    fn test_blocked_vertex_reused_after_unblock() {
        // 0 → 1 → 2 → 0 and 0 → 2: vertex 2 is reached twice from 0.
        let adj = vec![vec![1, 2], vec![2], vec![0]];
        let cycles = sorted(simple_cycles(&adj, None).cycles);
        assert_eq!(cycles, vec![vec![0, 1, 2], vec![0, 2]]);
    }

    #[test]
    fn test_limit_truncates() {
        let adj = vec![vec![1, 2], vec![0, 2], vec![0, 1]];
        let result = simple_cycles(&adj, Some(2));
        assert_eq!(result.cycles.len(), 2);
        assert!(result.truncated);
    }

    #[test]
    fn test_limit_not_reached() {
        let adj = vec![vec![1], vec![0]];
        let result = simple_cycles(&adj, Some(1));
        assert_eq!(result.cycles, vec![vec![0, 1]]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_zero_limit() {
        let adj = vec![vec![1], vec![0]];
        let result = simple_cycles(&adj, Some(0));
        assert!(result.cycles.is_empty());
        assert!(result.truncated);
    }
}
