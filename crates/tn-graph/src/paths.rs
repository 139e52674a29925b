//! Exhaustive simple-path enumeration.
//!
//! Depth-first search from a start node that records every path reaching the
//! end node. A node may appear at most once per path, which is what makes the
//! search terminate on cyclic graphs. A branch stops as soon as it reaches the
//! end node.
//!
//! The number of simple paths can grow exponentially with graph density, so
//! callers facing untrusted graphs should pass `SearchLimits`.

use std::collections::HashSet;

use tn_core::NodeId;
use tracing::{debug, trace};

use crate::graph::DirectedGraph;

/// Budget for `DirectedGraph::find_paths_bounded`. Default is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits {
    /// Stop after this many paths have been found.
    pub max_paths: Option<usize>,
    /// Do not follow paths longer than this many edges.
    pub max_depth: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Outcome of a bounded path search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSearch {
    /// Paths in DFS visitation order, each from start to end inclusive.
    pub paths: Vec<Vec<NodeId>>,
    /// True if a limit cut the search short, so `paths` may be incomplete.
    pub truncated: bool,
}

impl DirectedGraph {
    /// Every simple path from `start` to `end`.
    ///
    /// Paths come out in DFS order, following each node's edges in insertion
    /// order. Empty if either node is missing or `end` is unreachable.
    /// `start == end` yields the single one-node path.
    pub fn find_all_paths(&self, start: NodeId, end: NodeId) -> Vec<Vec<NodeId>> {
        self.find_paths_bounded(start, end, SearchLimits::unbounded())
            .paths
    }

    /// Like `find_all_paths`, but gives up once `limits` are hit.
    pub fn find_paths_bounded(
        &self,
        start: NodeId,
        end: NodeId,
        limits: SearchLimits,
    ) -> PathSearch {
        if !self.contains_node(start) || !self.contains_node(end) {
            return PathSearch::default();
        }

        let mut walker = PathWalker {
            graph: self,
            end,
            limits,
            path: Vec::new(),
            on_path: HashSet::new(),
            found: Vec::new(),
            truncated: false,
        };
        walker.visit(start);

        debug!(
            %start,
            %end,
            paths = walker.found.len(),
            truncated = walker.truncated,
            "path enumeration finished"
        );

        PathSearch {
            paths: walker.found,
            truncated: walker.truncated,
        }
    }
}

struct PathWalker<'g> {
    graph: &'g DirectedGraph,
    end: NodeId,
    limits: SearchLimits,
    /// Current branch, start first.
    path: Vec<NodeId>,
    /// Same nodes as `path`, for O(1) membership.
    on_path: HashSet<NodeId>,
    found: Vec<Vec<NodeId>>,
    truncated: bool,
}

impl PathWalker<'_> {
    /// Returns false once the path budget stops the search.
    fn visit(&mut self, node: NodeId) -> bool {
        if node == self.end {
            if self.budget_spent() {
                return false;
            }
            self.path.push(node);
            trace!(len = self.path.len(), "path found");
            self.found.push(self.path.clone());
            self.path.pop();
            return true;
        }

        self.path.push(node);
        self.on_path.insert(node);
        let keep_going = self.expand(node);
        self.path.pop();
        self.on_path.remove(&node);
        keep_going
    }

    fn expand(&mut self, node: NodeId) -> bool {
        let graph = self.graph;
        let depth = self.path.len() - 1;

        if let Some(max) = self.limits.max_depth {
            if depth >= max {
                if graph
                    .outgoing_edges(node)
                    .any(|e| !self.on_path.contains(&e.destination))
                {
                    self.truncated = true;
                }
                return true;
            }
        }

        for edge in graph.outgoing_edges(node) {
            if self.on_path.contains(&edge.destination) {
                continue;
            }
            if self.budget_spent() || !self.visit(edge.destination) {
                return false;
            }
        }
        true
    }

    /// True (and marks the search truncated) when the path budget is used
    /// up but there is still work left.
    fn budget_spent(&mut self) -> bool {
        match self.limits.max_paths {
            Some(max) if self.found.len() >= max => {
                self.truncated = true;
                true
            }
            _ => false,
        }
    }
}
