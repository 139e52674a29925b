//! Transfer-aware single-source shortest paths.
//!
//! Dijkstra with a linear-scan frontier. Each relaxation adds the penalty for
//! the step to the matrix cost, and remembers which lines the traveller is
//! riding at every node so later penalties can be evaluated. Cost,
//! predecessor and line set of a node are always written together.

use rayon::prelude::*;
use tn_core::{Cost, NodeId};
use tn_graph::{DirectedGraph, IndexMap};
use tracing::{debug, trace};

use crate::config::PenaltyConfig;
use crate::error::{RoutingError, RoutingResult};
use crate::matrix::{CostMatrix, LineMatrix};
use crate::penalty::{LineSet, penalty};

/// Result of one single-source search. Indices are graph node positions.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    source: usize,
    costs: Vec<Cost>,
    predecessors: Vec<Option<usize>>,
    lines: Vec<LineSet>,
}

impl ShortestPaths {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of nodes covered.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Cheapest cost to `target`, or `None` if unreachable.
    pub fn cost(&self, target: usize) -> Option<Cost> {
        self.costs.get(target).copied().filter(|c| c.is_finite())
    }

    pub fn is_reachable(&self, target: usize) -> bool {
        self.cost(target).is_some()
    }

    /// Raw costs; unreachable nodes hold `Cost::INFINITY`.
    pub fn costs(&self) -> &[Cost] {
        &self.costs
    }

    /// Node preceding `target` on its cheapest path.
    pub fn predecessor(&self, target: usize) -> Option<usize> {
        self.predecessors.get(target).copied().flatten()
    }

    pub fn predecessors(&self) -> &[Option<usize>] {
        &self.predecessors
    }

    /// Lines ridden on arrival at `target` (empty when arriving on foot).
    pub fn lines_at(&self, target: usize) -> Option<&LineSet> {
        if self.is_reachable(target) {
            self.lines.get(target)
        } else {
            None
        }
    }

    /// Node indices from the source to `target`, both inclusive.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}

/// Validated routing inputs, reusable across many sources.
#[derive(Debug)]
pub struct Router<'a> {
    /// Deduplicated neighbour indices per node, in edge insertion order.
    adjacency: Vec<Vec<usize>>,
    costs: &'a CostMatrix,
    lines: &'a LineMatrix,
    config: PenaltyConfig,
}

impl<'a> Router<'a> {
    /// Check that the matrices match the graph and the penalties are valid.
    pub fn new(
        graph: &DirectedGraph,
        costs: &'a CostMatrix,
        lines: &'a LineMatrix,
        config: PenaltyConfig,
    ) -> RoutingResult<Self> {
        config.validate()?;

        let n = graph.node_count();
        if costs.dim() != n {
            return Err(RoutingError::DimensionMismatch {
                what: "cost matrix",
                expected: n,
                actual: costs.dim(),
            });
        }
        if lines.dim() != n {
            return Err(RoutingError::DimensionMismatch {
                what: "line matrix",
                expected: n,
                actual: lines.dim(),
            });
        }

        let index = IndexMap::from_graph(graph);
        let mut adjacency = Vec::with_capacity(n);
        for &id in index.node_ids() {
            adjacency.push(neighbour_indices(graph, &index, id)?);
        }

        Ok(Self {
            adjacency,
            costs,
            lines,
            config,
        })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Run the search from node position `source`.
    pub fn from_source(&self, source: usize) -> RoutingResult<ShortestPaths> {
        let n = self.node_count();
        if source >= n {
            return Err(RoutingError::SourceOutOfBounds { index: source, len: n });
        }

        let mut costs = vec![Cost::INFINITY; n];
        let mut predecessors = vec![None; n];
        let mut riding = vec![LineSet::new(); n];
        let mut visited = vec![false; n];
        costs[source] = 0.0;

        while let Some(current) = cheapest_unvisited(&costs, &visited) {
            visited[current] = true;

            for &next in &self.adjacency[current] {
                if visited[next] {
                    continue;
                }
                let (extra, continuing) =
                    penalty(&self.config, &riding[current], self.lines.get(current, next));
                let candidate = costs[current] + self.costs.get(current, next) + extra;
                if candidate < costs[next] {
                    trace!(from = current, to = next, candidate, penalty = extra, "relaxed");
                    costs[next] = candidate;
                    predecessors[next] = Some(current);
                    riding[next] = continuing;
                }
            }
        }

        let reachable = costs.iter().filter(|c| c.is_finite()).count();
        debug!(source, nodes = n, reachable, "shortest paths computed");

        Ok(ShortestPaths {
            source,
            costs,
            predecessors,
            lines: riding,
        })
    }

    /// One search per source node, run in parallel. Element `i` has source `i`.
    pub fn all_sources(&self) -> RoutingResult<Vec<ShortestPaths>> {
        (0..self.node_count())
            .into_par_iter()
            .map(|source| self.from_source(source))
            .collect()
    }
}

/// Transfer-aware shortest paths from node position `source`.
///
/// `costs` and `lines` must be indexed in the graph's node order. Nodes that
/// cannot be reached keep an infinite cost and no predecessor.
pub fn shortest_paths(
    graph: &DirectedGraph,
    costs: &CostMatrix,
    lines: &LineMatrix,
    source: usize,
    config: &PenaltyConfig,
) -> RoutingResult<ShortestPaths> {
    Router::new(graph, costs, lines, *config)?.from_source(source)
}

/// Shortest paths from every node; element `i` has source `i`.
pub fn all_pairs(
    graph: &DirectedGraph,
    costs: &CostMatrix,
    lines: &LineMatrix,
    config: &PenaltyConfig,
) -> RoutingResult<Vec<ShortestPaths>> {
    Router::new(graph, costs, lines, *config)?.all_sources()
}

fn neighbour_indices(
    graph: &DirectedGraph,
    index: &IndexMap,
    id: NodeId,
) -> RoutingResult<Vec<usize>> {
    let mut out: Vec<usize> = Vec::new();
    for edge in graph.outgoing_edges(id) {
        let j = index.node_idx(edge.destination)?;
        if !out.contains(&j) {
            out.push(j);
        }
    }
    Ok(out)
}

/// Lowest-cost unvisited node with a finite cost; ties go to the lowest index.
fn cheapest_unvisited(costs: &[Cost], visited: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &cost) in costs.iter().enumerate() {
        if visited[i] || !cost.is_finite() {
            continue;
        }
        match best {
            Some(b) if costs[b] <= cost => {}
            _ => best = Some(i),
        }
    }
    best
}
