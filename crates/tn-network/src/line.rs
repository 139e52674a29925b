//! Transit lines.

use tn_core::{EdgeId, LineNumber, NodeId};
use tn_graph::DirectedGraph;

/// A transit line: a first stop followed by a contiguous run of graph edges.
///
/// The line only stores edge ids; the edges themselves live in the graph and
/// may be shared by several lines running over the same segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: LineNumber,
    first_stop: NodeId,
    route: Vec<EdgeId>,
}

impl Line {
    pub fn new(number: LineNumber, first_stop: NodeId) -> Self {
        Self {
            number,
            first_stop,
            route: Vec::new(),
        }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn first_stop(&self) -> NodeId {
        self.first_stop
    }

    /// Segments in travel order.
    pub fn route(&self) -> &[EdgeId] {
        &self.route
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    pub fn serves(&self, edge: EdgeId) -> bool {
        self.route.contains(&edge)
    }

    /// Where the line currently ends. `None` if its last segment is no
    /// longer in `graph`.
    pub fn last_stop(&self, graph: &DirectedGraph) -> Option<NodeId> {
        match self.route.last() {
            Some(&edge) => graph.edge(edge).map(|e| e.destination),
            None => Some(self.first_stop),
        }
    }

    /// Stops in travel order: the first stop, then each segment's destination.
    pub fn stops(&self, graph: &DirectedGraph) -> Vec<NodeId> {
        std::iter::once(self.first_stop)
            .chain(
                self.route
                    .iter()
                    .filter_map(|&edge| graph.edge(edge).map(|e| e.destination)),
            )
            .collect()
    }

    pub(crate) fn push_segment(&mut self, edge: EdgeId) {
        self.route.push(edge);
    }
}
