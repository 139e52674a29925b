//! The transit network: stops, lines, and the queries over them.

use tn_core::{Cost, EdgeId, LineNumber, NodeId};
use tn_graph::{DirectedGraph, Entity, GraphError, IndexMap, Node};
use tn_routing::{CostMatrix, LineMatrix, shortest_paths};
use tracing::{debug, warn};

use crate::config::NetworkConfig;
use crate::error::{NetworkError, NetworkResult};
use crate::line::Line;

/// A recommended journey.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Stops from origin to destination, both inclusive.
    pub stops: Vec<NodeId>,
    /// Edge costs plus walking/transfer penalties.
    pub cost: Cost,
}

/// Stops connected by segments, with lines running over those segments.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: DirectedGraph,
    lines: Vec<Line>,
    config: NetworkConfig,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// Add a stop and return its id.
    pub fn add_point(&mut self, label: impl Into<String>) -> NodeId {
        self.graph.insert_node(label)
    }

    /// All stops in insertion order.
    pub fn points(&self) -> &[Node] {
        self.graph.nodes()
    }

    pub fn point(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    /// Start a new line at `first_stop`.
    pub fn add_line(&mut self, number: LineNumber, first_stop: NodeId) -> NetworkResult<()> {
        if self.line(number).is_some() {
            return Err(NetworkError::DuplicateLine(number));
        }
        if !self.graph.contains_node(first_stop) {
            return Err(GraphError::NotFound {
                what: Entity::Node,
                id: first_stop,
            }
            .into());
        }
        self.lines.push(Line::new(number, first_stop));
        Ok(())
    }

    /// Extend a line from its current last stop to `stop`.
    ///
    /// If a segment between the two stops already exists (for example one
    /// laid by another line) it is shared and keeps its existing cost.
    pub fn add_stop(
        &mut self,
        number: LineNumber,
        stop: NodeId,
        cost: Cost,
    ) -> NetworkResult<EdgeId> {
        let slot = self
            .lines
            .iter()
            .position(|l| l.number() == number)
            .ok_or(NetworkError::LineNotFound(number))?;
        let from = self.lines[slot]
            .last_stop(&self.graph)
            .ok_or(NetworkError::BrokenLine(number))?;

        let edge = self.segment(from, stop, cost)?;
        self.lines[slot].push_segment(edge);
        Ok(edge)
    }

    /// Add a segment served by no line (walked).
    ///
    /// Like `add_stop`, an existing segment between the two stops is shared
    /// rather than doubled, so each ordered pair of stops has at most one
    /// segment and one cost.
    pub fn add_walkway(&mut self, from: NodeId, to: NodeId, cost: Cost) -> NetworkResult<EdgeId> {
        self.segment(from, to, cost)
    }

    /// The segment from `from` to `to`, created if missing.
    fn segment(&mut self, from: NodeId, to: NodeId, cost: Cost) -> NetworkResult<EdgeId> {
        let shared = self.graph.edge_between(from, to).map(|e| (e.id, e.cost));
        match shared {
            Some((id, existing)) => {
                if existing != cost {
                    warn!(
                        edge = %id,
                        existing,
                        requested = cost,
                        "segment shared with different cost; keeping existing"
                    );
                }
                Ok(id)
            }
            None => Ok(self.graph.connect(from, to, cost)?),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, number: LineNumber) -> Option<&Line> {
        self.lines.iter().find(|l| l.number() == number)
    }

    /// Every simple path between two stops, within the configured search limits.
    pub fn possible_paths(&self, start: NodeId, end: NodeId) -> Vec<Vec<NodeId>> {
        let search = self
            .graph
            .find_paths_bounded(start, end, self.config.search);
        if search.truncated {
            warn!(
                paths = search.paths.len(),
                "path search hit its limits; result is incomplete"
            );
        }
        search.paths
    }

    /// Cost matrix in the order of `index`.
    pub fn cost_matrix(&self, index: &IndexMap) -> NetworkResult<CostMatrix> {
        Ok(CostMatrix::from_graph(&self.graph, index)?)
    }

    /// Line matrix in the order of `index`.
    pub fn line_matrix(&self, index: &IndexMap) -> NetworkResult<LineMatrix> {
        let (_, lines) = self.matrices(index)?;
        Ok(lines)
    }

    fn matrices(&self, index: &IndexMap) -> NetworkResult<(CostMatrix, LineMatrix)> {
        let costs = self.cost_matrix(index)?;
        let routes = self.lines.iter().map(|l| (l.number(), l.route()));
        let lines = LineMatrix::from_routes(&self.graph, index, &costs, routes)?;
        Ok((costs, lines))
    }

    /// Cheapest journey between two stops, counting walking and transfer
    /// penalties. `Ok(None)` if `end` cannot be reached.
    pub fn recommended_path(&self, start: NodeId, end: NodeId) -> NetworkResult<Option<Itinerary>> {
        let index = IndexMap::from_graph(&self.graph);
        let source = index.node_idx(start)?;
        let target = index.node_idx(end)?;

        let (costs, lines) = self.matrices(&index)?;
        let result = shortest_paths(&self.graph, &costs, &lines, source, &self.config.penalties)?;

        let Some(path) = result.path_to(target) else {
            debug!(%start, %end, "no recommended path");
            return Ok(None);
        };
        let stops = path
            .into_iter()
            .map(|i| index.node_id(i))
            .collect::<Option<Vec<NodeId>>>();
        Ok(stops.zip(result.cost(target)).map(|(stops, cost)| Itinerary { stops, cost }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tn_graph::ErrorKind;

    #[test]
    fn points_are_counted() {
        let mut network = Network::new();
        for label in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"] {
            network.add_point(label);
        }
        assert_eq!(network.points().len(), 10);
    }

    #[test]
    fn lines_need_unique_numbers_and_known_stops() {
        let mut network = Network::new();
        let a = network.add_point("A");
        for n in 1..=5 {
            network.add_line(LineNumber(n), a).unwrap();
        }
        assert_eq!(network.lines().len(), 5);

        let err = network.add_line(LineNumber(3), a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateId);

        let err = network.add_line(LineNumber(9), tn_core::Id::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(network.lines().len(), 5);
    }

    #[test]
    fn add_stop_extends_line() {
        let mut network = Network::new();
        let a = network.add_point("A");
        let b = network.add_point("B");
        let c = network.add_point("C");
        network.add_line(LineNumber(1), a).unwrap();
        network.add_stop(LineNumber(1), b, 2.0).unwrap();
        network.add_stop(LineNumber(1), c, 3.0).unwrap();

        let line = network.line(LineNumber(1)).unwrap();
        assert_eq!(line.stops(network.graph()), vec![a, b, c]);
        assert_eq!(network.graph().edge_count(), 2);

        let err = network.add_stop(LineNumber(2), c, 1.0).unwrap_err();
        assert!(matches!(err, NetworkError::LineNotFound(LineNumber(2))));
    }

    #[test]
    fn lines_share_segments() {
        let mut network = Network::new();
        let a = network.add_point("A");
        let b = network.add_point("B");
        network.add_line(LineNumber(1), a).unwrap();
        network.add_line(LineNumber(2), a).unwrap();
        let first = network.add_stop(LineNumber(1), b, 2.0).unwrap();
        let second = network.add_stop(LineNumber(2), b, 5.0).unwrap();

        assert_eq!(first, second);
        assert_eq!(network.graph().edge_count(), 1);
        assert_eq!(network.graph().edge(first).map(|e| e.cost), Some(2.0));
    }

    #[test]
    fn walkways_share_segments() {
        let mut network = Network::new();
        let a = network.add_point("A");
        let b = network.add_point("B");
        network.add_line(LineNumber(1), a).unwrap();
        let ride = network.add_stop(LineNumber(1), b, 5.0).unwrap();
        let walk = network.add_walkway(a, b, 1.0).unwrap();

        assert_eq!(ride, walk);
        assert_eq!(network.graph().edge_count(), 1);
        assert_eq!(network.graph().edge(ride).map(|e| e.cost), Some(5.0));

        // the reverse direction is a different segment
        network.add_walkway(b, a, 1.0).unwrap();
        assert_eq!(network.graph().edge_count(), 2);
    }
}
