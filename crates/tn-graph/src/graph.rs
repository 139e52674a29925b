//! Core graph data structures.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use tn_core::{Cost, EdgeId, Id, NodeId, ensure_cost};
use tracing::debug;

use crate::error::{Entity, GraphError, GraphResult};

/// A stop in the transit network.
///
/// Identity is the id alone: two nodes with the same id are equal even if
/// their labels differ.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

impl Node {
    /// Create a node with a freshly minted id.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Id::new(), label)
    }

    pub fn with_id(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A directed, weighted segment between two stops.
///
/// Traversable only from `source` to `destination`. Identity is the id alone.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub destination: NodeId,
    pub cost: Cost,
}

impl Edge {
    /// Create an edge with a freshly minted id.
    pub fn new(source: NodeId, destination: NodeId, cost: Cost) -> Self {
        Self::with_id(Id::new(), source, destination, cost)
    }

    pub fn with_id(id: EdgeId, source: NodeId, destination: NodeId, cost: Cost) -> Self {
        Self {
            id,
            source,
            destination,
            cost,
        }
    }

    /// Whether either endpoint is `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.destination == node
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A mutable directed graph of stops and segments.
///
/// Nodes and edges are kept in insertion order; a node's position is the
/// row/column it occupies in routing matrices. Invariants held at all times:
/// - node ids are unique, edge ids are unique
/// - every edge endpoint is a node of this graph
/// - every edge cost is finite and non-negative
///
/// The graph does no locking. Mutation takes `&mut self`, so shared readers
/// (path search, routing) and a single writer cannot overlap.
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,

    /// Reverse lookup: id -> position in `nodes`.
    node_slots: HashMap<NodeId, usize>,

    /// Reverse lookup: id -> position in `edges`.
    edge_slots: HashMap<EdgeId, usize>,
}

impl DirectedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Fails if a node with the same id is present.
    pub fn add_node(&mut self, node: Node) -> GraphResult<NodeId> {
        if self.node_slots.contains_key(&node.id) {
            return Err(GraphError::DuplicateId {
                what: Entity::Node,
                id: node.id,
            });
        }
        let id = node.id;
        self.node_slots.insert(id, self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Add a node with a fresh id and return that id.
    pub fn insert_node(&mut self, label: impl Into<String>) -> NodeId {
        let node = Node::new(label);
        let id = node.id;
        self.node_slots.insert(id, self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Add an edge.
    ///
    /// Checked in order: duplicate id, source present, destination present,
    /// cost valid. A rejected edge leaves the graph untouched.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<EdgeId> {
        if self.edge_slots.contains_key(&edge.id) {
            return Err(GraphError::DuplicateId {
                what: Entity::Edge,
                id: edge.id,
            });
        }
        self.check_edge(&edge)?;

        let id = edge.id;
        self.edge_slots.insert(id, self.edges.len());
        self.edges.push(edge);
        Ok(id)
    }

    /// Add an edge with a fresh id between two existing nodes.
    pub fn connect(
        &mut self,
        source: NodeId,
        destination: NodeId,
        cost: Cost,
    ) -> GraphResult<EdgeId> {
        self.add_edge(Edge::new(source, destination, cost))
    }

    /// Remove a node by id.
    ///
    /// Rejected with `NodeInUse` while any edge still references the node, so
    /// the graph never holds dangling edges. See `remove_node_cascade`.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let slot = self.node_slot(id)?;
        let incident = self.edges.iter().filter(|e| e.touches(id)).count();
        if incident > 0 {
            return Err(GraphError::NodeInUse {
                node: id,
                edges: incident,
            });
        }
        Ok(self.take_node(slot))
    }

    /// Remove a node together with every edge that starts or ends at it.
    ///
    /// Returns the node and the removed edges in their former order.
    pub fn remove_node_cascade(&mut self, id: NodeId) -> GraphResult<(Node, Vec<Edge>)> {
        let slot = self.node_slot(id)?;

        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            std::mem::take(&mut self.edges)
                .into_iter()
                .partition(|e| e.touches(id));
        self.edges = kept;
        if !removed.is_empty() {
            self.reindex_edges(0);
            debug!(node = %id, edges = removed.len(), "cascaded node removal");
        }

        Ok((self.take_node(slot), removed))
    }

    /// Remove an edge by id.
    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let slot = self
            .edge_slots
            .get(&id)
            .copied()
            .ok_or_else(|| GraphError::edge_not_found(id))?;
        let edge = self.edges.remove(slot);
        self.edge_slots.remove(&id);
        self.reindex_edges(slot);
        Ok(edge)
    }

    /// Replace the node with the same id, keeping its position.
    pub fn update_node(&mut self, node: Node) -> GraphResult<()> {
        let slot = self.node_slot(node.id)?;
        self.nodes[slot] = node;
        Ok(())
    }

    /// Replace the edge with the same id, keeping its position.
    ///
    /// The replacement must satisfy the same endpoint and cost checks as
    /// `add_edge`.
    pub fn update_edge(&mut self, edge: Edge) -> GraphResult<()> {
        let slot = self
            .edge_slots
            .get(&edge.id)
            .copied()
            .ok_or_else(|| GraphError::edge_not_found(edge.id))?;
        self.check_edge(&edge)?;
        self.edges[slot] = edge;
        Ok(())
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edge_slots.get(&id).map(|&slot| &self.edges[slot])
    }

    /// Destinations of all edges leaving `id`, in edge insertion order.
    ///
    /// Empty for a node without outgoing edges or a node not in the graph.
    /// A destination reached by several parallel edges appears once per edge.
    pub fn neighbours(&self, id: NodeId) -> Vec<&Node> {
        self.outgoing_edges(id)
            .filter_map(|e| self.node(e.destination))
            .collect()
    }

    /// Edges leaving `id`, in insertion order.
    pub fn outgoing_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// First edge (in insertion order) going from `source` to `destination`.
    pub fn edge_between(&self, source: NodeId, destination: NodeId) -> Option<&Edge> {
        self.outgoing_edges(source)
            .find(|e| e.destination == destination)
    }

    /// First node (in insertion order) carrying `label`.
    pub fn find_node_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    /// Position of a node in insertion order (its matrix row/column).
    pub fn node_position(&self, id: NodeId) -> Option<usize> {
        self.node_slots.get(&id).copied()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_slots.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_slots.contains_key(&id)
    }

    /// Return all nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_slot(&self, id: NodeId) -> GraphResult<usize> {
        self.node_slots
            .get(&id)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    fn check_edge(&self, edge: &Edge) -> GraphResult<()> {
        if !self.contains_node(edge.source) {
            return Err(GraphError::node_not_found(edge.source));
        }
        if !self.contains_node(edge.destination) {
            return Err(GraphError::node_not_found(edge.destination));
        }
        ensure_cost(edge.cost, "edge cost").map_err(|_| GraphError::InvalidCost {
            edge: edge.id,
            value: edge.cost,
        })?;
        Ok(())
    }

    fn take_node(&mut self, slot: usize) -> Node {
        let node = self.nodes.remove(slot);
        self.node_slots.remove(&node.id);
        for (i, n) in self.nodes.iter().enumerate().skip(slot) {
            self.node_slots.insert(n.id, i);
        }
        node
    }

    fn reindex_edges(&mut self, from: usize) {
        if from == 0 {
            self.edge_slots.clear();
        }
        for (i, e) in self.edges.iter().enumerate().skip(from) {
            self.edge_slots.insert(e.id, i);
        }
    }
}
