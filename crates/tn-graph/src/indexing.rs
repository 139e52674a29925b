//! Stable indexing for matrix-based routing.
//!
//! Maps node ids to contiguous indices `0..N` following the graph's node
//! insertion order, which is the row/column order of routing matrices.

use std::collections::HashMap;

use tn_core::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::DirectedGraph;

/// Index map providing contiguous indices for the nodes of a graph snapshot.
///
/// Built once from a graph; it does not follow later mutations.
#[derive(Debug, Clone, Default)]
pub struct IndexMap {
    /// Contiguous list of node IDs (index -> NodeId).
    node_ids: Vec<NodeId>,

    /// Reverse lookup: NodeId -> index.
    node_to_idx: HashMap<NodeId, usize>,
}

impl IndexMap {
    /// Build an index map from a graph.
    pub fn from_graph(graph: &DirectedGraph) -> Self {
        let node_ids: Vec<NodeId> = graph.nodes().iter().map(|n| n.id).collect();
        let node_to_idx = node_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        Self {
            node_ids,
            node_to_idx,
        }
    }

    /// Number of nodes in the index.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Get the contiguous index for a node ID.
    pub fn node_idx(&self, id: NodeId) -> GraphResult<usize> {
        self.node_to_idx
            .get(&id)
            .copied()
            .ok_or_else(|| GraphError::node_not_found(id))
    }

    /// Get the node ID at a contiguous index.
    pub fn node_id(&self, i: usize) -> Option<NodeId> {
        self.node_ids.get(i).copied()
    }

    /// All node IDs in index order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_map_follows_insertion_order() {
        let mut graph = DirectedGraph::new();
        let n1 = graph.insert_node("N1");
        let n2 = graph.insert_node("N2");
        let n3 = graph.insert_node("N3");

        let idx_map = IndexMap::from_graph(&graph);
        assert_eq!(idx_map.node_count(), 3);

        assert_eq!(idx_map.node_idx(n1).unwrap(), 0);
        assert_eq!(idx_map.node_idx(n2).unwrap(), 1);
        assert_eq!(idx_map.node_idx(n3).unwrap(), 2);

        assert_eq!(idx_map.node_id(0), Some(n1));
        assert_eq!(idx_map.node_id(2), Some(n3));
        assert_eq!(idx_map.node_id(3), None);
    }

    #[test]
    fn index_map_invalid_id() {
        let mut graph = DirectedGraph::new();
        graph.insert_node("N1");
        let idx_map = IndexMap::from_graph(&graph);

        let bogus_id = tn_core::Id::new();
        assert!(idx_map.node_idx(bogus_id).is_err());
    }

    #[test]
    fn index_map_after_removal() {
        let mut graph = DirectedGraph::new();
        let n1 = graph.insert_node("N1");
        let n2 = graph.insert_node("N2");
        graph.remove_node(n1).unwrap();

        let idx_map = IndexMap::from_graph(&graph);
        assert_eq!(idx_map.node_idx(n2).unwrap(), 0);
        assert!(idx_map.node_idx(n1).is_err());
    }
}
