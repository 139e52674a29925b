//! Integration tests for tn-routing.

use std::collections::VecDeque;

use proptest::prelude::*;
use tn_core::{Cost, EdgeId, LineNumber, NodeId, Tolerances, nearly_equal};
use tn_graph::{DirectedGraph, IndexMap};
use tn_routing::{
    CostMatrix, LineMatrix, LineSet, PenaltyConfig, RoutingError, all_pairs, penalty,
    shortest_paths,
};

fn build(edges: &[(usize, usize)], nodes: usize, weight: Cost) -> (DirectedGraph, Vec<NodeId>) {
    let mut graph = DirectedGraph::new();
    let ids: Vec<NodeId> = (0..nodes).map(|i| graph.insert_node(format!("N{i}"))).collect();
    for &(s, d) in edges {
        graph.connect(ids[s], ids[d], weight).unwrap();
    }
    (graph, ids)
}

fn hop_counts(edges: &[(usize, usize)], nodes: usize, source: usize) -> Vec<Option<usize>> {
    let mut hops = vec![None; nodes];
    hops[source] = Some(0);
    let mut queue = VecDeque::from([source]);
    while let Some(current) = queue.pop_front() {
        let here = hops[current].unwrap_or(0);
        for &(s, d) in edges {
            if s == current && hops[d].is_none() {
                hops[d] = Some(here + 1);
                queue.push_back(d);
            }
        }
    }
    hops
}

#[test]
fn hand_built_matrices() {
    // Matrices supplied directly rather than derived from the graph.
    let (graph, _) = build(&[(0, 1), (1, 2), (0, 2)], 3, 1.0);
    let inf = Cost::INFINITY;
    let costs = CostMatrix::from_rows(vec![
        vec![inf, 1.0, 5.0],
        vec![inf, inf, 1.0],
        vec![inf, inf, inf],
    ])
    .unwrap();
    let on = |n: u32| -> LineSet { [LineNumber(n)].into_iter().collect() };
    let lines = LineMatrix::from_rows(vec![
        vec![LineSet::new(), on(1), on(2)],
        vec![LineSet::new(), LineSet::new(), on(1)],
        vec![LineSet::new(), LineSet::new(), LineSet::new()],
    ])
    .unwrap();

    let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::default()).unwrap();
    // 0 -> 1 -> 2 on line 1: 1 + 1 (board) + 1 + 0 = 3, direct on line 2: 5 + 1 = 6
    assert_eq!(result.cost(2), Some(3.0));
    assert_eq!(result.path_to(2), Some(vec![0, 1, 2]));
}

#[test]
fn absent_matrix_entry_blocks_graph_edge() {
    let (graph, _) = build(&[(0, 1)], 2, 1.0);
    let costs = CostMatrix::unconnected(2);
    let lines = LineMatrix::new(2);
    let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::default()).unwrap();
    assert!(!result.is_reachable(1));
}

#[test]
fn empty_graph_rejects_any_source() {
    let graph = DirectedGraph::new();
    let err = shortest_paths(
        &graph,
        &CostMatrix::unconnected(0),
        &LineMatrix::new(0),
        0,
        &PenaltyConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, RoutingError::SourceOutOfBounds { index: 0, len: 0 });
}

#[test]
fn huge_transfer_penalty_prefers_walking() {
    // 0 -> 1 -> 2 on line 1, 0 -> 2 on foot; all edges cost 1.
    // Walking costs 1 + 10 = 11 against 1 + 100 + 1 + 0 for the ride.
    let (graph, ids) = build(&[(0, 1), (1, 2), (0, 2)], 3, 1.0);
    let index = IndexMap::from_graph(&graph);
    let costs = CostMatrix::from_graph(&graph, &index).unwrap();
    let route = [
        graph.edge_between(ids[0], ids[1]).unwrap().id,
        graph.edge_between(ids[1], ids[2]).unwrap().id,
    ];
    let lines =
        LineMatrix::from_routes(&graph, &index, &costs, [(LineNumber(1), &route[..])]).unwrap();

    let config = PenaltyConfig {
        walking_penalty: 10.0,
        transfer_penalty: 100.0,
    };
    let result = shortest_paths(&graph, &costs, &lines, 0, &config).unwrap();
    assert_eq!(result.cost(2), Some(11.0));
    assert_eq!(result.path_to(2), Some(vec![0, 2]));

    let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::default()).unwrap();
    assert_eq!(result.cost(2), Some(3.0));
    assert_eq!(result.path_to(2), Some(vec![0, 1, 2]));
}

/// A -> B twice: on line 1 at 5.0, and unserved at 1.0.
fn parallel_ride_and_walk() -> (DirectedGraph, EdgeId) {
    let mut graph = DirectedGraph::new();
    let a = graph.insert_node("A");
    let b = graph.insert_node("B");
    let ride = graph.connect(a, b, 5.0).unwrap();
    graph.connect(a, b, 1.0).unwrap();
    (graph, ride)
}

#[test]
fn parallel_edges_price_the_cheaper_edge_with_its_own_lines() {
    let (graph, ride) = parallel_ride_and_walk();
    let index = IndexMap::from_graph(&graph);
    let costs = CostMatrix::from_graph(&graph, &index).unwrap();
    let route = [ride];
    let lines =
        LineMatrix::from_routes(&graph, &index, &costs, [(LineNumber(1), &route[..])]).unwrap();

    // the 1.0 edge is walked: 1 + 10, never 1 + 1 as if riding line 1
    let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::default()).unwrap();
    assert_eq!(result.cost(1), Some(11.0));
    assert_eq!(result.lines_at(1), Some(&LineSet::new()));
}

#[test]
fn hand_built_matrices_choose_which_parallel_edge_is_priced() {
    let (graph, _) = parallel_ride_and_walk();
    let inf = Cost::INFINITY;
    let on_line: LineSet = [LineNumber(1)].into_iter().collect();

    // Price the line edge explicitly.
    let costs = CostMatrix::from_rows(vec![vec![inf, 5.0], vec![inf, inf]]).unwrap();
    let lines = LineMatrix::from_rows(vec![
        vec![LineSet::new(), on_line.clone()],
        vec![LineSet::new(), LineSet::new()],
    ])
    .unwrap();
    let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::default()).unwrap();
    assert_eq!(result.cost(1), Some(6.0));
    assert_eq!(result.lines_at(1), Some(&on_line));

    // Price the walkway instead.
    let costs = CostMatrix::from_rows(vec![vec![inf, 1.0], vec![inf, inf]]).unwrap();
    let lines = LineMatrix::new(2);
    let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::default()).unwrap();
    assert_eq!(result.cost(1), Some(11.0));
}

proptest! {
    #[test]
    fn uniform_weights_without_penalties_follow_hop_count(
        edges in prop::collection::vec((0usize..7, 0usize..7), 0..25),
        weight in 0.1_f64..10.0,
    ) {
        let (graph, _) = build(&edges, 7, weight);
        let index = IndexMap::from_graph(&graph);
        let costs = CostMatrix::from_graph(&graph, &index).unwrap();
        let lines = LineMatrix::new(7);
        let result = shortest_paths(&graph, &costs, &lines, 0, &PenaltyConfig::none()).unwrap();

        let hops = hop_counts(&edges, 7, 0);
        let tol = Tolerances::default();
        for target in 0..7 {
            match hops[target] {
                Some(h) => {
                    let cost = result.cost(target).unwrap();
                    prop_assert!(nearly_equal(cost, h as f64 * weight, tol));
                }
                None => prop_assert_eq!(result.cost(target), None),
            }
        }
    }

    #[test]
    fn reported_cost_replays_along_path(
        edges in prop::collection::vec((0usize..6, 0usize..6, 0.0_f64..5.0), 0..20),
        memberships in prop::collection::vec((0usize..20, 1u32..4), 0..20),
    ) {
        let mut graph = DirectedGraph::new();
        let ids: Vec<NodeId> = (0..6).map(|i| graph.insert_node(format!("N{i}"))).collect();
        let mut edge_ids = Vec::new();
        for &(s, d, w) in &edges {
            edge_ids.push(graph.connect(ids[s], ids[d], w).unwrap());
        }
        let index = IndexMap::from_graph(&graph);
        let costs = CostMatrix::from_graph(&graph, &index).unwrap();
        let mut lines = LineMatrix::new(6);
        for &(e, line) in &memberships {
            if let Some(&(s, d, _)) = edges.get(e) {
                lines.assign(s, d, LineNumber(line)).unwrap();
            }
        }
        let config = PenaltyConfig::default();

        for (source, result) in all_pairs(&graph, &costs, &lines, &config).unwrap().iter().enumerate() {
            prop_assert_eq!(result.cost(source), Some(0.0));
            for target in 0..6 {
                let Some(path) = result.path_to(target) else {
                    prop_assert!(!result.is_reachable(target));
                    continue;
                };
                let mut total = 0.0;
                let mut riding = LineSet::new();
                for hop in path.windows(2) {
                    let (extra, next) = penalty(&config, &riding, lines.get(hop[0], hop[1]));
                    total = total + costs.get(hop[0], hop[1]) + extra;
                    riding = next;
                }
                prop_assert_eq!(Some(total), result.cost(target));
                prop_assert_eq!(Some(&riding), result.lines_at(target));
            }
        }
    }
}
