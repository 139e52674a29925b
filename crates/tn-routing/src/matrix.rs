//! Dense cost and line matrices.
//!
//! Row/column `i` is the node at position `i` of the graph (see
//! [`IndexMap`]). Entries are stored row-major.

use tn_core::{Cost, EdgeId, LineNumber, TnError, ensure_cost_or_infinite};
use tn_graph::{DirectedGraph, IndexMap};
use tracing::trace;

use crate::error::{RoutingError, RoutingResult};
use crate::penalty::LineSet;

/// Direct travel cost between every ordered pair of nodes.
///
/// `Cost::INFINITY` means there is no direct edge. Every other entry is
/// finite and non-negative; constructors reject anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    dim: usize,
    data: Vec<Cost>,
}

impl CostMatrix {
    /// An `n x n` matrix with no connections.
    pub fn unconnected(dim: usize) -> Self {
        Self {
            dim,
            data: vec![Cost::INFINITY; dim * dim],
        }
    }

    /// Build from nested rows, checking shape and entries.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> RoutingResult<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(RoutingError::InvalidInput {
                    what: format!(
                        "cost matrix is not square: row {row} has {} entries, expected {dim}",
                        values.len()
                    ),
                });
            }
            for (col, value) in values.into_iter().enumerate() {
                data.push(checked(row, col, value)?);
            }
        }
        Ok(Self { dim, data })
    }

    /// Cost matrix of a graph: the cheapest edge for each ordered pair.
    pub fn from_graph(graph: &DirectedGraph, index: &IndexMap) -> RoutingResult<Self> {
        let mut matrix = Self::unconnected(index.node_count());
        for edge in graph.edges() {
            let row = index.node_idx(edge.source)?;
            let col = index.node_idx(edge.destination)?;
            if edge.cost < matrix.get(row, col) {
                matrix.set(row, col, edge.cost)?;
            }
        }
        Ok(matrix)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not below `dim()`. Use [`try_get`](Self::try_get)
    /// for unchecked indices.
    pub fn get(&self, row: usize, col: usize) -> Cost {
        assert!(col < self.dim, "column {col} out of bounds");
        self.data[row * self.dim + col]
    }

    /// Entry at `(row, col)`, or `None` outside the matrix.
    pub fn try_get(&self, row: usize, col: usize) -> Option<Cost> {
        (row < self.dim && col < self.dim).then(|| self.data[row * self.dim + col])
    }

    /// Overwrite one entry.
    pub fn set(&mut self, row: usize, col: usize, value: Cost) -> RoutingResult<()> {
        check_bounds(self.dim, row, col)?;
        self.data[row * self.dim + col] = checked(row, col, value)?;
        Ok(())
    }
}

fn check_bounds(dim: usize, row: usize, col: usize) -> RoutingResult<()> {
    if row >= dim {
        return Err(TnError::IndexOob {
            what: "matrix row",
            index: row,
            len: dim,
        }
        .into());
    }
    if col >= dim {
        return Err(TnError::IndexOob {
            what: "matrix column",
            index: col,
            len: dim,
        }
        .into());
    }
    Ok(())
}

fn checked(row: usize, col: usize, value: Cost) -> RoutingResult<Cost> {
    ensure_cost_or_infinite(value, "matrix cell")
        .map_err(|_| RoutingError::InvalidCost { row, col, value })
}

/// Lines serving the direct edge between every ordered pair of nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatrix {
    dim: usize,
    data: Vec<LineSet>,
}

impl LineMatrix {
    /// An `n x n` matrix where no edge is served by any line.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            data: vec![LineSet::new(); dim * dim],
        }
    }

    /// Build from nested rows, checking shape.
    pub fn from_rows(rows: Vec<Vec<LineSet>>) -> RoutingResult<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(RoutingError::InvalidInput {
                    what: format!(
                        "line matrix is not square: row {row} has {} entries, expected {dim}",
                        values.len()
                    ),
                });
            }
            data.extend(values);
        }
        Ok(Self { dim, data })
    }

    /// Line matrix from line routes given as edge sequences, matching `costs`.
    ///
    /// A route edge marks its (source, destination) cell with the route's line
    /// number only if the edge's cost is the one `costs` holds for that cell.
    /// When parallel edges join two stops, the cell therefore lists the lines
    /// of the edge actually priced, never those of a dearer sibling.
    pub fn from_routes<'a, I>(
        graph: &DirectedGraph,
        index: &IndexMap,
        costs: &CostMatrix,
        routes: I,
    ) -> RoutingResult<Self>
    where
        I: IntoIterator<Item = (LineNumber, &'a [EdgeId])>,
    {
        let dim = index.node_count();
        if costs.dim() != dim {
            return Err(RoutingError::DimensionMismatch {
                what: "cost matrix",
                expected: dim,
                actual: costs.dim(),
            });
        }

        let mut matrix = Self::new(dim);
        for (line, edges) in routes {
            for &edge_id in edges {
                let edge = graph
                    .edge(edge_id)
                    .ok_or_else(|| RoutingError::InvalidInput {
                        what: format!("line {line} uses unknown edge {edge_id}"),
                    })?;
                let row = index.node_idx(edge.source)?;
                let col = index.node_idx(edge.destination)?;
                if costs.try_get(row, col) != Some(edge.cost) {
                    trace!(%line, edge = %edge_id, "line edge undercut by a cheaper parallel edge");
                    continue;
                }
                matrix.assign(row, col, line)?;
            }
        }
        Ok(matrix)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Lines at `(row, col)`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is not below `dim()`.
    pub fn get(&self, row: usize, col: usize) -> &LineSet {
        assert!(col < self.dim, "column {col} out of bounds");
        &self.data[row * self.dim + col]
    }

    /// Lines at `(row, col)`, or `None` outside the matrix.
    pub fn try_get(&self, row: usize, col: usize) -> Option<&LineSet> {
        (row < self.dim && col < self.dim).then(|| &self.data[row * self.dim + col])
    }

    /// Mark the edge `(row, col)` as served by `line`.
    pub fn assign(&mut self, row: usize, col: usize, line: LineNumber) -> RoutingResult<()> {
        check_bounds(self.dim, row, col)?;
        self.data[row * self.dim + col].insert(line);
        Ok(())
    }
}
