//! Exact rank computations for boundary operators

use crate::graph::CommunityGraph;
use ndarray::Array2;
use std::collections::{BTreeMap, HashMap};

/// Pivots smaller than this are treated as zero
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Integer-valued sparse matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseMatrix {
    pub rows: usize,
    pub cols: usize,
    entries: BTreeMap<(usize, usize), i32>,
}

impl SparseMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: BTreeMap::new(),
        }
    }

    /// Set an entry; zero removes it
    pub fn set(&mut self, row: usize, col: usize, value: i32) {
        if value != 0 {
            self.entries.insert((row, col), value);
        } else {
            self.entries.remove(&(row, col));
        }
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.entries.get(&(row, col)).copied().unwrap_or(0)
    }

    /// Number of stored non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn to_dense(&self) -> Array2<f64> {
        let mut mat = Array2::<f64>::zeros((self.rows, self.cols));
        for (&(row, col), &value) in &self.entries {
            if row < self.rows && col < self.cols {
                mat[[row, col]] = value as f64;
            }
        }
        mat
    }

    /// Rank by Gaussian elimination with partial pivoting
    pub fn rank(&self) -> usize {
        if self.rows == 0 || self.cols == 0 {
            return 0;
        }

        let mut mat = self.to_dense();
        let mut rank = 0;

        for col in 0..self.cols {
            if rank == self.rows {
                break;
            }

            let mut pivot = rank;
            for row in (rank + 1)..self.rows {
                if mat[[row, col]].abs() > mat[[pivot, col]].abs() {
                    pivot = row;
                }
            }

            if mat[[pivot, col]].abs() < ZERO_TOLERANCE {
                continue;
            }

            if pivot != rank {
                for j in 0..self.cols {
                    mat.swap((rank, j), (pivot, j));
                }
            }

            for row in (rank + 1)..self.rows {
                if mat[[row, col]].abs() > ZERO_TOLERANCE {
                    let factor = mat[[row, col]] / mat[[rank, col]];
                    for j in col..self.cols {
                        let above = mat[[rank, j]];
                        mat[[row, j]] -= factor * above;
                    }
                }
            }

            rank += 1;
        }

        rank
    }

    /// Dimension of the null space: columns - rank
    pub fn kernel_dim(&self) -> usize {
        self.cols - self.rank()
    }
}

/// Vertex-by-edge boundary operator of the graph's 1-skeleton.
///
/// Column `e` holds -1 at the source's row and +1 at the target's row.
pub fn boundary_operator(graph: &CommunityGraph) -> SparseMatrix {
    let position: HashMap<_, _> = graph
        .members()
        .iter()
        .enumerate()
        .map(|(i, m)| (m.id, i))
        .collect();

    let mut matrix = SparseMatrix::new(graph.member_count(), graph.relationship_count());
    for (col, r) in graph.relationships().iter().enumerate() {
        if let (Some(&source), Some(&target)) = (position.get(&r.source), position.get(&r.target)) {
            matrix.set(source, col, -1);
            matrix.set(target, col, 1);
        }
    }
    matrix
}

/// Exact (b0, b1) from the rank of the boundary operator
pub fn exact_betti_numbers(graph: &CommunityGraph) -> (usize, usize) {
    let boundary = boundary_operator(graph);
    let rank = boundary.rank();
    log::debug!(
        "Boundary operator {}x{} with {} entries has rank {}",
        boundary.rows,
        boundary.cols,
        boundary.nnz(),
        rank
    );
    (graph.member_count() - rank, boundary.kernel_dim())
}
