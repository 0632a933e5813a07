use crate::{tour, TourError, TourResult};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// One traversed arc of a tour.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RouteStop {
    pub from_node: usize,
    pub to_node: usize,
}

impl RouteStop {
    pub fn new(from_node: usize, to_node: usize) -> Self {
        Self { from_node, to_node }
    }

    pub fn reversed(self) -> Self {
        Self {
            from_node: self.to_node,
            to_node: self.from_node,
        }
    }
}

impl From<(usize, usize)> for RouteStop {
    fn from((from_node, to_node): (usize, usize)) -> Self {
        Self { from_node, to_node }
    }
}

/// Adjacency matrix of the arcs used by a solution. Entry `(i, j)` is set when
/// the tour travels `i -> j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatrix {
    arcs: Array2<bool>,
}

impl RouteMatrix {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            arcs: Array2::from_elem((num_nodes, num_nodes), false),
        }
    }

    pub fn from_arcs(num_nodes: usize, arcs: &[(usize, usize)]) -> TourResult<Self> {
        let mut route = Self::new(num_nodes);
        for &(from, to) in arcs {
            for node in [from, to] {
                if node >= num_nodes {
                    return Err(TourError::InvalidNode { node, num_nodes });
                }
            }
            route.insert(from, to);
        }
        Ok(route)
    }

    pub fn num_nodes(&self) -> usize {
        self.arcs.nrows()
    }

    pub fn insert(&mut self, from: usize, to: usize) {
        self.arcs[[from, to]] = true;
    }

    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.arcs[[from, to]]
    }

    /// Number of set entries.
    pub fn num_arcs(&self) -> usize {
        self.arcs.iter().filter(|&&used| used).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.arcs.iter().any(|&used| used)
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.arcs.row(node).iter().filter(|&&used| used).count()
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.arcs.column(node).iter().filter(|&&used| used).count()
    }

    pub fn successor(&self, node: usize) -> Option<usize> {
        self.arcs.row(node).iter().position(|&used| used)
    }

    pub fn predecessor(&self, node: usize) -> Option<usize> {
        self.arcs.column(node).iter().position(|&used| used)
    }

    /// Nodes with at least one incident arc.
    pub fn nodes_touched(&self) -> usize {
        let rows = self.arcs.map_axis(Axis(1), |row| row.iter().any(|&used| used));
        let cols = self.arcs.map_axis(Axis(0), |col| col.iter().any(|&used| used));
        rows.iter().zip(cols.iter()).filter(|(r, c)| **r || **c).count()
    }

    /// Every node has exactly one outgoing and one incoming arc.
    pub fn is_hamiltonian_cycle(&self) -> bool {
        (0..self.num_nodes()).all(|node| self.out_degree(node) == 1 && self.in_degree(node) == 1)
            && tour::extract(self).is_ok()
    }
}

/// A route together with its total distance. The distance is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub route: RouteMatrix,
    pub distance: i64,
}

impl SolveResult {
    /// The sentinel for "no feasible tour": no arcs and zero distance.
    pub fn no_solution(num_nodes: usize) -> Self {
        Self {
            route: RouteMatrix::new(num_nodes),
            distance: 0,
        }
    }

    pub fn is_no_solution(&self) -> bool {
        self.distance == 0 && self.route.is_empty()
    }

    pub fn coverage(&self) -> usize {
        self.route.num_arcs()
    }

    pub fn tour(&self) -> TourResult<Vec<RouteStop>> {
        tour::extract(&self.route)
    }
}
