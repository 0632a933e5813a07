use crate::milp::{MilpEngine, MilpModel, MilpSolution, MilpStatus, Relation, VarId};
use anyhow::Result;
use log::{info, warn};
use logging_timer::time;
use ndarray::Array2;
use std::time::Duration;
use tsp_problem::{CostMatrix, RouteMatrix, SolveResult, TourError, TourResult};

/// Arc variables at or above this value are read as used.
const ARC_THRESHOLD: f64 = 0.99;

/// Assignment formulation of the closed tour with Miller-Tucker-Zemlin
/// ordering variables.
///
/// `x[i][j]` is a binary arc variable for every `i != j`, priced at
/// `cost[i][j]`. `y[i]` orders every node but the depot `0` within `[0, n]`.
/// Each node has exactly one outgoing (`out_{i}`) and one incoming (`in_{i}`)
/// arc, and `mtz_{i}_{j}` (`y[i] - (n + 1) x[i][j] >= y[j] - n`) forbids any
/// cycle that avoids the depot.
#[derive(Debug, Clone)]
pub struct TourModel {
    model: MilpModel,
    arcs: Array2<Option<VarId>>,
    order: Vec<Option<VarId>>,
}

impl TourModel {
    pub fn build(cost: &CostMatrix) -> Self {
        let num_nodes = cost.num_nodes();
        let big_m = num_nodes as f64;
        let mut model = MilpModel::new();

        let mut arcs = Array2::from_elem((num_nodes, num_nodes), None);
        let mut objective = Vec::with_capacity(num_nodes * num_nodes);
        for i in 0..num_nodes {
            for j in (0..num_nodes).filter(|&j| j != i) {
                let var = model.add_binary();
                arcs[[i, j]] = Some(var);
                objective.push((var, cost.cost(i, j) as f64));
            }
        }
        model.minimize(objective);

        let order: Vec<Option<VarId>> = (0..num_nodes)
            .map(|i| (i != 0).then(|| model.add_continuous(0.0, big_m)))
            .collect();

        for i in 0..num_nodes {
            let outgoing = arcs.row(i).iter().flatten().map(|&var| (var, 1.0)).collect();
            model.add_constraint(format!("out_{}", i), outgoing, Relation::Eq, 1.0);
            let incoming = arcs.column(i).iter().flatten().map(|&var| (var, 1.0)).collect();
            model.add_constraint(format!("in_{}", i), incoming, Relation::Eq, 1.0);
        }

        for i in 1..num_nodes {
            for j in (1..num_nodes).filter(|&j| j != i) {
                if let (Some(y_i), Some(y_j), Some(x_ij)) = (order[i], order[j], arcs[[i, j]]) {
                    model.add_constraint(
                        format!("mtz_{}_{}", i, j),
                        vec![(y_i, 1.0), (x_ij, -(big_m + 1.0)), (y_j, -1.0)],
                        Relation::Ge,
                        -big_m,
                    );
                }
            }
        }

        Self { model, arcs, order }
    }

    pub fn num_nodes(&self) -> usize {
        self.order.len()
    }

    pub fn model(&self) -> &MilpModel {
        &self.model
    }

    pub fn arc_var(&self, from: usize, to: usize) -> Option<VarId> {
        self.arcs.get([from, to]).copied().flatten()
    }

    pub fn order_var(&self, node: usize) -> Option<VarId> {
        self.order.get(node).copied().flatten()
    }

    /// Seeds every arc variable from `warm_start`. When the warm start is a
    /// single cycle the ordering variables are seeded too, counting down from
    /// `n - 1` along the tour from the depot, which makes the seed feasible.
    pub fn seed(&mut self, warm_start: &RouteMatrix) -> TourResult<()> {
        let num_nodes = self.num_nodes();
        if warm_start.num_nodes() != num_nodes {
            return Err(TourError::DimensionMismatch {
                expected: num_nodes,
                actual: warm_start.num_nodes(),
            });
        }
        for ((from, to), var) in self.arcs.indexed_iter() {
            if let Some(var) = var {
                let used = if warm_start.contains(from, to) { 1.0 } else { 0.0 };
                self.model.set_initial(*var, used);
            }
        }
        if warm_start.is_hamiltonian_cycle() {
            let mut node = 0;
            for position in 1..num_nodes {
                node = match warm_start.successor(node) {
                    Some(next) => next,
                    None => break,
                };
                if let Some(var) = self.order[node] {
                    self.model.set_initial(var, (num_nodes - position) as f64);
                }
            }
        }
        Ok(())
    }

    pub fn read_route(&self, solution: &MilpSolution) -> RouteMatrix {
        let mut route = RouteMatrix::new(self.num_nodes());
        for ((from, to), var) in self.arcs.indexed_iter() {
            if let Some(var) = var {
                if solution.value(*var) >= ARC_THRESHOLD {
                    route.insert(from, to);
                }
            }
        }
        route
    }
}

/// Solves the closed tour exactly, optionally seeded with a heuristic route.
///
/// An engine that finds nothing within `time_limit` yields
/// [`SolveResult::no_solution`] rather than an error.
#[time]
pub fn solve(
    cost: &CostMatrix,
    time_limit: Duration,
    warm_start: Option<&RouteMatrix>,
    engine: &dyn MilpEngine,
) -> Result<SolveResult> {
    let num_nodes = cost.num_nodes();
    if let Some(route) = warm_start {
        if route.num_nodes() != num_nodes {
            return Err(TourError::DimensionMismatch {
                expected: num_nodes,
                actual: route.num_nodes(),
            }
            .into());
        }
    }
    if num_nodes == 1 {
        return Ok(SolveResult::no_solution(num_nodes));
    }

    let mut tour_model = TourModel::build(cost);
    if let Some(route) = warm_start {
        tour_model.seed(route)?;
    }
    let solution = engine.solve(tour_model.model(), time_limit)?;
    match solution.status {
        MilpStatus::Infeasible => {
            warn!(
                "no tour over {} nodes found within {:?}",
                num_nodes, time_limit
            );
            Ok(SolveResult::no_solution(num_nodes))
        }
        status => {
            if status == MilpStatus::Feasible {
                info!(
                    "tour of distance {} is not proven optimal",
                    solution.objective.round()
                );
            }
            Ok(SolveResult {
                route: tour_model.read_route(&solution),
                distance: solution.objective.round() as i64,
            })
        }
    }
}
