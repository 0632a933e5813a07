use crate::{exact, milp::MilpEngine, nearest_neighbor};
use anyhow::Result;
use log::{debug, info};
use logging_timer::time;
use rand::{rngs::SmallRng, SeedableRng};
use std::fmt;
use tsp_problem::{CostMatrix, SolveResult, TourError};
use tsp_structs::config::OptimizerConfig;
use tsp_utils::derive_seed;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Nearest neighbor from a fixed start.
    Heuristic { start: usize },
    /// Nearest neighbor from every start, keeping the widest route.
    HeuristicScan,
    /// MILP over the closed tour.
    Exact,
}

impl Strategy {
    pub fn select(config: &OptimizerConfig) -> Self {
        match (config.max_distance, config.force_heuristic, config.start) {
            (Some(_), _, Some(start)) => Strategy::Heuristic { start },
            (Some(_), _, None) => Strategy::HeuristicScan,
            (None, true, Some(start)) => Strategy::Heuristic { start },
            (None, true, None) => Strategy::HeuristicScan,
            (None, false, _) => Strategy::Exact,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Heuristic { start } => write!(f, "heuristic (start {})", start),
            Strategy::HeuristicScan => write!(f, "heuristic (all starts)"),
            Strategy::Exact => write!(f, "exact"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub strategy: Strategy,
    pub result: SolveResult,
}

/// Chooses a strategy from `config` and runs it.
///
/// Heuristic runs draw their tie-breaking from the config seed, or from the OS
/// when no seed is set. The exact strategy always solves the closed tour and
/// ignores `start`.
#[time]
pub fn optimize(
    cost: &CostMatrix,
    config: &OptimizerConfig,
    engine: &dyn MilpEngine,
) -> Result<Outcome> {
    let num_nodes = cost.num_nodes();
    if let Some(&start) = config.start() {
        if start >= num_nodes {
            return Err(TourError::InvalidStartNode { start, num_nodes }.into());
        }
    }
    let seed = config.calc_seed().unwrap_or_else(rand::random);
    let strategy = Strategy::select(config);
    info!("solving {} nodes with the {} strategy", num_nodes, strategy);

    let result = match strategy {
        Strategy::Heuristic { start } => run_heuristic(cost, config, &seed, start)?,
        Strategy::HeuristicScan => {
            let mut best: Option<SolveResult> = None;
            for start in 0..num_nodes {
                let result = run_heuristic(cost, config, &seed, start)?;
                debug!(
                    "start {} covers {} arcs at distance {}",
                    start,
                    result.coverage(),
                    result.distance
                );
                if best
                    .as_ref()
                    .map_or(true, |best| result.coverage() > best.coverage())
                {
                    best = Some(result);
                }
            }
            best.unwrap_or_else(|| SolveResult::no_solution(num_nodes))
        }
        Strategy::Exact => {
            let warm_start = if config.warm_start {
                let mut rng = SmallRng::from_seed(seed);
                Some(nearest_neighbor::solve(cost, true, Some(0), None, &mut rng)?)
            } else {
                None
            };
            if let Some(warm_start) = &warm_start {
                debug!("warm start distance {}", warm_start.distance);
            }
            exact::solve(
                cost,
                config.time_limit(),
                warm_start.as_ref().map(|warm_start| &warm_start.route),
                engine,
            )?
        }
    };

    Ok(Outcome { strategy, result })
}

fn run_heuristic(
    cost: &CostMatrix,
    config: &OptimizerConfig,
    seed: &[u8; 32],
    start: usize,
) -> Result<SolveResult> {
    let mut rng = SmallRng::from_seed(derive_seed(seed, start as u64));
    nearest_neighbor::solve(
        cost,
        config.closed,
        Some(start),
        config.max_distance,
        &mut rng,
    )
}
