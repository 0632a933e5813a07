use super::{MilpEngine, MilpModel, MilpSolution, MilpStatus, Relation, VarKind};
use anyhow::{anyhow, Result};
use log::{debug, warn};
use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::{Duration, Instant},
};

const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Worker threads that have not returned yet, abandoned ones included.
static RUNNING_WORKERS: AtomicUsize = AtomicUsize::new(0);

/// [`MilpEngine`] backed by the pure-Rust `microlp` branch-and-bound solver.
///
/// `microlp` has neither a time limit nor an incumbent of its own. The solve
/// runs on a worker thread which is abandoned (left to finish in the
/// background) once `time_limit` elapses. A feasible set of initial values
/// caps the objective during the search and is reported as
/// [`MilpStatus::Feasible`] when nothing better arrives in time.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicroLpEngine;

impl MicroLpEngine {
    /// Number of solves still running in this process, including those whose
    /// caller already gave up on them.
    pub fn running_workers() -> usize {
        RUNNING_WORKERS.load(Ordering::SeqCst)
    }
}

impl MilpEngine for MicroLpEngine {
    fn solve(&self, model: &MilpModel, time_limit: Duration) -> Result<MilpSolution> {
        let incumbent = model.initial_solution(FEASIBILITY_TOLERANCE);
        if model.has_initial_values() && incumbent.is_none() {
            warn!("initial values violate the model, solving without an incumbent");
        }
        let cutoff = incumbent
            .as_ref()
            .map(|values| model.objective_value(values));
        let fallback = || match &incumbent {
            Some(values) => MilpSolution {
                status: MilpStatus::Feasible,
                values: values.clone(),
                objective: model.objective_value(values),
            },
            None => MilpSolution::no_solution(),
        };

        let (sender, receiver) = mpsc::channel();
        let owned = model.clone();
        let started = Instant::now();
        let busy = RUNNING_WORKERS.fetch_add(1, Ordering::SeqCst);
        if busy > 0 {
            warn!("{} earlier microlp solve(s) still running in the background", busy);
        }
        thread::Builder::new()
            .name("microlp-solve".to_string())
            .spawn(move || {
                let running = RunningWorker;
                let result = solve_blocking(&owned, cutoff);
                drop(running);
                // nobody is listening any more once the caller timed out
                let _ = sender.send(result);
            })
            .map_err(|e| {
                RUNNING_WORKERS.fetch_sub(1, Ordering::SeqCst);
                anyhow!("Failed to spawn solver thread: {}", e)
            })?;

        match receiver.recv_timeout(time_limit) {
            Ok(Ok((values, objective))) => {
                debug!(
                    "microlp proved optimality in {:?} (objective {})",
                    started.elapsed(),
                    objective
                );
                Ok(MilpSolution {
                    status: MilpStatus::Optimal,
                    values,
                    objective,
                })
            }
            Ok(Err(microlp::Error::Infeasible)) => {
                debug!("microlp found the model infeasible below the incumbent cutoff");
                Ok(fallback())
            }
            Ok(Err(e)) => {
                warn!("microlp failed: {:?}", e);
                Ok(fallback())
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "time limit of {:?} reached before microlp finished, \
                     leaving its worker to run to completion",
                    time_limit
                );
                Ok(fallback())
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("microlp worker exited without a result");
                Ok(fallback())
            }
        }
    }
}

/// Releases a [`RUNNING_WORKERS`] slot when the worker returns or unwinds.
struct RunningWorker;

impl Drop for RunningWorker {
    fn drop(&mut self) {
        RUNNING_WORKERS.fetch_sub(1, Ordering::SeqCst);
    }
}

fn solve_blocking(
    model: &MilpModel,
    cutoff: Option<f64>,
) -> std::result::Result<(Vec<f64>, f64), microlp::Error> {
    let mut problem = Problem::new(OptimizationDirection::Minimize);
    let vars: Vec<_> = model
        .vars()
        .map(|(_, kind, coef)| match kind {
            VarKind::Binary => problem.add_integer_var(coef, (0, 1)),
            VarKind::Continuous { lower, upper } => problem.add_var(coef, (lower, upper)),
        })
        .collect();

    for constraint in model.constraints() {
        let mut expr = LinearExpr::empty();
        for &(var, coef) in &constraint.terms {
            expr.add(vars[var.index()], coef);
        }
        let op = match constraint.relation {
            Relation::Eq => ComparisonOp::Eq,
            Relation::Ge => ComparisonOp::Ge,
            Relation::Le => ComparisonOp::Le,
        };
        problem.add_constraint(expr, op, constraint.rhs);
    }

    if let Some(cutoff) = cutoff {
        let mut expr = LinearExpr::empty();
        for (var, coef) in model.objective_terms() {
            expr.add(vars[var.index()], coef);
        }
        problem.add_constraint(expr, ComparisonOp::Le, cutoff + FEASIBILITY_TOLERANCE);
    }

    let solution = problem.solve()?;
    let values = vars.iter().map(|&var| solution[var]).collect();
    Ok((values, solution.objective()))
}
