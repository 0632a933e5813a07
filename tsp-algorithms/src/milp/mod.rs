//! The contract between the tour formulation and a mixed-integer solver.
//!
//! [`MilpModel`] collects variables, named linear constraints, a minimization
//! objective and optional initial values. A [`MilpEngine`] solves it within a
//! wall-clock limit and reports a [`MilpSolution`].

mod micro_lp;
mod model;

pub use micro_lp::MicroLpEngine;
pub use model::*;

use anyhow::Result;
use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MilpStatus {
    /// Proven optimal.
    Optimal,
    /// Integer feasible, optimality not proven (e.g. the time limit was hit).
    Feasible,
    /// Infeasible, or no solution was found in time.
    Infeasible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    pub status: MilpStatus,
    pub values: Vec<f64>,
    pub objective: f64,
}

impl MilpSolution {
    pub fn no_solution() -> Self {
        Self {
            status: MilpStatus::Infeasible,
            values: Vec::new(),
            objective: 0.0,
        }
    }

    pub fn has_solution(&self) -> bool {
        self.status != MilpStatus::Infeasible
    }

    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }
}

pub trait MilpEngine {
    /// Solves `model`, returning within roughly `time_limit`. Running out of
    /// time is reported through [`MilpStatus`], not as an error.
    fn solve(&self, model: &MilpModel, time_limit: Duration) -> Result<MilpSolution>;
}
