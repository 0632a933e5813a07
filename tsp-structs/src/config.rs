use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tsp_utils::u8s_from_str;

fn default_time_limit_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

serializable_struct_with_getters! {
    OptimizerConfig {
        max_distance: Option<i64>,
        start: Option<usize>,
        #[serde(default = "default_time_limit_secs")]
        time_limit_secs: u64,
        #[serde(default = "default_true")]
        closed: bool,
        #[serde(default)]
        force_heuristic: bool,
        #[serde(default = "default_true")]
        warm_start: bool,
        seed: Option<String>,
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_distance: None,
            start: None,
            time_limit_secs: default_time_limit_secs(),
            closed: true,
            force_heuristic: false,
            warm_start: true,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    /// Seed for the heuristic's tie-breaking, `None` when runs should not be
    /// reproducible.
    pub fn calc_seed(&self) -> Option<[u8; 32]> {
        self.seed.as_deref().map(u8s_from_str)
    }
}
