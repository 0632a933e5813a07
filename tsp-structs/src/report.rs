use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use tsp_problem::{tour, RouteStop, SolveResult, TourResult};

serializable_struct_with_getters! {
    SolveReport {
        strategy: String,
        distance: i64,
        nodes_touched: usize,
        budgeted: bool,
        route: Option<Vec<RouteStop>>,
    }
}

impl SolveReport {
    pub fn new(strategy: &str, result: &SolveResult, budgeted: bool) -> TourResult<Self> {
        Ok(Self {
            strategy: strategy.to_string(),
            distance: result.distance,
            nodes_touched: result.route.nodes_touched(),
            budgeted,
            route: Some(result.tour()?),
        })
    }

    pub fn is_no_solution(&self) -> bool {
        self.distance == 0 && self.route().map_or(true, |route| route.is_empty())
    }

    /// One-line summary: nodes touched when a budget applies, otherwise the node order.
    pub fn summary(&self) -> String {
        if self.budgeted {
            format!(
                "Solution with distance of {} found: {} nodes touched",
                self.distance, self.nodes_touched
            )
        } else {
            let order = self.route().map(|route| tour::nodes(route)).unwrap_or_default();
            format!("Solution with distance of {} found: {:?}", self.distance, order)
        }
    }
}
