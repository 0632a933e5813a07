use anyhow::Result;
use log::debug;
use rand::Rng;
use tsp_problem::{CostMatrix, RouteMatrix, SolveResult, TourError};

/// Greedy nearest-neighbor walk with an optional distance budget.
///
/// Starting at `start` (uniformly random when `None`), repeatedly moves to the
/// cheapest unvisited node. Ties between equally cheap nodes are broken with
/// `rng`, which is not consulted otherwise. With `closed` the walk returns to
/// `start`, and under a budget it turns home as soon as the next step plus
/// the way back from it would reach `max_distance`. Without `closed` the walk
/// simply stops before the step that would reach the budget. A finite budget
/// is never reached: the result's distance is strictly below it, or zero.
pub fn solve<R: Rng>(
    cost: &CostMatrix,
    closed: bool,
    start: Option<usize>,
    max_distance: Option<i64>,
    rng: &mut R,
) -> Result<SolveResult> {
    let num_nodes = cost.num_nodes();
    let start = match start {
        Some(start) if start >= num_nodes => {
            return Err(TourError::InvalidStartNode { start, num_nodes }.into())
        }
        Some(start) => start,
        None => rng.gen_range(0..num_nodes),
    };

    let mut route = RouteMatrix::new(num_nodes);
    let mut visited = vec![false; num_nodes];
    visited[start] = true;
    let mut num_visited = 1;
    let mut distance = 0;
    let mut current = start;

    loop {
        let shortest_edge = (0..num_nodes)
            .filter(|&node| !visited[node])
            .map(|node| cost.cost(current, node))
            .min();
        let shortest_edge = match shortest_edge {
            Some(shortest_edge) => shortest_edge,
            None => {
                if closed && current != start {
                    distance += cost.cost(current, start);
                    route.insert(current, start);
                }
                debug!(
                    "nearest neighbor from {} visited all {} nodes, distance {}",
                    start, num_nodes, distance
                );
                break;
            }
        };

        let candidates: Vec<usize> = (0..num_nodes)
            .filter(|&node| !visited[node] && cost.cost(current, node) == shortest_edge)
            .collect();
        let next = if candidates.len() > 1 {
            candidates[rng.gen_range(0..candidates.len())]
        } else {
            candidates[0]
        };

        if let (true, Some(max_distance)) = (closed, max_distance) {
            let go_home_cost = cost.cost(next, start) + shortest_edge;
            if distance + go_home_cost >= max_distance {
                if current != start {
                    distance += cost.cost(current, start);
                    route.insert(current, start);
                }
                debug!(
                    "nearest neighbor from {} turned home at {} after {} of {} nodes, distance {}",
                    start, current, num_visited, num_nodes, distance
                );
                break;
            }
        }
        if let Some(max_distance) = max_distance {
            if distance + shortest_edge >= max_distance {
                debug!(
                    "nearest neighbor from {} stopped at {} after {} of {} nodes, distance {}",
                    start, current, num_visited, num_nodes, distance
                );
                break;
            }
        }

        distance += shortest_edge;
        route.insert(current, next);
        visited[next] = true;
        num_visited += 1;
        current = next;
    }

    Ok(SolveResult { route, distance })
}
