use crate::{CostMatrix, RouteMatrix, RouteStop, TourError, TourResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Phase {
    /// Following outgoing arcs from the first row with an arc.
    Forward,
    /// Following incoming arcs after the forward walk reached an open end.
    Reversed,
}

/// Reconstructs the ordered stops of a route matrix.
///
/// Closed cycles are walked from the lowest node that has an outgoing arc.
/// Open paths may be entered in the middle: once the forward walk reaches the
/// end of the path, the stops collected so far are reversed and the walk
/// continues along incoming arcs, so the result is the path traced backward
/// from its far end. Returns an empty sequence for an empty matrix.
pub fn extract(route: &RouteMatrix) -> TourResult<Vec<RouteStop>> {
    let num_nodes = route.num_nodes();
    for node in 0..num_nodes {
        let degree = route.out_degree(node).max(route.in_degree(node));
        if degree > 1 {
            return Err(TourError::BranchingRoute { node, degree });
        }
    }

    let expected = route.num_arcs();
    let mut stops = Vec::with_capacity(expected);
    let start = match (0..num_nodes).find(|&node| route.out_degree(node) == 1) {
        Some(start) => start,
        None => return Ok(stops),
    };

    let mut departed = vec![false; num_nodes];
    let mut phase = Phase::Forward;
    let mut current = start;
    while stops.len() < expected {
        let next = match phase {
            Phase::Forward => route.successor(current),
            Phase::Reversed => route.predecessor(current),
        };
        match (next, phase) {
            (Some(_), _) if departed[current] => {
                return Err(TourError::DisconnectedRoute {
                    expected,
                    found: stops.len(),
                })
            }
            (Some(next), _) => {
                departed[current] = true;
                stops.push(RouteStop::new(current, next));
                current = next;
            }
            (None, Phase::Forward) => {
                stops.reverse();
                departed.iter_mut().for_each(|flag| *flag = false);
                for stop in stops.iter_mut() {
                    *stop = stop.reversed();
                    departed[stop.from_node] = true;
                }
                current = stops.last().map_or(current, |stop| stop.to_node);
                phase = Phase::Reversed;
            }
            (None, Phase::Reversed) => {
                return Err(TourError::DisconnectedRoute {
                    expected,
                    found: stops.len(),
                })
            }
        }
    }
    Ok(stops)
}

/// The node sequence of a tour: every departure, in order, followed by the
/// final arrival when the tour is open.
pub fn nodes(stops: &[RouteStop]) -> Vec<usize> {
    let mut nodes: Vec<usize> = stops.iter().map(|stop| stop.from_node).collect();
    if let (Some(first), Some(last)) = (stops.first(), stops.last()) {
        if last.to_node != first.from_node {
            nodes.push(last.to_node);
        }
    }
    nodes
}

/// Verifies that `stops` form a single chain over valid nodes, departing each
/// node at most once, and returns its total cost.
pub fn total_distance(cost: &CostMatrix, stops: &[RouteStop]) -> TourResult<i64> {
    let num_nodes = cost.num_nodes();
    let mut departed = vec![false; num_nodes];
    let mut total = 0;
    for (position, stop) in stops.iter().enumerate() {
        for node in [stop.from_node, stop.to_node] {
            if node >= num_nodes {
                return Err(TourError::InvalidNode { node, num_nodes });
            }
        }
        if position > 0 && stops[position - 1].to_node != stop.from_node {
            return Err(TourError::BrokenTour {
                position,
                expected_from: stops[position - 1].to_node,
                actual_from: stop.from_node,
            });
        }
        if departed[stop.from_node] {
            return Err(TourError::RepeatedNode {
                node: stop.from_node,
            });
        }
        departed[stop.from_node] = true;
        total += cost.cost(stop.from_node, stop.to_node);
    }
    Ok(total)
}

/// Turns a closed node order such as `[0, 8, 7]` into the stops `0->8, 8->7, 7->0`.
pub fn closed_stops(order: &[usize]) -> Vec<RouteStop> {
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(&from, &to)| RouteStop::new(from, to))
        .collect()
}
