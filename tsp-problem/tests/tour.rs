use tsp_problem::{tour, CostMatrix, RouteMatrix, RouteStop, SolveResult, TourError};

fn stops(pairs: &[(usize, usize)]) -> Vec<RouteStop> {
    pairs.iter().map(|&pair| RouteStop::from(pair)).collect()
}

fn assert_chained(stops: &[RouteStop]) {
    for pair in stops.windows(2) {
        assert_eq!(pair[0].to_node, pair[1].from_node);
    }
}

#[test]
fn test_extract_closed_cycle() {
    let route = RouteMatrix::from_arcs(4, &[(0, 2), (2, 3), (3, 1), (1, 0)]).unwrap();
    let tour = tour::extract(&route).unwrap();
    assert_eq!(tour, stops(&[(0, 2), (2, 3), (3, 1), (1, 0)]));
    assert!(route.is_hamiltonian_cycle());
}

#[test]
fn test_extract_closed_cycle_returns_to_start_once() {
    let order = [0, 8, 7, 6, 2, 10, 12, 3, 11, 9, 13, 5, 4, 1];
    let arcs: Vec<(usize, usize)> = tour::closed_stops(&order)
        .iter()
        .map(|stop| (stop.from_node, stop.to_node))
        .collect();
    let route = RouteMatrix::from_arcs(14, &arcs).unwrap();
    let tour = tour::extract(&route).unwrap();
    assert_eq!(tour.len(), route.num_arcs());
    assert_chained(&tour);
    assert_eq!(tour[0].from_node, 0);
    assert_eq!(tour.last().unwrap().to_node, 0);
    assert_eq!(
        tour.iter().filter(|stop| stop.to_node == 0).count(),
        1
    );
    assert_eq!(tour::nodes(&tour), order.to_vec());
}

#[test]
fn test_extract_partial_cycle_skips_unvisited_rows() {
    // budgeted closed tour 3 -> 5 -> 4 -> 3 over 6 nodes
    let route = RouteMatrix::from_arcs(6, &[(3, 5), (5, 4), (4, 3)]).unwrap();
    let tour = tour::extract(&route).unwrap();
    assert_eq!(tour, stops(&[(3, 5), (5, 4), (4, 3)]));
    assert!(!route.is_hamiltonian_cycle());
    assert_eq!(route.nodes_touched(), 3);
}

#[test]
fn test_extract_open_path_from_its_head() {
    let route = RouteMatrix::from_arcs(5, &[(0, 3), (3, 1)]).unwrap();
    assert_eq!(tour::extract(&route).unwrap(), stops(&[(0, 3), (3, 1)]));
}

#[test]
fn test_extract_open_path_reverses_when_entered_midway() {
    // path 4 -> 0 -> 2 -> 1: row 0 is found first and runs into the open end at 1
    let route = RouteMatrix::from_arcs(5, &[(4, 0), (0, 2), (2, 1)]).unwrap();
    let tour = tour::extract(&route).unwrap();
    assert_eq!(tour, stops(&[(1, 2), (2, 0), (0, 4)]));
    assert_chained(&tour);
    assert_eq!(tour::nodes(&tour), vec![1, 2, 0, 4]);
}

#[test]
fn test_extract_open_path_reverses_after_single_edge() {
    let route = RouteMatrix::from_arcs(3, &[(2, 0), (0, 1)]).unwrap();
    assert_eq!(tour::extract(&route).unwrap(), stops(&[(1, 0), (0, 2)]));
}

#[test]
fn test_extract_empty_route() {
    assert!(tour::extract(&RouteMatrix::new(4)).unwrap().is_empty());
    assert!(SolveResult::no_solution(4).tour().unwrap().is_empty());
}

#[test]
fn test_extract_rejects_branching_rows() {
    let route = RouteMatrix::from_arcs(3, &[(0, 1), (0, 2)]).unwrap();
    assert_eq!(
        tour::extract(&route),
        Err(TourError::BranchingRoute { node: 0, degree: 2 })
    );
    let route = RouteMatrix::from_arcs(3, &[(0, 2), (1, 2)]).unwrap();
    assert_eq!(
        tour::extract(&route),
        Err(TourError::BranchingRoute { node: 2, degree: 2 })
    );
}

#[test]
fn test_extract_rejects_subtours() {
    let route =
        RouteMatrix::from_arcs(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap();
    assert_eq!(
        tour::extract(&route),
        Err(TourError::DisconnectedRoute {
            expected: 6,
            found: 3
        })
    );
}

#[test]
fn test_extract_rejects_disconnected_paths() {
    let route = RouteMatrix::from_arcs(5, &[(0, 1), (3, 4)]).unwrap();
    assert_eq!(
        tour::extract(&route),
        Err(TourError::DisconnectedRoute {
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn test_route_matrix_rejects_unknown_nodes() {
    assert_eq!(
        RouteMatrix::from_arcs(3, &[(0, 3)]),
        Err(TourError::InvalidNode {
            node: 3,
            num_nodes: 3
        })
    );
}

#[test]
fn test_solve_result_sentinel() {
    let result = SolveResult::no_solution(5);
    assert!(result.is_no_solution());
    assert_eq!(result.coverage(), 0);
    let route = RouteMatrix::from_arcs(5, &[(0, 1)]).unwrap();
    let result = SolveResult { route, distance: 3 };
    assert!(!result.is_no_solution());
    assert_eq!(result.coverage(), 1);
}

#[test]
fn test_total_distance() {
    let cost = CostMatrix::from_rows(vec![
        vec![0, 2, 9],
        vec![2, 0, 4],
        vec![9, 4, 0],
    ])
    .unwrap();
    assert_eq!(tour::total_distance(&cost, &tour::closed_stops(&[0, 1, 2])), Ok(15));
    assert_eq!(tour::total_distance(&cost, &stops(&[(0, 1), (1, 2)])), Ok(6));
    assert_eq!(tour::total_distance(&cost, &[]), Ok(0));
}

#[test]
fn test_total_distance_rejects_invalid_tours() {
    let cost = CostMatrix::from_rows(vec![
        vec![0, 2, 9],
        vec![2, 0, 4],
        vec![9, 4, 0],
    ])
    .unwrap();
    assert_eq!(
        tour::total_distance(&cost, &stops(&[(0, 1), (2, 0)])),
        Err(TourError::BrokenTour {
            position: 1,
            expected_from: 1,
            actual_from: 2
        })
    );
    assert_eq!(
        tour::total_distance(&cost, &stops(&[(0, 1), (1, 0), (0, 2)])),
        Err(TourError::RepeatedNode { node: 0 })
    );
    assert_eq!(
        tour::total_distance(&cost, &stops(&[(0, 5)])),
        Err(TourError::InvalidNode {
            node: 5,
            num_nodes: 3
        })
    );
}
