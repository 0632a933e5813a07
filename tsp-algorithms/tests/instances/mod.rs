#![allow(dead_code)]

use tsp_problem::{distance, CostMatrix, Coordinate};

/// 14-node benchmark. Optimal tour 0-8-7-6-2-10-12-3-11-9-13-5-4-1 of length 547.
pub fn benchmark() -> CostMatrix {
    CostMatrix::from_upper_triangle(&[
        vec![83, 81, 113, 52, 42, 73, 44, 23, 91, 105, 90, 124, 57],
        vec![161, 160, 39, 89, 151, 110, 90, 99, 177, 143, 193, 100],
        vec![90, 125, 82, 13, 57, 71, 123, 38, 72, 59, 82],
        vec![123, 77, 81, 71, 91, 72, 64, 24, 62, 63],
        vec![51, 114, 72, 54, 69, 139, 105, 155, 62],
        vec![70, 25, 22, 52, 90, 56, 105, 16],
        vec![45, 61, 111, 36, 61, 57, 70],
        vec![23, 71, 67, 48, 85, 29],
        vec![74, 89, 69, 107, 36],
        vec![117, 65, 125, 43],
        vec![54, 22, 84],
        vec![60, 44],
        vec![97],
        vec![],
    ])
    .unwrap()
}

pub const BENCHMARK_OPTIMUM: i64 = 547;
pub const BENCHMARK_TOUR: [usize; 14] = [0, 8, 7, 6, 2, 10, 12, 3, 11, 9, 13, 5, 4, 1];

pub const COORDINATES: [Coordinate; 15] = [
    (8, 41),
    (220, 125),
    (56, 89),
    (196, 145),
    (196, 49),
    (64, 21),
    (124, 117),
    (212, 65),
    (24, 17),
    (24, 25),
    (172, 117),
    (260, 109),
    (252, 21),
    (172, 145),
    (40, 137),
];

pub fn coordinates_matrix() -> CostMatrix {
    distance::build(&COORDINATES).unwrap()
}

/// Cheapest closed tour by exhaustive search over permutations fixing node 0.
pub fn brute_force(cost: &CostMatrix) -> i64 {
    fn search(
        cost: &CostMatrix,
        current: usize,
        visited: &mut Vec<bool>,
        left: usize,
        acc: i64,
        best: &mut i64,
    ) {
        if left == 0 {
            *best = (*best).min(acc + cost.cost(current, 0));
            return;
        }
        for next in 0..cost.num_nodes() {
            if !visited[next] {
                visited[next] = true;
                let step = cost.cost(current, next);
                search(cost, next, visited, left - 1, acc + step, best);
                visited[next] = false;
            }
        }
    }
    let mut visited = vec![false; cost.num_nodes()];
    visited[0] = true;
    let mut best = i64::MAX;
    search(cost, 0, &mut visited, cost.num_nodes() - 1, 0, &mut best);
    best
}
