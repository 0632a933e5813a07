use crate::{Coordinate, TourError, TourResult};
use ndarray::Array2;

/// Square matrix of non-negative integer travel costs with a zero diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    costs: Array2<i64>,
}

impl CostMatrix {
    pub fn from_array(costs: Array2<i64>) -> TourResult<Self> {
        let (num_rows, num_cols) = costs.dim();
        if num_rows == 0 {
            return Err(TourError::EmptyCoordinates);
        }
        if num_rows != num_cols {
            return Err(TourError::NotSquare {
                row: 0,
                expected: num_rows,
                actual: num_cols,
            });
        }
        for ((from, to), &cost) in costs.indexed_iter() {
            if from == to && cost != 0 {
                return Err(TourError::NonZeroDiagonal { node: from, cost });
            }
            if cost < 0 {
                return Err(TourError::NegativeCost { from, to, cost });
            }
        }
        Ok(Self { costs })
    }

    pub fn from_rows(rows: Vec<Vec<i64>>) -> TourResult<Self> {
        let num_nodes = rows.len();
        if num_nodes == 0 {
            return Err(TourError::EmptyCoordinates);
        }
        if let Some((row, entries)) = rows
            .iter()
            .enumerate()
            .find(|(_, entries)| entries.len() != num_nodes)
        {
            return Err(TourError::NotSquare {
                row,
                expected: num_nodes,
                actual: entries.len(),
            });
        }
        let costs = Array2::from_shape_fn((num_nodes, num_nodes), |(i, j)| rows[i][j]);
        Self::from_array(costs)
    }

    /// Builds a symmetric matrix from an upper triangle where row `i` holds the
    /// costs from node `i` to nodes `i + 1..n`. The last row is empty.
    pub fn from_upper_triangle(rows: &[Vec<i64>]) -> TourResult<Self> {
        let num_nodes = rows.len();
        for (row, entries) in rows.iter().enumerate() {
            let expected = num_nodes - row - 1;
            if entries.len() != expected {
                return Err(TourError::NotSquare {
                    row,
                    expected,
                    actual: entries.len(),
                });
            }
        }
        let costs = Array2::from_shape_fn((num_nodes, num_nodes), |(i, j)| {
            if i == j {
                0
            } else if j > i {
                rows[i][j - i - 1]
            } else {
                rows[j][i - j - 1]
            }
        });
        Self::from_array(costs)
    }

    pub fn num_nodes(&self) -> usize {
        self.costs.nrows()
    }

    pub fn cost(&self, from: usize, to: usize) -> i64 {
        self.costs[[from, to]]
    }

    pub fn is_symmetric(&self) -> bool {
        self.costs == self.costs.t()
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.costs.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

/// Builds the Euclidean cost matrix, truncating every distance to an integer.
pub fn build(coordinates: &[Coordinate]) -> TourResult<CostMatrix> {
    if coordinates.is_empty() {
        return Err(TourError::EmptyCoordinates);
    }
    let num_nodes = coordinates.len();
    let costs = Array2::from_shape_fn((num_nodes, num_nodes), |(i, j)| {
        if i == j {
            0
        } else {
            euclidean_floor(coordinates[i], coordinates[j])
        }
    });
    CostMatrix::from_array(costs)
}

/// `floor(sqrt(dx² + dy²))`, exact for every `i32` coordinate pair.
pub fn euclidean_floor(from: Coordinate, to: Coordinate) -> i64 {
    let dx = from.0 as i128 - to.0 as i128;
    let dy = from.1 as i128 - to.1 as i128;
    let squared = (dx * dx + dy * dy) as u128;
    let mut root = (squared as f64).sqrt() as u128;
    // the float estimate can land one off near perfect squares
    while root * root > squared {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= squared {
        root += 1;
    }
    root as i64
}
