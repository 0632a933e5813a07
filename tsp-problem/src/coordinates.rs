use crate::{TourError, TourResult};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::HashSet;

pub type Coordinate = (i32, i32);

/// Parses `x,y` rows. The first line is a header and is dropped; blank lines
/// are skipped.
pub fn parse_csv(text: &str) -> TourResult<Vec<Coordinate>> {
    let mut coordinates = Vec::new();
    for (index, line) in text.lines().enumerate().skip(1) {
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        let invalid = || TourError::InvalidCoordinateRow {
            line: index + 1,
            content: content.to_string(),
        };
        let fields: Vec<&str> = content.split(',').map(str::trim).collect();
        match fields.as_slice() {
            [x, y] => {
                let x = x.parse::<i32>().map_err(|_| invalid())?;
                let y = y.parse::<i32>().map_err(|_| invalid())?;
                coordinates.push((x, y));
            }
            _ => return Err(invalid()),
        }
    }
    if coordinates.is_empty() {
        return Err(TourError::EmptyCoordinates);
    }
    Ok(coordinates)
}

/// Generates `num_nodes` distinct positions in `0..=1000` from a seed.
pub fn generate(seed: &[u8; 32], num_nodes: usize) -> TourResult<Vec<Coordinate>> {
    if num_nodes == 0 {
        return Err(TourError::EmptyCoordinates);
    }
    let mut rng = SmallRng::from_seed(seed.clone());
    let mut node_positions: Vec<Coordinate> = Vec::with_capacity(num_nodes);
    let mut node_positions_set: HashSet<Coordinate> = HashSet::with_capacity(num_nodes);
    while node_positions.len() < num_nodes {
        let pos = (rng.gen_range(0..=1000), rng.gen_range(0..=1000));
        if node_positions_set.contains(&pos) {
            continue;
        }
        node_positions.push(pos);
        node_positions_set.insert(pos);
    }
    Ok(node_positions)
}
