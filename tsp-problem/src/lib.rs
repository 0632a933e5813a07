mod error;
pub use error::*;

pub mod coordinates;
pub mod distance;
pub mod route;
pub mod tour;

pub use coordinates::Coordinate;
pub use distance::CostMatrix;
pub use route::{RouteMatrix, RouteStop, SolveResult};
