pub mod exact;
pub mod milp;
pub mod nearest_neighbor;
pub mod optimizer;

pub use optimizer::{optimize, Outcome, Strategy};
