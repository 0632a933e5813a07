#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    BranchingRoute {
        node: usize,
        degree: usize,
    },
    BrokenTour {
        position: usize,
        expected_from: usize,
        actual_from: usize,
    },
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },
    DisconnectedRoute {
        expected: usize,
        found: usize,
    },
    EmptyCoordinates,
    InvalidCoordinateRow {
        line: usize,
        content: String,
    },
    InvalidNode {
        node: usize,
        num_nodes: usize,
    },
    InvalidStartNode {
        start: usize,
        num_nodes: usize,
    },
    NegativeCost {
        from: usize,
        to: usize,
        cost: i64,
    },
    NonZeroDiagonal {
        node: usize,
        cost: i64,
    },
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },
    RepeatedNode {
        node: usize,
    },
}

impl std::fmt::Display for TourError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TourError::BranchingRoute { node, degree } => write!(
                f,
                "Route matrix is not a path: node '{}' has degree '{}'",
                node, degree
            ),
            TourError::BrokenTour {
                position,
                expected_from,
                actual_from,
            } => write!(
                f,
                "Tour is not chained at stop '{}'. Expected from node: '{}', Actual: '{}'",
                position, expected_from, actual_from
            ),
            TourError::DimensionMismatch { expected, actual } => write!(
                f,
                "Matrix dimension mismatch. Expected: '{}', Actual: '{}'",
                expected, actual
            ),
            TourError::DisconnectedRoute { expected, found } => write!(
                f,
                "Route matrix is disconnected. Expected '{}' connected arcs, only '{}' could be followed",
                expected, found
            ),
            TourError::EmptyCoordinates => write!(f, "At least one coordinate is required"),
            TourError::InvalidCoordinateRow { line, content } => {
                write!(f, "Line '{}' is not an 'x,y' integer pair: '{}'", line, content)
            }
            TourError::InvalidNode { node, num_nodes } => write!(
                f,
                "Node '{}' does not exist. Number of nodes: '{}'",
                node, num_nodes
            ),
            TourError::InvalidStartNode { start, num_nodes } => write!(
                f,
                "Start node '{}' is invalid. Must be less than '{}'",
                start, num_nodes
            ),
            TourError::NegativeCost { from, to, cost } => write!(
                f,
                "Cost from '{}' to '{}' is negative: '{}'",
                from, to, cost
            ),
            TourError::NonZeroDiagonal { node, cost } => write!(
                f,
                "Cost from node '{}' to itself must be 0, got '{}'",
                node, cost
            ),
            TourError::NotSquare {
                row,
                expected,
                actual,
            } => write!(
                f,
                "Cost matrix is not square. Row '{}' has '{}' entries, expected '{}'",
                row, actual, expected
            ),
            TourError::RepeatedNode { node } => {
                write!(f, "Node '{}' is departed more than once", node)
            }
        }
    }
}

impl std::error::Error for TourError {}

pub type TourResult<T> = std::result::Result<T, TourError>;
