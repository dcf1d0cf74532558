use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClusteringError {
    #[error("Number of clusters must be positive")]
    ZeroClusters,

    #[error("Number of iterations must be positive")]
    ZeroIterations,

    #[error("No points to cluster")]
    EmptyInput,

    #[error("Points must have at least one coordinate")]
    ZeroDimension,

    #[error("Point {index} has {found} coordinates, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cannot pick {requested} distinct centers from {available} distinct points")]
    NotEnoughDistinctPoints { requested: usize, available: usize },

    #[error("Expected {expected} initial centers, got {found}")]
    CenterCountMismatch { expected: usize, found: usize },

    #[error("Point {index} is assigned to cluster {cluster}, but only {clusters} clusters exist")]
    InvalidAssignment {
        index: usize,
        cluster: usize,
        clusters: usize,
    },

    #[error("Clustering assigns {expected} points, got {found}")]
    PointCountMismatch { expected: usize, found: usize },

    #[error("Axis {axis} is out of range for {dim}-dimensional points")]
    InvalidAxis { axis: usize, dim: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "dump_image")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
