pub mod clustering;
pub mod distance;
pub mod error;
pub mod init;
pub mod lloyd;
#[cfg(feature = "dump_image")]
pub mod plot;
pub mod point;

pub use clustering::Clustering;
pub use error::ClusteringError;
pub use lloyd::{KMeans, Lloyd};
pub use point::{Coordinate, Point};
