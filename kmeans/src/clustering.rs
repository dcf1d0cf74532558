use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{distance::squared_euclidean, point::Point, ClusteringError};

/// Final centers together with the assignment of every input point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clustering<P> {
    centers: Vec<P>,
    assignment: Vec<usize>,
}

impl<P: Point> Clustering<P> {
    pub(crate) fn new(centers: Vec<P>, assignment: Vec<usize>) -> Self {
        Self {
            centers,
            assignment,
        }
    }

    pub fn centers(&self) -> &[P] {
        &self.centers
    }

    /// Cluster index of every input point, in input order.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.centers.len()];
        for &cluster in &self.assignment {
            sizes[cluster] += 1;
        }
        sizes
    }

    /// Replaces every input point with the center of its cluster, keeping input order.
    pub fn recolor(&self) -> Vec<P> {
        self.assignment
            .iter()
            .map(|&cluster| self.centers[cluster].clone())
            .collect()
    }

    /// Members of every cluster as `(original index, point)` pairs.
    pub fn clusters(&self, points: &[P]) -> Vec<Vec<(usize, P)>> {
        debug_assert_eq!(points.len(), self.assignment.len());
        let mut clusters = vec![Vec::new(); self.centers.len()];
        for (index, (point, &cluster)) in points.iter().zip(self.assignment.iter()).enumerate() {
            clusters[cluster].push((index, point.clone()));
        }
        clusters
    }

    /// Sum of squared distances from every point to its center.
    pub fn inertia(&self, points: &[P]) -> f64 {
        points
            .iter()
            .zip(self.assignment.iter())
            .map(|(point, &cluster)| squared_euclidean(point, &self.centers[cluster]))
            .sum()
    }
}

impl<P: Point + Serialize + DeserializeOwned> Clustering<P> {
    pub fn save(&self, path: &Path) -> Result<(), ClusteringError> {
        let bytes = serde_json::to_vec(self)?;
        path.parent().map(std::fs::create_dir_all);
        let mut buffer = File::create(path)?;
        buffer.write_all(&bytes)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ClusteringError> {
        let mut contents = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
        let clustering: Self = serde_json::from_str(&contents)?;

        let clusters = clustering.centers.len();
        if let Some((index, &cluster)) = clustering
            .assignment
            .iter()
            .enumerate()
            .find(|(_, &cluster)| cluster >= clusters)
        {
            return Err(ClusteringError::InvalidAssignment {
                index,
                cluster,
                clusters,
            });
        }
        Ok(clustering)
    }
}
