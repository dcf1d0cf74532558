use std::collections::HashSet;

use rand::Rng;

use crate::{point::Point, ClusteringError};

/// Picks `k` distinct centers from `points` without replacement.
///
/// Every pick is uniform over the distinct values not picked yet. Candidates are
/// kept in order of first appearance, so a seeded generator reproduces the same
/// centers for the same input.
pub fn pick_distinct_centers<P: Point, R: Rng + ?Sized>(
    points: &[P],
    k: usize,
    rng: &mut R,
) -> Result<Vec<P>, ClusteringError> {
    if k == 0 {
        return Err(ClusteringError::ZeroClusters);
    }

    let mut candidates = distinct_points(points);
    if candidates.len() < k {
        return Err(ClusteringError::NotEnoughDistinctPoints {
            requested: k,
            available: candidates.len(),
        });
    }

    let mut centers = Vec::with_capacity(k);
    for _ in 0..k {
        let pick = rng.gen_range(0..candidates.len());
        centers.push(candidates.swap_remove(pick));
    }
    Ok(centers)
}

pub fn distinct_points<P: Point>(points: &[P]) -> Vec<P> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|point| seen.insert(*point))
        .cloned()
        .collect()
}
