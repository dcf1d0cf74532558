use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    clustering::Clustering,
    distance::euclidean,
    init::{distinct_points, pick_distinct_centers},
    point::{Coordinate, Point},
    ClusteringError,
};

/// Parameters of Lloyd's algorithm.
///
/// The core always runs exactly `iterations` rounds; see [`KMeans::fit_until_stable`]
/// for the variant that stops on a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KMeans {
    pub clusters: usize,
    pub iterations: usize,
}

impl KMeans {
    pub fn new(clusters: usize, iterations: usize) -> Result<Self, ClusteringError> {
        let kmeans = Self {
            clusters,
            iterations,
        };
        kmeans.validate()?;
        Ok(kmeans)
    }

    fn validate(&self) -> Result<(), ClusteringError> {
        if self.clusters == 0 {
            return Err(ClusteringError::ZeroClusters);
        }
        if self.iterations == 0 {
            return Err(ClusteringError::ZeroIterations);
        }
        Ok(())
    }

    /// Picks random distinct initial centers and runs all rounds.
    pub fn fit<P: Point, R: Rng + ?Sized>(
        &self,
        points: &[P],
        rng: &mut R,
    ) -> Result<Clustering<P>, ClusteringError> {
        self.fit_observed(points, rng, |_, _| {})
    }

    /// Same as [`KMeans::fit`], calling `observer(round, centers)` after every round.
    pub fn fit_observed<P, R, F>(
        &self,
        points: &[P],
        rng: &mut R,
        mut observer: F,
    ) -> Result<Clustering<P>, ClusteringError>
    where
        P: Point,
        R: Rng + ?Sized,
        F: FnMut(usize, &[P]),
    {
        let mut lloyd = self.start(points, || pick_distinct_centers(points, self.clusters, rng))?;
        for _ in 0..self.iterations {
            lloyd.step();
            observer(lloyd.round() - 1, lloyd.centers());
        }
        Ok(lloyd.finish())
    }

    /// Runs all rounds starting from caller-supplied centers.
    pub fn fit_with_centers<P: Point>(
        &self,
        points: &[P],
        centers: Vec<P>,
    ) -> Result<Clustering<P>, ClusteringError> {
        let mut lloyd = self.start(points, || {
            if centers.len() != self.clusters {
                return Err(ClusteringError::CenterCountMismatch {
                    expected: self.clusters,
                    found: centers.len(),
                });
            }
            let available = distinct_points(points).len();
            if available < self.clusters {
                return Err(ClusteringError::NotEnoughDistinctPoints {
                    requested: self.clusters,
                    available,
                });
            }
            Ok(centers)
        })?;
        for _ in 0..self.iterations {
            lloyd.step();
        }
        Ok(lloyd.finish())
    }

    /// Runs rounds until one leaves every center unchanged, at most `iterations` of them.
    ///
    /// Returns the clustering and the number of rounds executed.
    pub fn fit_until_stable<P: Point, R: Rng + ?Sized>(
        &self,
        points: &[P],
        rng: &mut R,
    ) -> Result<(Clustering<P>, usize), ClusteringError> {
        let mut lloyd = self.start(points, || pick_distinct_centers(points, self.clusters, rng))?;
        while lloyd.round() < self.iterations {
            if !lloyd.step() {
                info!(rounds = lloyd.round(), "KMeans converged");
                break;
            }
        }
        let rounds = lloyd.round();
        Ok((lloyd.finish(), rounds))
    }

    /// Validates parameters and points, then builds the round state from the
    /// centers produced by `init`.
    fn start<'a, P, I>(&self, points: &'a [P], init: I) -> Result<Lloyd<'a, P>, ClusteringError>
    where
        P: Point,
        I: FnOnce() -> Result<Vec<P>, ClusteringError>,
    {
        self.validate()?;
        let dim = check_points(points)?;
        let centers = init()?;

        info!(
            clusters = self.clusters,
            iterations = self.iterations,
            points = points.len(),
            "KMeans fit"
        );
        Lloyd::with_dim(points, dim, centers)
    }

    /// Clusters `points` and returns them recolored with their cluster centers.
    pub fn quantize<P: Point, R: Rng + ?Sized>(
        &self,
        points: &[P],
        rng: &mut R,
    ) -> Result<Vec<P>, ClusteringError> {
        Ok(self.fit(points, rng)?.recolor())
    }
}

/// Round state of Lloyd's algorithm: the current centers and the latest assignment.
pub struct Lloyd<'a, P> {
    points: &'a [P],
    centers: Vec<P>,
    assignment: Vec<usize>,
    round: usize,
}

impl<'a, P: Point> Lloyd<'a, P> {
    pub fn new(points: &'a [P], centers: Vec<P>) -> Result<Self, ClusteringError> {
        let dim = check_points(points)?;
        Self::with_dim(points, dim, centers)
    }

    /// Builds the round state for points already checked to have `dim` coordinates.
    fn with_dim(points: &'a [P], dim: usize, centers: Vec<P>) -> Result<Self, ClusteringError> {
        if centers.is_empty() {
            return Err(ClusteringError::ZeroClusters);
        }
        if let Some((index, center)) = centers.iter().enumerate().find(|(_, c)| c.dim() != dim) {
            return Err(ClusteringError::DimensionMismatch {
                index,
                expected: dim,
                found: center.dim(),
            });
        }
        Ok(Self {
            points,
            centers,
            assignment: Vec::new(),
            round: 0,
        })
    }

    /// One assignment and update round. Returns whether any center moved.
    pub fn step(&mut self) -> bool {
        self.assignment = assign(self.points, &self.centers);
        let previous = self.centers.clone();
        update_centers(self.points, &self.assignment, &mut self.centers);
        self.round += 1;
        debug!("Iteration {} complete", self.round - 1);
        previous != self.centers
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn centers(&self) -> &[P] {
        &self.centers
    }

    /// Assignment computed by the latest round, empty before the first one.
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub fn finish(mut self) -> Clustering<P> {
        if self.round == 0 {
            self.assignment = assign(self.points, &self.centers);
        }
        Clustering::new(self.centers, self.assignment)
    }
}

/// Index of the nearest center. Ties go to the lowest index.
pub fn nearest_center<P: Point>(point: &P, centers: &[P]) -> usize {
    let mut min_distance = f64::INFINITY;
    let mut min_center_index = 0;
    for (center_index, center) in centers.iter().enumerate() {
        let distance = euclidean(point, center);
        if distance < min_distance {
            min_distance = distance;
            min_center_index = center_index;
        }
    }
    min_center_index
}

/// Assignment step: nearest center of every point, in point order.
pub fn assign<P: Point>(points: &[P], centers: &[P]) -> Vec<usize> {
    points
        .par_iter()
        .map(|point| nearest_center(point, centers))
        .collect()
}

/// Update step: moves every center to the truncated mean of its members.
///
/// A center without members keeps its previous value. Returns the cluster sizes.
/// `assignment` holds one index below `centers.len()` per point, as produced by [`assign`].
pub(crate) fn update_centers<P: Point>(
    points: &[P],
    assignment: &[usize],
    centers: &mut [P],
) -> Vec<usize> {
    debug_assert_eq!(points.len(), assignment.len());
    let dim = centers.first().map_or(0, |center| center.dim());
    let mut centers_acc = vec![vec![0i128; dim]; centers.len()];
    let mut centers_counter = vec![0usize; centers.len()];

    for (point, &center_index) in points.iter().zip(assignment.iter()) {
        centers_counter[center_index] += 1;
        for (acc, &value) in centers_acc[center_index].iter_mut().zip(point.coords()) {
            *acc += value.widen();
        }
    }

    for (center_index, (center, acc)) in centers.iter_mut().zip(centers_acc.iter()).enumerate() {
        let count = centers_counter[center_index];
        if count == 0 {
            warn!(cluster = center_index, "Empty cluster, keeping previous center");
            continue;
        }
        for (c, &sum) in center.coords_mut().iter_mut().zip(acc.iter()) {
            *c = <P::Coord as Coordinate>::narrow(sum / count as i128);
        }
    }
    centers_counter
}

/// Validates the input points and returns their dimensionality.
fn check_points<P: Point>(points: &[P]) -> Result<usize, ClusteringError> {
    let dim = points.first().ok_or(ClusteringError::EmptyInput)?.dim();
    if dim == 0 {
        return Err(ClusteringError::ZeroDimension);
    }
    if let Some((index, point)) = points.iter().enumerate().find(|(_, p)| p.dim() != dim) {
        return Err(ClusteringError::DimensionMismatch {
            index,
            expected: dim,
            found: point.dim(),
        });
    }
    Ok(dim)
}
