use crate::point::{Coordinate, Point};

/// Euclidean distance between two points of the same dimensionality.
pub fn euclidean<P: Point>(a: &P, b: &P) -> f64 {
    squared_euclidean(a, b).sqrt()
}

pub fn squared_euclidean<P: Point>(a: &P, b: &P) -> f64 {
    debug_assert_eq!(a.dim(), b.dim());
    a.coords()
        .iter()
        .zip(b.coords().iter())
        .map(|(&x, &y)| (x.as_f64() - y.as_f64()).abs().powi(2))
        .sum::<f64>()
}
