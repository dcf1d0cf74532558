use std::fmt::Debug;
use std::hash::Hash;

use num_traits::PrimInt;

/// Scalar domain of a point coordinate.
///
/// Only integer domains of at most 64 bits are supported: coordinates must hash and
/// compare exactly so that distinct points can be collected, centers are computed with
/// truncating integer division, and cluster sums must fit an `i128` accumulator.
pub trait Coordinate: PrimInt + Hash + Debug + Send + Sync + 'static {
    /// Lossless widening used to accumulate cluster sums.
    fn widen(self) -> i128;

    /// Narrowing back from an accumulated value. The value must lie inside the domain.
    fn narrow(value: i128) -> Self;

    fn as_f64(self) -> f64;
}

macro_rules! impl_coordinate {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn widen(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn narrow(value: i128) -> Self {
                    value as $t
                }

                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

// 128-bit integers are left out, their sums could overflow the accumulator.
impl_coordinate!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// An ordered tuple of coordinates.
///
/// Fixed-size arrays carry their dimensionality in the type, vectors are checked
/// when clustering starts.
pub trait Point: Clone + Eq + Hash + Debug + Send + Sync {
    type Coord: Coordinate;

    fn coords(&self) -> &[Self::Coord];

    fn coords_mut(&mut self) -> &mut [Self::Coord];

    #[inline]
    fn dim(&self) -> usize {
        self.coords().len()
    }
}

impl<T: Coordinate, const D: usize> Point for [T; D] {
    type Coord = T;

    #[inline]
    fn coords(&self) -> &[T] {
        self
    }

    #[inline]
    fn coords_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Coordinate> Point for Vec<T> {
    type Coord = T;

    #[inline]
    fn coords(&self) -> &[T] {
        self
    }

    #[inline]
    fn coords_mut(&mut self) -> &mut [T] {
        self
    }
}
