use core::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// An N-dimensional point, which is usually just a primitive array of type `N`. The octree only needs 3 dimensions, so all
/// of the arithmetic lives in the `point3` module.
///
/// ```
/// use svo_nav_core::PointN;
///
/// let p1 = PointN([1, 2, 3]);
/// let p2 = PointN([3, 4, 5]);
///
/// assert_eq!(p1 + p2, PointN([4, 6, 8]));
/// assert_eq!(p1 - p2, PointN([-2, -2, -2]));
/// assert_eq!(p1 * 2, PointN([2, 4, 6]));
/// ```
///
/// Points are partially ordered: A <= B iff every component of A is <= the same component of B. So a point p is inside of
/// the closed box between `min` and `max` iff `min <= p && p <= max`.
///
/// ```
/// use svo_nav_core::PointN;
///
/// let min = PointN([0.0, 0.0, 0.0]);
/// let max = PointN([3.0, 3.0, 3.0]);
///
/// assert!(min <= PointN([0.0, 1.0, 3.0]));
/// assert!(!(PointN([0.0, 4.0, 3.0]) <= max));
/// ```
#[derive(Copy, Clone, Debug, Deserialize, Default, Eq, Hash, PartialEq, Serialize)]
pub struct PointN<N>(pub N);

/// The arithmetic every point supports, independent of its dimension.
pub trait Point:
    Add<Output = Self>
    + Copy
    + Mul<<Self as Point>::Scalar, Output = Self>
    + PartialOrd
    + SmallZero
    + Sub<Output = Self>
{
    type Scalar: Copy;

    /// The component on axis `component_index`, where X = 0, Y = 1, Z = 2.
    fn at(&self, component_index: usize) -> Self::Scalar;

    /// Applies `f` to every component.
    fn map_components(&self, f: impl Fn(Self::Scalar) -> Self::Scalar) -> Self;
}

// `num::Zero` can't be a constant because of bignums.
pub trait SmallZero: Copy {
    const ZERO: Self;
}

impl SmallZero for i32 {
    const ZERO: i32 = 0;
}

impl SmallZero for f32 {
    const ZERO: f32 = 0.0;
}

pub trait Distance: Point {
    /// The L1 (Manhattan) distance between points.
    fn l1_distance(&self, other: &Self) -> Self::Scalar;

    /// The square of the L2 (Euclidean) distance between points.
    fn l2_distance_squared(&self, other: &Self) -> Self::Scalar;
}
