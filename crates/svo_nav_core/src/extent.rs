use crate::{point::Point, Point3f, PointN};

use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

/// A 3-dimensional extent with scalar type `T`.
pub type Extent3<T> = ExtentN<[T; 3]>;
/// A 3-dimensional extent with scalar type `i32`.
pub type Extent3i = ExtentN<[i32; 3]>;
/// A 3-dimensional extent with scalar type `f32`.
pub type Extent3f = ExtentN<[f32; 3]>;

/// An N-dimensional extent. You can just think of it as an axis-aligned box with some shape and a minimum point.
///
/// Integer extents are the Cartesian product of half-closed intervals `[a, b)` and are used to enumerate lattice cells.
/// Float extents are the world-space bounds of a navigable volume; containment and intersection tests on them are closed,
/// so a point on the surface of a box is inside of it.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

impl<N> ExtentN<N> {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: PointN<N>, shape: PointN<N>) -> Self {
        Self { minimum, shape }
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: Point,
{
    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> PointN<N> {
        self.minimum + self.shape
    }
}

impl Extent3f {
    /// An alternative representation of a box as its minimum and maximum corners.
    #[inline]
    pub fn from_min_and_max(minimum: Point3f, max: Point3f) -> Self {
        Self::from_min_and_shape(minimum, max - minimum)
    }

    /// The box of edge lengths `2 * half_extent` centered on `center`.
    #[inline]
    pub fn from_center_and_half_extent(center: Point3f, half_extent: Point3f) -> Self {
        Self::from_min_and_shape(center - half_extent, half_extent * 2.0)
    }

    /// The cube of edge length `edge_length` centered on `center`.
    #[inline]
    pub fn cube_centered_at(center: Point3f, edge_length: f32) -> Self {
        Self::from_center_and_half_extent(center, Point3f::fill(edge_length * 0.5))
    }

    /// The greatest corner of the box.
    #[inline]
    pub fn max(&self) -> Point3f {
        self.least_upper_bound()
    }

    #[inline]
    pub fn center(&self) -> Point3f {
        self.minimum + self.shape * 0.5
    }

    #[inline]
    pub fn half_extent(&self) -> Point3f {
        self.shape * 0.5
    }

    /// The length of the longest edge.
    #[inline]
    pub fn largest_edge_length(&self) -> f32 {
        self.shape.max_component()
    }

    /// Returns `true` iff some edge has a length that is not strictly positive and finite. A degenerate box spans no volume.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.minimum.is_finite() && self.shape.is_finite()) || self.shape.min_component() <= 0.0
    }

    /// Returns `true` iff `p` is inside of or on the surface of the box.
    #[inline]
    pub fn contains_point(&self, p: Point3f) -> bool {
        self.minimum <= p && p <= self.max()
    }

    /// Returns `true` iff the closed boxes share at least one point.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.minimum <= other.max() && other.minimum <= self.max()
    }

    /// Returns `true` iff the interiors of the boxes share some volume. Boxes that only touch do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.minimum < other.max() && other.minimum < self.max()
    }

    /// The smallest box containing both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_min_and_max(
            self.minimum.meet(&other.minimum),
            self.max().join(&other.max()),
        )
    }
}

impl<T> Add<PointN<T>> for ExtentN<T>
where
    PointN<T>: Add<Output = PointN<T>>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: PointN<T>) -> Self::Output {
        ExtentN {
            minimum: self.minimum + rhs,
            shape: self.shape,
        }
    }
}

impl<T> Sub<PointN<T>> for ExtentN<T>
where
    PointN<T>: Sub<Output = PointN<T>>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: PointN<T>) -> Self::Output {
        ExtentN {
            minimum: self.minimum - rhs,
            shape: self.shape,
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
