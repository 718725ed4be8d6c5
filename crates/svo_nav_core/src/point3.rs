use crate::{Distance, Point, PointN, SmallZero};

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Sub};
use num::Signed;

pub type Point3<T> = PointN<[T; 3]>;
/// A lattice cell, e.g. the coordinates of an octree node within its layer.
pub type Point3i = PointN<[i32; 3]>;
/// A world-space position.
pub type Point3f = PointN<[f32; 3]>;

impl<T> Point3<T>
where
    T: Copy,
{
    #[inline]
    pub fn fill(value: T) -> Self {
        PointN([value; 3])
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.0[2]
    }

    #[inline]
    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        PointN([f(self.x(), other.x()), f(self.y(), other.y()), f(self.z(), other.z())])
    }

    #[inline]
    fn all_components(&self, other: &Self, f: impl Fn(T, T) -> bool) -> bool {
        f(self.x(), other.x()) && f(self.y(), other.y()) && f(self.z(), other.z())
    }
}

impl Point3f {
    pub fn floor(&self) -> Self {
        self.map_components(f32::floor)
    }

    /// Truncates every component toward zero.
    pub fn as_3i(&self) -> Point3i {
        PointN([self.x() as i32, self.y() as i32, self.z() as i32])
    }

    /// Component-wise maximum.
    pub fn join(&self, other: &Self) -> Self {
        self.zip_with(other, f32::max)
    }

    /// Component-wise minimum.
    pub fn meet(&self, other: &Self) -> Self {
        self.zip_with(other, f32::min)
    }

    pub fn max_component(&self) -> f32 {
        self.x().max(self.y()).max(self.z())
    }

    pub fn min_component(&self) -> f32 {
        self.x().min(self.y()).min(self.z())
    }

    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z().is_finite()
    }

    /// The Euclidean length of the vector.
    pub fn norm(&self) -> f32 {
        self.l2_distance_squared(&Self::ZERO).sqrt()
    }
}

impl Point3i {
    /// Clamps every component into `[lo, hi]`.
    pub fn clamp_components(&self, lo: i32, hi: i32) -> Self {
        self.map_components(|c| num::clamp(c, lo, hi))
    }

    /// Returns `true` iff every component is in `[0, edge_length)`.
    pub fn is_in_cube(&self, edge_length: i32) -> bool {
        self.0.iter().all(|&c| 0 <= c && c < edge_length)
    }
}

impl<T> Point for Point3<T>
where
    T: Copy + PartialOrd + SmallZero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    type Scalar = T;

    #[inline]
    fn at(&self, component_index: usize) -> T {
        self.0[component_index]
    }

    #[inline]
    fn map_components(&self, f: impl Fn(T) -> T) -> Self {
        PointN([f(self.x()), f(self.y()), f(self.z())])
    }
}

impl<T> SmallZero for Point3<T>
where
    T: SmallZero,
{
    const ZERO: Self = PointN([T::ZERO; 3]);
}

impl<T> Distance for Point3<T>
where
    T: Signed + Copy + PartialOrd + SmallZero,
{
    fn l1_distance(&self, other: &Self) -> T {
        let d = (*self - *other).map_components(|c| c.abs());

        d.x() + d.y() + d.z()
    }

    fn l2_distance_squared(&self, other: &Self) -> T {
        let d = *self - *other;

        d.x() * d.x() + d.y() * d.y() + d.z() * d.z()
    }
}

impl<T> Add for Point3<T>
where
    T: Copy + Add<Output = T>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<T> Sub for Point3<T>
where
    T: Copy + Sub<Output = T>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<T> Mul<T> for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        PointN([self.x() * rhs, self.y() * rhs, self.z() * rhs])
    }
}

impl<T> Mul for Point3<T>
where
    T: Copy + Mul<Output = T>,
{
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a * b)
    }
}

impl Div<f32> for Point3f {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        PointN([self.x() / rhs, self.y() / rhs, self.z() / rhs])
    }
}

impl From<Point3i> for Point3f {
    #[inline]
    fn from(p: Point3i) -> Self {
        PointN([p.x() as f32, p.y() as f32, p.z() as f32])
    }
}

// Component-wise partial order, so that box containment is `min <= p && p <= max`.
impl<T> PartialOrd for Point3<T>
where
    T: Copy + PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.all_components(other, |a, b| a == b) {
            Some(Ordering::Equal)
        } else if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    fn lt(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a < b)
    }

    fn le(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a <= b)
    }

    fn gt(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a > b)
    }

    fn ge(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a >= b)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn floor_rounds_toward_negative_infinity() {
        let p: Point3f = PointN([-0.5, 0.0, 1.9]);

        assert_eq!(p.floor().as_3i(), PointN([-1, 0, 1]));
        assert_eq!(p.as_3i(), PointN([0, 0, 1]));
    }

    #[test]
    fn join_and_meet_are_component_wise() {
        let a: Point3f = PointN([1.0, -2.0, 3.0]);
        let b: Point3f = PointN([0.0, 5.0, 3.5]);

        assert_eq!(a.join(&b), PointN([1.0, 5.0, 3.5]));
        assert_eq!(a.meet(&b), PointN([0.0, -2.0, 3.0]));
        assert_eq!(a.max_component(), 3.0);
        assert_eq!(a.min_component(), -2.0);
    }

    #[test]
    fn distances() {
        let v: Point3f = PointN([0.0, 0.0, -4.0]);
        let p: Point3i = PointN([3, 0, -4]);

        assert_eq!(v.norm(), 4.0);
        assert_eq!(p.l1_distance(&Point3i::ZERO), 7);
        assert_eq!(p.l2_distance_squared(&Point3i::ZERO), 25);
    }

    #[test]
    fn cube_membership_and_clamping() {
        let inside: Point3i = PointN([0, 3, 1]);
        let outside: Point3i = PointN([0, 4, -1]);

        assert!(inside.is_in_cube(4));
        assert!(!outside.is_in_cube(4));
        assert_eq!(outside.clamp_components(0, 3), PointN([0, 3, 0]));
    }

    #[test]
    fn partial_order_is_component_wise() {
        let a: Point3i = PointN([0, 0, 0]);
        let b: Point3i = PointN([1, 2, 3]);
        let c: Point3i = PointN([1, -1, 0]);

        assert!(a < b && a <= b && b > a && b >= a);
        assert_eq!(a.partial_cmp(&c), None);
        assert!(!(a <= c) && !(c <= a));
        assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
    }
}
