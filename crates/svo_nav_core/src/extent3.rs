use crate::{Extent3i, Point3i, PointN};

use itertools::iproduct;

impl Extent3i {
    /// The number of lattice points inside of the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.0.iter().map(|&s| s.max(0) as usize).product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Iterates over all lattice points inside of the extent, X varying fastest.
    /// ```
    /// # use svo_nav_core::prelude::*;
    /// #
    /// let extent = Extent3i::from_min_and_shape(PointN([0, 0, 0]), PointN([2, 2, 1]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![
    ///     PointN([0, 0, 0]), PointN([1, 0, 0]), PointN([0, 1, 0]), PointN([1, 1, 0])
    /// ]);
    /// ```
    pub fn iter_points(&self) -> impl Iterator<Item = Point3i> {
        let min = self.minimum;
        let lub = self.least_upper_bound();

        iproduct!(min.z()..lub.z(), min.y()..lub.y(), min.x()..lub.x())
            .map(|(z, y, x)| PointN([x, y, z]))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
