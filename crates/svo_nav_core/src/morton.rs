use crate::{Point3i, PointN};

use morton_encoding::{morton_decode, morton_encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Morton-encoded, layer-local `Point3i`. Every component must be in `[0, 2^16)`, which covers the deepest octree the
/// link format can address.
///
/// The bits are interleaved as `...zyxzyx`, so the lowest 3 bits of a code are the octant of the cell inside of its parent,
/// `code >> 3` is the parent cell and `code << 3` is the first child cell.
///
/// <https://en.wikipedia.org/wiki/Z-order_curve>
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Morton3(pub u64);

impl fmt::Debug for Morton3 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} = {:b}", self.0, self.0)
    }
}

impl Morton3 {
    /// The largest exclusive coordinate that can be encoded.
    pub const COORDINATE_LIMIT: i32 = 1 << 16;

    /// The code of the cell one layer up that contains this cell.
    #[inline]
    pub fn parent(self) -> Self {
        Self(self.0 >> 3)
    }

    /// The code of the child cell in `octant`, a number in `[0, 8)` of the binary format `0bZYX`.
    #[inline]
    pub fn child(self, octant: u8) -> Self {
        Self((self.0 << 3) | u64::from(octant & 7))
    }

    /// The code of the child cell with the least code.
    #[inline]
    pub fn first_child(self) -> Self {
        self.child(0)
    }

    /// Which octant of its parent this cell occupies.
    #[inline]
    pub fn octant(self) -> u8 {
        (self.0 & 7) as u8
    }
}

impl From<Point3i> for Morton3 {
    #[inline]
    fn from(p: Point3i) -> Self {
        debug_assert!(
            p.is_in_cube(Self::COORDINATE_LIMIT),
            "{:?} cannot be Morton encoded",
            p
        );

        Self(morton_encode([p.z() as u16, p.y() as u16, p.x() as u16]))
    }
}

impl From<Morton3> for Point3i {
    #[inline]
    fn from(m: Morton3) -> Self {
        let zyx: [u16; 3] = morton_decode(m.0);

        PointN([zyx[2] as i32, zyx[1] as i32, zyx[0] as i32])
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
    use crate::{Extent3i, Point};

    #[test]
    fn x_is_the_lowest_bit() {
        assert_eq!(Morton3::from(PointN([1, 0, 0])), Morton3(0b001));
        assert_eq!(Morton3::from(PointN([0, 1, 0])), Morton3(0b010));
        assert_eq!(Morton3::from(PointN([0, 0, 1])), Morton3(0b100));
        assert_eq!(Morton3::from(PointN([3, 3, 3])), Morton3(63));
    }

    #[test]
    fn limits_of_layer_coordinates() {
        let max = Point3i::fill(Morton3::COORDINATE_LIMIT - 1);

        assert_eq!(Morton3::from(Point3i::fill(0)), Morton3(0));
        assert_eq!(Morton3::from(max), Morton3((1 << 48) - 1));
        assert_eq!(max, Point3i::from(Morton3::from(max)));
    }

    #[test]
    fn parent_code_is_parent_cell() {
        let extent = Extent3i::from_min_and_shape(PointN([0; 3]), PointN([8; 3]));
        for p in extent.iter_points() {
            let code = Morton3::from(p);

            assert_eq!(p, Point3i::from(code));
            assert_eq!(code.parent(), Morton3::from(p.map_components(|c| c >> 1)));
            assert_eq!(code.parent().child(code.octant()), code);
        }
    }

    #[test]
    fn siblings_are_contiguous_in_morton_space() {
        let parent = Morton3::from(PointN([5, 2, 7]));
        let children: Vec<_> = (0..8).map(|octant| parent.child(octant).0).collect();
        let first = parent.first_child().0;

        assert_eq!(children, (first..first + 8).collect::<Vec<_>>());
    }
}
