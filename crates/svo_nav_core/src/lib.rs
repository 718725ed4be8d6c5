//! The core spatial types used to build and query sparse voxel octrees:
//! - `PointN`: an N-dimensional point, most importantly `Point3i` (lattice cells) and `Point3f` (world positions)
//! - `ExtentN`: an axis-aligned box, most importantly `Extent3i` (ranges of lattice cells) and `Extent3f` (world-space bounds)
//! - `Morton3`: the Z-order key of a lattice cell inside one octree layer
//! - `SignedAxis3`: one of the six face directions used for neighbor links

pub mod axis;
pub mod extent;
pub mod extent3;
pub mod morton;
pub mod point;
pub mod point3;

pub use axis::{Axis3, SignedAxis3};
pub use extent::{Extent3, Extent3f, Extent3i, ExtentN};
pub use morton::Morton3;
pub use point::{Distance, Point, PointN, SmallZero};
pub use point3::{Point3, Point3f, Point3i};

pub use num;

pub mod prelude {
    pub use super::{
        Axis3, Distance, Extent3, Extent3f, Extent3i, ExtentN, Morton3, Point, Point3, Point3f,
        Point3i, PointN, SignedAxis3, SmallZero,
    };
}
