//! Sparse voxel octree (SVO) navigation for agents that move freely in 3D, like flying or swimming agents.
//!
//! This library is organized into several crates:
//! - **core**: points, boxes, Morton codes and face directions
//! - **storage**: the octree itself, addressed by compact `OctreeLink` handles
//! - **data**: voxelization of bounded volumes against an occlusion collaborator, graph queries for pathfinders, cost and
//!   heuristic policies, and persistence
//!
//! To get started, read the docs of `BoundsNavigationData` and `NavigationDataSet` in the **data** crate.
//!
//! ```
//! use svo_nav::prelude::*;
//!
//! let world = StaticBoxWorld::new(vec![Extent3f::from_min_and_shape(
//!     PointN([0.0, 0.0, 0.0]),
//!     PointN([400.0, 50.0, 400.0]),
//! )]);
//! let data = BoundsNavigationData::generate(
//!     Extent3f::from_min_and_shape(Point3f::ZERO, Point3f::fill(400.0)),
//!     &BoundsGenerationSettings::default(),
//!     &world,
//! )
//! .unwrap();
//!
//! let mut set = NavigationDataSet::default();
//! set.add_navigation_bounds_data(data);
//!
//! let data = set.bounds_navigation_data_containing_points(&[PointN([200.0, 300.0, 200.0])]).unwrap();
//! let link = data.link_from_position(PointN([200.0, 300.0, 200.0])).unwrap();
//! assert!(!data.traversable_neighbors(link).is_empty());
//! assert_eq!(data.link_from_position(PointN([200.0, 10.0, 200.0])), None);
//! ```

pub use svo_nav_core as core;
pub use svo_nav_storage as storage;

#[cfg(feature = "data")]
pub use svo_nav_data as data;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;

    #[cfg(feature = "data")]
    pub use super::data::prelude::*;
}
