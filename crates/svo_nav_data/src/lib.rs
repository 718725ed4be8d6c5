#![allow(clippy::new_without_default)]

//! Generation and queries of sparse voxel octree navigation data.
//!
//! A `BoundsNavigationData` covers one bounded volume. Generation voxelizes the volume by asking an `OcclusionQuery`
//! collaborator which boxes are blocked, prunes fully solid regions, collapses fully free regions into the coarsest node that
//! fits, and links every node to its face neighbors. The result is a read-only graph that a pathfinder walks with `OctreeLink`
//! handles:
//!
//! ```
//! use svo_nav_core::prelude::*;
//! use svo_nav_data::prelude::*;
//!
//! let volume = Extent3f::from_min_and_shape(Point3f::fill(0.0), Point3f::fill(800.0));
//! let settings = BoundsGenerationSettings::with_voxel_size(100.0);
//! let empty_world = |_center: Point3f, _half_extent: f32| false;
//!
//! let data = BoundsNavigationData::generate(volume, &settings, &empty_world).unwrap();
//! assert_eq!(data.layer_count(), 4);
//!
//! let link = data.link_from_position(PointN([10.0, 20.0, 30.0])).unwrap();
//! assert!(data.is_valid_ref(link));
//! ```
//!
//! A `NavigationDataSet` owns the data of many volumes and finds the one that serves a query.

mod generation;
mod query;

pub mod bounds_data;
pub mod cost;
pub mod error;
pub mod navigation_data_set;
pub mod occlusion;
pub mod settings;

pub use bounds_data::*;
pub use cost::*;
pub use error::*;
pub use navigation_data_set::*;
pub use occlusion::*;
pub use settings::*;

pub use svo_nav_storage;

/// A fast hash set for small keys like Morton codes.
pub type SmallKeyHashSet<K> = ahash::AHashSet<K>;

pub mod prelude {
    pub use super::{
        BoundsGenerationSettings, BoundsNavigationData, CollisionChannel, CollisionQueryParams,
        DataGenerationSettings, DistanceTraversalCost, EuclideanHeuristic, FixedTraversalCost,
        GenerationError, HeuristicCalculator, ManhattanHeuristic, NavigationDataSet,
        NavigationQueryFilterSettings, OcclusionQuery, PersistenceError, StaticBoxWorld,
        TraversalCostCalculator,
    };

    pub use svo_nav_storage::prelude::*;
}
