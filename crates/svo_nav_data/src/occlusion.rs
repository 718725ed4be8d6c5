use crate::{CollisionChannel, CollisionQueryParams};

use svo_nav_core::prelude::*;

/// The world as seen by voxelization: answers whether an axis-aligned box is blocked.
///
/// Implementations must be deterministic for a fixed world, and safe to query from several threads at once if volumes are
/// generated in parallel.
pub trait OcclusionQuery {
    /// Returns `true` iff the cube centered on `center` with half edge length `half_extent` touches any blocking geometry on
    /// `channel`.
    fn is_box_occluded(
        &self,
        center: Point3f,
        half_extent: f32,
        channel: CollisionChannel,
        params: &CollisionQueryParams,
    ) -> bool;
}

/// Any `Fn(center, half_extent) -> bool` is a world that ignores channels and query parameters.
impl<F> OcclusionQuery for F
where
    F: Fn(Point3f, f32) -> bool,
{
    #[inline]
    fn is_box_occluded(
        &self,
        center: Point3f,
        half_extent: f32,
        _channel: CollisionChannel,
        _params: &CollisionQueryParams,
    ) -> bool {
        (self)(center, half_extent)
    }
}

/// A world made of static boxes that block a single channel.
///
/// A query box is occluded iff its interior overlaps the interior of some blocker, so a free cell that only touches an
/// obstacle stays free.
#[derive(Clone, Debug, Default)]
pub struct StaticBoxWorld {
    pub channel: CollisionChannel,
    pub blockers: Vec<Extent3f>,
}

impl StaticBoxWorld {
    pub fn new(blockers: Vec<Extent3f>) -> Self {
        Self {
            channel: CollisionChannel::WorldStatic,
            blockers,
        }
    }

    pub fn add_blocker(&mut self, blocker: Extent3f) {
        self.blockers.push(blocker);
    }
}

impl OcclusionQuery for StaticBoxWorld {
    fn is_box_occluded(
        &self,
        center: Point3f,
        half_extent: f32,
        channel: CollisionChannel,
        _params: &CollisionQueryParams,
    ) -> bool {
        if channel != self.channel {
            return false;
        }
        let query = Extent3f::from_center_and_half_extent(center, Point3f::fill(half_extent));

        self.blockers.iter().any(|b| b.overlaps(&query))
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
    fn static_boxes_block_overlapping_queries() {
        let world = StaticBoxWorld::new(vec![Extent3f::from_min_and_shape(
            Point3f::fill(100.0),
            Point3f::fill(100.0),
        )]);
        let params = CollisionQueryParams::default();
        let channel = CollisionChannel::WorldStatic;

        assert!(world.is_box_occluded(Point3f::fill(150.0), 50.0, channel, &params));
        assert!(world.is_box_occluded(Point3f::fill(60.0), 50.0, channel, &params));
        // Only touching the blocker's corner.
        assert!(!world.is_box_occluded(Point3f::fill(50.0), 50.0, channel, &params));
        assert!(!world.is_box_occluded(Point3f::fill(150.0), 50.0, CollisionChannel::Pawn, &params));
    }

    #[test]
    fn closures_are_worlds() {
        let below_ground = |center: Point3f, half_extent: f32| center.y() - half_extent < 0.0;
        let params = CollisionQueryParams::default();

        assert!(below_ground.is_box_occluded(
            PointN([0.0, 10.0, 0.0]),
            20.0,
            CollisionChannel::Camera,
            &params
        ));
        assert!(!below_ground.is_box_occluded(
            PointN([0.0, 30.0, 0.0]),
            20.0,
            CollisionChannel::Camera,
            &params
        ));
    }
}
