//! Occluder scenes shared by tests and benchmarks. Every scene answers `is_box_occluded(center, half_extent)`, so a closure
//! over a scene is a navigation world.

use svo_nav_core::prelude::*;

/// A solid ball.
#[derive(Clone, Copy, Debug)]
pub struct SphereScene {
    pub center: Point3f,
    pub radius: f32,
}

impl SphereScene {
    /// A ball centered in the cube `[0, edge_length]^3`, leaving one voxel of free space to each side.
    pub fn centered_in_cube(edge_length: f32, voxel_size: f32) -> Self {
        Self {
            center: Point3f::fill(edge_length * 0.5),
            radius: edge_length * 0.5 - voxel_size,
        }
    }

    /// True iff the box intersects the ball.
    pub fn is_box_occluded(&self, center: Point3f, half_extent: f32) -> bool {
        let lo = center - Point3f::fill(half_extent);
        let hi = center + Point3f::fill(half_extent);
        let closest = self.center.join(&lo).meet(&hi);

        closest.l2_distance_squared(&self.center) < self.radius * self.radius
    }

    pub fn contains(&self, p: Point3f) -> bool {
        p.l2_distance_squared(&self.center) < self.radius * self.radius
    }
}

/// A floor slab and a grid of pillars standing on it, inside the cube `[0, edge_length]^3`.
#[derive(Clone, Debug)]
pub struct PillarScene {
    pub boxes: Vec<Extent3f>,
}

impl PillarScene {
    pub fn new(edge_length: f32, pillars_per_side: i32, pillar_width: f32) -> Self {
        let floor_height = edge_length / 16.0;
        let mut boxes = vec![Extent3f::from_min_and_shape(
            Point3f::fill(0.0),
            PointN([edge_length, floor_height, edge_length]),
        )];

        let spacing = edge_length / pillars_per_side as f32;
        for i in 0..pillars_per_side {
            for k in 0..pillars_per_side {
                let x = (i as f32 + 0.5) * spacing - pillar_width * 0.5;
                let z = (k as f32 + 0.5) * spacing - pillar_width * 0.5;
                boxes.push(Extent3f::from_min_and_shape(
                    PointN([x, floor_height, z]),
                    PointN([pillar_width, edge_length * 0.75, pillar_width]),
                ));
            }
        }

        Self { boxes }
    }

    /// True iff the interior of the box overlaps the interior of any scene box.
    pub fn is_box_occluded(&self, center: Point3f, half_extent: f32) -> bool {
        let query = Extent3f::from_center_and_half_extent(center, Point3f::fill(half_extent));

        self.boxes.iter().any(|b| b.overlaps(&query))
    }

    pub fn contains(&self, p: Point3f) -> bool {
        self.boxes.iter().any(|b| b.minimum < p && p < b.max())
    }
}
