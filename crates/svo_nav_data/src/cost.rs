//! Cost policies for searches over the navigation graph.

use crate::BoundsNavigationData;

use serde::{Deserialize, Serialize};
use svo_nav_core::prelude::*;
use svo_nav_storage::prelude::*;

/// The cost of moving between two adjacent links.
pub trait TraversalCostCalculator {
    fn traversal_cost(&self, data: &BoundsNavigationData, start: OctreeLink, end: OctreeLink) -> f32;
}

/// The estimated cost of reaching `end` from `start`.
pub trait HeuristicCalculator {
    fn heuristic_cost(&self, data: &BoundsNavigationData, start: OctreeLink, end: OctreeLink) -> f32;
}

/// Both link positions, or `None` if either link does not refer to a node.
fn link_positions(
    data: &BoundsNavigationData,
    start: OctreeLink,
    end: OctreeLink,
) -> Option<(Point3f, Point3f)> {
    Some((data.link_position(start)?, data.link_position(end)?))
}

/// Traversal costs the Euclidean distance between the link centers. Links that don't refer to a node can't be traversed.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DistanceTraversalCost;

impl TraversalCostCalculator for DistanceTraversalCost {
    fn traversal_cost(&self, data: &BoundsNavigationData, start: OctreeLink, end: OctreeLink) -> f32 {
        link_positions(data, start, end)
            .map(|(s, e)| s.l2_distance_squared(&e).sqrt())
            .unwrap_or(f32::INFINITY)
    }
}

/// Every traversal costs the same, no matter how large the nodes are. This biases a search toward large nodes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FixedTraversalCost {
    pub cost: f32,
}

impl Default for FixedTraversalCost {
    fn default() -> Self {
        Self { cost: 1.0 }
    }
}

impl TraversalCostCalculator for FixedTraversalCost {
    fn traversal_cost(&self, _data: &BoundsNavigationData, _start: OctreeLink, _end: OctreeLink) -> f32 {
        self.cost
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct EuclideanHeuristic;

impl HeuristicCalculator for EuclideanHeuristic {
    fn heuristic_cost(&self, data: &BoundsNavigationData, start: OctreeLink, end: OctreeLink) -> f32 {
        link_positions(data, start, end)
            .map(|(s, e)| s.l2_distance_squared(&e).sqrt())
            .unwrap_or(f32::INFINITY)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ManhattanHeuristic;

impl HeuristicCalculator for ManhattanHeuristic {
    fn heuristic_cost(&self, data: &BoundsNavigationData, start: OctreeLink, end: OctreeLink) -> f32 {
        link_positions(data, start, end)
            .map(|(s, e)| s.l1_distance(&e))
            .unwrap_or(f32::INFINITY)
    }
}

/// Tuning of a search that is independent of the chosen cost policies.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NavigationQueryFilterSettings {
    /// Multiplies every heuristic estimate. Values above 1 make the search greedier.
    pub heuristic_scale: f32,
    /// Whether to discount the heuristic of coarse nodes, so that the search prefers large open nodes.
    pub use_node_size_compensation: bool,
    pub node_size_compensation: f32,
    pub offset_path_vertically_by_agent_radius: bool,
}

impl Default for NavigationQueryFilterSettings {
    fn default() -> Self {
        Self {
            heuristic_scale: 1.0,
            use_node_size_compensation: true,
            node_size_compensation: 1.0,
            offset_path_vertically_by_agent_radius: false,
        }
    }
}

impl NavigationQueryFilterSettings {
    /// The heuristic estimate from `start` to `end`, with the scale and node size compensation of these settings applied.
    ///
    /// Compensation multiplies the estimate by `1 - (layer / layer_count) * node_size_compensation`, where `layer` is the layer
    /// of `start`.
    pub fn scaled_heuristic_cost<H>(
        &self,
        heuristic: &H,
        data: &BoundsNavigationData,
        start: OctreeLink,
        end: OctreeLink,
    ) -> f32
    where
        H: HeuristicCalculator + ?Sized,
    {
        let mut cost = heuristic.heuristic_cost(data, start, end) * self.heuristic_scale;
        if self.use_node_size_compensation && data.layer_count() > 0 {
            let layer_fraction = f32::from(start.layer_index()) / f32::from(data.layer_count());
            cost *= 1.0 - layer_fraction * self.node_size_compensation;
        }

        cost
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

    use crate::{BoundsGenerationSettings, StaticBoxWorld};

    /// A 400 unit cube with one solid 100 unit cell in the middle, so layers 0 through 2 all hold nodes.
    fn data_with_obstacle() -> BoundsNavigationData {
        let volume = Extent3f::from_min_and_shape(Point3f::ZERO, Point3f::fill(400.0));
        let world = StaticBoxWorld::new(vec![Extent3f::from_min_and_shape(
            Point3f::fill(100.0),
            Point3f::fill(100.0),
        )]);

        BoundsNavigationData::generate(volume, &BoundsGenerationSettings::with_voxel_size(100.0), &world)
            .unwrap()
    }

    #[test]
    fn distance_and_heuristics_use_link_centers() {
        let data = data_with_obstacle();
        let a = data.link_from_position(PointN([50.0, 50.0, 50.0])).unwrap();
        let b = data.link_from_position(PointN([250.0, 50.0, 50.0])).unwrap();
        let pa = data.link_position(a).unwrap();
        let pb = data.link_position(b).unwrap();

        let expected = (pb - pa).norm();
        assert!((DistanceTraversalCost.traversal_cost(&data, a, b) - expected).abs() < 1e-3);
        assert!((EuclideanHeuristic.heuristic_cost(&data, a, b) - expected).abs() < 1e-3);
        assert!(
            (ManhattanHeuristic.heuristic_cost(&data, a, b) - pa.l1_distance(&pb)).abs() < 1e-3
        );
        assert_eq!(FixedTraversalCost::default().traversal_cost(&data, a, b), 1.0);
    }

    #[test]
    fn invalid_links_are_untraversable() {
        let data = data_with_obstacle();
        let a = data.link_from_position(PointN([50.0, 50.0, 50.0])).unwrap();

        assert_eq!(
            DistanceTraversalCost.traversal_cost(&data, a, OctreeLink::INVALID),
            f32::INFINITY
        );
        assert_eq!(
            EuclideanHeuristic.heuristic_cost(&data, OctreeLink::INVALID, a),
            f32::INFINITY
        );
    }

    #[test]
    fn node_size_compensation_discounts_coarse_layers() {
        let data = data_with_obstacle();
        let fine = data.link_from_position(PointN([150.0, 150.0, 50.0])).unwrap();
        let coarse = data.link_from_position(PointN([350.0, 350.0, 350.0])).unwrap();
        assert_eq!(fine.layer_index(), 0);
        assert_eq!(coarse.layer_index(), 1);

        let settings = NavigationQueryFilterSettings {
            heuristic_scale: 2.0,
            ..Default::default()
        };
        let heuristic = ConstantHeuristic(12.0);

        assert_eq!(settings.scaled_heuristic_cost(&heuristic, &data, fine, coarse), 24.0);
        // Layer 1 of 3 layers.
        assert!((settings.scaled_heuristic_cost(&heuristic, &data, coarse, fine) - 16.0).abs() < 1e-4);

        let uncompensated = NavigationQueryFilterSettings {
            use_node_size_compensation: false,
            ..settings
        };
        assert_eq!(uncompensated.scaled_heuristic_cost(&heuristic, &data, coarse, fine), 24.0);
    }

    struct ConstantHeuristic(f32);

    impl HeuristicCalculator for ConstantHeuristic {
        fn heuristic_cost(&self, _: &BoundsNavigationData, _: OctreeLink, _: OctreeLink) -> f32 {
            self.0
        }
    }
}
