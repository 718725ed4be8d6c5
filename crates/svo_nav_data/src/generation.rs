use crate::{BoundsGenerationSettings, BoundsNavigationData, GenerationError, OcclusionQuery, SmallKeyHashSet};

use svo_nav_core::prelude::*;
use svo_nav_storage::prelude::*;

/// The deepest octree a link can address.
const MAX_VOXEL_EXPONENT: i32 = OctreeLink::MAX_LAYER as i32;

impl BoundsNavigationData {
    /// Voxelizes `volume_bounds` against `world` into a new octree.
    pub fn generate<W>(
        volume_bounds: Extent3f,
        settings: &BoundsGenerationSettings,
        world: &W,
    ) -> Result<Self, GenerationError>
    where
        W: OcclusionQuery + ?Sized,
    {
        let mut data = Self::default();
        data.generate_navigation_data(volume_bounds, settings, world)?;

        Ok(data)
    }

    /// Voxelizes `volume_bounds` against `world`, replacing any octree this object already holds.
    ///
    /// On error, nothing is replaced if the inputs were rejected, and the octree is left empty if it outgrew the link format.
    pub fn generate_navigation_data<W>(
        &mut self,
        volume_bounds: Extent3f,
        settings: &BoundsGenerationSettings,
        world: &W,
    ) -> Result<(), GenerationError>
    where
        W: OcclusionQuery + ?Sized,
    {
        let span = tracing::info_span!("generate_navigation_data");
        let _trace_guard = span.enter();

        let voxel_exponent = voxel_exponent_for(&volume_bounds, settings.voxel_size).map_err(|e| {
            tracing::warn!("Rejected navigation volume {:?}: {}", volume_bounds, e);
            e
        })?;
        let layer_count = (voxel_exponent + 1) as LayerIndex;
        let navigation_edge = settings.voxel_size * (1u32 << voxel_exponent) as f32;

        self.settings = settings.clone();
        self.volume_bounds = volume_bounds;
        self.voxel_exponent = voxel_exponent;
        self.layer_count = layer_count;
        self.navigation_bounds = Extent3f::cube_centered_at(volume_bounds.center(), navigation_edge);
        self.used_box_extent = settings.voxel_size * 0.5;
        self.octree_data.reset(layer_count);
        self.blocked_morton_codes_by_layer = vec![SmallKeyHashSet::default(); layer_count as usize];

        tracing::debug!(
            "Voxelizing {:?} with {} layers, voxel size {}",
            self.navigation_bounds,
            layer_count,
            settings.voxel_size
        );

        let result = self.rasterize(world);
        if let Err(e) = &result {
            tracing::warn!("Navigation generation failed: {}", e);
            self.octree_data.reset(layer_count);
        }
        self.blocked_morton_codes_by_layer = Vec::new();

        result
    }

    fn rasterize<W>(&mut self, world: &W) -> Result<(), GenerationError>
    where
        W: OcclusionQuery + ?Sized,
    {
        let root_layer = self.layer_count - 1;

        self.first_pass_rasterization(world, root_layer, 0);
        tracing::debug!(
            "First pass found {} blocked layer 0 cells",
            self.blocked_morton_codes_by_layer[0].len()
        );

        let leaf_codes = self.allocate_leaf_nodes(world)?;
        tracing::debug!("Allocated {} leaves", leaf_codes.len());

        self.rasterize_initial_layer(&leaf_codes);
        for layer in 1..self.layer_count {
            self.rasterize_layer(layer)?;
            tracing::debug!(
                "Layer {} has {} nodes",
                layer,
                self.octree_data.layer(layer).len()
            );
        }

        for layer in (0..self.layer_count).rev() {
            self.build_neighbor_links(layer);
        }
        tracing::debug!("Generated {} nodes", self.octree_data.node_count());

        Ok(())
    }

    /// Tests the cell `code` of `layer` and, if it is occluded, its children. Returns `true` iff some layer 0 cell under
    /// `code` is occluded, in which case `code` is recorded as blocked.
    fn first_pass_rasterization<W>(&mut self, world: &W, layer: LayerIndex, code: MortonCode) -> bool
    where
        W: OcclusionQuery + ?Sized,
    {
        let position = self.node_position(layer, code);
        let half_extent = self.used_box_extent * self.layer_ratio(layer);
        if !self.is_position_occluded(world, position, half_extent) {
            return false;
        }

        let blocked = if layer == 0 {
            true
        } else {
            let mut any_child_blocked = false;
            for octant in 0..8 {
                any_child_blocked |= self.first_pass_rasterization(
                    world,
                    layer - 1,
                    Morton3(code).child(octant).0,
                );
            }
            any_child_blocked
        };
        if blocked {
            self.blocked_morton_codes_by_layer[layer as usize].insert(code);
        }

        blocked
    }

    /// Rasterizes the leaves of every layer 0 cell under a blocked layer 1 cell, skipping those that are entirely solid.
    /// Returns the Morton codes of the allocated leaves in ascending order.
    fn allocate_leaf_nodes<W>(&mut self, world: &W) -> Result<Vec<MortonCode>, GenerationError>
    where
        W: OcclusionQuery + ?Sized,
    {
        let candidates = self.layer_candidates(0);
        let mut leaf_codes = Vec::with_capacity(candidates.len());
        let mut leaves = Vec::with_capacity(candidates.len());
        for code in candidates {
            let leaf = if self.blocked_morton_codes_by_layer[0].contains(&code) {
                let leaf = self.rasterize_leaf(world, self.node_position(0, code));
                if leaf.is_occluded() {
                    continue;
                }
                leaf
            } else {
                OctreeLeaf::EMPTY
            };
            leaf_codes.push(code);
            leaves.push(leaf);
        }
        check_node_count(0, leaf_codes.len())?;
        self.octree_data.leaves = leaves;

        Ok(leaf_codes)
    }

    fn rasterize_leaf<W>(&self, world: &W, node_position: Point3f) -> OctreeLeaf
    where
        W: OcclusionQuery + ?Sized,
    {
        let sub_node_size = self.leaf_voxel_size() / OctreeLeaf::EDGE as f32;
        let leaf_min = node_position - Point3f::fill(self.used_box_extent);

        let sub_cells = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i::fill(OctreeLeaf::EDGE));
        let mut leaf = OctreeLeaf::EMPTY;
        for p in sub_cells.iter_points() {
            let center = leaf_min + (Point3f::from(p) + Point3f::fill(0.5)) * sub_node_size;
            if self.is_position_occluded(world, center, sub_node_size * 0.5) {
                leaf.set_sub_node_at(p);
            }
        }

        leaf
    }

    /// Creates one layer 0 node per leaf.
    fn rasterize_initial_layer(&mut self, leaf_codes: &[MortonCode]) {
        let nodes = leaf_codes
            .iter()
            .enumerate()
            .map(|(leaf_index, &code)| OctreeNode {
                first_child: OctreeLink::new(0, leaf_index as NodeIndex, 0),
                ..OctreeNode::new(code)
            })
            .collect();
        self.octree_data.nodes_by_layer[0] = nodes;
    }

    /// Creates the nodes of `layer` and links them to their children in `layer - 1`. Free cells become childless nodes;
    /// blocked cells only survive if some child survived.
    fn rasterize_layer(&mut self, layer: LayerIndex) -> Result<(), GenerationError> {
        let child_layer = (layer - 1) as usize;
        let mut nodes = Vec::new();
        for code in self.layer_candidates(layer) {
            let mut node = OctreeNode::new(code);
            if self.blocked_morton_codes_by_layer[layer as usize].contains(&code) {
                let children = self.octree_data.child_range(layer, code);
                if children.is_empty() {
                    continue;
                }
                let parent = OctreeLink::new(layer, nodes.len() as NodeIndex, 0);
                node.first_child = OctreeLink::new(layer - 1, children.start as NodeIndex, 0);
                for child in &mut self.octree_data.nodes_by_layer[child_layer][children] {
                    child.parent = parent;
                }
            }
            nodes.push(node);
        }
        check_node_count(layer, nodes.len())?;
        self.octree_data.nodes_by_layer[layer as usize] = nodes;

        Ok(())
    }

    /// The cells of `layer` that may hold a node: the children of the blocked cells one layer up, or the root cell.
    fn layer_candidates(&self, layer: LayerIndex) -> Vec<MortonCode> {
        if layer + 1 >= self.layer_count {
            return vec![0];
        }
        let mut parents: Vec<MortonCode> = self.blocked_morton_codes_by_layer[layer as usize + 1]
            .iter()
            .copied()
            .collect();
        parents.sort_unstable();

        parents
            .into_iter()
            .flat_map(|parent| (0..8).map(move |octant| Morton3(parent).child(octant).0))
            .collect()
    }

    fn build_neighbor_links(&mut self, layer: LayerIndex) {
        let neighbors: Vec<_> = self
            .octree_data
            .layer(layer)
            .iter()
            .map(|node| {
                let mut links = [OctreeLink::INVALID; NEIGHBOR_COUNT];
                for direction in SignedAxis3::ALL.iter() {
                    links[direction.index()] =
                        self.find_neighbor_in_direction(layer, node.morton_code, *direction);
                }
                links
            })
            .collect();

        if let Some(nodes) = self.octree_data.layer_mut(layer) {
            for (node, links) in nodes.iter_mut().zip(neighbors) {
                node.neighbors = links;
            }
        }
    }

    /// The node that shares the face in `direction` with the cell `code` of `layer`. This is either a node of the same layer,
    /// or the coarser free node that contains the adjacent cell. Solid space and the outside of the volume give an invalid
    /// link.
    fn find_neighbor_in_direction(
        &self,
        layer: LayerIndex,
        code: MortonCode,
        direction: SignedAxis3,
    ) -> OctreeLink {
        let adjacent = Point3i::from(Morton3(code)) + direction.get_vector();
        if !adjacent.is_in_cube(self.layer_max_node_count(layer)) {
            return OctreeLink::INVALID;
        }

        let mut search_code = Morton3::from(adjacent);
        for search_layer in layer..self.layer_count {
            if let Some(index) = self
                .octree_data
                .node_index_from_morton_code(search_layer, search_code.0)
            {
                let found = &self.octree_data.layer(search_layer)[index as usize];
                if search_layer == layer || !found.has_children() {
                    return OctreeLink::new(search_layer, index, 0);
                }
                return OctreeLink::INVALID;
            }
            search_code = search_code.parent();
        }

        OctreeLink::INVALID
    }

    fn is_position_occluded<W>(&self, world: &W, position: Point3f, half_extent: f32) -> bool
    where
        W: OcclusionQuery + ?Sized,
    {
        let generation = &self.settings.generation_settings;

        world.is_box_occluded(
            position,
            half_extent + generation.clearance,
            generation.collision_channel,
            &generation.query,
        )
    }
}

/// The smallest `e` such that `2^e` voxels span the largest edge of `volume_bounds`.
fn voxel_exponent_for(volume_bounds: &Extent3f, voxel_size: f32) -> Result<i32, GenerationError> {
    if !(voxel_size.is_finite() && voxel_size > 0.0) {
        return Err(GenerationError::InvalidVoxelSize(voxel_size));
    }
    if volume_bounds.is_degenerate() {
        return Err(GenerationError::DegenerateVolume(*volume_bounds));
    }

    let largest_edge = f64::from(volume_bounds.largest_edge_length());
    let mut exponent = 0;
    while f64::from(voxel_size) * 2f64.powi(exponent) < largest_edge {
        exponent += 1;
    }
    if exponent > MAX_VOXEL_EXPONENT {
        return Err(GenerationError::TooManyLayers {
            layer_count: exponent as u32 + 1,
            max: MAX_VOXEL_EXPONENT as u32 + 1,
        });
    }

    Ok(exponent)
}

fn check_node_count(layer: LayerIndex, count: usize) -> Result<(), GenerationError> {
    if count > OctreeLink::MAX_NODE_COUNT {
        return Err(GenerationError::TooManyNodes {
            layer,
            count,
            max: OctreeLink::MAX_NODE_COUNT,
        });
    }

    Ok(())
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

    use crate::StaticBoxWorld;

    use pretty_assertions::assert_eq;

    fn cube(min: f32, edge: f32) -> Extent3f {
        Extent3f::from_min_and_shape(Point3f::fill(min), Point3f::fill(edge))
    }

    fn empty_world(_: Point3f, _: f32) -> bool {
        false
    }

    #[test]
    fn exponent_covers_largest_edge() {
        assert_eq!(voxel_exponent_for(&cube(0.0, 800.0), 100.0), Ok(3));
        assert_eq!(voxel_exponent_for(&cube(0.0, 801.0), 100.0), Ok(4));
        assert_eq!(voxel_exponent_for(&cube(0.0, 50.0), 100.0), Ok(0));
        assert_eq!(
            voxel_exponent_for(
                &Extent3f::from_min_and_shape(Point3f::ZERO, PointN([100.0, 300.0, 10.0])),
                100.0
            ),
            Ok(2)
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            voxel_exponent_for(&cube(0.0, 100.0), 0.0),
            Err(GenerationError::InvalidVoxelSize(0.0))
        );
        assert!(matches!(
            voxel_exponent_for(&cube(0.0, 100.0), f32::NAN),
            Err(GenerationError::InvalidVoxelSize(_))
        ));
        let flat = Extent3f::from_min_and_shape(Point3f::ZERO, PointN([100.0, 0.0, 100.0]));
        assert_eq!(
            voxel_exponent_for(&flat, 10.0),
            Err(GenerationError::DegenerateVolume(flat))
        );
        assert!(matches!(
            voxel_exponent_for(&cube(0.0, 1.0e9), 1.0),
            Err(GenerationError::TooManyLayers { max: 15, .. })
        ));
        assert_eq!(voxel_exponent_for(&cube(0.0, 16384.0), 1.0), Ok(14));
    }

    #[test]
    fn rejected_generation_keeps_previous_octree() {
        let settings = BoundsGenerationSettings::with_voxel_size(100.0);
        let mut data =
            BoundsNavigationData::generate(cube(0.0, 400.0), &settings, &empty_world).unwrap();
        let before = data.octree_data().clone();

        let result = data.generate_navigation_data(
            cube(0.0, 400.0),
            &BoundsGenerationSettings::with_voxel_size(-1.0),
            &empty_world,
        );

        assert_eq!(result, Err(GenerationError::InvalidVoxelSize(-1.0)));
        assert_eq!(data.octree_data(), &before);
    }

    #[test]
    fn navigation_bounds_are_centered_cube() {
        let volume = Extent3f::from_min_and_shape(PointN([0.0, 0.0, 0.0]), PointN([300.0, 100.0, 50.0]));
        let settings = BoundsGenerationSettings::with_voxel_size(100.0);
        let data = BoundsNavigationData::generate(volume, &settings, &empty_world).unwrap();

        assert_eq!(data.voxel_exponent(), 2);
        assert_eq!(data.layer_count(), 3);
        assert_eq!(data.used_box_extent(), 50.0);
        assert_eq!(
            *data.navigation_bounds(),
            Extent3f::from_min_and_shape(PointN([-50.0, -150.0, -175.0]), Point3f::fill(400.0))
        );
        assert_eq!(*data.volume_bounds(), volume);
    }

    #[test]
    fn first_pass_only_descends_into_occluded_cells() {
        let queries = std::cell::Cell::new(0);
        let world = |center: Point3f, half_extent: f32| {
            queries.set(queries.get() + 1);
            StaticBoxWorld::new(vec![cube(0.0, 100.0)]).is_box_occluded(
                center,
                half_extent,
                crate::CollisionChannel::WorldStatic,
                &Default::default(),
            )
        };
        let settings = BoundsGenerationSettings::with_voxel_size(100.0);
        let data = BoundsNavigationData::generate(cube(0.0, 800.0), &settings, &world).unwrap();

        // One blocked cell per layer down the corner, 8 children tested at each of the 3 lower layers, and 64 sub-cells.
        assert_eq!(queries.get(), 1 + 3 * 8 + 64);
        // The corner leaf is entirely solid, so it is pruned.
        assert_eq!(data.octree_data().leaves.len(), 7);
        assert!(data.octree_data().leaves.iter().all(|l| l.is_empty()));
        assert!(data.blocked_morton_codes_by_layer.is_empty());
    }
}
