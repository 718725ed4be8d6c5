use crate::{BoundsGenerationSettings, PersistenceError, SmallKeyHashSet};

use serde::{Deserialize, Serialize};
use svo_nav_core::prelude::*;
use svo_nav_storage::prelude::*;

/// The navigation octree of one bounded volume.
///
/// Construct it with `generate` (or `default` followed by `generate_navigation_data`). Afterwards it is read-only, and all
/// queries take `&self`.
///
/// Only the geometry and the octree are persisted, in this order: `navigation_bounds`, `volume_bounds`, `voxel_exponent`,
/// `layer_count`, `used_box_extent`, `octree_data`. The generation settings are not persisted.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct BoundsNavigationData {
    pub(crate) navigation_bounds: Extent3f,
    pub(crate) volume_bounds: Extent3f,
    pub(crate) voxel_exponent: i32,
    pub(crate) layer_count: u8,
    pub(crate) used_box_extent: f32,
    pub(crate) octree_data: OctreeData,

    #[serde(skip)]
    pub(crate) settings: BoundsGenerationSettings,
    /// Scratch space for generation: the codes of the blocked cells of each layer.
    #[serde(skip)]
    pub(crate) blocked_morton_codes_by_layer: Vec<SmallKeyHashSet<MortonCode>>,
}

impl BoundsNavigationData {
    /// The settings of the last generation. Decoded data carries the default settings.
    #[inline]
    pub fn generation_settings(&self) -> &BoundsGenerationSettings {
        &self.settings
    }

    /// The box that was requested for generation.
    #[inline]
    pub fn volume_bounds(&self) -> &Extent3f {
        &self.volume_bounds
    }

    /// The cube actually covered by the octree. It contains `volume_bounds` and shares its center.
    #[inline]
    pub fn navigation_bounds(&self) -> &Extent3f {
        &self.navigation_bounds
    }

    #[inline]
    pub fn octree_data(&self) -> &OctreeData {
        &self.octree_data
    }

    /// The root layer has `2^voxel_exponent` layer 0 cells along each axis.
    #[inline]
    pub fn voxel_exponent(&self) -> i32 {
        self.voxel_exponent
    }

    #[inline]
    pub fn layer_count(&self) -> LayerIndex {
        self.layer_count
    }

    /// Half of the edge length of a layer 0 node.
    #[inline]
    pub fn used_box_extent(&self) -> f32 {
        self.used_box_extent
    }

    /// Edge length of a layer 0 node.
    #[inline]
    pub fn leaf_voxel_size(&self) -> f32 {
        self.used_box_extent * 2.0
    }

    /// The edge length of a node in `layer`.
    #[inline]
    pub fn voxel_size(&self, layer: LayerIndex) -> f32 {
        self.leaf_voxel_size() * self.layer_ratio(layer)
    }

    /// How many layer 0 cells fit along one edge of a `layer` cell: `2^layer`.
    #[inline]
    pub fn layer_ratio(&self, layer: LayerIndex) -> f32 {
        2f32.powi(i32::from(layer))
    }

    #[inline]
    pub fn layer_inverse_ratio(&self, layer: LayerIndex) -> f32 {
        1.0 / self.layer_ratio(layer)
    }

    /// The number of cells along one edge of the volume at `layer`: `2^(voxel_exponent - layer)`. Zero for layers above
    /// the root.
    #[inline]
    pub fn layer_max_node_count(&self, layer: LayerIndex) -> i32 {
        let shift = self.voxel_exponent - i32::from(layer);
        if !(0..=i32::from(OctreeLink::MAX_LAYER)).contains(&shift) {
            return 0;
        }

        1 << shift
    }

    /// Whether `link` may refer to a node. Only the layer field is inspected; no node is dereferenced.
    #[inline]
    pub fn is_valid_ref(&self, link: OctreeLink) -> bool {
        link.is_valid()
    }

    /// Approximate number of bytes owned by this volume.
    pub fn allocated_size(&self) -> usize {
        std::mem::size_of::<Self>() - std::mem::size_of::<OctreeData>()
            + self.octree_data.allocated_size()
            + self
                .blocked_morton_codes_by_layer
                .iter()
                .map(|s| s.capacity() * std::mem::size_of::<MortonCode>())
                .sum::<usize>()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        bincode::serialize(self).map_err(PersistenceError::Encode)
    }

    /// Decodes data written by `to_bytes`. Fails if the bytes are not a navigation volume, or if the geometry in the header
    /// disagrees with the octree that follows it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        let data: Self = bincode::deserialize(bytes).map_err(PersistenceError::Decode)?;
        data.check_header()?;

        Ok(data)
    }

    /// Checks the invariants that queries rely on when the data was not produced by generation.
    pub(crate) fn check_header(&self) -> Result<(), PersistenceError> {
        let octree = &self.octree_data;

        // Never generated.
        if self.layer_count == 0 {
            return if octree.layer_count() == 0 && octree.leaves.is_empty() {
                Ok(())
            } else {
                Err(PersistenceError::InvalidHeader("an octree without layers has nodes"))
            };
        }

        if !(0..=i32::from(OctreeLink::MAX_LAYER)).contains(&self.voxel_exponent) {
            return Err(PersistenceError::InvalidHeader("voxel exponent out of range"));
        }
        if i32::from(self.layer_count) != self.voxel_exponent + 1 {
            return Err(PersistenceError::InvalidHeader("layer count does not match voxel exponent"));
        }
        if octree.layer_count() != self.layer_count as usize {
            return Err(PersistenceError::InvalidHeader("octree layer count does not match header"));
        }
        if octree.leaves.len() != octree.layer(0).len() {
            return Err(PersistenceError::InvalidHeader("leaf count does not match layer 0"));
        }
        if !(self.used_box_extent.is_finite() && self.used_box_extent > 0.0) || self.navigation_bounds.is_degenerate() {
            return Err(PersistenceError::InvalidHeader("degenerate navigation bounds"));
        }

        Ok(())
    }
}
