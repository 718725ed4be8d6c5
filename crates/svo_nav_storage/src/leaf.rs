use crate::SubNodeIndex;

use serde::{Deserialize, Serialize};
use svo_nav_core::prelude::*;

/// The occupancy of one leaf-layer voxel, split into 4x4x4 sub-cells.
///
/// Bit `i` is set iff the sub-cell with Morton index `i` (within the leaf) is occupied.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct OctreeLeaf {
    pub sub_nodes: u64,
}

impl OctreeLeaf {
    /// The number of sub-cells along one edge of a leaf.
    pub const EDGE: i32 = 4;
    /// The number of sub-cells in a leaf.
    pub const SUB_NODE_COUNT: usize = 64;

    pub const EMPTY: Self = Self { sub_nodes: 0 };
    pub const FULL: Self = Self {
        sub_nodes: u64::MAX,
    };

    /// Marks the sub-cell at local coordinates `p`, each in `[0, 4)`, as occupied.
    #[inline]
    pub fn set_sub_node_at(&mut self, p: Point3i) {
        self.set_sub_node(Self::sub_node_index_at(p));
    }

    /// True iff the sub-cell at local coordinates `p` is occupied.
    #[inline]
    pub fn sub_node_at(&self, p: Point3i) -> bool {
        self.sub_node(Self::sub_node_index_at(p))
    }

    #[inline]
    pub fn set_sub_node(&mut self, index: SubNodeIndex) {
        debug_assert!(usize::from(index) < Self::SUB_NODE_COUNT);
        self.sub_nodes |= 1 << index;
    }

    #[inline]
    pub fn clear_sub_node(&mut self, index: SubNodeIndex) {
        debug_assert!(usize::from(index) < Self::SUB_NODE_COUNT);
        self.sub_nodes &= !(1 << index);
    }

    #[inline]
    pub fn sub_node(&self, index: SubNodeIndex) -> bool {
        debug_assert!(usize::from(index) < Self::SUB_NODE_COUNT);
        self.sub_nodes & (1 << index) != 0
    }

    /// True iff every sub-cell is occupied.
    #[inline]
    pub fn is_occluded(&self) -> bool {
        self.sub_nodes == u64::MAX
    }

    /// True iff no sub-cell is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sub_nodes == 0
    }

    #[inline]
    pub fn occupied_count(&self) -> u32 {
        self.sub_nodes.count_ones()
    }

    /// The Morton index of the sub-cell at local coordinates `p`.
    #[inline]
    pub fn sub_node_index_at(p: Point3i) -> SubNodeIndex {
        debug_assert!(p.is_in_cube(Self::EDGE), "{:?} is not inside a leaf", p);

        Morton3::from(p).0 as SubNodeIndex
    }

    /// The local coordinates of the sub-cell with Morton index `index`.
    #[inline]
    pub fn sub_node_coordinates(index: SubNodeIndex) -> Point3i {
        Point3i::from(Morton3(u64::from(index)))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
