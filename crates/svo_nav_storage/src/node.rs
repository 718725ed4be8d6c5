use crate::{MortonCode, OctreeLink};

use serde::{Deserialize, Serialize};
use svo_nav_core::SignedAxis3;

/// The number of face neighbors of a node, one per `SignedAxis3` in the order `+X, -X, +Y, -Y, +Z, -Z`.
pub const NEIGHBOR_COUNT: usize = 6;

/// One node of any layer of the octree.
///
/// For layer 0 nodes, `first_child` refers to the node's leaf as `(0, leaf index, 0)` and is always valid. For coarser
/// layers, `first_child` refers to the first of the node's children in the layer below (children of a node are stored
/// contiguously, sorted by Morton code), or is invalid if the node has no children.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OctreeNode {
    pub morton_code: MortonCode,
    pub parent: OctreeLink,
    pub first_child: OctreeLink,
    pub neighbors: [OctreeLink; NEIGHBOR_COUNT],
}

impl OctreeNode {
    /// A node with every link invalid.
    pub const EMPTY: Self = Self {
        morton_code: 0,
        parent: OctreeLink::INVALID,
        first_child: OctreeLink::INVALID,
        neighbors: [OctreeLink::INVALID; NEIGHBOR_COUNT],
    };

    pub fn new(morton_code: MortonCode) -> Self {
        Self {
            morton_code,
            ..Self::EMPTY
        }
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_valid()
    }

    #[inline]
    pub fn neighbor(&self, direction: SignedAxis3) -> OctreeLink {
        self.neighbors[direction.index()]
    }

    #[inline]
    pub fn set_neighbor(&mut self, direction: SignedAxis3, link: OctreeLink) {
        self.neighbors[direction.index()] = link;
    }
}

impl Default for OctreeNode {
    fn default() -> Self {
        Self::EMPTY
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
