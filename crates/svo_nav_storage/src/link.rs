use crate::{LayerIndex, NodeIndex, SubNodeIndex};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A compact handle to a node, or to a sub-cell of a leaf, anywhere in an octree.
///
/// The handle is bit-packed into 32 bits and persisted as that raw bit pattern:
/// ```text
/// bits 28..32: layer index (4 bits, 15 = invalid)
/// bits  6..28: node index within the layer (22 bits)
/// bits  0..6:  sub-node index within a leaf (6 bits)
/// ```
///
/// Links are plain values. They do not keep the octree alive, and a link into an octree that has been removed is simply
/// dangling.
#[derive(Clone, Copy, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OctreeLink {
    raw: u32,
}

const LAYER_SHIFT: u32 = 28;
const NODE_SHIFT: u32 = 6;
const LAYER_MASK: u32 = 0xF;
const NODE_MASK: u32 = (1 << 22) - 1;
const SUB_NODE_MASK: u32 = (1 << 6) - 1;

impl OctreeLink {
    /// The layer index reserved for invalid links.
    pub const INVALID_LAYER: LayerIndex = 15;
    /// The greatest layer index a valid link can refer to.
    pub const MAX_LAYER: LayerIndex = 14;
    /// The number of addressable nodes in one layer.
    pub const MAX_NODE_COUNT: usize = 1 << 22;

    /// The link that refers to nothing.
    pub const INVALID: Self = Self {
        raw: (Self::INVALID_LAYER as u32) << LAYER_SHIFT,
    };

    /// Packs the three fields. Values wider than their bit field are truncated.
    #[inline]
    pub fn new(
        layer_index: LayerIndex,
        node_index: NodeIndex,
        sub_node_index: SubNodeIndex,
    ) -> Self {
        debug_assert!(u32::from(layer_index) <= LAYER_MASK);
        debug_assert!(node_index <= NODE_MASK);
        debug_assert!(u32::from(sub_node_index) <= SUB_NODE_MASK);

        Self {
            raw: ((u32::from(layer_index) & LAYER_MASK) << LAYER_SHIFT)
                | ((node_index & NODE_MASK) << NODE_SHIFT)
                | (u32::from(sub_node_index) & SUB_NODE_MASK),
        }
    }

    #[inline]
    pub fn invalid() -> Self {
        Self::INVALID
    }

    /// Reinterprets a raw bit pattern, e.g. one read back from disk.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self { raw }
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.raw
    }

    #[inline]
    pub fn layer_index(&self) -> LayerIndex {
        ((self.raw >> LAYER_SHIFT) & LAYER_MASK) as LayerIndex
    }

    #[inline]
    pub fn node_index(&self) -> NodeIndex {
        (self.raw >> NODE_SHIFT) & NODE_MASK
    }

    #[inline]
    pub fn sub_node_index(&self) -> SubNodeIndex {
        (self.raw & SUB_NODE_MASK) as SubNodeIndex
    }

    /// Only the layer is inspected. A valid link may still refer to a node that does not exist; that is checked when the
    /// link is dereferenced.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.layer_index() != Self::INVALID_LAYER
    }

    /// Marks the link invalid, keeping the node and sub-node fields.
    #[inline]
    pub fn invalidate(&mut self) {
        self.raw |= LAYER_MASK << LAYER_SHIFT;
    }

    /// The same node, addressing a different sub-cell of its leaf.
    #[inline]
    pub fn with_sub_node_index(&self, sub_node_index: SubNodeIndex) -> Self {
        Self::new(self.layer_index(), self.node_index(), sub_node_index)
    }
}

impl Default for OctreeLink {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for OctreeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "OctreeLink({}, {}, {})",
                self.layer_index(),
                self.node_index(),
                self.sub_node_index()
            )
        } else {
            write!(f, "OctreeLink(INVALID)")
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
