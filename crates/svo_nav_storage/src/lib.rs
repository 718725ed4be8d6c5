#![allow(clippy::new_without_default)]

//! Storage for the sparse voxel octree used by navigation queries.
//!
//! The octree is a stack of node layers. Layer 0 is the finest layer of nodes, and every layer 0 node owns one
//! `OctreeLeaf`, a 4x4x4 bitmask of occupied sub-cells. Nodes never point at each other directly. All references are
//! `OctreeLink` handles of the form `(layer, node index, sub-node index)`, which stay valid as long as the layer arrays are
//! not rebuilt, and which serialize as a single `u32`.
//!
//! The core storage types are:
//!   - `OctreeLink`: a 32-bit handle to a node or a leaf sub-cell
//!   - `OctreeLeaf`: the 64-bit occupancy mask of a leaf-layer voxel
//!   - `OctreeNode`: one node of any layer, with parent, first child and 6 face neighbor links
//!   - `OctreeData`: the per-layer node arrays and the leaf array of one bounded volume

pub mod leaf;
pub mod link;
pub mod node;
pub mod octree_data;

pub use leaf::*;
pub use link::*;
pub use node::*;
pub use octree_data::*;

/// The index of a node layer; 0 is the finest layer of nodes.
pub type LayerIndex = u8;
/// The index of a node within its layer's array.
pub type NodeIndex = u32;
/// The index of a leaf within the leaf array. Equal to the index of the owning layer 0 node.
pub type LeafIndex = u32;
/// The Morton code of a sub-cell within a leaf, in `[0, 64)`.
pub type SubNodeIndex = u8;
/// The Morton code of a node within its layer.
pub type MortonCode = u64;

pub mod prelude {
    pub use super::{
        LayerIndex, LeafIndex, MortonCode, NodeIndex, OctreeData, OctreeLeaf, OctreeLink,
        OctreeNode, SubNodeIndex, NEIGHBOR_COUNT,
    };
}
