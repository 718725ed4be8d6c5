use crate::{LayerIndex, LeafIndex, MortonCode, NodeIndex, OctreeLeaf, OctreeLink, OctreeNode};

use serde::{Deserialize, Serialize};
use std::mem;
use std::ops::Range;

/// The node layers and leaves of one octree.
///
/// `nodes_by_layer[0]` is the finest layer of nodes, and `nodes_by_layer[layer_count - 1]` is the root layer. Every layer
/// is sorted by Morton code, so nodes can be found by binary search and the children of any node are contiguous in the
/// layer below. `leaves[i]` belongs to `nodes_by_layer[0][i]`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct OctreeData {
    pub nodes_by_layer: Vec<Vec<OctreeNode>>,
    pub leaves: Vec<OctreeLeaf>,
}

impl OctreeData {
    /// Drops all nodes and leaves and makes room for `layer_count` empty layers.
    pub fn reset(&mut self, layer_count: LayerIndex) {
        self.nodes_by_layer.clear();
        self.nodes_by_layer
            .resize_with(layer_count as usize, Vec::new);
        self.leaves.clear();
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.nodes_by_layer.len()
    }

    /// The nodes of `layer`, or an empty slice if there is no such layer.
    #[inline]
    pub fn layer(&self, layer: LayerIndex) -> &[OctreeNode] {
        self.nodes_by_layer
            .get(layer as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn layer_mut(&mut self, layer: LayerIndex) -> Option<&mut Vec<OctreeNode>> {
        self.nodes_by_layer.get_mut(layer as usize)
    }

    /// The root layer.
    #[inline]
    pub fn last_layer(&self) -> &[OctreeNode] {
        self.nodes_by_layer
            .last()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn leaf(&self, index: LeafIndex) -> Option<&OctreeLeaf> {
        self.leaves.get(index as usize)
    }

    #[inline]
    pub fn node(&self, layer: LayerIndex, index: NodeIndex) -> Option<&OctreeNode> {
        self.layer(layer).get(index as usize)
    }

    /// Dereferences `link` as a node. The sub-node index is ignored.
    #[inline]
    pub fn node_from_link(&self, link: OctreeLink) -> Option<&OctreeNode> {
        if !link.is_valid() {
            return None;
        }

        self.node(link.layer_index(), link.node_index())
    }

    /// The leaf owned by the layer 0 node that `link` refers to.
    #[inline]
    pub fn leaf_from_link(&self, link: OctreeLink) -> Option<&OctreeLeaf> {
        if link.layer_index() != 0 {
            return None;
        }

        self.leaf(link.node_index())
    }

    /// Binary searches `layer` for the node with `morton_code`.
    pub fn node_index_from_morton_code(
        &self,
        layer: LayerIndex,
        morton_code: MortonCode,
    ) -> Option<NodeIndex> {
        self.layer(layer)
            .binary_search_by_key(&morton_code, |n| n.morton_code)
            .ok()
            .map(|i| i as NodeIndex)
    }

    /// The range of node indices in `layer` whose Morton codes are in `codes`.
    pub fn node_range_for_morton_codes(
        &self,
        layer: LayerIndex,
        codes: Range<MortonCode>,
    ) -> Range<usize> {
        let nodes = self.layer(layer);
        let start = nodes.partition_point(|n| n.morton_code < codes.start);
        let end = start + nodes[start..].partition_point(|n| n.morton_code < codes.end);

        start..end
    }

    /// The range of node indices in `layer - 1` that are children of the node with `parent_code` in `layer`.
    #[inline]
    pub fn child_range(&self, layer: LayerIndex, parent_code: MortonCode) -> Range<usize> {
        if layer == 0 {
            return 0..0;
        }
        let first = parent_code << 3;

        self.node_range_for_morton_codes(layer - 1, first..first + 8)
    }

    /// The total number of nodes across all layers.
    pub fn node_count(&self) -> usize {
        self.nodes_by_layer.iter().map(Vec::len).sum()
    }

    /// The number of bytes of heap and inline storage owned by this octree.
    pub fn allocated_size(&self) -> usize {
        mem::size_of::<Self>()
            + self.nodes_by_layer.capacity() * mem::size_of::<Vec<OctreeNode>>()
            + self
                .nodes_by_layer
                .iter()
                .map(|l| l.capacity() * mem::size_of::<OctreeNode>())
                .sum::<usize>()
            + self.leaves.capacity() * mem::size_of::<OctreeLeaf>()
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

    use pretty_assertions::assert_eq;

    fn layer_with_codes(codes: &[MortonCode]) -> Vec<OctreeNode> {
        codes.iter().map(|&c| OctreeNode::new(c)).collect()
    }

    fn two_layer_octree() -> OctreeData {
        let mut data = OctreeData::default();
        data.reset(2);
        data.nodes_by_layer[0] = layer_with_codes(&[0, 3, 5, 8, 17]);
        data.nodes_by_layer[1] = layer_with_codes(&[0, 1, 2]);
        data.leaves = vec![OctreeLeaf::EMPTY; 5];

        data
    }

    #[test]
    fn reset_clears_and_sizes_layers() {
        let mut data = two_layer_octree();
        data.reset(4);

        assert_eq!(data.layer_count(), 4);
        assert_eq!(data.node_count(), 0);
        assert!(data.leaves.is_empty());
        assert!(data.last_layer().is_empty());
    }

    #[test]
    fn find_nodes_by_morton_code() {
        let data = two_layer_octree();

        assert_eq!(data.node_index_from_morton_code(0, 5), Some(2));
        assert_eq!(data.node_index_from_morton_code(0, 6), None);
        assert_eq!(data.node_index_from_morton_code(1, 2), Some(2));
        assert_eq!(data.node_index_from_morton_code(7, 0), None);
    }

    #[test]
    fn child_ranges_are_contiguous() {
        let data = two_layer_octree();

        assert_eq!(data.child_range(1, 0), 0..3);
        assert_eq!(data.child_range(1, 1), 3..4);
        assert_eq!(data.child_range(1, 2), 4..5);
        assert_eq!(data.child_range(1, 3), 5..5);
        assert_eq!(data.child_range(0, 0), 0..0);
    }

    #[test]
    fn dereference_links() {
        let data = two_layer_octree();

        assert_eq!(
            data.node_from_link(OctreeLink::new(0, 3, 0)).map(|n| n.morton_code),
            Some(8)
        );
        assert!(data.node_from_link(OctreeLink::new(0, 5, 0)).is_none());
        assert!(data.node_from_link(OctreeLink::new(9, 0, 0)).is_none());
        assert!(data.node_from_link(OctreeLink::INVALID).is_none());
        assert!(data.leaf_from_link(OctreeLink::new(0, 4, 0)).is_some());
        assert!(data.leaf_from_link(OctreeLink::new(1, 0, 0)).is_none());
    }

    #[test]
    fn counts_and_sizes() {
        let data = two_layer_octree();

        assert_eq!(data.node_count(), 8);
        assert_eq!(data.last_layer().len(), 3);
        assert!(
            data.allocated_size()
                >= 8 * mem::size_of::<OctreeNode>() + 5 * mem::size_of::<OctreeLeaf>()
        );
    }

    #[test]
    fn bincode_round_trip() {
        let mut data = two_layer_octree();
        data.nodes_by_layer[0][1].parent = OctreeLink::new(1, 0, 0);
        data.leaves[2].set_sub_node(9);

        let bytes = bincode::serialize(&data).unwrap();
        let back: OctreeData = bincode::deserialize(&bytes).unwrap();

        assert_eq!(back, data);
    }
}
