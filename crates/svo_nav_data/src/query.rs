use crate::BoundsNavigationData;

use svo_nav_core::prelude::*;
use svo_nav_storage::prelude::*;

/// Dereferencing an invalid link with `node_from_link_or_sentinel` yields this node, which links to nothing.
static INVALID_NODE: OctreeNode = OctreeNode::EMPTY;

impl BoundsNavigationData {
    /// The node that `link` refers to, or `None` if `link` is invalid or out of range.
    #[inline]
    pub fn node_from_link(&self, link: OctreeLink) -> Option<&OctreeNode> {
        self.octree_data.node_from_link(link)
    }

    /// Like `node_from_link`, but maps a missing node to a node without any valid links.
    #[inline]
    pub fn node_from_link_or_sentinel(&self, link: OctreeLink) -> &OctreeNode {
        self.node_from_link(link).unwrap_or(&INVALID_NODE)
    }

    /// The world-space center of the cell `morton_code` of `layer`.
    pub fn node_position(&self, layer: LayerIndex, morton_code: MortonCode) -> Point3f {
        let cell = Point3f::from(Point3i::from(Morton3(morton_code)));

        self.navigation_bounds.minimum + (cell + Point3f::fill(0.5)) * self.voxel_size(layer)
    }

    /// The world-space center of the node `link` refers to, or of its sub-cell if the node is a subdivided layer 0 node.
    pub fn link_position(&self, link: OctreeLink) -> Option<Point3f> {
        let node = self.node_from_link(link)?;
        let center = self.node_position(link.layer_index(), node.morton_code);

        match self.subdivided_leaf(link) {
            Some(_) => Some(self.sub_node_position(center, link.sub_node_index())),
            None => Some(center),
        }
    }

    /// The navigable node or sub-cell containing `position`, or `None` if the position is outside of the volume or in solid
    /// space. Positions on the boundary of the volume are inside.
    pub fn link_from_position(&self, position: Point3f) -> Option<OctreeLink> {
        if self.layer_count == 0 || !self.navigation_bounds.contains_point(position) {
            return None;
        }

        let max_cell = self.layer_max_node_count(0) - 1;
        if max_cell < 0 {
            return None;
        }

        let leaf_voxel_size = self.leaf_voxel_size();
        let local = (position - self.navigation_bounds.minimum) / leaf_voxel_size;
        let cell = local.floor().as_3i().clamp_components(0, max_cell);

        let mut code = Morton3::from(cell);
        for layer in 0..self.layer_count {
            if let Some(index) = self.octree_data.node_index_from_morton_code(layer, code.0) {
                let link = OctreeLink::new(layer, index, 0);
                if layer == 0 {
                    return match self.subdivided_leaf(link) {
                        Some(leaf) => {
                            let sub_cell = ((local - Point3f::from(cell)) * OctreeLeaf::EDGE as f32)
                                .floor()
                                .as_3i()
                                .clamp_components(0, OctreeLeaf::EDGE - 1);
                            let sub_node = OctreeLeaf::sub_node_index_at(sub_cell);

                            (!leaf.sub_node(sub_node)).then(|| link.with_sub_node_index(sub_node))
                        }
                        None => Some(link),
                    };
                }

                // A coarser node with children means the finer cell was pruned as solid.
                let node = self.node_from_link(link)?;
                return (!node.has_children()).then(|| link);
            }
            code = code.parent();
        }

        None
    }

    /// The graph neighbors of `link`, possibly including invalid links for blocked faces.
    ///
    /// Sub-cell links of subdivided layer 0 nodes get their adjacent free sub-cells, also across leaf boundaries. Any other
    /// link gets the face neighbor links of its node, which may be coarser nodes. A face shared with a subdivided layer 0
    /// node is replaced by that node's free sub-cells on the face, or by an invalid link if the whole face is occupied.
    pub fn neighbors(&self, link: OctreeLink) -> Vec<OctreeLink> {
        let node = match self.node_from_link(link) {
            Some(node) => node,
            None => return Vec::new(),
        };

        if self.subdivided_leaf(link).is_some() {
            return self.leaf_neighbors(link);
        }

        let mut neighbors = Vec::with_capacity(NEIGHBOR_COUNT);
        for direction in SignedAxis3::ALL.iter() {
            let neighbor_link = node.neighbor(*direction);
            if self.subdivided_leaf(neighbor_link).is_none() {
                neighbors.push(neighbor_link);
                continue;
            }

            let before = neighbors.len();
            self.push_face_descendants(neighbor_link, direction.opposite(), &mut neighbors);
            if neighbors.len() == before {
                neighbors.push(OctreeLink::INVALID);
            }
        }

        neighbors
    }

    fn leaf_neighbors(&self, link: OctreeLink) -> Vec<OctreeLink> {
        let (node, leaf) = match (self.node_from_link(link), self.octree_data.leaf_from_link(link)) {
            (Some(node), Some(leaf)) => (node, leaf),
            _ => return Vec::new(),
        };
        let sub_cell = OctreeLeaf::sub_node_coordinates(link.sub_node_index());

        let mut neighbors = Vec::with_capacity(NEIGHBOR_COUNT);
        for direction in SignedAxis3::ALL.iter() {
            let adjacent = sub_cell + direction.get_vector();
            if adjacent.is_in_cube(OctreeLeaf::EDGE) {
                let sub_node = OctreeLeaf::sub_node_index_at(adjacent);
                if !leaf.sub_node(sub_node) {
                    neighbors.push(link.with_sub_node_index(sub_node));
                }
                continue;
            }

            let neighbor_link = node.neighbor(*direction);
            if !neighbor_link.is_valid() {
                neighbors.push(neighbor_link);
                continue;
            }
            match self.subdivided_leaf(neighbor_link) {
                Some(neighbor_leaf) => {
                    let wrapped = adjacent.map_components(|c| c.rem_euclid(OctreeLeaf::EDGE));
                    let sub_node = OctreeLeaf::sub_node_index_at(wrapped);
                    if !neighbor_leaf.sub_node(sub_node) {
                        neighbors.push(neighbor_link.with_sub_node_index(sub_node));
                    }
                }
                None => neighbors.push(neighbor_link),
            }
        }

        neighbors
    }

    /// The free nodes and sub-cells that share a face with `link`, at the finest resolution available on that face.
    ///
    /// Unlike `neighbors`, invalid links are dropped, and a neighbor with children is replaced by its descendants that touch
    /// the shared face.
    pub fn traversable_neighbors(&self, link: OctreeLink) -> Vec<OctreeLink> {
        let node = match self.node_from_link(link) {
            Some(node) => node,
            None => return Vec::new(),
        };

        if self.subdivided_leaf(link).is_some() {
            let mut neighbors = self.leaf_neighbors(link);
            neighbors.retain(OctreeLink::is_valid);
            return neighbors;
        }

        let mut neighbors = Vec::with_capacity(NEIGHBOR_COUNT);
        for direction in SignedAxis3::ALL.iter() {
            let neighbor_link = node.neighbor(*direction);
            if neighbor_link.is_valid() {
                self.push_face_descendants(neighbor_link, direction.opposite(), &mut neighbors);
            }
        }

        neighbors
    }

    /// Pushes the free leaves of the subtree at `link` that lie on its `face`.
    fn push_face_descendants(&self, link: OctreeLink, face: SignedAxis3, out: &mut Vec<OctreeLink>) {
        let node = match self.node_from_link(link) {
            Some(node) => node,
            None => return,
        };
        let layer = link.layer_index();

        if layer == 0 {
            match self.subdivided_leaf(link) {
                Some(leaf) => {
                    let face_coordinate = if face.sign > 0 { OctreeLeaf::EDGE - 1 } else { 0 };
                    for sub_node in 0..OctreeLeaf::SUB_NODE_COUNT as SubNodeIndex {
                        let sub_cell = OctreeLeaf::sub_node_coordinates(sub_node);
                        if sub_cell.at(face.axis.index()) == face_coordinate && !leaf.sub_node(sub_node) {
                            out.push(link.with_sub_node_index(sub_node));
                        }
                    }
                }
                None => out.push(link),
            }
            return;
        }

        if !node.has_children() {
            out.push(link);
            return;
        }
        let face_bit = if face.sign > 0 { 1 } else { 0 };
        for child in self.octree_data.child_range(layer, node.morton_code) {
            let child_code = self.octree_data.layer(layer - 1)[child].morton_code;
            let octant = Morton3(child_code).octant();
            if (octant >> face.axis.index()) & 1 == face_bit {
                self.push_face_descendants(OctreeLink::new(layer - 1, child as NodeIndex, 0), face, out);
            }
        }
    }

    /// The leaf of a layer 0 node if any of its sub-cells are occupied.
    fn subdivided_leaf(&self, link: OctreeLink) -> Option<&OctreeLeaf> {
        if !link.is_valid() {
            return None;
        }

        self.octree_data
            .leaf_from_link(link)
            .filter(|leaf| !leaf.is_empty())
    }

    fn sub_node_position(&self, node_center: Point3f, sub_node: SubNodeIndex) -> Point3f {
        let sub_node_size = self.leaf_voxel_size() / OctreeLeaf::EDGE as f32;
        let sub_cell = Point3f::from(OctreeLeaf::sub_node_coordinates(sub_node));

        node_center - Point3f::fill(self.used_box_extent) + (sub_cell + Point3f::fill(0.5)) * sub_node_size
    }
}
