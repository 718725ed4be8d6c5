use svo_nav::prelude::*;

/// Bakes a solid ball in a cube of `2^exponent` voxels per edge and reports how large the octree is.
fn main() {
    let args: Vec<_> = std::env::args().collect();
    let exponent: u32 = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(5);
    let voxel_size = 100.0;
    let edge_length = match cube_edge_length(exponent, voxel_size) {
        Some(edge_length) => edge_length,
        None => {
            eprintln!(
                "Exponent {} is too large, links address at most {}",
                exponent,
                OctreeLink::MAX_LAYER
            );
            std::process::exit(1);
        }
    };

    let center = Point3f::fill(edge_length * 0.5);
    let radius = edge_length * 0.5 - voxel_size;
    let world = |c: Point3f, h: f32| {
        let closest = center
            .join(&(c - Point3f::fill(h)))
            .meet(&(c + Point3f::fill(h)));
        closest.l2_distance_squared(&center) < radius * radius
    };

    println!("Baking a ball of radius {} in a {} cube", radius, edge_length);

    let volume = Extent3f::from_min_and_shape(Point3f::ZERO, Point3f::fill(edge_length));
    let settings = BoundsGenerationSettings::with_voxel_size(voxel_size);
    let data = match BoundsNavigationData::generate(volume, &settings, &world) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Generation failed: {}", e);
            std::process::exit(1);
        }
    };

    let octree = data.octree_data();
    for layer in 0..data.layer_count() {
        println!("layer {}: {} nodes", layer, octree.layer(layer).len());
    }
    let dense_leaf_cells = (data.layer_max_node_count(0) as usize).pow(3);
    println!(
        "leaves = {} of {} cells; rate = {:.1}%",
        octree.leaves.len(),
        dense_leaf_cells,
        100.0 * (octree.leaves.len() as f32 / dense_leaf_cells as f32)
    );

    match data.to_bytes() {
        Ok(bytes) => println!(
            "allocated = {} bytes, serialized = {} bytes",
            data.allocated_size(),
            bytes.len()
        ),
        Err(e) => eprintln!("Serialization failed: {}", e),
    }
}

/// The edge of a cube of `2^exponent` voxels, if the octree of such a cube is addressable.
fn cube_edge_length(exponent: u32, voxel_size: f32) -> Option<f32> {
    if exponent > u32::from(OctreeLink::MAX_LAYER) {
        return None;
    }

    Some(voxel_size * (1u32 << exponent) as f32)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
