use svo_nav_core::Extent3f;
use svo_nav_storage::LayerIndex;

/// Why a volume could not be voxelized. Generation validates its inputs before touching any existing data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GenerationError {
    #[error("volume bounds {0:?} span no volume")]
    DegenerateVolume(Extent3f),
    #[error("voxel size {0} must be positive and finite")]
    InvalidVoxelSize(f32),
    #[error("{layer_count} layers are needed to cover the volume, but links can address at most {max}")]
    TooManyLayers { layer_count: u32, max: u32 },
    #[error("layer {layer} needs {count} nodes, but links can address at most {max}")]
    TooManyNodes {
        layer: LayerIndex,
        count: usize,
        max: usize,
    },
}

/// Failure to encode or decode persisted navigation data.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to encode navigation data: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode navigation data: {0}")]
    Decode(#[source] bincode::Error),
    #[error("decoded navigation data is inconsistent: {0}")]
    InvalidHeader(&'static str),
}
