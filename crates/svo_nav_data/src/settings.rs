use serde::{Deserialize, Serialize};

/// The collision channel that occlusion queries are issued on. The occlusion collaborator decides what each channel means.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum CollisionChannel {
    WorldStatic,
    WorldDynamic,
    Pawn,
    Visibility,
    Camera,
    PhysicsBody,
    Vehicle,
    Destructible,
    Custom(u8),
}

impl Default for CollisionChannel {
    fn default() -> Self {
        CollisionChannel::WorldStatic
    }
}

/// Parameters forwarded verbatim to every occlusion query.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CollisionQueryParams {
    /// Whether shapes that already overlap the query box count as hits.
    pub find_initial_overlaps: bool,
    /// Whether to test against complex (per-triangle) collision instead of simple shapes.
    pub trace_complex: bool,
    /// A label for the query, useful for profiling in the host.
    pub trace_tag: String,
}

impl Default for CollisionQueryParams {
    fn default() -> Self {
        Self {
            find_initial_overlaps: true,
            trace_complex: false,
            trace_tag: "SVONavigationRasterize".to_string(),
        }
    }
}

/// How occlusion is tested while voxelizing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct DataGenerationSettings {
    pub collision_channel: CollisionChannel,
    /// Extra distance added to the half extent of every query box, so that free space keeps this much distance from
    /// obstacles.
    pub clearance: f32,
    pub query: CollisionQueryParams,
}

impl Default for DataGenerationSettings {
    fn default() -> Self {
        Self {
            collision_channel: CollisionChannel::WorldStatic,
            clearance: 0.0,
            query: CollisionQueryParams::default(),
        }
    }
}

/// Everything needed to voxelize one bounded volume, except for the world itself.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BoundsGenerationSettings {
    /// The edge length of a layer 0 node. Leaves split it into 4x4x4 sub-cells.
    pub voxel_size: f32,
    pub generation_settings: DataGenerationSettings,
}

impl BoundsGenerationSettings {
    pub const DEFAULT_VOXEL_SIZE: f32 = 100.0;

    pub fn with_voxel_size(voxel_size: f32) -> Self {
        Self {
            voxel_size,
            ..Default::default()
        }
    }
}

impl Default for BoundsGenerationSettings {
    fn default() -> Self {
        Self {
            voxel_size: Self::DEFAULT_VOXEL_SIZE,
            generation_settings: DataGenerationSettings::default(),
        }
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

    #[test]
    fn defaults() {
        let settings = BoundsGenerationSettings::default();

        assert_eq!(settings.voxel_size, 100.0);
        assert_eq!(
            settings.generation_settings.collision_channel,
            CollisionChannel::WorldStatic
        );
        assert_eq!(settings.generation_settings.clearance, 0.0);
        assert!(settings.generation_settings.query.find_initial_overlaps);
        assert!(!settings.generation_settings.query.trace_complex);
        assert_eq!(
            settings.generation_settings.query.trace_tag,
            "SVONavigationRasterize"
        );
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let settings: BoundsGenerationSettings = toml::from_str(
            r#"
            voxel_size = 25.0

            [generation_settings]
            clearance = 10.0
            collision_channel = "Pawn"

            [generation_settings.query]
            trace_complex = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.voxel_size, 25.0);
        assert_eq!(settings.generation_settings.clearance, 10.0);
        assert_eq!(
            settings.generation_settings.collision_channel,
            CollisionChannel::Pawn
        );
        assert!(settings.generation_settings.query.trace_complex);
        assert!(settings.generation_settings.query.find_initial_overlaps);
        assert_eq!(
            settings.generation_settings.query.trace_tag,
            "SVONavigationRasterize"
        );
    }

    #[test]
    fn empty_config_is_default() {
        let settings: BoundsGenerationSettings = toml::from_str("").unwrap();

        assert_eq!(settings, BoundsGenerationSettings::default());
    }
}
