//! Export option model and tool configuration.
//!
//! Every host-UI choice is a closed enum here. The string forms accepted by
//! the `parse` constructors are the host-facing spellings; the `flag` methods
//! produce the exact converter tokens.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::builder::BuildError;

/// What the converter extracts from the scene. Maps to `-a`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    #[default]
    Mesh,
    Actor,
    Animation,
    Both,
    Pose,
}

impl ExportMode {
    pub fn parse(s: &str) -> Result<Self, BuildError> {
        match s {
            "mesh" => Ok(ExportMode::Mesh),
            "actor" => Ok(ExportMode::Actor),
            "animation" => Ok(ExportMode::Animation),
            "both" => Ok(ExportMode::Both),
            "pose" => Ok(ExportMode::Pose),
            other => Err(BuildError::InvalidMode(other.to_string())),
        }
    }

    /// The `-a` argument value.
    pub fn anim_flag(self) -> &'static str {
        match self {
            ExportMode::Mesh => "none",
            ExportMode::Actor => "model",
            ExportMode::Animation => "chan",
            ExportMode::Both => "both",
            ExportMode::Pose => "pose",
        }
    }

    /// Whether this mode reads animation frames.
    pub fn wants_animation(self) -> bool {
        matches!(self, ExportMode::Animation | ExportMode::Both | ExportMode::Pose)
    }
}

/// Which transforms survive conversion. Maps to `-trans`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    None,
    All,
    Dcs,
    #[default]
    Model,
}

impl TransformMode {
    pub fn parse(s: &str) -> Result<Self, BuildError> {
        match s {
            "none" => Ok(TransformMode::None),
            "all" => Ok(TransformMode::All),
            "dcs" => Ok(TransformMode::Dcs),
            "model" => Ok(TransformMode::Model),
            other => Err(BuildError::InvalidMode(other.to_string())),
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            TransformMode::None => "none",
            TransformMode::All => "all",
            TransformMode::Dcs => "dcs",
            TransformMode::Model => "model",
        }
    }
}

/// How texture references are written into the EGG/BAM output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TexturePathMode {
    /// Leave references as the converter finds them
    #[default]
    Default,
    /// Reference textures from a custom directory
    CustomReference,
    /// Copy textures to a custom directory and reference the copies
    CustomCopy,
}

impl TexturePathMode {
    pub fn parse(s: &str) -> Result<Self, BuildError> {
        match s {
            "default" => Ok(TexturePathMode::Default),
            "custom-reference" => Ok(TexturePathMode::CustomReference),
            "custom-copy" => Ok(TexturePathMode::CustomCopy),
            other => Err(BuildError::InvalidMode(other.to_string())),
        }
    }
}

/// Scene up axis. Maps to `-cs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    #[default]
    Y,
    Z,
}

impl UpAxis {
    pub fn parse(s: &str) -> Result<Self, BuildError> {
        match s {
            "y" => Ok(UpAxis::Y),
            "z" => Ok(UpAxis::Z),
            other => Err(BuildError::InvalidMode(other.to_string())),
        }
    }

    /// The `-cs` argument value.
    pub fn coordinate_system(self) -> &'static str {
        match self {
            UpAxis::Y => "y-up",
            UpAxis::Z => "z-up",
        }
    }
}

/// Linear unit of the scene. Maps to `-uo`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
    #[default]
    Cm,
    M,
    Km,
    In,
    Ft,
    Yd,
    Nmi,
    Mi,
}

impl Unit {
    pub const ALL: [Unit; 9] = [
        Unit::Mm,
        Unit::Cm,
        Unit::M,
        Unit::Km,
        Unit::In,
        Unit::Ft,
        Unit::Yd,
        Unit::Nmi,
        Unit::Mi,
    ];

    pub fn parse(s: &str) -> Result<Self, BuildError> {
        match s {
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "m" => Ok(Unit::M),
            "km" => Ok(Unit::Km),
            "in" => Ok(Unit::In),
            "ft" => Ok(Unit::Ft),
            "yd" => Ok(Unit::Yd),
            "nmi" => Ok(Unit::Nmi),
            "mi" => Ok(Unit::Mi),
            other => Err(BuildError::InvalidMode(other.to_string())),
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::Km => "km",
            Unit::In => "in",
            Unit::Ft => "ft",
            Unit::Yd => "yd",
            Unit::Nmi => "nmi",
            Unit::Mi => "mi",
        }
    }
}

/// Which artifacts the pipeline produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFileType {
    #[default]
    Egg,
    EggAndBam,
}

/// Custom animation frame range. Both bounds are non-negative; no ordering
/// between start and end is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl FrameRange {
    /// Parse host-supplied field text. Non-integer input is a validation
    /// failure reported before any command line is assembled.
    pub fn parse(start: &str, end: &str) -> Result<Self, BuildError> {
        let parse_one = |field: &str, text: &str| {
            text.trim().parse::<u32>().map_err(|_| BuildError::InvalidFrameRange {
                field: field.to_string(),
                value: text.to_string(),
            })
        };
        Ok(FrameRange {
            start: parse_one("start", start)?,
            end: parse_one("end", end)?,
        })
    }
}

/// One export invocation's worth of UI state, handed to the builder and
/// pipeline. Built fresh per export; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub mode: ExportMode,
    pub transform: TransformMode,

    // Feature flags, emitted in this order.
    pub bface: bool,
    pub legacy_shaders: bool,
    pub keep_uvs: bool,
    pub round_uvs: bool,
    pub tbnall: bool,
    pub convert_lights: bool,
    pub convert_cameras: bool,
    pub remove_ground_plane: bool,

    pub frame_range: Option<FrameRange>,
    /// Defaults to the output basename when empty; spaces become underscores.
    pub character_name: Option<String>,
    pub force_joints: Vec<String>,

    pub texture_path_mode: TexturePathMode,
    /// Texture directory written into the EGG (`-pd`/`-pp`)
    pub egg_texture_path: Option<PathBuf>,
    /// Texture directory written into the BAM
    pub bam_texture_path: Option<PathBuf>,
    /// Copy destination for CustomCopy mode (`-pc`)
    pub custom_output_path: Option<PathBuf>,
    /// Custom output filename stem; the scene name is used when absent
    pub custom_filename: Option<String>,

    pub up_axis: UpAxis,
    pub unit: Unit,
    pub overwrite: bool,

    pub output_type: OutputFileType,
    /// egg2bam `-rawtex`
    pub rawtex: bool,
    /// egg2bam `-flatten 1`
    pub flatten: bool,
    /// Launch pview on the final artifact
    pub run_pview: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            mode: ExportMode::Mesh,
            transform: TransformMode::Model,
            bface: false,
            legacy_shaders: false,
            keep_uvs: true,
            round_uvs: true,
            tbnall: true,
            convert_lights: false,
            convert_cameras: false,
            remove_ground_plane: true,
            frame_range: None,
            character_name: None,
            force_joints: Vec::new(),
            texture_path_mode: TexturePathMode::Default,
            egg_texture_path: None,
            bam_texture_path: None,
            custom_output_path: None,
            custom_filename: None,
            up_axis: UpAxis::Y,
            unit: Unit::Cm,
            overwrite: true,
            output_type: OutputFileType::Egg,
            rawtex: false,
            flatten: false,
            run_pview: false,
        }
    }
}

/// Executable names for one installed converter toolchain version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterSet {
    /// Display label, e.g. "Default" or "1.10"
    pub label: String,
    pub bam2egg: String,
    pub egg2bam: String,
    pub pview: String,
}

impl Default for ConverterSet {
    fn default() -> Self {
        Self {
            label: "Default".to_string(),
            bam2egg: "bam2egg".to_string(),
            egg2bam: "egg2bam".to_string(),
            pview: "pview".to_string(),
        }
    }
}

/// Explicit configuration for the builders, replacing the host plugin's
/// process-wide globals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Maya version suffix baked into the maya2egg executable name,
    /// e.g. "2024". Empty means a plain `maya2egg`.
    pub maya_version: String,
    pub versions: ConverterSet,
}

impl ToolConfig {
    pub fn new(maya_version: impl Into<String>) -> Self {
        Self {
            maya_version: maya_version.into(),
            versions: ConverterSet::default(),
        }
    }

    /// The versioned maya2egg executable name.
    pub fn maya2egg(&self) -> String {
        format!("maya2egg{}", self.maya_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flag_mapping() {
        assert_eq!(ExportMode::Mesh.anim_flag(), "none");
        assert_eq!(ExportMode::Actor.anim_flag(), "model");
        assert_eq!(ExportMode::Animation.anim_flag(), "chan");
        assert_eq!(ExportMode::Both.anim_flag(), "both");
        assert_eq!(ExportMode::Pose.anim_flag(), "pose");
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        assert!(ExportMode::parse("mesh").is_ok());
        let err = ExportMode::parse("wireframe").unwrap_err();
        assert!(matches!(err, BuildError::InvalidMode(_)));
    }

    #[test]
    fn test_wants_animation() {
        assert!(!ExportMode::Mesh.wants_animation());
        assert!(!ExportMode::Actor.wants_animation());
        assert!(ExportMode::Animation.wants_animation());
        assert!(ExportMode::Both.wants_animation());
        assert!(ExportMode::Pose.wants_animation());
    }

    #[test]
    fn test_frame_range_parses_integers() {
        let range = FrameRange::parse("10", " 20 ").unwrap();
        assert_eq!(range, FrameRange { start: 10, end: 20 });
    }

    #[test]
    fn test_frame_range_rejects_non_integers() {
        let err = FrameRange::parse("ten", "20").unwrap_err();
        match err {
            BuildError::InvalidFrameRange { field, value } => {
                assert_eq!(field, "start");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(FrameRange::parse("10", "-5").is_err());
        assert!(FrameRange::parse("10", "20.5").is_err());
    }

    #[test]
    fn test_frame_range_allows_reversed_bounds() {
        let range = FrameRange::parse("20", "10").unwrap();
        assert_eq!(range.start, 20);
        assert_eq!(range.end, 10);
    }

    #[test]
    fn test_unit_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.flag()).unwrap(), unit);
        }
        assert!(Unit::parse("furlong").is_err());
    }

    #[test]
    fn test_defaults_match_ui() {
        let opts = ExportOptions::default();
        assert_eq!(opts.mode, ExportMode::Mesh);
        assert_eq!(opts.transform, TransformMode::Model);
        assert!(opts.keep_uvs && opts.round_uvs && opts.tbnall);
        assert!(opts.remove_ground_plane && opts.overwrite);
        assert!(!opts.bface && !opts.legacy_shaders);
        assert_eq!(opts.unit, Unit::Cm);
        assert_eq!(opts.up_axis, UpAxis::Y);
    }

    #[test]
    fn test_tool_config_versioned_executable() {
        assert_eq!(ToolConfig::new("2024").maya2egg(), "maya2egg2024");
        assert_eq!(ToolConfig::default().maya2egg(), "maya2egg");
        assert_eq!(ToolConfig::default().versions.pview, "pview");
    }

    #[test]
    fn test_options_serde_round_trip() {
        let mut opts = ExportOptions::default();
        opts.mode = ExportMode::Both;
        opts.frame_range = Some(FrameRange { start: 1, end: 48 });
        opts.force_joints = vec!["joint1".to_string()];
        let json = serde_json::to_string(&opts).unwrap();
        let restored: ExportOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.mode, ExportMode::Both);
        assert_eq!(restored.frame_range, opts.frame_range);
        assert_eq!(restored.force_joints, opts.force_joints);
    }
}
