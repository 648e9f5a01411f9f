//! Converter command-line synthesis.
//!
//! Builders translate an [`ExportOptions`] record into the exact ordered
//! token list for one converter invocation. Token order is fixed and
//! load-bearing: the converters are order-sensitive and the output is also
//! shown to users verbatim, so identical inputs must always yield identical
//! vectors. Tokens are raw strings without shell quoting; [`shell_line`]
//! renders a quoted single-line form for display.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::attributes::{AttachmentTracker, NodeAttributeStore, TagError};
use crate::options::{ExportMode, ExportOptions, TexturePathMode, ToolConfig};

#[derive(Debug, Error)]
pub enum BuildError {
    /// A host-supplied mode string matched no known variant
    #[error("unrecognized mode: '{0}'")]
    InvalidMode(String),

    /// Frame range field text was not a non-negative integer
    #[error("invalid frame range: {field} frame '{value}' is not a non-negative integer")]
    InvalidFrameRange { field: String, value: String },

    /// Force-joint nodes were missing their DCS tag; the tags have been
    /// attached and the export must be re-run so the converter sees them.
    #[error("attached missing DCS tag to {}: restart the export", joints.join(", "))]
    RestartRequired { joints: Vec<String> },

    /// A required custom path field is empty
    #[error("required path is missing: {0}")]
    MissingPath(String),

    /// Default output location requested but the scene has never been saved
    #[error("scene has no save location; save it or choose a custom output path")]
    UnsavedScene,

    #[error(transparent)]
    Tag(#[from] TagError),
}

fn path_token(path: &Path) -> String {
    path.display().to_string()
}

/// Build the maya2egg invocation for one export.
///
/// The force-joint step consults the tracker: every listed joint must carry
/// a DCS-category tag before the converter runs. Joints missing one get the
/// `dcs` type attached and the build fails with `RestartRequired`; the
/// attachments persist, so the re-run passes. A single pass never both
/// repairs tags and uses them.
pub fn build_maya2egg<S: NodeAttributeStore>(
    config: &ToolConfig,
    options: &ExportOptions,
    tracker: &mut AttachmentTracker<S>,
    egg_file: &Path,
    mb_file: &Path,
) -> Result<Vec<String>, BuildError> {
    let mut argv = vec![config.maya2egg(), "-v".to_string(), "-p".to_string()];

    let features = [
        (options.bface, "-bface"),
        (options.legacy_shaders, "-legacy-shaders"),
        (options.keep_uvs, "-keep-uvs"),
        (options.round_uvs, "-round-uvs"),
        (options.tbnall, "-tbnall"),
        (options.convert_lights, "-convert-lights"),
        (options.convert_cameras, "-convert-cameras"),
    ];
    for (enabled, flag) in features {
        if enabled {
            argv.push(flag.to_string());
        }
    }

    argv.push("-a".to_string());
    argv.push(options.mode.anim_flag().to_string());

    if options.mode.wants_animation() {
        if let Some(range) = options.frame_range {
            argv.push("-sf".to_string());
            argv.push(range.start.to_string());
            // A pose is a single frame; only the start frame applies.
            if options.mode != ExportMode::Pose {
                argv.push("-ef".to_string());
                argv.push(range.end.to_string());
            }
        }
    }

    argv.push("-trans".to_string());
    argv.push(options.transform.flag().to_string());

    if options.remove_ground_plane {
        argv.push("-exclude".to_string());
        argv.push("groundPlane_transform".to_string());
    }

    argv.push("-cs".to_string());
    argv.push(options.up_axis.coordinate_system().to_string());
    argv.push("-uo".to_string());
    argv.push(options.unit.flag().to_string());

    if options.mode != ExportMode::Mesh {
        let name = options
            .character_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                egg_file
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
        argv.push("-cn".to_string());
        argv.push(name.replace(' ', "_"));
    }

    if !options.force_joints.is_empty() {
        let mut repaired = Vec::new();
        for joint in &options.force_joints {
            if !tracker.has_dcs_tag(joint) {
                tracker.attach(joint, "dcs")?;
                repaired.push(joint.clone());
            }
        }
        if !repaired.is_empty() {
            info!(joints = ?repaired, "attached missing DCS tags, export must restart");
            return Err(BuildError::RestartRequired { joints: repaired });
        }
        for joint in &options.force_joints {
            argv.push("-force-joint".to_string());
            argv.push(joint.clone());
        }
    }

    if options.texture_path_mode != TexturePathMode::Default {
        argv.push("-ps".to_string());
        argv.push("rel".to_string());
        if let Some(tex) = &options.egg_texture_path {
            let tex = path_token(tex);
            argv.push("-pd".to_string());
            argv.push(tex.clone());
            argv.push("-pp".to_string());
            argv.push(tex);
        }
        if let Some(out) = &options.custom_output_path {
            argv.push("-pc".to_string());
            argv.push(path_token(out));
        }
    }

    // Overwrite mode flips the trailing path order as well as adding -o.
    if options.overwrite {
        argv.push("-o".to_string());
        argv.push(path_token(egg_file));
        argv.push(path_token(mb_file));
    } else {
        argv.push(path_token(mb_file));
        argv.push(path_token(egg_file));
    }

    debug!(argv = %shell_line(&argv), "built maya2egg command");
    Ok(argv)
}

/// Build the egg2bam invocation. The `-pd`/`-pc` directory falls back
/// through: custom BAM texture path, custom EGG texture path, the BAM
/// file's own directory.
pub fn build_egg2bam(
    config: &ToolConfig,
    options: &ExportOptions,
    bam_file: &Path,
    egg_file: &Path,
) -> Vec<String> {
    let mut argv = vec![config.versions.egg2bam.clone()];

    if options.rawtex {
        argv.push("-rawtex".to_string());
    }
    if options.flatten {
        argv.push("-flatten".to_string());
        argv.push("1".to_string());
    }

    if options.texture_path_mode != TexturePathMode::Default {
        let file_dir = bam_file
            .parent()
            .map(path_token)
            .unwrap_or_default();
        let tex_dir = options
            .bam_texture_path
            .as_deref()
            .or(options.egg_texture_path.as_deref())
            .map(path_token)
            .unwrap_or_else(|| file_dir.clone());

        argv.push("-ps".to_string());
        argv.push("rel".to_string());
        argv.push("-pd".to_string());
        argv.push(tex_dir.clone());
        if options.texture_path_mode == TexturePathMode::CustomCopy {
            argv.push("-pc".to_string());
            argv.push(tex_dir);
        }
        argv.push("-pp".to_string());
        argv.push(file_dir);
    }

    if options.overwrite {
        argv.push("-o".to_string());
    }
    argv.push(path_token(bam_file));
    argv.push(path_token(egg_file));

    debug!(argv = %shell_line(&argv), "built egg2bam command");
    argv
}

/// Build the pview invocation: `pview -l -c "<file>"`.
pub fn build_pview(config: &ToolConfig, file: &Path) -> Vec<String> {
    vec![
        config.versions.pview.clone(),
        "-l".to_string(),
        "-c".to_string(),
        path_token(file),
    ]
}

/// Render a token vector as a single shell-style line, double-quoting
/// tokens that contain whitespace. Display only; execution uses the raw
/// tokens.
pub fn shell_line(argv: &[String]) -> String {
    argv.iter()
        .map(|tok| {
            if tok.chars().any(char::is_whitespace) || tok.is_empty() {
                format!("\"{tok}\"")
            } else {
                tok.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::MemoryStore;
    use crate::options::{FrameRange, OutputFileType, TransformMode, Unit, UpAxis};
    use std::path::PathBuf;

    fn tracker() -> AttachmentTracker<MemoryStore> {
        AttachmentTracker::new(MemoryStore::new())
    }

    fn paths() -> (PathBuf, PathBuf) {
        (PathBuf::from("/out/scene.egg"), PathBuf::from("/scenes/scene.mb"))
    }

    #[test]
    fn test_mesh_defaults_scenario() {
        let config = ToolConfig::new("2024");
        let mut options = ExportOptions::default();
        options.keep_uvs = false;
        options.round_uvs = false;
        options.tbnall = false;
        options.remove_ground_plane = false;
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert_eq!(
            argv,
            vec![
                "maya2egg2024", "-v", "-p", "-a", "none", "-trans", "model", "-cs", "y-up",
                "-uo", "cm", "-o", "/out/scene.egg", "/scenes/scene.mb",
            ]
        );
    }

    #[test]
    fn test_feature_flags_emitted_in_fixed_order() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.bface = true;
        options.legacy_shaders = true;
        options.convert_lights = true;
        options.convert_cameras = true;
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        let flags: Vec<&str> = argv
            .iter()
            .map(String::as_str)
            .filter(|t| {
                [
                    "-bface",
                    "-legacy-shaders",
                    "-keep-uvs",
                    "-round-uvs",
                    "-tbnall",
                    "-convert-lights",
                    "-convert-cameras",
                ]
                .contains(t)
            })
            .collect();
        assert_eq!(
            flags,
            vec![
                "-bface",
                "-legacy-shaders",
                "-keep-uvs",
                "-round-uvs",
                "-tbnall",
                "-convert-lights",
                "-convert-cameras"
            ]
        );
    }

    #[test]
    fn test_animation_frame_range_follows_mode_flag() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.mode = ExportMode::Animation;
        options.frame_range = Some(FrameRange { start: 10, end: 20 });
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        let pos = argv.iter().position(|t| t == "-a").unwrap();
        assert_eq!(&argv[pos..pos + 6], &["-a", "chan", "-sf", "10", "-ef", "20"]);
    }

    #[test]
    fn test_pose_takes_only_start_frame() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.mode = ExportMode::Pose;
        options.frame_range = Some(FrameRange { start: 7, end: 99 });
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert!(argv.windows(2).any(|w| w == ["-sf", "7"]));
        assert!(!argv.iter().any(|t| t == "-ef"));
    }

    #[test]
    fn test_mesh_mode_ignores_frame_range_and_character_name() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.frame_range = Some(FrameRange { start: 1, end: 2 });
        options.character_name = Some("Hero".to_string());
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert!(!argv.iter().any(|t| t == "-sf"));
        assert!(!argv.iter().any(|t| t == "-cn"));
    }

    #[test]
    fn test_character_name_defaults_and_replaces_spaces() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.mode = ExportMode::Actor;
        let egg = PathBuf::from("/out/my hero.egg");
        let mb = PathBuf::from("/scenes/s.mb");

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        let pos = argv.iter().position(|t| t == "-cn").unwrap();
        assert_eq!(argv[pos + 1], "my_hero");

        options.character_name = Some("Big Bad Wolf".to_string());
        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        let pos = argv.iter().position(|t| t == "-cn").unwrap();
        assert_eq!(argv[pos + 1], "Big_Bad_Wolf");
    }

    #[test]
    fn test_ground_plane_exclusion() {
        let config = ToolConfig::default();
        let options = ExportOptions::default();
        let (egg, mb) = paths();
        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert!(argv
            .windows(2)
            .any(|w| w == ["-exclude", "groundPlane_transform"]));
    }

    #[test]
    fn test_non_overwrite_order_is_mb_then_egg() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.overwrite = false;
        let (egg, mb) = paths();
        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert!(!argv.iter().any(|t| t == "-o"));
        assert_eq!(argv[argv.len() - 2], "/scenes/scene.mb");
        assert_eq!(argv[argv.len() - 1], "/out/scene.egg");
    }

    #[test]
    fn test_overwrite_order_is_o_egg_then_mb() {
        let config = ToolConfig::default();
        let options = ExportOptions::default();
        let (egg, mb) = paths();
        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert_eq!(
            &argv[argv.len() - 3..],
            &["-o", "/out/scene.egg", "/scenes/scene.mb"]
        );
    }

    #[test]
    fn test_force_joint_with_dcs_tag_emits_flags() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.force_joints = vec!["joint1".to_string(), "joint2".to_string()];
        let mut t = tracker();
        t.attach("joint1", "dcs").unwrap();
        t.attach("joint2", "netdcs").unwrap();
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut t, &egg, &mb).unwrap();
        assert!(argv.windows(2).any(|w| w == ["-force-joint", "joint1"]));
        assert!(argv.windows(2).any(|w| w == ["-force-joint", "joint2"]));
    }

    #[test]
    fn test_force_joint_repair_attaches_dcs_and_requires_restart() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.force_joints = vec!["joint1".to_string()];
        let mut t = tracker();
        let (egg, mb) = paths();

        let err = build_maya2egg(&config, &options, &mut t, &egg, &mb).unwrap_err();
        match err {
            BuildError::RestartRequired { joints } => assert_eq!(joints, vec!["joint1"]),
            other => panic!("unexpected error: {other:?}"),
        }
        // The repair persisted, so the second pass succeeds.
        assert!(t.has_dcs_tag("joint1"));
        let argv = build_maya2egg(&config, &options, &mut t, &egg, &mb).unwrap();
        assert!(argv.windows(2).any(|w| w == ["-force-joint", "joint1"]));
    }

    #[test]
    fn test_texture_path_flags() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.texture_path_mode = TexturePathMode::CustomReference;
        options.egg_texture_path = Some(PathBuf::from("/tex"));
        options.custom_output_path = Some(PathBuf::from("/copies"));
        let (egg, mb) = paths();

        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert!(argv.windows(2).any(|w| w == ["-ps", "rel"]));
        assert!(argv.windows(2).any(|w| w == ["-pd", "/tex"]));
        assert!(argv.windows(2).any(|w| w == ["-pp", "/tex"]));
        assert!(argv.windows(2).any(|w| w == ["-pc", "/copies"]));
    }

    #[test]
    fn test_default_texture_mode_emits_no_path_flags() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.egg_texture_path = Some(PathBuf::from("/tex"));
        let (egg, mb) = paths();
        let argv = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        for flag in ["-ps", "-pd", "-pp", "-pc"] {
            assert!(!argv.iter().any(|t| t == flag));
        }
    }

    #[test]
    fn test_builder_is_deterministic() {
        let config = ToolConfig::new("2024");
        let mut options = ExportOptions::default();
        options.mode = ExportMode::Both;
        options.frame_range = Some(FrameRange { start: 0, end: 120 });
        options.transform = TransformMode::Dcs;
        options.unit = Unit::M;
        options.up_axis = UpAxis::Z;
        let (egg, mb) = paths();

        let mut t = tracker();
        let first = build_maya2egg(&config, &options, &mut t, &egg, &mb).unwrap();
        let second = build_maya2egg(&config, &options, &mut t, &egg, &mb).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_egg2bam_minimal() {
        let config = ToolConfig::default();
        let options = ExportOptions::default();
        let argv = build_egg2bam(
            &config,
            &options,
            Path::new("/out/scene.bam"),
            Path::new("/out/scene.egg"),
        );
        assert_eq!(argv, vec!["egg2bam", "-o", "/out/scene.bam", "/out/scene.egg"]);
    }

    #[test]
    fn test_egg2bam_full_flags_and_fallback_chain() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.rawtex = true;
        options.flatten = true;
        options.texture_path_mode = TexturePathMode::CustomCopy;
        let bam = Path::new("/out/scene.bam");
        let egg = Path::new("/out/scene.egg");

        // No custom texture paths: falls back to the BAM's directory.
        let argv = build_egg2bam(&config, &options, bam, egg);
        assert_eq!(
            argv,
            vec![
                "egg2bam", "-rawtex", "-flatten", "1", "-ps", "rel", "-pd", "/out", "-pc",
                "/out", "-pp", "/out", "-o", "/out/scene.bam", "/out/scene.egg",
            ]
        );

        // EGG texture path beats the directory fallback.
        options.egg_texture_path = Some(PathBuf::from("/egg-tex"));
        let argv = build_egg2bam(&config, &options, bam, egg);
        assert!(argv.windows(2).any(|w| w == ["-pd", "/egg-tex"]));

        // BAM texture path beats both.
        options.bam_texture_path = Some(PathBuf::from("/bam-tex"));
        let argv = build_egg2bam(&config, &options, bam, egg);
        assert!(argv.windows(2).any(|w| w == ["-pd", "/bam-tex"]));
        // -pp always points at the BAM's directory.
        assert!(argv.windows(2).any(|w| w == ["-pp", "/out"]));
    }

    #[test]
    fn test_egg2bam_reference_mode_has_no_pc() {
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        options.texture_path_mode = TexturePathMode::CustomReference;
        let argv = build_egg2bam(
            &config,
            &options,
            Path::new("/out/s.bam"),
            Path::new("/out/s.egg"),
        );
        assert!(!argv.iter().any(|t| t == "-pc"));
        assert!(argv.windows(2).any(|w| w == ["-ps", "rel"]));
    }

    #[test]
    fn test_pview_command() {
        let config = ToolConfig::default();
        let argv = build_pview(&config, Path::new("/out/scene.bam"));
        assert_eq!(argv, vec!["pview", "-l", "-c", "/out/scene.bam"]);
    }

    #[test]
    fn test_shell_line_quotes_spaced_tokens() {
        let argv = vec![
            "maya2egg".to_string(),
            "-o".to_string(),
            "/out/my scene.egg".to_string(),
        ];
        assert_eq!(shell_line(&argv), "maya2egg -o \"/out/my scene.egg\"");
    }

    #[test]
    fn test_output_type_unused_by_maya2egg() {
        // The builder output is identical whether or not a BAM step follows.
        let config = ToolConfig::default();
        let mut options = ExportOptions::default();
        let (egg, mb) = paths();
        let a = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        options.output_type = OutputFileType::EggAndBam;
        let b = build_maya2egg(&config, &options, &mut tracker(), &egg, &mb).unwrap();
        assert_eq!(a, b);
    }
}
