use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;

use mayapanda_core::{
    build_egg2bam, build_maya2egg, build_pview, pipeline::resolve_egg_path, shell_line,
    AttachmentTracker, BuildError, ExportMode, ExportOptions, FrameRange, OutputFileType,
    TexturePathMode, ToolConfig, TransformMode, Unit, UpAxis,
};

use crate::commands::tags::{load_store, save_store};
use crate::ui::{info, success, warning};

/// Export options shared by `build` and `export`
#[derive(Args)]
pub struct ExportArgs {
    /// Maya version suffix of the maya2egg executable, e.g. 2024
    #[arg(long, default_value = "")]
    pub maya_version: String,

    /// Export mode: mesh, actor, animation, both, pose
    #[arg(long, default_value = "mesh")]
    pub mode: String,

    /// Transform mode: none, all, dcs, model
    #[arg(long, default_value = "model")]
    pub transform: String,

    /// Render geometry double-sided
    #[arg(long)]
    pub bface: bool,

    /// Use legacy shader generation
    #[arg(long)]
    pub legacy_shaders: bool,

    /// Do not pass -keep-uvs
    #[arg(long)]
    pub no_keep_uvs: bool,

    /// Do not pass -round-uvs
    #[arg(long)]
    pub no_round_uvs: bool,

    /// Do not pass -tbnall
    #[arg(long)]
    pub no_tbnall: bool,

    /// Convert light nodes
    #[arg(long)]
    pub convert_lights: bool,

    /// Convert camera nodes
    #[arg(long)]
    pub convert_cameras: bool,

    /// Keep the groundPlane_transform node in the export
    #[arg(long)]
    pub keep_ground_plane: bool,

    /// Custom animation start frame
    #[arg(long)]
    pub start_frame: Option<String>,

    /// Custom animation end frame
    #[arg(long)]
    pub end_frame: Option<String>,

    /// Character name for animated exports (defaults to the output name)
    #[arg(long)]
    pub character_name: Option<String>,

    /// Joint to force-export; repeatable
    #[arg(long = "force-joint")]
    pub force_joints: Vec<String>,

    /// Texture path mode: default, custom-reference, custom-copy
    #[arg(long, default_value = "default")]
    pub tex_path_mode: String,

    /// Texture directory written into the EGG
    #[arg(long)]
    pub egg_tex_path: Option<PathBuf>,

    /// Texture directory written into the BAM
    #[arg(long)]
    pub bam_tex_path: Option<PathBuf>,

    /// Custom output directory (also the texture copy destination)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Custom output filename stem
    #[arg(long)]
    pub output_name: Option<String>,

    /// Scene up axis: y or z
    #[arg(long, default_value = "y")]
    pub up_axis: String,

    /// Scene unit: mm, cm, m, km, in, ft, yd, nmi, mi
    #[arg(long, default_value = "cm")]
    pub unit: String,

    /// Fail instead of overwriting existing output
    #[arg(long)]
    pub no_overwrite: bool,

    /// Also convert the EGG to a BAM file
    #[arg(long)]
    pub bam: bool,

    /// Pass -rawtex to egg2bam
    #[arg(long)]
    pub rawtex: bool,

    /// Pass -flatten 1 to egg2bam
    #[arg(long)]
    pub flatten: bool,

    /// Open the exported file in pview afterwards
    #[arg(long)]
    pub pview: bool,
}

impl ExportArgs {
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig::new(self.maya_version.clone())
    }

    pub fn to_options(&self) -> Result<ExportOptions> {
        let frame_range = match (&self.start_frame, &self.end_frame) {
            (None, None) => None,
            (Some(start), Some(end)) => Some(FrameRange::parse(start, end)?),
            (Some(start), None) => Some(FrameRange::parse(start, start)?),
            (None, Some(_)) => {
                return Err(anyhow!("--end-frame requires --start-frame"));
            }
        };

        Ok(ExportOptions {
            mode: ExportMode::parse(&self.mode)?,
            transform: TransformMode::parse(&self.transform)?,
            bface: self.bface,
            legacy_shaders: self.legacy_shaders,
            keep_uvs: !self.no_keep_uvs,
            round_uvs: !self.no_round_uvs,
            tbnall: !self.no_tbnall,
            convert_lights: self.convert_lights,
            convert_cameras: self.convert_cameras,
            remove_ground_plane: !self.keep_ground_plane,
            frame_range,
            character_name: self.character_name.clone(),
            force_joints: self.force_joints.clone(),
            texture_path_mode: TexturePathMode::parse(&self.tex_path_mode)?,
            egg_texture_path: self.egg_tex_path.clone(),
            bam_texture_path: self.bam_tex_path.clone(),
            custom_output_path: self.output_dir.clone(),
            custom_filename: self.output_name.clone(),
            up_axis: UpAxis::parse(&self.up_axis)?,
            unit: Unit::parse(&self.unit)?,
            overwrite: !self.no_overwrite,
            output_type: if self.bam { OutputFileType::EggAndBam } else { OutputFileType::Egg },
            rawtex: self.rawtex,
            flatten: self.flatten,
            run_pview: self.pview,
        })
    }
}

/// Print the converter command lines without running anything
#[derive(Args)]
pub struct BuildCommand {
    /// Maya scene file (.mb)
    pub scene: PathBuf,

    /// JSON file holding the node attachment store
    #[arg(long, default_value = "mayapanda-tags.json")]
    pub store: PathBuf,

    #[command(flatten)]
    pub args: ExportArgs,
}

impl BuildCommand {
    pub fn execute(&self) -> Result<()> {
        let config = self.args.tool_config();
        let options = self.args.to_options()?;
        let egg_file = resolve_egg_path(&options, Some(&self.scene))?;
        let mut tracker = AttachmentTracker::new(load_store(&self.store)?);

        let argv = match build_maya2egg(&config, &options, &mut tracker, &egg_file, &self.scene) {
            Ok(argv) => argv,
            Err(err @ BuildError::RestartRequired { .. }) => {
                // The repair mutated the store; persist it before failing.
                save_store(&self.store, tracker.store())?;
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        println!("{}", shell_line(&argv));
        if options.output_type == OutputFileType::EggAndBam {
            let bam_file = egg_file.with_extension("bam");
            println!("{}", shell_line(&build_egg2bam(&config, &options, &bam_file, &egg_file)));
        }
        if options.run_pview {
            println!("{}", shell_line(&build_pview(&config, &egg_file)));
        }
        Ok(())
    }
}

/// Export a scene by running the converter toolchain
#[derive(Args)]
pub struct ExportCommand {
    /// Maya scene file (.mb)
    pub scene: PathBuf,

    /// JSON file holding the node attachment store
    #[arg(long, default_value = "mayapanda-tags.json")]
    pub store: PathBuf,

    #[command(flatten)]
    pub args: ExportArgs,
}

impl ExportCommand {
    pub fn execute(&self) -> Result<()> {
        if !self.scene.exists() {
            return Err(anyhow!("Scene file does not exist: {}", self.scene.display()));
        }
        let config = self.args.tool_config();
        let options = self.args.to_options()?;
        let exporter = mayapanda_core::Exporter::new(config, options);
        let mut tracker = AttachmentTracker::new(load_store(&self.store)?);

        info(&format!("Exporting: {}", self.scene.display()));
        let result = exporter.export(&self.scene, &mut tracker);
        // Force-joint repairs must survive even when the export bails out.
        save_store(&self.store, tracker.store())?;
        let report = result.context("Export failed")?;

        for w in &report.warnings {
            warning(w);
        }
        success(&format!(
            "Exported {} in {} ms",
            report.egg_file.display(),
            report.duration_ms
        ));
        if let Some(bam) = &report.bam_file {
            success(&format!("Converted {}", bam.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExportArgs,
    }

    fn parse(argv: &[&str]) -> ExportArgs {
        let mut full = vec!["harness"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    #[test]
    fn test_defaults_map_to_default_options() {
        let options = parse(&[]).to_options().unwrap();
        assert_eq!(options.mode, ExportMode::Mesh);
        assert!(options.keep_uvs && options.round_uvs && options.tbnall);
        assert!(options.remove_ground_plane && options.overwrite);
        assert_eq!(options.output_type, OutputFileType::Egg);
    }

    #[test]
    fn test_negation_flags() {
        let options = parse(&["--no-keep-uvs", "--no-overwrite", "--keep-ground-plane"])
            .to_options()
            .unwrap();
        assert!(!options.keep_uvs);
        assert!(!options.overwrite);
        assert!(!options.remove_ground_plane);
    }

    #[test]
    fn test_frame_range_parsing() {
        let options = parse(&["--mode", "animation", "--start-frame", "10", "--end-frame", "20"])
            .to_options()
            .unwrap();
        assert_eq!(options.frame_range, Some(FrameRange { start: 10, end: 20 }));

        // A lone start frame stands in for both bounds.
        let options = parse(&["--mode", "pose", "--start-frame", "7"]).to_options().unwrap();
        assert_eq!(options.frame_range, Some(FrameRange { start: 7, end: 7 }));

        assert!(parse(&["--start-frame", "x"]).to_options().is_err());
        assert!(parse(&["--end-frame", "5"]).to_options().is_err());
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        assert!(parse(&["--mode", "wireframe"]).to_options().is_err());
        assert!(parse(&["--unit", "furlong"]).to_options().is_err());
        assert!(parse(&["--up-axis", "x"]).to_options().is_err());
    }

    #[test]
    fn test_repeatable_force_joints() {
        let options = parse(&["--force-joint", "j1", "--force-joint", "j2"])
            .to_options()
            .unwrap();
        assert_eq!(options.force_joints, vec!["j1", "j2"]);
    }
}
