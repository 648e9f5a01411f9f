//! Export pipeline: output path resolution and converter subprocess runs.
//!
//! The converters are opaque external programs. Each run blocks until the
//! subprocess exits; there is no cancellation or output streaming. A failed
//! maya2egg run aborts the export, but a failed egg2bam or pview run is
//! reported as a warning and the EGG produced so far stays on disk.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::attributes::{AttachmentTracker, NodeAttributeStore};
use crate::builder::{self, BuildError};
use crate::options::{ExportOptions, OutputFileType, TexturePathMode, ToolConfig};

#[derive(Debug, Error)]
pub enum ConverterError {
    /// The converter executable could not be started
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The converter ran but reported failure
    #[error("converter failed ({status}): {command}")]
    ExitStatus { command: String, status: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Converter(#[from] ConverterError),
}

/// Outcome of one export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub egg_file: PathBuf,
    /// Present only when the BAM step was requested and succeeded
    pub bam_file: Option<PathBuf>,
    pub duration_ms: u128,
    /// Non-fatal problems, e.g. a failed BAM or pview step
    pub warnings: Vec<String>,
}

/// Run one converter invocation to completion.
pub fn run_command(argv: &[String]) -> Result<(), ConverterError> {
    let (program, args) = match argv.split_first() {
        Some(parts) => parts,
        None => {
            return Err(ConverterError::Spawn {
                program: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
            })
        }
    };
    info!(command = %builder::shell_line(argv), "running converter");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| ConverterError::Spawn { program: program.clone(), source })?;
    if !status.success() {
        return Err(ConverterError::ExitStatus {
            command: builder::shell_line(argv),
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Resolve the EGG output path for a scene.
///
/// The directory comes from the custom output path when one is set, else
/// from the scene file's directory; the filename stem comes from the custom
/// filename when one is set, else from the scene's stem. `scene` is `None`
/// when the host scene has never been saved, which only the custom fields
/// can compensate for.
pub fn resolve_egg_path(
    options: &ExportOptions,
    scene: Option<&Path>,
) -> Result<PathBuf, BuildError> {
    let dir = match &options.custom_output_path {
        Some(p) if p.as_os_str().is_empty() => {
            return Err(BuildError::MissingPath("custom output path".to_string()))
        }
        Some(p) => p.clone(),
        None => scene
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .ok_or(BuildError::UnsavedScene)?,
    };
    let stem = match &options.custom_filename {
        Some(s) if s.is_empty() => {
            return Err(BuildError::MissingPath("custom filename".to_string()))
        }
        Some(s) => s.clone(),
        None => scene
            .and_then(Path::file_stem)
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or(BuildError::UnsavedScene)?,
    };
    Ok(dir.join(format!("{stem}.egg")))
}

/// Runs the full maya2egg / egg2bam / pview chain for one scene.
pub struct Exporter {
    config: ToolConfig,
    options: ExportOptions,
}

impl Exporter {
    pub fn new(config: ToolConfig, options: ExportOptions) -> Self {
        Self { config, options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Checks that every path field the selected options rely on is
    /// actually present. Runs before any subprocess is spawned.
    pub fn validate(&self) -> Result<(), BuildError> {
        let o = &self.options;
        if o.texture_path_mode == TexturePathMode::CustomCopy && o.custom_output_path.is_none() {
            return Err(BuildError::MissingPath(
                "texture copy destination (custom output path)".to_string(),
            ));
        }
        if o.texture_path_mode != TexturePathMode::Default
            && o.egg_texture_path.is_none()
            && o.bam_texture_path.is_none()
        {
            return Err(BuildError::MissingPath("custom texture path".to_string()));
        }
        Ok(())
    }

    /// Export one saved scene file. Returns the report on success; the
    /// maya2egg step failing is fatal, later steps degrade to warnings.
    pub fn export<S: NodeAttributeStore>(
        &self,
        scene: &Path,
        tracker: &mut AttachmentTracker<S>,
    ) -> Result<ExportReport, ExportError> {
        self.validate()?;
        let egg_file = resolve_egg_path(&self.options, Some(scene))?;
        let argv = builder::build_maya2egg(&self.config, &self.options, tracker, &egg_file, scene)?;

        let started = Instant::now();
        run_command(&argv)?;
        info!(egg = %egg_file.display(), "scene exported to egg");

        let mut warnings = Vec::new();
        let mut bam_file = None;
        if self.options.output_type == OutputFileType::EggAndBam {
            let bam_path = egg_file.with_extension("bam");
            let bam_argv = builder::build_egg2bam(&self.config, &self.options, &bam_path, &egg_file);
            match run_command(&bam_argv) {
                Ok(()) => {
                    info!(bam = %bam_path.display(), "egg converted to bam");
                    bam_file = Some(bam_path);
                }
                Err(err) => {
                    warn!(%err, "bam conversion failed, egg file kept");
                    warnings.push(format!("bam conversion failed: {err}"));
                }
            }
        }

        if self.options.run_pview {
            let target = bam_file.as_deref().unwrap_or(&egg_file);
            let pview_argv = builder::build_pview(&self.config, target);
            if let Err(err) = run_command(&pview_argv) {
                warn!(%err, "pview failed");
                warnings.push(format!("pview failed: {err}"));
            }
        }

        Ok(ExportReport {
            egg_file,
            bam_file,
            duration_ms: started.elapsed().as_millis(),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::MemoryStore;

    #[test]
    fn test_resolve_defaults_to_scene_location() {
        let options = ExportOptions::default();
        let egg = resolve_egg_path(&options, Some(Path::new("/scenes/level1.mb"))).unwrap();
        assert_eq!(egg, PathBuf::from("/scenes/level1.egg"));
    }

    #[test]
    fn test_resolve_custom_dir_and_filename() {
        let mut options = ExportOptions::default();
        options.custom_output_path = Some(PathBuf::from("/out"));
        options.custom_filename = Some("final".to_string());
        let egg = resolve_egg_path(&options, Some(Path::new("/scenes/level1.mb"))).unwrap();
        assert_eq!(egg, PathBuf::from("/out/final.egg"));
    }

    #[test]
    fn test_resolve_unsaved_scene_fails_without_custom_fields() {
        let options = ExportOptions::default();
        let err = resolve_egg_path(&options, None).unwrap_err();
        assert!(matches!(err, BuildError::UnsavedScene));

        // Custom fields make an unsaved scene exportable.
        let mut options = ExportOptions::default();
        options.custom_output_path = Some(PathBuf::from("/out"));
        options.custom_filename = Some("scratch".to_string());
        let egg = resolve_egg_path(&options, None).unwrap();
        assert_eq!(egg, PathBuf::from("/out/scratch.egg"));
    }

    #[test]
    fn test_resolve_rejects_empty_custom_fields() {
        let mut options = ExportOptions::default();
        options.custom_output_path = Some(PathBuf::new());
        let err = resolve_egg_path(&options, Some(Path::new("/s/a.mb"))).unwrap_err();
        assert!(matches!(err, BuildError::MissingPath(_)));

        let mut options = ExportOptions::default();
        options.custom_filename = Some(String::new());
        let err = resolve_egg_path(&options, Some(Path::new("/s/a.mb"))).unwrap_err();
        assert!(matches!(err, BuildError::MissingPath(_)));
    }

    #[test]
    fn test_validate_requires_texture_paths() {
        let mut options = ExportOptions::default();
        options.texture_path_mode = TexturePathMode::CustomReference;
        let exporter = Exporter::new(ToolConfig::default(), options);
        assert!(matches!(exporter.validate(), Err(BuildError::MissingPath(_))));

        let mut options = ExportOptions::default();
        options.texture_path_mode = TexturePathMode::CustomCopy;
        options.egg_texture_path = Some(PathBuf::from("/tex"));
        let exporter = Exporter::new(ToolConfig::default(), options);
        assert!(matches!(exporter.validate(), Err(BuildError::MissingPath(_))));

        let mut options = ExportOptions::default();
        options.texture_path_mode = TexturePathMode::CustomCopy;
        options.egg_texture_path = Some(PathBuf::from("/tex"));
        options.custom_output_path = Some(PathBuf::from("/copies"));
        let exporter = Exporter::new(ToolConfig::default(), options);
        assert!(exporter.validate().is_ok());
    }

    #[test]
    fn test_default_mode_needs_no_paths() {
        let exporter = Exporter::new(ToolConfig::default(), ExportOptions::default());
        assert!(exporter.validate().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_command_success_and_failure() {
        assert!(run_command(&["true".to_string()]).is_ok());
        let err = run_command(&["false".to_string()]).unwrap_err();
        assert!(matches!(err, ConverterError::ExitStatus { .. }));
    }

    #[test]
    fn test_run_command_missing_program() {
        let err = run_command(&["definitely-not-a-real-converter".to_string()]).unwrap_err();
        match err {
            ConverterError::Spawn { program, .. } => {
                assert_eq!(program, "definitely-not-a-real-converter");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_export_fails_when_converter_is_absent() {
        // A version suffix no real installation has, so spawning fails
        // before anything touches the filesystem.
        let config = ToolConfig::new("0000-test");
        let exporter = Exporter::new(config, ExportOptions::default());
        let mut tracker = AttachmentTracker::new(MemoryStore::new());
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("scene.mb");
        std::fs::write(&scene, b"").unwrap();

        let err = exporter.export(&scene, &mut tracker).unwrap_err();
        assert!(matches!(err, ExportError::Converter(ConverterError::Spawn { .. })));
        assert!(!scene.with_extension("egg").exists());
    }
}
