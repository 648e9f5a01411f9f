//! # MayaPanda Core
//!
//! Engine for exporting Maya scenes to Panda3D's interchange formats by
//! driving the external converter toolchain (`maya2egg`, `egg2bam`,
//! `pview`).
//!
//! This crate provides:
//! - The canonical egg-object-type catalog with category grouping and
//!   PRC definition emission
//! - Attachment tracking of egg-object-type tags on scene nodes, over a
//!   host-supplied attribute store
//! - Deterministic converter command-line synthesis from an export
//!   options record
//! - A blocking export pipeline that runs the converters as subprocesses
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mayapanda_core::{
//!     attributes::{AttachmentTracker, MemoryStore},
//!     options::{ExportOptions, ToolConfig},
//!     pipeline::Exporter,
//! };
//! use std::path::Path;
//!
//! let mut tracker = AttachmentTracker::new(MemoryStore::new());
//! tracker.attach("pCube1", "barrier")?;
//!
//! let exporter = Exporter::new(ToolConfig::new("2024"), ExportOptions::default());
//! let report = exporter.export(Path::new("scene.mb"), &mut tracker)?;
//!
//! println!("Exported {}", report.egg_file.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod attributes;
pub mod builder;
pub mod object_types;
pub mod options;
pub mod pipeline;

// Re-export commonly used types
pub use attributes::{AttachmentTracker, MemoryStore, NodeAttributeStore, TagError, MAX_SLOTS};
pub use builder::{build_egg2bam, build_maya2egg, build_pview, shell_line, BuildError};
pub use object_types::{registry, Category, ObjectType, Registry, RegistryError, SortMode};
pub use options::{
    ConverterSet, ExportMode, ExportOptions, FrameRange, OutputFileType, TexturePathMode,
    ToolConfig, TransformMode, Unit, UpAxis,
};
pub use pipeline::{ConverterError, ExportError, ExportReport, Exporter};

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
