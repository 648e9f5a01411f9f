use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mayapanda_core::{build_pview, pipeline::run_command, shell_line, ToolConfig};

mod commands;
mod ui;

use commands::{export::BuildCommand, export::ExportCommand, tags::TagsCommand, types::TypesCommand};
use ui::info;

/// MayaPanda CLI - Maya to Panda3D export toolkit
#[derive(Parser)]
#[command(
    name = "mayapanda",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export Maya scenes to Panda3D EGG/BAM via the converter toolchain",
    long_about = None,
    arg_required_else_help = true
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the egg-object-type catalog
    Types(TypesCommand),

    /// Manage egg-object-type attachments on scene nodes
    Tags(TagsCommand),

    /// Print the converter command lines without running them
    Build(BuildCommand),

    /// Export a scene by running the converter toolchain
    Export(ExportCommand),

    /// Open an EGG or BAM file in pview
    Pview {
        /// File to view
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(!cli.no_color);
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Types(cmd) => cmd.execute(),
        Commands::Tags(cmd) => cmd.execute(),
        Commands::Build(cmd) => cmd.execute(),
        Commands::Export(cmd) => cmd.execute(),
        Commands::Pview { file } => pview(file),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!("mayapanda_core={level},mayapanda_cli={level}"))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn pview(file: &PathBuf) -> Result<()> {
    let argv = build_pview(&ToolConfig::default(), file);
    info(&format!("Running: {}", shell_line(&argv)));
    run_command(&argv)?;
    Ok(())
}
