use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use mayapanda_core::{AttachmentTracker, MemoryStore};

use crate::ui::{info, success};

/// Manage egg-object-type attachments on scene nodes
#[derive(Args)]
pub struct TagsCommand {
    /// JSON file holding the node attachment store
    #[arg(long, global = true, default_value = "mayapanda-tags.json")]
    store: PathBuf,

    #[command(subcommand)]
    action: TagsAction,
}

#[derive(Subcommand)]
enum TagsAction {
    /// Attach a type to the first free slot of a node
    Attach {
        /// Node name, e.g. "pCube1"
        node: String,
        /// Registered egg-object-type name
        type_name: String,
    },

    /// Detach whatever occupies one slot of a node
    Detach {
        node: String,
        /// Slot number, 1 through 10
        slot: u8,
    },

    /// List a node's slots, or every tracked node when none is given
    List { node: Option<String> },
}

pub(crate) fn load_store(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        return Ok(MemoryStore::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read store file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Store file is not valid JSON: {}", path.display()))
}

pub(crate) fn save_store(path: &Path, store: &MemoryStore) -> Result<()> {
    let text = serde_json::to_string_pretty(store)?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write store file: {}", path.display()))
}

fn print_node(tracker: &AttachmentTracker<MemoryStore>, node: &str) {
    println!("{}", node.bright_white().bold());
    for (slot, name) in tracker.list(node) {
        match name {
            Some(name) => println!("  slot {:2}: {}", slot, name.bright_green()),
            None => println!("  slot {:2}: {}", slot, "-".dimmed()),
        }
    }
}

impl TagsCommand {
    pub fn execute(&self) -> Result<()> {
        let tracker = AttachmentTracker::new(load_store(&self.store)?);
        match &self.action {
            TagsAction::Attach { node, type_name } => {
                let mut tracker = tracker;
                let slot = tracker.attach(node, type_name)?;
                save_store(&self.store, tracker.store())?;
                success(&format!("Attached '{type_name}' to '{node}' in slot {slot}"));
                Ok(())
            }
            TagsAction::Detach { node, slot } => {
                let mut tracker = tracker;
                let name = tracker.detach(node, *slot)?;
                save_store(&self.store, tracker.store())?;
                success(&format!("Detached '{name}' from slot {slot} of '{node}'"));
                Ok(())
            }
            TagsAction::List { node } => {
                match node {
                    Some(node) => print_node(&tracker, node),
                    None => {
                        let nodes: Vec<String> =
                            tracker.store().nodes().map(str::to_string).collect();
                        if nodes.is_empty() {
                            info("No nodes have attachments");
                        }
                        for node in nodes {
                            print_node(&tracker, &node);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
