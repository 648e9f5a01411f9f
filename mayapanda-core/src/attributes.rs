//! Node attachment tracking.
//!
//! A node can carry up to ten egg-object-type attachments, held in numbered
//! slots. The stored value of a slot is an index into the registry's
//! category-sorted name list, which matches the enum-attribute layout Maya
//! scenes were authored with. Slot numbers are stable: detaching leaves a
//! hole rather than compacting, so the remaining attachments keep their
//! slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::object_types::{registry, Category, SortMode};

/// Maximum attachments per node
pub const MAX_SLOTS: u8 = 10;

#[derive(Debug, Error)]
pub enum TagError {
    /// Name is not in the object-type registry
    #[error("unknown egg-object-type: {0}")]
    UnknownType(String),

    /// The type is already attached to this node
    #[error("type '{name}' is already attached to '{node}' in slot {slot}")]
    AlreadyAttached { node: String, name: String, slot: u8 },

    /// All ten slots are occupied
    #[error("all {MAX_SLOTS} attachment slots on '{0}' are occupied")]
    SlotsExhausted(String),

    /// Detach aimed at a slot that holds nothing
    #[error("no attachment in slot {slot} of '{node}'")]
    NotAttached { node: String, slot: u8 },
}

/// Storage backend for per-node slot values.
///
/// Implementations hold raw enumeration indices; name resolution happens in
/// [`AttachmentTracker`]. The host plugin backs this with Maya node
/// attributes; tests and the CLI use [`MemoryStore`].
pub trait NodeAttributeStore {
    /// Value of a slot, if occupied.
    fn get(&self, node: &str, slot: u8) -> Option<usize>;
    /// Occupy a slot.
    fn set(&mut self, node: &str, slot: u8, value: usize);
    /// Vacate a slot.
    fn clear(&mut self, node: &str, slot: u8);
    /// Whether the slot is occupied.
    fn exists(&self, node: &str, slot: u8) -> bool {
        self.get(node, slot).is_some()
    }
}

/// In-memory store, serializable so the CLI can persist it as JSON.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    nodes: BTreeMap<String, BTreeMap<u8, usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes that have at least one occupied slot.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(node, _)| node.as_str())
    }
}

impl NodeAttributeStore for MemoryStore {
    fn get(&self, node: &str, slot: u8) -> Option<usize> {
        self.nodes.get(node).and_then(|slots| slots.get(&slot)).copied()
    }

    fn set(&mut self, node: &str, slot: u8, value: usize) {
        self.nodes.entry(node.to_string()).or_default().insert(slot, value);
    }

    fn clear(&mut self, node: &str, slot: u8) {
        if let Some(slots) = self.nodes.get_mut(node) {
            slots.remove(&slot);
        }
    }
}

/// Attachment operations over a [`NodeAttributeStore`].
pub struct AttachmentTracker<S: NodeAttributeStore> {
    store: S,
    /// Category-sorted name list; slot values index into this.
    names: Vec<&'static str>,
}

impl<S: NodeAttributeStore> AttachmentTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            names: registry().all_names(SortMode::ByCategory),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn name_of(&self, value: usize) -> Option<&'static str> {
        self.names.get(value).copied()
    }

    /// Attach a type to the first free slot. Fails without mutating when the
    /// name is unknown, already attached anywhere on the node, or no slot is
    /// free.
    pub fn attach(&mut self, node: &str, type_name: &str) -> Result<u8, TagError> {
        let index = self
            .names
            .iter()
            .position(|n| *n == type_name)
            .ok_or_else(|| TagError::UnknownType(type_name.to_string()))?;

        for slot in 1..=MAX_SLOTS {
            if self.store.get(node, slot) == Some(index) {
                return Err(TagError::AlreadyAttached {
                    node: node.to_string(),
                    name: type_name.to_string(),
                    slot,
                });
            }
        }

        for slot in 1..=MAX_SLOTS {
            if !self.store.exists(node, slot) {
                self.store.set(node, slot, index);
                debug!(node, type_name, slot, "attached egg-object-type");
                return Ok(slot);
            }
        }

        Err(TagError::SlotsExhausted(node.to_string()))
    }

    /// Vacate one slot. The other slots are untouched.
    pub fn detach(&mut self, node: &str, slot: u8) -> Result<&'static str, TagError> {
        if slot < 1 || slot > MAX_SLOTS {
            return Err(TagError::NotAttached { node: node.to_string(), slot });
        }
        let value = self
            .store
            .get(node, slot)
            .ok_or_else(|| TagError::NotAttached { node: node.to_string(), slot })?;
        self.store.clear(node, slot);
        debug!(node, slot, "detached egg-object-type");
        // A stored index that no longer resolves means the store predates
        // the current catalog; report it as the raw slot being cleared.
        Ok(self.name_of(value).unwrap_or(""))
    }

    /// All ten slots, occupied or not, in slot order.
    pub fn list(&self, node: &str) -> [(u8, Option<&'static str>); MAX_SLOTS as usize] {
        let mut out = [(0u8, None); MAX_SLOTS as usize];
        for slot in 1..=MAX_SLOTS {
            let name = self.store.get(node, slot).and_then(|v| self.name_of(v));
            out[(slot - 1) as usize] = (slot, name);
        }
        out
    }

    /// Names attached to the node, in slot order.
    pub fn attached_names(&self, node: &str) -> Vec<&'static str> {
        self.list(node).iter().filter_map(|(_, n)| *n).collect()
    }

    /// Whether any attached type belongs to the DCS category. The force-joint
    /// export path uses this to decide whether a joint's transform survives
    /// conversion.
    pub fn has_dcs_tag(&self, node: &str) -> bool {
        self.attached_names(node).iter().any(|name| {
            registry()
                .lookup(name)
                .map(|ot| ot.category == Category::Dcs)
                .unwrap_or(false)
        })
    }
}
