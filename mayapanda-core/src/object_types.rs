//! The egg-object-type catalog.
//!
//! An egg-object-type is a named, reusable bundle of EGG-syntax configuration
//! flags that can be attached to geometry nodes. The `egg2bam`/`maya2egg`
//! toolchain resolves the names through PRC configuration, so every name in
//! this catalog is a wire-level identifier: renaming or dropping an entry
//! breaks previously exported scenes and existing PRC files.

use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from registry queries
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Name is not a registered egg-object-type
    #[error("egg-object-type not found: {0}")]
    NotFound(String),
}

/// Category an object type belongs to, used for UI grouping and sort order.
///
/// The discriminant values come from the original exporter and define the
/// relative ordering of categories in the `ByCategory` sort mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    NoCategory,
    Empty,
    Collision,
    Trigger,
    AlphaBlend,
    AlphaOp,
    Dcs,
    Tag,
    Sequence,
    Bin,
    Billboard,
    Toontown,
}

/// Presentation metadata for a category
#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    /// Short identifier, e.g. "Collide"
    pub name: &'static str,
    /// Display label, e.g. "Collision"
    pub friendly_name: &'static str,
    /// Primary color as a hex string
    pub color: &'static str,
    /// Alternate color, preferred for member display when present
    pub alt_color: Option<&'static str>,
    /// Label text color
    pub text_color: &'static str,
}

impl Category {
    /// All categories, in ordinal order.
    pub const ALL: [Category; 12] = [
        Category::NoCategory,
        Category::Empty,
        Category::Collision,
        Category::Trigger,
        Category::AlphaBlend,
        Category::AlphaOp,
        Category::Dcs,
        Category::Tag,
        Category::Sequence,
        Category::Bin,
        Category::Billboard,
        Category::Toontown,
    ];

    /// Declared enumeration value, the primary key of the category sort.
    pub const fn ordinal(self) -> u16 {
        match self {
            Category::NoCategory => 0,
            Category::Empty => 100,
            Category::Collision => 200,
            Category::Trigger => 250,
            Category::AlphaBlend => 300,
            Category::AlphaOp => 350,
            Category::Dcs => 400,
            Category::Tag => 500,
            Category::Sequence => 600,
            Category::Bin => 700,
            Category::Billboard => 800,
            Category::Toontown => 900,
        }
    }

    /// Presentation metadata for this category.
    pub const fn info(self) -> &'static CategoryInfo {
        match self {
            Category::NoCategory => &CategoryInfo {
                name: "none",
                friendly_name: "No Category",
                color: "#514e52",
                alt_color: None,
                text_color: "white",
            },
            Category::Empty => &CategoryInfo {
                name: "Empty",
                friendly_name: "Empty",
                color: "#514e52",
                alt_color: None,
                text_color: "white",
            },
            Category::Collision => &CategoryInfo {
                name: "Collide",
                friendly_name: "Collision",
                color: "#ac4a78",
                alt_color: None,
                text_color: "white",
            },
            Category::Trigger => &CategoryInfo {
                name: "Trigger",
                friendly_name: "Trigger",
                color: "#ac2e37",
                alt_color: Some("#482526"),
                text_color: "white",
            },
            Category::AlphaBlend => &CategoryInfo {
                name: "AlphaBlend",
                friendly_name: "Alpha Blend",
                color: "#2f4e79",
                alt_color: None,
                text_color: "white",
            },
            Category::AlphaOp => &CategoryInfo {
                name: "AlphaOp",
                friendly_name: "Alpha Op",
                color: "#433d79",
                alt_color: None,
                text_color: "white",
            },
            Category::Dcs => &CategoryInfo {
                name: "DCS",
                friendly_name: "DCS",
                color: "#244a14",
                alt_color: Some("#354638"),
                text_color: "white",
            },
            Category::Tag => &CategoryInfo {
                name: "Tag",
                friendly_name: "Tag",
                color: "#a9ffb6",
                alt_color: None,
                text_color: "white",
            },
            Category::Sequence => &CategoryInfo {
                name: "Sequence",
                friendly_name: "Sequence",
                color: "#7e4a1f",
                alt_color: None,
                text_color: "white",
            },
            Category::Bin => &CategoryInfo {
                name: "Bin",
                friendly_name: "Bin",
                color: "#555eff",
                alt_color: Some("#3d4351"),
                text_color: "white",
            },
            Category::Billboard => &CategoryInfo {
                name: "Billboard",
                friendly_name: "Billboard",
                color: "#7a4a79",
                alt_color: Some("#6e5a6a"),
                text_color: "white",
            },
            Category::Toontown => &CategoryInfo {
                name: "Toontown",
                friendly_name: "Toontown",
                color: "#baa05e",
                alt_color: Some("#ffb31f"),
                text_color: "white",
            },
        }
    }
}

/// A single egg-object-type definition.
#[derive(Debug, Clone, Copy)]
pub struct ObjectType {
    /// Unique identifier and registry lookup key
    pub name: &'static str,
    /// Curated description paragraphs (may be empty)
    pub description: &'static [&'static str],
    /// Literal EGG-syntax configuration flags, in definition order
    pub flags: &'static [&'static str],
    /// Owning category
    pub category: Category,
    /// Display label override; `name` is used when absent
    pub friendly_name: Option<&'static str>,
    /// Display color override
    pub text_color: Option<&'static str>,
}

impl ObjectType {
    /// Label shown in UIs: the friendly name when one is set, else the name.
    pub fn display_name(&self) -> &'static str {
        self.friendly_name.unwrap_or(self.name)
    }

    /// Resolve the display color: type override, then the category's
    /// alternate color, then the category's primary color.
    pub fn effective_color(&self) -> &'static str {
        if let Some(color) = self.text_color {
            return color;
        }
        let info = self.category.info();
        info.alt_color.unwrap_or(info.color)
    }

    /// The PRC configuration line that registers this type with the
    /// Panda3D toolchain: `egg-object-type-<name> <flag1> <flag2> ...`
    pub fn definition_syntax(&self) -> String {
        format!("egg-object-type-{} {}", self.name, self.flags.join(" "))
    }

    /// Tooltip text: description paragraphs followed by the flag list.
    /// Types with neither curated text nor flags get a generic line.
    pub fn annotation_text(&self) -> String {
        if self.description.is_empty() && self.flags.is_empty() {
            return format!("Adds the {} egg-object-type to selected geometry.", self.name);
        }
        format!(
            "{}\n\nFlags:\n{}",
            self.description.join("\n"),
            self.flags.join("\n")
        )
    }
}

const BASE: ObjectType = ObjectType {
    name: "",
    description: &[],
    flags: &[],
    category: Category::NoCategory,
    friendly_name: None,
    text_color: None,
};

/// The full catalog, in registration order. Registration order is itself
/// meaningful: it is the fallback ordering of [`SortMode::Registration`].
pub static CATALOG: &[ObjectType] = &[
    ObjectType {
        name: "barrier",
        description: &[
            "Creates a barrier that other objects cannot pass through.",
            "The collision is active on the \"Normals\" side of the object(s)",
        ],
        flags: &["<Collide> { Polyset descend }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "barrier-no-mask",
        flags: &["<Collide> { Polyset descend }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "floor",
        description: &[
            "Creates a collision from the object(s) that \"Avatars\" can walk on.",
            "If the surface is angled, the Avatar will not slide down it.",
            "The collision is active on the \"Normals\" side of the object(s)",
        ],
        flags: &[
            "<Scalar> collide-mask { 0x02 }",
            "<Collide> { Polyset descend level }",
        ],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "floor-collide",
        flags: &["<Scalar> collide-mask { 0x06 }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "shadow",
        description: &[
            "Define a \"shadow\" object type, so we can render all shadows in their own bin and have them not fight with other transparent geometry.",
        ],
        flags: &[
            "<Scalar> bin { shadow }",
            "<Scalar> alpha { blend-no-occlude }",
        ],
        category: Category::Bin,
        ..BASE
    },
    ObjectType {
        name: "shadow-cast",
        description: &[
            "Gives the selected object(s) the required attributes so that an \"Avatar's\" shadow can be cast over it.",
            "Commonly used for casting an \"Avatar's\" shadow onto floors.",
        ],
        flags: &[
            "<Tag> cam { shground }",
            "<Scalar> draw-order { 0 }",
            "<Scalar> bin { ground }",
        ],
        category: Category::Bin,
        ..BASE
    },
    ObjectType {
        name: "bin-fixed",
        flags: &["<Scalar> bin { fixed }"],
        category: Category::Bin,
        friendly_name: Some("Fixed"),
        ..BASE
    },
    ObjectType {
        name: "bin-gui-popup",
        flags: &["<Scalar> bin { gui-popup }"],
        category: Category::Bin,
        friendly_name: Some("GUI Popup"),
        ..BASE
    },
    ObjectType {
        name: "bin-unsorted",
        flags: &["<Scalar> bin { unsorted }"],
        category: Category::Bin,
        friendly_name: Some("Unsorted"),
        ..BASE
    },
    ObjectType {
        name: "bin-opaque",
        flags: &["<Scalar> bin { opaque }"],
        category: Category::Bin,
        friendly_name: Some("Opaque"),
        ..BASE
    },
    ObjectType {
        name: "bin-background",
        flags: &["<Scalar> bin { background }"],
        category: Category::Bin,
        friendly_name: Some("Background"),
        ..BASE
    },
    ObjectType {
        name: "bin-transparent",
        flags: &["<Scalar> bin { transparent }"],
        category: Category::Bin,
        friendly_name: Some("Transparent"),
        ..BASE
    },
    ObjectType {
        name: "dupefloor",
        description: &[
            "This type first creates a duplicate of the selected object(s).",
            "Then, creates a floor collision from the duplicate object(s) that \"Avatars\" can walk on.",
            "If the surface is angled, the Avatar will not slide down it.",
            "The collision is active on the \"Normals\" side of the object(s)",
        ],
        flags: &["<Collide> { Polyset keep descend level }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "smooth-floors",
        description: &["Makes floors smooth for the \"Avatars\" to walk and stand on."],
        flags: &[
            "<Collide> { Polyset descend }",
            "<Scalar> from-collide-mask { 0x000fffff }",
            "<Scalar> into-collide-mask { 0x00000002 }",
        ],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "camera-collide",
        description: &["Allows only the camera to collide with the geometry."],
        flags: &[
            "<Scalar> collide-mask { 0x04 }",
            "<Collide> { Polyset descend }",
        ],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "sphere",
        description: &[
            "Creates a \"minimum-sized\" sphere collision around the selected object(s), that other objects cannot enter into.",
        ],
        flags: &["<Collide> { Sphere descend }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "tube",
        description: &[
            "Creates a \"minimum-sized\" tube collision around the selected object(s), that other objects cannot enter into.",
        ],
        flags: &["<Collide> { Tube descend }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "trigger",
        description: &[
            "Creates a collision that can be used as a \"Trigger\", which can be used to activate, or deactivate, specific processes.",
            "The collision is active on the \"Normals\" side of the object(s)",
        ],
        flags: &["<Collide> { Polyset descend intangible }"],
        category: Category::Trigger,
        ..BASE
    },
    ObjectType {
        name: "trigger-sphere",
        description: &[
            "Creates a \"minimum-sized\" sphere collision that can be used as a \"Trigger\", which can be used to activate, or deactivate, specific processes.",
            "The collision is active on the \"Normals\" side of the object(s)",
        ],
        flags: &["<Collide> { Sphere descend intangible }"],
        category: Category::Trigger,
        ..BASE
    },
    ObjectType {
        name: "invsphere",
        description: &[
            "Creates a \"minimum-sized\" inverse-sphere collision around the selected object(s). Any object inside the sphere will be prevented from exiting the sphere.",
        ],
        flags: &["<Collide> { InvSphere descend }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "bubble",
        description: &[
            "\"bubble\" puts a Sphere collision around the geometry, but does not otherwise remove the geometry.",
        ],
        flags: &["<Collide> { Sphere keep descend }"],
        category: Category::Collision,
        ..BASE
    },
    ObjectType {
        name: "dual",
        description: &[
            "Normally attached to polygons that have transparency, that are in the scene by themselves, such as a Tree or Flower.",
        ],
        flags: &["<Scalar> alpha { dual }"],
        category: Category::AlphaBlend,
        ..BASE
    },
    ObjectType {
        name: "multisample",
        flags: &["<Scalar> alpha { ms }"],
        category: Category::AlphaBlend,
        ..BASE
    },
    ObjectType {
        name: "blend",
        flags: &["<Scalar> alpha { blend }"],
        category: Category::AlphaBlend,
        ..BASE
    },
    ObjectType {
        name: "decal",
        flags: &["<Scalar> decal { 1 }"],
        ..BASE
    },
    ObjectType {
        name: "ghost",
        description: &[
            "\"ghost\" turns off the normal collide bit that is set on visible geometry by default, so that if you are using visible geometry for collisions, this particular geometry will not be part of those collisions--it is ghostlike. Characters will pass through it.",
        ],
        flags: &["<Scalar> collide-mask { 0 }"],
        ..BASE
    },
    ObjectType {
        name: "glass",
        flags: &["<Scalar> alpha { blend_no_occlude }"],
        category: Category::AlphaBlend,
        ..BASE
    },
    ObjectType {
        name: "glow",
        description: &[
            "\"glow\" is useful for halo effects and things of that ilk. It renders the object in add mode instead of the normal opaque mode.",
        ],
        flags: &["<Scalar> blend { add }"],
        category: Category::AlphaOp,
        friendly_name: Some("Add"),
        ..BASE
    },
    ObjectType {
        name: "binary",
        description: &[
            "This mode of alpha sets transparency pixels to either on or off. No blending is used.",
        ],
        flags: &["<Scalar> alpha { binary }"],
        category: Category::AlphaBlend,
        ..BASE
    },
    ObjectType {
        name: "indexed",
        flags: &["<Scalar> indexed { 1 }"],
        ..BASE
    },
    ObjectType {
        name: "model",
        description: &[
            "This creates a ModelNode at the corresponding level, which is guaranteed not to be removed by any flatten operation. However, its transform might still be changed.",
        ],
        flags: &["<Model> { 1 }"],
        ..BASE
    },
    ObjectType {
        name: "dcs",
        description: &[
            "Indicates the node should not be flattened out of the hierarchy during conversion. The node's transform is important and should be preserved.",
        ],
        flags: &["<DCS> { 1 }"],
        category: Category::Dcs,
        ..BASE
    },
    ObjectType {
        name: "netdcs",
        flags: &["<DCS> { net }"],
        category: Category::Dcs,
        friendly_name: Some("Net"),
        ..BASE
    },
    ObjectType {
        name: "localdcs",
        flags: &["<DCS> { local }"],
        category: Category::Dcs,
        friendly_name: Some("Local"),
        ..BASE
    },
    ObjectType {
        name: "notouch",
        description: &[
            "Indicates the node, and below, should not be flattened out of the hierarchy during the conversion process.",
        ],
        flags: &["<DCS> { no-touch }"],
        category: Category::Dcs,
        ..BASE
    },
    ObjectType {
        name: "double-sided",
        description: &[
            "Defines whether the polygon will be rendered double-sided (i.e., its back face will be visible).",
        ],
        flags: &["<BFace> { 1 }"],
        ..BASE
    },
    ObjectType {
        name: "billboard",
        description: &[
            "Rotates the geometry to always face the camera. Geometry will rotate on its local axis.",
        ],
        flags: &["<Billboard> { axis }"],
        category: Category::Billboard,
        friendly_name: Some("BB-Axis"),
        ..BASE
    },
    ObjectType {
        name: "seq2",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 2 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 2 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "seq4",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 4 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 4 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "seq6",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 6 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 6 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "seq8",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 8 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 8 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "seq10",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 10 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 10 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "seq12",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 12 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 12 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "seq24",
        description: &[
            "Indicates a series of animation frames that should be consecutively displayed at 24 fps.",
        ],
        flags: &["<Switch> { 1 }", "<Scalar> fps { 24 }"],
        category: Category::Sequence,
        ..BASE
    },
    ObjectType {
        name: "ground",
        flags: &["<Scalar> bin { ground }"],
        category: Category::Bin,
        ..BASE
    },
    ObjectType {
        name: "invisible",
        ..BASE
    },
    ObjectType {
        name: "catch-grab",
        description: &[
            "Things the magnet can pick up in the Cashbot CFO battle (same as CatchGameBitmask)",
        ],
        flags: &["<Scalar> collide-mask { 0x08 }"],
        category: Category::Toontown,
        ..BASE
    },
    ObjectType {
        name: "pet",
        description: &["Pets avoid this"],
        flags: &["<Scalar> collide-mask { 0x10 }"],
        category: Category::Toontown,
        ..BASE
    },
    ObjectType {
        name: "furniture-side",
        flags: &["<Scalar> collide-mask { 0x20 }"],
        category: Category::Toontown,
        ..BASE
    },
    ObjectType {
        name: "furniture-top",
        flags: &["<Scalar> collide-mask { 0x40 }"],
        category: Category::Toontown,
        ..BASE
    },
    ObjectType {
        name: "furniture-drag",
        flags: &["<Scalar> collide-mask { 0x80 }"],
        category: Category::Toontown,
        ..BASE
    },
    ObjectType {
        name: "pie",
        description: &["Things we can throw a pie at."],
        flags: &["<Scalar> collide-mask { 0x100 }"],
        category: Category::Toontown,
        ..BASE
    },
];

/// Ordering of name listings produced by [`Registry::all_names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Catalog registration order, unmodified
    Registration,
    /// Case-insensitive natural sort of names
    Alphabetical,
    /// Grouped by category ordinal, names natural-sorted within each group
    ByCategory,
}

/// Case-insensitive natural comparison: runs of digits compare numerically,
/// so `seq2` sorts before `seq10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let mut na = 0u64;
                    while let Some(d) = ca.peek().and_then(|c| c.to_digit(10)) {
                        na = na.saturating_mul(10).saturating_add(d as u64);
                        ca.next();
                    }
                    let mut nb = 0u64;
                    while let Some(d) = cb.peek().and_then(|c| c.to_digit(10)) {
                        nb = nb.saturating_mul(10).saturating_add(d as u64);
                        cb.next();
                    }
                    match na.cmp(&nb) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                } else {
                    let (la, lb) = (x.to_ascii_lowercase(), y.to_ascii_lowercase());
                    match la.cmp(&lb) {
                        Ordering::Equal => {
                            ca.next();
                            cb.next();
                        }
                        ord => return ord,
                    }
                }
            }
        }
    }
}

/// Queryable view over the catalog. One process-wide instance exists as
/// [`registry()`]; constructing more is only useful in tests.
pub struct Registry {
    by_name: HashMap<&'static str, &'static ObjectType>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry built from [`CATALOG`].
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    fn new() -> Self {
        let mut by_name = HashMap::with_capacity(CATALOG.len());
        for ot in CATALOG {
            let prior = by_name.insert(ot.name, ot);
            debug_assert!(prior.is_none(), "duplicate object-type name: {}", ot.name);
        }
        Self { by_name }
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Look up a definition by name.
    pub fn lookup(&self, name: &str) -> Result<&'static ObjectType, RegistryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Tooltip text for a type; see [`ObjectType::annotation_text`].
    pub fn annotation_text(&self, name: &str) -> Result<String, RegistryError> {
        Ok(self.lookup(name)?.annotation_text())
    }

    /// All type names under the requested ordering.
    pub fn all_names(&self, sort: SortMode) -> Vec<&'static str> {
        match sort {
            SortMode::Registration => CATALOG.iter().map(|ot| ot.name).collect(),
            SortMode::Alphabetical => {
                let mut names: Vec<&'static str> = CATALOG.iter().map(|ot| ot.name).collect();
                names.sort_by(|a, b| natural_cmp(a, b));
                names
            }
            SortMode::ByCategory => {
                let mut types: Vec<&'static ObjectType> = CATALOG.iter().collect();
                types.sort_by(|a, b| {
                    a.category
                        .ordinal()
                        .cmp(&b.category.ordinal())
                        .then_with(|| natural_cmp(a.name, b.name))
                });
                types.into_iter().map(|ot| ot.name).collect()
            }
        }
    }

    /// Members of one category, natural-sorted by name.
    pub fn children_of(&self, category: Category) -> Vec<&'static ObjectType> {
        let mut children: Vec<&'static ObjectType> = CATALOG
            .iter()
            .filter(|ot| ot.category == category)
            .collect();
        children.sort_by(|a, b| natural_cmp(a.name, b.name));
        children
    }

    /// The colon-joined enumeration string used by the Maya enum-attribute
    /// layout. Node attributes store an index into this list, so its order
    /// (category sort) must stay stable across sessions.
    pub fn enumeration_list(&self) -> String {
        self.all_names(SortMode::ByCategory).join(":")
    }

    /// Every definition line, in registration order, ready to paste into a
    /// PRC file. egg2bam errors out on any attached type it cannot resolve,
    /// so exported scenes need all of these registered.
    pub fn prc_block(&self) -> String {
        let mut out = String::new();
        for ot in CATALOG {
            out.push_str(&ot.definition_syntax());
            out.push('\n');
        }
        out
    }
}
