use serde::Serialize;
use std::fmt;

// ────────────────────────────────────────────────────────────────────────────
// Category paths
// ────────────────────────────────────────────────────────────────────────────

/// A `/`-separated category path such as `Root/Math/Trig`.
///
/// Paths compare by ordinal comparison of the joined string, which is the
/// order categories appear in the index page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryPath(String);

impl CategoryPath {
    /// The root category every other path hangs off.
    pub fn root(root: &str) -> Self {
        Self(root.to_string())
    }

    /// Build `{root}/{relative}`. Returns `None` when `relative` is blank or
    /// contains an empty (`Math//Trig`, `/Math`) or relative (`.`, `..`)
    /// segment, since segments become directories under the export root.
    pub fn under(root: &str, relative: &str) -> Option<Self> {
        let relative = relative.trim();
        let unusable = |s: &str| matches!(s.trim(), "" | "." | "..");
        if relative.is_empty() || relative.split('/').any(unusable) {
            return None;
        }
        Some(Self(format!("{}/{}", root, relative)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Elements
// ────────────────────────────────────────────────────────────────────────────

/// Which side of a node table an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Input,
    Output,
}

/// Kind-specific data of a node element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum ElementKind {
    Operation {
        is_async: bool,
    },
    OperationList {
        supports_sync: bool,
        supports_async: bool,
    },
    /// `value_type` is already unwrapped from its generic container.
    Input {
        value_type: String,
    },
    InputList {
        value_type: String,
    },
    Impulse {
        impulse_type: String,
    },
    ImpulseList {
        impulse_type: Option<String>,
    },
    Output {
        output_type: String,
    },
    OutputList {
        type_constraint: Option<String>,
    },
    /// Synthetic row closing a dynamic list (its add/remove buttons).
    ListEnd {
        side: Side,
        label: String,
    },
    /// A catalog entry whose kind this crate does not know about.
    Unrecognized {
        kind: String,
    },
}

/// One port of a node: its position within its group, its display label and
/// its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub index: usize,
    pub name: String,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(index: usize, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            index,
            name: name.into(),
            kind,
        }
    }

    /// The side this element renders on, or `None` for unrecognized kinds.
    pub fn side(&self) -> Option<Side> {
        match &self.kind {
            ElementKind::Operation { .. }
            | ElementKind::OperationList { .. }
            | ElementKind::Input { .. }
            | ElementKind::InputList { .. } => Some(Side::Input),
            ElementKind::Impulse { .. }
            | ElementKind::ImpulseList { .. }
            | ElementKind::Output { .. }
            | ElementKind::OutputList { .. } => Some(Side::Output),
            ElementKind::ListEnd { side, .. } => Some(*side),
            ElementKind::Unrecognized { .. } => None,
        }
    }

    pub fn is_list_end(&self) -> bool {
        matches!(self.kind, ElementKind::ListEnd { .. })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

/// A node type as supplied by the catalog loader.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NodeDescriptor {
    /// Namespace-qualified type name, e.g. ``Ns.ValueAdd`1``.
    pub qualified_name: String,
    pub display_name: String,
    /// `None` when the loader could not resolve a usable category.
    pub category: Option<CategoryPath>,
    pub overload: Option<String>,

    pub fixed_operations: Vec<Element>,
    pub dynamic_operations: Vec<Element>,
    pub fixed_inputs: Vec<Element>,
    pub dynamic_inputs: Vec<Element>,
    pub fixed_impulses: Vec<Element>,
    pub dynamic_impulses: Vec<Element>,
    pub fixed_outputs: Vec<Element>,
    pub dynamic_outputs: Vec<Element>,
}

impl NodeDescriptor {
    /// Key used both for deduplication and for ordering within a category:
    /// the overload key if present, else the display name.
    pub fn sort_key(&self) -> &str {
        self.overload.as_deref().unwrap_or(&self.display_name)
    }

    /// Number of elements across all eight groups.
    pub fn element_count(&self) -> usize {
        self.fixed_operations.len()
            + self.dynamic_operations.len()
            + self.fixed_inputs.len()
            + self.dynamic_inputs.len()
            + self.fixed_impulses.len()
            + self.dynamic_impulses.len()
            + self.fixed_outputs.len()
            + self.dynamic_outputs.len()
    }

    /// Number of dynamic lists, i.e. elements that get a list-end row.
    pub fn dynamic_count(&self) -> usize {
        self.dynamic_operations.len()
            + self.dynamic_inputs.len()
            + self.dynamic_impulses.len()
            + self.dynamic_outputs.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendered rows
// ────────────────────────────────────────────────────────────────────────────

/// First column of a node table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleTag {
    Input,
    InputList,
    InputListButtons,
    Output,
    OutputList,
    OutputListButtons,
}

impl RoleTag {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleTag::Input => "input",
            RoleTag::InputList => "inputlist",
            RoleTag::InputListButtons => "inputlistbuttons",
            RoleTag::Output => "output",
            RoleTag::OutputList => "outputlist",
            RoleTag::OutputListButtons => "outputlistbuttons",
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One escaped table row, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub role: RoleTag,
    pub type_label: String,
    pub display_label: String,
}

impl fmt::Display for RenderedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {} | {} | {} |",
            self.role, self.type_label, self.display_label
        )
    }
}
