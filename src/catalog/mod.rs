//! Node catalog loading.
//!
//! The exporter never inspects engine binaries itself. A catalog is a set of
//! library documents (`<Library>.json`) listing node types and their ports;
//! [`CatalogLoader`] is the seam through which the rest of the crate receives
//! them as [`NodeDescriptor`]s. Sub-modules:
//!
//! - [`source`] – File I/O abstraction (filesystem vs. ZIP)
//! - [`library`] – Locating library documents in search paths
//! - [`type_name`] – Engine type-name parsing and unwrapping

pub mod library;
pub mod source;
pub mod type_name;

pub use library::{LibraryLookupResult, LibraryResolver};
pub use source::{ContentSource, FsSource, ZipSource};
pub use type_name::TypeName;

use crate::model::{CategoryPath, Element, ElementKind, NodeDescriptor};
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::{debug, info};

/// Supplies the flat, ordered list of node descriptors for a set of libraries.
pub trait CatalogLoader {
    fn load(&mut self, libraries: &[String]) -> Result<Vec<NodeDescriptor>>;
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog document types
// ────────────────────────────────────────────────────────────────────────────

/// Element kind as spelled in catalog documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawElementKind {
    Operation,
    OperationList,
    Input,
    InputList,
    Impulse,
    ImpulseList,
    Output,
    OutputList,
    Other(String),
}

impl<'de> Deserialize<'de> for RawElementKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "operation" => RawElementKind::Operation,
            "operation_list" => RawElementKind::OperationList,
            "input" => RawElementKind::Input,
            "input_list" => RawElementKind::InputList,
            "impulse" => RawElementKind::Impulse,
            "impulse_list" => RawElementKind::ImpulseList,
            "output" => RawElementKind::Output,
            "output_list" => RawElementKind::OutputList,
            other => RawElementKind::Other(other.to_string()),
        })
    }
}

/// One port entry of a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawElement {
    pub kind: RawElementKind,
    pub name: String,
    /// Defaults to the position within the group.
    #[serde(default)]
    pub index: Option<usize>,
    /// Field type for inputs, output type for outputs, impulse type for
    /// impulses, type constraint for output lists.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub supports_sync: bool,
    #[serde(default)]
    pub supports_async: bool,
}

fn default_true() -> bool {
    true
}

/// One node type entry of a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overload: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default)]
    pub fixed_operations: Vec<RawElement>,
    #[serde(default)]
    pub dynamic_operations: Vec<RawElement>,
    #[serde(default)]
    pub fixed_inputs: Vec<RawElement>,
    #[serde(default)]
    pub dynamic_inputs: Vec<RawElement>,
    #[serde(default)]
    pub fixed_impulses: Vec<RawElement>,
    #[serde(default)]
    pub dynamic_impulses: Vec<RawElement>,
    #[serde(default)]
    pub fixed_outputs: Vec<RawElement>,
    #[serde(default)]
    pub dynamic_outputs: Vec<RawElement>,
}

/// A library document: `{ "nodes": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawLibrary {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

// ────────────────────────────────────────────────────────────────────────────
// Conversion
// ────────────────────────────────────────────────────────────────────────────

fn short_type(raw: &str) -> Result<String> {
    Ok(TypeName::parse(raw)?.short_name())
}

fn required_type<'a>(element: &'a RawElement, what: &str) -> Result<&'a str> {
    match element.type_name.as_deref() {
        Some(t) => Ok(t),
        None => bail!("{} '{}' has no type", what, element.name),
    }
}

/// Convert one catalog port entry into an [`Element`].
pub fn convert_element(position: usize, raw: &RawElement) -> Result<Element> {
    let kind = match &raw.kind {
        RawElementKind::Operation => ElementKind::Operation {
            is_async: raw.is_async,
        },
        RawElementKind::OperationList => ElementKind::OperationList {
            supports_sync: raw.supports_sync,
            supports_async: raw.supports_async,
        },
        RawElementKind::Input => ElementKind::Input {
            value_type: TypeName::parse(required_type(raw, "Input")?)?.unwrapped(),
        },
        RawElementKind::InputList => ElementKind::InputList {
            value_type: TypeName::parse(required_type(raw, "Input list")?)?.unwrapped(),
        },
        RawElementKind::Impulse => ElementKind::Impulse {
            impulse_type: required_type(raw, "Impulse")?.to_string(),
        },
        RawElementKind::ImpulseList => ElementKind::ImpulseList {
            impulse_type: raw.type_name.clone(),
        },
        RawElementKind::Output => ElementKind::Output {
            output_type: short_type(required_type(raw, "Output")?)?,
        },
        RawElementKind::OutputList => ElementKind::OutputList {
            type_constraint: raw.type_name.as_deref().map(short_type).transpose()?,
        },
        RawElementKind::Other(kind) => ElementKind::Unrecognized { kind: kind.clone() },
    };
    Ok(Element::new(raw.index.unwrap_or(position), raw.name.clone(), kind))
}

fn convert_group(group: &[RawElement]) -> Result<Vec<Element>> {
    group
        .iter()
        .enumerate()
        .map(|(i, raw)| convert_element(i, raw))
        .collect()
}

/// Resolve the display name: explicit name, else the last segment of the
/// overload key, else the type name without arity. Whichever wins is split
/// into words.
fn display_name(raw: &RawNode, ty: &TypeName) -> String {
    let explicit = raw.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let from_overload = || {
        raw.overload
            .as_deref()
            .and_then(|o| o.rsplit('.').next())
            .filter(|s| !s.is_empty())
    };
    let name = explicit
        .or_else(from_overload)
        .unwrap_or_else(|| type_name::strip_arity(&ty.name));
    type_name::beautify_name(name)
}

/// Convert one catalog node entry into a [`NodeDescriptor`].
pub fn convert_node(raw: &RawNode, root_category: &str) -> Result<NodeDescriptor> {
    let ty = TypeName::parse(&raw.type_name)
        .with_context(|| format!("Invalid node type {}", raw.type_name))?;
    let category = match raw.category.as_deref() {
        None => Some(CategoryPath::root(root_category)),
        Some(relative) => CategoryPath::under(root_category, relative),
    };
    let in_node = || format!("In node {}", raw.type_name);
    Ok(NodeDescriptor {
        qualified_name: ty.full_name(),
        display_name: display_name(raw, &ty),
        category,
        overload: raw.overload.clone(),
        fixed_operations: convert_group(&raw.fixed_operations).with_context(in_node)?,
        dynamic_operations: convert_group(&raw.dynamic_operations).with_context(in_node)?,
        fixed_inputs: convert_group(&raw.fixed_inputs).with_context(in_node)?,
        dynamic_inputs: convert_group(&raw.dynamic_inputs).with_context(in_node)?,
        fixed_impulses: convert_group(&raw.fixed_impulses).with_context(in_node)?,
        dynamic_impulses: convert_group(&raw.dynamic_impulses).with_context(in_node)?,
        fixed_outputs: convert_group(&raw.fixed_outputs).with_context(in_node)?,
        dynamic_outputs: convert_group(&raw.dynamic_outputs).with_context(in_node)?,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// JSON catalog
// ────────────────────────────────────────────────────────────────────────────

/// [`CatalogLoader`] reading library documents from a [`ContentSource`].
pub struct JsonCatalog<S: ContentSource> {
    source: S,
    resolver: LibraryResolver,
    root_category: String,
}

impl<S: ContentSource> JsonCatalog<S> {
    pub fn new<P: AsRef<Utf8Path>>(
        source: S,
        search_paths: impl IntoIterator<Item = P>,
        root_category: impl Into<String>,
    ) -> Self {
        Self {
            source,
            resolver: LibraryResolver::new(search_paths),
            root_category: root_category.into(),
        }
    }

    /// Parse one library document, keeping public, non-abstract node types
    /// in document order.
    pub fn load_library(&mut self, path: &Utf8Path) -> Result<Vec<NodeDescriptor>> {
        let text = self.source.read_to_string(path)?;
        let library: RawLibrary =
            serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON {}", path))?;
        let mut nodes = Vec::with_capacity(library.nodes.len());
        for raw in &library.nodes {
            if !raw.public || raw.is_abstract {
                debug!(node = %raw.type_name, "skipping non-public or abstract node type");
                continue;
            }
            nodes.push(
                convert_node(raw, &self.root_category).with_context(|| format!("In {}", path))?,
            );
        }
        Ok(nodes)
    }

    fn library_paths(&mut self, libraries: &[String]) -> Result<Vec<(String, Utf8PathBuf)>> {
        if libraries.is_empty() {
            return self.resolver.discover(&mut self.source);
        }
        let lookup = self
            .resolver
            .locate(&mut self.source, libraries.iter().map(String::as_str))?;
        if !lookup.not_found.is_empty() {
            bail!(
                "Catalog libraries not found in search paths: {}",
                lookup.not_found.join(", ")
            );
        }
        Ok(lookup.found)
    }
}

impl<S: ContentSource> CatalogLoader for JsonCatalog<S> {
    fn load(&mut self, libraries: &[String]) -> Result<Vec<NodeDescriptor>> {
        let mut nodes = Vec::new();
        for (name, path) in self.library_paths(libraries)? {
            let loaded = self.load_library(&path)?;
            info!(library = %name, path = %path, nodes = loaded.len(), "loaded catalog library");
            nodes.extend(loaded);
        }
        Ok(nodes)
    }
}
