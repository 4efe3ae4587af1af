//! Export configuration.
//!
//! Every value the exporter used to hard-code (library names, output file
//! names, the markup pattern, page notices, colour settings) lives in
//! [`ExportConfig`]. All fields have defaults, so a config file only needs to
//! name what it changes:
//!
//! ```json
//! {
//!   "libraries": ["ProtoFlux.Nodes.Core"],
//!   "output_dir": "wiki/nodes",
//!   "list_ends": "omit",
//!   "colors": { "normalization": "max" }
//! }
//! ```

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Libraries exported when the config names none.
pub const DEFAULT_LIBRARIES: [&str; 4] = [
    "FrooxEngine",
    "ProtoFlux.Core",
    "ProtoFlux.Nodes.Core",
    "ProtoFlux.Nodes.FrooxEngine",
];

/// Strips rich-text tags like `<b>`, `</color>` or `<br/>` from display names.
pub const DEFAULT_MARKUP_PATTERN: &str = r"</?.*?/?>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Catalog libraries to load, in order. Empty loads every library found.
    pub libraries: Vec<String>,
    pub output_dir: Utf8PathBuf,
    /// File name of the index page and of every category page.
    pub page_file: String,
    pub css_file: Utf8PathBuf,
    /// Category assigned to nodes without one; prefix of every other category.
    pub root_category: String,
    pub list_ends: MarkerPolicy,
    pub markup_pattern: String,
    pub templates: Templates,
    pub colors: ColorConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            libraries: DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            output_dir: Utf8PathBuf::from("export"),
            page_file: "README.md".to_string(),
            css_file: Utf8PathBuf::from("protofluxTypes.css"),
            root_category: "Root".to_string(),
            list_ends: MarkerPolicy::Emit,
            markup_pattern: DEFAULT_MARKUP_PATTERN.to_string(),
            templates: Templates::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read config {}", path))?;
        Self::from_json(&text).with_context(|| format!("Invalid config {}", path))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Whether every dynamic list is closed by a synthetic list-end row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    #[default]
    Emit,
    Omit,
}

/// Generated-file notices written at the top of each output.
///
/// `{category}` in `category_notice` is replaced with the category path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    pub index_notice: String,
    pub category_notice: String,
    pub css_notice: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            index_notice: "\
<!-----------------------------------------------------------------------+
 ! This file has been generated using a script. Do not edit it manually. !
 +----------------------------------------------------------------------->

[All Nodes Header](./README_prefix.md ':include')

"
            .to_string(),
            category_notice: "\
<!-----------------------------------------------------------------------+
 ! This file has been generated using a script. Do not edit it manually. !
 ! Edit the individual node pages instead.                               !
 +----------------------------------------------------------------------->

## {category}

"
            .to_string(),
            css_notice: "\
/*************************************************************************
 * This file has been generated using a script. Do not edit it manually. *
 * Edit the protoflux.css file instead.                                  *
 *************************************************************************/

"
            .to_string(),
        }
    }
}

/// How a palette colour is projected into the 0–255 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide by `max(r, g, b, 1.0)`: only overbright colours are scaled down.
    #[default]
    ClampToUnit,
    /// Divide by `max(r, g, b)`: the brightest channel always becomes 255.
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Per-channel multiplier applied before normalization.
    pub scale: f32,
    pub normalization: Normalization,
    pub fill_alpha: f32,
    pub gradient_alpha: f32,
    /// Position of `MixedOperation` between the sync and async colours.
    pub mixed_ratio: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            scale: 1.5,
            normalization: Normalization::ClampToUnit,
            fill_alpha: 0.174,
            gradient_alpha: 0.7,
            mixed_ratio: 0.5,
        }
    }
}
