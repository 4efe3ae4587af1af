//! Type-colour stylesheet.
//!
//! Every impulse type, operation mode and data type gets a `.PFN-{name}` rule
//! so the wiki can colour table rows by their type label.

use crate::color::{Color, Rgb8};
use crate::config::{ColorConfig, Templates};
use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OperationColors {
    pub sync: Color,
    #[serde(rename = "async")]
    pub async_: Color,
}

/// Palette document. Map order is the rule order of the stylesheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Palette {
    #[serde(default)]
    pub impulses: IndexMap<String, Color>,
    pub operations: OperationColors,
    #[serde(default)]
    pub types: IndexMap<String, Color>,
}

impl Palette {
    pub fn from_file(path: impl AsRef<Utf8Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("Failed to read palette {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON {}", path))
    }
}

/// Class-name form of a type name: runtime arity markers become `_`.
pub fn css_type_name(name: &str) -> String {
    name.replace('`', "_")
}

fn write_rule(out: &mut String, name: &str, rgb: Rgb8, config: &ColorConfig) {
    let _ = write!(
        out,
        ".PFN-{name} {{\n  stroke: rgb({rgb});\n  fill: rgba({rgb}, {fill});\n  background-image: linear-gradient(rgba({rgb}, {grad}), rgba({rgb}, {grad}));\n}}\n\n",
        name = name,
        rgb = rgb,
        fill = config.fill_alpha,
        grad = config.gradient_alpha,
    );
}

/// Render the stylesheet: notice, impulse rules, the three operation modes,
/// then data types.
pub fn stylesheet(palette: &Palette, config: &ColorConfig, templates: &Templates) -> String {
    let mut out = templates.css_notice.clone();
    for (name, color) in &palette.impulses {
        write_rule(&mut out, name, color.to_rgb8(config), config);
    }

    let ops = palette.operations;
    let mixed = ops.sync.lerp(ops.async_, config.mixed_ratio);
    for (name, color) in [
        ("SyncOperation", ops.sync),
        ("AsyncOperation", ops.async_),
        ("MixedOperation", mixed),
    ] {
        write_rule(&mut out, name, color.to_rgb8(config), config);
    }

    for (name, color) in &palette.types {
        write_rule(&mut out, &css_type_name(name), color.to_rgb8(config), config);
    }
    out
}
