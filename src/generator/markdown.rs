//! Markdown pages: one page per category holding a table per node, and an
//! index page including every category page.

use crate::config::{ExportConfig, Templates};
use crate::model::{CategoryPath, NodeDescriptor};
use crate::render::{RowRenderer, escape_cell};
use crate::sequencer::PortSequencer;
use anyhow::Result;
use std::fmt::Write;

/// Assembles page text. Performs no I/O.
#[derive(Debug, Clone)]
pub struct MarkdownAssembler {
    templates: Templates,
    page_file: String,
    sequencer: PortSequencer,
    renderer: RowRenderer,
}

impl MarkdownAssembler {
    pub fn new(
        templates: Templates,
        page_file: impl Into<String>,
        sequencer: PortSequencer,
        renderer: RowRenderer,
    ) -> Self {
        Self {
            templates,
            page_file: page_file.into(),
            sequencer,
            renderer,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        Ok(Self::new(
            config.templates.clone(),
            config.page_file.clone(),
            PortSequencer::new(config.list_ends),
            RowRenderer::new(&config.markup_pattern)?,
        ))
    }

    /// The table of one node, from its `###` heading to its embed end marker.
    pub fn node_table(&self, path: &CategoryPath, node: &NodeDescriptor) -> String {
        let title = self.renderer.display_label(&node.display_name);
        let type_id = escape_cell(&node.qualified_name);
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "### {}", title);
        out.push('\n');
        let _ = writeln!(out, "<!-- embed:start:{} -->", type_id);
        out.push_str("<!-- ProtofluxNode:start -->\n");
        let _ = writeln!(out, "| {} | Type | Label |", title);
        out.push_str("| --- | ---- | ----- |\n");
        let elements = self.sequencer.sequence(node);
        for row in self.renderer.render_all(&elements) {
            let _ = writeln!(out, "{}", row);
        }
        let _ = writeln!(out, "| {} | {} |  |", path, type_id);
        out.push_str("<!-- ProtofluxNode:end -->\n");
        let _ = writeln!(out, "<!-- embed:end:{} -->", type_id);
        out.push_str("\n\n");
        out
    }

    pub fn category_page(&self, path: &CategoryPath, nodes: &[NodeDescriptor]) -> String {
        let mut out = self
            .templates
            .category_notice
            .replace("{category}", path.as_str());
        for node in nodes {
            out.push_str(&self.node_table(path, node));
        }
        out
    }

    /// One include line per category, in the order given.
    pub fn index_page<'a>(&self, paths: impl IntoIterator<Item = &'a CategoryPath>) -> String {
        let mut out = self.templates.index_notice.clone();
        for path in paths {
            let _ = writeln!(
                out,
                "[Category {}](./{}/{} ':include')",
                path,
                path.as_str().replace(' ', "%20"),
                self.page_file
            );
            out.push('\n');
        }
        out
    }
}
