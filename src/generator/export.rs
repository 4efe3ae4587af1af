//! Writing generated pages and stylesheets to disk.

use super::css::{self, Palette};
use super::markdown::MarkdownAssembler;
use crate::config::ExportConfig;
use crate::grouping::CategoryGroups;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use tracing::{debug, info};

/// What a Markdown export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub index: Utf8PathBuf,
    pub pages: Vec<Utf8PathBuf>,
    pub nodes: usize,
}

fn write_file(path: &Utf8Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent.as_std_path())
            .with_context(|| format!("Failed to create directory {}", parent))?;
    }
    std::fs::write(path.as_std_path(), text).with_context(|| format!("Failed to write {}", path))
}

/// Replace `output_dir` with one page per category and an index page.
///
/// Category pages are written in parallel; the index page is written only
/// once all of them succeeded. Nothing is rolled back on failure.
pub fn write_markdown(
    output_dir: &Utf8Path,
    groups: &CategoryGroups,
    assembler: &MarkdownAssembler,
    page_file: &str,
) -> Result<ExportSummary> {
    if output_dir.exists() {
        std::fs::remove_dir_all(output_dir.as_std_path())
            .with_context(|| format!("Failed to clear {}", output_dir))?;
    }
    std::fs::create_dir_all(output_dir.as_std_path())
        .with_context(|| format!("Failed to create directory {}", output_dir))?;

    let pages = groups
        .par_iter()
        .map(|(path, nodes)| {
            let mut file = output_dir.to_path_buf();
            file.extend(path.segments());
            file.push(page_file);
            write_file(&file, &assembler.category_page(path, nodes))?;
            debug!(category = %path, nodes = nodes.len(), "wrote category page");
            Ok(file)
        })
        .collect::<Result<Vec<_>>>()?;

    let index = output_dir.join(page_file);
    write_file(&index, &assembler.index_page(groups.keys()))?;

    let nodes = groups.values().map(Vec::len).sum();
    info!(categories = pages.len(), nodes, dir = %output_dir, "markdown export finished");
    Ok(ExportSummary {
        index,
        pages,
        nodes,
    })
}

/// Convenience wrapper building the assembler from `config`.
pub fn export_markdown(config: &ExportConfig, groups: &CategoryGroups) -> Result<ExportSummary> {
    let assembler = MarkdownAssembler::from_config(config)?;
    write_markdown(&config.output_dir, groups, &assembler, &config.page_file)
}

/// Render the palette and write the stylesheet to `config.css_file`.
pub fn export_css(config: &ExportConfig, palette: &Palette) -> Result<()> {
    let text = css::stylesheet(palette, &config.colors, &config.templates);
    write_file(&config.css_file, &text)?;
    info!(
        rules = palette.impulses.len() + 3 + palette.types.len(),
        file = %config.css_file,
        "stylesheet written"
    );
    Ok(())
}
