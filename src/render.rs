//! Element → table row mapping and Markdown escaping.

use crate::model::{Element, ElementKind, RenderedRow, RoleTag, Side};
use crate::sequencer::operation_mode;
use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;

/// Escape characters that would break an inline-code span or a table cell.
pub fn escape_cell(s: &str) -> String {
    s.replace('`', "\\`").replace('|', "\\|")
}

/// Renders sequenced elements into table rows.
#[derive(Debug, Clone)]
pub struct RowRenderer {
    markup: Regex,
}

impl RowRenderer {
    /// `markup_pattern` matches the rich-text tags stripped from display names.
    pub fn new(markup_pattern: &str) -> Result<Self> {
        let markup = Regex::new(markup_pattern)
            .with_context(|| format!("Invalid markup pattern {}", markup_pattern))?;
        Ok(Self { markup })
    }

    /// Escape a display name and strip its markup tags. Also used for node
    /// titles.
    pub fn display_label(&self, name: &str) -> String {
        self.markup.replace_all(&escape_cell(name), "").into_owned()
    }

    /// Type labels are escaped but never stripped.
    pub fn type_label(&self, type_name: &str) -> String {
        escape_cell(type_name)
    }

    /// Map one element to its row. Unrecognized kinds are reported and
    /// yield `None`.
    pub fn render(&self, element: &Element) -> Option<RenderedRow> {
        let (role, type_name): (RoleTag, &str) = match &element.kind {
            ElementKind::Operation { is_async } => {
                (RoleTag::Input, operation_mode(!is_async, *is_async))
            }
            ElementKind::OperationList {
                supports_sync,
                supports_async,
            } => (
                RoleTag::InputList,
                operation_mode(*supports_sync, *supports_async),
            ),
            ElementKind::Input { value_type } => (RoleTag::Input, value_type.as_str()),
            ElementKind::InputList { value_type } => (RoleTag::InputList, value_type.as_str()),
            ElementKind::Impulse { impulse_type } => (RoleTag::Output, impulse_type.as_str()),
            ElementKind::ImpulseList { impulse_type } => {
                (RoleTag::OutputList, impulse_type.as_deref().unwrap_or("null"))
            }
            ElementKind::Output { output_type } => (RoleTag::Output, output_type.as_str()),
            ElementKind::OutputList { type_constraint } => {
                (RoleTag::OutputList, type_constraint.as_deref().unwrap_or("*"))
            }
            ElementKind::ListEnd {
                side: Side::Input,
                label,
            } => (RoleTag::InputListButtons, label.as_str()),
            ElementKind::ListEnd {
                side: Side::Output,
                label,
            } => (RoleTag::OutputListButtons, label.as_str()),
            ElementKind::Unrecognized { kind } => {
                warn!(kind = %kind, name = %element.name, "unrecognized element kind, row skipped");
                return None;
            }
        };
        Some(RenderedRow {
            role,
            type_label: self.type_label(type_name),
            display_label: self.display_label(&element.name),
        })
    }

    /// Render a whole row stream, skipping unrecognized elements.
    pub fn render_all<'a, I>(&'a self, elements: I) -> impl Iterator<Item = RenderedRow> + 'a
    where
        I: IntoIterator<Item = &'a Element>,
        I::IntoIter: 'a,
    {
        elements.into_iter().filter_map(move |e| self.render(e))
    }
}
