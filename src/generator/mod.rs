//! Output generation.
//!
//! This module provides:
//! - [`markdown`] – Category and index page text.
//! - [`css`] – Type-colour stylesheet text.
//! - [`export`] – Writing both to disk.

pub mod css;
pub mod export;
pub mod markdown;

pub use css::Palette;
pub use export::{ExportSummary, export_css, export_markdown, write_markdown};
pub use markdown::MarkdownAssembler;
