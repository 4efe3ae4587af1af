//! Node catalog documentation exporter.
//!
//! This crate turns a visual-scripting node catalog into wiki pages: one
//! Markdown table per node, grouped into category pages, plus a stylesheet
//! colouring every data type.
//!
//! The pipeline is [`catalog`] → [`grouping`] → [`sequencer`] → [`render`] →
//! [`generator`]. The binary `nodedoc` wires it to the command line.

pub mod catalog;
pub mod color;
pub mod config;
pub mod generator;
pub mod grouping;
pub mod model;
pub mod render;
pub mod sequencer;
