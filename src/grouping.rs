//! Deduplication and category grouping of catalog nodes.

use crate::model::{CategoryPath, NodeDescriptor};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Categories in ordinal path order, each with its nodes in sort-key order.
pub type CategoryGroups = BTreeMap<CategoryPath, Vec<NodeDescriptor>>;

/// Keep the first node for every sort key (overload key, else display name),
/// preserving encounter order. Later duplicates are dropped silently.
pub fn dedup(nodes: &[NodeDescriptor]) -> Vec<NodeDescriptor> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for node in nodes {
        if seen.insert(node.sort_key()) {
            out.push(node.clone());
        } else {
            debug!(node = %node.qualified_name, key = node.sort_key(), "dropping duplicate overload");
        }
    }
    out
}

/// Bucket nodes by exact category path. Nodes without a resolvable category
/// are left out. Buckets are sorted by the node sort key; the sort is stable,
/// so nodes with equal keys keep their input order.
pub fn group_by_category(nodes: Vec<NodeDescriptor>) -> CategoryGroups {
    let mut groups = CategoryGroups::new();
    for node in nodes {
        match node.category.clone() {
            Some(path) => groups.entry(path).or_default().push(node),
            None => debug!(node = %node.qualified_name, "no usable category, excluded"),
        }
    }
    for members in groups.values_mut() {
        members.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    }
    groups
}

/// [`dedup`] followed by [`group_by_category`].
pub fn categorize(nodes: &[NodeDescriptor]) -> CategoryGroups {
    group_by_category(dedup(nodes))
}
