//! Port sequencing: turn a node's eight element groups into the single row
//! stream of its table.
//!
//! Each side (inputs, outputs) is built in declaration order with a list-end
//! element after every dynamic list, then the two sides are merged by strict
//! alternation with [`Interleave`].

use crate::config::MarkerPolicy;
use crate::model::{Element, ElementKind, NodeDescriptor, Side};
use std::iter::{self, Fuse};

/// Type label of an operation slot given the modes it supports.
pub fn operation_mode(supports_sync: bool, supports_async: bool) -> &'static str {
    match (supports_sync, supports_async) {
        (true, true) => "MixedOperation",
        (true, false) => "SyncOperation",
        (false, true) => "AsyncOperation",
        (false, false) => "NoneOperation",
    }
}

/// Label carried by the list-end row closing a dynamic list.
fn list_end_label(list: &Element) -> String {
    match &list.kind {
        ElementKind::OperationList {
            supports_sync,
            supports_async,
        } => operation_mode(*supports_sync, *supports_async).to_string(),
        ElementKind::InputList { value_type } => value_type.clone(),
        ElementKind::ImpulseList { impulse_type } => {
            impulse_type.clone().unwrap_or_else(|| "null".to_string())
        }
        ElementKind::OutputList { type_constraint } => {
            type_constraint.clone().unwrap_or_else(|| "*".to_string())
        }
        // Lists declared with a fixed kind still get a marker; describe it
        // the same way the renderer would.
        ElementKind::Operation { is_async } => operation_mode(!is_async, *is_async).to_string(),
        ElementKind::Input { value_type } => value_type.clone(),
        ElementKind::Impulse { impulse_type } => impulse_type.clone(),
        ElementKind::Output { output_type } => output_type.clone(),
        ElementKind::ListEnd { label, .. } => label.clone(),
        ElementKind::Unrecognized { kind } => kind.clone(),
    }
}

/// Merges two iterators by alternating between them, starting with the
/// first. Once one side runs dry the other is drained alone.
pub struct Interleave<A, B> {
    first: Fuse<A>,
    second: Fuse<B>,
    take_second: bool,
}

impl<A, B> Interleave<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    pub fn new(first: A, second: B) -> Self {
        Self {
            first: first.fuse(),
            second: second.fuse(),
            take_second: false,
        }
    }
}

impl<A, B> Iterator for Interleave<A, B>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = if self.take_second {
            self.second.next().or_else(|| self.first.next())
        } else {
            self.first.next().or_else(|| self.second.next())
        };
        self.take_second = !self.take_second;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a_lo, a_hi) = self.first.size_hint();
        let (b_lo, b_hi) = self.second.size_hint();
        let hi = match (a_hi, b_hi) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (a_lo.saturating_add(b_lo), hi)
    }
}

/// Builds the row stream of a node.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortSequencer {
    policy: MarkerPolicy,
}

impl PortSequencer {
    pub fn new(policy: MarkerPolicy) -> Self {
        Self { policy }
    }

    /// Each list of a dynamic group followed by its list-end element.
    fn dynamic_group<'a>(
        &self,
        group: &'a [Element],
        side: Side,
    ) -> impl Iterator<Item = Element> + 'a {
        let emit = self.policy == MarkerPolicy::Emit;
        group.iter().flat_map(move |list| {
            let marker = emit.then(|| {
                Element::new(
                    list.index,
                    list.name.clone(),
                    ElementKind::ListEnd {
                        side,
                        label: list_end_label(list),
                    },
                )
            });
            iter::once(list.clone()).chain(marker)
        })
    }

    /// Operations, then inputs.
    pub fn input_side(&self, node: &NodeDescriptor) -> Vec<Element> {
        node.fixed_operations
            .iter()
            .cloned()
            .chain(self.dynamic_group(&node.dynamic_operations, Side::Input))
            .chain(node.fixed_inputs.iter().cloned())
            .chain(self.dynamic_group(&node.dynamic_inputs, Side::Input))
            .collect()
    }

    /// Impulses, then outputs.
    pub fn output_side(&self, node: &NodeDescriptor) -> Vec<Element> {
        node.fixed_impulses
            .iter()
            .cloned()
            .chain(self.dynamic_group(&node.dynamic_impulses, Side::Output))
            .chain(node.fixed_outputs.iter().cloned())
            .chain(self.dynamic_group(&node.dynamic_outputs, Side::Output))
            .collect()
    }

    /// Both sides interleaved, one element from each at a time.
    pub fn sequence(&self, node: &NodeDescriptor) -> Vec<Element> {
        Interleave::new(
            self.input_side(node).into_iter(),
            self.output_side(node).into_iter(),
        )
        .collect()
    }
}
