//! Applies a language entry's field descriptors to a document.

use crate::document::{Document, NodeId, Property};
use crate::i18n::{Content, FieldDescriptor, FieldKind, FieldMap};
use tracing::{debug, warn};

/// Counts from one application pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Descriptors whose content was applied to at least one node
    pub applied: usize,

    /// Descriptors with absent or falsy content
    pub skipped: usize,

    /// Descriptors whose selector matched nothing (or could not be evaluated)
    pub unmatched: usize,

    /// Total node mutations attempted, across all descriptors
    pub nodes: usize,
}

/// Apply every active descriptor in `fields`, in insertion order.
///
/// Zero matches and unknown field types are not errors. An invalid selector
/// is logged and treated as zero matches.
pub fn apply<D: Document + ?Sized>(document: &mut D, fields: &FieldMap) -> ApplyReport {
    let mut report = ApplyReport::default();

    for (key, descriptor) in fields.iter() {
        let Some(content) = descriptor.active_content() else {
            report.skipped += 1;
            continue;
        };

        let nodes = match document.query_all(&descriptor.selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!(
                    "Field '{}': cannot evaluate selector '{}': {}",
                    key, descriptor.selector, e
                );
                Vec::new()
            }
        };

        if nodes.is_empty() {
            debug!("Field '{}': no nodes match '{}'", key, descriptor.selector);
            report.unmatched += 1;
            continue;
        }

        for node in &nodes {
            apply_to_node(document, *node, descriptor, content);
        }
        report.applied += 1;
        report.nodes += nodes.len();
    }

    report
}

fn apply_to_node<D: Document + ?Sized>(
    document: &mut D,
    node: NodeId,
    descriptor: &FieldDescriptor,
    content: &Content,
) {
    match &descriptor.kind {
        FieldKind::Text => document.set_text(node, &content.to_text()),
        FieldKind::Select => {
            let option_count = document.option_count(node);
            for (index, label) in content.labels().iter().take(option_count).enumerate() {
                document.set_option_label(node, index, label);
            }
        }
        FieldKind::Value => document.set_property(node, Property::Value, &content.to_text()),
        FieldKind::Placeholder => {
            document.set_property(node, Property::Placeholder, &content.to_text());
        }
        FieldKind::Title => document.set_property(node, Property::Title, &content.to_text()),
        FieldKind::Alt => document.set_property(node, Property::Alt, &content.to_text()),
        FieldKind::Href => document.set_property(node, Property::Href, &content.to_text()),
        FieldKind::Src => document.set_property(node, Property::Src, &content.to_text()),
        FieldKind::Disabled => document.set_disabled(node, content.is_truthy()),
        FieldKind::Unknown(tag) => {
            debug!("Ignoring unknown field type '{}'", tag);
        }
    }
}
