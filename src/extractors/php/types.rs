// PHP Extractor - Type lowering (classes, interfaces, traits, enums)

use super::helpers::{
    find_child, find_child_text, line_span, modifier_flags, node_text, normalize_type_name,
};
use super::members::lower_members;
use crate::extractors::base::{ClassDeclaration, DeclarationFlags, TypeReference};
use tracing::debug;
use tree_sitter::Node;

/// Lower a PHP class-like declaration node
pub(super) fn lower_type_declaration(node: Node, source: &[u8]) -> ClassDeclaration {
    let name = find_child_text(&node, "name", source);
    let mut flags = modifier_flags(&node);

    match node.kind() {
        "interface_declaration" => flags |= DeclarationFlags::INTERFACE,
        "trait_declaration" => flags |= DeclarationFlags::TRAIT,
        _ => {}
    }

    let parents = find_child(&node, "base_clause")
        .map(|clause| clause_references(&clause, source))
        .unwrap_or_default();
    let interfaces = find_child(&node, "class_interface_clause")
        .map(|clause| clause_references(&clause, source))
        .unwrap_or_default();

    // Interfaces list their parents after `extends`; those are modelled as
    // implemented interfaces with an empty extends slot.
    let (extends, implements) = if flags.contains(DeclarationFlags::INTERFACE) {
        (None, parents)
    } else {
        (parents.into_iter().next(), interfaces)
    };

    let members = find_child(&node, "declaration_list")
        .or_else(|| find_child(&node, "enum_declaration_list"))
        .map(|body| lower_members(&body))
        .unwrap_or_default();

    debug!(
        "Lowered {} '{}' with {} members",
        node.kind(),
        name.as_deref().unwrap_or("?"),
        members.len()
    );

    ClassDeclaration {
        name,
        extends,
        implements,
        flags,
        span: line_span(&node),
        members,
    }
}

/// Entries of an `extends` / `implements` clause, in source order
fn clause_references(clause: &Node, source: &[u8]) -> Vec<TypeReference> {
    let mut references = Vec::new();
    let mut cursor = clause.walk();

    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "name" | "qualified_name" => {
                references.push(TypeReference::Named(normalize_type_name(&node_text(
                    &child, source,
                ))));
            }
            "comment" => {}
            other => references.push(TypeReference::Other(other.to_string())),
        }
    }

    references
}
