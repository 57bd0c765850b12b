// PHP Extractor - Helper utilities
// Common functions for AST navigation and modifier inspection

use crate::extractors::base::{DeclarationFlags, LineSpan};
use tree_sitter::Node;

/// Helper method to find child node by type
#[allow(clippy::manual_find)] // Manual loop required for borrow checker
pub(super) fn find_child<'a>(node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == child_type {
            return Some(child);
        }
    }
    None
}

/// Get text from a tree-sitter node
pub(super) fn node_text(node: &Node, source: &[u8]) -> String {
    node.utf8_text(source)
        .map(|text| text.to_string())
        .unwrap_or_else(|_| String::from_utf8_lossy(&source[node.byte_range()]).to_string())
}

/// Helper method to find child node text by type
pub(super) fn find_child_text(node: &Node, child_type: &str, source: &[u8]) -> Option<String> {
    find_child(node, child_type).map(|child| node_text(&child, source))
}

/// Decode class modifiers (`abstract`, `final`) into flags
pub(super) fn modifier_flags(node: &Node) -> DeclarationFlags {
    let mut flags = DeclarationFlags::NONE;
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "abstract_modifier" | "abstract" => flags |= DeclarationFlags::ABSTRACT,
            "final_modifier" | "final" => flags |= DeclarationFlags::FINAL,
            _ => {}
        }
    }

    flags
}

/// 1-based line range of a declaration node
///
/// Leading `#[...]` attribute lists (and comments between them) are part of
/// the node but not of the declaration: the range starts at the first child
/// after them.
pub(super) fn line_span(node: &Node) -> LineSpan {
    let mut cursor = node.walk();
    let start_row = node
        .children(&mut cursor)
        .find(|child| !matches!(child.kind(), "attribute_list" | "comment"))
        .map(|child| child.start_position().row)
        .unwrap_or_else(|| node.start_position().row);

    LineSpan::new(start_row as u32 + 1, node.end_position().row as u32 + 1)
}

/// Normalize a referenced type name: `\Foo\Bar` -> `Foo\Bar`
pub(super) fn normalize_type_name(raw: &str) -> String {
    raw.trim().trim_start_matches('\\').to_string()
}

/// First ERROR or MISSING node in document order
pub(super) fn find_first_error<'a>(node: Node<'a>) -> Option<Node<'a>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(error) = find_first_error(child) {
            return Some(error);
        }
    }
    None
}
