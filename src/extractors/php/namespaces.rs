// PHP Extractor - Namespace declarations

use super::helpers::{find_child, find_child_text};
use super::lower_statements;
use crate::extractors::base::NamespaceDeclaration;
use tree_sitter::Node;

/// Lower `namespace A\B;` and the braced form `namespace A\B { ... }`
///
/// The braced body is kept as the namespace's own statement list so types
/// declared inside it are still top-level declarations of the file.
pub(super) fn lower_namespace(node: Node, source: &[u8]) -> NamespaceDeclaration {
    let name = find_child_text(&node, "namespace_name", source)
        .map(|name| name.trim().trim_start_matches('\\').to_string())
        .filter(|name| !name.is_empty());

    let body = find_child(&node, "compound_statement").map(|body| lower_statements(body, source));

    NamespaceDeclaration { name, body }
}
