// PHP Extractor - Member classification for type bodies

use crate::extractors::base::MemberKind;
use tree_sitter::Node;

/// Classify the direct members of a `declaration_list` / `enum_declaration_list`
///
/// Only one level is inspected; nested declarations inside method bodies are
/// never visited.
pub(super) fn lower_members(body: &Node) -> Vec<MemberKind> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| member_kind(child.kind()))
        .collect()
}

fn member_kind(kind: &str) -> MemberKind {
    match kind {
        "property_declaration" => MemberKind::Property,
        "method_declaration" => MemberKind::Method,
        "const_declaration" => MemberKind::Constant,
        "use_declaration" => MemberKind::TraitUse,
        "enum_case" => MemberKind::EnumCase,
        other => MemberKind::Other(other.to_string()),
    }
}
