//! Structural extraction: one syntax tree in, `TypeMetrics` records out.
//!
//! Only the top-level statement list is visited (plus the body of a braced
//! namespace, which is the top level of that namespace). Type bodies are
//! inspected one level deep to count members; nothing else is recursed into.

use crate::extractors::base::{
    ClassDeclaration, Declaration, DeclarationFlags, MemberKind, SyntaxTree, TypeCategory,
    TypeMetrics, UNKNOWN_NAME,
};
use tracing::debug;

/// Stateless extractor; safe to share across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralExtractor;

impl StructuralExtractor {
    pub fn new() -> Self {
        Self
    }

    /// One record per file: the last top-level type declaration wins.
    ///
    /// Returns `None` when the file declares no type.
    pub fn extract(&self, tree: &SyntaxTree, file_path: &str) -> Option<TypeMetrics> {
        self.extract_all(tree, file_path).pop()
    }

    /// One record per top-level type declaration, in source order
    pub fn extract_all(&self, tree: &SyntaxTree, file_path: &str) -> Vec<TypeMetrics> {
        let namespace = first_namespace(&tree.declarations);

        top_level_types(&tree.declarations)
            .into_iter()
            .map(|class| measure(class, file_path, namespace.as_deref()))
            .collect()
    }
}

/// The first namespace declared at the top level applies to every type in the file
///
/// A leading global block (`namespace { ... }`) counts as that first namespace.
fn first_namespace(declarations: &[Declaration]) -> Option<String> {
    declarations
        .iter()
        .find_map(|declaration| match declaration {
            Declaration::Namespace(namespace) => Some(namespace.name.clone()),
            _ => None,
        })
        .flatten()
}

fn top_level_types(declarations: &[Declaration]) -> Vec<&ClassDeclaration> {
    let mut types = Vec::new();
    for declaration in declarations {
        match declaration {
            Declaration::Class(class) => types.push(class),
            Declaration::Namespace(namespace) => {
                if let Some(body) = &namespace.body {
                    types.extend(body.iter().filter_map(|inner| match inner {
                        Declaration::Class(class) => Some(class),
                        _ => None,
                    }));
                }
            }
            Declaration::Other { .. } => {}
        }
    }
    types
}

fn measure(class: &ClassDeclaration, file_path: &str, namespace: Option<&str>) -> TypeMetrics {
    let name = class.name.clone().unwrap_or_else(|| {
        debug!(
            "Type declaration at {}:{} has no name, using '{}'",
            file_path, class.span.start_line, UNKNOWN_NAME
        );
        UNKNOWN_NAME.to_string()
    });

    let extends = class
        .extends
        .as_ref()
        .and_then(|reference| reference.name())
        .map(|name| name.to_string());

    // Only the first implemented interface is reported
    let implements = class
        .implements
        .first()
        .and_then(|reference| reference.name())
        .map(|name| name.to_string());

    let flags = class.flags;
    let category = if flags.contains(DeclarationFlags::INTERFACE) {
        TypeCategory::Interface
    } else {
        TypeCategory::Class
    };

    TypeMetrics {
        file: file_path.to_string(),
        namespace: namespace.map(|ns| ns.to_string()),
        name,
        extends,
        implements,
        line_span: class.span.line_count(),
        attribute_count: class.count_members(&MemberKind::Property),
        method_count: class.count_members(&MemberKind::Method),
        is_abstract: flags.contains(DeclarationFlags::ABSTRACT),
        is_final: flags.contains(DeclarationFlags::FINAL),
        is_trait: flags.contains(DeclarationFlags::TRAIT),
        category,
        is_anonymous: flags.contains(DeclarationFlags::ANONYMOUS),
    }
}
