// PHP Extractor for PHPCity - Modular structure
// tree-sitter adapter: lowers a PHP parse tree into the language-neutral syntax model

mod helpers;
mod members;
mod namespaces;
mod types;

use crate::error::{CityError, Result};
use crate::extractors::base::{Declaration, SyntaxTree, SyntaxTreeAdapter};
use crate::language::{get_tree_sitter_language, get_type_declaration_kinds};
use tracing::debug;
use tree_sitter::{Node, Parser};

use helpers::{find_first_error, node_text};
use namespaces::lower_namespace;
use types::lower_type_declaration;

/// [`SyntaxTreeAdapter`] backed by tree-sitter-php
///
/// Holds one parser; create one adapter per worker thread.
pub struct PhpAdapter {
    parser: Parser,
}

impl PhpAdapter {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = get_tree_sitter_language("php")?;
        parser.set_language(&language).map_err(|e| {
            CityError::UnsupportedLanguage(format!("php (grammar rejected: {})", e))
        })?;
        Ok(Self { parser })
    }
}

impl SyntaxTreeAdapter for PhpAdapter {
    fn parse(&mut self, file_path: &str, content: &str) -> Result<SyntaxTree> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| CityError::parse(file_path, 0, "parser produced no tree"))?;

        let root = tree.root_node();
        if let Some(error) = find_first_error(root) {
            let line = error.start_position().row as u32 + 1;
            let reason = if error.is_missing() {
                format!("missing '{}'", error.kind())
            } else {
                let snippet = node_text(&error, content.as_bytes());
                format!("unexpected '{}'", snippet.lines().next().unwrap_or("").trim())
            };
            return Err(CityError::parse(file_path, line, reason));
        }

        let declarations = lower_statements(root, content.as_bytes());
        debug!(
            "Lowered {} top-level statements from {}",
            declarations.len(),
            file_path
        );
        Ok(SyntaxTree { declarations })
    }
}

/// Lower the direct statements of `program` or of a braced namespace body
fn lower_statements(parent: Node, source: &[u8]) -> Vec<Declaration> {
    let type_kinds = get_type_declaration_kinds("php");
    let mut cursor = parent.walk();

    parent
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .map(|child| match child.kind() {
            "namespace_definition" => Declaration::Namespace(lower_namespace(child, source)),
            kind if type_kinds.contains(&kind) => {
                Declaration::Class(lower_type_declaration(child, source))
            }
            kind => Declaration::Other {
                kind: kind.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{
        ClassDeclaration, DeclarationFlags, MemberKind, NamespaceDeclaration, TypeReference,
    };

    fn parse(content: &str) -> SyntaxTree {
        PhpAdapter::new().unwrap().parse("test.php", content).unwrap()
    }

    fn classes(tree: &SyntaxTree) -> Vec<&ClassDeclaration> {
        tree.declarations
            .iter()
            .filter_map(|declaration| match declaration {
                Declaration::Class(class) => Some(class),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_lowers_namespace_and_class() {
        let tree = parse(
            "<?php\nnamespace App\\Models;\n\nclass User extends Model implements A, B\n{\n    private $id;\n    public function getId() { return $this->id; }\n}\n",
        );

        let namespace = tree.declarations.iter().find_map(|d| match d {
            Declaration::Namespace(ns) => Some(ns),
            _ => None,
        });
        assert_eq!(
            namespace,
            Some(&NamespaceDeclaration {
                name: Some("App\\Models".to_string()),
                body: None,
            })
        );

        let classes = classes(&tree);
        assert_eq!(classes.len(), 1);
        let user = classes[0];
        assert_eq!(user.name.as_deref(), Some("User"));
        assert_eq!(user.extends, Some(TypeReference::Named("Model".to_string())));
        assert_eq!(
            user.implements,
            vec![
                TypeReference::Named("A".to_string()),
                TypeReference::Named("B".to_string())
            ]
        );
        assert_eq!(user.members, vec![MemberKind::Property, MemberKind::Method]);
        assert_eq!(user.span.start_line, 4);
        assert_eq!(user.span.end_line, 8);
    }

    #[test]
    fn test_attribute_lines_are_not_part_of_the_span() {
        let tree = parse("<?php\n#[Attr]\nclass A\n{\n}\n");
        let a = classes(&tree)[0];
        assert_eq!(a.span.start_line, 3);
        assert_eq!(a.span.end_line, 5);
        assert_eq!(a.span.line_count(), 2);

        let tree = parse(
            "<?php\n#[ORM\\Entity]\n#[ORM\\Table('users')]\nfinal class User\n{\n    public $id;\n}\n",
        );
        let user = classes(&tree)[0];
        assert_eq!(user.span.start_line, 4);
        assert_eq!(user.span.end_line, 7);
        assert!(user.flags.contains(DeclarationFlags::FINAL));
    }

    #[test]
    fn test_lowers_modifiers_and_kinds() {
        let tree = parse(
            "<?php\nabstract class A {}\nfinal class B {}\ninterface C {}\ntrait D {}\n",
        );
        let classes = classes(&tree);
        assert_eq!(classes.len(), 4);
        assert!(classes[0].flags.contains(DeclarationFlags::ABSTRACT));
        assert!(classes[1].flags.contains(DeclarationFlags::FINAL));
        assert!(classes[2].flags.contains(DeclarationFlags::INTERFACE));
        assert!(classes[3].flags.contains(DeclarationFlags::TRAIT));
        assert!(!classes[3].flags.contains(DeclarationFlags::INTERFACE));
    }

    #[test]
    fn test_interface_parents_become_implements() {
        let tree = parse("<?php\ninterface Repo extends Countable, Traversable {}\n");
        let repo = classes(&tree)[0];
        assert_eq!(repo.extends, None);
        assert_eq!(
            repo.implements,
            vec![
                TypeReference::Named("Countable".to_string()),
                TypeReference::Named("Traversable".to_string())
            ]
        );
    }

    #[test]
    fn test_qualified_parent_names_are_normalized() {
        let tree = parse("<?php\nclass Foo extends \\Vendor\\Base {}\n");
        assert_eq!(
            classes(&tree)[0].extends,
            Some(TypeReference::Named("Vendor\\Base".to_string()))
        );
    }

    #[test]
    fn test_braced_namespace_body_is_lowered() {
        let tree = parse("<?php\nnamespace Shop {\n    class Cart {}\n}\n");
        match &tree.declarations[..] {
            [.., Declaration::Namespace(ns)] => {
                assert_eq!(ns.name.as_deref(), Some("Shop"));
                let body = ns.body.as_ref().expect("braced namespace has a body");
                assert!(matches!(
                    &body[..],
                    [Declaration::Class(c)] if c.name.as_deref() == Some("Cart")
                ));
            }
            other => panic!("unexpected declarations: {:?}", other),
        }
    }

    #[test]
    fn test_trait_uses_and_constants_are_not_properties() {
        let tree = parse(
            "<?php\nclass Svc {\n    use Logs;\n    const LIMIT = 3;\n    public $a, $b;\n    // note\n    protected function run() {}\n}\n",
        );
        let svc = classes(&tree)[0];
        assert_eq!(
            svc.members,
            vec![
                MemberKind::TraitUse,
                MemberKind::Constant,
                MemberKind::Property,
                MemberKind::Method
            ]
        );
    }

    #[test]
    fn test_syntax_error_is_a_parse_failure() {
        let err = PhpAdapter::new()
            .unwrap()
            .parse("broken.php", "<?php\nclass {{{\n")
            .unwrap_err();
        match err {
            CityError::ParseFailure { file, line, .. } => {
                assert_eq!(file, "broken.php");
                assert!(line >= 1);
            }
            other => panic!("expected ParseFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_script_has_no_types() {
        let tree = parse("<?php\n$x = 1;\nfunction helper() { return 2; }\necho helper();\n");
        assert!(classes(&tree).is_empty());
        assert!(!tree.declarations.is_empty());
    }
}
