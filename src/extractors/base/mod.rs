// Base Extractor Types and Traits for PHPCity
//
// - types.rs: the TypeMetrics record and its JSON shape
// - syntax.rs: language-neutral syntax model and the SyntaxTreeAdapter trait

pub mod syntax;
pub mod types;

// Re-export key types for external use
pub use syntax::{
    ClassDeclaration, Declaration, DeclarationFlags, LineSpan, MemberKind, NamespaceDeclaration,
    SyntaxTree, SyntaxTreeAdapter, TypeReference,
};
pub use types::{TypeCategory, TypeMetrics, UNKNOWN_NAME};
