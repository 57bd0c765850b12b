//! PHPCity Extractors Module
//!
//! Turns source files into `TypeMetrics` records.
//!
//! # Architecture
//!
//! - `base` - record type and the language-neutral syntax model
//! - `php` - tree-sitter adapter lowering PHP parse trees into that model
//! - `structural` - walks the model and measures each declared type
//! - `manager` - `ExtractorManager` public API (adapter + extractor per file)

pub mod base;
pub mod manager;
pub mod php;
pub mod structural;

// Re-export the public API
pub use base::{
    ClassDeclaration, Declaration, DeclarationFlags, LineSpan, MemberKind, NamespaceDeclaration,
    SyntaxTree, SyntaxTreeAdapter, TypeCategory, TypeMetrics, TypeReference, UNKNOWN_NAME,
};
pub use manager::{ExtractorManager, RecordMode};
pub use php::PhpAdapter;
pub use structural::StructuralExtractor;
