// PHPCity Core - tree-sitter structural extraction and code-city layout for PHP
//
// Pipeline: project files -> `ProjectScanner` (PhpAdapter + StructuralExtractor
// per file) -> `TypeMetrics` records -> `HierarchyBuilder` -> `LayoutEngine`.

pub mod error;
pub mod extractors;
pub mod hierarchy;
pub mod language;
pub mod layout;
pub mod output;
pub mod scanner;

// PHPCity-specific utilities
pub mod utils;

pub use error::{CityError, Result};
pub use extractors::{
    ExtractorManager, PhpAdapter, RecordMode, StructuralExtractor, SyntaxTreeAdapter,
    TypeCategory, TypeMetrics,
};
pub use hierarchy::{build_hierarchy, HierarchyBuilder, NamespaceNode};
pub use layout::{layout_records, LayoutConfig, LayoutEngine, LayoutResult};
pub use output::{output_file_name, write_project_json, ProjectSummary};
pub use scanner::{ProjectScanner, ScanConfig, ScanReport};
