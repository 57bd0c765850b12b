//! ExtractorManager - Public API for per-file extraction
//!
//! Couples a syntax tree adapter with the structural extractor so callers hand
//! in `(file_path, content)` and get records back, or a single per-file error.

use crate::error::Result;
use crate::extractors::base::{SyntaxTreeAdapter, TypeMetrics};
use crate::extractors::php::PhpAdapter;
use crate::extractors::structural::StructuralExtractor;
use serde::{Deserialize, Serialize};

/// How many records a file may contribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    /// At most one record per file (the last declared type)
    #[default]
    PerFile,
    /// One record per top-level type declaration
    PerDeclaration,
}

/// Parses and measures files one at a time
///
/// Not shared between threads: the adapter owns a parser. Build one manager
/// per worker.
pub struct ExtractorManager<A: SyntaxTreeAdapter = PhpAdapter> {
    adapter: A,
    extractor: StructuralExtractor,
    mode: RecordMode,
}

impl ExtractorManager<PhpAdapter> {
    pub fn new(mode: RecordMode) -> Result<Self> {
        Ok(Self::with_adapter(PhpAdapter::new()?, mode))
    }
}

impl<A: SyntaxTreeAdapter> ExtractorManager<A> {
    pub fn with_adapter(adapter: A, mode: RecordMode) -> Self {
        Self {
            adapter,
            extractor: StructuralExtractor::new(),
            mode,
        }
    }

    /// Extract the records of one file
    ///
    /// An empty vector means the file declares no type. A syntax error is
    /// returned as `CityError::ParseFailure` for this file only.
    pub fn extract_file(&mut self, file_path: &str, content: &str) -> Result<Vec<TypeMetrics>> {
        let tree = self.adapter.parse(file_path, content)?;

        let records = match self.mode {
            RecordMode::PerFile => self.extractor.extract(&tree, file_path).into_iter().collect(),
            RecordMode::PerDeclaration => self.extractor.extract_all(&tree, file_path),
        };

        tracing::debug!("Extracted {} records from {}", records.len(), file_path);
        Ok(records)
    }
}
