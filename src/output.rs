//! Project JSON writer and run summary
//!
//! The JSON array written here is what the renderer loads, so its shape is
//! fixed by [`TypeMetrics`]' serde attributes.

use crate::error::{CityError, Result};
use crate::extractors::{TypeCategory, TypeMetrics};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Anything that is not a word character or one of `-~,;[]().`
static UNSAFE_FILE_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\-~,;\[\]().]").unwrap());

/// File name (without extension) for a project's JSON output
pub fn output_file_name(project_name: &str) -> String {
    UNSAFE_FILE_NAME_CHARS
        .replace_all(project_name, "-")
        .into_owned()
}

/// Write `records` as pretty-printed JSON to `<output_dir>/<name>.json`
///
/// Creates `output_dir` (and parents) when missing. Returns the written path.
pub fn write_project_json(
    records: &[TypeMetrics],
    project_name: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| CityError::io(output_dir, e))?;

    let path = output_dir.join(format!("{}.json", output_file_name(project_name)));
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&path, json).map_err(|e| CityError::io(&path, e))?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(path)
}

/// Read a project JSON file back into records
pub fn read_project_json(path: &Path) -> Result<Vec<TypeMetrics>> {
    let content = fs::read_to_string(path).map_err(|e| CityError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Counts printed after a successful run
///
/// The buckets overlap: an abstract class is also counted as a class, and a
/// trait is counted as a class and as a trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub classes: usize,
    pub interfaces: usize,
    pub abstract_classes: usize,
    pub traits: usize,
}

impl ProjectSummary {
    pub fn from_records(records: &[TypeMetrics]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            match record.category {
                TypeCategory::Class => summary.classes += 1,
                TypeCategory::Interface => summary.interfaces += 1,
            }
            if record.is_abstract {
                summary.abstract_classes += 1;
            }
            if record.is_trait {
                summary.traits += 1;
            }
            summary
        })
    }
}

impl std::fmt::Display for ProjectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Classes: {}", self.classes)?;
        writeln!(f, "  Interfaces: {}", self.interfaces)?;
        writeln!(f, "  Abstract classes: {}", self.abstract_classes)?;
        write!(f, "  Traits: {}", self.traits)
    }
}
