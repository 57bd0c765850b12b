//! Project scanner - walks a PHP project and extracts records from every file
//!
//! Files are discovered sequentially (sorted, so output is stable), then
//! extracted in parallel with one `ExtractorManager` per rayon worker.
//! A file that cannot be read or parsed is logged and skipped.

use crate::error::{CityError, Result};
use crate::extractors::{ExtractorManager, RecordMode, TypeMetrics};
use crate::utils::file_utils::{is_supported_file, read_file_content};
use crate::utils::ignore::{is_ignored_by_pattern, load_ignore_patterns, IGNORE_FILE_NAME};
use crate::utils::paths::to_relative_unix_style;
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Scanner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extract files on the rayon pool (false = one file after another)
    pub parallel: bool,
    pub record_mode: RecordMode,
    /// Ignore file looked up in the project root
    pub ignore_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            record_mode: RecordMode::default(),
            ignore_file: IGNORE_FILE_NAME.to_string(),
        }
    }
}

/// A file that was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// Result of scanning one project
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Records in walk order
    pub records: Vec<TypeMetrics>,
    /// Number of source files handed to the extractor
    pub files_scanned: usize,
    pub failures: Vec<FileFailure>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A source file found by the walk
struct SourceFile {
    path: PathBuf,
    relative: String,
}

pub struct ProjectScanner {
    config: ScanConfig,
}

impl ProjectScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every PHP file under `root`
    ///
    /// Fails only when `root` is not a readable directory or the extractor
    /// cannot be set up. Per-file failures end up in `ScanReport::failures`.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        let metadata = fs::metadata(root).map_err(|e| CityError::invalid_input(root, Some(e)))?;
        if !metadata.is_dir() {
            return Err(CityError::invalid_input(root, None));
        }
        fs::read_dir(root).map_err(|e| CityError::invalid_input(root, Some(e)))?;

        let patterns = load_ignore_patterns(root, &self.config.ignore_file)?;
        let files = collect_source_files(root, &patterns);
        debug!("Found {} PHP files under {}", files.len(), root.display());

        let mode = self.config.record_mode;
        let outcomes: Vec<Result<Vec<TypeMetrics>>> = if self.config.parallel {
            // surface grammar setup errors once, before fanning out
            ExtractorManager::new(mode)?;
            files
                .par_iter()
                .map_init(
                    || ExtractorManager::new(mode),
                    |manager, file| match manager {
                        Ok(manager) => extract_source_file(manager, file),
                        Err(e) => Err(CityError::UnsupportedLanguage(e.to_string())),
                    },
                )
                .collect()
        } else {
            let mut manager = ExtractorManager::new(mode)?;
            files
                .iter()
                .map(|file| extract_source_file(&mut manager, file))
                .collect()
        };

        let mut report = ScanReport {
            files_scanned: files.len(),
            ..ScanReport::default()
        };

        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(records) => report.records.extend(records),
                Err(e) if e.is_per_file() => {
                    warn!("Skipping {}: {}", file.relative, e);
                    report.failures.push(FileFailure {
                        file: file.relative.clone(),
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Scanned {} files: {} records, {} skipped",
            report.files_scanned,
            report.records.len(),
            report.failures.len()
        );

        Ok(report)
    }
}

fn extract_source_file(
    manager: &mut ExtractorManager,
    file: &SourceFile,
) -> Result<Vec<TypeMetrics>> {
    let content = read_file_content(&file.path)?;
    manager.extract_file(&file.relative, &content)
}

/// Walk `root` and return PHP files sorted by path component
///
/// Gitignore and hidden-file filtering are off: every file on disk counts
/// unless the project's own ignore file excludes it.
fn collect_source_files(root: &Path, patterns: &[String]) -> Vec<SourceFile> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Walk error under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !is_supported_file(path) {
            continue;
        }

        let relative = match to_relative_unix_style(path, root) {
            Ok(relative) => relative,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if is_ignored_by_pattern(&relative, patterns) {
            debug!("Ignored by pattern: {}", relative);
            continue;
        }

        files.push(SourceFile {
            path: path.to_path_buf(),
            relative,
        });
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn scan(root: &Path, parallel: bool) -> ScanReport {
        let scanner = ProjectScanner::new(ScanConfig {
            parallel,
            ..ScanConfig::default()
        });
        scanner.scan(root).unwrap()
    }

    #[test]
    fn test_empty_directory_yields_no_records() {
        let temp_dir = TempDir::new().unwrap();
        let report = scan(temp_dir.path(), true);
        assert!(report.is_empty());
        assert_eq!(report.files_scanned, 0);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_missing_directory_is_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let err = ProjectScanner::new(ScanConfig::default())
            .scan(&missing)
            .unwrap_err();
        assert!(matches!(err, CityError::InvalidInput { .. }));
    }

    #[test]
    fn test_file_as_root_is_invalid_input() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "single.php", "<?php\nclass Single {}\n");
        let err = ProjectScanner::new(ScanConfig::default())
            .scan(&temp_dir.path().join("single.php"))
            .unwrap_err();
        assert!(matches!(err, CityError::InvalidInput { .. }));
    }

    #[test]
    fn test_records_follow_sorted_walk_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "src/Models/User.php", "<?php\nnamespace App\\Models;\nclass User {}\n");
        write(root, "src/App.php", "<?php\nnamespace App;\nclass App {}\n");
        write(root, "index.php", "<?php\ninterface Entry {}\n");

        for parallel in [true, false] {
            let report = scan(root, parallel);
            let files: Vec<_> = report.records.iter().map(|r| r.file.as_str()).collect();
            assert_eq!(
                files,
                vec!["index.php", "src/App.php", "src/Models/User.php"],
                "parallel = {}",
                parallel
            );
            assert_eq!(report.records[2].namespace.as_deref(), Some("App\\Models"));
        }
    }

    #[test]
    fn test_bad_file_is_skipped_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "Bad.php", "<?php\nclass Broken {\n  public function (\n");
        write(root, "Good.php", "<?php\nclass Good {}\n");

        let report = scan(root, true);
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "Good");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "Bad.php");
    }

    #[test]
    fn test_only_php_extension_is_scanned() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "notes.txt", "class NotPhp {}");
        write(root, "view.phtml", "<?php class Template {}");
        write(root, "Legacy.PHP", "<?php\nclass Legacy {}\n");
        write(root, ".hidden/Secret.php", "<?php\nclass Secret {}\n");

        let report = scan(root, false);
        let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Secret", "Legacy"]);
    }

    #[test]
    fn test_ignore_file_excludes_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, IGNORE_FILE_NAME, "vendor/\n*.blade.php\n");
        write(root, "vendor/pkg/Lib.php", "<?php\nclass Lib {}\n");
        write(root, "resources/home.blade.php", "<?php\nclass View {}\n");
        write(root, "my-vendor/Kept.php", "<?php\nclass Kept {}\n");

        let report = scan(root, true);
        let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Kept"]);
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn test_files_without_types_produce_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "bootstrap.php", "<?php\nrequire 'vendor/autoload.php';\n");

        let report = scan(root, true);
        assert_eq!(report.files_scanned, 1);
        assert!(report.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_per_declaration_mode() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "Many.php", "<?php\nclass A {}\nclass B {}\n");

        let scanner = ProjectScanner::new(ScanConfig {
            record_mode: RecordMode::PerDeclaration,
            ..ScanConfig::default()
        });
        let report = scanner.scan(root).unwrap();
        assert_eq!(report.records.len(), 2);
    }
}
