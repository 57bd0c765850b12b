//! Utilities for handling .phpcityignore file patterns
//!
//! Lets a project keep generated code, fixtures or vendored libraries out of
//! the city without touching its `.gitignore`.

use crate::error::{CityError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default ignore file name looked up in the project root
pub const IGNORE_FILE_NAME: &str = ".phpcityignore";

/// Load custom ignore patterns from an ignore file in the project root
///
/// Returns an empty vector when the file does not exist. Empty lines and
/// comments (lines starting with #) are skipped.
///
/// # Examples
///
/// ```text
/// # .phpcityignore file content
/// vendor/
/// *.blade.php
/// Fixture
/// ```
pub fn load_ignore_patterns(project_root: &Path, file_name: &str) -> Result<Vec<String>> {
    let ignore_file = project_root.join(file_name);

    if !ignore_file.is_file() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&ignore_file).map_err(|e| CityError::io(&ignore_file, e))?;

    let patterns: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if !patterns.is_empty() {
        debug!(
            "Loaded {} custom ignore patterns from {}",
            patterns.len(),
            ignore_file.display()
        );
    }

    Ok(patterns)
}

/// Check if a relative Unix-style path matches any of the ignore patterns
///
/// - `dir/` matches when a whole path component equals `dir`
///   (`vendor/` matches `vendor/a.php` and `lib/vendor/b.php`, not `my-vendor/c.php`)
/// - `*.ext` matches paths ending in `.ext`
/// - anything else matches as a substring
pub fn is_ignored_by_pattern(relative_path: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path = relative_path.replace('\\', "/");

    patterns.iter().any(|pattern| {
        if let Some(dir_name) = pattern.strip_suffix('/') {
            path.split('/').any(|component| component == dir_name)
        } else if pattern.starts_with("*.") {
            // keep the dot: `*.php` must not match `legacyphp`
            path.ends_with(&pattern[1..])
        } else {
            path.contains(pattern.as_str())
        }
    })
}
