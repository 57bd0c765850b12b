// PHPCity Utilities Module
//
// Common helpers shared by the scanner and the output writer.

/// File utilities
pub mod file_utils {
    use crate::error::{CityError, Result};
    use crate::language::detect_language_from_extension;
    use std::fs;
    use std::path::Path;

    /// Check if a file has a supported source extension (case-insensitive)
    pub fn is_supported_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(detect_language_from_extension)
            .is_some()
    }

    /// Read file content, replacing invalid UTF-8 sequences
    ///
    /// PHP sources in the wild are not always UTF-8; a Latin-1 comment must
    /// not make the whole file unreadable.
    pub fn read_file_content(path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| CityError::io(path, e))?;
        Ok(match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

}

/// Path conversion utilities (absolute ↔ relative Unix-style)
pub mod paths;

/// File ignore pattern utilities (.phpcityignore support)
pub mod ignore;
