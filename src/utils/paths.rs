// PHPCity Path Conversion Utilities
//
// Records store the file path relative to the project root with `/` separators
// so the JSON output is identical on every platform.

use crate::error::{CityError, Result};
use std::path::{Component, Path};

/// Convert a path under `project_root` to a relative Unix-style path
///
/// Both paths are compared as given (the scanner yields entries prefixed by
/// the root it was started with). Falls back to canonical paths so a symlinked
/// root (`/var` vs `/private/var` on macOS) still matches.
///
/// # Examples
/// ```text
/// to_relative_unix_style("/srv/app/src/Models/User.php", "/srv/app")
/// // => "src/Models/User.php"
/// ```
pub fn to_relative_unix_style(path: &Path, project_root: &Path) -> Result<String> {
    let relative = match path.strip_prefix(project_root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => {
            let canonical_path = path
                .canonicalize()
                .map_err(|e| CityError::io(path, e))?;
            let canonical_root = project_root
                .canonicalize()
                .map_err(|e| CityError::invalid_input(project_root, Some(e)))?;
            canonical_path
                .strip_prefix(&canonical_root)
                .map(|relative| relative.to_path_buf())
                .map_err(|_| {
                    CityError::invalid_input(
                        path,
                        Some(std::io::Error::new(
                            std::io::ErrorKind::InvalidInput,
                            format!("not within project root '{}'", project_root.display()),
                        )),
                    )
                })?
        }
    };

    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    Ok(segments.join("/"))
}
