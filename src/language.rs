//! Language Support - Shared tree-sitter language configuration
//!
//! PHPCity analyses PHP only, but all grammar lookup still goes through here so
//! the scanner, the adapter and the CLI agree on what a source file is.

use crate::error::{CityError, Result};

/// Languages with a registered grammar
pub fn supported_languages() -> Vec<&'static str> {
    vec!["php"]
}

/// Get tree-sitter language parser for a given language name
///
/// Uses the `LANGUAGE_PHP` grammar (PHP with `<?php` tags and inline HTML),
/// which is what project files on disk contain.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "php" => Ok(tree_sitter_php::LANGUAGE_PHP.into()),
        _ => Err(CityError::UnsupportedLanguage(language.to_string())),
    }
}

/// Detect language from file extension
///
/// Matching is case-insensitive (`Foo.PHP` is a PHP file).
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "php" => Some("php"),
        _ => None,
    }
}

/// Node kinds that declare a class-like type for a given language
pub fn get_type_declaration_kinds(language: &str) -> Vec<&'static str> {
    match language {
        "php" => vec![
            "class_declaration",
            "interface_declaration",
            "trait_declaration",
            "enum_declaration",
        ],
        _ => Vec::new(),
    }
}
