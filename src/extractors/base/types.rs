// Base Extractor Types for PHPCity
//
// The per-type metric record and its JSON shape. The JSON field names are the
// contract between extraction and the renderer, so they must not change.

use serde::{Deserialize, Serialize};

/// Name reported for a type declaration without an identifier
pub const UNKNOWN_NAME: &str = "Unknown";

/// Category of a declared type
///
/// Traits and enums are reported as `Class`; see [`TypeMetrics::is_trait`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    Class,
    Interface,
}

/// Structural metrics for one declared type (class, interface, trait)
///
/// Serialized field order and names follow the project JSON format:
/// `file, namespace, name, extends, implements, no_lines, no_attrs, no_methods,
/// abstract, final, trait, type, anonymous`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeMetrics {
    /// Path relative to the project root (Unix-style separators)
    pub file: String,
    /// Namespace path (`App\Models`), `None` for the global namespace
    #[serde(default)]
    pub namespace: Option<String>,
    /// Declared identifier, `Unknown` if absent
    pub name: String,
    /// Parent type name
    #[serde(default)]
    pub extends: Option<String>,
    /// First implemented interface only
    #[serde(default)]
    pub implements: Option<String>,
    /// `endLine - startLine` of the declaration
    #[serde(rename = "no_lines")]
    pub line_span: u32,
    /// Direct property declarations
    #[serde(rename = "no_attrs")]
    pub attribute_count: u32,
    /// Direct method declarations
    #[serde(rename = "no_methods")]
    pub method_count: u32,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "trait")]
    pub is_trait: bool,
    #[serde(rename = "type")]
    pub category: TypeCategory,
    #[serde(rename = "anonymous")]
    pub is_anonymous: bool,
}

impl TypeMetrics {
    /// Minimal class record, mostly useful for building trees by hand
    pub fn new(file: impl Into<String>, namespace: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            namespace: namespace.map(|ns| ns.to_string()),
            name: name.into(),
            extends: None,
            implements: None,
            line_span: 0,
            attribute_count: 0,
            method_count: 0,
            is_abstract: false,
            is_final: false,
            is_trait: false,
            category: TypeCategory::Class,
            is_anonymous: false,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.category == TypeCategory::Interface
    }
}
