// Language-neutral syntax model consumed by the structural extractor
//
// A SyntaxTreeAdapter lowers a concrete parse tree into these types. Only the
// shape the extractor needs is kept: declaration kind, children, flags and line span.

use crate::error::Result;
use std::ops::{BitOr, BitOrAssign};

/// Modifier flags of a type declaration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DeclarationFlags(u16);

impl DeclarationFlags {
    pub const NONE: Self = Self(0);
    pub const ABSTRACT: Self = Self(1 << 0);
    pub const FINAL: Self = Self(1 << 1);
    pub const TRAIT: Self = Self(1 << 2);
    pub const INTERFACE: Self = Self(1 << 3);
    pub const ANONYMOUS: Self = Self(1 << 4);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl BitOr for DeclarationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DeclarationFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// 1-based inclusive line range of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineSpan {
    pub start_line: u32,
    pub end_line: u32,
}

impl LineSpan {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// `end_line - start_line`, never negative
    pub fn line_count(&self) -> u32 {
        self.end_line.saturating_sub(self.start_line)
    }
}

/// A reference slot such as `extends X` or one entry of `implements X, Y`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReference {
    /// A plain or qualified type name
    Named(String),
    /// Anything else the grammar allowed in that slot (node kind kept for logging)
    Other(String),
}

impl TypeReference {
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeReference::Named(name) => Some(name),
            TypeReference::Other(_) => None,
        }
    }
}

/// Direct member of a type body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
    Constant,
    TraitUse,
    EnumCase,
    Other(String),
}

/// Class-like declaration (class, interface, trait, enum)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub name: Option<String>,
    pub extends: Option<TypeReference>,
    pub implements: Vec<TypeReference>,
    pub flags: DeclarationFlags,
    pub span: LineSpan,
    pub members: Vec<MemberKind>,
}

impl ClassDeclaration {
    /// Shallow count of members of one kind
    pub fn count_members(&self, kind: &MemberKind) -> u32 {
        self.members.iter().filter(|member| *member == kind).count() as u32
    }
}

/// `namespace A\B;` or `namespace A\B { ... }`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceDeclaration {
    pub name: Option<String>,
    /// Statements of a braced namespace body
    pub body: Option<Vec<Declaration>>,
}

/// Closed set of top-level statement variants the extractor dispatches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Namespace(NamespaceDeclaration),
    Class(ClassDeclaration),
    Other { kind: String },
}

/// Top-level statement list of one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    pub declarations: Vec<Declaration>,
}

/// Produces a [`SyntaxTree`] for one source file
///
/// Implementations report a syntax error as a single `CityError::ParseFailure`
/// for the file and never panic on malformed input.
pub trait SyntaxTreeAdapter {
    fn parse(&mut self, file_path: &str, content: &str) -> Result<SyntaxTree>;
}
