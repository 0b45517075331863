//! Abstract Syntax Tree (AST) definitions for Solidity source files.
//!
//! Every node carries a [`Span`] with byte offsets and 1-based line/column
//! positions. The tree is produced in a single parse pass and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

mod declarations;
mod directives;
mod expressions;
mod statements;
mod types;

pub use declarations::*;
pub use directives::*;
pub use expressions::*;
pub use statements::*;
pub use types::*;

/// Line/column location of a byte offset (both 1-based, column counted in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Advance past one character
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Advance past a whole slice of text
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance(ch);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_position: Position,
    pub end_position: Position,
}

impl Span {
    /// Byte-only span; positions default to the start of the file
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            start_position: Position::default(),
            end_position: Position::default(),
        }
    }

    pub fn with_positions(
        start: usize,
        end: usize,
        start_position: Position,
        end_position: Position,
    ) -> Self {
        Self {
            start,
            end,
            start_position,
            end_position,
        }
    }

    pub fn dummy() -> Self {
        Self::new(0, 0)
    }

    /// Span from the start of `self` to the end of `other`
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
            start_position: self.start_position,
            end_position: other.end_position,
        }
    }

    /// Zero-width span sitting right after `self`
    pub fn after(&self) -> Span {
        Span {
            start: self.end,
            end: self.end,
            start_position: self.end_position,
            end_position: self.end_position,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice the covered text out of `source`
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Root node of the AST representing one Solidity source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub items: Vec<SourceUnit>,
    pub span: Span,
}

impl SourceFile {
    pub fn contracts(&self) -> impl Iterator<Item = &ContractDeclaration> {
        self.items.iter().filter_map(|item| match item {
            SourceUnit::Contract(contract) => Some(contract),
            _ => None,
        })
    }

    pub fn pragmas(&self) -> impl Iterator<Item = &PragmaDirective> {
        self.items.iter().filter_map(|item| match item {
            SourceUnit::Pragma(pragma) => Some(pragma),
            _ => None,
        })
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportDirective> {
        self.items.iter().filter_map(|item| match item {
            SourceUnit::Import(import) => Some(import),
            _ => None,
        })
    }

    /// Error markers at source-unit level and below
    pub fn error_nodes(&self) -> Vec<&ErrorNode> {
        let mut errors = Vec::new();
        for item in &self.items {
            item.collect_errors(&mut errors);
        }
        errors
    }
}

/// Top-level items in a source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SourceUnit {
    Pragma(PragmaDirective),
    Import(ImportDirective),
    Contract(ContractDeclaration),
    Struct(StructDeclaration),
    Enum(EnumDeclaration),
    Function(FunctionDefinition),
    Constant(ConstantVariableDeclaration),
    Error(ErrorNode),
}

impl SourceUnit {
    pub fn span(&self) -> Span {
        match self {
            SourceUnit::Pragma(node) => node.span,
            SourceUnit::Import(node) => node.span,
            SourceUnit::Contract(node) => node.span,
            SourceUnit::Struct(node) => node.span,
            SourceUnit::Enum(node) => node.span,
            SourceUnit::Function(node) => node.span,
            SourceUnit::Constant(node) => node.span,
            SourceUnit::Error(node) => node.span,
        }
    }

    fn collect_errors<'a>(&'a self, errors: &mut Vec<&'a ErrorNode>) {
        match self {
            SourceUnit::Error(node) => errors.push(node),
            SourceUnit::Contract(contract) => {
                for member in &contract.members {
                    member.collect_errors(errors);
                }
            }
            SourceUnit::Function(function) => {
                if let Some(body) = &function.body {
                    body.collect_errors(errors);
                }
            }
            _ => {}
        }
    }
}

/// Identifier with its location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Dotted identifier sequence such as `Lib.Struct`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierPath {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl IdentifierPath {
    pub fn last(&self) -> Option<&Identifier> {
        self.segments.last()
    }
}

impl fmt::Display for IdentifierPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.name)?;
        }
        Ok(())
    }
}

/// Placeholder for a syntactically invalid region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNode {
    pub message: String,
    pub span: Span,
}
