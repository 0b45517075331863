//! Solidity (0.4 - 0.7) Syntax Parser Library
//!
//! Converts Solidity source text into a typed syntax tree. Parsing never
//! aborts on malformed input: syntax errors become error nodes embedded in
//! the tree and are also returned alongside it.
//!
//! ```
//! let output = solparse::parse("contract C { uint x; }");
//! assert!(!output.has_errors());
//! assert_eq!(output.source_file.contracts().count(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;

// Re-export commonly used types
pub use ast::{Expression, SourceFile, SourceUnit, Span, Statement, TypeName};
pub use error::{DiagnosticError, LexerError, ParserError, SolidityError, SolidityResult};
pub use lexer::{tokenize, Lexer, Token, TokenWithPosition};
pub use parser::{ParseError, ParseResult, Parser};
pub use tree::{SyntaxNode, ToSyntaxNode};

/// Result of parsing one source file
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub source_file: SourceFile,
    /// Lexer and parser errors ordered by position
    pub errors: Vec<SolidityError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Generic syntax tree view of the parsed file
    pub fn syntax_tree(&self) -> SyntaxNode {
        self.source_file.to_syntax_node()
    }
}

/// Parse a whole source file. Never fails.
pub fn parse(source: &str) -> ParseOutput {
    let mut parser = Parser::new(source);
    let source_file = parser.parse();
    let errors = parser.errors();
    if !errors.is_empty() {
        log::debug!("parsed with {} error(s)", errors.len());
    }
    ParseOutput {
        source_file,
        errors,
    }
}

/// Parse raw bytes; the only failure is input that is not valid UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> SolidityResult<ParseOutput> {
    let source = std::str::from_utf8(bytes).map_err(|e| SolidityError::Encoding(e.to_string()))?;
    Ok(parse(source))
}
