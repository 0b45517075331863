//! Lexical analysis module for Solidity source code.
//!
//! Comments and whitespace are "extras": they are skipped between any two
//! tokens and never reach the parser. Contextual keywords (`memory`,
//! `payable`, `override`, ...) are lexed as plain identifiers.

mod lexer;
mod literal_parser;
mod token;

pub use lexer::{format_tokens, tokenize, Lexer, TokenWithPosition, Tokenized};
pub use literal_parser::{scan_block_comment, scan_hex_string, scan_string};
pub use token::{LexErrorKind, Token};
