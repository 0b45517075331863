//! パーサーモジュール
//!
//! トークン列をSolidityの抽象構文木（AST）に解析します。
//! 再帰下降構文解析と優先順位上昇法を組み合わせ、以下の曖昧さは
//! 特定の位置に限定した「解釈Aを試し、失敗したら巻き戻してBを試す」プローブで解決します。
//!
//! - 文頭: 変数宣言（`T x = ...;` / `(T a, T b) = ...;`）か式文か
//! - コントラクト本体の `function (`: 関数型の状態変数か0.4系の無名fallbackか
//! - 式中の `{`: 構造体リテラル（呼び出しオプション）かブロックか
//!
//! 構文エラーは文・メンバー・トップレベル項目の単位で回復し、
//! スキップした範囲をエラーノードとして木に埋め込みます。

mod decl_parser;
mod directive_parser;
mod expr;
mod expr_parser;
mod parser_impl;
mod stmt_parser;
mod type_parser;
mod version;

// 公開API
pub use parser_impl::{Parser, RECURSION_LIMIT};
pub use version::{parse_version_requirement, RawConstraint};

use crate::error::ParserError;
pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;
