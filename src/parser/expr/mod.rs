//! 式の解析モジュール
//!
//! 優先順位の段ごとにサブモジュールへ分割している。
//! いずれも `Parser` への `impl` ブロックとして実装される。

mod binary_expr;
mod complex_expr;
mod literal_expr;
mod postfix_expr;
mod unary_expr;
