//! リテラル本体の走査
//!
//! 開き引用符の直後からの残り入力を受け取り、消費したバイト数と結果を返す。
//! エラー時も閉じ引用符（または行末）まで消費して、後続の字句解析を続行できるようにする。

use super::token::LexErrorKind;

/// 文字列リテラルの本体を走査し、エスケープを解除したバイト列を返す
///
/// `\xNN` と8進エスケープはそのまま1バイトになる（UTF-8とは限らない）。
pub fn scan_string(rest: &str, quote: char) -> (usize, Result<Vec<u8>, LexErrorKind>) {
    let mut value = Vec::new();
    let mut invalid: Option<String> = None;
    let mut pos = 0;

    while let Some(ch) = rest[pos..].chars().next() {
        if ch == quote {
            let consumed = pos + ch.len_utf8();
            return match invalid {
                Some(sequence) => (consumed, Err(LexErrorKind::InvalidEscape(sequence))),
                None => (consumed, Ok(value)),
            };
        }

        match ch {
            // 文字列は行をまたげない
            '\n' | '\r' => return (pos, Err(LexErrorKind::UnterminatedString)),
            '\\' => {
                let after = &rest[pos + 1..];
                match read_escape(after) {
                    Escape::Char(consumed, c) => {
                        push_char(&mut value, c);
                        pos += 1 + consumed;
                    }
                    Escape::Byte(consumed, byte) => {
                        value.push(byte);
                        pos += 1 + consumed;
                    }
                    Escape::LineContinuation(consumed) => pos += 1 + consumed,
                    Escape::Invalid(consumed) => {
                        if invalid.is_none() {
                            invalid = Some(format!("\\{}", &after[..consumed]));
                        }
                        pos += 1 + consumed;
                    }
                    Escape::Eof => return (rest.len(), Err(LexErrorKind::UnterminatedString)),
                }
            }
            c => {
                push_char(&mut value, c);
                pos += c.len_utf8();
            }
        }
    }

    (rest.len(), Err(LexErrorKind::UnterminatedString))
}

/// hex文字列の本体を走査し、`_` を除いた16進数字列を返す
pub fn scan_hex_string(rest: &str, quote: char) -> (usize, Result<String, LexErrorKind>) {
    let mut digits = String::new();
    let mut invalid: Option<char> = None;

    for (i, ch) in rest.char_indices() {
        if ch == quote {
            let consumed = i + ch.len_utf8();
            if let Some(c) = invalid {
                let message = format!("unexpected character '{}'", c);
                return (consumed, Err(LexErrorKind::InvalidHexString(message)));
            }
            if digits.len() % 2 != 0 {
                let message = "odd number of hex digits".to_string();
                return (consumed, Err(LexErrorKind::InvalidHexString(message)));
            }
            return (consumed, Ok(digits));
        }
        match ch {
            '\n' | '\r' => return (i, Err(LexErrorKind::UnterminatedString)),
            '_' => {}
            c if c.is_ascii_hexdigit() => digits.push(c),
            c => {
                invalid.get_or_insert(c);
            }
        }
    }

    (rest.len(), Err(LexErrorKind::UnterminatedString))
}

/// `/*` の後ろから `*/` までの長さ（閉じていなければ `None`）
pub fn scan_block_comment(rest: &str) -> Option<usize> {
    rest.find("*/").map(|end| end + 2)
}

enum Escape {
    /// (バックスラッシュ後に消費したバイト数, 文字)
    Char(usize, char),
    /// (バックスラッシュ後に消費したバイト数, 生のバイト)
    Byte(usize, u8),
    LineContinuation(usize),
    Invalid(usize),
    Eof,
}

fn read_escape(after: &str) -> Escape {
    let mut chars = after.chars();
    let Some(first) = chars.next() else {
        return Escape::Eof;
    };

    match first {
        'n' => Escape::Char(1, '\n'),
        't' => Escape::Char(1, '\t'),
        'r' => Escape::Char(1, '\r'),
        'b' => Escape::Char(1, '\u{8}'),
        'f' => Escape::Char(1, '\u{c}'),
        'v' => Escape::Char(1, '\u{b}'),
        '\n' => Escape::LineContinuation(1),
        '\r' => {
            if after[1..].starts_with('\n') {
                Escape::LineContinuation(2)
            } else {
                Escape::LineContinuation(1)
            }
        }
        'x' => {
            let hex = take_while_max(&after[1..], 2, |c| c.is_ascii_hexdigit());
            if hex.len() == 2 {
                match u8::from_str_radix(hex, 16) {
                    Ok(byte) => Escape::Byte(3, byte),
                    Err(_) => Escape::Invalid(1 + hex.len()),
                }
            } else {
                Escape::Invalid(1 + hex.len())
            }
        }
        'u' => read_unicode_escape(&after[1..]),
        '0'..='7' => {
            let octal = take_while_max(after, 3, |c| ('0'..='7').contains(&c));
            match u8::from_str_radix(octal, 8) {
                Ok(byte) => Escape::Byte(octal.len(), byte),
                Err(_) => Escape::Invalid(octal.len()),
            }
        }
        // その他の1文字はその文字自身（\\ \' \" を含む）
        c => Escape::Char(c.len_utf8(), c),
    }
}

fn push_char(value: &mut Vec<u8>, c: char) {
    let mut buffer = [0u8; 4];
    value.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
}

/// `u` の後ろ: `{N+}` または4桁の16進数
fn read_unicode_escape(rest: &str) -> Escape {
    if let Some(inner) = rest.strip_prefix('{') {
        let hex = take_while_max(inner, 6, |c| c.is_ascii_hexdigit());
        let closed = inner[hex.len()..].starts_with('}');
        if hex.is_empty() || !closed {
            return Escape::Invalid(2 + hex.len());
        }
        let consumed = 1 + 1 + hex.len() + 1;
        return match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
            Some(c) => Escape::Char(consumed, c),
            None => Escape::Invalid(consumed),
        };
    }

    let hex = take_while_max(rest, 4, |c| c.is_ascii_hexdigit());
    if hex.len() != 4 {
        return Escape::Invalid(1 + hex.len());
    }
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => Escape::Char(5, c),
        None => Escape::Invalid(5),
    }
}

/// 先頭から条件を満たすASCII文字を最大 `max` 個切り出す
fn take_while_max(text: &str, max: usize, pred: impl Fn(char) -> bool) -> &str {
    let len = text
        .chars()
        .take(max)
        .take_while(|c| c.is_ascii() && pred(*c))
        .count();
    &text[..len]
}
