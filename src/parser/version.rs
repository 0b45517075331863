//! `pragma solidity` のバージョン要求の解析
//!
//! `^0.4.24`、`>=0.4.22 <0.6.0`、`0.4.1 - 0.5.0`、`^0.4.0 || ^0.5.0` などを
//! 選択肢ごとの制約リストに分解する。ハイフン範囲は `>=` と `<=` の組に展開する。

use std::ops::Range;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{opt, recognize, value};
use nom::multi::many_m_n;
use nom::sequence::{pair, preceded, tuple};
use nom::{IResult, Offset};

use crate::ast::VersionOperator;

/// 生テキスト中の位置を持つ制約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConstraint {
    pub operator: Option<VersionOperator>,
    pub version: String,
    /// 入力文字列内のバイト範囲
    pub range: Range<usize>,
}

/// バージョン要求を `||` 区切りの選択肢ごとに解析する
pub fn parse_version_requirement(input: &str) -> Result<Vec<Vec<RawConstraint>>, String> {
    let mut alternatives = Vec::new();
    let mut rest = input;

    loop {
        let (next, constraints) =
            alternative(input, rest).map_err(|_| describe_failure(input, rest))?;
        alternatives.push(constraints);
        rest = next;

        match preceded(multispace0::<&str, nom::error::Error<&str>>, tag("||"))(rest) {
            Ok((next, _)) => rest = next,
            Err(_) => break,
        }
    }

    let (rest, _) = multispace0::<&str, nom::error::Error<&str>>(rest)
        .map_err(|_| describe_failure(input, rest))?;
    if !rest.is_empty() {
        return Err(describe_failure(input, rest));
    }
    Ok(alternatives)
}

fn describe_failure(input: &str, rest: &str) -> String {
    let rest = rest.trim();
    if rest.is_empty() {
        format!("incomplete version requirement '{}'", input.trim())
    } else {
        format!("unexpected '{}' in version requirement", rest)
    }
}

/// 空白区切りの制約列、またはハイフン範囲
fn alternative<'a>(full: &'a str, input: &'a str) -> IResult<&'a str, Vec<RawConstraint>> {
    let (input, first) = constraint(full, input)?;

    if first.operator.is_none() {
        if let Ok((after, _)) = hyphen(input) {
            let (after, last) = constraint(full, after)?;
            if last.operator.is_none() {
                let lower = RawConstraint {
                    operator: Some(VersionOperator::Ge),
                    ..first
                };
                let upper = RawConstraint {
                    operator: Some(VersionOperator::Le),
                    ..last
                };
                return Ok((after, vec![lower, upper]));
            }
        }
    }

    let mut constraints = vec![first];
    let mut input = input;
    while let Ok((next, following)) = constraint(full, input) {
        constraints.push(following);
        input = next;
    }
    Ok((input, constraints))
}

fn hyphen(input: &str) -> IResult<&str, char> {
    preceded(multispace0, char('-'))(input)
}

/// `(演算子)? バージョン`
fn constraint<'a>(full: &'a str, input: &'a str) -> IResult<&'a str, RawConstraint> {
    let (input, _) = multispace0(input)?;
    let start = full.offset(input);
    let (input, (op, _, text)) = tuple((opt(operator), multispace0, version))(input)?;
    let end = full.offset(input);

    Ok((
        input,
        RawConstraint {
            operator: op,
            version: text.to_string(),
            range: start..end,
        },
    ))
}

fn operator(input: &str) -> IResult<&str, VersionOperator> {
    alt((
        value(VersionOperator::Ge, tag(">=")),
        value(VersionOperator::Le, tag("<=")),
        value(VersionOperator::Gt, tag(">")),
        value(VersionOperator::Lt, tag("<")),
        value(VersionOperator::Eq, tag("=")),
        value(VersionOperator::Caret, tag("^")),
        value(VersionOperator::Tilde, tag("~")),
    ))(input)
}

/// `0`, `0.4`, `0.4.24`, `0.4.x`, `*`
fn version(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        version_part,
        many_m_n(0, 2, preceded(char('.'), version_part)),
    ))(input)
}

fn version_part(input: &str) -> IResult<&str, &str> {
    alt((digit1, tag("x"), tag("X"), tag("*")))(input)
}
