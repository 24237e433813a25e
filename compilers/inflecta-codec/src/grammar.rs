//! nom parsers for rule pieces and merged-diff markup.

use inflecta_align::diff::{ADDED_CLOSE, ADDED_OPEN, REMOVED_CLOSE, REMOVED_OPEN};
use inflecta_align::{DiffChunk, MergedDiff};
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, digit1, none_of},
    combinator::{all_consuming, map, map_res, opt, rest, verify},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair},
    Finish, IResult,
};

use crate::error::CodecError;

/// Where a middle rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor<'a> {
    /// `from_end:len`, counted back from the end of the original base.
    Position { from_end: usize, len: usize },
    /// Bare literal, located case-insensitively.
    Literal(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiddleToken<'a> {
    pub anchor: Anchor<'a>,
    pub replacement: &'a str,
}

fn number(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// `>` chop literal
pub fn back_rule(input: &str) -> IResult<&str, (usize, &str)> {
    preceded(char('>'), pair(number, rest))(input)
}

fn position(input: &str) -> IResult<&str, Anchor<'_>> {
    map(separated_pair(number, char(':'), number), |(from_end, len)| {
        Anchor::Position { from_end, len }
    })(input)
}

fn bare_literal(input: &str) -> IResult<&str, Anchor<'_>> {
    map(
        verify(is_not("-"), |s: &str| !s.starts_with(|c: char| c.is_ascii_digit())),
        Anchor::Literal,
    )(input)
}

/// (`pos:len` | literal) `-` replacement
pub fn middle_token(input: &str) -> IResult<&str, MiddleToken<'_>> {
    map(
        separated_pair(alt((position, bare_literal)), char('-'), rest),
        |(anchor, replacement)| MiddleToken {
            anchor,
            replacement,
        },
    )(input)
}

/// Parses one complete middle token.
pub fn parse_middle_token(token: &str) -> Option<MiddleToken<'_>> {
    all_consuming(middle_token)(token)
        .finish()
        .ok()
        .map(|(_, parsed)| parsed)
}

/// Parses one complete back rule into `(chop, appended)`.
pub fn parse_back_rule(piece: &str) -> Option<(usize, &str)> {
    back_rule(piece).finish().ok().map(|(_, parsed)| parsed)
}

/// Leading decimal number of a rule piece, ignoring a `>` marker.
pub fn leading_number(piece: &str) -> Option<usize> {
    let piece = piece.strip_prefix('>').unwrap_or(piece);
    number(piece).ok().map(|(_, n)| n)
}

fn removed_span(input: &str) -> IResult<&str, &str> {
    delimited(char(REMOVED_OPEN), is_not("'"), char(REMOVED_CLOSE))(input)
}

fn added_span(input: &str) -> IResult<&str, &str> {
    delimited(char(ADDED_OPEN), is_not(">"), char(ADDED_CLOSE))(input)
}

fn change(input: &str) -> IResult<&str, DiffChunk> {
    alt((
        map(pair(removed_span, opt(added_span)), |(removed, added)| {
            DiffChunk::Changed {
                removed: removed.to_string(),
                added: added.unwrap_or_default().to_string(),
            }
        }),
        map(added_span, |added| DiffChunk::Changed {
            removed: String::new(),
            added: added.to_string(),
        }),
    ))(input)
}

fn same(input: &str) -> IResult<&str, DiffChunk> {
    map(none_of("`'<>"), DiffChunk::Same)(input)
}

/// Reads a merged diff back from its textual markup.
pub fn parse_markup(input: &str) -> Result<MergedDiff, CodecError> {
    match all_consuming(many0(alt((same, change))))(input).finish() {
        Ok((_, chunks)) => Ok(MergedDiff::from_chunks(chunks)),
        Err(e) => Err(CodecError::InvalidMarkup {
            offset: input.len() - e.input.len(),
        }),
    }
}
