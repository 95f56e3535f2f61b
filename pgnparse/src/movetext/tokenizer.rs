use super::token::Token;
use crate::error::MovetextError;

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1, take_while1};
use nom::character::complete::{char, digit1, multispace0, satisfy};
use nom::combinator::{eof, map, opt, peek, recognize, value, verify};
use nom::multi::many1_count;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;

#[derive(Clone)]
enum Lexeme<'a> {
    Token(Token<'a>),
    // Dots-only word, carries no information
    Separator,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | '(' | ')' | ';')
}

fn word_end(input: &str) -> IResult<&str, ()> {
    peek(alt((value((), eof), value((), satisfy(is_separator)))))(input)
}

fn dots(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == '.')(input)
}

// `12.`, `12...`, and `12. ...` which is folded into a single Black marker.
// Numbers past `u32::MAX` saturate.
fn move_number(input: &str) -> IResult<&str, Lexeme<'_>> {
    map(
        tuple((
            digit1,
            many1_count(char('.')),
            opt(preceded(
                multispace0,
                terminated(verify(dots, |d: &str| d.len() > 1), word_end),
            )),
        )),
        |(digits, dot_count, ellipsis): (&str, usize, Option<&str>)| {
            Lexeme::Token(Token::MoveNumber {
                number: digits.parse().unwrap_or(u32::MAX),
                black: dot_count > 1 || ellipsis.is_some(),
            })
        },
    )(input)
}

fn nag(input: &str) -> IResult<&str, Lexeme<'_>> {
    map(
        terminated(recognize(pair(char('$'), digit1)), word_end),
        |text| Lexeme::Token(Token::Nag(text)),
    )(input)
}

fn result(input: &str) -> IResult<&str, Lexeme<'_>> {
    map(
        terminated(
            alt((tag("1-0"), tag("0-1"), tag("1/2-1/2"), tag("*"))),
            word_end,
        ),
        |text| Lexeme::Token(Token::Result(text)),
    )(input)
}

fn ellipsis(input: &str) -> IResult<&str, Lexeme<'_>> {
    value(Lexeme::Separator, terminated(dots, word_end))(input)
}

fn san_move(input: &str) -> IResult<&str, Lexeme<'_>> {
    map(take_till1(is_separator), |text| {
        Lexeme::Token(Token::Move(text))
    })(input)
}

// Tried in order; anything unrecognized is a move
fn lexeme(input: &str) -> IResult<&str, Lexeme<'_>> {
    alt((move_number, nag, result, ellipsis, san_move))(input)
}

fn line_length(input: &str) -> usize {
    input.find('\n').unwrap_or(input.len())
}

fn comment_length(input: &str, offset: usize) -> Result<usize, MovetextError> {
    input
        .find('}')
        .map(|end| end + 1)
        .ok_or(MovetextError::UnbalancedDelimiter {
            delimiter: '{',
            offset,
        })
}

// Parentheses inside comments do not count towards the nesting depth
fn variation_length(input: &str, offset: usize) -> Result<usize, MovetextError> {
    let bytes = input.as_bytes();
    let mut depth = 0usize;
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index + 1);
                }
            }
            b'{' => {
                index += comment_length(&input[index..], offset + index)?;
                continue;
            }
            b';' => {
                index += line_length(&input[index..]);
                continue;
            }
            _ => (),
        }
        index += 1;
    }

    Err(MovetextError::UnbalancedDelimiter {
        delimiter: '(',
        offset,
    })
}

/// Splits a movetext block into tokens.
///
/// Lexing is permissive: any run of text that is not a move number,
/// comment, variation, glyph or result is returned as a move. The only
/// failure is a delimiter without its counterpart.
pub fn tokenize(movetext: &str) -> Result<Vec<Token<'_>>, MovetextError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(next) = movetext[offset..].chars().next() {
        let input = &movetext[offset..];

        let consumed = match next {
            c if c.is_whitespace() => c.len_utf8(),
            // Escape mechanism: lines starting with '%' are ignored
            '%' if offset == 0 || movetext[..offset].ends_with('\n') => line_length(input),
            '{' => {
                let length = comment_length(input, offset)?;
                tokens.push(Token::Comment {
                    text: &input[..length],
                    delimited: true,
                });
                length
            }
            '(' => {
                let length = variation_length(input, offset)?;
                tokens.push(Token::Variation(&input[..length]));
                length
            }
            ';' => {
                let length = line_length(input);
                tokens.push(Token::Comment {
                    text: input[..length].trim_end(),
                    delimited: false,
                });
                length
            }
            delimiter @ ('}' | ')') => {
                return Err(MovetextError::UnbalancedDelimiter { delimiter, offset });
            }
            _ => {
                let Ok((remaining, found)) = lexeme(input) else {
                    unreachable!("a non-separator character always starts a move");
                };
                if let Lexeme::Token(token) = found {
                    tokens.push(token);
                }
                input.len() - remaining.len()
            }
        };

        offset += consumed;
    }

    Ok(tokens)
}
