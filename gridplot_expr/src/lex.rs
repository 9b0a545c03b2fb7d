// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokenizer.

use alloc::format;
use alloc::vec::Vec;

use gridplot_core::CompileError;

/// What a token is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TokenKind<'a> {
    Number(f64),
    Ident(&'a str),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
    End,
}

/// A token and the byte offset it starts at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind<'a>,
    pub(crate) offset: usize,
}

/// Splits `src` into tokens, ending with [`TokenKind::End`].
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token<'_>>, CompileError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let kind = match b {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b'0'..=b'9' | b'.' => {
                let end = number_end(bytes, i)
                    .ok_or_else(|| CompileError::at("malformed number", start))?;
                let value = src[start..end]
                    .parse::<f64>()
                    .map_err(|_| CompileError::at("malformed number", start))?;
                i = end;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    offset: start,
                });
                continue;
            }
            b if b.is_ascii_alphabetic() || b == b'_' => {
                let mut end = i + 1;
                while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
                {
                    end += 1;
                }
                i = end;
                tokens.push(Token {
                    kind: TokenKind::Ident(&src[start..end]),
                    offset: start,
                });
                continue;
            }
            _ => {
                let c = src[start..].chars().next().unwrap_or('?');
                return Err(CompileError::at(
                    format!("unexpected character `{c}`"),
                    start,
                ));
            }
        };
        tokens.push(Token {
            kind,
            offset: start,
        });
        i += 1;
    }
    tokens.push(Token {
        kind: TokenKind::End,
        offset: src.len(),
    });
    Ok(tokens)
}

/// End of the number starting at `i`: digits, an optional fraction, an optional exponent.
///
/// An `e` not followed by digits is left for the identifier scanner.
fn number_end(bytes: &[u8], i: usize) -> Option<usize> {
    let digits = |mut j: usize| {
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        j
    };
    let int_end = digits(i);
    let mut end = int_end;
    if bytes.get(end) == Some(&b'.') {
        end = digits(end + 1);
    }
    // A bare `.` has no digits on either side.
    if end - i == 1 && bytes[i] == b'.' {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut j = end + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits(j);
        if exp_end > j {
            end = exp_end;
        }
    }
    Some(end)
}
