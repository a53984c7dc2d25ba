//! Lexical comment scan.
//!
//! Comments are read straight from the source text rather than from the
//! parse tree, so comments inside macro bodies and other preprocessor lines
//! are seen exactly as a C lexer sees them. String literals, character
//! literals and `#include <...>` header names are skipped.

use ground_rule_core::CommentToken;

/// Result of scanning one file.
#[derive(Debug, Default)]
pub(crate) struct CommentScan {
    /// Every comment in document order.
    pub(crate) comments: Vec<CommentToken>,
    /// Byte offset of a `/*` that is never closed. Its token runs to the end
    /// of the file.
    pub(crate) unterminated: Option<usize>,
}

pub(crate) fn scan_comments(src: &str) -> CommentScan {
    let bytes = src.as_bytes();
    let mut scan = CommentScan::default();
    let mut line = 1;
    let mut counted = 0;
    let mut i = 0;

    while let Some(&c) = bytes.get(i) {
        let next = bytes.get(i + 1).copied();
        let end = match (c, next) {
            (b'/', Some(b'/')) => line_comment_end(bytes, i),
            (b'/', Some(b'*')) => {
                if let Some(close) = find_block_close(bytes, i + 2) {
                    close
                } else {
                    scan.unterminated = Some(i);
                    bytes.len()
                }
            }
            (b'"' | b'\'', _) => {
                i = quoted_end(bytes, i, c);
                continue;
            }
            (b'#', _) if starts_line(bytes, i) => {
                i = directive_skip(bytes, i);
                continue;
            }
            _ if c.is_ascii_alphanumeric() || c == b'_' => {
                i = word_end(bytes, i);
                continue;
            }
            _ => {
                i += 1;
                continue;
            }
        };

        line += count_newlines(&bytes[counted..i]);
        counted = i;
        scan.comments.push(CommentToken {
            text: src[i..end].to_owned(),
            line,
        });
        i = end;
    }

    scan
}

/// A `//` comment ends at the first newline not preceded by a backslash.
fn line_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while let Some(&c) = bytes.get(i) {
        if c == b'\n' && !is_spliced(bytes, i) {
            return i;
        }
        i += 1;
    }
    bytes.len()
}

/// Offset just past the `*/` closing a block comment whose body starts at `from`.
fn find_block_close(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(2)
        .position(|w| w == b"*/")
        .map(|pos| from + pos + 2)
}

/// End of a string or character literal. An unterminated literal stops at
/// the end of its line.
fn quoted_end(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while let Some(&c) = bytes.get(i) {
        match c {
            b'\\' => i += 2,
            b'\n' => return i,
            _ if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skips the `<...>` header name of an include directive, or just the `#`.
fn directive_skip(bytes: &[u8], hash: usize) -> usize {
    let mut i = skip_blanks(bytes, hash + 1);
    let Some(rest) = bytes.get(i..) else {
        return hash + 1;
    };
    let directive = ["include_next", "include", "import"]
        .into_iter()
        .find(|d| rest.starts_with(d.as_bytes()));
    let Some(directive) = directive else {
        return hash + 1;
    };

    i = skip_blanks(bytes, i + directive.len());
    if bytes.get(i) != Some(&b'<') {
        return i;
    }
    bytes[i..]
        .iter()
        .position(|&b| b == b'>' || b == b'\n')
        .map_or(bytes.len(), |pos| i + pos + 1)
}

/// Identifiers and preprocessing numbers are consumed whole so that digit
/// separators (`1'000`) and literal prefixes (`L'x'`) lex correctly.
fn word_end(bytes: &[u8], start: usize) -> usize {
    let number = bytes[start].is_ascii_digit();
    let mut i = start + 1;
    while let Some(&c) = bytes.get(i) {
        let continues = c.is_ascii_alphanumeric()
            || c == b'_'
            || (number && c == b'.')
            || (number
                && matches!(c, b'+' | b'-')
                && matches!(bytes[i - 1], b'e' | b'E' | b'p' | b'P'))
            || (number
                && c == b'\''
                && bytes.get(i + 1).is_some_and(u8::is_ascii_alphanumeric));
        if !continues {
            break;
        }
        i += 1;
    }
    i
}

fn skip_blanks(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    i
}

/// Only blanks precede `i` on its line.
fn starts_line(bytes: &[u8], i: usize) -> bool {
    bytes[..i]
        .iter()
        .rev()
        .take_while(|&&b| b != b'\n')
        .all(|&b| b == b' ' || b == b'\t')
}

fn is_spliced(bytes: &[u8], newline: usize) -> bool {
    matches!(bytes[..newline], [.., b'\\'] | [.., b'\\', b'\r'])
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}
