// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of path fields as git prints them.
//!
//! ```text
//! raw field
//!   strip one pair of wrapping quotes (single quoted token only)
//!   "old -> new"?  keep text after the last " -> ", strip quotes again
//!   contains '\'?
//!     escapes -> bytes -> UTF-8        (PathDecoding::Utf8)
//!     escapes -> one char per byte     (PathDecoding::Latin1)
//!     malformed escape                 (PathDecoding::Raw, text unchanged)
//! ```
//!
//! Git octal-escapes bytes outside printable ASCII unless `core.quotepath` is
//! off, so `"caf\303\251.txt"` becomes `café.txt`.

use crate::git::cache::BoundedCache;

/// Number of decoded paths kept per repository.
pub const PATH_CACHE_CAPACITY: usize = 128;

const RENAME_ARROW: &str = " -> ";

/// How a path field was turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDecoding {
    /// No escapes present.
    Plain,
    /// Escapes decoded to valid UTF-8.
    Utf8,
    /// Escaped bytes were not UTF-8 and were mapped one char per byte.
    Latin1,
    /// Escapes could not be parsed; the unquoted text is returned as is.
    Raw,
}

impl PathDecoding {
    /// Whether the result may not match the file name on disk.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::Latin1 | Self::Raw)
    }
}

/// A decoded path along with how it was decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    pub path: String,
    pub decoding: PathDecoding,
}

/// Decodes `raw` into a display path. Never fails.
#[must_use]
pub fn parse_path(raw: &str) -> String {
    decode_path(raw).path
}

/// Decodes `raw`, reporting which strategy produced the text.
#[must_use]
pub fn decode_path(raw: &str) -> DecodedPath {
    let mut text = strip_quotes(raw);
    if let Some(index) = text.rfind(RENAME_ARROW) {
        text = strip_quotes(&text[index + RENAME_ARROW.len()..]);
    }

    if !text.contains('\\') {
        return DecodedPath {
            path: text.to_string(),
            decoding: PathDecoding::Plain,
        };
    }

    let Some(pieces) = tokenize(text) else {
        return DecodedPath {
            path: text.to_string(),
            decoding: PathDecoding::Raw,
        };
    };

    match String::from_utf8(as_bytes(&pieces)) {
        Ok(path) => DecodedPath {
            path,
            decoding: PathDecoding::Utf8,
        },
        Err(_) => DecodedPath {
            path: as_latin1(&pieces),
            decoding: PathDecoding::Latin1,
        },
    }
}

/// Removes one pair of wrapping double quotes when they enclose a single
/// token, so `"a" -> "b"` is left for the rename split.
fn strip_quotes(text: &str) -> &str {
    let Some(inner) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return text;
    };

    let mut escaped = false;
    for c in inner.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return text,
            _ => {}
        }
    }
    inner
}

#[derive(Debug, Clone, Copy)]
enum Piece {
    Char(char),
    Byte(u8),
}

/// Splits `text` into literal chars and escaped bytes.
///
/// Returns `None` on a dangling backslash, an unknown escape, or an octal
/// value above 255.
fn tokenize(text: &str) -> Option<Vec<Piece>> {
    let mut pieces = Vec::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            pieces.push(Piece::Char(c));
            continue;
        }

        let next = chars.next()?;
        let byte = match next {
            '0'..='7' => {
                let mut value = next.to_digit(8)?;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                u8::try_from(value).ok()?
            }
            'n' => b'\n',
            't' => b'\t',
            'r' => b'\r',
            'a' => 0x07,
            'b' => 0x08,
            'f' => 0x0c,
            'v' => 0x0b,
            '\\' => b'\\',
            '"' => b'"',
            _ => return None,
        };
        pieces.push(Piece::Byte(byte));
    }

    Some(pieces)
}

fn as_bytes(pieces: &[Piece]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pieces.len());
    let mut buf = [0_u8; 4];
    for piece in pieces {
        match *piece {
            Piece::Char(c) => bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes()),
            Piece::Byte(b) => bytes.push(b),
        }
    }
    bytes
}

fn as_latin1(pieces: &[Piece]) -> String {
    pieces
        .iter()
        .map(|piece| match *piece {
            Piece::Char(c) => c,
            Piece::Byte(b) => char::from(b),
        })
        .collect()
}

/// Memoizing wrapper around [`parse_path`].
#[derive(Debug, Clone)]
pub struct PathParser {
    cache: BoundedCache<String, String>,
}

impl Default for PathParser {
    fn default() -> Self {
        Self::new(PATH_CACHE_CAPACITY)
    }
}

impl PathParser {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            cache: BoundedCache::new(capacity),
        }
    }

    pub fn parse(&mut self, raw: &str) -> String {
        if let Some(hit) = self.cache.get(raw) {
            return hit;
        }
        let decoded = decode_path(raw);
        if decoded.decoding.is_degraded() {
            tracing::debug!(raw = %raw, decoding = ?decoded.decoding, "path decoded with fallback");
        }
        self.cache.insert(raw.to_string(), decoded.path.clone());
        decoded.path
    }

    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests;
