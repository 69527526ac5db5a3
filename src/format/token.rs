//! Transient tokens recorded by the capture layer
//!
//! Tokens are created only when a captured production matches, and are
//! immutable afterwards. Siblings are chained newest-first through
//! `previous`; containers point at their newest child through `last`. The
//! whole structure lives in one [`Arena`](crate::engine::Arena) and is dropped
//! once the AST has been built.

use crate::engine::ArenaId;

/// Index of a token in the parse arena
pub type TokenId = ArenaId;

/// Which token a capture should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Decimal number
    Number,
    /// Quoted string (or bare key)
    String,
    /// `true` / `false`
    Boolean,
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

impl TokenKind {
    /// Whether tokens of this kind own a child list
    #[inline]
    pub fn is_container(self) -> bool {
        matches!(self, TokenKind::Object | TokenKind::Array)
    }
}

/// Payload of a token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenValue {
    /// Parsed number
    Number(f64),
    /// Byte range of the string contents in the input, quotes excluded,
    /// escapes still encoded
    String {
        /// Offset of the first content byte
        begin: usize,
        /// Offset one past the last content byte
        end: usize,
    },
    /// Boolean literal
    Boolean(bool),
    /// Object marker; children alternate key, value in textual order
    Object {
        /// Newest child
        last: Option<TokenId>,
    },
    /// Array marker
    Array {
        /// Newest child
        last: Option<TokenId>,
    },
}

impl TokenValue {
    /// Build the payload for a matched span `[begin, end)`
    ///
    /// `last_child` is the newest token linked inside the span and is only
    /// meaningful for containers. Returns `None` if the span cannot be
    /// converted, which the capture layer treats as a failed match.
    pub fn from_span(
        kind: TokenKind,
        input: &[u8],
        begin: usize,
        end: usize,
        last_child: Option<TokenId>,
    ) -> Option<Self> {
        let span = &input[begin..end];
        match kind {
            TokenKind::Number => {
                // The grammar only admits ASCII digits, '-' and '.'
                let text = std::str::from_utf8(span).ok()?;
                text.parse::<f64>().ok().map(TokenValue::Number)
            }
            TokenKind::String => {
                if span.len() >= 2 && span[0] == b'"' && span[span.len() - 1] == b'"' {
                    Some(TokenValue::String {
                        begin: begin + 1,
                        end: end - 1,
                    })
                } else {
                    // Unquoted span: a bare key, taken verbatim
                    Some(TokenValue::String { begin, end })
                }
            }
            TokenKind::Boolean => Some(TokenValue::Boolean(span == b"true")),
            TokenKind::Object => Some(TokenValue::Object { last: last_child }),
            TokenKind::Array => Some(TokenValue::Array { last: last_child }),
        }
    }

    /// The kind this payload belongs to
    #[inline]
    pub fn kind(&self) -> TokenKind {
        match self {
            TokenValue::Number(_) => TokenKind::Number,
            TokenValue::String { .. } => TokenKind::String,
            TokenValue::Boolean(_) => TokenKind::Boolean,
            TokenValue::Object { .. } => TokenKind::Object,
            TokenValue::Array { .. } => TokenKind::Array,
        }
    }

    /// Newest child of a container token
    #[inline]
    pub fn last_child(&self) -> Option<TokenId> {
        match self {
            TokenValue::Object { last } | TokenValue::Array { last } => *last,
            _ => None,
        }
    }
}

/// A captured production
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    /// Payload
    pub value: TokenValue,
    /// The token immediately before this one at the same nesting level
    pub previous: Option<TokenId>,
}
