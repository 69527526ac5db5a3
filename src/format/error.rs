//! Error types for reading and navigating scene markup

use std::fmt;

use crate::engine::{utf8_char_len, SourcePosition};

use super::node::NodeKind;

/// Why a document could not be read
///
/// Every variant carries the diagnostic label the caller passed to
/// [`Reader::parse`](super::Reader::parse), usually a file name.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadError {
    /// The grammar did not accept the input
    Syntax {
        /// Diagnostic label of the document
        label: String,
        /// Furthest position the parser reached before giving up
        position: SourcePosition,
        /// Description of what was found there
        found: String,
    },

    /// A string literal decoded to something that is not UTF-8
    InvalidEncoding {
        /// Diagnostic label of the document
        label: String,
        /// First invalid byte
        position: SourcePosition,
    },

    /// Input exceeds the configured maximum size
    InputTooLarge {
        /// Diagnostic label of the document
        label: String,
        /// Size of the input in bytes
        input_size: usize,
        /// Maximum allowed size
        max_size: usize,
    },

    /// Objects and arrays are nested deeper than the configured limit
    NestingLimitExceeded {
        /// Diagnostic label of the document
        label: String,
        /// Opening bracket of the first container past the limit
        position: SourcePosition,
        /// Maximum allowed depth
        max_depth: usize,
    },

    /// Internal error (shouldn't happen in normal use)
    Internal {
        /// Diagnostic label of the document
        label: String,
        /// Error message describing the internal error
        message: String,
    },
}

impl ReadError {
    /// Build a syntax error at byte `offset` of `input`
    pub fn syntax(label: &str, input: &[u8], offset: usize) -> Self {
        ReadError::Syntax {
            label: label.to_owned(),
            position: SourcePosition::from_offset(input, offset),
            found: describe_at(input, offset),
        }
    }

    /// The diagnostic label of the document that failed
    pub fn label(&self) -> &str {
        match self {
            ReadError::Syntax { label, .. }
            | ReadError::InvalidEncoding { label, .. }
            | ReadError::InputTooLarge { label, .. }
            | ReadError::NestingLimitExceeded { label, .. }
            | ReadError::Internal { label, .. } => label,
        }
    }

    /// Where in the input the error was detected, if it has a location
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            ReadError::Syntax { position, .. }
            | ReadError::InvalidEncoding { position, .. }
            | ReadError::NestingLimitExceeded { position, .. } => Some(*position),
            ReadError::InputTooLarge { .. } | ReadError::Internal { .. } => None,
        }
    }

    /// Format with source code context
    ///
    /// Renders the message, then the offending line with a caret under the
    /// error column. Errors without a location render the message only.
    pub fn format_with_source(&self, input: &[u8]) -> String {
        let mut output = self.to_string();
        output.push('\n');

        let Some(pos) = self.position() else {
            return output;
        };

        let line = pos.line_text(input);
        output.push_str(&String::from_utf8_lossy(line));
        output.push('\n');

        for _ in 0..pos.column.saturating_sub(1) {
            output.push(' ');
        }
        output.push_str("^\n");
        output
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Syntax {
                label,
                position,
                found,
            } => {
                write!(f, "{}: syntax error at {}: unexpected {}", label, position, found)
            }
            ReadError::InvalidEncoding { label, position } => {
                write!(f, "{}: string at {} is not valid UTF-8", label, position)
            }
            ReadError::InputTooLarge {
                label,
                input_size,
                max_size,
            } => {
                write!(
                    f,
                    "{}: input too large: {} bytes exceeds limit of {} bytes",
                    label, input_size, max_size
                )
            }
            ReadError::NestingLimitExceeded {
                label,
                position,
                max_depth,
            } => {
                write!(
                    f,
                    "{}: nesting limit exceeded at {}: depth exceeds limit of {}",
                    label, position, max_depth
                )
            }
            ReadError::Internal { label, message } => {
                write!(f, "{}: internal error: {}", label, message)
            }
        }
    }
}

impl std::error::Error for ReadError {}

/// Why a node lookup failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The node is not of the requested kind
    KindMismatch {
        /// Kind the caller asked for
        expected: NodeKind,
        /// Kind the node actually is
        found: NodeKind,
    },

    /// No string key with this value in the object
    MissingKey(String),

    /// Index past the end of an array
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of elements
        len: usize,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::KindMismatch { expected, found } => {
                write!(f, "expected {} node, found {}", expected, found)
            }
            AccessError::MissingKey(key) => write!(f, "no key {:?} in object", key),
            AccessError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for array of length {}", index, len)
            }
        }
    }
}

impl std::error::Error for AccessError {}

/// Describe the input at `offset` for an error message
///
/// Returns `"end of input"` past the last byte, the quoted character when
/// the bytes there form valid UTF-8, and the raw byte value otherwise.
pub fn describe_at(input: &[u8], offset: usize) -> String {
    let Some(&first) = input.get(offset) else {
        return "end of input".to_owned();
    };

    let end = (offset + utf8_char_len(first)).min(input.len());
    match std::str::from_utf8(&input[offset..end])
        .ok()
        .and_then(|s| s.chars().next())
    {
        Some(c) => format!("{:?}", c),
        None => format!("byte 0x{:02x}", first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_at() {
        assert_eq!(describe_at(b"[1, x]", 4), "'x'");
        assert_eq!(describe_at(b"[1", 2), "end of input");
        assert_eq!(describe_at("é".as_bytes(), 0), "'é'");
        assert_eq!(describe_at(b"\xff", 0), "byte 0xff");
        assert_eq!(describe_at(b"\n", 0), "'\\n'");
    }

    #[test]
    fn test_syntax_display() {
        let err = ReadError::syntax("scene.mk", b"[1, x]", 4);
        assert_eq!(
            err.to_string(),
            "scene.mk: syntax error at line 1, column 5: unexpected 'x'"
        );
        assert_eq!(err.label(), "scene.mk");
        assert_eq!(err.position().map(|p| p.offset), Some(4));
    }

    #[test]
    fn test_format_with_source() {
        let input = b"{\n  \"a\": 1\n  \"b\": ?\n}";
        let offset = input.iter().position(|&b| b == b'?').unwrap();
        let err = ReadError::syntax("doc", input, offset);
        let rendered = err.format_with_source(input);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "doc: syntax error at line 3, column 8: unexpected '?'");
        assert_eq!(lines[1], "  \"b\": ?");
        assert_eq!(lines[2], "       ^");
    }

    #[test]
    fn test_unlocated_error_has_no_caret() {
        let err = ReadError::InputTooLarge {
            label: "big".into(),
            input_size: 10,
            max_size: 5,
        };
        assert_eq!(err.position(), None);
        assert_eq!(
            err.format_with_source(b""),
            "big: input too large: 10 bytes exceeds limit of 5 bytes\n"
        );
    }

    #[test]
    fn test_access_error_display() {
        let err = AccessError::KindMismatch {
            expected: NodeKind::Object,
            found: NodeKind::Number,
        };
        assert_eq!(err.to_string(), "expected object node, found number");
        assert_eq!(
            AccessError::MissingKey("size".into()).to_string(),
            "no key \"size\" in object"
        );
        assert_eq!(
            AccessError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "index 3 out of range for array of length 2"
        );
    }
}
