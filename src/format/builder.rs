//! Token arena to AST conversion
//!
//! Runs once, after the grammar has accepted the whole input. Sibling lists
//! in the arena run newest-first; each one is walked once to count it, once
//! to collect into an exactly sized vector, and then reversed, which yields
//! textual order without any intermediate allocation.

use crate::engine::{Arena, SourcePosition};

use super::error::ReadError;
use super::node::{ArrayNode, BooleanNode, Node, NumberNode, ObjectNode, StringNode};
use super::token::{Token, TokenId, TokenValue};

/// Builds the owned [`Node`] tree from a finished token arena
#[derive(Debug)]
pub struct AstBuilder<'a> {
    input: &'a [u8],
    tokens: &'a Arena<Token>,
    label: &'a str,
}

impl<'a> AstBuilder<'a> {
    pub fn new(input: &'a [u8], tokens: &'a Arena<Token>, label: &'a str) -> Self {
        Self {
            input,
            tokens,
            label,
        }
    }

    /// Build the document root from the newest top-level token
    pub fn build_document(&self, root_last: Option<TokenId>) -> Result<ArrayNode, ReadError> {
        self.build_array(root_last)
    }

    /// Build the node for a single token and everything below it
    pub fn build_node(&self, id: TokenId) -> Result<Node, ReadError> {
        let node = match self.tokens.get(id).value {
            TokenValue::Number(value) => Node::Number(NumberNode::new(value as f32)),
            TokenValue::String { begin, end } => Node::String(self.build_string(begin, end)?),
            TokenValue::Boolean(value) => Node::Boolean(BooleanNode::new(value)),
            TokenValue::Object { last } => Node::Object(self.build_object(last)?),
            TokenValue::Array { last } => Node::Array(self.build_array(last)?),
        };
        Ok(node)
    }

    fn build_array(&self, last: Option<TokenId>) -> Result<ArrayNode, ReadError> {
        let ids = self.collect_siblings(last);
        let elements = ids
            .into_iter()
            .map(|id| self.build_node(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ArrayNode::new(elements))
    }

    /// Children alternate key, value; walked newest-first they come out as
    /// (value, key) and are swapped back into (key, value)
    fn build_object(&self, last: Option<TokenId>) -> Result<ObjectNode, ReadError> {
        let count = self.count_siblings(last);
        if count % 2 != 0 {
            return Err(ReadError::Internal {
                label: self.label.to_owned(),
                message: format!("object has {} children, expected key/value pairs", count),
            });
        }

        let mut pairs = Vec::with_capacity(count / 2);
        let mut cursor = last;
        while let Some(value_id) = cursor {
            let value_token = self.tokens.get(value_id);
            let Some(key_id) = value_token.previous else {
                break;
            };
            let key_token = self.tokens.get(key_id);
            pairs.push((self.build_node(key_id)?, self.build_node(value_id)?));
            cursor = key_token.previous;
        }
        pairs.reverse();

        Ok(ObjectNode::new(pairs))
    }

    fn build_string(&self, begin: usize, end: usize) -> Result<StringNode, ReadError> {
        match decode_string(&self.input[begin..end]) {
            Ok(text) => Ok(StringNode::new(text)),
            Err(bad) => Err(ReadError::InvalidEncoding {
                label: self.label.to_owned(),
                position: SourcePosition::from_offset(self.input, begin + bad),
            }),
        }
    }

    fn count_siblings(&self, last: Option<TokenId>) -> usize {
        let mut count = 0;
        let mut cursor = last;
        while let Some(id) = cursor {
            count += 1;
            cursor = self.tokens.get(id).previous;
        }
        count
    }

    /// Sibling ids in textual order
    fn collect_siblings(&self, last: Option<TokenId>) -> Vec<TokenId> {
        let mut ids = Vec::with_capacity(self.count_siblings(last));
        let mut cursor = last;
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.tokens.get(id).previous;
        }
        ids.reverse();
        ids
    }
}

/// Decode the escapes in the raw contents of a string literal
///
/// On failure returns the offset of the first byte that is not valid UTF-8.
/// Escapes are ASCII, so validating the raw bytes is enough.
pub fn decode_string(raw: &[u8]) -> Result<String, usize> {
    let text = std::str::from_utf8(raw).map_err(|e| e.valid_up_to())?;

    let Some(first) = memchr::memchr(b'\\', raw) else {
        return Ok(text.to_owned());
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut rest = &text[first..];

    while let Some(i) = memchr::memchr(b'\\', rest.as_bytes()) {
        out.push_str(&rest[..i]);
        let mut chars = rest[i + 1..].chars();
        match chars.next().map(|c| (c, unescape(c))) {
            Some((_, Some(decoded))) => out.push(decoded),
            Some((c, None)) => {
                out.push('\\');
                out.push(c);
            }
            None => out.push('\\'),
        }
        rest = chars.as_str();
    }
    out.push_str(rest);

    Ok(out)
}

#[inline]
fn unescape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'v' => Some('\u{0B}'),
        'f' => Some('\u{0C}'),
        'r' => Some('\r'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::grammar;
    use crate::format::scanner::Scanner;

    fn build(input: &str) -> ArrayNode {
        let mut scanner = Scanner::new(input.as_bytes(), 0);
        assert!(grammar::document(&mut scanner), "grammar rejected {input:?}");
        let output = scanner.finish();
        AstBuilder::new(input.as_bytes(), &output.tokens, "test")
            .build_document(output.root_last)
            .unwrap()
    }

    #[test]
    fn test_top_level_order() {
        let root = build("1 2, 3");
        let numbers: Vec<f32> = root.iter().filter_map(Node::as_number).collect();
        assert_eq!(numbers, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_object_pairs_in_order() {
        let root = build(r#"{"a": 1, "b": [true false], "c": "x"}"#);
        let object = root[0].as_object().unwrap();
        let keys: Vec<&str> = object.keys().filter_map(Node::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(object["b"][1].as_bool(), Some(false));
    }

    #[test]
    fn test_number_narrowed_to_f32() {
        let root = build("0.1");
        assert_eq!(root[0].as_number(), Some(0.1f32));
    }

    #[test]
    fn test_decode_plain() {
        assert_eq!(decode_string(b"plain"), Ok("plain".to_owned()));
        assert_eq!(decode_string(b""), Ok(String::new()));
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(
            decode_string(br#"a\"b\\c\td\ne\vf\fg\rh"#),
            Ok("a\"b\\c\td\ne\u{0B}f\u{0C}g\rh".to_owned())
        );
    }

    #[test]
    fn test_decode_keeps_unknown_escape() {
        assert_eq!(decode_string(br"\q"), Ok("\\q".to_owned()));
        assert_eq!(decode_string(b"end\\"), Ok("end\\".to_owned()));
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_string("h\\té".as_bytes()), Ok("h\té".to_owned()));
        assert_eq!(decode_string(b"ab\xffcd"), Err(2));
    }

    #[test]
    fn test_odd_object_is_internal_error() {
        let mut tokens = Arena::new();
        let only = tokens.alloc(Token {
            value: TokenValue::Boolean(true),
            previous: None,
        });
        let object = tokens.alloc(Token {
            value: TokenValue::Object { last: Some(only) },
            previous: None,
        });
        let err = AstBuilder::new(b"", &tokens, "bad")
            .build_node(object)
            .unwrap_err();
        assert!(matches!(err, ReadError::Internal { .. }));
        assert_eq!(err.label(), "bad");
    }

    #[test]
    fn test_invalid_utf8_string_position() {
        let input = b"[\"ok\", \"b\xffd\"]";
        let mut scanner = Scanner::new(input, 0);
        assert!(grammar::document(&mut scanner));
        let output = scanner.finish();
        let err = AstBuilder::new(input, &output.tokens, "enc")
            .build_document(output.root_last)
            .unwrap_err();
        match err {
            ReadError::InvalidEncoding { position, .. } => assert_eq!(position.offset, 9),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
