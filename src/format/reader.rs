//! Public entry point: parse a buffer into a [`Reader`]

use std::ops::Index;

use super::builder::AstBuilder;
use super::config::ReaderConfig;
use super::error::ReadError;
use super::grammar;
use super::node::{ArrayNode, Node};
use super::scanner::Scanner;
use crate::engine::SourcePosition;

/// A parsed scene markup document
///
/// The document root is always an array of the top-level values, in the
/// order they appear. The reader owns the whole tree; the input buffer and
/// all parse-time scratch data are released when [`Reader::parse`] returns.
///
/// # Example
///
/// ```rust
/// use scenemark::{NumberNode, Reader, StringNode};
///
/// let reader = Reader::parse(br#"{"type": "camera", "fov": 60}"#, "scene.mk").unwrap();
/// assert_eq!(reader.size(), 1);
///
/// let camera = &reader[0];
/// assert_eq!(camera["type"].as_::<StringNode>(), "camera");
/// assert_eq!(camera["fov"].as_::<NumberNode>().value(), 60.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Reader {
    label: String,
    root: ArrayNode,
}

impl Reader {
    /// Parse `buffer` with the default limits
    ///
    /// `label` only appears in error messages, usually as a file name.
    pub fn parse(buffer: &[u8], label: &str) -> Result<Self, ReadError> {
        Self::parse_with_config(buffer, label, &ReaderConfig::default())
    }

    /// Parse a string slice with the default limits
    pub fn parse_str(text: &str, label: &str) -> Result<Self, ReadError> {
        Self::parse(text.as_bytes(), label)
    }

    /// Parse `buffer` with custom limits
    ///
    /// Fails without producing any tree if the grammar does not accept the
    /// whole buffer.
    pub fn parse_with_config(
        buffer: &[u8],
        label: &str,
        config: &ReaderConfig,
    ) -> Result<Self, ReadError> {
        if config.max_input_size > 0 && buffer.len() > config.max_input_size {
            return Err(ReadError::InputTooLarge {
                label: label.to_owned(),
                input_size: buffer.len(),
                max_size: config.max_input_size,
            });
        }

        log_debug!("Starting parse: label={}, input_len={}", label, buffer.len());

        let mut scanner = Scanner::new(buffer, config.max_depth);
        let matched = grammar::document(&mut scanner);

        if let Some(offset) = scanner.nesting_exceeded_at() {
            log_debug!("Parse aborted: nesting limit {} exceeded", config.max_depth);
            return Err(ReadError::NestingLimitExceeded {
                label: label.to_owned(),
                position: SourcePosition::from_offset(buffer, offset),
                max_depth: config.max_depth,
            });
        }

        if !matched {
            let offset = scanner.furthest_failure();
            log_debug!("Parse failed: furthest failure at byte {}", offset);
            return Err(ReadError::syntax(label, buffer, offset));
        }

        let output = scanner.finish();
        let root = AstBuilder::new(buffer, &output.tokens, label).build_document(output.root_last)?;

        log_debug!(
            "Parse successful: {} tokens, {} top-level values",
            output.tokens.len(),
            root.len()
        );

        Ok(Self {
            label: label.to_owned(),
            root,
        })
    }

    /// Number of top-level values
    #[inline]
    pub fn size(&self) -> usize {
        self.root.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Top-level value at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.root.get(index)
    }

    /// The diagnostic label given at parse time
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The root array
    pub fn root(&self) -> &ArrayNode {
        &self.root
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.root.iter()
    }

    /// Take ownership of the root array
    pub fn into_root(self) -> ArrayNode {
        self.root
    }
}

impl Index<usize> for Reader {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.root[index]
    }
}

impl<'a> IntoIterator for &'a Reader {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_value() {
        let reader = Reader::parse(b"42", "t").unwrap();
        assert_eq!(reader.size(), 1);
        assert_eq!(reader[0].as_number(), Some(42.0));
        assert_eq!(reader.label(), "t");
    }

    #[test]
    fn test_parse_str() {
        let reader = Reader::parse_str("true false", "t").unwrap();
        let values: Vec<bool> = reader.iter().filter_map(Node::as_bool).collect();
        assert_eq!(values, vec![true, false]);
    }

    #[test]
    fn test_syntax_error_carries_label() {
        let err = Reader::parse(b"[1, ?]", "scene.mk").unwrap_err();
        assert_eq!(err.label(), "scene.mk");
        assert!(matches!(err, ReadError::Syntax { .. }));
    }

    #[test]
    fn test_input_too_large() {
        let config = ReaderConfig::new().with_max_input_size(4);
        let err = Reader::parse_with_config(b"[1, 2]", "t", &config).unwrap_err();
        assert_eq!(
            err,
            ReadError::InputTooLarge {
                label: "t".into(),
                input_size: 6,
                max_size: 4
            }
        );
    }

    #[test]
    fn test_nesting_limit() {
        let config = ReaderConfig::new().with_max_depth(2);
        assert!(Reader::parse_with_config(b"[[1]]", "t", &config).is_ok());

        let err = Reader::parse_with_config(b"[[[1]]]", "t", &config).unwrap_err();
        match err {
            ReadError::NestingLimitExceeded {
                position,
                max_depth,
                ..
            } => {
                assert_eq!(position.offset, 2);
                assert_eq!(max_depth, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unlimited_config() {
        let deep = format!("{}{}", "[".repeat(20), "]".repeat(20));
        let limited = ReaderConfig::new().with_max_depth(8);
        assert!(Reader::parse_with_config(deep.as_bytes(), "t", &limited).is_err());
        assert!(Reader::parse_with_config(deep.as_bytes(), "t", &ReaderConfig::unlimited()).is_ok());
    }

    #[test]
    fn test_into_root() {
        let reader = Reader::parse(b"1 2", "t").unwrap();
        let root = reader.into_root();
        assert_eq!(root.len(), 2);
    }
}
