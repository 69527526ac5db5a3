//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from
//! scenemark. Importing it with a wildcard brings the reader, the node types
//! and the combinator vocabulary into scope:
//!
//! ```
//! use scenemark::prelude::*;
//!
//! let reader = Reader::parse(b"[1 2 3]", "inline").unwrap();
//! assert_eq!(reader[0].as_::<ArrayNode>().len(), 3);
//! ```
//!
//! # Re-exported Items
//!
//! ## Reader
//! - [`Reader`] - Parsed document
//! - [`ReaderConfig`] - Input size and nesting limits
//! - [`ReadError`] / [`AccessError`] - Error types
//!
//! ## AST
//! - [`Node`] and its payloads [`NumberNode`], [`StringNode`],
//!   [`BooleanNode`], [`ObjectNode`], [`ArrayNode`]
//! - [`NodeKind`], [`NodeType`]
//!
//! ## Combinators
//! - [`seq()`], [`choice()`], [`many()`], [`opt()`], [`any_of()`], [`none_of()`]
//! - [`Rule`], [`RuleExt`], [`Scan`], [`Backtrack`], [`Cursor`], [`CharClass`], [`CharSet`]

pub use crate::engine::{
    any_of, choice, many, none_of, opt, seq, Backtrack, CharClass, CharSet, Cursor, Rule,
    RuleExt, Scan,
};
pub use crate::format::{
    AccessError, ArrayNode, BooleanNode, Node, NodeKind, NodeType, NumberNode, ObjectNode,
    ReadError, Reader, ReaderConfig, StringNode,
};
