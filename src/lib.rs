//! Scenemark - Backtracking Reader for Scene Markup
//!
//! Scene markup is the compact, JSON-like format used for scene and
//! configuration files. This crate provides:
//! - A generic backtracking combinator engine (literals, character sets,
//!   sequence, ordered choice, iterative repetition)
//! - Token capture into an index-based arena with truncate-on-failure rollback
//! - The scene markup grammar
//! - An immutable, order-preserving AST
//!
//! ## Quick Start
//!
//! ```rust
//! use scenemark::{NumberNode, Reader};
//!
//! let input = br#"
//!     { "type": "mesh", "position": [0 1.5 -2] }
//!     { "type": "light", "intensity": 0.8 }
//! "#;
//!
//! let reader = Reader::parse(input, "scene.mk").unwrap();
//! assert_eq!(reader.size(), 2);
//!
//! let position = &reader[0]["position"];
//! assert_eq!(position[2].as_::<NumberNode>().value(), -2.0);
//! assert_eq!(reader[1]["type"].as_str(), Some("light"));
//! ```
//!
//! ## Using the Combinator Engine
//!
//! ```rust
//! use scenemark::engine::{choice, many, seq, CharClass, Cursor, Rule, Scan};
//!
//! let word = seq((CharClass::Letter, many(CharClass::Letter)));
//! let list = seq((word, many(seq((choice((',', ' ')), word)))));
//!
//! let mut cursor = Cursor::new(b"alpha,beta gamma");
//! assert!(list.matches(&mut cursor));
//! assert!(cursor.is_at_end());
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate

// Lint configuration for production quality
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// Prelude module for convenient imports
pub mod prelude;

// Generic combinator engine
pub mod engine;

// Scene markup grammar, AST and reader
pub mod format;

/// Re-export commonly used types for convenience
pub use format::{
    AccessError, ArrayNode, BooleanNode, Node, NodeKind, NodeType, NumberNode, ObjectNode,
    ReadError, Reader, ReaderConfig, StringNode, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_SIZE,
};
