//! Scene markup format
//!
//! Everything specific to the format lives here, on top of the generic
//! [`engine`](crate::engine):
//!
//! - [`token`] / [`scanner`] - Token capture into a rollback-safe arena
//! - [`grammar`] - The productions
//! - [`builder`] - Token arena to AST
//! - [`node`] - The immutable AST
//! - [`reader`] - Public entry point
//! - [`config`] / [`error`] - Limits and error types

pub mod builder;
pub mod config;
pub mod error;
pub mod grammar;
pub mod node;
pub mod reader;
pub mod scanner;
pub mod token;

pub use config::{ReaderConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_SIZE};
pub use error::{AccessError, ReadError};
pub use node::{ArrayNode, BooleanNode, Node, NodeKind, NodeType, NumberNode, ObjectNode, StringNode};
pub use reader::Reader;
