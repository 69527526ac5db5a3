//! Generic backtracking combinator engine
//!
//! This module knows nothing about scene markup. It provides:
//!
//! ## Core Types
//! - [`Cursor`] - Position into a fully buffered input
//! - [`Backtrack`] / [`Scan`] - The transactional state contract
//! - [`Arena`] - Index-addressed scratch arena with truncate-to-mark rollback
//!
//! ## Combinators
//! - [`combinators`] - Literals, character sets, sequence, choice, repetition
//!
//! ## Character Classes
//! - [`char_class`] - Compile-time lookup tables
//!
//! ## Source Location
//! - [`source_location`] - Line/column tracking

pub mod arena;
pub mod char_class;
pub mod combinators;
pub mod cursor;
pub mod source_location;

pub use arena::{Arena, ArenaId, ArenaMark};
pub use char_class::{utf8_char_len, CharClass, CharClassTables, CharSet, CHAR_CLASSES};
pub use combinators::{any_of, choice, many, none_of, opt, seq, Rule, RuleExt};
pub use cursor::{Backtrack, Cursor, Scan};
pub use source_location::SourcePosition;
