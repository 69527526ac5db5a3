//! Reader limits

use serde::{Deserialize, Serialize};

/// Default maximum input size: 100 MB
pub const DEFAULT_MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

/// Default maximum nesting depth of objects and arrays
///
/// The grammar and the AST builder both recurse once per nesting level, so
/// this bounds their stack use.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for the reader
///
/// Use [`ReaderConfig::default()`] for sensible defaults, or customize
/// individual fields as needed. A limit of 0 disables it.
///
/// # Example
///
/// ```rust
/// use scenemark::ReaderConfig;
///
/// let config = ReaderConfig::new()
///     .with_max_input_size(1024 * 1024)
///     .with_max_depth(32);
/// assert_eq!(config.max_depth, 32);
///
/// let from_file = ReaderConfig::from_json(r#"{"max_depth": 64}"#).unwrap();
/// assert_eq!(from_file.max_depth, 64);
/// assert_eq!(from_file.max_input_size, scenemark::DEFAULT_MAX_INPUT_SIZE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum allowed input size in bytes
    pub max_input_size: usize,

    /// Maximum allowed nesting depth of objects and arrays
    pub max_depth: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ReaderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with every limit disabled
    pub fn unlimited() -> Self {
        Self {
            max_input_size: 0,
            max_depth: 0,
        }
    }

    /// Set the maximum input size
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.max_input_size = size;
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Serialize to JSON
    #[inline]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON; missing fields take their defaults
    #[inline]
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
