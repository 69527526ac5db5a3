//! Integration tests for error reporting
//!
//! These tests cover error positions, messages and source-context
//! formatting as seen by callers of the reader.

use scenemark::engine::SourcePosition;
use scenemark::{AccessError, NodeKind, ReadError, Reader, ReaderConfig};

fn error_for(input: &str) -> ReadError {
    Reader::parse(input.as_bytes(), "scene.mk").unwrap_err()
}

// ============================================================================
// Syntax Errors
// ============================================================================

#[test]
fn test_syntax_error_message() {
    let err = error_for("[1, 2, x]");
    assert_eq!(
        err.to_string(),
        "scene.mk: syntax error at line 1, column 8: unexpected 'x'"
    );
}

#[test]
fn test_error_reports_furthest_position() {
    // The object fails at '}' after a key with no value, not at the '{'
    let err = error_for("{\"a\": 1, \"b\":}");
    assert_eq!(err.position().map(|p| p.offset), Some(13));
}

#[test]
fn test_unterminated_string_reports_end() {
    let err = error_for("\"abc");
    match err {
        ReadError::Syntax { position, found, .. } => {
            assert_eq!(position, SourcePosition::new(4, 1, 5));
            assert_eq!(found, "end of input");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_leading_zero_points_after_zero() {
    let err = error_for("01");
    assert_eq!(err.position().map(|p| p.column), Some(2));
}

#[test]
fn test_trailing_garbage_position() {
    let err = error_for("[1]\n  x");
    let position = err.position().unwrap();
    assert_eq!((position.line, position.column), (2, 3));
}

#[test]
fn test_empty_document() {
    let err = error_for("");
    match err {
        ReadError::Syntax { position, found, .. } => {
            assert_eq!(position, SourcePosition::start());
            assert_eq!(found, "end of input");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_format_with_source() {
    let input = "{\n  \"speed\": 1.\n}";
    let err = error_for(input);
    let rendered = err.format_with_source(input.as_bytes());
    assert_eq!(
        rendered,
        "scene.mk: syntax error at line 2, column 14: unexpected '\\n'\n  \"speed\": 1.\n             ^\n"
    );
}

#[test]
fn test_non_ascii_byte_described() {
    let err = Reader::parse(b"[1, \xff]", "bin").unwrap_err();
    match err {
        ReadError::Syntax { found, .. } => assert_eq!(found, "byte 0xff"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Limit Errors
// ============================================================================

#[test]
fn test_input_too_large_message() {
    let config = ReaderConfig::new().with_max_input_size(2);
    let err = Reader::parse_with_config(b"[1]", "big.mk", &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "big.mk: input too large: 3 bytes exceeds limit of 2 bytes"
    );
    assert_eq!(err.position(), None);
}

#[test]
fn test_nesting_limit_message() {
    let config = ReaderConfig::new().with_max_depth(1);
    let err = Reader::parse_with_config(b"[\n [1]]", "deep.mk", &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "deep.mk: nesting limit exceeded at line 2, column 2: depth exceeds limit of 1"
    );
}

#[test]
fn test_errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&error_for("x"));
    assert_error(&AccessError::MissingKey("k".into()));
}

// ============================================================================
// Access Errors
// ============================================================================

#[test]
fn test_access_errors() {
    let reader = Reader::parse(br#"{"pos": [1 2]}"#, "scene.mk").unwrap();
    let root = &reader[0];

    assert_eq!(
        root["pos"].try_get("x").unwrap_err(),
        AccessError::KindMismatch {
            expected: NodeKind::Object,
            found: NodeKind::Array
        }
    );
    assert_eq!(
        root.try_get("rot").unwrap_err().to_string(),
        "no key \"rot\" in object"
    );
    assert_eq!(
        root["pos"].try_get_index(2).unwrap_err(),
        AccessError::IndexOutOfRange { index: 2, len: 2 }
    );
}
