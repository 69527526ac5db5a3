//! Scene markup grammar
//!
//! ```text
//! letter         ::= "A" .. "Z" | "a" .. "z"
//! non_zero_digit ::= "1" .. "9"
//! digit          ::= "0" | non_zero_digit
//! space          ::= " " | "\t" | "\n" | "\v" | "\f" | "\r"
//! opt_digits     ::= digit*
//! opt_spaces     ::= space*
//! spaces         ::= space opt_spaces
//! comma_spaces   ::= opt_spaces "," opt_spaces | spaces
//! int_number     ::= "0" | non_zero_digit opt_digits
//! real_number    ::= int_number "." digit opt_digits
//! number         ::= "-"? (real_number | int_number)
//! escape_char    ::= "\"" | "\\" | "t" | "n" | "v" | "f" | "r"
//! string_char    ::= any byte but "\"", "\\", "\n", "\r" | "\\" escape_char
//! string         ::= "\"" string_char* "\""
//! boolean        ::= "true" | "false"
//! value          ::= number | string | boolean | object | array
//! key_value      ::= value opt_spaces ":" opt_spaces value
//! object         ::= "{" opt_spaces (key_value (comma_spaces key_value)*)? opt_spaces "}"
//! array          ::= "[" opt_spaces (value (comma_spaces value)*)? opt_spaces "]"
//! document       ::= opt_spaces value (comma_spaces value)* opt_spaces EOF
//! ```
//!
//! Every production is a plain function over [`Scanner`], so recursion
//! (`value` → `object` → `key_value` → `value`) is ordinary function
//! recursion. Only `value` creates tokens.

use crate::engine::{any_of, choice, many, none_of, opt, seq, CharClass, CharSet, Rule, Scan};

use super::scanner::{token, Scanner};
use super::token::TokenKind;

const STRING_EXCLUDED: CharSet = CharSet::from_bytes(b"\"\\\n\r");
const ESCAPES: CharSet = CharSet::from_bytes(b"\"\\tnvfr");

pub fn letter(s: &mut Scanner<'_>) -> bool {
    CharClass::Letter.matches(s)
}

pub fn non_zero_digit(s: &mut Scanner<'_>) -> bool {
    CharClass::NonZeroDigit.matches(s)
}

pub fn digit(s: &mut Scanner<'_>) -> bool {
    CharClass::Digit.matches(s)
}

pub fn space(s: &mut Scanner<'_>) -> bool {
    CharClass::Space.matches(s)
}

/// `digit*`, scanned in bulk
pub fn opt_digits(s: &mut Scanner<'_>) -> bool {
    s.skip_while(CharClass::Digit.predicate());
    true
}

/// `space*`, scanned in bulk
pub fn opt_spaces(s: &mut Scanner<'_>) -> bool {
    s.skip_while(CharClass::Space.predicate());
    true
}

pub fn spaces(s: &mut Scanner<'_>) -> bool {
    seq((space, opt_spaces)).matches(s)
}

/// Element separator: a comma with optional whitespace around it, or bare
/// whitespace
pub fn comma_spaces(s: &mut Scanner<'_>) -> bool {
    choice((seq((opt_spaces, ',', opt_spaces)), spaces)).matches(s)
}

/// `"0"` alone, or a run of digits not starting with `0`
pub fn int_number(s: &mut Scanner<'_>) -> bool {
    choice(('0', seq((non_zero_digit, opt_digits)))).matches(s)
}

pub fn real_number(s: &mut Scanner<'_>) -> bool {
    seq((int_number, '.', digit, opt_digits)).matches(s)
}

pub fn number(s: &mut Scanner<'_>) -> bool {
    seq((opt('-'), choice((real_number, int_number)))).matches(s)
}

pub fn escape_char(s: &mut Scanner<'_>) -> bool {
    any_of(&ESCAPES).matches(s)
}

pub fn string_char(s: &mut Scanner<'_>) -> bool {
    choice((none_of(&STRING_EXCLUDED), seq(('\\', escape_char)))).matches(s)
}

pub fn string(s: &mut Scanner<'_>) -> bool {
    seq(('"', many(string_char), '"')).matches(s)
}

pub fn boolean(s: &mut Scanner<'_>) -> bool {
    choice(("true", "false")).matches(s)
}

/// Any value, captured as a token
///
/// Alternatives are tried in this fixed order; objects and arrays start with
/// their own delimiters, so the order never changes what matches.
pub fn value(s: &mut Scanner<'_>) -> bool {
    choice((
        token(TokenKind::Number, number),
        token(TokenKind::String, string),
        token(TokenKind::Boolean, boolean),
        token(TokenKind::Object, object),
        token(TokenKind::Array, array),
    ))
    .matches(s)
}

/// Key and value are both arbitrary values; they are linked as two
/// consecutive children of the enclosing object
pub fn key_value(s: &mut Scanner<'_>) -> bool {
    seq((value, opt_spaces, ':', opt_spaces, value)).matches(s)
}

pub fn opt_key_values(s: &mut Scanner<'_>) -> bool {
    opt(seq((key_value, many(seq((comma_spaces, key_value)))))).matches(s)
}

pub fn opt_values(s: &mut Scanner<'_>) -> bool {
    opt(seq((value, many(seq((comma_spaces, value)))))).matches(s)
}

pub fn object(s: &mut Scanner<'_>) -> bool {
    seq(('{', opt_spaces, opt_key_values, opt_spaces, '}')).matches(s)
}

pub fn array(s: &mut Scanner<'_>) -> bool {
    seq(('[', opt_spaces, opt_values, opt_spaces, ']')).matches(s)
}

pub fn end_of_input(s: &mut Scanner<'_>) -> bool {
    if s.is_at_end() {
        true
    } else {
        s.record_failure();
        false
    }
}

/// The whole document: top-level values become children of the root frame
pub fn document(s: &mut Scanner<'_>) -> bool {
    seq((
        opt_spaces,
        value,
        many(seq((comma_spaces, value))),
        opt_spaces,
        end_of_input,
    ))
    .matches(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run a production and return how many bytes it consumed
    fn consumed(rule: fn(&mut Scanner<'_>) -> bool, input: &str) -> Option<usize> {
        let mut s = Scanner::new(input.as_bytes(), 0);
        if rule(&mut s) {
            Some(s.position())
        } else {
            assert_eq!(s.position(), 0, "failed rule must not move the cursor");
            assert_eq!(s.token_count(), 0, "failed rule must not leave tokens");
            None
        }
    }

    #[test]
    fn test_letter() {
        assert_eq!(consumed(letter, "a1"), Some(1));
        assert_eq!(consumed(letter, "1a"), None);
    }

    #[test]
    fn test_int_number() {
        assert_eq!(consumed(int_number, "0"), Some(1));
        assert_eq!(consumed(int_number, "120"), Some(3));
        // "01" stops after the leading zero
        assert_eq!(consumed(int_number, "01"), Some(1));
        assert_eq!(consumed(int_number, "-1"), None);
    }

    #[test]
    fn test_real_number() {
        assert_eq!(consumed(real_number, "0.5"), Some(3));
        assert_eq!(consumed(real_number, "10.25x"), Some(5));
        assert_eq!(consumed(real_number, "1."), None);
        assert_eq!(consumed(real_number, ".5"), None);
    }

    #[test]
    fn test_number() {
        assert_eq!(consumed(number, "-3.75"), Some(5));
        assert_eq!(consumed(number, "-0"), Some(2));
        assert_eq!(consumed(number, "7"), Some(1));
        assert_eq!(consumed(number, "-"), None);
        // No exponent syntax: stops before 'e'
        assert_eq!(consumed(number, "1e5"), Some(1));
    }

    #[test]
    fn test_string() {
        assert_eq!(consumed(string, r#""abc""#), Some(5));
        assert_eq!(consumed(string, r#""""#), Some(2));
        assert_eq!(consumed(string, r#""a\"b""#), Some(6));
        assert_eq!(consumed(string, r#""tab\there""#), Some(11));
        assert_eq!(consumed(string, "\"héllo\""), Some(8));
    }

    #[test]
    fn test_string_rejects() {
        assert_eq!(consumed(string, r#""abc"#), None);
        assert_eq!(consumed(string, "\"a\nb\""), None);
        assert_eq!(consumed(string, "\"a\rb\""), None);
        assert_eq!(consumed(string, r#""bad \x escape""#), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(consumed(boolean, "true"), Some(4));
        assert_eq!(consumed(boolean, "false"), Some(5));
        assert_eq!(consumed(boolean, "tru"), None);
    }

    #[test]
    fn test_separators() {
        assert_eq!(consumed(comma_spaces, ","), Some(1));
        assert_eq!(consumed(comma_spaces, " ,  "), Some(4));
        assert_eq!(consumed(comma_spaces, " \n\t"), Some(3));
        assert_eq!(consumed(comma_spaces, "x"), None);
    }

    #[test]
    fn test_value_creates_one_token() {
        let mut s = Scanner::new(b"[1, {\"a\": true}]", 0);
        assert!(value(&mut s));
        // array, 1, object, "a", true
        assert_eq!(s.token_count(), 5);
    }

    #[test]
    fn test_object_and_array() {
        assert_eq!(consumed(object, "{}"), Some(2));
        assert_eq!(consumed(object, "{ }"), Some(3));
        assert_eq!(consumed(object, r#"{"x":1 "y":2}"#), Some(13));
        assert_eq!(consumed(object, r#"{"x" : 1, "y" : 2}"#), Some(18));
        assert_eq!(consumed(array, "[]"), Some(2));
        assert_eq!(consumed(array, "[ 1 2\n3 ]"), Some(9));
    }

    #[test]
    fn test_object_and_array_reject() {
        assert_eq!(consumed(object, r#"{"x"}"#), None);
        assert_eq!(consumed(object, r#"{"x": 1"#), None);
        assert_eq!(consumed(array, "[1, ]"), None);
        assert_eq!(consumed(array, "[01]"), None);
        assert_eq!(consumed(array, "[1,,2]"), None);
    }

    #[test]
    fn test_document() {
        assert_eq!(consumed(document, "1"), Some(1));
        assert_eq!(consumed(document, "  1, 2 3  \n"), Some(11));
        assert_eq!(consumed(document, "01"), None);
        assert_eq!(consumed(document, "[1] x"), None);
        assert_eq!(consumed(document, ""), None);
        assert_eq!(consumed(document, "   "), None);
    }
}
