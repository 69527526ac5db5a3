//! Character class lookup tables for O(1) membership testing
//!
//! Every table is a 256-entry bitmap indexed by byte value, built at compile
//! time. The grammar only ever asks ASCII questions, so bytes >= 0x80 are
//! never members of a named class; they can still be matched by a negative
//! [`CharSet`].

/// Named character classes used by the scene markup grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `0`-`9`
    Digit,
    /// `1`-`9`
    NonZeroDigit,
    /// `A`-`Z` and `a`-`z`
    Letter,
    /// Space, tab, line feed, vertical tab, form feed, carriage return
    Space,
}

impl CharClass {
    /// Check if a byte belongs to this class
    #[inline(always)]
    pub fn contains(&self, b: u8) -> bool {
        CHAR_CLASSES.matches_class(*self, b)
    }

    /// Get a predicate function for bulk matching
    #[inline]
    pub fn predicate(&self) -> fn(u8) -> bool {
        match self {
            Self::Digit => |b| CHAR_CLASSES.is_digit(b),
            Self::NonZeroDigit => |b| CHAR_CLASSES.is_non_zero_digit(b),
            Self::Letter => |b| CHAR_CLASSES.is_letter(b),
            Self::Space => |b| CHAR_CLASSES.is_space(b),
        }
    }
}

/// Pre-computed character class lookup tables
#[derive(Clone, Copy, Debug)]
pub struct CharClassTables {
    /// Digit characters [0-9]
    pub digit: [bool; 256],

    /// Non-zero digit characters [1-9]
    pub non_zero_digit: [bool; 256],

    /// ASCII letters [a-zA-Z]
    pub letter: [bool; 256],

    /// Whitespace [ \t\n\v\f\r]
    pub space: [bool; 256],
}

impl CharClassTables {
    /// Create all character class tables at compile time
    pub const fn new() -> Self {
        let mut tables = Self {
            digit: [false; 256],
            non_zero_digit: [false; 256],
            letter: [false; 256],
            space: [false; 256],
        };

        let mut i = b'0';
        while i <= b'9' {
            tables.digit[i as usize] = true;
            if i != b'0' {
                tables.non_zero_digit[i as usize] = true;
            }
            i += 1;
        }

        i = b'a';
        while i <= b'z' {
            tables.letter[i as usize] = true;
            i += 1;
        }

        i = b'A';
        while i <= b'Z' {
            tables.letter[i as usize] = true;
            i += 1;
        }

        tables.space[b' ' as usize] = true;
        tables.space[b'\t' as usize] = true;
        tables.space[b'\n' as usize] = true;
        tables.space[0x0B_usize] = true; // vertical tab
        tables.space[0x0C_usize] = true; // form feed
        tables.space[b'\r' as usize] = true;

        tables
    }

    /// Check if byte is a digit [0-9]
    #[inline(always)]
    pub fn is_digit(&self, b: u8) -> bool {
        self.digit[b as usize]
    }

    /// Check if byte is a non-zero digit [1-9]
    #[inline(always)]
    pub fn is_non_zero_digit(&self, b: u8) -> bool {
        self.non_zero_digit[b as usize]
    }

    /// Check if byte is an ASCII letter
    #[inline(always)]
    pub fn is_letter(&self, b: u8) -> bool {
        self.letter[b as usize]
    }

    /// Check if byte is whitespace
    #[inline(always)]
    pub fn is_space(&self, b: u8) -> bool {
        self.space[b as usize]
    }

    /// Check if a byte matches a character class
    #[inline(always)]
    pub fn matches_class(&self, class: CharClass, b: u8) -> bool {
        match class {
            CharClass::Digit => self.is_digit(b),
            CharClass::NonZeroDigit => self.is_non_zero_digit(b),
            CharClass::Letter => self.is_letter(b),
            CharClass::Space => self.is_space(b),
        }
    }
}

impl Default for CharClassTables {
    fn default() -> Self {
        Self::new()
    }
}

const TABLES: CharClassTables = CharClassTables::new();

/// Global character class tables
pub static CHAR_CLASSES: CharClassTables = TABLES;

/// An arbitrary byte set, built from the list of its members
///
/// Backs the `any_of` / `none_of` combinators. Built in a `const` context so
/// grammar sets cost nothing at parse time:
///
/// ```rust
/// use scenemark::engine::char_class::CharSet;
///
/// const ESCAPES: CharSet = CharSet::from_bytes(b"\"\\tnvfr");
/// assert!(ESCAPES.contains(b'n'));
/// assert!(!ESCAPES.contains(b'x'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharSet {
    table: [bool; 256],
}

impl CharSet {
    /// Build a set containing exactly the given bytes
    pub const fn from_bytes(members: &[u8]) -> Self {
        let mut table = [false; 256];
        let mut i = 0;
        while i < members.len() {
            table[members[i] as usize] = true;
            i += 1;
        }
        Self { table }
    }

    /// Build a set from a named class
    pub const fn from_class(class: CharClass) -> Self {
        let table = match class {
            CharClass::Digit => TABLES.digit,
            CharClass::NonZeroDigit => TABLES.non_zero_digit,
            CharClass::Letter => TABLES.letter,
            CharClass::Space => TABLES.space,
        };
        Self { table }
    }

    /// Check membership
    #[inline(always)]
    pub fn contains(&self, b: u8) -> bool {
        self.table[b as usize]
    }
}

/// Get the UTF-8 character length from the first byte
///
/// Invalid lead bytes report a length of 1 so callers always make progress.
#[inline(always)]
pub fn utf8_char_len(b: u8) -> usize {
    if b < 0x80 {
        1
    } else if b < 0xE0 {
        2
    } else if b < 0xF0 {
        3
    } else {
        4
    }
}
