//! Parser combinators
//!
//! A [`Rule`] is anything that can attempt a match against a [`Scan`] state
//! and report success. Plain functions `fn(&mut S) -> bool` are rules, as are
//! `char` and `&str` literals, [`CharClass`]es, and the combinator structs in
//! this module, so grammars read close to their EBNF:
//!
//! ```rust
//! use scenemark::engine::{combinators::*, CharClass, Cursor, Scan};
//!
//! fn digits(s: &mut Cursor<'_>) -> bool {
//!     seq((CharClass::Digit, many(CharClass::Digit))).matches(s)
//! }
//!
//! let mut cursor = Cursor::new(b"-12.5");
//! let number = seq((opt('-'), digits, opt(seq(('.', digits)))));
//! assert!(number.matches(&mut cursor));
//! assert!(cursor.is_at_end());
//! ```
//!
//! Every combinator is transactional: when it fails, the state is restored
//! to the checkpoint taken before it ran, regardless of what its sub-rules
//! did. Repetition is an explicit loop, so long runs never grow the stack.

use super::char_class::{CharClass, CharSet};
use super::cursor::Scan;

/// A grammar rule over the parse state `S`
pub trait Rule<S: ?Sized> {
    /// Attempt a match; on failure the state must be left unchanged
    fn matches(&self, state: &mut S) -> bool;
}

impl<S, F> Rule<S> for F
where
    F: Fn(&mut S) -> bool,
{
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        self(state)
    }
}

/// A `char` matches its UTF-8 encoding
impl<S: Scan> Rule<S> for char {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        let mut buf = [0u8; 4];
        state.eat_literal(self.encode_utf8(&mut buf).as_bytes())
    }
}

/// A string slice matches literally
impl<S: Scan> Rule<S> for &str {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        state.eat_literal(self.as_bytes())
    }
}

impl<S: Scan> Rule<S> for CharClass {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        let class = *self;
        state.eat_if(|b| class.contains(b))
    }
}

/// Match one byte that is a member of the set
#[derive(Debug, Clone, Copy)]
pub struct AnyOf<'a>(pub &'a CharSet);

impl<S: Scan> Rule<S> for AnyOf<'_> {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        let set = self.0;
        state.eat_if(|b| set.contains(b))
    }
}

/// Match one byte that is not a member of the set
///
/// End of input never matches.
#[derive(Debug, Clone, Copy)]
pub struct NoneOf<'a>(pub &'a CharSet);

impl<S: Scan> Rule<S> for NoneOf<'_> {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        let set = self.0;
        state.eat_if(|b| !set.contains(b))
    }
}

/// Ordered sequence: every element must match, in order
#[derive(Debug, Clone, Copy)]
pub struct Seq<T>(pub T);

/// Ordered choice: the first alternative that matches wins
#[derive(Debug, Clone, Copy)]
pub struct Choice<T>(pub T);

macro_rules! impl_tuple_rules {
    ($($name:ident),+) => {
        impl<S: Scan, $($name: Rule<S>),+> Rule<S> for Seq<($($name,)+)> {
            #[inline]
            #[allow(non_snake_case)]
            fn matches(&self, state: &mut S) -> bool {
                if state.is_aborted() {
                    return false;
                }
                let checkpoint = state.checkpoint();
                let ($($name,)+) = &self.0;
                $(
                    if !$name.matches(state) {
                        state.restore(checkpoint);
                        return false;
                    }
                )+
                true
            }
        }

        impl<S: Scan, $($name: Rule<S>),+> Rule<S> for Choice<($($name,)+)> {
            #[inline]
            #[allow(non_snake_case)]
            fn matches(&self, state: &mut S) -> bool {
                let checkpoint = state.checkpoint();
                let ($($name,)+) = &self.0;
                $(
                    if $name.matches(state) {
                        return true;
                    }
                    state.restore(checkpoint);
                )+
                false
            }
        }
    };
}

impl_tuple_rules!(A, B);
impl_tuple_rules!(A, B, C);
impl_tuple_rules!(A, B, C, D);
impl_tuple_rules!(A, B, C, D, E);
impl_tuple_rules!(A, B, C, D, E, F);
impl_tuple_rules!(A, B, C, D, E, F, G);
impl_tuple_rules!(A, B, C, D, E, F, G, H);

/// Kleene star: match the inner rule as many times as possible
///
/// Always succeeds. A failing final iteration is rolled back, leaving the
/// state at the end of the last successful one. An iteration that succeeds
/// without consuming input ends the loop, since repeating it would never
/// terminate.
#[derive(Debug, Clone, Copy)]
pub struct Many<R>(pub R);

impl<S: Scan, R: Rule<S>> Rule<S> for Many<R> {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        while !state.is_aborted() {
            let checkpoint = state.checkpoint();
            let before = state.position();
            if !self.0.matches(state) {
                state.restore(checkpoint);
                break;
            }
            if state.position() == before {
                break;
            }
        }
        true
    }
}

/// Optional: match the inner rule zero or one time; always succeeds
#[derive(Debug, Clone, Copy)]
pub struct Opt<R>(pub R);

impl<S: Scan, R: Rule<S>> Rule<S> for Opt<R> {
    #[inline]
    fn matches(&self, state: &mut S) -> bool {
        let checkpoint = state.checkpoint();
        if !self.0.matches(state) {
            state.restore(checkpoint);
        }
        true
    }
}

/// Sequence of rules given as a tuple
#[inline]
pub fn seq<T>(rules: T) -> Seq<T> {
    Seq(rules)
}

/// Ordered choice between rules given as a tuple
#[inline]
pub fn choice<T>(rules: T) -> Choice<T> {
    Choice(rules)
}

/// Zero or more repetitions
#[inline]
pub fn many<R>(rule: R) -> Many<R> {
    Many(rule)
}

/// Zero or one occurrence
#[inline]
pub fn opt<R>(rule: R) -> Opt<R> {
    Opt(rule)
}

/// One byte from the set
#[inline]
pub fn any_of(set: &CharSet) -> AnyOf<'_> {
    AnyOf(set)
}

/// One byte outside the set
#[inline]
pub fn none_of(set: &CharSet) -> NoneOf<'_> {
    NoneOf(set)
}

/// Extension methods for composing rules fluently
pub trait RuleExt: Sized {
    /// Sequence: `self` then `other`
    fn then<B>(self, other: B) -> Seq<(Self, B)> {
        Seq((self, other))
    }

    /// Alternative: `self` or else `other`
    fn or<B>(self, other: B) -> Choice<(Self, B)> {
        Choice((self, other))
    }

    /// Zero or more repetitions
    fn many(self) -> Many<Self> {
        Many(self)
    }

    /// Zero or one occurrence
    fn optional(self) -> Opt<Self> {
        Opt(self)
    }
}

impl<T> RuleExt for T {}
