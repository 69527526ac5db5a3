//! Token-capturing parse state
//!
//! [`Scanner`] wraps a [`Cursor`] with the token arena and a stack of open
//! container frames. Each frame holds the "last child" slot of the object or
//! array currently being parsed; frame 0 is the document root. Its
//! checkpoint covers the cursor position, the arena length and the innermost
//! frame's slot, which is everything a failed rule could have touched.

use crate::engine::{Arena, ArenaMark, Backtrack, Cursor, Rule, Scan};

use super::token::{Token, TokenId, TokenKind, TokenValue};

/// Snapshot of a [`Scanner`]
#[derive(Debug, Clone, Copy)]
pub struct ScanCheckpoint {
    pos: usize,
    mark: ArenaMark,
    last: Option<TokenId>,
}

/// Parse state for the scene markup grammar
#[derive(Debug)]
pub struct Scanner<'i> {
    cursor: Cursor<'i>,
    tokens: Arena<Token>,
    /// Last-child slot of every open container, root first
    frames: Vec<Option<TokenId>>,
    /// Maximum container nesting (0 = unlimited)
    max_depth: usize,
    /// Offset of the container that broke the nesting limit
    nesting_exceeded_at: Option<usize>,
}

/// Everything the AST builder needs once the grammar has accepted the input
#[derive(Debug)]
pub struct ScanOutput {
    /// All live tokens
    pub tokens: Arena<Token>,
    /// Newest top-level token
    pub root_last: Option<TokenId>,
}

impl<'i> Scanner<'i> {
    /// Create a scanner at the start of `input`
    pub fn new(input: &'i [u8], max_depth: usize) -> Self {
        Self {
            cursor: Cursor::new(input),
            tokens: Arena::for_input(input.len()),
            frames: vec![None],
            max_depth,
            nesting_exceeded_at: None,
        }
    }

    /// Run `rule` and, if it matches, record a token of `kind` for the span
    /// it consumed
    ///
    /// The new token is linked behind the enclosing frame's current last
    /// child and becomes the new last child. Containers open their own frame
    /// for the duration of `rule`. On failure nothing is allocated or linked
    /// and the state is exactly as before the call.
    pub fn capture<R: Rule<Self>>(&mut self, kind: TokenKind, rule: &R) -> bool {
        if self.is_aborted() {
            return false;
        }

        let checkpoint = self.checkpoint();
        let begin = self.cursor.position();

        if kind.is_container() {
            // frames[0] is the root, so the new container sits at this depth
            let depth = self.frames.len();
            if self.max_depth > 0 && depth > self.max_depth {
                self.nesting_exceeded_at = Some(begin);
                return false;
            }
            self.frames.push(None);
        }

        let matched = rule.matches(self);

        let last_child = if kind.is_container() {
            self.frames.pop().flatten()
        } else {
            None
        };

        if !matched {
            self.restore(checkpoint);
            return false;
        }

        let end = self.cursor.position();
        let value =
            match TokenValue::from_span(kind, self.cursor.source(), begin, end, last_child) {
                Some(value) => value,
                None => {
                    self.restore(checkpoint);
                    self.record_failure();
                    return false;
                }
            };

        let previous = self.current_last();
        let id = self.tokens.alloc(Token { value, previous });
        self.set_current_last(Some(id));
        true
    }

    /// Furthest offset at which any primitive failed
    #[inline]
    pub fn furthest_failure(&self) -> usize {
        self.cursor.furthest_failure()
    }

    /// Offset of the container that broke the nesting limit, if any
    #[inline]
    pub fn nesting_exceeded_at(&self) -> Option<usize> {
        self.nesting_exceeded_at
    }

    /// Number of tokens currently alive
    #[inline]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Current nesting depth (0 at the document root)
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Hand the token arena over to the AST builder
    pub fn finish(self) -> ScanOutput {
        let root_last = self.frames.first().copied().flatten();
        ScanOutput {
            tokens: self.tokens,
            root_last,
        }
    }

    #[inline]
    fn current_last(&self) -> Option<TokenId> {
        self.frames.last().copied().flatten()
    }

    #[inline]
    fn set_current_last(&mut self, last: Option<TokenId>) {
        if let Some(slot) = self.frames.last_mut() {
            *slot = last;
        }
    }
}

impl Backtrack for Scanner<'_> {
    type Checkpoint = ScanCheckpoint;

    #[inline]
    fn checkpoint(&self) -> ScanCheckpoint {
        ScanCheckpoint {
            pos: self.cursor.checkpoint(),
            mark: self.tokens.mark(),
            last: self.current_last(),
        }
    }

    #[inline]
    fn restore(&mut self, checkpoint: ScanCheckpoint) {
        self.cursor.restore(checkpoint.pos);
        self.tokens.truncate(checkpoint.mark);
        self.set_current_last(checkpoint.last);
    }
}

impl Scan for Scanner<'_> {
    #[inline]
    fn input(&self) -> &[u8] {
        self.cursor.input()
    }

    #[inline]
    fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    fn bump(&mut self, n: usize) {
        self.cursor.bump(n);
    }

    #[inline]
    fn record_failure(&mut self) {
        self.cursor.record_failure();
    }

    #[inline]
    fn is_aborted(&self) -> bool {
        self.nesting_exceeded_at.is_some()
    }
}

/// A capture as a composable rule; see [`Scanner::capture`]
#[derive(Debug, Clone, Copy)]
pub struct Capture<R> {
    kind: TokenKind,
    rule: R,
}

impl<'i, R: Rule<Scanner<'i>>> Rule<Scanner<'i>> for Capture<R> {
    #[inline]
    fn matches(&self, state: &mut Scanner<'i>) -> bool {
        state.capture(self.kind, &self.rule)
    }
}

/// Capture the span matched by `rule` as a token of `kind`
#[inline]
pub fn token<R>(kind: TokenKind, rule: R) -> Capture<R> {
    Capture { kind, rule }
}
