//! Cursor and backtracking primitives
//!
//! The engine works on a fully buffered byte slice. Every primitive match
//! either succeeds and advances the cursor past the bytes it consumed, or
//! fails and leaves the cursor exactly where it was. Composite rules rely on
//! [`Backtrack`] to extend that guarantee to any amount of speculative work.

/// State that can be snapshotted and rolled back
///
/// A checkpoint must capture everything a rule can mutate, so that
/// `restore(checkpoint())` after any failed attempt is indistinguishable from
/// the attempt never having happened.
pub trait Backtrack {
    /// Snapshot type
    type Checkpoint: Copy;

    /// Capture the current state
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Roll back to a previously captured state
    fn restore(&mut self, checkpoint: Self::Checkpoint);
}

/// Byte-level access to the input for primitive matchers
///
/// Implemented by [`Cursor`] and by any richer parse state that embeds one.
pub trait Scan: Backtrack {
    /// The whole input buffer
    fn input(&self) -> &[u8];

    /// Current byte offset
    fn position(&self) -> usize;

    /// Advance by `n` bytes; callers guarantee the bytes exist
    fn bump(&mut self, n: usize);

    /// Note that a primitive failed at the current position
    fn record_failure(&mut self);

    /// Whether the parse has been aborted and all rules should fail fast
    #[inline]
    fn is_aborted(&self) -> bool {
        false
    }

    /// Byte at the current position
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input().get(self.position()).copied()
    }

    /// Unconsumed input
    #[inline]
    fn rest(&self) -> &[u8] {
        &self.input()[self.position()..]
    }

    /// Whether all input has been consumed
    #[inline]
    fn is_at_end(&self) -> bool {
        self.position() >= self.input().len()
    }

    /// Match a single byte satisfying `predicate`
    #[inline]
    fn eat_if(&mut self, predicate: impl Fn(u8) -> bool) -> bool {
        match self.peek() {
            Some(b) if predicate(b) => {
                self.bump(1);
                true
            }
            _ => {
                self.record_failure();
                false
            }
        }
    }

    /// Match an exact byte sequence
    #[inline]
    fn eat_literal(&mut self, pattern: &[u8]) -> bool {
        if self.rest().starts_with(pattern) {
            self.bump(pattern.len());
            true
        } else {
            self.record_failure();
            false
        }
    }

    /// Consume bytes while `predicate` holds, returning how many were eaten
    ///
    /// Never fails; consuming nothing is a valid outcome.
    #[inline]
    fn skip_while(&mut self, predicate: impl Fn(u8) -> bool) -> usize {
        let rest = self.rest();
        let count = rest.iter().position(|&b| !predicate(b)).unwrap_or(rest.len());
        self.bump(count);
        count
    }
}

/// A position into a fully buffered input
#[derive(Debug, Clone)]
pub struct Cursor<'i> {
    input: &'i [u8],
    pos: usize,
    /// Furthest offset at which a primitive failed
    furthest: usize,
}

impl<'i> Cursor<'i> {
    /// Create a cursor at the start of `input`
    #[inline]
    pub fn new(input: &'i [u8]) -> Self {
        Self {
            input,
            pos: 0,
            furthest: 0,
        }
    }

    /// The input with its original lifetime
    #[inline]
    pub fn source(&self) -> &'i [u8] {
        self.input
    }

    /// Slice of the input between two offsets
    #[inline]
    pub fn slice(&self, begin: usize, end: usize) -> &'i [u8] {
        &self.input[begin..end]
    }

    /// Furthest offset at which any primitive failed
    ///
    /// This is the usual PEG approximation of "where the error is": the
    /// parser got at least this far before every alternative gave up.
    #[inline]
    pub fn furthest_failure(&self) -> usize {
        self.furthest
    }
}

impl Backtrack for Cursor<'_> {
    type Checkpoint = usize;

    #[inline]
    fn checkpoint(&self) -> usize {
        self.pos
    }

    #[inline]
    fn restore(&mut self, checkpoint: usize) {
        self.pos = checkpoint;
    }
}

impl Scan for Cursor<'_> {
    #[inline]
    fn input(&self) -> &[u8] {
        self.input
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn bump(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.input.len());
        self.pos += n;
    }

    #[inline]
    fn record_failure(&mut self) {
        self.furthest = self.furthest.max(self.pos);
    }
}
