/// A byte cursor over markup text with position tracking.
///
/// All markup delimiters the engine cares about are ASCII, so the cursor works
/// on bytes and every position it stops at is a valid char boundary.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The text being scanned.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at `start` (clamped to the end of `s`).
    pub fn new(s: &'a str, start: usize) -> Self {
        Self {
            s,
            i: start.min(s.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes, stopping at the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Moves to the next occurrence of `pat` at or after the cursor.
    ///
    /// Returns `false` and moves to the end of input if there is none.
    pub fn seek(&mut self, pat: &str) -> bool {
        match self.s.get(self.i..).and_then(|rest| rest.find(pat)) {
            Some(rel) => {
                self.i += rel;
                true
            }
            None => {
                self.i = self.s.len();
                false
            }
        }
    }

    /// Consumes bytes while `pred` holds and returns the consumed slice.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.s.get(start..self.i).unwrap_or_default()
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }
}
