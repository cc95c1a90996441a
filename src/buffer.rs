/// Editable single-line buffer.
///
/// Text is stored as code points and the cursor indexes into them, so
/// `0 <= cursor <= len` holds after every operation. The buffer does no I/O;
/// redrawing is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a code point at the cursor and advance past it
    pub fn add(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete the code point before the cursor (backspace)
    pub fn remove(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    /// Delete the code point under the cursor (forward delete)
    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    /// Move to the start of the previous word.
    ///
    /// Whitespace directly before the cursor is skipped first, then the run
    /// of non-whitespace.
    pub fn move_left_word(&mut self) {
        self.cursor = self.word_start_before_cursor();
    }

    /// Move at least one position right, then stop on the next whitespace
    /// or at the end of the line.
    pub fn move_right_word(&mut self) {
        if self.cursor >= self.chars.len() {
            return;
        }
        loop {
            self.cursor += 1;
            match self.chars.get(self.cursor) {
                Some(c) if c.is_whitespace() => break,
                Some(_) => {}
                None => break,
            }
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Delete the word before the cursor (Ctrl+W)
    pub fn delete_word(&mut self) {
        let start = self.word_start_before_cursor();
        self.chars.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Delete everything from the start of the line up to the cursor (Ctrl+U)
    pub fn delete_before(&mut self) {
        self.chars.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Delete everything from the cursor to the end of the line (Ctrl+K)
    pub fn delete_remaining(&mut self) {
        self.chars.truncate(self.cursor);
    }

    /// Replace the whole content and put the cursor at the end
    pub fn replace<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.chars.clear();
        self.chars.extend(content);
        self.cursor = self.chars.len();
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of code points
    pub fn size(&self) -> usize {
        self.chars.len()
    }

    /// Cursor position in code points
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of code points after the cursor
    pub fn remaining(&self) -> usize {
        self.chars.len() - self.cursor
    }

    /// Raw code points, e.g. for saving a draft
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    fn word_start_before_cursor(&self) -> usize {
        let mut pos = self.cursor;
        while pos > 0 && self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }
}

impl std::fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| std::fmt::Write::write_char(f, *c))
    }
}
