//! Word extraction around the cursor and in-place replacement math.
//!
//! Every offset crossing this module boundary is a character (code point)
//! offset, never a byte offset. Hosts working on UTF-16 or UTF-8 surfaces
//! can map code points losslessly, which keeps the cursor honest on
//! multi-byte input. Byte offsets appear only inside this module, where the
//! two are converted at a single seam.

/// Characters that mark the word before them as finalized.
pub(crate) fn is_finalizing(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?')
}

/// Total code points in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the code point at `char_offset`, or `text.len()` when the
/// offset points one past the end.
pub(crate) fn byte_of_char(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Whether the text immediately before `cursor` is exactly `expected`.
pub(crate) fn preceding_matches(text: &str, cursor: usize, expected: &str) -> bool {
    if cursor > char_len(text) {
        return false;
    }
    text[..byte_of_char(text, cursor)].ends_with(expected)
}

/// The text surrounding the word currently being typed.
///
/// The word runs from the last whitespace before the cursor (or the start
/// of the text) up to the cursor. Text after the cursor is carried verbatim
/// and never inspected beyond its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordContext {
    head: String,
    word: String,
    tail: String,
    word_start: usize,
}

impl WordContext {
    /// Split `text` at `cursor` (a char offset) and isolate the word being
    /// typed. Returns `None` when the cursor lies outside the text.
    pub fn extract(text: &str, cursor: usize) -> Option<Self> {
        if cursor > char_len(text) {
            return None;
        }
        let (before, after) = text.split_at(byte_of_char(text, cursor));

        // Byte index just past the last whitespace before the cursor.
        let word_begin = before
            .char_indices()
            .filter(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .last()
            .unwrap_or(0);

        let head = before[..word_begin].to_string();
        let word_start = char_len(&head);
        Some(Self {
            head,
            word: before[word_begin..].to_string(),
            tail: after.to_string(),
            word_start,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn word_chars(&self) -> usize {
        char_len(&self.word)
    }

    /// Char offset where the word begins.
    pub fn word_start(&self) -> usize {
        self.word_start
    }

    /// Char offset of the cursor. The cursor always sits at the end of the
    /// word by construction.
    pub fn cursor(&self) -> usize {
        self.word_start + self.word_chars()
    }

    /// First character after the cursor, if any.
    pub fn next_char(&self) -> Option<char> {
        self.tail.chars().next()
    }

    /// Whether the character right after the cursor finalizes the word.
    pub fn is_word_finalized(&self) -> bool {
        self.next_char().is_some_and(is_finalizing)
    }

    /// Rebuild the full text with `replacement` in place of the word.
    /// Returns the new text and the char offset for the cursor, which lands
    /// right after the replacement.
    pub fn apply(&self, replacement: &str) -> (String, usize) {
        let mut text =
            String::with_capacity(self.head.len() + replacement.len() + self.tail.len());
        text.push_str(&self.head);
        text.push_str(replacement);
        text.push_str(&self.tail);
        (text, self.word_start + char_len(replacement))
    }
}
