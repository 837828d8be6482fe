//! Single-shot reversal of the most recent replacement.

use tracing::debug;

use crate::domain::segment;

/// Everything needed to roll one replacement back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UndoState {
    /// The word as the user typed it.
    original_word: String,
    /// The text the engine put in its place.
    applied_text: String,
}

/// The rewritten surface produced by a successful reversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reversal {
    pub text: String,
    pub cursor: usize,
    /// Char offset where the restored word begins.
    pub from: usize,
    pub restored: String,
}

/// Holds at most one pending [`UndoState`].
///
/// A replacement arms the guard; the very next delete-backward fires it if
/// the cursor still sits at the end of the applied text; any other event
/// disarms it. Firing and mismatching both consume the state, so a
/// reversal can never replay.
#[derive(Debug, Default)]
pub(crate) struct ReversalGuard {
    pending: Option<UndoState>,
}

impl ReversalGuard {
    pub fn arm(&mut self, original_word: String, applied_text: String) {
        self.pending = Some(UndoState {
            original_word,
            applied_text,
        });
    }

    pub fn invalidate(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending undo invalidated");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Attempt the reversal for a delete-backward at `cursor`. The pending
    /// state is consumed whether or not the surrounding text still matches.
    pub fn consume(&mut self, text: &str, cursor: usize) -> Option<Reversal> {
        let state = self.pending.take()?;
        let applied_chars = segment::char_len(&state.applied_text);
        if cursor > segment::char_len(text) || cursor < applied_chars {
            debug!("undo skipped: cursor no longer fits the applied text");
            return None;
        }
        if !segment::preceding_matches(text, cursor, &state.applied_text) {
            debug!("undo skipped: text before cursor diverged");
            return None;
        }

        let cursor_byte = segment::byte_of_char(text, cursor);
        let start_byte = cursor_byte - state.applied_text.len();
        let mut restored_text = String::with_capacity(
            text.len() - state.applied_text.len() + state.original_word.len(),
        );
        restored_text.push_str(&text[..start_byte]);
        restored_text.push_str(&state.original_word);
        restored_text.push_str(&text[cursor_byte..]);

        let from = cursor - applied_chars;
        Some(Reversal {
            text: restored_text,
            cursor: from + segment::char_len(&state.original_word),
            from,
            restored: state.original_word,
        })
    }
}
