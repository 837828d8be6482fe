//! Built-in table of common lowercase abbreviations.

use std::collections::HashMap;

/// Fixed abbreviation expansions, consulted after user rules and learned
/// history so either of those can shadow an entry.
///
/// Lookups apply a lowercase-only gate: a word typed with any uppercase in
/// it ("ASAP", "Btw") is assumed deliberate and left alone.
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    entries: HashMap<&'static str, &'static str>,
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AbbreviationTable {
    pub fn new() -> Self {
        let mut entries = HashMap::new();

        // Speed shorthands
        entries.insert("asap", "as soon as possible");
        entries.insert("brb", "be right back");
        entries.insert("omw", "on my way");
        entries.insert("ttyl", "talk to you later");

        // Conversational fillers
        entries.insert("btw", "by the way");
        entries.insert("fyi", "for your information");
        entries.insert("imo", "in my opinion");
        entries.insert("imho", "in my humble opinion");
        entries.insert("tbh", "to be honest");
        entries.insert("idk", "I don't know");
        entries.insert("iirc", "if I recall correctly");
        entries.insert("afaik", "as far as I know");
        entries.insert("fwiw", "for what it's worth");

        // Courtesies
        entries.insert("thx", "thanks");
        entries.insert("np", "no problem");
        entries.insert("lmk", "let me know");
        entries.insert("nvm", "never mind");

        Self { entries }
    }

    /// Expansion for `word`, or `None` when the word is absent or fails the
    /// lowercase gate.
    pub fn lookup(&self, word: &str) -> Option<&'static str> {
        if word.is_empty() || !word.chars().all(|c| c.is_lowercase()) {
            return None;
        }
        self.entries.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
