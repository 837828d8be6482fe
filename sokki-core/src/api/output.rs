//! Decision and outcome types returned to the host.

use serde::{Deserialize, Serialize};

/// Which stage produced a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// An exact rule from the active profile.
    Rule,
    /// A similar word recorded in correction history.
    History,
    /// The built-in abbreviation table.
    Abbreviation,
    /// A delete-backward rolled the previous replacement back.
    Reversal,
}

/// The verdict of one engine event.
///
/// Offsets are char offsets into the text the host reported, and describe
/// the span the host must rewrite. They are produced before the edit is
/// applied, so they always refer to the pre-edit text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Leave the text alone.
    NoAction,
    /// Rewrite the span `[from, to)` with `replacement`.
    Replace {
        from: usize,
        to: usize,
        replacement: String,
        source: MatchSource,
    },
    /// Offer `pattern -> replacement` to the learning subsystem. The text
    /// is not touched.
    Suggest { pattern: String, replacement: String },
}

impl Default for Decision {
    fn default() -> Self {
        Self::NoAction
    }
}

impl Decision {
    pub fn is_no_action(&self) -> bool {
        matches!(self, Self::NoAction)
    }

    pub fn is_replace(&self) -> bool {
        matches!(self, Self::Replace { .. })
    }
}

/// Replacement surface state for the host to apply: the full rewritten
/// text and where the cursor lands in it, both in chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub text: String,
    pub cursor: usize,
}

/// A suggestion pair that just crossed the promotion threshold. The host
/// should ask the user whether to make it a permanent rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionPrompt {
    pub pattern: String,
    pub replacement: String,
}

/// Everything one engine event produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub decision: Decision,
    /// Present when the host must rewrite its text surface.
    pub edit: Option<TextEdit>,
    /// Present when a suggestion pair is due for a promotion prompt.
    pub prompt: Option<PromotionPrompt>,
}

impl Outcome {
    pub(crate) fn no_action() -> Self {
        Self::default()
    }
}
