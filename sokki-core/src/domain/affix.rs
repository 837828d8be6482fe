//! Fixed affix lists for the normalization stage.
//!
//! Stripping never rewrites text on its own. It only produces the
//! suggestion candidates that feed the learning subsystem, so the lists err
//! on the side of common derivational affixes rather than completeness.

/// Checked in order; overlapping prefixes list the longer form first.
const PREFIXES: &[&str] = &[
    "under", "un", "re", "dis", "pre", "mis", "non", "over", "semi", "anti",
];

const SUFFIXES: &[&str] = &[
    "ing", "tion", "sion", "ness", "ment", "able", "ible", "ful", "less", "ly", "ed",
];

/// Characters that must remain once an affix is stripped.
const MIN_STEM_CHARS: usize = 2;

/// Strip the first matching affix from `word`, prefixes before suffixes.
/// Returns `None` when no affix matches or the remaining stem would be too
/// short to mean anything.
pub fn normalize(word: &str) -> Option<String> {
    for prefix in PREFIXES {
        if let Some(stem) = word.strip_prefix(prefix) {
            if stem.chars().count() >= MIN_STEM_CHARS {
                return Some(stem.to_string());
            }
        }
    }
    for suffix in SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= MIN_STEM_CHARS {
                return Some(stem.to_string());
            }
        }
    }
    None
}
