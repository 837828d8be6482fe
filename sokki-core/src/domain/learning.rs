//! Usage tracking that turns repeated suggestions into promotion prompts.

use std::collections::HashMap;

use tracing::debug;

use crate::api::PromotionPrompt;

/// Counts how often each `(pattern, replacement)` pair was suggested or
/// applied, and decides when the user should be offered a permanent rule.
///
/// A pair prompts once it has been observed strictly more than `threshold`
/// times, then goes quiet until a whole further threshold window passes, so
/// a dismissed prompt does not nag on every keystroke. Accepted pairs never
/// prompt again.
#[derive(Debug)]
pub(crate) struct SuggestionTracker {
    threshold: u32,
    pairs: HashMap<(String, String), PairUsage>,
}

#[derive(Debug, Default)]
struct PairUsage {
    count: u32,
    /// Counter value at the moment the pair last prompted.
    prompted_at: Option<u32>,
    /// Set once the user accepts the pair as a rule.
    resolved: bool,
}

impl SuggestionTracker {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            pairs: HashMap::new(),
        }
    }

    /// Record one observation of the pair. Returns a prompt when the pair
    /// just crossed a fresh threshold window.
    pub fn observe(&mut self, pattern: &str, replacement: &str) -> Option<PromotionPrompt> {
        let usage = self
            .pairs
            .entry((pattern.to_string(), replacement.to_string()))
            .or_default();
        usage.count += 1;
        if usage.resolved {
            return None;
        }

        let due = match usage.prompted_at {
            None => usage.count > self.threshold,
            Some(at) => usage.count > at + self.threshold,
        };
        if !due {
            return None;
        }

        usage.prompted_at = Some(usage.count);
        debug!(pattern, replacement, count = usage.count, "promotion prompt due");
        Some(PromotionPrompt {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        })
    }

    /// The user made the pair a permanent rule; it must never prompt again.
    pub fn mark_accepted(&mut self, pattern: &str, replacement: &str) {
        let usage = self
            .pairs
            .entry((pattern.to_string(), replacement.to_string()))
            .or_default();
        usage.resolved = true;
    }

    /// The user declined the pair for now. `observe` already recorded the
    /// prompt position, so the pair stays quiet for another window without
    /// further bookkeeping.
    pub fn mark_dismissed(&mut self, _pattern: &str, _replacement: &str) {}

    /// Current observation count for a pair.
    #[cfg(test)]
    pub fn count(&self, pattern: &str, replacement: &str) -> u32 {
        self.pairs
            .get(&(pattern.to_string(), replacement.to_string()))
            .map(|u| u.count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fires_when_count_exceeds_threshold() {
        let mut tracker = SuggestionTracker::new(5);
        for _ in 0..5 {
            assert!(tracker.observe("brb", "be right back").is_none());
        }
        let prompt = tracker.observe("brb", "be right back");
        assert_eq!(
            prompt,
            Some(PromotionPrompt {
                pattern: "brb".to_string(),
                replacement: "be right back".to_string(),
            })
        );
        assert_eq!(tracker.count("brb", "be right back"), 6);
    }

    #[test]
    fn test_prompt_waits_a_full_window_before_repeating() {
        let mut tracker = SuggestionTracker::new(5);
        for _ in 0..6 {
            tracker.observe("brb", "be right back");
        }
        // Prompted at 6; counts 7 through 11 stay quiet.
        for _ in 0..5 {
            assert!(tracker.observe("brb", "be right back").is_none());
        }
        assert!(tracker.observe("brb", "be right back").is_some());
    }

    #[test]
    fn test_accepted_pair_never_prompts_again() {
        let mut tracker = SuggestionTracker::new(5);
        for _ in 0..6 {
            tracker.observe("brb", "be right back");
        }
        tracker.mark_accepted("brb", "be right back");
        for _ in 0..20 {
            assert!(tracker.observe("brb", "be right back").is_none());
        }
    }

    #[test]
    fn test_pairs_are_tracked_independently() {
        let mut tracker = SuggestionTracker::new(2);
        for _ in 0..3 {
            tracker.observe("brb", "be right back");
        }
        // Same pattern, different replacement: separate counter.
        assert!(tracker.observe("brb", "bathroom break").is_none());
        assert_eq!(tracker.count("brb", "bathroom break"), 1);
    }

    #[test]
    fn test_threshold_one_prompts_on_second_observation() {
        let mut tracker = SuggestionTracker::new(1);
        assert!(tracker.observe("omg", "oh my god").is_none());
        assert!(tracker.observe("omg", "oh my god").is_some());
    }
}
