//! The engine facade hosts talk to.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::config::Config;
use crate::api::input::ControlKey;
use crate::api::output::{Decision, MatchSource, Outcome, PromotionPrompt, TextEdit};
use crate::domain::learning::SuggestionTracker;
use crate::domain::pipeline::MatchPipeline;
use crate::domain::segment::WordContext;
use crate::domain::undo::ReversalGuard;
use crate::store::{ChangeFlag, HistoryStore, Rule, RuleStore};

/// The replacement decision engine.
///
/// One engine serves one editing surface. The host feeds it every
/// text-mutating input through [`handle_text_change`] and every navigation
/// or deletion key through [`handle_control_key`], applies the [`TextEdit`]s
/// it returns, and never reports those applied edits back as fresh events.
/// Breaking that last rule makes the engine see its own output as user
/// typing and re-run matching on it.
///
/// Both handlers are infallible: malformed input, including a cursor that
/// lies outside the text, degrades to a no-action outcome.
///
/// [`handle_text_change`]: Self::handle_text_change
/// [`handle_control_key`]: Self::handle_control_key
pub struct ExpansionEngine {
    config: Config,
    rules: Arc<dyn RuleStore>,
    history: Arc<dyn HistoryStore>,
    rule_snapshot: Vec<Rule>,
    rules_changed: ChangeFlag,
    pipeline: MatchPipeline,
    tracker: SuggestionTracker,
    guard: ReversalGuard,
}

impl ExpansionEngine {
    /// Engine with default configuration over the given stores.
    pub fn new(rules: Arc<dyn RuleStore>, history: Arc<dyn HistoryStore>) -> Self {
        Self::with_config(Config::default(), rules, history)
    }

    pub fn with_config(
        config: Config,
        rules: Arc<dyn RuleStore>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        let rules_changed = ChangeFlag::new();
        rules.subscribe(rules_changed.clone());
        let rule_snapshot = rules.active_rules();
        debug!(
            rules = rule_snapshot.len(),
            enabled = config.enabled,
            "expansion engine ready"
        );
        Self {
            pipeline: MatchPipeline::new(config.similarity_threshold),
            tracker: SuggestionTracker::new(config.promotion_threshold),
            guard: ReversalGuard::default(),
            rule_snapshot,
            rules_changed,
            config,
            rules,
            history,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Pause or resume matching. A disabled engine answers every event with
    /// no action and records nothing, but keeps its stores subscribed.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        debug!(enabled, "expansion engine toggled");
    }

    /// Process one text-mutating input event: `text` is the full surface
    /// after the mutation and `cursor` the char offset of the caret.
    pub fn handle_text_change(&mut self, text: &str, cursor: usize) -> Outcome {
        // The mutation that triggered this event already outdates whatever
        // reversal was pending; a fresh replacement below re-arms it.
        self.guard.invalidate();
        self.refresh_rules();
        if !self.config.enabled {
            return Outcome::no_action();
        }

        let Some(ctx) = WordContext::extract(text, cursor) else {
            warn!(cursor, "cursor outside text; ignoring event");
            return Outcome::no_action();
        };
        if ctx.word_chars() < self.config.min_word_chars {
            return Outcome::no_action();
        }

        let history = self.history.snapshot();
        let run = self.pipeline.run(&ctx, &self.rule_snapshot, &history);

        match run.decision {
            Decision::Replace {
                from,
                to,
                replacement,
                source,
            } => {
                let (new_text, new_cursor) = ctx.apply(&replacement);
                let word = ctx.word().to_string();
                debug!(%word, %replacement, ?source, "replacing word");
                self.guard.arm(word.clone(), replacement.clone());

                // Rule hits are the user's own authored expansions; only
                // the fuzzier sources count toward promotion.
                let prompt = if source == MatchSource::Rule {
                    None
                } else {
                    self.tracker.observe(&word, &replacement)
                };
                if ctx.is_word_finalized() {
                    self.record_history(&word, &replacement);
                }

                Outcome {
                    decision: Decision::Replace {
                        from,
                        to,
                        replacement,
                        source,
                    },
                    edit: Some(TextEdit {
                        text: new_text,
                        cursor: new_cursor,
                    }),
                    prompt,
                }
            }
            Decision::Suggest {
                pattern,
                replacement,
            } => {
                let prompt = self.tracker.observe(&pattern, &replacement);
                Outcome {
                    decision: Decision::Suggest {
                        pattern,
                        replacement,
                    },
                    edit: None,
                    prompt,
                }
            }
            Decision::NoAction => {
                if run.record_self {
                    self.record_history(ctx.word(), ctx.word());
                }
                Outcome::no_action()
            }
        }
    }

    /// Process a navigation or deletion key. Returns an edit only when a
    /// delete-backward reverts the immediately preceding replacement; in
    /// every other case the host performs the key's default behavior and
    /// does not report the result back.
    pub fn handle_control_key(&mut self, key: ControlKey, text: &str, cursor: usize) -> Outcome {
        self.refresh_rules();
        if !self.config.enabled || key != ControlKey::DeleteBackward {
            self.guard.invalidate();
            return Outcome::no_action();
        }

        match self.guard.consume(text, cursor) {
            Some(reversal) => {
                debug!(restored = %reversal.restored, "replacement reverted");
                Outcome {
                    decision: Decision::Replace {
                        from: reversal.from,
                        to: cursor,
                        replacement: reversal.restored.clone(),
                        source: MatchSource::Reversal,
                    },
                    edit: Some(TextEdit {
                        text: reversal.text,
                        cursor: reversal.cursor,
                    }),
                    prompt: None,
                }
            }
            None => Outcome::no_action(),
        }
    }

    /// Whether a delete-backward right now would revert a replacement.
    pub fn reversal_pending(&self) -> bool {
        self.guard.is_pending()
    }

    /// The user accepted a promotion prompt. Silences the pair for good
    /// and hands back the rule for the host to persist in its rule store;
    /// the engine picks it up through the store's change notification.
    pub fn promotion_accepted(&mut self, prompt: &PromotionPrompt) -> Rule {
        self.tracker
            .mark_accepted(&prompt.pattern, &prompt.replacement);
        Rule::new(prompt.pattern.clone(), prompt.replacement.clone())
    }

    /// The user dismissed a promotion prompt. The pair stays quiet until
    /// its counter crosses a whole further threshold window.
    pub fn promotion_dismissed(&mut self, prompt: &PromotionPrompt) {
        self.tracker
            .mark_dismissed(&prompt.pattern, &prompt.replacement);
    }

    fn refresh_rules(&mut self) {
        if self.rules_changed.take() {
            self.rule_snapshot = self.rules.active_rules();
            debug!(rules = self.rule_snapshot.len(), "rule snapshot refreshed");
        }
    }

    /// History writes are fire-and-forget: a failing store is worth a log
    /// line, never a failed keystroke.
    fn record_history(&self, word: &str, final_form: &str) {
        if let Err(err) = self.history.put(word, final_form) {
            warn!(%err, word, "history write failed");
        }
    }
}
