//! Engine-level tests over in-memory stores.

use std::sync::Arc;

use crate::api::{Config, ControlKey, Decision, ExpansionEngine, MatchSource};
use crate::store::memory::{MemoryHistoryStore, MemoryRuleStore};
use crate::store::{HistoryStore, Rule, RuleStore};

fn engine_with(
    rules: Arc<MemoryRuleStore>,
    history: Arc<MemoryHistoryStore>,
) -> ExpansionEngine {
    ExpansionEngine::new(rules, history)
}

#[test]
fn test_rule_replacement_produces_edit() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    let outcome = engine.handle_text_change("hi ty", 5);
    assert_eq!(
        outcome.decision,
        Decision::Replace {
            from: 3,
            to: 5,
            replacement: "thank you".to_string(),
            source: MatchSource::Rule,
        }
    );
    let edit = outcome.edit.expect("rule hit must produce an edit");
    assert_eq!(edit.text, "hi thank you");
    assert_eq!(edit.cursor, 12);
    assert!(outcome.prompt.is_none());
}

#[test]
fn test_short_words_are_ignored() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    // "u" has a stock rule but sits below the length gate.
    let outcome = engine.handle_text_change("u", 1);
    assert!(outcome.decision.is_no_action());
    assert!(outcome.edit.is_none());
}

#[test]
fn test_min_word_chars_is_configurable() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let config = Config::builder().min_word_chars(1).build().unwrap();
    let mut engine = ExpansionEngine::with_config(config, rules, history);

    let outcome = engine.handle_text_change("u", 1);
    let edit = outcome.edit.expect("one-char gate lifted");
    assert_eq!(edit.text, "you");
}

#[test]
fn test_out_of_bounds_cursor_degrades_to_no_action() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    let outcome = engine.handle_text_change("hi ty", 42);
    assert!(outcome.decision.is_no_action());
}

#[test]
fn test_disabled_engine_is_inert() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, Arc::clone(&history));

    engine.set_enabled(false);
    let outcome = engine.handle_text_change("hi ty ", 5);
    assert!(outcome.decision.is_no_action());
    assert!(history.is_empty(), "disabled engine must not record history");

    engine.set_enabled(true);
    assert!(engine.handle_text_change("hi ty", 5).edit.is_some());
}

#[test]
fn test_rule_edits_reach_the_next_event() {
    let rules = Arc::new(MemoryRuleStore::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(Arc::clone(&rules), history);

    assert!(engine.handle_text_change("omg", 3).edit.is_none());

    rules.add_rule(Rule::new("omg", "oh my god"));
    let outcome = engine.handle_text_change("omg", 3);
    let edit = outcome.edit.expect("new rule must apply on the next event");
    assert_eq!(edit.text, "oh my god");
}

#[test]
fn test_profile_switch_swaps_the_rule_set() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(Arc::clone(&rules), history);

    assert!(engine.handle_text_change("ty", 2).edit.is_some());

    rules.create_profile("work", "Work").unwrap();
    rules.set_active("work").unwrap();
    assert!(
        engine.handle_text_change("ty", 2).edit.is_none(),
        "the work profile has no rules"
    );
}

#[test]
fn test_finalized_replacement_is_recorded() {
    let rules = Arc::new(MemoryRuleStore::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, Arc::clone(&history));

    // Not finalized: nothing after the cursor.
    engine.handle_text_change("brb", 3);
    assert!(history.is_empty());

    // Finalized by the space after the word.
    engine.handle_text_change("brb now", 3);
    assert_eq!(
        history.snapshot().get("brb").map(String::as_str),
        Some("be right back")
    );
}

#[test]
fn test_unmatched_finalized_word_records_itself() {
    let rules = Arc::new(MemoryRuleStore::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, Arc::clone(&history));

    engine.handle_text_change("qqfj ", 4);
    assert_eq!(
        history.snapshot().get("qqfj").map(String::as_str),
        Some("qqfj")
    );

    // Running the same event again must not change anything.
    engine.handle_text_change("qqfj ", 4);
    assert_eq!(history.len(), 1);
}

#[test]
fn test_delete_backward_reverts_replacement() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    let edit = engine.handle_text_change("hi ty", 5).edit.unwrap();
    assert!(engine.reversal_pending());

    let outcome = engine.handle_control_key(ControlKey::DeleteBackward, &edit.text, edit.cursor);
    assert_eq!(
        outcome.decision,
        Decision::Replace {
            from: 3,
            to: 12,
            replacement: "ty".to_string(),
            source: MatchSource::Reversal,
        }
    );
    let reverted = outcome.edit.expect("reversal must produce an edit");
    assert_eq!(reverted.text, "hi ty");
    assert_eq!(reverted.cursor, 5);
    assert!(!engine.reversal_pending());
}

#[test]
fn test_typing_invalidates_pending_reversal() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    let edit = engine.handle_text_change("hi ty", 5).edit.unwrap();
    engine.handle_text_change("hi thank you x", 14);

    let outcome = engine.handle_control_key(ControlKey::DeleteBackward, &edit.text, edit.cursor);
    assert!(outcome.decision.is_no_action());
}

#[test]
fn test_navigation_invalidates_pending_reversal() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    let edit = engine.handle_text_change("hi ty", 5).edit.unwrap();
    engine.handle_control_key(ControlKey::ArrowLeft, &edit.text, edit.cursor);

    let outcome = engine.handle_control_key(ControlKey::DeleteBackward, &edit.text, edit.cursor);
    assert!(outcome.decision.is_no_action());
}

#[test]
fn test_mismatched_delete_backward_consumes_the_undo() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let mut engine = engine_with(rules, history);

    let edit = engine.handle_text_change("hi ty", 5).edit.unwrap();

    // Backspace with the cursor moved elsewhere: plain deletion, and the
    // pending undo is gone for good.
    let outcome = engine.handle_control_key(ControlKey::DeleteBackward, &edit.text, 5);
    assert!(outcome.decision.is_no_action());
    let outcome = engine.handle_control_key(ControlKey::DeleteBackward, &edit.text, edit.cursor);
    assert!(outcome.decision.is_no_action());
}

#[test]
fn test_suggestion_prompts_after_threshold() {
    let rules = Arc::new(MemoryRuleStore::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let config = Config::builder().promotion_threshold(2).build().unwrap();
    let mut engine = ExpansionEngine::with_config(config, rules, history);

    for _ in 0..2 {
        let outcome = engine.handle_text_change("working", 7);
        assert!(matches!(outcome.decision, Decision::Suggest { .. }));
        assert!(outcome.prompt.is_none());
    }

    let outcome = engine.handle_text_change("working", 7);
    let prompt = outcome.prompt.expect("third suggestion crosses threshold");
    assert_eq!(prompt.pattern, "working");
    assert_eq!(prompt.replacement, "work");
}

#[test]
fn test_accepted_promotion_becomes_a_rule() {
    let rules = Arc::new(MemoryRuleStore::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let config = Config::builder().promotion_threshold(1).build().unwrap();
    let mut engine =
        ExpansionEngine::with_config(config, Arc::clone(&rules) as Arc<dyn RuleStore>, history);

    engine.handle_text_change("working", 7);
    let prompt = engine.handle_text_change("working", 7).prompt.unwrap();

    let rule = engine.promotion_accepted(&prompt);
    rules.add_rule(rule);

    let outcome = engine.handle_text_change("working", 7);
    match outcome.decision {
        Decision::Replace { source, .. } => assert_eq!(source, MatchSource::Rule),
        other => panic!("expected the promoted rule to fire, got {other:?}"),
    }
    assert!(outcome.prompt.is_none());
}

#[test]
fn test_abbreviation_replacements_count_toward_promotion() {
    let rules = Arc::new(MemoryRuleStore::new());
    let history = Arc::new(MemoryHistoryStore::new());
    let config = Config::builder().promotion_threshold(2).build().unwrap();
    let mut engine = ExpansionEngine::with_config(config, rules, history);

    // Unfinalized, so no history write shifts later runs to the history
    // stage; each run expands from the abbreviation table.
    engine.handle_text_change("brb", 3);
    engine.handle_text_change("brb", 3);
    let outcome = engine.handle_text_change("brb", 3);
    let prompt = outcome.prompt.expect("abbreviation uses count too");
    assert_eq!(prompt.pattern, "brb");
    assert_eq!(prompt.replacement, "be right back");
}

#[test]
fn test_rule_replacements_do_not_prompt() {
    let rules = Arc::new(MemoryRuleStore::with_defaults());
    let history = Arc::new(MemoryHistoryStore::new());
    let config = Config::builder().promotion_threshold(1).build().unwrap();
    let mut engine = ExpansionEngine::with_config(config, rules, history);

    for _ in 0..5 {
        let outcome = engine.handle_text_change("hi ty", 5);
        assert!(outcome.prompt.is_none(), "rule hits are already rules");
    }
}
