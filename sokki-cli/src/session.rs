//! Scripted host surface driving one engine.
//!
//! The session owns what a real host would: the text buffer, the cursor,
//! and the pending promotion prompt. It follows the host contract to the
//! letter: every keystroke is reported, every engine edit is applied
//! locally and never reported back, and default key behavior runs only
//! when the engine declines to act.

use std::sync::Arc;

use serde::Serialize;
use sokki_core::{ControlKey, Decision, ExpansionEngine, MatchSource, PromotionPrompt};

use crate::script::ScriptStep;
use crate::store::RuleSink;

/// One observable thing that happened during a session, tagged with the
/// 1-based script step that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Replaced {
        step: usize,
        word: String,
        replacement: String,
        source: MatchSource,
    },
    Reverted {
        step: usize,
        restored: String,
    },
    Suggested {
        step: usize,
        pattern: String,
        replacement: String,
    },
    Prompted {
        step: usize,
        pattern: String,
        replacement: String,
    },
    PromptAccepted {
        step: usize,
        pattern: String,
        replacement: String,
    },
    PromptDismissed {
        step: usize,
        pattern: String,
        replacement: String,
    },
}

/// Everything a finished session reports.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub final_text: String,
    pub cursor: usize,
    pub events: Vec<SessionEvent>,
}

pub struct Session {
    engine: ExpansionEngine,
    rules: Arc<dyn RuleSink>,
    text: String,
    cursor: usize,
    pending_prompt: Option<PromotionPrompt>,
    auto_accept: bool,
    events: Vec<SessionEvent>,
    step: usize,
}

impl Session {
    pub fn new(engine: ExpansionEngine, rules: Arc<dyn RuleSink>) -> Self {
        Self {
            engine,
            rules,
            text: String::new(),
            cursor: 0,
            pending_prompt: None,
            auto_accept: false,
            events: Vec::new(),
            step: 0,
        }
    }

    /// Accept every promotion prompt the moment it appears.
    pub fn auto_accept(mut self, yes: bool) -> Self {
        self.auto_accept = yes;
        self
    }

    pub fn run(&mut self, steps: &[ScriptStep]) {
        for &step in steps {
            self.step += 1;
            match step {
                ScriptStep::Type(c) => self.type_char(c),
                ScriptStep::Key(key) => self.press(key),
                ScriptStep::Accept => self.accept_prompt(),
                ScriptStep::Dismiss => self.dismiss_prompt(),
            }
        }
    }

    pub fn into_report(self) -> SessionReport {
        SessionReport {
            final_text: self.text,
            cursor: self.cursor,
            events: self.events,
        }
    }

    fn type_char(&mut self, c: char) {
        let byte = self.byte_at_cursor();
        self.text.insert(byte, c);
        self.cursor += 1;

        let outcome = self.engine.handle_text_change(&self.text, self.cursor);
        match outcome.decision {
            Decision::Replace {
                from,
                to,
                replacement,
                source,
            } => {
                let word: String = self.text.chars().skip(from).take(to - from).collect();
                self.events.push(SessionEvent::Replaced {
                    step: self.step,
                    word,
                    replacement,
                    source,
                });
            }
            Decision::Suggest {
                pattern,
                replacement,
            } => {
                self.events.push(SessionEvent::Suggested {
                    step: self.step,
                    pattern,
                    replacement,
                });
            }
            Decision::NoAction => {}
        }
        if let Some(edit) = outcome.edit {
            self.text = edit.text;
            self.cursor = edit.cursor;
        }
        if let Some(prompt) = outcome.prompt {
            self.handle_prompt(prompt);
        }
    }

    fn press(&mut self, key: ControlKey) {
        let outcome = self.engine.handle_control_key(key, &self.text, self.cursor);
        if let Some(edit) = outcome.edit {
            if let Decision::Replace { replacement, .. } = outcome.decision {
                self.events.push(SessionEvent::Reverted {
                    step: self.step,
                    restored: replacement,
                });
            }
            self.text = edit.text;
            self.cursor = edit.cursor;
            return;
        }

        match key {
            ControlKey::DeleteBackward if self.cursor > 0 => {
                self.cursor -= 1;
                let byte = self.byte_at_cursor();
                self.text.remove(byte);
            }
            ControlKey::DeleteForward if self.cursor < self.char_len() => {
                let byte = self.byte_at_cursor();
                self.text.remove(byte);
            }
            ControlKey::ArrowLeft => self.cursor = self.cursor.saturating_sub(1),
            ControlKey::ArrowRight => self.cursor = (self.cursor + 1).min(self.char_len()),
            ControlKey::Home => self.cursor = 0,
            ControlKey::End => self.cursor = self.char_len(),
            _ => {}
        }
    }

    fn handle_prompt(&mut self, prompt: PromotionPrompt) {
        self.events.push(SessionEvent::Prompted {
            step: self.step,
            pattern: prompt.pattern.clone(),
            replacement: prompt.replacement.clone(),
        });
        if self.auto_accept {
            self.pending_prompt = Some(prompt);
            self.accept_prompt();
        } else {
            if self.pending_prompt.is_some() {
                log::warn!("new prompt replaces an unanswered one");
            }
            self.pending_prompt = Some(prompt);
        }
    }

    fn accept_prompt(&mut self) {
        let Some(prompt) = self.pending_prompt.take() else {
            log::warn!("<accept> with no pending prompt");
            return;
        };
        let rule = self.engine.promotion_accepted(&prompt);
        if let Err(err) = self.rules.accept_rule(rule) {
            log::error!("failed to persist accepted rule: {err}");
        }
        self.events.push(SessionEvent::PromptAccepted {
            step: self.step,
            pattern: prompt.pattern,
            replacement: prompt.replacement,
        });
    }

    fn dismiss_prompt(&mut self) {
        let Some(prompt) = self.pending_prompt.take() else {
            log::warn!("<dismiss> with no pending prompt");
            return;
        };
        self.engine.promotion_dismissed(&prompt);
        self.events.push(SessionEvent::PromptDismissed {
            step: self.step,
            pattern: prompt.pattern,
            replacement: prompt.replacement,
        });
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_at_cursor(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
