//! The ordered matching pipeline.
//!
//! Stages run in a fixed priority order and the first stage with something
//! to say ends the run. Later stages are never consulted once an earlier
//! one has matched, which keeps precedence explicit: exact rules beat
//! learned history, history beats the built-in abbreviations, and the
//! affix normalizer can only ever suggest.

use indexmap::IndexMap;

use crate::api::{Decision, MatchSource};
use crate::domain::abbreviations::AbbreviationTable;
use crate::domain::affix;
use crate::domain::segment::WordContext;
use crate::domain::similarity::similarity;
use crate::store::Rule;

/// What one pipeline run asks the engine to do.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PipelineRun {
    pub decision: Decision,
    /// Stage 5: the finalized word should be remembered as its own final
    /// form so future similarity lookups can see it.
    pub record_self: bool,
}

impl PipelineRun {
    fn decided(decision: Decision) -> Self {
        Self {
            decision,
            record_self: false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MatchPipeline {
    abbreviations: AbbreviationTable,
    similarity_threshold: f64,
}

impl MatchPipeline {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            abbreviations: AbbreviationTable::new(),
            similarity_threshold,
        }
    }

    /// Run the word in `ctx` through the stages against the given rule
    /// snapshot and history snapshot.
    pub fn run(
        &self,
        ctx: &WordContext,
        rules: &[Rule],
        history: &IndexMap<String, String>,
    ) -> PipelineRun {
        let word = ctx.word();

        // Stage 1: exact rule match, first rule in authoring order wins.
        if let Some(rule) = rules.iter().find(|r| r.pattern == word) {
            if rule.replacement != word {
                return PipelineRun::decided(replace(ctx, &rule.replacement, MatchSource::Rule));
            }
        }

        // Stage 2: affix normalization. A hit ends the run even though it
        // only suggests, so a stripped word never falls through to fuzzier
        // stages.
        if let Some(stem) = affix::normalize(word) {
            return PipelineRun::decided(Decision::Suggest {
                pattern: word.to_string(),
                replacement: stem,
            });
        }

        // Stage 3: best similarity match against history keys.
        if let Some(final_form) = self.best_history_match(word, history) {
            return PipelineRun::decided(replace(ctx, &final_form, MatchSource::History));
        }

        // Stage 4: built-in abbreviations.
        if let Some(expansion) = self.abbreviations.lookup(word) {
            return PipelineRun::decided(replace(ctx, expansion, MatchSource::Abbreviation));
        }

        // Stage 5: nothing matched. A finalized word without a history
        // entry is worth remembering as-is.
        PipelineRun {
            decision: Decision::NoAction,
            record_self: ctx.is_word_finalized() && !history.contains_key(word),
        }
    }

    /// The final form of the history key most similar to `word`, if any
    /// key strictly exceeds the threshold. Ties keep the earliest entry.
    /// Entries whose final form already equals the word are skipped, so a
    /// self-recorded word never "corrects" itself into an edit loop.
    fn best_history_match(
        &self,
        word: &str,
        history: &IndexMap<String, String>,
    ) -> Option<String> {
        let mut best: Option<(f64, &str)> = None;
        for (key, final_form) in history {
            if final_form == word {
                continue;
            }
            let score = similarity(word, key);
            if score <= self.similarity_threshold {
                continue;
            }
            match best {
                Some((top, _)) if score <= top => {}
                _ => best = Some((score, final_form)),
            }
        }
        best.map(|(_, final_form)| final_form.to_string())
    }
}

fn replace(ctx: &WordContext, replacement: &str, source: MatchSource) -> Decision {
    Decision::Replace {
        from: ctx.word_start(),
        to: ctx.cursor(),
        replacement: replacement.to_string(),
        source,
    }
}
