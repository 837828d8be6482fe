//! Session report rendering.

use std::io::Write;

use sokki_core::MatchSource;

use crate::error::CliResult;
use crate::session::{SessionEvent, SessionReport};

fn source_label(source: MatchSource) -> &'static str {
    match source {
        MatchSource::Rule => "rule",
        MatchSource::History => "history",
        MatchSource::Abbreviation => "abbreviation",
        MatchSource::Reversal => "reversal",
    }
}

/// Human-readable event log followed by the final surface state.
pub fn render_text<W: Write>(report: &SessionReport, writer: &mut W) -> CliResult<()> {
    for event in &report.events {
        match event {
            SessionEvent::Replaced {
                step,
                word,
                replacement,
                source,
            } => writeln!(
                writer,
                "[{step:>4}] replaced \"{word}\" -> \"{replacement}\" ({})",
                source_label(*source)
            )?,
            SessionEvent::Reverted { step, restored } => {
                writeln!(writer, "[{step:>4}] reverted to \"{restored}\"")?
            }
            SessionEvent::Suggested {
                step,
                pattern,
                replacement,
            } => writeln!(
                writer,
                "[{step:>4}] suggested \"{pattern}\" -> \"{replacement}\""
            )?,
            SessionEvent::Prompted {
                step,
                pattern,
                replacement,
            } => writeln!(
                writer,
                "[{step:>4}] prompt: make \"{pattern}\" -> \"{replacement}\" a rule?"
            )?,
            SessionEvent::PromptAccepted {
                step,
                pattern,
                replacement,
            } => writeln!(
                writer,
                "[{step:>4}] rule added: \"{pattern}\" -> \"{replacement}\""
            )?,
            SessionEvent::PromptDismissed { step, pattern, .. } => {
                writeln!(writer, "[{step:>4}] prompt dismissed for \"{pattern}\"")?
            }
        }
    }
    if !report.events.is_empty() {
        writeln!(writer)?;
    }
    writeln!(writer, "final: {}", report.final_text)?;
    writeln!(writer, "cursor: {}", report.cursor)?;
    Ok(())
}

/// The whole report as pretty-printed JSON.
pub fn render_json<W: Write>(report: &SessionReport, writer: &mut W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
