//! Simulation script parsing.
//!
//! A script is the keystroke log of one typing session. Ordinary
//! characters are typed one at a time; angle-bracket tokens inject control
//! events:
//!
//! | Token       | Effect                                   |
//! |-------------|------------------------------------------|
//! | `<bs>`      | delete backward (may trigger a reversal) |
//! | `<del>`     | delete forward                           |
//! | `<left>` `<right>` `<up>` `<down>` | cursor movement   |
//! | `<home>` `<end>` | jump to start / end of text         |
//! | `<enter>`   | type a newline                           |
//! | `<accept>`  | accept the pending promotion prompt      |
//! | `<dismiss>` | dismiss the pending promotion prompt     |
//! | `<lt>`      | type a literal `<`                       |
//!
//! Raw newlines and carriage returns in the script file are separators,
//! not keystrokes; use `<enter>` to actually type one.

use sokki_core::ControlKey;

use crate::error::CliError;

/// One scripted keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Type(char),
    Key(ControlKey),
    Accept,
    Dismiss,
}

/// Parse a script into steps. Unknown or unterminated tokens are errors.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>, CliError> {
    let mut steps = Vec::new();
    let mut chars = script.chars();

    while let Some(c) = chars.next() {
        match c {
            '\n' | '\r' => continue,
            '<' => {
                let mut token = String::new();
                loop {
                    match chars.next() {
                        Some('>') => break,
                        Some(t) => token.push(t),
                        None => {
                            return Err(CliError::InvalidScript(format!(
                                "unterminated token '<{token}'"
                            )))
                        }
                    }
                }
                steps.push(step_for_token(&token)?);
            }
            _ => steps.push(ScriptStep::Type(c)),
        }
    }
    Ok(steps)
}

fn step_for_token(token: &str) -> Result<ScriptStep, CliError> {
    let step = match token {
        "bs" => ScriptStep::Key(ControlKey::DeleteBackward),
        "del" => ScriptStep::Key(ControlKey::DeleteForward),
        "left" => ScriptStep::Key(ControlKey::ArrowLeft),
        "right" => ScriptStep::Key(ControlKey::ArrowRight),
        "up" => ScriptStep::Key(ControlKey::ArrowUp),
        "down" => ScriptStep::Key(ControlKey::ArrowDown),
        "home" => ScriptStep::Key(ControlKey::Home),
        "end" => ScriptStep::Key(ControlKey::End),
        "enter" => ScriptStep::Type('\n'),
        "accept" => ScriptStep::Accept,
        "dismiss" => ScriptStep::Dismiss,
        "lt" => ScriptStep::Type('<'),
        other => {
            return Err(CliError::InvalidScript(format!("unknown token '<{other}>'")));
        }
    };
    Ok(step)
}
