//! # Session
//!
//! One interactive run: owns the engine and the configuration, reads key
//! lines, redraws after each.
//!
//! ## Line Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "12+3 enter"                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  keymap::parse_line ──► Err(UnknownKey) ──► report, engine untouched   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commands::dispatch_all(engine, actions)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  engine.display_state() ──► render ──► stdout                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use pocketcalc_core::CalculatorEngine;
use tracing::{info, warn};

use crate::commands::dispatch_all;
use crate::config::{CliConfig, OutputFormat};
use crate::error::{AppError, AppResult, ErrorReport};
use crate::keymap::parse_line;
use crate::render::{render_json, render_text};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Redraw with this text.
    Render(String),

    /// End the session.
    Quit,
}

/// An interactive calculator session.
#[derive(Debug)]
pub struct Session {
    engine: CalculatorEngine,
    config: CliConfig,
}

impl Session {
    /// Creates a session with a fresh engine.
    pub fn new(config: CliConfig) -> Self {
        Session {
            engine: CalculatorEngine::new(),
            config,
        }
    }

    /// Read access to the engine (for tests and embedding).
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Renders the current display in the configured format.
    pub fn render(&self) -> AppResult<String> {
        let display = self.engine.display_state();
        match self.config.output {
            OutputFormat::Text => Ok(render_text(&display, &self.config)),
            OutputFormat::Json => render_json(&display),
        }
    }

    /// Handles one line of input.
    ///
    /// ## Returns
    /// - `Quit` for `quit` / `exit`
    /// - `Render` with the redrawn display otherwise (an empty line simply
    ///   redraws)
    /// - `Err(UnknownKey)` if any key is unknown; nothing was dispatched
    pub fn handle_line(&mut self, line: &str) -> AppResult<LineOutcome> {
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            return Ok(LineOutcome::Quit);
        }

        let actions = parse_line(trimmed, self.config.keyboard_support)?;
        dispatch_all(&mut self.engine, &actions);

        Ok(LineOutcome::Render(self.render()?))
    }

    /// Runs until end of input or `quit`.
    ///
    /// Unknown keys are reported (stderr in text mode, a JSON error line on
    /// `output` in JSON mode) and the session continues. Any other error
    /// ends it.
    pub fn run<R, W, E>(&mut self, input: R, mut output: W, mut errors: E) -> AppResult<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        writeln!(output, "{}", self.render()?)?;

        let mut lines = input.lines();
        loop {
            self.prompt(&mut output)?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.handle_line(&line) {
                Ok(LineOutcome::Render(text)) => writeln!(output, "{}", text)?,
                Ok(LineOutcome::Quit) => break,
                Err(err) if err.is_recoverable() => {
                    warn!(%err, "input line rejected");
                    self.report(&err, &mut output, &mut errors)?;
                }
                Err(err) => return Err(err),
            }
        }

        info!("session ended");
        Ok(())
    }

    fn prompt<W: Write>(&self, output: &mut W) -> AppResult<()> {
        if self.config.output == OutputFormat::Text && !self.config.prompt.is_empty() {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;
        }
        Ok(())
    }

    fn report<W, E>(&self, err: &AppError, output: &mut W, errors: &mut E) -> AppResult<()>
    where
        W: Write,
        E: Write,
    {
        match self.config.output {
            OutputFormat::Text => writeln!(errors, "error: {}", err)?,
            OutputFormat::Json => {
                let report = serde_json::to_string(&ErrorReport::from(err))?;
                writeln!(output, "{}", report)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn quiet_config() -> CliConfig {
        CliConfig {
            prompt: String::new(),
            ..CliConfig::default()
        }
    }

    fn run_session(config: CliConfig, input: &str) -> (String, String) {
        let mut session = Session::new(config);
        let mut output = Vec::new();
        let mut errors = Vec::new();
        session
            .run(Cursor::new(input.as_bytes()), &mut output, &mut errors)
            .unwrap();
        (
            String::from_utf8(output).unwrap(),
            String::from_utf8(errors).unwrap(),
        )
    }

    #[test]
    fn test_handle_line_chain() {
        let mut session = Session::new(quiet_config());
        assert_eq!(
            session.handle_line("5+3").unwrap(),
            LineOutcome::Render("5 +\n3".to_string())
        );
        assert_eq!(
            session.handle_line("*2 enter").unwrap(),
            LineOutcome::Render("16".to_string())
        );
    }

    #[test]
    fn test_handle_line_quit() {
        let mut session = Session::new(quiet_config());
        assert_eq!(session.handle_line("  QUIT ").unwrap(), LineOutcome::Quit);
    }

    #[test]
    fn test_unknown_key_leaves_engine_untouched() {
        let mut session = Session::new(quiet_config());
        session.handle_line("7").unwrap();
        assert!(session.handle_line("8q").is_err());
        assert_eq!(session.engine().display_state().current, "7");
    }

    #[test]
    fn test_run_text_session() {
        let (output, errors) = run_session(quiet_config(), "8/0=\n4\nzz\nquit\n9\n");
        assert_eq!(output, "0\nError (!)\n4\n");
        assert_eq!(errors, "error: Unknown key: \"z\"\n");
    }

    #[test]
    fn test_run_prints_prompt() {
        let (output, _) = run_session(CliConfig::default(), "1\n");
        assert_eq!(output, "0\n> 1\n> ");
    }

    #[test]
    fn test_run_json_session() {
        let config = CliConfig {
            output: OutputFormat::Json,
            ..CliConfig::default()
        };
        let (output, errors) = run_session(config, "5+5%\n?\n=\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], r#"{"current":"0.05","previous":"5 +","hasError":false}"#);
        assert_eq!(lines[2], r#"{"code":"UNKNOWN_KEY","message":"Unknown key: \"?\""}"#);
        assert_eq!(lines[3], r#"{"current":"5.05","previous":"","hasError":false}"#);
        assert!(errors.is_empty());
    }
}
