//! # Display Rendering
//!
//! Copies a [`DisplayState`] onto the terminal: a previous-operation line and
//! the main line.
//!
//! ```text
//! text mode                         json mode
//! ─────────                         ─────────
//!   1,234 +                         {"current":"5","previous":"1234 +","hasError":false}
//!   5
//! ```

use pocketcalc_core::format::group_thousands;
use pocketcalc_core::DisplayState;

use crate::config::CliConfig;
use crate::error::AppResult;

/// Marker appended to the main line in the error state.
pub const ERROR_MARKER: &str = "(!)";

/// Renders the display for people.
pub fn render_text(display: &DisplayState, config: &CliConfig) -> String {
    let mut out = String::new();

    if config.show_previous_operation && !display.previous.is_empty() {
        out.push_str(&group_previous(&display.previous, config));
        out.push('\n');
    }

    if display.has_error {
        out.push_str(&display.current);
        out.push(' ');
        out.push_str(ERROR_MARKER);
    } else {
        out.push_str(&group(&display.current, config));
    }

    out
}

/// Renders the display as one JSON object.
pub fn render_json(display: &DisplayState) -> AppResult<String> {
    Ok(serde_json::to_string(display)?)
}

fn group(operand: &str, config: &CliConfig) -> String {
    if config.group_digits {
        group_thousands(operand, config.separator())
    } else {
        operand.to_string()
    }
}

/// Groups only the operand of `"1234 +"`, never the symbol.
fn group_previous(previous: &str, config: &CliConfig) -> String {
    match previous.rsplit_once(' ') {
        Some((operand, symbol)) => format!("{} {}", group(operand, config), symbol),
        None => group(previous, config),
    }
}
