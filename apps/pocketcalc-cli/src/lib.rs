//! # pocketcalc-cli
//!
//! Terminal front end for the pocketcalc engine.
//!
//! ## Module Organization
//! ```text
//! pocketcalc_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── CliConfig: defaults, config.toml, POCKETCALC_* env
//! ├── keymap.rs       ◄─── Button labels & keyboard shortcuts ─► Action
//! ├── commands.rs     ◄─── Action ─► engine mutator
//! ├── render.rs       ◄─── DisplayState ─► text / JSON
//! ├── session.rs      ◄─── stdin loop owning the engine
//! └── error.rs        ◄─── AppError for the front end
//! ```
//!
//! ## Usage
//! ```text
//! $ pocketcalc
//! 0
//! > 5 + 3 * 2
//! 8 ×
//! 2
//! > =
//! 16
//! > quit
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod keymap;
pub mod render;
pub mod session;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::AppResult;
use crate::session::Session;

/// Runs the terminal calculator on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: WARN (INFO for pocketcalc), override with RUST_LOG       │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults ─► config.toml ─► POCKETCALC_* env                       │
/// │                                                                         │
/// │  3. Run Session ──────────────────────────────────────────────────────► │
/// │     • One engine, owned by the session                                  │
/// │     • Redraw after every line until EOF or `quit`                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting pocketcalc");

    let config = CliConfig::load()?;
    info!(
        output = ?config.output,
        keyboard_support = config.keyboard_support,
        "Configuration loaded"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    Session::new(config).run(stdin.lock(), stdout.lock(), stderr.lock())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every engine transition
/// - `RUST_LOG=pocketcalc_core=trace` - Also show ignored inputs
/// - Default: WARN, INFO for the CLI itself
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pocketcalc_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
