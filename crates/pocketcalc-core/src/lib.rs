//! # pocketcalc-core: Pure Calculation Engine
//!
//! This crate is the **heart** of pocketcalc. It holds the keypad state
//! machine and its decimal arithmetic, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pocketcalc Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front End (page or terminal)                       │   │
//! │  │    Keys / buttons ──► Action ──► engine call ──► redraw        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ mutators / display_state()             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pocketcalc-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │  decimal  │  │  format   │  │ validation│  │   │
//! │  │   │ Calculator│  │  Decimal  │  │ normalize │  │  digits   │  │   │
//! │  │   │  Engine   │  │  checked  │  │  grouping │  │  literals │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • NO PANICS ON USER INPUT           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - `CalculatorEngine` state machine
//! - [`decimal`] - Fixed-point `Decimal` (no floating point!)
//! - [`types`] - `Operator`, `DisplayState`, `EngineState`
//! - [`format`] - Display normalization and digit grouping
//! - [`error`] - Arithmetic and validation error types
//! - [`validation`] - Input shape checks
//!
//! ## Design Principles
//!
//! 1. **Pulled, not pushed**: callers mutate, then read `display_state()`
//! 2. **No I/O**: logging is emitted through `tracing`, never configured here
//! 3. **Exact decimals**: `0.1 + 0.2` is `0.3`
//! 4. **Errors stay inside**: undefined arithmetic becomes display state
//!
//! ## Example Usage
//!
//! ```rust
//! use pocketcalc_core::{CalculatorEngine, Operator};
//!
//! let mut engine = CalculatorEngine::new();
//! engine.input_number("8");
//! engine.choose_operation(Operator::Divide);
//! engine.input_number("0");
//! engine.calculate();
//!
//! let display = engine.display_state();
//! assert!(display.has_error);
//! assert_eq!(display.current, "Error");
//!
//! // Any digit clears the error and starts over
//! engine.input_number("4");
//! assert_eq!(engine.display_state().current, "4");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod decimal;
pub mod engine;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pocketcalc_core::Decimal` instead of
// `use pocketcalc_core::decimal::Decimal`

pub use decimal::{Decimal, MAX_SCALE};
pub use engine::{CalculatorEngine, ERROR_DISPLAY};
pub use error::{CalcError, CalcResult, ValidationError};
pub use types::*;
