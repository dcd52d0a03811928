//! # Calculator Engine
//!
//! The state machine behind the keypad. Owns every piece of arithmetic
//! state; front ends call a mutator and then re-read [`DisplayState`].
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Engine Call Contract                                 │
//! │                                                                         │
//! │  Front End Action         Engine Mutator           State Change         │
//! │  ────────────────         ──────────────           ────────────         │
//! │                                                                         │
//! │  Press 0-9 / . ─────────► input_number() ───────► current.push(c)      │
//! │                                                                         │
//! │  Press + - × ÷ ─────────► choose_operation() ───► current ─► previous  │
//! │                                                   (chain: calculate)   │
//! │                                                                         │
//! │  Press = ───────────────► calculate() ──────────► current = result     │
//! │                                                                         │
//! │  Press ⌫ ───────────────► delete() ─────────────► current.pop()        │
//! │                                                                         │
//! │  Press % ───────────────► percentage() ─────────► current = current/100│
//! │                                                                         │
//! │  Press C ───────────────► reset() ──────────────► Empty                │
//! │                                                                         │
//! │  Redraw ────────────────► display_state() ──────► (read only)          │
//! │                                                                         │
//! │  NOTE: Mutators never return errors. Undefined arithmetic becomes       │
//! │        has_error; malformed input is silently ignored.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error State
//! While in error, `choose_operation`, `calculate` and `percentage` are
//! no-ops. `input_number` and `delete` reset first, then act. `reset`
//! always works.

use tracing::{debug, trace};

use crate::decimal::Decimal;
use crate::format::normalize_operand;
use crate::types::{DisplayState, EngineState, Operator};
use crate::validation::{validate_digit_input, validate_operand_text};

/// Text shown on the main line while the engine is in its error state.
pub const ERROR_DISPLAY: &str = "Error";

/// Everything the engine knows. Mutated only by `CalculatorEngine`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CalculatorState {
    /// Operand being typed, or the last result. Empty means "no digits yet".
    current: String,

    /// Operand captured when the operator was chosen.
    previous: String,

    /// Operator awaiting its second operand.
    operator: Option<Operator>,

    has_error: bool,

    /// `current` holds an unedited result of `calculate()`.
    showing_result: bool,
}

/// A four-function pocket calculator.
///
/// ## Example
/// ```rust
/// use pocketcalc_core::{CalculatorEngine, Operator};
///
/// let mut engine = CalculatorEngine::new();
/// engine.input_number("5");
/// engine.choose_operation(Operator::Add);
/// engine.input_number("3");
/// engine.choose_operation(Operator::Multiply); // 5 + 3 is computed here
/// engine.input_number("2");
/// engine.calculate();
///
/// assert_eq!(engine.display_state().current, "16");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    state: CalculatorState,
}

impl CalculatorEngine {
    /// Creates an engine in the Empty state.
    pub fn new() -> Self {
        CalculatorEngine::default()
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Appends a digit or decimal point to the current operand.
    ///
    /// ## Behavior
    /// - Anything other than a single `0`-`9` or `.` is ignored
    /// - A second `.` in the same operand is ignored
    /// - In the error state, the engine is reset before appending
    /// - Leading zeros are stored as typed (`"00"`); display normalizes them
    pub fn input_number(&mut self, digit_or_point: &str) {
        let digit = match validate_digit_input(digit_or_point) {
            Ok(digit) => digit,
            Err(err) => {
                trace!(%err, "input_number ignored");
                return;
            }
        };

        self.leave_error();

        if digit == '.' && self.state.current.contains('.') {
            trace!(current = %self.state.current, "second decimal point ignored");
            return;
        }

        self.state.current.push(digit);
        self.state.showing_result = false;
        self.debug_check_invariants();
    }

    /// Selects the operator to apply to the current operand.
    ///
    /// ## Behavior
    /// ```text
    /// current empty, no operator   ──► ignored
    /// current empty, operator set  ──► operator replaced
    /// current set,   operator set  ──► calculate(), then result ─► previous
    /// current set,   no operator   ──► current ─► previous
    /// ```
    /// Chaining is strictly left to right: `5 + 3 × 2` is `(5 + 3) × 2`.
    pub fn choose_operation(&mut self, operator: Operator) {
        if self.state.has_error {
            trace!(%operator, "choose_operation ignored in error state");
            return;
        }

        if self.state.current.is_empty() {
            if self.state.operator.is_some() {
                debug!(%operator, "pending operator replaced");
                self.state.operator = Some(operator);
            } else {
                trace!(%operator, "choose_operation ignored, nothing to operate on");
            }
            return;
        }

        if self.state.operator.is_some() {
            self.calculate();
            if self.state.has_error {
                return;
            }
        }

        self.state.previous = std::mem::take(&mut self.state.current);
        self.state.operator = Some(operator);
        self.state.showing_result = false;

        debug!(previous = %self.state.previous, %operator, "operator chosen");
        self.debug_check_invariants();
    }

    /// Applies the pending operator to the previous and current operands.
    ///
    /// ## Behavior
    /// - No-op without an operator, without both operands, or in error
    /// - Success: result replaces `current`, operator and previous clear
    /// - Division by zero, overflow or an unreadable operand: error state
    pub fn calculate(&mut self) {
        if self.state.has_error {
            return;
        }

        let Some(operator) = self.state.operator else {
            return;
        };

        if self.state.previous.is_empty() || self.state.current.is_empty() {
            return;
        }

        let outcome = Decimal::parse(&self.state.previous).and_then(|lhs| {
            let rhs = Decimal::parse(&self.state.current)?;
            operator.apply(lhs, rhs)
        });

        match outcome {
            Ok(result) => {
                debug!(
                    lhs = %self.state.previous,
                    %operator,
                    rhs = %self.state.current,
                    %result,
                    "calculated"
                );
                self.state.previous.clear();
                self.state.operator = None;
                self.state.current = result.to_string();
                self.state.showing_result = true;
            }
            Err(err) => {
                debug!(%err, "calculation failed");
                self.enter_error();
            }
        }

        self.debug_check_invariants();
    }

    /// Removes the last character of the current operand.
    ///
    /// In the error state this only resets. A lone `-` left behind by
    /// deleting from a negative result is cleared too.
    pub fn delete(&mut self) {
        if self.leave_error() {
            return;
        }

        self.state.current.pop();
        if self.state.current == "-" {
            self.state.current.clear();
        }
        self.state.showing_result = false;
        self.debug_check_invariants();
    }

    /// Replaces the current operand with one-hundredth of its value.
    ///
    /// Operand-local: `8 + 50 % =` is `8 + 0.5`, never "50% of 8".
    pub fn percentage(&mut self) {
        if self.state.has_error || self.state.current.is_empty() {
            return;
        }

        match Decimal::parse(&self.state.current) {
            Ok(value) => {
                self.state.current = value.percent().to_string();
                debug!(current = %self.state.current, "percentage applied");
            }
            Err(err) => trace!(%err, "percentage ignored"),
        }

        self.debug_check_invariants();
    }

    /// Returns to the Empty state, from anywhere.
    pub fn reset(&mut self) {
        self.state = CalculatorState::default();
        debug!("engine reset");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Projects the state for the presentation layer. Pure.
    ///
    /// ## Example
    /// ```rust
    /// use pocketcalc_core::{CalculatorEngine, Operator};
    ///
    /// let mut engine = CalculatorEngine::new();
    /// engine.input_number("1");
    /// engine.input_number("2");
    /// engine.choose_operation(Operator::Add);
    ///
    /// let display = engine.display_state();
    /// assert_eq!(display.current, "0");
    /// assert_eq!(display.previous, "12 +");
    /// assert!(!display.has_error);
    /// ```
    pub fn display_state(&self) -> DisplayState {
        if self.state.has_error {
            return DisplayState {
                current: ERROR_DISPLAY.to_string(),
                previous: String::new(),
                has_error: true,
            };
        }

        let previous = match self.state.operator {
            Some(operator) => format!(
                "{} {}",
                normalize_operand(&self.state.previous),
                operator.symbol()
            ),
            None => String::new(),
        };

        DisplayState {
            current: normalize_operand(&self.state.current),
            previous,
            has_error: false,
        }
    }

    /// Whether the engine is in its error state.
    #[inline]
    pub fn has_error(&self) -> bool {
        self.state.has_error
    }

    /// Which phase of entry the engine is in.
    pub fn state_kind(&self) -> EngineState {
        let state = &self.state;

        if state.has_error {
            return EngineState::Error;
        }

        match (state.operator.is_some(), state.current.is_empty()) {
            (true, true) => EngineState::AwaitingSecond,
            (true, false) => EngineState::EnteringSecond,
            (false, true) => EngineState::Empty,
            (false, false) if state.showing_result => EngineState::Result,
            (false, false) => EngineState::EnteringFirst,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Error acts as a reset barrier for digit entry and delete.
    ///
    /// Returns `true` if the engine was in error (and is now Empty).
    fn leave_error(&mut self) -> bool {
        if !self.state.has_error {
            return false;
        }

        debug!("clearing error state");
        self.reset();
        true
    }

    fn enter_error(&mut self) {
        self.state = CalculatorState {
            has_error: true,
            ..CalculatorState::default()
        };
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            validate_operand_text(&self.state.current).is_ok(),
            "current operand malformed: {:?}",
            self.state.current
        );
        debug_assert!(
            self.state.operator.is_none() || validate_operand_text(&self.state.previous).is_ok(),
            "previous operand malformed: {:?}",
            self.state.previous
        );
        debug_assert!(
            self.state.operator.is_some() || self.state.previous.is_empty(),
            "previous operand without operator"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
