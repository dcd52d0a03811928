//! # Domain Types
//!
//! Core types shared between the engine and its front ends.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Operator     │   │  DisplayState   │   │   EngineState   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Add       (+)  │   │  current        │   │  Empty          │       │
//! │  │  Subtract  (-)  │   │  previous       │   │  EnteringFirst  │       │
//! │  │  Multiply  (×)  │   │  hasError       │   │  AwaitingSecond │       │
//! │  │  Divide    (÷)  │   └─────────────────┘   │  EnteringSecond │       │
//! │  └─────────────────┘    read by the page     │  Result         │       │
//! │                                              │  Error          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Operator` and `DisplayState` cross into the TypeScript page, so they
//! derive `TS` and serialize in camelCase.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::decimal::Decimal;
use crate::error::CalcResult;

// =============================================================================
// Operator
// =============================================================================

/// A binary arithmetic operator.
///
/// Closed set: an invalid operator cannot be constructed, so the engine
/// matches exhaustively and never compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Symbol shown after the previous operand (`"12 +"`).
    #[inline]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Applies the operator to two operands.
    ///
    /// ## Example
    /// ```rust
    /// use pocketcalc_core::{Decimal, Operator};
    ///
    /// let a = Decimal::parse("8").unwrap();
    /// let b = Decimal::parse("2").unwrap();
    /// assert_eq!(Operator::Divide.apply(a, b).unwrap().to_string(), "4");
    /// ```
    pub fn apply(&self, lhs: Decimal, rhs: Decimal) -> CalcResult<Decimal> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => lhs.checked_div(rhs),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// Display State
// =============================================================================

/// Read-only projection of the engine for the presentation layer.
///
/// ## Page Mapping
/// ```text
/// ┌──────────────────────────────────┐
/// │                          12 +    │ ◄── previous
/// │                             3.5  │ ◄── current
/// └──────────────────────────────────┘
///   .display.error toggled by hasError
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DisplayState {
    /// Main line: normalized operand, `"0"` when empty, or the error token.
    pub current: String,

    /// Expression line: previous operand and operator symbol, or empty.
    pub previous: String,

    /// Whether the last computation was undefined.
    pub has_error: bool,
}

// =============================================================================
// Engine State
// =============================================================================

/// Which phase of entry the engine is in.
///
/// ## Transitions
/// ```text
///  Empty ──digit──► EnteringFirst ──op──► AwaitingSecond ──digit──► EnteringSecond
///                        ▲                  │    ▲                        │    │
///                      digit          op (replace)  └──── op (chain) ─────┘    │ =
///                        │                                                     ▼
///                        └──────────────────── Result ◄────────────────────────┘
///
///  any ──÷0 / overflow──► Error ──digit / delete / reset──► Empty (then act)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineState {
    Empty,
    EnteringFirst,
    AwaitingSecond,
    EnteringSecond,
    Result,
    Error,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_symbols() {
        let symbols: Vec<&str> = Operator::ALL.iter().map(Operator::symbol).collect();
        assert_eq!(symbols, vec!["+", "-", "×", "÷"]);
        assert_eq!(Operator::Multiply.to_string(), "×");
    }

    #[test]
    fn test_operator_apply() {
        let a = Decimal::parse("6").unwrap();
        let b = Decimal::parse("4").unwrap();
        assert_eq!(Operator::Add.apply(a, b).unwrap().to_string(), "10");
        assert_eq!(Operator::Subtract.apply(a, b).unwrap().to_string(), "2");
        assert_eq!(Operator::Multiply.apply(a, b).unwrap().to_string(), "24");
        assert_eq!(Operator::Divide.apply(a, b).unwrap().to_string(), "1.5");
    }

    #[test]
    fn test_display_state_serializes_camel_case() {
        let state = DisplayState {
            current: "0".to_string(),
            previous: "12 +".to_string(),
            has_error: false,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "current": "0", "previous": "12 +", "hasError": false })
        );
    }

    #[test]
    fn test_operator_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&Operator::Subtract).unwrap(), "\"subtract\"");
        let op: Operator = serde_json::from_str("\"divide\"").unwrap();
        assert_eq!(op, Operator::Divide);
    }
}
