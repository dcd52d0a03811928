//! # Commands
//!
//! Routes keypad actions to engine mutators.
//!
//! ## Action Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Button Kind ──► Engine Call                          │
//! │                                                                         │
//! │  number    (0-9 .)      ──► input_number(c)                            │
//! │  operator  (+ − × ÷)    ──► choose_operation(op)                       │
//! │  equals    (=)          ──► calculate()                                │
//! │  special   clear (C)    ──► reset()                                    │
//! │            delete (DEL) ──► delete()                                   │
//! │            percent (%)  ──► percentage()                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dispatch never fails: the engine ignores what it cannot use.

use pocketcalc_core::{CalculatorEngine, Operator};
use tracing::debug;

/// One key press after mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Digit or decimal point
    Number(char),

    /// Arithmetic operator
    Operator(Operator),

    /// `=`
    Equals,

    /// Back to the empty state
    Clear,

    /// Remove the last typed character
    Delete,

    /// Current operand ÷ 100
    Percent,
}

/// Applies one action to the engine.
pub fn dispatch(engine: &mut CalculatorEngine, action: Action) {
    match action {
        Action::Number(digit) => {
            let mut buf = [0u8; 4];
            engine.input_number(digit.encode_utf8(&mut buf));
        }
        Action::Operator(operator) => engine.choose_operation(operator),
        Action::Equals => engine.calculate(),
        Action::Clear => engine.reset(),
        Action::Delete => engine.delete(),
        Action::Percent => engine.percentage(),
    }

    debug!(?action, "action dispatched");
}

/// Applies actions in order.
pub fn dispatch_all(engine: &mut CalculatorEngine, actions: &[Action]) {
    for &action in actions {
        dispatch(engine, action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_full_calculation() {
        let mut engine = CalculatorEngine::new();
        dispatch_all(
            &mut engine,
            &[
                Action::Number('1'),
                Action::Number('2'),
                Action::Operator(Operator::Divide),
                Action::Number('4'),
                Action::Equals,
            ],
        );
        assert_eq!(engine.display_state().current, "3");
    }

    #[test]
    fn test_dispatch_special_actions() {
        let mut engine = CalculatorEngine::new();
        dispatch_all(
            &mut engine,
            &[Action::Number('5'), Action::Number('0'), Action::Percent],
        );
        assert_eq!(engine.display_state().current, "0.5");

        dispatch(&mut engine, Action::Delete);
        assert_eq!(engine.display_state().current, "0.");

        dispatch(&mut engine, Action::Clear);
        assert_eq!(engine.display_state().current, "0");
    }
}
