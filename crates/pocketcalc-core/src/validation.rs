//! # Validation Module
//!
//! Input-shape checks for pocketcalc.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (keymap)                                           │
//! │  └── Unknown keys never reach the engine                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine mutators                                              │
//! │  └── THIS MODULE: single digit / decimal point, literal shape          │
//! │      Failure ──► call is a silent no-op                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Decimal::parse                                               │
//! │  └── Range (overflow) ──► engine error state                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pocketcalc_core::validation::{validate_digit_input, validate_operand_text};
//!
//! assert_eq!(validate_digit_input("7").unwrap(), '7');
//! assert!(validate_digit_input("+").is_err());
//! assert!(validate_operand_text("-12.5").is_ok());
//! ```

pub use crate::error::ValidationResult;
use crate::error::ValidationError;

/// Validates one keypad entry for `input_number`.
///
/// ## Rules
/// - Exactly one character
/// - `0`-`9` or `.`
///
/// ## Returns
/// The character to append.
pub fn validate_digit_input(input: &str) -> ValidationResult<char> {
    let mut chars = input.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() || c == '.' => Ok(c),
        _ => Err(ValidationError::InvalidKey {
            input: input.to_string(),
        }),
    }
}

/// Validates the shape of an operand literal as held by the engine.
///
/// ## Rules
/// - May be empty ("no digits yet")
/// - Optional leading `-`, but never a lone `-`
/// - Otherwise only digits and at most one `.`
///
/// Range is not checked here; that is `Decimal::parse`'s job.
pub fn validate_operand_text(text: &str) -> ValidationResult<()> {
    if text.is_empty() {
        return Ok(());
    }

    let body = text.strip_prefix('-').unwrap_or(text);
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        input: text.to_string(),
        reason: reason.to_string(),
    };

    if body.is_empty() {
        return Err(invalid("sign without digits"));
    }

    if let Some(c) = body.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
        return Err(invalid(&format!("unexpected character {:?}", c)));
    }

    if body.matches('.').count() > 1 {
        return Err(invalid("more than one decimal point"));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_digit_input() {
        for key in ["0", "5", "9", "."] {
            assert!(validate_digit_input(key).is_ok(), "{key} should be accepted");
        }

        assert!(validate_digit_input("").is_err());
        assert!(validate_digit_input("12").is_err());
        assert!(validate_digit_input("+").is_err());
        assert!(validate_digit_input("a").is_err());
        assert!(validate_digit_input("٣").is_err()); // non-ASCII digit
    }

    #[test]
    fn test_validate_operand_text() {
        assert!(validate_operand_text("").is_ok());
        assert!(validate_operand_text("00").is_ok());
        assert!(validate_operand_text("1.").is_ok());
        assert!(validate_operand_text(".").is_ok());
        assert!(validate_operand_text("-0.5").is_ok());

        assert!(validate_operand_text("-").is_err());
        assert!(validate_operand_text("1.2.3").is_err());
        assert!(validate_operand_text("1+2").is_err());
        assert!(validate_operand_text("--1").is_err());
    }
}
