//! # Error Types
//!
//! Domain-specific error types for pocketcalc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pocketcalc-core errors (this file)                                    │
//! │  ├── CalcError        - Undefined arithmetic (÷0, overflow, bad parse) │
//! │  └── ValidationError  - Input shape violations (bad key, bad literal)  │
//! │                                                                         │
//! │  pocketcalc-cli errors (separate crate)                                │
//! │  └── AppError         - Unknown keys, config, I/O                      │
//! │                                                                         │
//! │  Neither core error ever crosses an engine mutator:                    │
//! │    CalcError       ──► has_error = true ──► display shows "Error"      │
//! │    ValidationError ──► call ignored (silent no-op)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (offending operand, key)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Calculation Error
// =============================================================================

/// Arithmetic errors.
///
/// These are the only failures that put the engine into its error state.
/// Everything else is an input-shape problem and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The divisor was zero.
    ///
    /// ## User Workflow
    /// ```text
    /// 8 ÷ 0 =
    ///      │
    ///      ▼
    /// Decimal::checked_div ──► DivisionByZero
    ///      │
    ///      ▼
    /// Display: "Error"
    /// ```
    #[error("Division by zero")]
    DivisionByZero,

    /// The result (or an operand) does not fit the fixed-point range.
    #[error("Numeric overflow")]
    Overflow,

    /// An operand could not be read as a number.
    #[error("Invalid operand: {0:?}")]
    InvalidOperand(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used by the engine to decide that a call should be a no-op, and by
/// front ends that want to report why a key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is not a single digit or decimal point.
    #[error("{input:?} is not a digit or decimal point")]
    InvalidKey { input: String },

    /// The text is not a well-formed operand literal.
    #[error("{input:?} has invalid format: {reason}")]
    InvalidFormat { input: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CalcError.
pub type CalcResult<T> = Result<T, CalcError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
