//! # Decimal Module
//!
//! Provides the `Decimal` type: a fixed-point number used for every
//! calculation the engine performs.
//!
//! ## Why Fixed-Point?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG on a pocket calculator     │
//! │                                                                         │
//! │  OUR SOLUTION: Scaled Integers                                          │
//! │    0.1 = (1, scale 1)   0.2 = (2, scale 1)                              │
//! │    1 + 2 = 3 at scale 1 = 0.3                                           │
//! │                                                                         │
//! │  Division is the only inexact operation. It is rounded to MAX_SCALE    │
//! │  fractional digits, half away from zero:                               │
//! │    1 ÷ 3 = 0.333333333333                                               │
//! │    2 ÷ 3 = 0.666666666667                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pocketcalc_core::decimal::Decimal;
//!
//! let a = Decimal::parse("0.1").unwrap();
//! let b = Decimal::parse("0.2").unwrap();
//! assert_eq!(a.checked_add(b).unwrap().to_string(), "0.3");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, CalcResult};

/// Maximum number of fractional digits a `Decimal` keeps.
pub const MAX_SCALE: u32 = 12;

// =============================================================================
// Decimal Type
// =============================================================================

/// A signed fixed-point number: `mantissa × 10^-scale`.
///
/// ## Invariants
/// - `scale <= MAX_SCALE`
/// - No trailing fractional zeros (`mantissa % 10 != 0` whenever `scale > 0`)
/// - Zero is always `(0, 0)`
///
/// Because every value is kept in this canonical form, the derived
/// `PartialEq`/`Hash` compare numeric values, not spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Decimal {
            mantissa: 0,
            scale: 0,
        }
    }

    /// Creates a decimal from a mantissa and scale, rounding to
    /// `MAX_SCALE` and stripping trailing zeros.
    ///
    /// ## Example
    /// ```rust
    /// use pocketcalc_core::decimal::Decimal;
    ///
    /// let d = Decimal::from_parts(1500, 3);
    /// assert_eq!(d.to_string(), "1.5");
    /// assert_eq!(d.scale(), 1);
    /// ```
    pub fn from_parts(mantissa: i128, scale: u32) -> Self {
        let (mut mantissa, mut scale) = if scale > MAX_SCALE {
            // 10^(scale - MAX_SCALE) only overflows for absurd scales,
            // which round to zero anyway.
            match pow10(scale - MAX_SCALE) {
                Some(divisor) => (div_round(mantissa, divisor), MAX_SCALE),
                None => (0, 0),
            }
        } else {
            (mantissa, scale)
        };

        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }

        Decimal { mantissa, scale }
    }

    /// Parses an operand literal.
    ///
    /// ## Accepted Form
    /// - Optional leading `-`
    /// - Digits with at most one `.`
    /// - An empty integer or fractional part reads as zero (`"."` is 0,
    ///   `"3."` is 3, `".5"` is 0.5)
    ///
    /// Fractional digits beyond `MAX_SCALE` are rounded. More significant
    /// digits than an `i128` holds is `CalcError::Overflow`.
    ///
    /// ## Example
    /// ```rust
    /// use pocketcalc_core::decimal::Decimal;
    ///
    /// assert_eq!(Decimal::parse("007.50").unwrap().to_string(), "7.5");
    /// assert!(Decimal::parse("1.2.3").is_err());
    /// ```
    pub fn parse(text: &str) -> CalcResult<Decimal> {
        let invalid = || CalcError::InvalidOperand(text.to_string());

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        if body.is_empty() {
            return Err(invalid());
        }

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let kept_len = frac_part.len().min(MAX_SCALE as usize);
        let (kept_frac, dropped_frac) = frac_part.split_at(kept_len);

        let mut mantissa: i128 = 0;
        for digit in int_part.bytes().chain(kept_frac.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or(CalcError::Overflow)?;
        }

        // Round half away from zero on the first dropped digit.
        if dropped_frac.as_bytes().first().is_some_and(|&d| d >= b'5') {
            mantissa = mantissa.checked_add(1).ok_or(CalcError::Overflow)?;
        }

        if negative {
            mantissa = -mantissa;
        }

        Ok(Decimal::from_parts(mantissa, kept_len as u32))
    }

    /// Returns the scaled integer.
    #[inline]
    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Returns the number of fractional digits.
    #[inline]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// Adds two decimals.
    pub fn checked_add(self, other: Decimal) -> CalcResult<Decimal> {
        let (a, b, scale) = align(self, other)?;
        let sum = a.checked_add(b).ok_or(CalcError::Overflow)?;
        Ok(Decimal::from_parts(sum, scale))
    }

    /// Subtracts `other` from `self`.
    pub fn checked_sub(self, other: Decimal) -> CalcResult<Decimal> {
        let (a, b, scale) = align(self, other)?;
        let difference = a.checked_sub(b).ok_or(CalcError::Overflow)?;
        Ok(Decimal::from_parts(difference, scale))
    }

    /// Multiplies two decimals, rounding the product to `MAX_SCALE`.
    ///
    /// ## Example
    /// ```rust
    /// use pocketcalc_core::decimal::Decimal;
    ///
    /// let a = Decimal::parse("1.5").unwrap();
    /// let b = Decimal::parse("-4").unwrap();
    /// assert_eq!(a.checked_mul(b).unwrap().to_string(), "-6");
    /// ```
    pub fn checked_mul(self, other: Decimal) -> CalcResult<Decimal> {
        let negative = self.is_negative() != other.is_negative();
        let exact_scale = self.scale + other.scale;

        // Widest scale whose mantissa still fits an i128.
        for scale in (0..=exact_scale.min(MAX_SCALE)).rev() {
            let mantissa = pow10_u(exact_scale - scale).and_then(|divisor| {
                mul_div_round(
                    self.mantissa.unsigned_abs(),
                    other.mantissa.unsigned_abs(),
                    divisor,
                )
            });

            if let Some(mantissa) = mantissa.and_then(|m| with_sign(m, negative)) {
                return Ok(Decimal::from_parts(mantissa, scale));
            }
        }

        Err(CalcError::Overflow)
    }

    /// Divides `self` by `other`, rounding the quotient to `MAX_SCALE`
    /// fractional digits (half away from zero).
    ///
    /// ## Implementation
    /// ```text
    /// quotient mantissa = a.m × 10^(scale + b.scale - a.scale) / b.m
    /// quotient scale    = MAX_SCALE, lowered while the mantissa overflows
    /// ```
    /// A negative exponent moves the power of ten onto the divisor. The
    /// product is formed in 256 bits, so only the quotient has to fit.
    ///
    /// ## Example
    /// ```rust
    /// use pocketcalc_core::decimal::Decimal;
    /// use pocketcalc_core::CalcError;
    ///
    /// let one = Decimal::parse("1").unwrap();
    /// let three = Decimal::parse("3").unwrap();
    /// assert_eq!(one.checked_div(three).unwrap().to_string(), "0.333333333333");
    /// assert_eq!(one.checked_div(Decimal::zero()), Err(CalcError::DivisionByZero));
    /// ```
    pub fn checked_div(self, other: Decimal) -> CalcResult<Decimal> {
        if other.is_zero() {
            return Err(CalcError::DivisionByZero);
        }

        let negative = self.is_negative() != other.is_negative();
        let dividend = self.mantissa.unsigned_abs();
        let divisor = other.mantissa.unsigned_abs();

        for scale in (0..=MAX_SCALE).rev() {
            let (factor, divisor) = if scale + other.scale >= self.scale {
                (pow10_u(scale + other.scale - self.scale), Some(divisor))
            } else {
                let shift = pow10_u(self.scale - scale - other.scale);
                (Some(1), shift.and_then(|s| divisor.checked_mul(s)))
            };

            let mantissa = factor
                .zip(divisor)
                .and_then(|(factor, divisor)| mul_div_round(dividend, factor, divisor))
                .and_then(|m| with_sign(m, negative));

            if let Some(mantissa) = mantissa {
                return Ok(Decimal::from_parts(mantissa, scale));
            }
        }

        Err(CalcError::Overflow)
    }

    /// Returns one-hundredth of the value (`50` → `0.5`).
    pub fn percent(self) -> Decimal {
        Decimal::from_parts(self.mantissa, self.scale + 2)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// 10^exp, or `None` if it does not fit an i128.
fn pow10(exp: u32) -> Option<i128> {
    10_i128.checked_pow(exp)
}

/// 10^exp as an unsigned magnitude.
fn pow10_u(exp: u32) -> Option<u128> {
    10_u128.checked_pow(exp)
}

/// Applies a sign to a magnitude, `None` if it leaves the i128 range.
fn with_sign(magnitude: u128, negative: bool) -> Option<i128> {
    if negative {
        0_i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    }
}

/// `x × y / d` rounded half away from zero, with the product held in 256
/// bits. `None` when `d` is zero or the quotient exceeds a u128.
///
/// ```text
///  x × y  ──►  (hi, lo)  ──►  shift-subtract by d, 256 steps  ──►  q, r
///                                                  round: r >= d - r
/// ```
fn mul_div_round(x: u128, y: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }

    let (hi, lo) = widening_mul(x, y);

    let mut quotient: u128 = 0;
    let mut remainder: u128 = 0;
    for bit in (0..256u32).rev() {
        let next = if bit >= 128 {
            (hi >> (bit - 128)) & 1
        } else {
            (lo >> bit) & 1
        };

        // remainder < d, so the shifted value is below 2d; track the bit
        // that falls off the top.
        let carry = remainder >> 127;
        remainder = (remainder << 1) | next;

        if carry == 1 || remainder >= d {
            remainder = remainder.wrapping_sub(d);
            if bit >= 128 {
                return None;
            }
            quotient |= 1 << bit;
        }
    }

    if remainder >= d - remainder {
        quotient.checked_add(1)
    } else {
        Some(quotient)
    }
}

/// Full 256-bit product of two u128 values as `(high, low)` halves.
fn widening_mul(x: u128, y: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;

    let (x1, x0) = (x >> 64, x & MASK);
    let (y1, y0) = (y >> 64, y & MASK);

    let p00 = x0 * y0;
    let p01 = x0 * y1;
    let p10 = x1 * y0;
    let p11 = x1 * y1;

    let mid = (p00 >> 64) + (p01 & MASK) + (p10 & MASK);
    let lo = (p00 & MASK) | (mid << 64);
    let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);

    (hi, lo)
}

/// Brings both operands to the larger of their scales.
fn align(a: Decimal, b: Decimal) -> CalcResult<(i128, i128, u32)> {
    let scale = a.scale.max(b.scale);
    let rescale = |d: Decimal| {
        pow10(scale - d.scale)
            .and_then(|factor| d.mantissa.checked_mul(factor))
            .ok_or(CalcError::Overflow)
    };
    Ok((rescale(a)?, rescale(b)?, scale))
}

/// Integer division rounded half away from zero. `den` must be non-zero.
fn div_round(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let remainder = num % den;

    let r_abs = remainder.unsigned_abs();
    let d_abs = den.unsigned_abs();

    // 2|r| >= |d| without the doubling overflow
    if r_abs >= d_abs - r_abs {
        if (num < 0) != (den < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Canonical text: no exponent, no trailing fractional zeros, never `-0`.
///
/// This is exactly what the engine stores back into the current operand
/// after a calculation.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;

        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }

        let padded = format!("{:0>width$}", digits, width = scale + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

/// Default decimal is zero.
impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(text: &str) -> Decimal {
        Decimal::parse(text).unwrap()
    }

    #[test]
    fn test_parse_canonical_forms() {
        assert_eq!(d("16").to_string(), "16");
        assert_eq!(d("007").to_string(), "7");
        assert_eq!(d("1.50").to_string(), "1.5");
        assert_eq!(d(".5").to_string(), "0.5");
        assert_eq!(d("3.").to_string(), "3");
        assert_eq!(d(".").to_string(), "0");
        assert_eq!(d("-0.25").to_string(), "-0.25");
        assert_eq!(d("-0").to_string(), "0");
        assert_eq!(d("0.000").scale(), 0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "-", "1.2.3", "abc", "--1", "1-", " 1", "1e5"] {
            assert!(
                matches!(Decimal::parse(text), Err(CalcError::InvalidOperand(_))),
                "expected {:?} to be rejected",
                text
            );
        }
    }

    #[test]
    fn test_parse_rounds_excess_fraction() {
        // 13th fractional digit is 5 → rounds away from zero
        assert_eq!(d("0.1234567890125").to_string(), "0.123456789013");
        assert_eq!(d("-0.1234567890125").to_string(), "-0.123456789013");
        assert_eq!(d("0.1234567890124999").to_string(), "0.123456789012");
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(40);
        assert_eq!(Decimal::parse(&huge), Err(CalcError::Overflow));
    }

    #[test]
    fn test_addition_is_exact() {
        assert_eq!(d("0.1").checked_add(d("0.2")).unwrap(), d("0.3"));
        assert_eq!(d("5").checked_add(d("0.5")).unwrap().to_string(), "5.5");
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(d("3").checked_sub(d("5")).unwrap().to_string(), "-2");
        assert_eq!(d("1.25").checked_sub(d("0.25")).unwrap().to_string(), "1");
    }

    #[test]
    fn test_multiplication_rounds_to_max_scale() {
        assert_eq!(d("8").checked_mul(d("2")).unwrap().to_string(), "16");
        // 0.000001 × 0.0000015 = 1.5e-12 → rounds to 0.000000000002
        let product = d("0.000001").checked_mul(d("0.0000015")).unwrap();
        assert_eq!(product.to_string(), "0.000000000002");
    }

    #[test]
    fn test_multiplication_overflow() {
        let big = d("100000000000000000000"); // 1e20
        assert_eq!(big.checked_mul(big), Err(CalcError::Overflow));
    }

    #[test]
    fn test_multiplication_of_full_scale_operands() {
        // The unrounded product has 24 fractional digits
        let x = d("123456789.123456789012");
        assert_eq!(
            x.checked_mul(x).unwrap().to_string(),
            "15241578780673678.518585583689"
        );
        let y = d("0.999999999999");
        assert_eq!(y.checked_mul(y).unwrap().to_string(), "0.999999999998");
        assert_eq!(
            d("-500000000000000000000000000").checked_mul(d("2")).unwrap().to_string(),
            "-1000000000000000000000000000"
        );
    }

    #[test]
    fn test_large_quotients_are_representable() {
        let tiny = d("0.000000000001");
        let quotient = d("1000000000000000").checked_div(tiny).unwrap();
        assert_eq!(quotient.to_string(), "1000000000000000000000000000");
        assert_eq!(quotient.scale(), 0);

        assert_eq!(
            d("1000000000000000000000000000").checked_div(d("2")).unwrap().to_string(),
            "500000000000000000000000000"
        );
    }

    #[test]
    fn test_division_keeps_the_fraction_that_fits() {
        // 12 fractional digits fit here...
        assert_eq!(
            d("100000000000000000000000000").checked_div(d("3")).unwrap().to_string(),
            "33333333333333333333333333.333333333333"
        );
        // ...but only 11 fit one order of magnitude higher
        assert_eq!(
            d("1000000000000000000000000000").checked_div(d("-3")).unwrap().to_string(),
            "-333333333333333333333333333.33333333333"
        );
    }

    #[test]
    fn test_division_overflow() {
        let big = d("100000000000000000000000000000000000000"); // 1e38
        assert_eq!(big.checked_div(d("0.1")), Err(CalcError::Overflow));
    }

    #[test]
    fn test_mantissa_and_sign() {
        let value = d("-12.50");
        assert_eq!(value.mantissa(), -125);
        assert_eq!(value.scale(), 1);
        assert!(value.is_negative());
        assert!(!d("0").is_negative());
    }

    #[test]
    fn test_mul_div_round_wide_product() {
        // (2^127) × 10^24 / 10^24 does not fit in 128 bits mid-way
        let big = 1_u128 << 127;
        let scale = 10_u128.pow(24);
        assert_eq!(mul_div_round(big, scale, scale), Some(big));
        assert_eq!(mul_div_round(u128::MAX, u128::MAX, u128::MAX), Some(u128::MAX));
        assert_eq!(mul_div_round(u128::MAX, 2, 1), None);
        assert_eq!(mul_div_round(7, 3, 2), Some(11));
        assert_eq!(mul_div_round(1, 1, 0), None);
    }

    #[test]
    fn test_division() {
        assert_eq!(d("1").checked_div(d("3")).unwrap().to_string(), "0.333333333333");
        assert_eq!(d("2").checked_div(d("3")).unwrap().to_string(), "0.666666666667");
        assert_eq!(d("-2").checked_div(d("3")).unwrap().to_string(), "-0.666666666667");
        assert_eq!(d("10").checked_div(d("4")).unwrap().to_string(), "2.5");
        assert_eq!(d("0.5").checked_div(d("0.25")).unwrap().to_string(), "2");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(d("8").checked_div(d("0")), Err(CalcError::DivisionByZero));
        assert_eq!(d("8").checked_div(d("0.000")), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_percent() {
        assert_eq!(d("50").percent().to_string(), "0.5");
        assert_eq!(d("5").percent().to_string(), "0.05");
        assert_eq!(d("-12.5").percent().to_string(), "-0.125");
        // Beyond MAX_SCALE the result is rounded
        assert_eq!(d("0.00000000001").percent().to_string(), "0");
    }

    #[test]
    fn test_div_round_half_away_from_zero() {
        assert_eq!(div_round(5, 2), 3);
        assert_eq!(div_round(-5, 2), -3);
        assert_eq!(div_round(4, 3), 1);
        assert_eq!(div_round(-4, 3), -1);
        assert_eq!(div_round(7, -2), -4);
    }

    #[test]
    fn test_from_str() {
        let parsed: Decimal = "12.00".parse().unwrap();
        assert_eq!(parsed, d("12"));
    }
}
