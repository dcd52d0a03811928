//! # Display Formatting
//!
//! Turns raw operand text into what the screen shows.
//!
//! Raw storage keeps exactly what was typed (`"007."`); normalization only
//! happens on the way out:
//! ```text
//! raw "007."  ──normalize_operand──►  "7."
//! raw ".5"    ──normalize_operand──►  "0.5"
//! raw ""      ──normalize_operand──►  "0"
//! "1234567.5" ──group_thousands────►  "1,234,567.5"   (front end option)
//! ```

/// Normalizes an operand for display.
///
/// ## Rules
/// - Empty text shows as `"0"`
/// - Redundant leading zeros of the integer part are dropped
/// - An empty integer part shows as `0`
/// - Sign and fractional part are kept exactly as typed
///
/// ## Example
/// ```rust
/// use pocketcalc_core::format::normalize_operand;
///
/// assert_eq!(normalize_operand("00"), "0");
/// assert_eq!(normalize_operand("-0012.50"), "-12.50");
/// assert_eq!(normalize_operand("."), "0.");
/// ```
pub fn normalize_operand(text: &str) -> String {
    let (sign, body) = split_sign(text);

    if body.is_empty() {
        return "0".to_string();
    }

    let (int_part, frac_part) = split_fraction(body);
    let int_part = match int_part.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    format!("{}{}{}", sign, int_part, frac_part)
}

/// Inserts `separator` between every group of three integer digits.
///
/// ## Example
/// ```rust
/// use pocketcalc_core::format::group_thousands;
///
/// assert_eq!(group_thousands("-1234567.891", ','), "-1,234,567.891");
/// assert_eq!(group_thousands("999", ','), "999");
/// ```
pub fn group_thousands(text: &str, separator: char) -> String {
    let (sign, body) = split_sign(text);
    let (int_part, frac_part) = split_fraction(body);

    // Not a plain number (e.g. the error token): leave it alone
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return text.to_string();
    }

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    grouped.push_str(sign);

    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    grouped.push_str(frac_part);
    grouped
}

/// Splits off a leading minus sign.
fn split_sign(text: &str) -> (&str, &str) {
    match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    }
}

/// Splits at the decimal point; the fractional half keeps its `.`.
fn split_fraction(body: &str) -> (&str, &str) {
    match body.find('.') {
        Some(pos) => body.split_at(pos),
        None => (body, ""),
    }
}
