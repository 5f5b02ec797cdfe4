//! Decimal String Utilities
//!
//! Amounts travel through the form as strings and are never converted to
//! binary floating point. This module owns every operation on those strings:
//!
//! - format checks against a currency's required precision
//! - exact magnitude comparison (arbitrary precision)
//! - hint strings describing the expected format
//! - live normalization of raw keystrokes
//!
//! ## Usage
//! ```rust
//! use transfer_form::decimal::{check_decimal_precision, is_first_greater_or_equal};
//!
//! assert!(check_decimal_precision("100.000", 3));
//! assert!(!check_decimal_precision("1.5", 3)); // trailing zeros must be explicit
//! assert!(!is_first_greater_or_equal("1000.000", "999999.000").unwrap());
//! ```

use std::cmp::Ordering;

use num_bigint::BigInt;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Decimal utility errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecimalError {
    #[error("Invalid decimal format: '{0}'")]
    InvalidDecimalFormat(String),
}

// ============================================================================
// Format Checks
// ============================================================================

/// Check that `value` has exactly `precision` fractional digits.
///
/// # Rules
/// - Empty string always passes (required-ness is a separate rule)
/// - `precision > 0`: must match `digits "." digits{precision}`
/// - `precision == 0`: must match `digits ("." digits)?`
///
/// This is a format check, not a numeric one: `"1.5"` fails precision 3.
pub fn check_decimal_precision(value: &str, precision: u32) -> bool {
    if value.is_empty() {
        return true;
    }

    let (whole, frac) = match value.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (value, None),
    };

    if !is_digits(whole) {
        return false;
    }

    match (precision, frac) {
        (0, None) => true,
        (0, Some(frac)) => is_digits(frac),
        (_, None) => false,
        (p, Some(frac)) => is_digits(frac) && frac.len() == p as usize,
    }
}

/// Non-empty and ASCII digits only
fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Exact Comparison
// ============================================================================

/// A parsed decimal literal: `mantissa * 10^-scale`
#[derive(Debug)]
struct ParsedDecimal {
    mantissa: BigInt,
    scale: usize,
}

/// Parse a decimal literal without going through floating point.
///
/// Accepts an optional sign, then digits with an optional fractional part
/// (`5`, `-5`, `5.25`, `.5`, `5.`). At least one digit is required and
/// surrounding whitespace is rejected.
fn parse_decimal_literal(s: &str) -> Result<ParsedDecimal, DecimalError> {
    let invalid = || DecimalError::InvalidDecimalFormat(s.to_string());

    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{whole}{frac}");
    let mut mantissa: BigInt = digits.parse().map_err(|_| invalid())?;
    if negative {
        mantissa = -mantissa;
    }

    Ok(ParsedDecimal {
        mantissa,
        scale: frac.len(),
    })
}

/// Rescale to a common exponent so mantissas can be compared directly
fn rescale(value: &ParsedDecimal, scale: usize, literal: &str) -> Result<BigInt, DecimalError> {
    let shift = u32::try_from(scale - value.scale)
        .map_err(|_| DecimalError::InvalidDecimalFormat(literal.to_string()))?;
    Ok(&value.mantissa * BigInt::from(10u8).pow(shift))
}

/// Compare two decimal literals exactly.
///
/// # Errors
/// * `InvalidDecimalFormat` - If either string is not a decimal literal
pub fn compare_decimals(a: &str, b: &str) -> Result<Ordering, DecimalError> {
    let parsed_a = parse_decimal_literal(a)?;
    let parsed_b = parse_decimal_literal(b)?;

    // A failed shift is reported against the literal with the longer fraction
    let scale = parsed_a.scale.max(parsed_b.scale);
    let lhs = rescale(&parsed_a, scale, b)?;
    let rhs = rescale(&parsed_b, scale, a)?;
    Ok(lhs.cmp(&rhs))
}

/// Returns `a >= b`, compared as arbitrary-precision decimals.
///
/// # Example
/// ```rust
/// use transfer_form::decimal::is_first_greater_or_equal;
///
/// assert!(is_first_greater_or_equal("100.000", "100.000").unwrap());
/// assert!(!is_first_greater_or_equal("1000.000", "999999.000").unwrap());
/// ```
pub fn is_first_greater_or_equal(a: &str, b: &str) -> Result<bool, DecimalError> {
    Ok(compare_decimals(a, b)? != Ordering::Less)
}

// ============================================================================
// Display Helpers
// ============================================================================

/// Placeholder-style hint for the expected format: `"0"` or `"0.000"`.
pub fn generate_decimal_hint_string(decimals: u32) -> String {
    if decimals == 0 {
        return "0".to_string();
    }
    format!("0.{}", "0".repeat(decimals as usize))
}

/// Normalize raw keystrokes into a decimal-looking string.
///
/// Drops every character that is not a digit or a dot and keeps only the
/// first dot: `"1a2.3b4"` becomes `"12.34"`, `"1.2.3"` becomes `"1.23"`.
pub fn normalize_decimal_input(raw: &str) -> String {
    let mut seen_dot = false;
    raw.chars()
        .filter(|&c| match c {
            '0'..='9' => true,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            _ => false,
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_exact_match() {
        assert!(check_decimal_precision("100.000", 3));
        assert!(check_decimal_precision("0.00", 2));
        assert!(check_decimal_precision("999999.000", 3));
    }

    #[test]
    fn test_precision_empty_always_passes() {
        assert!(check_decimal_precision("", 0));
        assert!(check_decimal_precision("", 3));
    }

    #[test]
    fn test_precision_rejects_implicit_trailing_zeros() {
        assert!(!check_decimal_precision("1.5", 3));
        assert!(!check_decimal_precision("1", 2));
        assert!(!check_decimal_precision("1.2345", 3));
    }

    #[test]
    fn test_precision_rejects_malformed() {
        let cases = ["1.", ".500", "1.2.3", "1,000", "-1.000", "1e3", "abc", " 1.000"];
        for case in cases {
            assert!(
                !check_decimal_precision(case, 3),
                "Should reject invalid format: {}",
                case
            );
        }
    }

    #[test]
    fn test_precision_zero_accepts_generic_decimal() {
        assert!(check_decimal_precision("100", 0));
        assert!(check_decimal_precision("100.5", 0));
        assert!(!check_decimal_precision("100.", 0));
        assert!(!check_decimal_precision(".5", 0));
    }

    #[test]
    fn test_compare_beyond_float_precision() {
        // Differs at the 30th significant digit; f64 cannot tell these apart
        let a = "123456789012345678901234567890.001";
        let b = "123456789012345678901234567890.000";
        assert!(is_first_greater_or_equal(a, b).unwrap());
        assert!(!is_first_greater_or_equal(b, a).unwrap());
    }

    #[test]
    fn test_compare_scales_and_signs() {
        assert_eq!(compare_decimals("1.5", "1.500").unwrap(), Ordering::Equal);
        assert_eq!(compare_decimals("1000.000", "999999.000").unwrap(), Ordering::Less);
        assert_eq!(compare_decimals("-1", "0.001").unwrap(), Ordering::Less);
        assert_eq!(compare_decimals(".5", "0.4").unwrap(), Ordering::Greater);
        assert!(is_first_greater_or_equal("100.000", "100.000").unwrap());
    }

    #[test]
    fn test_compare_invalid_literal() {
        for bad in ["", ".", "-", "1.2.3", "abc", "1e5", "12a", " 5", "5 ", " 5 "] {
            assert!(
                matches!(
                    is_first_greater_or_equal(bad, "1.000"),
                    Err(DecimalError::InvalidDecimalFormat(_))
                ),
                "Should reject literal: {:?}",
                bad
            );
        }
        assert!(is_first_greater_or_equal("1.000", "x").is_err());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_rescale_rejects_oversized_shift() {
        let value = ParsedDecimal {
            mantissa: BigInt::from(1),
            scale: 0,
        };
        let too_wide = u32::MAX as usize + 1;
        assert_eq!(
            rescale(&value, too_wide, "1.000"),
            Err(DecimalError::InvalidDecimalFormat("1.000".to_string()))
        );
        assert_eq!(rescale(&value, 3, "1.000"), Ok(BigInt::from(1000)));
    }

    #[test]
    fn test_hint_string() {
        assert_eq!(generate_decimal_hint_string(0), "0");
        assert_eq!(generate_decimal_hint_string(2), "0.00");
        assert_eq!(generate_decimal_hint_string(3), "0.000");
    }

    #[test]
    fn test_normalize_keystrokes() {
        assert_eq!(normalize_decimal_input("1a2.3b4"), "12.34");
        assert_eq!(normalize_decimal_input("1.2.3"), "1.23");
        assert_eq!(normalize_decimal_input("-5,00"), "500");
        assert_eq!(normalize_decimal_input("abc"), "");
    }
}
