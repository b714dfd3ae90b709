// crates/doc-contracts-core/src/runtime/equality.rs
// ============================================================================
// Module: Token Equality
// Description: Equality between expected JSON values and observed response values.
// Purpose: Decide whether an actual value matches one expected candidate.
// Dependencies: bigdecimal, serde_json
// ============================================================================

//! ## Overview
//! Observed values are either raw text (the body, a header) or JSON (a
//! `JSONPath` result). JSON is compared structurally with decimal-aware
//! numbers, so `5` equals `5.0`. Raw text equals a string candidate when the
//! text is identical; otherwise the text is parsed as JSON and compared
//! structurally. Text that is not JSON never equals a structured candidate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Actual Values
// ============================================================================

/// Observed value resolved from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActualValue {
    /// Raw text from the body or a header.
    Text(String),
    /// JSON value selected from the body.
    Json(Value),
}

impl fmt::Display for ActualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) | Self::Json(Value::String(text)) => f.write_str(text),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

// ============================================================================
// SECTION: Equality
// ============================================================================

/// Returns true when `actual` equals the expected candidate.
#[must_use]
pub fn token_equals(expected: &Value, actual: &ActualValue) -> bool {
    match actual {
        ActualValue::Json(value) => json_equals(expected, value),
        ActualValue::Text(text) => {
            if let Value::String(expected_text) = expected
                && expected_text == text
            {
                return true;
            }
            serde_json::from_str::<Value>(text).is_ok_and(|parsed| json_equals(expected, &parsed))
        }
    }
}

/// Compares JSON values structurally, with decimal-aware numeric handling.
#[must_use]
pub fn json_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left_num), Value::Number(right_num)) => {
            decimal_equals(left_num, right_num)
        }
        (Value::Array(left_items), Value::Array(right_items)) => {
            left_items.len() == right_items.len()
                && left_items.iter().zip(right_items).all(|(left, right)| json_equals(left, right))
        }
        (Value::Object(left_map), Value::Object(right_map)) => {
            left_map.len() == right_map.len()
                && left_map.iter().all(|(key, left_value)| {
                    right_map.get(key).is_some_and(|right_value| json_equals(left_value, right_value))
                })
        }
        _ => left == right,
    }
}

/// Compares numbers by parsing them into `BigDecimal` values.
fn decimal_equals(left: &Number, right: &Number) -> bool {
    match (decimal_from_number(left), decimal_from_number(right)) {
        (Some(left), Some(right)) => left == right,
        _ => left == right,
    }
}

/// Parses a JSON number into `BigDecimal` with a stable string representation.
fn decimal_from_number(number: &Number) -> Option<BigDecimal> {
    let rendered = number.to_string();
    BigDecimal::from_str(&rendered).ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
