// crates/doc-contracts-providers/src/jsonpath.rs
// ============================================================================
// Module: JSONPath Evaluator
// Description: `jsonpath_lib`-backed path evaluation over response bodies.
// Purpose: Resolve `$`-prefixed expectation keys against JSON bodies.
// Dependencies: doc-contracts-core, jsonpath_lib, serde_json
// ============================================================================

//! ## Overview
//! [`JsonPathEvaluator`] parses the response body with `serde_json` and
//! evaluates the expression with `jsonpath_lib`. Zero matches is
//! [`PathError::NotFound`], one match is returned as-is, and several matches
//! are returned as a JSON array in match order.
//! Invariants:
//! - Bodies larger than the configured limit are rejected before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use doc_contracts_core::PathError;
use doc_contracts_core::PathEvaluator;
use jsonpath_lib::select;
use serde_json::Value;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum response body size in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// `JSONPath` evaluator with a body size limit.
#[derive(Debug, Clone, Copy)]
pub struct JsonPathEvaluator {
    /// Maximum accepted body size in bytes.
    max_body_bytes: usize,
}

impl JsonPathEvaluator {
    /// Creates an evaluator with the given body size limit.
    #[must_use]
    pub const fn new(max_body_bytes: usize) -> Self {
        Self {
            max_body_bytes,
        }
    }

    /// Returns the body size limit in bytes.
    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

impl Default for JsonPathEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_BYTES)
    }
}

impl PathEvaluator for JsonPathEvaluator {
    fn evaluate(&self, body: &str, path: &str) -> Result<Value, PathError> {
        if body.len() > self.max_body_bytes {
            return Err(PathError::BodyTooLarge {
                limit: self.max_body_bytes,
            });
        }
        let document: Value =
            serde_json::from_str(body).map_err(|err| PathError::InvalidBody(err.to_string()))?;
        select_jsonpath(&document, path)?.ok_or_else(|| PathError::NotFound(path.to_string()))
    }
}

/// Selects values using a `JSONPath` expression.
fn select_jsonpath(document: &Value, path: &str) -> Result<Option<Value>, PathError> {
    let matches = select(document, path).map_err(|_| PathError::InvalidPath(path.to_string()))?;
    match matches.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some((*single).clone())),
        many => Ok(Some(Value::Array(many.iter().map(|value| (*value).clone()).collect()))),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
