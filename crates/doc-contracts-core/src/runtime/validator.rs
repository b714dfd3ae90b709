// crates/doc-contracts-core/src/runtime/validator.rs
// ============================================================================
// Module: Expectation Validator
// Description: Comparison of scenario expectations against an observed response.
// Purpose: Produce one diagnostic per failed or malformed expectation key.
// Dependencies: crate::{core, interfaces, runtime::equality}, serde_json
// ============================================================================

//! ## Overview
//! For each expectation key, in key order, the validator classifies the key,
//! resolves the actual value from the response, and checks it against the
//! expected value. Diagnostics are appended to a caller-owned
//! [`DiagnosticSink`]; validation itself never fails.
//!
//! Invariants:
//! - At most one diagnostic is appended per key.
//! - Path evaluation failures surface as `JsonParserException` errors.
//! - Keys that do not address the response surface as warnings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::DiagnosticSink;
use crate::core::Expectation;
use crate::core::HttpResponse;
use crate::core::KeyLocation;
use crate::core::ScenarioDefinition;
use crate::core::ValidationDiagnostic;
use crate::core::ValidationErrorCode;
use crate::interfaces::KeyClassifier;
use crate::interfaces::PathEvaluator;
use crate::runtime::equality::ActualValue;
use crate::runtime::equality::token_equals;

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validates scenarios against responses.
pub struct ExpectationValidator<'a> {
    /// Key-to-location classifier.
    classifier: &'a dyn KeyClassifier,
    /// `JSONPath` engine used for [`KeyLocation::Json`] keys.
    evaluator: &'a dyn PathEvaluator,
}

impl<'a> ExpectationValidator<'a> {
    /// Creates a validator from its collaborators.
    #[must_use]
    pub fn new(classifier: &'a dyn KeyClassifier, evaluator: &'a dyn PathEvaluator) -> Self {
        Self {
            classifier,
            evaluator,
        }
    }

    /// Validates every expectation of `scenario` against `response`.
    pub fn validate(
        &self,
        scenario: &ScenarioDefinition,
        response: &HttpResponse,
        sink: &mut dyn DiagnosticSink,
    ) {
        for (key, expected) in &scenario.expectations {
            if let Some(diagnostic) = self.check_key(key, expected, response) {
                sink.push_diagnostic(diagnostic);
            }
        }
    }

    /// Validates a scenario and returns its diagnostics.
    #[must_use]
    pub fn validate_to_vec(
        &self,
        scenario: &ScenarioDefinition,
        response: &HttpResponse,
    ) -> Vec<ValidationDiagnostic> {
        let mut diagnostics = Vec::new();
        self.validate(scenario, response, &mut diagnostics);
        diagnostics
    }

    /// Checks one key, returning its diagnostic when the expectation is not met.
    fn check_key(
        &self,
        key: &str,
        expected: &Expectation,
        response: &HttpResponse,
    ) -> Option<ValidationDiagnostic> {
        let location = self.classifier.classify(key);
        if !location.is_response_location() {
            return Some(ValidationDiagnostic::warning(
                ValidationErrorCode::InvalidExpectationKey,
                format!(
                    "The expectation key {key} is invalid. Supported types are Body, HttpHeader, \
                     and JsonPath."
                ),
            ));
        }

        let actual = match self.resolve(&location, response) {
            Ok(actual) => actual,
            Err(message) => {
                return Some(ValidationDiagnostic::error(
                    ValidationErrorCode::JsonParserException,
                    message,
                ));
            }
        };

        match (expected, actual) {
            (Expectation::NoConstraint, _) => None,
            (_, None) => Some(ValidationDiagnostic::error(
                ValidationErrorCode::ExpectationConditionFailed,
                format!(
                    "Expectation {key}={expected} failed. Actual value was null and a value was \
                     expected."
                ),
            )),
            (expected, Some(actual)) if expectation_satisfied(expected, &actual) => None,
            (expected, Some(actual)) => Some(ValidationDiagnostic::error(
                ValidationErrorCode::ExpectationConditionFailed,
                format!("Expectation {key} = {expected} failed. Actual value: {actual}"),
            )),
        }
    }

    /// Resolves the actual value at a response location; `None` means absent.
    fn resolve(
        &self,
        location: &KeyLocation,
        response: &HttpResponse,
    ) -> Result<Option<ActualValue>, String> {
        match location {
            KeyLocation::Body => Ok(response.body_text().map(|body| ActualValue::Text(body.to_string()))),
            KeyLocation::HttpHeader(name) => {
                Ok(response.first_header(name).map(|value| ActualValue::Text(value.to_string())))
            }
            KeyLocation::Json(path) => match self.evaluator.evaluate(&response.body, path) {
                Ok(Value::Null) => Ok(None),
                Ok(value) => Ok(Some(ActualValue::Json(value))),
                Err(err) => Err(err.to_string()),
            },
            KeyLocation::Url | KeyLocation::StoredValue(_) | KeyLocation::Invalid => Ok(None),
        }
    }
}

/// Returns true when a present actual value satisfies the expectation.
fn expectation_satisfied(expected: &Expectation, actual: &ActualValue) -> bool {
    match expected {
        Expectation::NoConstraint => true,
        Expectation::Scalar(value) => token_equals(value, actual),
        Expectation::AnyOf(candidates) => {
            candidates.iter().any(|candidate| token_equals(candidate, actual))
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
