// crates/doc-contracts-core/src/core/diagnostics.rs
// ============================================================================
// Module: Validation Diagnostics
// Description: Severity-tagged diagnostics emitted by expectation validation.
// Purpose: Provide one append-only record type for errors and warnings.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Validation never aborts on a failed expectation. Each failure becomes one
//! [`ValidationDiagnostic`] appended to a [`DiagnosticSink`]; sinks never
//! remove or rewrite records already appended.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Diagnostic Types
// ============================================================================

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational problem that does not fail an expectation.
    Warning,
    /// Failed or unverifiable expectation.
    Error,
}

impl Severity {
    /// Returns a stable label for the severity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Diagnostic code.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorCode {
    /// Actual value did not satisfy the expectation.
    ExpectationConditionFailed,
    /// JSON body could not be parsed or the path could not be evaluated.
    JsonParserException,
    /// Expectation key resolves to an unsupported placeholder location.
    InvalidExpectationKey,
}

impl ValidationErrorCode {
    /// Returns a stable label for the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpectationConditionFailed => "ExpectationConditionFailed",
            Self::JsonParserException => "JsonParserException",
            Self::InvalidExpectationKey => "InvalidExpectationKey",
        }
    }
}

/// A validation error or warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDiagnostic {
    /// Diagnostic severity.
    pub severity: Severity,
    /// Diagnostic code.
    pub code: ValidationErrorCode,
    /// Optional source location reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl ValidationDiagnostic {
    /// Creates an error-severity diagnostic without a source reference.
    #[must_use]
    pub fn error(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            source: None,
            message: message.into(),
        }
    }

    /// Creates a warning-severity diagnostic without a source reference.
    #[must_use]
    pub fn warning(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            source: None,
            message: message.into(),
        }
    }

    /// Returns true for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(
                f,
                "{} [{}] {}: {}",
                self.severity.as_str(),
                self.code.as_str(),
                source,
                self.message
            ),
            None => {
                write!(f, "{} [{}] {}", self.severity.as_str(), self.code.as_str(), self.message)
            }
        }
    }
}

// ============================================================================
// SECTION: Sink
// ============================================================================

/// Append-only destination for validation diagnostics.
pub trait DiagnosticSink {
    /// Appends one diagnostic.
    fn push_diagnostic(&mut self, diagnostic: ValidationDiagnostic);
}

impl DiagnosticSink for Vec<ValidationDiagnostic> {
    fn push_diagnostic(&mut self, diagnostic: ValidationDiagnostic) {
        self.push(diagnostic);
    }
}
