// crates/doc-contracts-core/src/interfaces/mod.rs
// ============================================================================
// Module: Doc Contracts Interfaces
// Description: Collaborator interfaces for block parsing, path evaluation, and auditing.
// Purpose: Define the contract surfaces consumed by the scanner and validator.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The core never parses markdown or evaluates `JSONPath` itself. It consumes
//! these capabilities through the traits below so engines can be swapped
//! without touching scanning or validation logic. Implementations must be
//! `Send + Sync`; independent scans and validations may run on separate
//! threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::Block;
use crate::core::KeyLocation;
use crate::core::ScanAuditEvent;

// ============================================================================
// SECTION: Block Parser
// ============================================================================

/// Block parsing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlockParseError {
    /// A fenced code block was never closed.
    #[error("unterminated code fence opened at line {line}")]
    UnterminatedFence {
        /// Line of the opening fence.
        line: usize,
    },
    /// An HTML comment was never closed.
    #[error("unterminated html comment opened at line {line}")]
    UnterminatedComment {
        /// Line of the comment opener.
        line: usize,
    },
    /// Engine-specific parse failure.
    #[error("block parser error: {0}")]
    Engine(String),
}

/// Transforms document text into an ordered block sequence.
pub trait BlockParser: Send + Sync {
    /// Parses `text` into blocks in document order.
    ///
    /// # Errors
    ///
    /// Returns [`BlockParseError`] when the markup is malformed at document level.
    fn parse(&self, text: &str) -> Result<Vec<Block>, BlockParseError>;
}

// ============================================================================
// SECTION: Path Evaluator
// ============================================================================

/// Path evaluation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// Body was not valid JSON.
    #[error("response body is not valid json: {0}")]
    InvalidBody(String),
    /// Body exceeded the evaluator's size limit.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Maximum accepted body size.
        limit: usize,
    },
    /// Path expression could not be compiled.
    #[error("invalid jsonpath expression: {0}")]
    InvalidPath(String),
    /// Path matched nothing in the body.
    #[error("jsonpath {0} did not match any value")]
    NotFound(String),
}

/// Evaluates a path expression against a JSON body.
pub trait PathEvaluator: Send + Sync {
    /// Returns the value addressed by `path` in `body`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] when the body is not JSON or the path does not resolve.
    fn evaluate(&self, body: &str, path: &str) -> Result<Value, PathError>;
}

// ============================================================================
// SECTION: Key Classifier
// ============================================================================

/// Classifies expectation keys into placeholder locations.
pub trait KeyClassifier: Send + Sync {
    /// Returns the location for `key`; unrecognized keys are [`KeyLocation::Invalid`].
    fn classify(&self, key: &str) -> KeyLocation;
}

// ============================================================================
// SECTION: Scan Audit Sink
// ============================================================================

/// Audit sink for scanner recoveries.
pub trait ScanAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ScanAuditEvent);
}

/// No-op scan audit sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopScanAuditSink;

impl ScanAuditSink for NoopScanAuditSink {
    fn record(&self, _event: &ScanAuditEvent) {}
}
