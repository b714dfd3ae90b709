// crates/doc-contracts-core/src/lib.rs
// ============================================================================
// Module: Doc Contracts Core Library
// Description: Public API surface for the Doc Contracts core.
// Purpose: Expose document/scenario types, collaborator interfaces, and runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Doc Contracts core extracts API contracts embedded in documentation and
//! checks recorded HTTP responses against declared expectations. The
//! [`runtime::DocumentScanner`] turns a block sequence into a
//! [`DocumentModel`]; the [`runtime::ExpectationValidator`] compares a
//! [`ScenarioDefinition`] against an [`HttpResponse`] and appends
//! [`ValidationDiagnostic`] records to a caller-owned sink.
//!
//! Markdown parsing, `JSONPath` evaluation, and audit output are consumed
//! through the traits in [`interfaces`]; concrete implementations live in
//! `doc-contracts-providers`. The core performs no I/O.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::BlockParseError;
pub use interfaces::BlockParser;
pub use interfaces::KeyClassifier;
pub use interfaces::NoopScanAuditSink;
pub use interfaces::PathError;
pub use interfaces::PathEvaluator;
pub use interfaces::ScanAuditSink;
pub use runtime::ActualValue;
pub use runtime::DEFAULT_MAX_DOCUMENT_BYTES;
pub use runtime::DocumentScanner;
pub use runtime::ExpectationValidator;
pub use runtime::ScanError;
pub use runtime::ScanLimits;
pub use runtime::StandardKeyClassifier;
pub use runtime::classify_key;
pub use runtime::json_equals;
pub use runtime::token_equals;
