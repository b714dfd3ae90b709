// crates/doc-contracts-providers/src/lib.rs
// ============================================================================
// Module: Doc Contracts Providers
// Description: Concrete collaborators for the Doc Contracts core.
// Purpose: Supply markdown parsing, JSONPath evaluation, and audit output.
// Dependencies: doc-contracts-core, jsonpath_lib, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the engines the core consumes through its interfaces:
//! a line-oriented markdown [`MarkdownBlockParser`], a `jsonpath_lib`-backed
//! [`JsonPathEvaluator`], and JSON-lines scan audit sinks.
//! Invariants:
//! - Document and body inputs are untrusted; size limits fail closed.
//! - Audit sinks never fail the caller; write errors are dropped.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod jsonpath;
pub mod markdown;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileScanAuditSink;
pub use audit::StderrScanAuditSink;
pub use jsonpath::DEFAULT_MAX_BODY_BYTES;
pub use jsonpath::JsonPathEvaluator;
pub use markdown::MarkdownBlockParser;
pub use markdown::parse_blocks;
