// crates/doc-contracts-core/src/runtime/mod.rs
// ============================================================================
// Module: Doc Contracts Runtime
// Description: Scanner, validator, and the pure helpers they share.
// Purpose: Execute document scans and expectation checks over core types.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime holds the two engines of the crate, [`DocumentScanner`] and
//! [`ExpectationValidator`], together with token equality and the standard
//! key classifier. Both engines are synchronous and keep no shared state.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod classifier;
pub mod equality;
pub mod scanner;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use classifier::StandardKeyClassifier;
pub use classifier::classify_key;
pub use equality::ActualValue;
pub use equality::json_equals;
pub use equality::token_equals;
pub use scanner::DEFAULT_MAX_DOCUMENT_BYTES;
pub use scanner::DocumentScanner;
pub use scanner::ScanError;
pub use scanner::ScanLimits;
pub use validator::ExpectationValidator;
