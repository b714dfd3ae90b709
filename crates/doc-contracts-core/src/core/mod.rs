// crates/doc-contracts-core/src/core/mod.rs
// ============================================================================
// Module: Doc Contracts Core Types
// Description: Canonical document, scenario, response, and diagnostic types.
// Purpose: Provide stable, serializable types shared by scanning and validation.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types describe the blocks of a parsed document, the resources and
//! methods extracted from it, the scenarios checked against responses, and
//! the diagnostics produced by validation. Scanning and validation share
//! only these types.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod blocks;
pub mod diagnostics;
pub mod document;
pub mod location;
pub mod response;
pub mod scenario;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ScanAuditEvent;
pub use audit::ScanEventKind;
pub use blocks::Block;
pub use blocks::BlockKind;
pub use diagnostics::DiagnosticSink;
pub use diagnostics::Severity;
pub use diagnostics::ValidationDiagnostic;
pub use diagnostics::ValidationErrorCode;
pub use document::DocumentModel;
pub use document::MethodDefinition;
pub use document::ResourceDefinition;
pub use location::KeyLocation;
pub use response::HttpResponse;
pub use response::ResponseParseError;
pub use scenario::Expectation;
pub use scenario::ScenarioDefinition;
pub use scenario::ScenarioLoadError;
pub use scenario::load_scenarios;
