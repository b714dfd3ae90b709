// crates/doc-contracts-core/src/core/audit.rs
// ============================================================================
// Module: Scan Audit Events
// Description: Records describing annotation pairs the scanner skipped or ignored.
// Purpose: Report recoverable authoring problems without failing the scan.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Malformed annotation/payload pairs never abort a scan. The scanner reports
//! each recovery as a [`ScanAuditEvent`] to a
//! [`crate::interfaces::ScanAuditSink`]; events are JSON-serializable so
//! sinks can emit them as JSON lines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Event Kinds
// ============================================================================

/// Scan audit event classification.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanEventKind {
    /// Annotation was not a `<!-- {json} -->` object or lacked `blockType`.
    MalformedAnnotation,
    /// Annotation was the last retained block.
    MissingPayload,
    /// Block following an annotation was not a code block.
    PayloadNotCode,
    /// `resource` annotation without `@odata.type`.
    MissingResourceType,
    /// `response` annotation with no preceding `request`.
    OrphanResponse,
    /// `resource` annotation replaced an earlier resource of the same name.
    DuplicateResource,
    /// Annotation declared an unrecognized `blockType`.
    UnknownBlockType,
}

// ============================================================================
// SECTION: Event Payload
// ============================================================================

/// Scan audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanAuditEvent {
    /// Event name.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Display name of the scanned document.
    pub document: String,
    /// Source line of the annotation block.
    pub line: usize,
    /// Event classification.
    pub kind: ScanEventKind,
    /// Human-readable detail.
    pub message: String,
}

impl ScanAuditEvent {
    /// Creates a new scan audit event with a consistent timestamp.
    #[must_use]
    pub fn new(
        document: impl Into<String>,
        line: usize,
        kind: ScanEventKind,
        message: impl Into<String>,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "scan_audit",
            timestamp_ms,
            document: document.into(),
            line,
            kind,
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
