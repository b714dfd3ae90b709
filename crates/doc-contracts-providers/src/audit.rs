// crates/doc-contracts-providers/src/audit.rs
// ============================================================================
// Module: Scan Audit Sinks
// Description: JSON-lines sinks for scanner audit events.
// Purpose: Persist skipped-annotation reports to stderr or an append-only file.
// Dependencies: doc-contracts-core, serde_json
// ============================================================================

//! ## Overview
//! Each [`ScanAuditEvent`] is serialized to one JSON line. Write failures are
//! dropped so auditing never fails a scan.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use doc_contracts_core::ScanAuditEvent;
use doc_contracts_core::ScanAuditSink;

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink that logs JSON lines to stderr.
pub struct StderrScanAuditSink;

impl ScanAuditSink for StderrScanAuditSink {
    fn record(&self, event: &ScanAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileScanAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileScanAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ScanAuditSink for FileScanAuditSink {
    fn record(&self, event: &ScanAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
