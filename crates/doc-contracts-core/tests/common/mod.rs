// crates/doc-contracts-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Stub collaborators shared by core integration tests.
// Purpose: Drive the scanner and validator without concrete engines.
// Dependencies: doc-contracts-core, serde_json
// ============================================================================

//! ## Overview
//! Provides preset block parsers, a field-lookup path evaluator, a recording
//! audit sink, and block builders for scanner and validator tests.

#![allow(
    dead_code,
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Mutex;

use doc_contracts_core::Block;
use doc_contracts_core::BlockKind;
use doc_contracts_core::BlockParseError;
use doc_contracts_core::BlockParser;
use doc_contracts_core::PathError;
use doc_contracts_core::PathEvaluator;
use doc_contracts_core::ScanAuditEvent;
use doc_contracts_core::ScanAuditSink;
use doc_contracts_core::ScanEventKind;
use serde_json::Value;

// ============================================================================
// SECTION: Block Parsers
// ============================================================================

/// Block parser that ignores its input and returns preset blocks.
pub struct PresetBlocks {
    /// Blocks returned from every parse.
    pub blocks: Vec<Block>,
}

impl PresetBlocks {
    /// Creates a parser returning `blocks`.
    pub const fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
        }
    }
}

impl BlockParser for PresetBlocks {
    fn parse(&self, _text: &str) -> Result<Vec<Block>, BlockParseError> {
        Ok(self.blocks.clone())
    }
}

/// Block parser that always reports an unterminated fence.
pub struct FailingParser;

impl BlockParser for FailingParser {
    fn parse(&self, _text: &str) -> Result<Vec<Block>, BlockParseError> {
        Err(BlockParseError::UnterminatedFence {
            line: 3,
        })
    }
}

// ============================================================================
// SECTION: Path Evaluator
// ============================================================================

/// Path evaluator supporting `$` and top-level `$.field` lookups.
pub struct FieldEvaluator;

impl PathEvaluator for FieldEvaluator {
    fn evaluate(&self, body: &str, path: &str) -> Result<Value, PathError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| PathError::InvalidBody(err.to_string()))?;
        if path == "$" {
            return Ok(value);
        }
        let field =
            path.strip_prefix("$.").ok_or_else(|| PathError::InvalidPath(path.to_string()))?;
        value.get(field).cloned().ok_or_else(|| PathError::NotFound(path.to_string()))
    }
}

// ============================================================================
// SECTION: Audit Sink
// ============================================================================

/// Audit sink that keeps every event.
#[derive(Default)]
pub struct RecordingSink {
    /// Recorded events in order.
    pub events: Mutex<Vec<ScanAuditEvent>>,
}

impl RecordingSink {
    /// Returns the recorded event kinds in order.
    pub fn kinds(&self) -> Vec<ScanEventKind> {
        self.events.lock().expect("audit lock").iter().map(|event| event.kind).collect()
    }
}

impl ScanAuditSink for RecordingSink {
    fn record(&self, event: &ScanAuditEvent) {
        self.events.lock().expect("audit lock").push(event.clone());
    }
}

// ============================================================================
// SECTION: Block Builders
// ============================================================================

/// Builds an annotation comment block around `json`.
pub fn annotation(json: &str, line: usize) -> Block {
    Block::new(BlockKind::RawMarkup, format!("<!-- {json} -->"), line)
}

/// Builds a JSON code block.
pub fn code(content: &str, line: usize) -> Block {
    Block::new(BlockKind::CodeBlock, content, line).with_info("json")
}

/// Builds a paragraph block.
pub fn paragraph(content: &str, line: usize) -> Block {
    Block::new(BlockKind::Paragraph, content, line)
}

/// Builds a heading block.
pub fn heading(content: &str, line: usize) -> Block {
    Block::new(BlockKind::Heading, content, line)
}
