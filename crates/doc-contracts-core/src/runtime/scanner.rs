// crates/doc-contracts-core/src/runtime/scanner.rs
// ============================================================================
// Module: Documentation Scanner
// Description: Extraction of resources and request/response methods from blocks.
// Purpose: Turn one document's annotated code examples into a document model.
// Dependencies: crate::{core, interfaces}, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The scanner keeps only code and raw markup blocks, then walks them with a
//! cursor. A raw markup block is an annotation (`<!-- {json} -->`) and the
//! block after it is its payload; both are consumed together whether or not
//! the pair is well formed. Annotations dispatch on `blockType`:
//!
//! - `resource` adds a [`ResourceDefinition`] keyed by `@odata.type`;
//! - `request` appends a [`MethodDefinition`];
//! - `response` completes the most recent request.
//!
//! Invariants:
//! - Only block parser failures (and the size limit) fail a scan.
//! - Malformed pairs are skipped and reported to the [`ScanAuditSink`].
//! - A response never creates a method; without a prior request it is skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::Block;
use crate::core::BlockKind;
use crate::core::DocumentModel;
use crate::core::MethodDefinition;
use crate::core::ResourceDefinition;
use crate::core::ScanAuditEvent;
use crate::core::ScanEventKind;
use crate::interfaces::BlockParseError;
use crate::interfaces::BlockParser;
use crate::interfaces::ScanAuditSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum document size in bytes.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;
/// Annotation comment opener.
const COMMENT_OPEN: &str = "<!--";
/// Annotation comment closer.
const COMMENT_CLOSE: &str = "-->";

// ============================================================================
// SECTION: Errors and Limits
// ============================================================================

/// Document-level scan failures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// The block parser rejected the document.
    #[error("failed to parse document blocks: {0}")]
    Parse(#[from] BlockParseError),
    /// The document exceeded the configured size limit.
    #[error("document is {size} bytes, limit is {limit} bytes")]
    TooLarge {
        /// Document size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Scanner limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Maximum document size in bytes.
    pub max_document_bytes: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Scans documents into [`DocumentModel`] values.
pub struct DocumentScanner<'a> {
    /// Markdown-to-blocks engine.
    parser: &'a dyn BlockParser,
    /// Destination for skipped-pair reports.
    audit: &'a dyn ScanAuditSink,
    /// Size limits.
    limits: ScanLimits,
}

impl<'a> DocumentScanner<'a> {
    /// Creates a scanner with default limits.
    #[must_use]
    pub fn new(parser: &'a dyn BlockParser, audit: &'a dyn ScanAuditSink) -> Self {
        Self {
            parser,
            audit,
            limits: ScanLimits::default(),
        }
    }

    /// Replaces the scanner limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: ScanLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Scans one document.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when the document is too large or its blocks cannot be parsed.
    pub fn scan(&self, display_name: &str, text: &str) -> Result<DocumentModel, ScanError> {
        if text.len() > self.limits.max_document_bytes {
            return Err(ScanError::TooLarge {
                size: text.len(),
                limit: self.limits.max_document_bytes,
            });
        }

        let retained: Vec<Block> =
            self.parser.parse(text)?.into_iter().filter(|block| block.kind.is_structural()).collect();

        let mut state = ScanState::new(display_name);
        let mut cursor = 0;
        while cursor < retained.len() {
            let annotation = &retained[cursor];
            if annotation.kind != BlockKind::RawMarkup {
                cursor += 1;
                continue;
            }
            if let Some(issue) = state.apply_pair(annotation, retained.get(cursor + 1)) {
                self.audit.record(&ScanAuditEvent::new(
                    display_name,
                    annotation.line,
                    issue.kind,
                    issue.message,
                ));
            }
            cursor += 2;
        }

        Ok(state.into_model(retained))
    }
}

// ============================================================================
// SECTION: Scan State
// ============================================================================

/// Problem found while applying one annotation/payload pair.
struct PairIssue {
    /// Event classification.
    kind: ScanEventKind,
    /// Human-readable detail.
    message: String,
}

impl PairIssue {
    /// Creates a pair issue.
    fn new(kind: ScanEventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Working state for a single scan.
struct ScanState {
    /// Document display name.
    display_name: String,
    /// Resources keyed by type name.
    resources: BTreeMap<String, ResourceDefinition>,
    /// Methods in document order.
    methods: Vec<MethodDefinition>,
    /// Index of the most recent request, the target of the next response.
    last_request: Option<usize>,
}

impl ScanState {
    /// Creates empty state for a document.
    fn new(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            resources: BTreeMap::new(),
            methods: Vec::new(),
            last_request: None,
        }
    }

    /// Applies one annotation and its payload, returning an issue to audit.
    fn apply_pair(&mut self, annotation: &Block, payload: Option<&Block>) -> Option<PairIssue> {
        let Some(payload) = payload else {
            return Some(PairIssue::new(
                ScanEventKind::MissingPayload,
                "annotation is not followed by a code block",
            ));
        };
        if payload.kind != BlockKind::CodeBlock {
            return Some(PairIssue::new(
                ScanEventKind::PayloadNotCode,
                format!("annotation payload at line {} is not a code block", payload.line),
            ));
        }
        let metadata = match Annotation::parse(&annotation.content) {
            Ok(metadata) => metadata,
            Err(message) => return Some(PairIssue::new(ScanEventKind::MalformedAnnotation, message)),
        };

        match metadata.block_type.as_str() {
            "resource" => self.add_resource(metadata, payload),
            "request" => {
                self.add_request(metadata, payload);
                None
            }
            "response" => self.attach_response(metadata, payload),
            other => Some(PairIssue::new(
                ScanEventKind::UnknownBlockType,
                format!("ignoring blockType '{other}'"),
            )),
        }
    }

    /// Inserts a resource; a later resource with the same name wins.
    fn add_resource(&mut self, metadata: Annotation, payload: &Block) -> Option<PairIssue> {
        let Some(type_name) = metadata.odata_type else {
            return Some(PairIssue::new(
                ScanEventKind::MissingResourceType,
                "resource annotation has no @odata.type",
            ));
        };
        let replaced = self.resources.insert(
            type_name.clone(),
            ResourceDefinition {
                type_name: type_name.clone(),
                schema_text: payload.content.clone(),
            },
        );
        replaced.map(|_| {
            PairIssue::new(
                ScanEventKind::DuplicateResource,
                format!("resource '{type_name}' replaces an earlier definition"),
            )
        })
    }

    /// Appends a request method.
    fn add_request(&mut self, metadata: Annotation, payload: &Block) {
        let display_name = format!("{} #{}", self.display_name, self.methods.len());
        self.methods.push(MethodDefinition {
            display_name,
            request_text: payload.content.clone(),
            parameter_names: metadata.parameters,
            response_text: String::new(),
            response_type_name: None,
        });
        self.last_request = Some(self.methods.len() - 1);
    }

    /// Attaches a response to the most recent request.
    fn attach_response(&mut self, metadata: Annotation, payload: &Block) -> Option<PairIssue> {
        let Some(method) = self.last_request.and_then(|index| self.methods.get_mut(index)) else {
            return Some(PairIssue::new(
                ScanEventKind::OrphanResponse,
                "response annotation has no preceding request",
            ));
        };
        method.response_text.clone_from(&payload.content);
        method.response_type_name = metadata.odata_type;
        None
    }

    /// Finishes the scan.
    fn into_model(self, code_blocks: Vec<Block>) -> DocumentModel {
        DocumentModel::from_parts(self.display_name, self.resources, self.methods, code_blocks)
    }
}

// ============================================================================
// SECTION: Annotation Metadata
// ============================================================================

/// Fields recognized in an annotation object.
struct Annotation {
    /// Dispatch selector (`resource`, `request`, `response`, or other).
    block_type: String,
    /// Optional schema or response type name.
    odata_type: Option<String>,
    /// Optional declared parameter names.
    parameters: Option<Vec<String>>,
}

impl Annotation {
    /// Parses `<!-- {json} -->` annotation content.
    fn parse(content: &str) -> Result<Self, String> {
        let inner = content
            .trim()
            .strip_prefix(COMMENT_OPEN)
            .and_then(|rest| rest.strip_suffix(COMMENT_CLOSE))
            .ok_or_else(|| "annotation is not an html comment".to_string())?;
        let value: Value = serde_json::from_str(inner.trim())
            .map_err(|err| format!("annotation is not valid json: {err}"))?;
        let Value::Object(map) = value else {
            return Err("annotation json must be an object".to_string());
        };

        let block_type = match map.get("blockType") {
            Some(Value::String(block_type)) => block_type.clone(),
            Some(_) => return Err("blockType must be a string".to_string()),
            None => return Err("annotation has no blockType".to_string()),
        };
        let odata_type = optional_string(&map, "@odata.type")?;
        let parameters = match map.get("parameters") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items.iter().map(coerce_to_string).collect()),
            Some(_) => return Err("parameters must be an array".to_string()),
        };

        Ok(Self {
            block_type,
            odata_type,
            parameters,
        })
    }
}

/// Reads an optional string field.
fn optional_string(map: &Map<String, Value>, field: &str) -> Result<Option<String>, String> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(format!("{field} must be a string")),
    }
}

/// Coerces a parameter entry to a string; non-strings render as JSON.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        reason = "Test assertions use expect/unwrap for clarity."
    )]

    use super::Annotation;

    #[test]
    fn annotation_strips_comment_wrapper() {
        let annotation =
            Annotation::parse("<!-- { \"blockType\": \"resource\", \"@odata.type\": \"user\" } -->\n")
                .expect("parse");
        assert_eq!(annotation.block_type, "resource");
        assert_eq!(annotation.odata_type.as_deref(), Some("user"));
        assert!(annotation.parameters.is_none());
    }

    #[test]
    fn annotation_coerces_parameters_to_strings() {
        let annotation = Annotation::parse(
            r#"<!--{"blockType": "request", "parameters": ["id", 7, true]}-->"#,
        )
        .expect("parse");
        assert_eq!(
            annotation.parameters,
            Some(vec!["id".to_string(), "7".to_string(), "true".to_string()])
        );
    }

    #[test]
    fn annotation_requires_block_type() {
        let err = Annotation::parse(r#"<!-- {"@odata.type": "user"} -->"#).err().unwrap();
        assert_eq!(err, "annotation has no blockType");
    }

    #[test]
    fn annotation_rejects_non_comment_markup() {
        assert!(Annotation::parse("<div>{\"blockType\": \"request\"}</div>").is_err());
        assert!(Annotation::parse("<!-- not json -->").is_err());
        assert!(Annotation::parse("<!-- [1, 2] -->").is_err());
        assert!(Annotation::parse(r#"<!-- {"blockType": 3} -->"#).is_err());
    }
}
