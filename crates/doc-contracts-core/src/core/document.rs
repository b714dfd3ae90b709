// crates/doc-contracts-core/src/core/document.rs
// ============================================================================
// Module: Document Model
// Description: Resources and request/response methods extracted from one document.
// Purpose: Provide the read-only result of a documentation scan.
// Dependencies: crate::core::blocks, serde
// ============================================================================

//! ## Overview
//! A [`DocumentModel`] owns the resources and methods found in a single
//! document. Both collections are built during one scan and are only exposed
//! through read-only accessors afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::blocks::Block;

// ============================================================================
// SECTION: Definitions
// ============================================================================

/// Named schema example declared by a `resource` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Entity type name (the annotation's `@odata.type`).
    pub type_name: String,
    /// Raw JSON schema text as authored.
    pub schema_text: String,
}

/// Request/response example pair declared by `request` and `response` annotations.
///
/// # Invariants
/// - `response_text` stays empty until a `response` annotation attaches to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    /// Display name, `"<document> #<index>"`.
    pub display_name: String,
    /// Raw request text.
    pub request_text: String,
    /// Declared parameter names, when the annotation lists any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_names: Option<Vec<String>>,
    /// Raw response text.
    #[serde(default)]
    pub response_text: String,
    /// Response type name (the response annotation's `@odata.type`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type_name: Option<String>,
}

impl MethodDefinition {
    /// Returns true when a response has been attached.
    #[must_use]
    pub fn has_response(&self) -> bool {
        !self.response_text.is_empty()
    }
}

// ============================================================================
// SECTION: Document Model
// ============================================================================

/// Result of scanning one document.
///
/// # Invariants
/// - `resources` keys equal the `type_name` of their values.
/// - `methods` are in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentModel {
    /// Document display name.
    display_name: String,
    /// Resources keyed by type name.
    resources: BTreeMap<String, ResourceDefinition>,
    /// Methods in document order.
    methods: Vec<MethodDefinition>,
    /// Code and raw markup blocks retained during the scan.
    #[serde(skip)]
    code_blocks: Vec<Block>,
}

impl DocumentModel {
    /// Assembles a model from scanner output.
    pub(crate) const fn from_parts(
        display_name: String,
        resources: BTreeMap<String, ResourceDefinition>,
        methods: Vec<MethodDefinition>,
        code_blocks: Vec<Block>,
    ) -> Self {
        Self {
            display_name,
            resources,
            methods,
            code_blocks,
        }
    }

    /// Returns the document display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the resources keyed by type name.
    #[must_use]
    pub const fn resources(&self) -> &BTreeMap<String, ResourceDefinition> {
        &self.resources
    }

    /// Returns the methods in document order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }

    /// Returns the code and raw markup blocks in document order.
    #[must_use]
    pub fn code_blocks(&self) -> &[Block] {
        &self.code_blocks
    }

    /// Looks up a method by display name.
    #[must_use]
    pub fn method(&self, display_name: &str) -> Option<&MethodDefinition> {
        self.methods.iter().find(|method| method.display_name == display_name)
    }
}
