// crates/doc-contracts-core/src/core/blocks.rs
// ============================================================================
// Module: Document Blocks
// Description: Typed segments produced by a block parser.
// Purpose: Give the scanner a parser-agnostic view of a document.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Block`] is one segment of a parsed document. The scanner only looks at
//! [`BlockKind::CodeBlock`] and [`BlockKind::RawMarkup`]; every other kind is
//! discarded before annotation pairing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Block Types
// ============================================================================

/// Block kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Section heading.
    Heading,
    /// Prose paragraph.
    Paragraph,
    /// Fenced or indented code example.
    CodeBlock,
    /// Raw embedded markup (HTML blocks and comments).
    RawMarkup,
}

impl BlockKind {
    /// Returns true when the scanner retains blocks of this kind.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(self, Self::CodeBlock | Self::RawMarkup)
    }
}

/// A parsed document segment.
///
/// # Invariants
/// - `line` is 1-based and refers to the first line of the block.
/// - `content` excludes code fences for [`BlockKind::CodeBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind.
    pub kind: BlockKind,
    /// Raw block text.
    pub content: String,
    /// Source line where the block starts.
    pub line: usize,
    /// Fenced code info string, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl Block {
    /// Creates a block without an info string.
    #[must_use]
    pub fn new(kind: BlockKind, content: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            line,
            info: None,
        }
    }

    /// Attaches a fenced code info string.
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }
}
