// crates/doc-contracts-core/src/runtime/classifier.rs
// ============================================================================
// Module: Standard Key Classifier
// Description: Default mapping from expectation keys to placeholder locations.
// Purpose: Provide the key syntax used by documentation scenario files.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Key syntax:
//!
//! | key | location |
//! |---|---|
//! | `!body` | [`KeyLocation::Body`] |
//! | `!url` | [`KeyLocation::Url`] |
//! | `$`, `$.path`, `$[index]` | [`KeyLocation::Json`] (the whole key is the path) |
//! | `Header-Name:` | [`KeyLocation::HttpHeader`] |
//! | `[name]` | [`KeyLocation::StoredValue`] |
//!
//! Anything else is [`KeyLocation::Invalid`]. Classification is pure and
//! never fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::KeyLocation;
use crate::interfaces::KeyClassifier;

// ============================================================================
// SECTION: Classifier
// ============================================================================

/// Key classifier implementing the standard placeholder syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardKeyClassifier;

impl KeyClassifier for StandardKeyClassifier {
    fn classify(&self, key: &str) -> KeyLocation {
        classify_key(key)
    }
}

/// Classifies a key using the standard placeholder syntax.
#[must_use]
pub fn classify_key(key: &str) -> KeyLocation {
    match key {
        "!body" => return KeyLocation::Body,
        "!url" => return KeyLocation::Url,
        "$" => return KeyLocation::Json(key.to_string()),
        _ => {}
    }
    if key.starts_with("$.") || key.starts_with("$[") {
        return KeyLocation::Json(key.to_string());
    }
    if let Some(name) = key.strip_suffix(':')
        && is_header_name(name)
    {
        return KeyLocation::HttpHeader(name.to_string());
    }
    if let Some(inner) = key.strip_prefix('[').and_then(|rest| rest.strip_suffix(']'))
        && !inner.trim().is_empty()
    {
        return KeyLocation::StoredValue(inner.to_string());
    }
    KeyLocation::Invalid
}

/// Returns true for a non-empty header name without whitespace or separators.
fn is_header_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|ch| ch.is_ascii_graphic() && ch != ':')
}

// ============================================================================
// SECTION: Tests
// ============================================================================
