// crates/doc-contracts-core/src/core/location.rs
// ============================================================================
// Module: Placeholder Locations
// Description: Classification of expectation keys into response locations.
// Purpose: Tell the validator where an expectation's actual value is read from.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every expectation key classifies into exactly one [`KeyLocation`]. Only
//! [`KeyLocation::Body`], [`KeyLocation::HttpHeader`], and
//! [`KeyLocation::Json`] can be checked against a response; the remaining
//! variants are reported as invalid expectation keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Key Location
// ============================================================================

/// Placeholder location of an expectation key, with its sub-key when present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "location", content = "index", rename_all = "snake_case")]
pub enum KeyLocation {
    /// Raw response body.
    Body,
    /// Named HTTP header.
    HttpHeader(String),
    /// `JSONPath` expression evaluated against the body.
    Json(String),
    /// Request URL placeholder.
    Url,
    /// Value stored from a previous request.
    StoredValue(String),
    /// Unrecognized key.
    Invalid,
}

impl KeyLocation {
    /// Returns true when an expectation at this location can be validated.
    #[must_use]
    pub const fn is_response_location(&self) -> bool {
        matches!(self, Self::Body | Self::HttpHeader(_) | Self::Json(_))
    }
}
