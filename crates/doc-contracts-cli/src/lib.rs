// crates/doc-contracts-cli/src/lib.rs
// ============================================================================
// Module: Doc Contracts CLI Library
// Description: Shared helpers for the doc-contracts binary.
// Purpose: Expose the message catalog used by CLI output.
// Dependencies: Standard library only.
// ============================================================================

//! ## Overview
//! Library half of the `doc-contracts` CLI. User-facing strings live in the
//! [`i18n`] catalog and are formatted through the [`t!`] macro.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;
