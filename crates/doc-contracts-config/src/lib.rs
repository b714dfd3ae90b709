// crates/doc-contracts-config/src/lib.rs
// ============================================================================
// Module: Doc Contracts Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for doc-contracts.toml semantics.
// Dependencies: doc-contracts-core, serde, toml
// ============================================================================

//! ## Overview
//! `doc-contracts-config` defines the configuration model for the Doc
//! Contracts tools: scan limits, validation limits, and the scan audit sink.
//! Loading is strict and fail-closed; unknown fields and out-of-range limits
//! are rejected.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
