// crates/doc-contracts-cli/src/i18n.rs
// ============================================================================
// Module: CLI Message Catalog
// Description: Provides the message catalog and formatting utilities for the CLI.
// Purpose: Centralize user-facing strings for consistent messaging.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Doc Contracts CLI stores user-facing strings in a small catalog so
//! messages stay consistent across commands. All runtime output should be
//! routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to the key itself.
//! - Placeholder substitutions preserve argument order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries for CLI output.
const CATALOG: &[(&str, &str)] = &[
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.valid", "Config valid: {path}"),
    ("config.valid_defaults", "Config valid (defaults)."),
    ("audit.open_failed", "Failed to open scan audit log {path}: {error}"),
    ("input.kind.document", "document"),
    ("input.kind.scenarios", "scenario file"),
    ("input.kind.response", "response file"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.invalid_utf8", "The {kind} at {path} is not valid UTF-8."),
    ("scan.walk_failed", "Failed to list directory {path}: {error}"),
    ("scan.failed", "Failed to scan {path}: {error}"),
    ("check.scenarios_invalid", "Invalid scenarios in {path}: {error}"),
    ("check.scenario_not_found", "Scenario {name} not found in {path}."),
    ("check.response_invalid", "Invalid HTTP response in {path}: {error}"),
    ("check.summary", "{errors} error(s), {warnings} warning(s) across {scenarios} scenario(s)."),
    ("output.serialize_failed", "Failed to serialize output: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
];

/// Returns the catalog as a lookup map.
pub(crate) fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_MAP.get_or_init(|| CATALOG.iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Formats the catalog entry for `key`, substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a catalog message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

// ============================================================================
// SECTION: Tests
// ============================================================================
