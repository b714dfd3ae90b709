// crates/doc-contracts-config/src/config.rs
// ============================================================================
// Module: Doc Contracts Configuration
// Description: Configuration loading and validation for the Doc Contracts tools.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: doc-contracts-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file is located by explicit path, then the `DOC_CONTRACTS_CONFIG`
//! environment variable, then `doc-contracts.toml` in the working directory.
//! Only the implicit default file may be absent; every section has defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use doc_contracts_core::ScanLimits;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "doc-contracts.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DOC_CONTRACTS_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `scan.max_document_bytes`.
pub const MAX_SCAN_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;
/// Upper bound for `validate.max_body_bytes`.
pub const MAX_VALIDATE_BODY_BYTES: usize = 64 * 1024 * 1024;
/// Default for `scan.max_document_bytes`.
const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;
/// Default for `validate.max_body_bytes`.
const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;
/// Maximum number of configured document extensions.
const MAX_EXTENSIONS: usize = 32;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Doc Contracts configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocContractsConfig {
    /// Documentation scanning settings.
    #[serde(default)]
    pub scan: ScanConfig,
    /// Expectation validation settings.
    #[serde(default, rename = "validate")]
    pub validation: ValidationConfig,
    /// Scan audit output settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DocContractsConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, implicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if implicit && err.kind() == ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan.validate()?;
        self.validation.validate()?;
        self.audit.validate()
    }
}

// ============================================================================
// SECTION: Scan Config
// ============================================================================

/// Documentation scanning settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Maximum size of a single document in bytes.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
    /// File extensions scanned when walking directories.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: default_max_document_bytes(),
            extensions: default_extensions(),
        }
    }
}

impl ScanConfig {
    /// Returns the scanner limits for this configuration.
    #[must_use]
    pub const fn limits(&self) -> ScanLimits {
        ScanLimits {
            max_document_bytes: self.max_document_bytes,
        }
    }

    /// Returns true when `path` has one of the configured extensions.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
    }

    /// Validates scan configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_document_bytes == 0 || self.max_document_bytes > MAX_SCAN_DOCUMENT_BYTES {
            return Err(ConfigError::Invalid("scan.max_document_bytes out of range".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid("scan.extensions must be non-empty".to_string()));
        }
        if self.extensions.len() > MAX_EXTENSIONS {
            return Err(ConfigError::Invalid("scan.extensions has too many entries".to_string()));
        }
        for extension in &self.extensions {
            if extension.is_empty()
                || !extension.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
            {
                return Err(ConfigError::Invalid(format!(
                    "scan.extensions entry '{extension}' must be alphanumeric without a dot"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Validation Config
// ============================================================================

/// Expectation validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Maximum response body size evaluated by `JSONPath` keys.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Treat warning diagnostics as failures.
    #[serde(default)]
    pub fail_on_warnings: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
            fail_on_warnings: false,
        }
    }
}

impl ValidationConfig {
    /// Validates validation configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 || self.max_body_bytes > MAX_VALIDATE_BODY_BYTES {
            return Err(ConfigError::Invalid("validate.max_body_bytes out of range".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit Config
// ============================================================================

/// Scan audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    None,
    /// Write JSON lines to stderr.
    #[default]
    Stderr,
    /// Append JSON lines to a file.
    File,
}

/// Scan audit output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink receiving scan audit events.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path, required when `sink = "file"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required when audit.sink is file".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid when audit.sink is file".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag is true for the implicit default file.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), false));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), false));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), true))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default for `scan.max_document_bytes`.
const fn default_max_document_bytes() -> usize {
    DEFAULT_MAX_DOCUMENT_BYTES
}

/// Default for `scan.extensions`.
fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

/// Default for `validate.max_body_bytes`.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

// ============================================================================
// SECTION: Tests
// ============================================================================
