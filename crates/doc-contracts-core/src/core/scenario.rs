// crates/doc-contracts-core/src/core/scenario.rs
// ============================================================================
// Module: Scenario Definitions
// Description: Named bundles of expectations checked against one response.
// Purpose: Decide the shape of each expected value once, at load time.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ScenarioDefinition`] maps expectation keys to [`Expectation`] values.
//! Expected values are classified when the scenario is loaded: JSON `null`
//! is [`Expectation::NoConstraint`], a JSON array is
//! [`Expectation::AnyOf`], and every other value is
//! [`Expectation::Scalar`]. Scenario files hold one scenario object or an
//! array of them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Expected value for one expectation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Expectation {
    /// No constraint; the key only has to classify to a valid location.
    NoConstraint,
    /// A single expected value.
    Scalar(Value),
    /// Candidate values; any one of them satisfies the expectation.
    AnyOf(Vec<Value>),
}

impl From<Value> for Expectation {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::NoConstraint,
            Value::Array(candidates) => Self::AnyOf(candidates),
            other => Self::Scalar(other),
        }
    }
}

impl From<Expectation> for Value {
    fn from(expectation: Expectation) -> Self {
        match expectation {
            Expectation::NoConstraint => Self::Null,
            Expectation::Scalar(value) => value,
            Expectation::AnyOf(candidates) => Self::Array(candidates),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConstraint => f.write_str("null"),
            Self::Scalar(value) => write_value(f, value),
            Self::AnyOf(candidates) => {
                f.write_str("[")?;
                for (index, candidate) in candidates.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write_value(f, candidate)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Writes strings verbatim and other JSON values in compact form.
fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(text) => f.write_str(text),
        other => write!(f, "{other}"),
    }
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Named test case checked against one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDefinition {
    /// Scenario name.
    pub name: String,
    /// Display name of the documented method this scenario exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Expectations keyed by placeholder key.
    #[serde(default)]
    pub expectations: BTreeMap<String, Expectation>,
}

impl ScenarioDefinition {
    /// Creates a scenario with no expectations.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: None,
            expectations: BTreeMap::new(),
        }
    }

    /// Adds an expectation, classifying the raw expected value.
    #[must_use]
    pub fn expect(mut self, key: impl Into<String>, expected: Value) -> Self {
        self.expectations.insert(key.into(), Expectation::from(expected));
        self
    }
}

/// Scenario loading errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    /// Input was not valid scenario JSON.
    #[error("invalid scenario json: {0}")]
    Json(#[from] serde_json::Error),
    /// Two scenarios share a name.
    #[error("duplicate scenario name: {0}")]
    DuplicateName(String),
}

/// Serialized scenario file shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum ScenarioFile {
    /// Array of scenarios.
    Many(Vec<ScenarioDefinition>),
    /// Single scenario object.
    One(ScenarioDefinition),
}

/// Loads scenarios from JSON text holding one scenario or an array of them.
///
/// # Errors
///
/// Returns [`ScenarioLoadError`] on malformed JSON or duplicate names.
pub fn load_scenarios(text: &str) -> Result<Vec<ScenarioDefinition>, ScenarioLoadError> {
    let scenarios = match serde_json::from_str::<ScenarioFile>(text)? {
        ScenarioFile::Many(scenarios) => scenarios,
        ScenarioFile::One(scenario) => vec![scenario],
    };
    let mut seen = std::collections::BTreeSet::new();
    for scenario in &scenarios {
        if !seen.insert(scenario.name.as_str()) {
            return Err(ScenarioLoadError::DuplicateName(scenario.name.clone()));
        }
    }
    Ok(scenarios)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
