// crates/doc-contracts-core/src/core/response.rs
// ============================================================================
// Module: Observed HTTP Responses
// Description: Status, headers, and body of an exercised request.
// Purpose: Provide the validator's input and parse recorded raw responses.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! [`HttpResponse`] is the observed result of exercising a request. Headers
//! are multi-valued and looked up case-insensitively; validation reads the
//! first value. Responses can be built directly or parsed from recorded
//! HTTP/1.x text, such as the response examples captured in documentation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Raw response parsing errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseParseError {
    /// Input had no `HTTP/x.y <code>` status line.
    #[error("missing http status line")]
    MissingStatusLine,
    /// Status code was not a three-digit number.
    #[error("invalid http status code: {0}")]
    InvalidStatusCode(String),
    /// Header line without a `name: value` separator.
    #[error("malformed header at line {line}: {text}")]
    MalformedHeader {
        /// 1-based line number.
        line: usize,
        /// Offending line text.
        text: String,
    },
}

// ============================================================================
// SECTION: Response
// ============================================================================

/// Observed HTTP response.
///
/// # Invariants
/// - Header values keep the order in which they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Headers in receive order, each with its ordered values.
    #[serde(default)]
    pub headers: Vec<(String, Vec<String>)>,
    /// Raw body text.
    #[serde(default)]
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with no headers.
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Appends a header value, merging with an existing header of the same name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some((_, values)) =
            self.headers.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            values.push(value);
        } else {
            self.headers.push((name, vec![value]));
        }
    }

    /// Builder form of [`HttpResponse::add_header`].
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_header(name, value);
        self
    }

    /// Returns all values of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn first_header(&self, name: &str) -> Option<&str> {
        self.header_values(name).first().map(String::as_str)
    }

    /// Returns the body, or `None` when it is empty.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        if self.body.is_empty() { None } else { Some(self.body.as_str()) }
    }

    /// Parses a recorded HTTP/1.x response.
    ///
    /// Leading blank lines are skipped. Headers run until the first blank
    /// line; everything after it is the body, with line endings normalized
    /// to `\n` and trailing whitespace trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseParseError`] when the status line or a header is malformed.
    pub fn from_raw(raw: &str) -> Result<Self, ResponseParseError> {
        let mut lines = raw.lines().enumerate().skip_while(|(_, line)| line.trim().is_empty());
        let (_, status_line) = lines.next().ok_or(ResponseParseError::MissingStatusLine)?;
        let status_code = parse_status_line(status_line.trim())?;

        let mut response = Self::new(status_code, String::new());
        let mut body_lines: Vec<&str> = Vec::new();
        let mut in_body = false;
        for (index, line) in lines {
            if in_body {
                body_lines.push(line);
                continue;
            }
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                in_body = true;
                continue;
            }
            let Some((name, value)) = trimmed.split_once(':') else {
                return Err(ResponseParseError::MalformedHeader {
                    line: index + 1,
                    text: trimmed.to_string(),
                });
            };
            let name = name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(ResponseParseError::MalformedHeader {
                    line: index + 1,
                    text: trimmed.to_string(),
                });
            }
            response.add_header(name, value.trim());
        }
        response.body = body_lines.join("\n").trim_end().to_string();
        Ok(response)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses `HTTP/1.1 200 OK` into its status code.
fn parse_status_line(line: &str) -> Result<u16, ResponseParseError> {
    let mut parts = line.split_whitespace();
    let version = parts.next().ok_or(ResponseParseError::MissingStatusLine)?;
    if !version.starts_with("HTTP/") {
        return Err(ResponseParseError::MissingStatusLine);
    }
    let code = parts.next().ok_or(ResponseParseError::MissingStatusLine)?;
    if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ResponseParseError::InvalidStatusCode(code.to_string()));
    }
    code.parse::<u16>().map_err(|_| ResponseParseError::InvalidStatusCode(code.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
