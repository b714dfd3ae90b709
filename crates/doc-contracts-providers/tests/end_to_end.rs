// crates/doc-contracts-providers/tests/end_to_end.rs
// ============================================================================
// Module: End-to-End Contract Tests
// Description: Scanning real markdown and validating recorded responses.
// Purpose: Exercise the core engines with the concrete providers together.
// Dependencies: doc-contracts-core, doc-contracts-providers
// ============================================================================

//! ## Overview
//! Scans a documentation page with the markdown parser, then validates the
//! documented response against scenario expectations using the
//! `jsonpath_lib` evaluator.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use doc_contracts_core::DocumentModel;
use doc_contracts_core::DocumentScanner;
use doc_contracts_core::ExpectationValidator;
use doc_contracts_core::HttpResponse;
use doc_contracts_core::NoopScanAuditSink;
use doc_contracts_core::Severity;
use doc_contracts_core::StandardKeyClassifier;
use doc_contracts_core::ValidationErrorCode;
use doc_contracts_core::load_scenarios;
use doc_contracts_providers::JsonPathEvaluator;
use doc_contracts_providers::MarkdownBlockParser;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

const PAGE: &str = r#"# user resource type

Represents a user account.

<!-- {
  "blockType": "resource",
  "@odata.type": "microsoft.graph.user"
} -->
```json
{
  "id": "string",
  "displayName": "string"
}
```

## Get user

<!-- { "blockType": "request", "parameters": ["id"] } -->
```http
GET /users/{id}
```

<!-- { "blockType": "response", "@odata.type": "microsoft.graph.user" } -->
```http
HTTP/1.1 200 OK
Content-Type: application/json
ETag: "abc"

{
  "id": "42",
  "displayName": "Ada",
  "emails": ["a@example.com", "b@example.com"]
}
```
"#;

const SCENARIOS: &str = r#"[
  {
    "name": "get-user",
    "method": "/users/get-user.md #0",
    "expectations": {
      "!body": null,
      "Content-Type:": "application/json",
      "$.id": ["42", "43"],
      "$.displayName": "Ada",
      "$.emails[0]": "a@example.com"
    }
  },
  {
    "name": "stale-etag",
    "expectations": {
      "ETag:": "xyz",
      "$.jobTitle": "Engineer",
      "!url": "/users/42"
    }
  }
]"#;

fn scan_page() -> DocumentModel {
    DocumentScanner::new(&MarkdownBlockParser, &NoopScanAuditSink)
        .scan("/users/get-user.md", PAGE)
        .unwrap()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn page_yields_resource_and_method() {
    let model = scan_page();

    assert_eq!(model.resources().len(), 1);
    let resource = &model.resources()["microsoft.graph.user"];
    assert_eq!(resource.schema_text, "{\n  \"id\": \"string\",\n  \"displayName\": \"string\"\n}");

    assert_eq!(model.methods().len(), 1);
    let method = &model.methods()[0];
    assert_eq!(method.display_name, "/users/get-user.md #0");
    assert_eq!(method.request_text, "GET /users/{id}");
    assert_eq!(method.parameter_names, Some(vec!["id".to_string()]));
    assert_eq!(method.response_type_name.as_deref(), Some("microsoft.graph.user"));
    assert!(method.response_text.starts_with("HTTP/1.1 200 OK"));
}

#[test]
fn documented_response_satisfies_scenario() {
    let model = scan_page();
    let scenarios = load_scenarios(SCENARIOS).unwrap();
    let scenario = &scenarios[0];
    let method = model.method(scenario.method.as_deref().unwrap()).unwrap();
    let response = HttpResponse::from_raw(&method.response_text).unwrap();
    assert_eq!(response.status_code, 200);

    let evaluator = JsonPathEvaluator::default();
    let diagnostics = ExpectationValidator::new(&StandardKeyClassifier, &evaluator)
        .validate_to_vec(scenario, &response);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
}

#[test]
fn failing_scenario_reports_each_key_once() {
    let model = scan_page();
    let scenarios = load_scenarios(SCENARIOS).unwrap();
    let response = HttpResponse::from_raw(&model.methods()[0].response_text).unwrap();

    let evaluator = JsonPathEvaluator::default();
    let diagnostics = ExpectationValidator::new(&StandardKeyClassifier, &evaluator)
        .validate_to_vec(&scenarios[1], &response);

    let summary: Vec<(Severity, ValidationErrorCode)> =
        diagnostics.iter().map(|diagnostic| (diagnostic.severity, diagnostic.code)).collect();
    assert_eq!(
        summary,
        vec![
            (Severity::Warning, ValidationErrorCode::InvalidExpectationKey),
            (Severity::Error, ValidationErrorCode::JsonParserException),
            (Severity::Error, ValidationErrorCode::ExpectationConditionFailed),
        ]
    );
    assert!(diagnostics[2].message.contains("\"abc\""));
}

#[test]
fn unclosed_trailing_fence_keeps_earlier_methods() {
    let page = "<!-- { \"blockType\": \"request\" } -->
```http
GET /me
```

```
trailing";
    let model = DocumentScanner::new(&MarkdownBlockParser, &NoopScanAuditSink)
        .scan("/me.md", page)
        .unwrap();
    assert_eq!(model.methods().len(), 1);
    assert_eq!(model.methods()[0].request_text, "GET /me");
    assert_eq!(model.code_blocks().len(), 3);
    assert_eq!(model.code_blocks()[2].content, "trailing");
}
