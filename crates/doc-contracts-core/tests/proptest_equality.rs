// crates/doc-contracts-core/tests/proptest_equality.rs
// ============================================================================
// Module: Equality Property-Based Tests
// Description: Property tests for token equality and candidate matching.
// Purpose: Detect panics and invariants across wide input ranges.
// ============================================================================

//! Property-based tests for token equality and expectation satisfaction.

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
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use common::FieldEvaluator;
use doc_contracts_core::ActualValue;
use doc_contracts_core::ExpectationValidator;
use doc_contracts_core::HttpResponse;
use doc_contracts_core::ScenarioDefinition;
use doc_contracts_core::StandardKeyClassifier;
use doc_contracts_core::json_equals;
use doc_contracts_core::token_equals;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

fn json_value_strategy(max_depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| { serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number) }),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(max_depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0 .. 4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0 .. 4).prop_map(|map| {
                let mut object = serde_json::Map::new();
                for (key, value) in map {
                    object.insert(key, value);
                }
                Value::Object(object)
            }),
        ]
    })
}

fn diagnostic_count(expected: Value, body: &str) -> usize {
    let scenario = ScenarioDefinition::new("prop").expect("!body", expected);
    let response = HttpResponse::new(200, body);
    ExpectationValidator::new(&StandardKeyClassifier, &FieldEvaluator)
        .validate_to_vec(&scenario, &response)
        .len()
}

proptest! {
    #[test]
    fn json_equality_is_reflexive(value in json_value_strategy(3)) {
        prop_assert!(json_equals(&value, &value));
    }

    #[test]
    fn json_equality_is_symmetric(
        left in json_value_strategy(2),
        right in json_value_strategy(2),
    ) {
        prop_assert_eq!(json_equals(&left, &right), json_equals(&right, &left));
    }

    #[test]
    fn json_text_equals_its_parsed_value(value in json_value_strategy(3)) {
        let text = serde_json::to_string(&value).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        prop_assert!(token_equals(&parsed, &ActualValue::Text(text)));
    }

    #[test]
    fn integers_equal_their_float_rendering(value in -1_000_000_i32 .. 1_000_000) {
        let float = json!(f64::from(value));
        prop_assert!(json_equals(&json!(value), &float));
    }

    #[test]
    fn any_of_is_permutation_invariant(
        candidates in prop::collection::vec(json_value_strategy(2), 0 .. 6),
        actual in json_value_strategy(2),
        rotation in 0_usize .. 6,
    ) {
        let body = serde_json::to_string(&actual).unwrap();
        let mut rotated = candidates.clone();
        if !rotated.is_empty() {
            let shift = rotation % rotated.len();
            rotated.rotate_left(shift);
        }
        let mut reversed = candidates.clone();
        reversed.reverse();

        let baseline = diagnostic_count(Value::Array(candidates), &body);
        prop_assert_eq!(baseline, diagnostic_count(Value::Array(rotated), &body));
        prop_assert_eq!(baseline, diagnostic_count(Value::Array(reversed), &body));
    }

    #[test]
    fn no_constraint_is_always_satisfied(body in ".*") {
        prop_assert_eq!(diagnostic_count(Value::Null, &body), 0);
    }

    #[test]
    fn token_equality_never_panics(expected in json_value_strategy(2), text in ".*") {
        let _ = token_equals(&expected, &ActualValue::Text(text));
    }
}
