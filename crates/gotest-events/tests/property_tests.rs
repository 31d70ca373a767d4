// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for gotest-events
//!
//! These tests use proptest to verify invariants hold for arbitrary inputs,
//! ensuring robustness against edge cases and malformed data.

use proptest::prelude::*;
use serde_json::{Value, json};

use gotest_events::{Action, DecodeError, Event, RULES};

// ============================================================================
// Strategies
// ============================================================================

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

/// Output text, weighted towards the shapes the classifier cares about
fn arbitrary_output() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("=== RUN   TestFoo\n".to_string()),
        Just("=== PAUSE TestFoo\n".to_string()),
        Just("=== CONT  TestFoo\n".to_string()),
        Just("PASS\n".to_string()),
        Just("FAIL\n".to_string()),
        Just("ok  \tpkg\t(cached)\n".to_string()),
        Just("?   \tpkg\t[no test files]\n".to_string()),
        Just("testing: warning: no tests to run\n".to_string()),
        Just("WARNING: DATA RACE\n".to_string()),
        Just("panic: boom\n".to_string()),
        "(PASS|FAIL): [a-z_]{1,8}\\.go:[0-9]{1,3}:[ \t][A-Z][a-z]{0,6}\\.Test[A-Z][a-z]{0,6}\t[0-9]\\.[0-9]{3}s\n",
        "ok  \t[a-z/]{1,12}\t[0-9]\\.[0-9]{3}s\tcoverage: [0-9]{1,3}\\.[0-9]% of statements\n",
        ".{0,60}",
    ]
}

fn arbitrary_name() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "Test[A-Z][a-zA-Z0-9_/]{0,12}"]
}

fn arbitrary_event() -> impl Strategy<Value = Event> {
    (
        arbitrary_action(),
        arbitrary_name(),
        arbitrary_output(),
        "[a-z.]{0,10}(/[a-z]{1,6}){0,3}",
        (0u32..1_000_000).prop_map(|ms| f64::from(ms) / 1000.0),
    )
        .prop_map(|(action, test, output, package, elapsed)| {
            Event::new(action)
                .with_package(package)
                .with_test(test)
                .with_output(output)
                .with_elapsed(elapsed)
        })
}

/// Any top-level JSON value other than an object, including arrays laid out
/// like an event's fields
fn arbitrary_non_object() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        prop_oneof![Just("pass".to_string()), ".{0,20}"].prop_map(Value::from),
    ];
    let event_fields = (arbitrary_action(), arbitrary_name(), arbitrary_output()).prop_map(
        |(action, test, output)| json!([null, action, "pkg", test, 0.5, output]),
    );
    prop_oneof![
        scalar.clone(),
        event_fields,
        prop::collection::vec(scalar, 0..6).prop_map(Value::Array),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Event::decode(&data);
    }

    #[test]
    fn decode_preserves_present_fields(event in arbitrary_event()) {
        let line = json!({
            "Action": event.action,
            "Package": event.package,
            "Test": event.test,
            "Output": event.output,
            "Elapsed": event.elapsed,
        })
        .to_string();

        let decoded = Event::decode(line.as_bytes()).expect("valid line should decode");
        prop_assert_eq!(decoded, event);
    }

    #[test]
    fn unknown_action_is_rejected(action in "[a-z]{1,10}") {
        prop_assume!(Action::ALL.iter().all(|a| a.as_str() != action));
        let line = json!({ "Action": action }).to_string();
        prop_assert!(matches!(
            Event::decode(line.as_bytes()),
            Err(DecodeError::UnknownAction(ref rejected)) if *rejected == action
        ));
    }

    #[test]
    fn non_object_line_is_rejected(value in arbitrary_non_object()) {
        let line = value.to_string();
        prop_assert!(
            matches!(Event::decode(line.as_bytes()), Err(DecodeError::Json(_))),
            "decoded {}", line
        );
    }

    #[test]
    fn normalize_is_idempotent(event in arbitrary_event()) {
        let once = event.normalize_nested_test();
        let twice = once.clone().normalize_nested_test();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_only_touches_action_and_test(event in arbitrary_event()) {
        let normalized = event.clone().normalize_nested_test();
        prop_assert_eq!(&normalized.output, &event.output);
        prop_assert_eq!(&normalized.package, &event.package);
        prop_assert_eq!(normalized.elapsed, event.elapsed);
        if !event.nested_test() {
            prop_assert_eq!(normalized, event);
        }
    }

    #[test]
    fn last_line_characterisation(event in arbitrary_event()) {
        let expected = event.test.is_empty()
            && event.output.is_empty()
            && matches!(event.action, Action::Pass | Action::Fail);
        prop_assert_eq!(event.last_line(), expected);
    }

    #[test]
    fn discard_characterisation(event in arbitrary_event()) {
        let marker = ["=== RUN   ", "=== PAUSE ", "=== CONT  "]
            .iter()
            .any(|p| event.output.starts_with(p));
        let expected = marker || (event.action == Action::Output && event.test.is_empty());
        prop_assert_eq!(event.discard(), expected);
    }

    #[test]
    fn cover_parses_generated_figures(whole in 0u32..=100, tenth in 0u32..10) {
        let output = format!("ok  \tpkg\t0.010s\tcoverage: {whole}.{tenth}% of statements\n");
        let event = Event::new(Action::Output).with_output(output);
        let expected: f64 = format!("{whole}.{tenth}").parse().unwrap();
        prop_assert_eq!(event.cover(), Some(expected));
    }

    #[test]
    fn markers_agree_with_rules(event in arbitrary_event()) {
        let markers = event.markers();
        for (marker, rule) in &RULES {
            prop_assert_eq!(markers.contains(marker), rule(&event));
        }
    }
}
