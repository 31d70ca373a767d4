// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! A single decoded record from `go test -json` output
//!
//! Each line emitted by the test runner (via test2json) is one JSON object:
//!
//! ```text
//! {"Time":"2019-02-13T12:02:10.183798579Z","Action":"output","Package":"github.com/juju/juju/cmd/juju/machine","Test":"TestPackage","Output":"PASS: upgradeseries_test.go:104: UpgradeSeriesSuite.TestUpgradeCommand\t0.000s\n"}
//! ```
//!
//! [`Event::decode`] turns such a line into an [`Event`], and
//! [`Event::normalize_nested_test`] repairs sub-test results that the runner
//! reported as plain output.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::action::Action;
use crate::error::DecodeError;

/// One event from the structured test output stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When the event occurred, conventionally omitted for cached results
    #[serde(rename = "Time", default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<FixedOffset>>,

    /// Lifecycle tag
    #[serde(rename = "Action")]
    pub action: Action,

    /// Package being tested. Events from parallel packages are interlaced, so
    /// this is what separates them.
    #[serde(
        rename = "Package",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub package: String,

    /// Test, example or benchmark function; empty for package-level events
    #[serde(
        rename = "Test",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub test: String,

    /// Seconds elapsed, set on `pass` and `fail` events
    #[serde(
        rename = "Elapsed",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub elapsed: f64,

    /// Portion of the test's combined stdout and stderr
    #[serde(
        rename = "Output",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub output: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl Event {
    /// Create an event with the given action and every other field empty
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            time: None,
            action,
            package: String::new(),
            test: String::new(),
            elapsed: 0.0,
            output: String::new(),
        }
    }

    /// Set the package
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Set the test name
    #[must_use]
    pub fn with_test(mut self, test: impl Into<String>) -> Self {
        self.test = test.into();
        self
    }

    /// Set the output text
    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the elapsed seconds
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Set the timestamp
    #[must_use]
    pub fn with_time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.time = Some(time);
        self
    }

    /// Decode one line of raw bytes into an event
    ///
    /// The line must be a JSON object. Field names are case sensitive,
    /// unknown fields are ignored and a repeated field keeps its last value.
    /// Absent (or `null`) `Time`, `Package`, `Test`, `Elapsed` and `Output`
    /// take their zero value; `Action` is required.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::UnknownAction` if `Action` is a string outside
    /// the known set, and `DecodeError::Json` if the bytes are not a
    /// well-formed JSON object, if `Action` is missing or not a string, or if
    /// a field has the wrong type.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let fields: Map<String, Value> = serde_json::from_slice(data)?;
        if let Some(Value::String(action)) = fields.get("Action") {
            action.parse::<Action>()?;
        }
        Ok(Self::deserialize(Value::Object(fields))?)
    }

    /// Whether this event is a sub-test result reported as plain output
    ///
    /// Some frameworks layered on `go test` (gocheck, for one) print their
    /// own results as output lines of the enclosing test:
    ///
    /// ```text
    /// PASS: upgradeseries_test.go:104: UpgradeSeriesSuite.TestUpgradeCommand\t0.000s
    /// ```
    #[must_use]
    pub fn nested_test(&self) -> bool {
        !self.test.is_empty() && (self.output.starts_with("PASS") || self.output.starts_with("FAIL"))
    }

    /// Rewrite a nested sub-test result into a proper `pass`/`fail` event
    ///
    /// The action follows the `PASS`/`FAIL` prefix. If the output (tabs read
    /// as spaces) splits into more than two space-separated tokens, the third
    /// token becomes the test name. The output itself is left untouched, so
    /// applying this more than once gives the same event.
    #[must_use]
    pub fn normalize_nested_test(mut self) -> Self {
        if !self.nested_test() {
            return self;
        }

        if self.output.starts_with("PASS") {
            self.action = Action::Pass;
        } else if self.output.starts_with("FAIL") {
            self.action = Action::Fail;
        }

        let flattened = self.output.replace('\t', " ");
        if let Some(name) = flattened.split(' ').nth(2) {
            debug!(from = %self.test, to = %name, action = %self.action, "Rewrote nested test");
            self.test = name.to_string();
        }

        self
    }
}

impl FromStr for Event {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s.as_bytes())
    }
}
