// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Classification of events into the special cases a reporter cares about
//!
//! Almost all the signal in `go test -json` output lives in free text inside
//! the `Output` field. The checks below match the literal text the go tool
//! prints, byte for byte: prefixes, tab separators and trailing newlines all
//! matter.
//!
//! Every check is an independent, infallible predicate on one event. The
//! boolean ones are also collected in [`RULES`] so callers can evaluate them
//! all at once with [`Event::markers`] or [`Event::classify`].
//!
//! # Example
//!
//! ```
//! use gotest_events::{Event, Marker};
//!
//! let event: Event = r#"{"Action":"output","Package":"p","Output":"ok  \tp\t(cached)\tcoverage: 28.8% of statements\n"}"#
//!     .parse()
//!     .unwrap();
//!
//! assert!(event.is_cached());
//! assert_eq!(event.cover(), Some(28.8));
//! assert!(event.markers().contains(&Marker::Cached));
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::action::Action;
use crate::event::Event;

/// Progress lines printed by `go test -v` as tests start, pause and resume
const UPDATE_PREFIXES: [&str; 3] = ["=== RUN   ", "=== PAUSE ", "=== CONT  "];

const NO_TESTS_WARNING: &str = "testing: warning: no tests to run\n";

static COVERAGE_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}\.[0-9]%").expect("coverage pattern is valid"));

impl Event {
    /// Whether the event is noise for reporting purposes
    ///
    /// That is either a `=== RUN`, `=== PAUSE` or `=== CONT` progress line,
    /// or package-level output that belongs to no test.
    #[must_use]
    pub fn discard(&self) -> bool {
        UPDATE_PREFIXES.iter().any(|p| self.output.starts_with(p))
            || (self.action == Action::Output && self.test.is_empty())
    }

    /// Whether this is the final event summarizing a whole package run
    ///
    /// ```text
    /// ok  	github.com/astromail/rover/tests	0.583s
    /// {"Action":"pass","Package":"github.com/astromail/rover/tests","Elapsed":0.584}
    /// ```
    #[must_use]
    pub fn last_line(&self) -> bool {
        self.test.is_empty() && self.output.is_empty() && self.action.is_terminal()
    }

    /// Package with no test files: `"?   \tpackage\t[no test files]\n"`
    #[must_use]
    pub fn no_test_files(&self) -> bool {
        self.output.starts_with("?   \t") && self.output.ends_with("[no test files]\n")
    }

    /// Package where no test matched: `"ok  \tpackage\t4.543s [no tests to run]\n"`
    #[must_use]
    pub fn no_tests_to_run(&self) -> bool {
        self.output.starts_with("ok  \t") && self.output.ends_with("[no tests to run]\n")
    }

    /// The same condition as [`Event::no_tests_to_run`], surfaced on a test
    /// event as an exact warning line
    #[must_use]
    pub fn no_tests_warn(&self) -> bool {
        !self.test.is_empty() && self.output == NO_TESTS_WARNING
    }

    /// Package result served from the test cache
    ///
    /// ```text
    /// ok  	github.com/mfridman/tparse/tests	(cached)
    /// ok  	github.com/mfridman/srfax	(cached)	coverage: 28.8% of statements
    /// ```
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.output.starts_with("ok  \t") && self.output.contains("\t(cached)")
    }

    /// Coverage percentage from a package coverage line
    ///
    /// ```text
    /// ok  	github.com/mfridman/srfax	0.027s	coverage: 28.8% of statements
    /// ```
    ///
    /// Returns `None` for lines that are not coverage lines, and for coverage
    /// lines without a parsable `NN.N%` figure.
    #[must_use]
    pub fn cover(&self) -> Option<f64> {
        if !self.output.contains("coverage:") || !self.output.ends_with("of statements\n") {
            return None;
        }
        let found = COVERAGE_PERCENT.find(&self.output)?;
        found.as_str().trim_end_matches('%').parse().ok()
    }

    /// Start of a race detector report
    #[must_use]
    pub fn is_race(&self) -> bool {
        self.output.starts_with("WARNING: DATA RACE")
    }

    /// Whether the output reports a panic
    ///
    /// Lines mentioning `runtime error:` count too, unless they also say
    /// `as expected`. The go tree's own tests print lines such as
    ///
    /// ```text
    /// time_test.go:1359: panic in goroutine 7, as expected, with "runtime error: racy use of timers"
    /// ```
    ///
    /// and those are not failures. A real panic message containing
    /// `as expected` is missed.
    #[must_use]
    pub fn is_panic(&self) -> bool {
        self.output.starts_with("panic: ")
            || (self.output.contains("runtime error:") && !self.output.contains("as expected"))
    }

    /// Every marker whose rule matches this event, in [`RULES`] order
    #[must_use]
    pub fn markers(&self) -> Vec<Marker> {
        RULES
            .iter()
            .filter(|(_, matches)| matches(self))
            .map(|(marker, _)| *marker)
            .collect()
    }

    /// All markers plus the coverage figure, in one value
    #[must_use]
    pub fn classify(&self) -> Classification {
        Classification {
            markers: self.markers(),
            coverage: self.cover(),
        }
    }
}

/// A named boolean category an event can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    /// Progress chatter or test-less package output
    Discard,
    /// Final package summary event
    LastLine,
    /// Package without test files
    NoTestFiles,
    /// Package where no test matched
    NoTestsToRun,
    /// Test-level "no tests to run" warning
    NoTestsWarn,
    /// Cached package result
    Cached,
    /// Sub-test result reported as output
    NestedTest,
    /// Coverage summary line with a parsable figure
    Coverage,
    /// Race detector report
    Race,
    /// Panic or runtime error
    Panic,
}

impl Marker {
    /// Stable textual name of the marker
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Marker::Discard => "discard",
            Marker::LastLine => "last-line",
            Marker::NoTestFiles => "no-test-files",
            Marker::NoTestsToRun => "no-tests-to-run",
            Marker::NoTestsWarn => "no-tests-warn",
            Marker::Cached => "cached",
            Marker::NestedTest => "nested-test",
            Marker::Coverage => "coverage",
            Marker::Race => "race",
            Marker::Panic => "panic",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classification rule: the marker and the predicate that decides it
pub type Rule = (Marker, fn(&Event) -> bool);

/// The rule table. New output formats get a new row here.
pub static RULES: [Rule; 10] = [
    (Marker::Discard, Event::discard),
    (Marker::LastLine, Event::last_line),
    (Marker::NoTestFiles, Event::no_test_files),
    (Marker::NoTestsToRun, Event::no_tests_to_run),
    (Marker::NoTestsWarn, Event::no_tests_warn),
    (Marker::Cached, Event::is_cached),
    (Marker::NestedTest, Event::nested_test),
    (Marker::Coverage, has_coverage),
    (Marker::Race, Event::is_race),
    (Marker::Panic, Event::is_panic),
];

fn has_coverage(event: &Event) -> bool {
    event.cover().is_some()
}

/// Result of running every rule against one event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Matching markers, in rule order
    pub markers: Vec<Marker>,
    /// Coverage percentage, when the event is a coverage line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
}

impl Classification {
    /// Whether the given marker matched
    #[must_use]
    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Whether no rule matched, i.e. this is ordinary output
    #[must_use]
    pub fn is_ordinary(&self) -> bool {
        self.markers.is_empty()
    }
}
