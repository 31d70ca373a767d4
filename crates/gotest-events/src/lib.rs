// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gotest-events: Decoding and classification of `go test -json` events
//!
//! This library crate turns the newline-delimited JSON written by
//! `go test -json` into typed [`Event`] values, repairs nested sub-test
//! results that arrive disguised as output, and classifies each event into
//! the special cases a reporter needs (cached packages, missing test files,
//! coverage, races, panics, the final package line, and so on).
//!
//! Aggregation into per-package results and any rendering are left to the
//! caller.
//!
//! # Example
//!
//! ```
//! use gotest_events::{Action, Event};
//!
//! let line = br#"{"Action":"output","Package":"p","Test":"TestFoo","Output":"PASS: sub_test.go:10: Suite.TestBar\t0.001s\n"}"#;
//! let event = Event::decode(line).unwrap().normalize_nested_test();
//!
//! assert_eq!(event.action, Action::Pass);
//! assert_eq!(event.test, "Suite.TestBar");
//! assert!(!event.discard());
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod classify;
pub mod error;
pub mod event;
pub mod events;
pub mod stream;

pub use action::Action;
pub use classify::{Classification, Marker, RULES};
pub use error::{DecodeError, StreamError};
pub use event::Event;
pub use events::{Events, group_by_test};
pub use stream::{EventReader, ReadOptions, parse_output};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::classify::{Classification, Marker};
    pub use crate::error::{DecodeError, StreamError};
    pub use crate::event::Event;
    pub use crate::events::Events;
    pub use crate::stream::{EventReader, ReadOptions};
}
