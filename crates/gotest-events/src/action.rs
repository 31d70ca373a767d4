// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The closed set of lifecycle tags carried by every event

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Lifecycle tag of a single emitted event
///
/// Serialized as the lowercase literal used on the wire. Values outside this
/// set fail to deserialize rather than being coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Test has started running
    Run,
    /// Test has been paused
    Pause,
    /// Test has continued running
    Cont,
    /// Test passed
    Pass,
    /// Benchmark printed log output but did not fail
    Bench,
    /// Test or benchmark failed
    Fail,
    /// Test printed output
    Output,
    /// Test was skipped or the package contained no tests
    Skip,
}

impl Action {
    /// Every action, in wire declaration order
    pub const ALL: [Action; 8] = [
        Action::Run,
        Action::Pause,
        Action::Cont,
        Action::Pass,
        Action::Bench,
        Action::Fail,
        Action::Output,
        Action::Skip,
    ];

    /// The wire literal for this action
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Run => "run",
            Action::Pause => "pause",
            Action::Cont => "cont",
            Action::Pass => "pass",
            Action::Bench => "bench",
            Action::Fail => "fail",
            Action::Output => "output",
            Action::Skip => "skip",
        }
    }

    /// Whether this action ends a test or package run with a result
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Action::Pass | Action::Fail)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_display_matches_literal() {
        let rendered: Vec<String> = Action::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["run", "pause", "cont", "pass", "bench", "fail", "output", "skip"]
        );
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "start".parse::<Action>().unwrap_err();
        assert!(matches!(err, DecodeError::UnknownAction(ref s) if s == "start"));
        // Case sensitive, like the wire format
        assert!("PASS".parse::<Action>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_literal() {
        assert_eq!(serde_json::to_string(&Action::Cont).unwrap(), "\"cont\"");
        let action: Action = serde_json::from_str("\"bench\"").unwrap();
        assert_eq!(action, Action::Bench);
        assert!(serde_json::from_str::<Action>("\"started\"").is_err());
    }

    #[test]
    fn test_is_terminal() {
        let terminal: Vec<Action> = Action::ALL.into_iter().filter(|a| a.is_terminal()).collect();
        assert_eq!(terminal, vec![Action::Pass, Action::Fail]);
    }
}
