// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-test event sequences

use std::collections::HashMap;
use std::ops::Deref;

use serde::Serialize;

use crate::action::Action;
use crate::event::Event;

/// The events belonging to a single test, in emission order
///
/// All events are expected to share one `package` and `test`. That is up to
/// whoever builds the sequence (see [`group_by_test`]); nothing here checks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Events(Vec<Event>);

impl Events {
    /// Create an empty sequence
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an event
    pub fn push(&mut self, event: Event) {
        self.0.push(event);
    }

    /// Package shared by the events, empty if there are none
    #[must_use]
    pub fn package(&self) -> &str {
        self.0.first().map_or("", |e| e.package.as_str())
    }

    /// Test name shared by the events, empty if there are none
    #[must_use]
    pub fn test(&self) -> &str {
        self.0.first().map_or("", |e| e.test.as_str())
    }

    /// Outcome of the test: the last `pass`, `fail` or `skip` action
    ///
    /// `None` while the test has not finished.
    #[must_use]
    pub fn status(&self) -> Option<Action> {
        self.0
            .iter()
            .rev()
            .map(|e| e.action)
            .find(|a| matches!(a, Action::Pass | Action::Fail | Action::Skip))
    }

    /// Seconds reported by the last `pass` or `fail` event, zero if none
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.0
            .iter()
            .rev()
            .find(|e| e.action.is_terminal())
            .map_or(0.0, |e| e.elapsed)
    }

    /// Output of every event that is not discarded, concatenated in order
    #[must_use]
    pub fn output(&self) -> String {
        self.0
            .iter()
            .filter(|e| !e.discard())
            .map(|e| e.output.as_str())
            .collect()
    }

    /// Whether any event starts a race detector report
    #[must_use]
    pub fn has_race(&self) -> bool {
        self.0.iter().any(Event::is_race)
    }

    /// Whether any event reports a panic
    #[must_use]
    pub fn has_panic(&self) -> bool {
        self.0.iter().any(Event::is_panic)
    }

    /// Consume the sequence, returning the events
    #[must_use]
    pub fn into_inner(self) -> Vec<Event> {
        self.0
    }
}

impl Deref for Events {
    type Target = [Event];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Event>> for Events {
    fn from(events: Vec<Event>) -> Self {
        Self(events)
    }
}

impl FromIterator<Event> for Events {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Event> for Events {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Events {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Events {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Group events by `(package, test)`
///
/// Groups come out in the order their key was first seen, and each group
/// keeps the order its events arrived in. Package-level events (empty test
/// name) form a group of their own per package.
pub fn group_by_test(events: impl IntoIterator<Item = Event>) -> Vec<Events> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<Events> = Vec::new();

    for event in events {
        let key = (event.package.clone(), event.test.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Events::new());
            groups.len() - 1
        });
        groups[slot].push(event);
    }

    groups
}
