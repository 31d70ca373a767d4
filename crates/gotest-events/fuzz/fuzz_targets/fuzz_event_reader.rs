// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the streaming reader
//!
//! This fuzzes `EventReader`, which decodes `go test -json` output
//! line-by-line and keeps going past bad lines.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::{EventReader, ReadOptions, group_by_test};

fuzz_target!(|data: &[u8]| {
    let reader = EventReader::new(data, ReadOptions::default());

    // Bad lines are yielded as errors, never panics
    let events: Vec<_> = reader.filter_map(Result::ok).collect();

    for group in group_by_test(events) {
        let _ = group.status();
        let _ = group.output();
    }
});
