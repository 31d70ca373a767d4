// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for single-line decoding
//!
//! Decodes arbitrary bytes and, when that succeeds, runs normalization and
//! every classification rule over the result.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::Event;

fuzz_target!(|data: &[u8]| {
    if let Ok(event) = Event::decode(data) {
        let event = event.normalize_nested_test();
        // Normalizing twice must not change anything
        assert_eq!(event.clone().normalize_nested_test(), event);
        let _ = event.classify();
    }
});
