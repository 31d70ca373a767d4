// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Reading newline-delimited event streams
//!
//! `go test -json` writes one event per line. This module decodes such a
//! stream either all at once ([`parse_output`]) or incrementally from any
//! [`BufRead`] ([`EventReader`]).
//!
//! # Example
//!
//! ```
//! use gotest_events::stream::{EventReader, ReadOptions};
//!
//! let input = concat!(
//!     r#"{"Action":"run","Package":"p","Test":"TestFoo"}"#, "\n",
//!     r#"{"Action":"pass","Package":"p","Test":"TestFoo","Elapsed":0.01}"#, "\n",
//! );
//!
//! let reader = EventReader::new(input.as_bytes(), ReadOptions::default());
//! let events: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
//! assert_eq!(events.len(), 2);
//! ```

use std::io::BufRead;

use tracing::{debug, trace, warn};

use crate::error::{DecodeError, StreamError};
use crate::event::Event;

/// Options controlling how a stream is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Rewrite nested sub-test results as they are decoded
    pub normalize_nested: bool,
    /// Skip lines that are empty or only whitespace instead of failing them
    pub skip_blank_lines: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            normalize_nested: true,
            skip_blank_lines: true,
        }
    }
}

impl ReadOptions {
    /// Default options: normalize nested tests, skip blank lines
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that hand back events exactly as decoded
    #[must_use]
    pub fn raw() -> Self {
        Self {
            normalize_nested: false,
            ..Self::default()
        }
    }

    /// Enable or disable nested test normalization
    #[must_use]
    pub fn with_normalize_nested(mut self, normalize: bool) -> Self {
        self.normalize_nested = normalize;
        self
    }

    /// Enable or disable skipping of blank lines
    #[must_use]
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    fn decode_line(&self, line: &[u8]) -> Result<Event, DecodeError> {
        let event = Event::decode(line)?;
        if self.normalize_nested {
            Ok(event.normalize_nested_test())
        } else {
            Ok(event)
        }
    }
}

/// Incremental reader yielding one event per line
///
/// A line that fails to decode produces a [`StreamError::Decode`] item and
/// reading carries on with the next line. An I/O error is yielded once and
/// ends the stream.
pub struct EventReader<R> {
    reader: R,
    options: ReadOptions,
    buf: Vec<u8>,
    line: usize,
    decoded: usize,
    failed: usize,
    done: bool,
}

impl<R: BufRead> EventReader<R> {
    /// Create a reader over the given input
    pub fn new(reader: R, options: ReadOptions) -> Self {
        Self {
            reader,
            options,
            buf: Vec::new(),
            line: 0,
            decoded: 0,
            failed: 0,
            done: false,
        }
    }

    /// Number of lines read so far
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Number of lines that failed to decode so far
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    fn finish(&mut self) {
        self.done = true;
        debug!(
            lines = self.line,
            decoded = self.decoded,
            failed = self.failed,
            "Finished reading event stream"
        );
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<Event, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.finish(),
                Ok(_) => {
                    self.line += 1;
                    if self.options.skip_blank_lines && self.buf.trim_ascii().is_empty() {
                        continue;
                    }
                    return Some(match self.options.decode_line(&self.buf) {
                        Ok(event) => {
                            self.decoded += 1;
                            trace!(line = self.line, action = %event.action, test = %event.test, "Decoded event");
                            Ok(event)
                        }
                        Err(source) => {
                            self.failed += 1;
                            warn!(line = self.line, error = %source, "Skipping undecodable line");
                            Err(StreamError::Decode {
                                line: self.line,
                                source,
                            })
                        }
                    });
                }
                Err(e) => {
                    self.finish();
                    return Some(Err(StreamError::Io(e)));
                }
            }
        }
        None
    }
}

/// Parse a complete `go test -json` output buffer
///
/// # Errors
///
/// Returns `StreamError::Decode` for the first line that fails to decode.
pub fn parse_output(output: &str, options: &ReadOptions) -> Result<Vec<Event>, StreamError> {
    let mut events = Vec::new();

    for (idx, line) in output.lines().enumerate() {
        if options.skip_blank_lines && line.trim().is_empty() {
            continue;
        }
        let event = options
            .decode_line(line.as_bytes())
            .map_err(|source| StreamError::Decode {
                line: idx + 1,
                source,
            })?;
        events.push(event);
    }

    Ok(events)
}
