// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gotest-events

use thiserror::Error;

/// Errors that can occur while decoding a single event line
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed JSON, a line that is not a JSON object, or a field with the
    /// wrong type
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An action string outside the known set
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),
}

/// Errors that can occur while reading a stream of event lines
#[derive(Debug, Error)]
pub enum StreamError {
    /// A line could not be decoded
    #[error("line {line}: {source}")]
    Decode {
        /// 1-based line number within the stream
        line: usize,
        /// The underlying decode failure
        #[source]
        source: DecodeError,
    },

    /// Error reading from the underlying reader
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// Line number of a decode failure, if this is one
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Decode { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}
