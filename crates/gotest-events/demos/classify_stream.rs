// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Classify a `go test -json` stream read from stdin
//!
//! Writes one JSON object per input event: the (normalized) event next to
//! its classification. Undecodable lines are logged and skipped.
//!
//! ```text
//! go test -json ./... | cargo run --example classify_stream
//! RUST_LOG=gotest_events=trace cargo run --example classify_stream < run.jsonl
//! ```

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use gotest_events::{EventReader, ReadOptions};
use serde_json::json;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut written = 0usize;

    for result in EventReader::new(stdin, ReadOptions::default()) {
        let event = match result {
            Ok(event) => event,
            Err(e) if e.line().is_some() => {
                warn!(error = %e, "Skipping line");
                continue;
            }
            Err(e) => return Err(e).context("Failed to read stdin"),
        };

        let classification = event.classify();
        serde_json::to_writer(&mut out, &json!({ "event": event, "classification": classification }))
            .context("Failed to write classified event")?;
        out.write_all(b"\n")?;
        written += 1;
    }

    out.flush()?;
    info!(events = written, "Done");
    Ok(())
}
