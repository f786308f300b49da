// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use itertools::Itertools;

use crate::ingest::IngestOutcome;

pub fn summary_line(outcome: &IngestOutcome) -> String {
    format!("{} records loaded out of {}.", outcome.loaded, outcome.seen)
}

/// Summary line, then the errors (if any) one per indented line.
pub fn render(outcome: &IngestOutcome) -> String {
    let summary = summary_line(outcome);
    if outcome.errors.is_empty() {
        summary
    } else {
        format!(
            "{}\nErrors:\n    {}",
            summary,
            outcome.errors.iter().join("\n    ")
        )
    }
}
