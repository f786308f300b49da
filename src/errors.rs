// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::io;

use thiserror::Error;

use crate::db::LoadError;
use crate::ingest::IngestOutcome;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Format error: {0}")]
    Format(String),

    /// Missing or invalid configuration; nothing has been loaded yet.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record failure the store cannot recover from, e.g. a rolled back transaction.
    #[error("Database error: {0}")]
    Load(#[from] LoadError),

    /// The run hit the error threshold. Pending work has been committed.
    #[error(
        "Processing aborted due to too many ({limit}) sequence errors:\n    {}",
        .outcome.errors.join("\n    ")
    )]
    TooManyErrors { limit: usize, outcome: IngestOutcome },
}

// Lets the parsers build format errors with '?' on plain messages.

impl From<String> for LoaderError {
    fn from(s: String) -> Self {
        LoaderError::Format(s)
    }
}

impl LoaderError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LoaderError::Config(msg.into())
    }
}
