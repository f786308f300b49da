// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

//! Persistence side of the loader: where records go once they are selected.

pub mod schema;
pub mod sqlite;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::errors::LoaderError;
use crate::seq::record::SeqRecord;

/// Why a record could not be stored. Only `TransactionLost` ends the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Duplicate entry '{id}': {message}")]
    Duplicate { id: String, message: String },

    #[error("Could not load '{id}': {message}")]
    Failed { id: String, message: String },

    /// The store rolled back its open transaction while loading `id`; the `lost` records
    /// loaded since the last commit are gone.
    #[error("Transaction lost at '{id}', {lost} uncommitted records discarded: {message}")]
    TransactionLost {
        id: String,
        lost: usize,
        message: String,
    },
}

impl LoadError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, LoadError::Duplicate { .. })
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, LoadError::TransactionLost { .. })
    }
}

/// A store that takes records one at a time and makes them durable on `commit`.
pub trait SequenceSink {
    fn load(&mut self, record: &SeqRecord) -> Result<(), LoadError>;

    /// Flushes pending loads. Must be harmless when nothing is pending.
    fn commit(&mut self) -> Result<(), LoaderError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Driver {
    Sqlite,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Driver {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(LoaderError::config(format!(
                "Unsupported database driver '{}' (expected sqlite)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    pub driver: Driver,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub database: Option<String>,
    pub namespace: String,
}

impl ConnectParams {
    /// In-memory SQLite database, mostly for tests.
    pub fn in_memory(namespace: &str) -> Self {
        ConnectParams {
            driver: Driver::Sqlite,
            user: None,
            password: None,
            host: None,
            database: Some(String::from(":memory:")),
            namespace: namespace.to_string(),
        }
    }
}
