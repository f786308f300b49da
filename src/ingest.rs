// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

//! The load loop: read records, pick the ones to keep, store them, commit now and then and keep
//! track of what went wrong.

use log::{debug, info, warn};

use crate::db::SequenceSink;
use crate::errors::LoaderError;
use crate::sample::Sampler;
use crate::seq::record::SeqRecord;

/// Commit after this many successful loads.
pub const COMMIT_COUNT: usize = 100;

/// Give up once this many records have failed.
pub const ERROR_COUNT: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    pub seen: usize,
    pub loaded: usize,
    /// In order of occurrence
    pub errors: Vec<String>,
    pub aborted: bool,
}

pub struct Loader<'a, S: SequenceSink + ?Sized> {
    sink: &'a mut S,
    sampler: Sampler,
    ignore_duplicates: bool,
}

impl<'a, S: SequenceSink + ?Sized> Loader<'a, S> {
    pub fn new(sink: &'a mut S, sampler: Sampler) -> Self {
        Loader {
            sink,
            sampler,
            ignore_duplicates: false,
        }
    }

    pub fn ignore_duplicates(mut self, ignore: bool) -> Self {
        self.ignore_duplicates = ignore;
        self
    }

    /// Consumes `records` until it ends, the sample is complete or too many records failed. A
    /// record stream error stops the run as well. Pending loads are committed in every case,
    /// except when the sink reports a fatal load error: then there is nothing left to commit.
    pub fn load<I>(mut self, records: I) -> Result<IngestOutcome, LoaderError>
    where
        I: IntoIterator<Item = Result<SeqRecord, LoaderError>>,
    {
        let mut outcome = IngestOutcome::default();

        for record in records {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    self.sink.commit()?;
                    return Err(e);
                }
            };
            debug!("Record {} parsed.", record.id);

            if self.sampler.should_load(&record.id, outcome.seen) {
                self.load_one(&record, &mut outcome)?;
            }
            outcome.seen += 1;

            if outcome.errors.len() >= ERROR_COUNT {
                self.sink.commit()?;
                outcome.aborted = true;
                return Err(LoaderError::TooManyErrors {
                    limit: ERROR_COUNT,
                    outcome,
                });
            }

            if self.sampler.is_complete(outcome.loaded) {
                info!("Sample of {} records complete.", outcome.loaded);
                break;
            }
        }

        self.sink.commit()?;
        Ok(outcome)
    }

    fn load_one(
        &mut self,
        record: &SeqRecord,
        outcome: &mut IngestOutcome,
    ) -> Result<(), LoaderError> {
        match self.sink.load(record) {
            Ok(()) => {
                outcome.loaded += 1;
                if outcome.loaded % COMMIT_COUNT == 0 {
                    self.sink.commit()?;
                    info!("{} records loaded.", outcome.loaded);
                }
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) if e.is_duplicate() && self.ignore_duplicates => {
                debug!("Ignoring duplicate {}", record.id);
            }
            Err(e) => {
                warn!("{}", e);
                outcome.errors.push(e.to_string());
            }
        }
        Ok(())
    }
}
