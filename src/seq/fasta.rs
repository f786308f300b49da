// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::errors::LoaderError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

/// Lazy FastA reader: yields one record at a time, holding only the header of the next one.
pub struct FastaReader<R> {
    lines: Lines<R>,
    next_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        FastaReader {
            lines: reader.lines(),
            next_header: None,
        }
    }

    // Skips blank lines up to the first header. Anything else before it is malformed.
    fn first_header(&mut self) -> Option<Result<String, LoaderError>> {
        for line in self.lines.by_ref() {
            let l = match line {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            if let Some(hdr) = l.strip_prefix('>') {
                return Some(Ok(hdr.to_string()));
            }
            if !l.trim().is_empty() {
                return Some(Err(LoaderError::Format(String::from(
                    "Sequence data before first FastA header",
                ))));
            }
        }
        None
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SeqRecord, LoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = match self.next_header.take() {
            Some(hdr) => hdr,
            None => match self.first_header()? {
                Ok(hdr) => hdr,
                Err(e) => return Some(Err(e)),
            },
        };

        let mut sequence = String::new();
        for line in self.lines.by_ref() {
            let l = match line {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            if let Some(hdr) = l.strip_prefix('>') {
                self.next_header = Some(hdr.to_string());
                break;
            }
            // append line to current record's sequence
            sequence.push_str(l.trim());
        }
        Some(Ok(SeqRecord::from_header(&header, sequence)))
    }
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, LoaderError> {
    let file = File::open(path)?;
    FastaReader::new(BufReader::new(file)).collect()
}
