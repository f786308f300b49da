// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::io::{BufRead, Lines};

use crate::errors::LoaderError;
use crate::seq::record::SeqRecord;

/// Lazy reader for Swiss-Prot / UniProtKB flat files (`.dat`). Entries end with `//`.
pub struct SwissReader<R> {
    lines: Lines<R>,
}

impl<R: BufRead> SwissReader<R> {
    pub fn new(reader: R) -> Self {
        SwissReader {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> Iterator for SwissReader<R> {
    type Item = Result<SeqRecord, LoaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut entry = EntryBuilder::default();
        let mut in_sequence = false;

        for line in self.lines.by_ref() {
            let line = match line {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            if line.starts_with("//") {
                return Some(entry.build());
            }
            if line.trim().is_empty() {
                continue;
            }
            entry.started = true;
            if let Some(rest) = line.strip_prefix("ID   ") {
                entry.parse_id_line(rest);
            } else if let Some(rest) = line.strip_prefix("AC   ") {
                entry.parse_ac_line(rest);
            } else if let Some(rest) = line.strip_prefix("DE   ") {
                entry.parse_de_line(rest);
            } else if line.starts_with("SQ   ") {
                in_sequence = true;
            } else if in_sequence && line.starts_with("     ") {
                entry.sequence.extend(line.split_whitespace());
            }
        }

        // Input ended without a terminator
        if entry.started {
            Some(Err(LoaderError::Format(String::from(
                "Swiss-Prot entry not terminated by '//'",
            ))))
        } else {
            None
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    started: bool,
    entry_name: Option<String>,
    accessions: Vec<String>,
    description: Vec<String>,
    sequence: String,
}

impl EntryBuilder {
    // ID   AATM_RABIT              Reviewed;         412 AA.
    fn parse_id_line(&mut self, rest: &str) {
        self.entry_name = rest.split_whitespace().next().map(String::from);
    }

    // AC   P12345; Q9XYZ1;
    fn parse_ac_line(&mut self, rest: &str) {
        self.accessions.extend(
            rest.split(';')
                .map(str::trim)
                .filter(|ac| !ac.is_empty())
                .map(String::from),
        );
    }

    fn parse_de_line(&mut self, rest: &str) {
        self.description.push(rest.trim().to_string());
    }

    fn build(self) -> Result<SeqRecord, LoaderError> {
        let id = self.accessions.into_iter().next().ok_or_else(|| {
            LoaderError::Format(String::from("Swiss-Prot entry without accession"))
        })?;
        Ok(SeqRecord {
            name: self.entry_name.unwrap_or_else(|| id.clone()),
            id,
            description: self.description.join(" "),
            sequence: self.sequence,
        })
    }
}
