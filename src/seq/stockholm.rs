// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::LoaderError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

pub fn read_stockholm_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, LoaderError> {
    let file = File::open(path)?;
    read_stockholm(BufReader::new(file))
}

pub fn read_stockholm<R: BufRead>(reader: R) -> Result<SeqFile, LoaderError> {
    let mut order: Vec<String> = Vec::new();
    let mut sequences: HashMap<String, String> = HashMap::new();

    for line in reader.lines() {
        let l = line?;
        let trimmed = l.trim_end();
        if trimmed.starts_with("//") {
            break;
        }
        // Annotation or block separator -> ignore.
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(seqname), Some(aln_seq), None) => {
                // Multi-block alignments repeat each name once per block
                let entry = sequences.entry(seqname.to_string()).or_insert_with(|| {
                    order.push(seqname.to_string());
                    String::new()
                });
                entry.push_str(aln_seq);
            }
            _ => {
                return Err(LoaderError::Format(format!(
                    "Expected exactly two fields: '{}'",
                    trimmed
                )))
            }
        }
    }

    let result: SeqFile = order
        .into_iter()
        .map(|name| {
            let sequence = sequences.remove(&name).unwrap_or_default();
            SeqRecord::from_label(&name, sequence)
        })
        .collect();

    Ok(result)
}
