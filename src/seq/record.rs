// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// A record for sequences: an identifier, a display name, some description and a raw sequence.
// Meant to be format-agnostic - FastA, Stockholm, Clustal and Swiss-Prot all map onto it, though
// annotations are dropped.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sequence: String,
}

impl SeqRecord {
    /// Builds a record from a FastA-style header: the id is the first word, the description is
    /// the whole header.
    pub fn from_header(header: &str, sequence: String) -> Self {
        let id = header.split_whitespace().next().unwrap_or("").to_string();
        SeqRecord {
            name: id.clone(),
            id,
            description: header.trim().to_string(),
            sequence,
        }
    }

    /// Builds a record for alignment rows, which carry only a label.
    pub fn from_label(label: &str, sequence: String) -> Self {
        SeqRecord {
            id: label.to_string(),
            name: label.to_string(),
            description: String::new(),
            sequence,
        }
    }

    /// Best guess at the residue alphabet. Gaps and ambiguity 'N' are ignored.
    pub fn alphabet(&self) -> &'static str {
        let residues = self
            .sequence
            .chars()
            .filter(|c| !matches!(c, '-' | '.' | '*' | 'n' | 'N'));
        let mut has_t = false;
        let mut has_u = false;
        for c in residues {
            match c.to_ascii_uppercase() {
                'A' | 'C' | 'G' => {}
                'T' => has_t = true,
                'U' => has_u = true,
                _ => return "protein",
            }
        }
        match (has_t, has_u) {
            (_, false) => "dna",
            (false, true) => "rna",
            (true, true) => "protein",
        }
    }
}
