// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::errors::LoaderError;
use crate::seq::clustal::read_clustal_file;
use crate::seq::fasta::FastaReader;
use crate::seq::record::SeqRecord;
use crate::seq::stockholm::read_stockholm_file;
use crate::seq::swiss::SwissReader;

// Alignment formats are interleaved, so they have to be read whole; a sequence file is then just
// a Vec of sequence records.
//

pub type SeqFile = Vec<SeqRecord>;

/// Forward-only stream of records. Read errors are yielded in place and end the stream for the
/// consumer.
pub type RecordStream = Box<dyn Iterator<Item = Result<SeqRecord, LoaderError>>>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeqFileFormat {
    FastA,
    Clustal,
    Stockholm,
    Swiss,
}

impl fmt::Display for SeqFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeqFileFormat::FastA => "fasta",
            SeqFileFormat::Clustal => "clustal",
            SeqFileFormat::Stockholm => "stockholm",
            SeqFileFormat::Swiss => "swiss",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SeqFileFormat {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fasta" | "f" => Ok(SeqFileFormat::FastA),
            "clustal" | "c" => Ok(SeqFileFormat::Clustal),
            "stockholm" | "s" => Ok(SeqFileFormat::Stockholm),
            "swiss" | "w" => Ok(SeqFileFormat::Swiss),
            other => Err(LoaderError::config(format!(
                "Unknown parser '{}' (expected fasta|clustal|stockholm|swiss)",
                other
            ))),
        }
    }
}

pub fn open_record_stream<P: AsRef<Path>>(
    path: P,
    format: SeqFileFormat,
) -> Result<RecordStream, LoaderError> {
    let path = path.as_ref();
    let stream: RecordStream = match format {
        SeqFileFormat::FastA => Box::new(FastaReader::new(BufReader::new(File::open(path)?))),
        SeqFileFormat::Swiss => Box::new(SwissReader::new(BufReader::new(File::open(path)?))),
        SeqFileFormat::Clustal => Box::new(read_clustal_file(path)?.into_iter().map(Ok)),
        SeqFileFormat::Stockholm => Box::new(read_stockholm_file(path)?.into_iter().map(Ok)),
    };
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_and_aliases() {
        assert_eq!("fasta".parse::<SeqFileFormat>().unwrap(), SeqFileFormat::FastA);
        assert_eq!("c".parse::<SeqFileFormat>().unwrap(), SeqFileFormat::Clustal);
        assert_eq!("Stockholm".parse::<SeqFileFormat>().unwrap(), SeqFileFormat::Stockholm);
        assert_eq!("w".parse::<SeqFileFormat>().unwrap(), SeqFileFormat::Swiss);
        assert!(matches!(
            "genbank".parse::<SeqFileFormat>(),
            Err(LoaderError::Config(_))
        ));
    }

    #[test]
    fn test_open_record_stream_missing_file() {
        let res = open_record_stream("data/no-such-file.fas", SeqFileFormat::FastA);
        assert!(matches!(res, Err(LoaderError::Io(_))));
    }

    #[test]
    fn test_open_record_stream_each_format() {
        let count = |path: &str, format| {
            open_record_stream(path, format)
                .expect("Test file not found")
                .collect::<Result<Vec<_>, _>>()
                .expect("parse")
                .len()
        };
        assert_eq!(count("data/test2.fas", SeqFileFormat::FastA), 3);
        assert_eq!(count("data/test-clustal.aln", SeqFileFormat::Clustal), 2);
        assert_eq!(count("data/PF00571.sto", SeqFileFormat::Stockholm), 5);
        assert_eq!(count("data/test-swiss.dat", SeqFileFormat::Swiss), 2);
    }
}
