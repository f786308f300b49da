// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;

use seqdb::{
    config::Config,
    db::{sqlite::SqliteSink, ConnectParams, Driver},
    sample::SampleSpec,
    seq::file::SeqFileFormat,
};

pub const NAMESPACE: &str = "test";

/// Writes a FastA file with one record per (id, sequence) pair.
pub fn write_fasta(dir: &Path, name: &str, records: &[(String, String)]) -> PathBuf {
    let path = dir.join(name);
    let text: String = records
        .iter()
        .map(|(id, seq)| format!(">{} test record\n{}\n", id, seq))
        .collect();
    fs::write(&path, text).expect("writing fasta");
    path
}

/// `n` distinct protein records R0, R1, ...
pub fn numbered_records(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| (format!("R{}", i), String::from("MALWMRLLPLLALLALWGPDPAAA")))
        .collect()
}

pub fn connect_params(db: &Path) -> ConnectParams {
    ConnectParams {
        driver: Driver::Sqlite,
        user: None,
        password: None,
        host: None,
        database: Some(db.to_string_lossy().into_owned()),
        namespace: String::from(NAMESPACE),
    }
}

pub fn config(input: &Path, format: SeqFileFormat, db: &Path) -> Config {
    Config {
        log_level: LevelFilter::Off,
        parser: format,
        input_path: input.to_path_buf(),
        sample: None,
        ignore_duplicates: false,
        seed: Some(1),
        connection: connect_params(db),
    }
}

pub fn with_sample(mut config: Config, sample: &str) -> Config {
    config.sample = Some(sample.parse::<SampleSpec>().expect("sample spec"));
    config
}

pub fn open_db(db: &Path) -> SqliteSink {
    SqliteSink::connect(&connect_params(db)).expect("opening database")
}
