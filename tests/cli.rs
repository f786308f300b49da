// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

mod common;

use std::path::Path;
use std::process::{Command, Output};

use crate::common::utils;

fn loader(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seqdb-loader"))
        .args(args)
        .env_clear()
        .envs(envs.iter().copied())
        .output()
        .expect("running seqdb-loader")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn path_str(p: &Path) -> &str {
    p.to_str().expect("utf-8 path")
}

#[test]
fn two_records_then_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let records = vec![
        (String::from("seq1"), String::from("GAATTC")),
        (String::from("seq2"), String::from("TTGCCGCGA")),
    ];
    let input = utils::write_fasta(dir.path(), "two.fa", &records);
    let db = dir.path().join("seqdb.sqlite");
    let args = ["-p", "fasta", "--database", path_str(&db), path_str(&input)];

    let first = loader(&args, &[]);
    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert_eq!(stdout(&first).trim(), "2 records loaded out of 2.");

    let second = loader(&args, &[]);
    assert!(second.status.success(), "stderr: {}", stderr(&second));
    let out = stdout(&second);
    assert!(out.starts_with("0 records loaded out of 2.\nErrors:\n"), "{}", out);
    assert_eq!(out.matches("Duplicate entry").count(), 2);

    let quiet = loader(
        &["-p", "fasta", "--database", path_str(&db), "--ignore-duplicates", path_str(&input)],
        &[],
    );
    assert!(quiet.status.success());
    assert_eq!(stdout(&quiet).trim(), "0 records loaded out of 2.");
}

#[test]
fn settings_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("env.sqlite");
    let out = loader(
        &["data/test-swiss.dat"],
        &[
            ("SEQDB_LOADER_PARSER", "swiss"),
            ("SEQDB_LOADER_DATABASE", path_str(&db)),
            ("SEQDB_LOADER_SAMPLE", "P12345"),
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "1 records loaded out of 2.");
    assert!(db.exists());
}

#[test]
fn missing_parser_fails() {
    let out = loader(&["data/test1.fas"], &[]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("--parser"), "{}", stderr(&out));
}

#[test]
fn missing_file_argument_fails() {
    let out = loader(&["-p", "fasta"], &[]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Configuration error"));
}

#[test]
fn unreadable_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("seqdb.sqlite");
    let out = loader(
        &["-p", "fasta", "--database", path_str(&db), "data/no-such-file.fas"],
        &[],
    );
    assert!(!out.status.success());
    assert!(stderr(&out).contains("I/O error"));
}

#[test]
fn unknown_parser_fails() {
    let out = loader(&["-p", "genbank", "data/test1.fas"], &[]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Unknown parser"));
}

#[test]
fn error_threshold_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let input = utils::write_fasta(dir.path(), "many.fa", &utils::numbered_records(110));
    let db = dir.path().join("seqdb.sqlite");
    let args = ["-p", "fasta", "--database", path_str(&db), path_str(&input)];

    assert!(loader(&args, &[]).status.success());
    let out = loader(&args, &[]);
    assert!(!out.status.success());
    assert_eq!(stdout(&out).trim(), "0 records loaded out of 100.");
    let err = stderr(&out);
    assert!(err.starts_with("Processing aborted due to too many (100) sequence errors:"));
    assert_eq!(err.matches("Duplicate entry").count(), 100);
}
