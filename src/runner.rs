// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use clap::FromArgMatches;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{self, Cli, Config};
use crate::db::sqlite::SqliteSink;
use crate::errors::LoaderError;
use crate::ingest::{IngestOutcome, Loader};
use crate::report;
use crate::sample::Sampler;
use crate::seq::file::open_record_stream;

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new().filter_level(level).init();
}

/// Loads `config.input_path` into the configured database.
pub fn load_file(config: &Config) -> Result<IngestOutcome, LoaderError> {
    let records = open_record_stream(&config.input_path, config.parser)?;
    let mut sink = SqliteSink::connect(&config.connection)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sampler = Sampler::new(config.sample.clone(), rng);

    Loader::new(&mut sink, sampler)
        .ignore_duplicates(config.ignore_duplicates)
        .load(records)
}

pub fn run() -> Result<(), LoaderError> {
    let matches = config::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let config = Config::resolve(&cli, |key| std::env::var(key).ok())?;
    init_logging(config.log_level);
    info!("Starting log");
    info!(
        "Loading {} ({}) into namespace '{}'",
        config.input_path.display(),
        config.parser,
        config.connection.namespace
    );

    match load_file(&config) {
        Ok(outcome) => {
            println!("{}", report::render(&outcome));
            Ok(())
        }
        Err(LoaderError::TooManyErrors { limit, outcome }) => {
            // The errors themselves go to stderr with the abort message
            println!("{}", report::summary_line(&outcome));
            Err(LoaderError::TooManyErrors { limit, outcome })
        }
        Err(e) => Err(e),
    }
}
