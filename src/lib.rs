pub mod config;
pub mod db;
pub mod errors;
pub mod ingest;
pub mod report;
mod runner;
pub mod sample;
pub mod seq;

use crate::errors::LoaderError;

pub use crate::runner::load_file;

pub fn run() -> Result<(), LoaderError> {
    runner::run()
}
