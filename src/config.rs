// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

//! Command line and environment settings. Every setting is described once in [`PARAMETERS`]; a
//! value given on the command line wins over the environment, which wins over the default.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Command, CommandFactory, Parser};
use log::LevelFilter;

use crate::db::sqlite::DEFAULT_DATABASE;
use crate::db::{ConnectParams, Driver};
use crate::errors::LoaderError;
use crate::sample::SampleSpec;
use crate::seq::file::SeqFileFormat;

#[derive(Debug, Clone, Copy)]
pub struct ParamDef {
    pub name: &'static str,
    pub flag: &'static str,
    pub env: &'static str,
    pub default: Option<&'static str>,
    pub required: bool,
}

pub const PARAMETERS: &[ParamDef] = &[
    ParamDef {
        name: "loglevel",
        flag: "--loglevel",
        env: "SEQDB_LOADER_LOGLEVEL",
        default: Some("error"),
        required: false,
    },
    ParamDef {
        name: "parser",
        flag: "--parser",
        env: "SEQDB_LOADER_PARSER",
        default: None,
        required: true,
    },
    ParamDef {
        name: "user",
        flag: "--user",
        env: "SEQDB_LOADER_USER",
        default: None,
        required: false,
    },
    ParamDef {
        name: "password",
        flag: "--password",
        env: "SEQDB_LOADER_PASSWORD",
        default: None,
        required: false,
    },
    ParamDef {
        name: "host",
        flag: "--host",
        env: "SEQDB_LOADER_HOST",
        default: None,
        required: false,
    },
    ParamDef {
        name: "database",
        flag: "--database",
        env: "SEQDB_LOADER_DATABASE",
        default: Some(DEFAULT_DATABASE),
        required: false,
    },
    ParamDef {
        name: "sample",
        flag: "--sample",
        env: "SEQDB_LOADER_SAMPLE",
        default: None,
        required: false,
    },
    ParamDef {
        name: "namespace",
        flag: "--namespace",
        env: "SEQDB_LOADER_NS",
        default: Some("db"),
        required: false,
    },
    ParamDef {
        name: "ignore-duplicates",
        flag: "--ignore-duplicates",
        env: "SEQDB_LOADER_IGNORE_DUPLICATES",
        default: Some("false"),
        required: false,
    },
    ParamDef {
        name: "driver",
        flag: "--driver",
        env: "SEQDB_LOADER_DRIVER",
        default: Some("sqlite"),
        required: false,
    },
    ParamDef {
        name: "seed",
        flag: "--seed",
        env: "SEQDB_LOADER_SEED",
        default: None,
        required: false,
    },
];

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sequence data file
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Log level (e.g. debug, info)
    #[arg(long)]
    pub loglevel: Option<String>,

    /// Sequence file parser [fasta|clustal|stockholm|swiss] (or just f|c|s|w)
    #[arg(short, long)]
    pub parser: Option<String>,

    /// Database user
    #[arg(long)]
    pub user: Option<String>,

    /// Database password
    #[arg(long)]
    pub password: Option<String>,

    /// Database hostname
    #[arg(long)]
    pub host: Option<String>,

    /// Database name (for sqlite: the database file)
    #[arg(long)]
    pub database: Option<String>,

    /// Sample of the input: either n:N, n samples out of about N records (10:100000), or a
    /// comma-separated list of identifiers (P12345,P98765)
    #[arg(long)]
    pub sample: Option<String>,

    /// Namespace the records are loaded into
    #[arg(long)]
    pub namespace: Option<String>,

    /// Silently skip records that are already in the database
    #[arg(long = "ignore-duplicates")]
    pub ignore_duplicates: bool,

    /// Database driver
    #[arg(long)]
    pub driver: Option<String>,

    /// Random seed for n:N sampling
    #[arg(long)]
    pub seed: Option<String>,
}

impl Cli {
    fn flag_value(&self, name: &str) -> Option<String> {
        match name {
            "loglevel" => self.loglevel.clone(),
            "parser" => self.parser.clone(),
            "user" => self.user.clone(),
            "password" => self.password.clone(),
            "host" => self.host.clone(),
            "database" => self.database.clone(),
            "sample" => self.sample.clone(),
            "namespace" => self.namespace.clone(),
            // A switch can only turn the setting on
            "ignore-duplicates" => self.ignore_duplicates.then(|| String::from("true")),
            "driver" => self.driver.clone(),
            "seed" => self.seed.clone(),
            _ => None,
        }
    }
}

/// The command line, with each option's help completed from its [`PARAMETERS`] entry.
pub fn command() -> Command {
    PARAMETERS
        .iter()
        .fold(Cli::command(), |cmd, def| {
            // Derived argument ids are the field names
            cmd.mut_arg(def.name.replace('-', "_"), |arg| {
                let mut help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
                help.push_str(&format!(" [env: {}]", def.env));
                if let Some(default) = def.default {
                    help.push_str(&format!(" [default: {}]", default));
                }
                arg.help(help)
            })
        })
        .after_help("Command-line values take precedence over the environment.")
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LevelFilter,
    pub parser: SeqFileFormat,
    pub input_path: PathBuf,
    pub sample: Option<SampleSpec>,
    pub ignore_duplicates: bool,
    pub seed: Option<u64>,
    pub connection: ConnectParams,
}

fn resolve_value<E>(
    def: &ParamDef,
    flag: Option<String>,
    env: &E,
) -> Result<Option<String>, LoaderError>
where
    E: Fn(&str) -> Option<String>,
{
    let value = flag
        .or_else(|| env(def.env).filter(|v| !v.is_empty()))
        .or_else(|| def.default.map(String::from));
    if def.required && value.is_none() {
        return Err(LoaderError::config(format!(
            "{} (or {}) is required",
            def.flag, def.env
        )));
    }
    Ok(value)
}

fn parse_bool(name: &str, value: &str) -> Result<bool, LoaderError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoaderError::config(format!(
            "Expected a boolean for {}, got '{}'",
            name, value
        ))),
    }
}

impl Config {
    /// `env` looks up environment variables; pass `|k| std::env::var(k).ok()` for the real thing.
    pub fn resolve<E>(cli: &Cli, env: E) -> Result<Self, LoaderError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let values: HashMap<&str, Option<String>> = PARAMETERS
            .iter()
            .map(|def| -> Result<_, LoaderError> {
                Ok((def.name, resolve_value(def, cli.flag_value(def.name), &env)?))
            })
            .collect::<Result<_, _>>()?;
        let get = |name: &str| values.get(name).cloned().flatten();

        let input_path = cli
            .file
            .clone()
            .ok_or_else(|| LoaderError::config("Missing input FILE"))?;
        let parser = get("parser")
            .ok_or_else(|| LoaderError::config("--parser is required"))?
            .parse::<SeqFileFormat>()?;

        let log_level = match get("loglevel") {
            Some(level) => LevelFilter::from_str(&level)
                .map_err(|_| LoaderError::config(format!("Unknown log level '{}'", level)))?,
            None => LevelFilter::Error,
        };
        let sample = get("sample").map(|s| s.parse::<SampleSpec>()).transpose()?;
        let ignore_duplicates = match get("ignore-duplicates") {
            Some(v) => parse_bool("ignore-duplicates", &v)?,
            None => false,
        };
        let seed = get("seed")
            .map(|s| {
                s.parse::<u64>()
                    .map_err(|e| LoaderError::config(format!("Bad seed '{}': {}", s, e)))
            })
            .transpose()?;
        let driver = get("driver")
            .map(|d| d.parse::<Driver>())
            .transpose()?
            .unwrap_or(Driver::Sqlite);

        Ok(Config {
            log_level,
            parser,
            input_path,
            sample,
            ignore_duplicates,
            seed,
            connection: ConnectParams {
                driver,
                user: get("user"),
                password: get("password"),
                host: get("host"),
                database: get("database"),
                namespace: get("namespace").unwrap_or_else(|| String::from("db")),
            },
        })
    }
}
