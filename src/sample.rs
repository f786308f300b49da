// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

//! Record sampling: load only listed identifiers, or roughly `n` out of `N` records picked at
//! randomized intervals.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use regex::Regex;

use crate::errors::LoaderError;

/// Widens the stride range so that the stream is less likely to run out before `n` hits. Empirical;
/// there is no guarantee of exactly `n` selections.
pub const DEFAULT_STRIDE_INFLATION: f64 = 1.4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSpec {
    ByIds(HashSet<String>),
    ByRatio {
        sample_size: usize,
        population_size: usize,
    },
}

fn ratio_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+:\d+$").expect("valid regex"))
}

impl FromStr for SampleSpec {
    type Err = LoaderError;

    /// `n:N` selects the ratio mode, anything else is a comma-separated id list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if ratio_re().is_match(s) {
            let (n, total) = s.split_once(':').unwrap_or((s, ""));
            let parse = |v: &str| {
                v.parse::<usize>()
                    .map_err(|e| LoaderError::config(format!("Bad sample value '{}': {}", v, e)))
            };
            let sample_size = parse(n)?;
            let population_size = parse(total)?;
            if sample_size == 0 || population_size == 0 {
                return Err(LoaderError::config(format!(
                    "Sample sizes must be positive: '{}'",
                    s
                )));
            }
            Ok(SampleSpec::ByRatio {
                sample_size,
                population_size,
            })
        } else {
            let ids: HashSet<String> = s
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(String::from)
                .collect();
            if ids.is_empty() {
                return Err(LoaderError::config("Empty sample id list"));
            }
            Ok(SampleSpec::ByIds(ids))
        }
    }
}

/// Decides, record by record, whether a record goes to the database.
pub struct Sampler {
    spec: Option<SampleSpec>,
    rng: StdRng,
    inflation: f64,
    next_index: Option<usize>,
}

impl Sampler {
    /// `None` loads everything. The RNG is only drawn from in ratio mode.
    pub fn new(spec: Option<SampleSpec>, rng: StdRng) -> Self {
        Sampler {
            spec,
            rng,
            inflation: DEFAULT_STRIDE_INFLATION,
            next_index: None,
        }
    }

    pub fn with_inflation(mut self, inflation: f64) -> Self {
        self.inflation = inflation;
        self
    }

    /// Upper bound (inclusive) of a single stride, or `None` outside ratio mode.
    pub fn stride_limit(&self) -> Option<usize> {
        match self.spec {
            Some(SampleSpec::ByRatio {
                sample_size,
                population_size,
            }) => {
                let limit = population_size as f64 * self.inflation / sample_size as f64;
                Some(limit.floor() as usize)
            }
            _ => None,
        }
    }

    /// Sample size at which the load loop may stop early.
    pub fn sample_size(&self) -> Option<usize> {
        match self.spec {
            Some(SampleSpec::ByRatio { sample_size, .. }) => Some(sample_size),
            _ => None,
        }
    }

    pub fn is_complete(&self, loaded: usize) -> bool {
        self.sample_size() == Some(loaded)
    }

    /// `seen` is the number of records processed before this one.
    pub fn should_load(&mut self, id: &str, seen: usize) -> bool {
        let limit = match &self.spec {
            None => return true,
            Some(SampleSpec::ByIds(ids)) => return ids.contains(id),
            Some(SampleSpec::ByRatio { .. }) => self.stride_limit().unwrap_or(0),
        };

        let next = match self.next_index {
            Some(next) => next,
            None => {
                let first = self.rng.gen_range(0..=limit);
                self.next_index = Some(first);
                first
            }
        };
        if seen != next {
            return false;
        }

        // A zero stride would leave the target behind the stream position forever.
        let stride = self.rng.gen_range(0..=limit).max(1);
        self.next_index = Some(next + stride);
        debug!("Sample {} selected; next sample at record {}", id, next + stride);
        true
    }
}
