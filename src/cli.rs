//! # CLI argument parsing and dispatch
//!
//! A single flat `clap::Parser` struct, in the grounding codebase's derive
//! style, rather than its multi-subcommand tree — this engine does one
//! thing (search one signature over one rectangle), so there is nothing to
//! dispatch between beyond `--validate`.

use std::path::PathBuf;

use clap::Parser;

use bealhunt::error::EngineError;
use bealhunt::logger;
use bealhunt::params::SearchParams;

/// Exhaustive search for primitive counterexamples to the Beal Conjecture.
#[derive(Parser, Debug)]
#[command(name = "bealhunt", about = "Search A^x + B^y = C^z for coprime counterexamples", version)]
pub struct Cli {
    /// Exponent x (A's exponent), must be >= 3
    #[arg(long)]
    pub x: u32,

    /// Exponent y (B's exponent), must be >= 3
    #[arg(long)]
    pub y: u32,

    /// Exponent z (C's exponent), must be >= 3
    #[arg(long)]
    pub z: u32,

    /// Smallest A to search (default 1)
    #[arg(long, default_value_t = 1)]
    pub astart: u64,

    /// Largest A to search
    #[arg(long)]
    pub amax: u64,

    /// Smallest B to search (default 1)
    #[arg(long, default_value_t = 1)]
    pub bstart: u64,

    /// Largest B to search
    #[arg(long)]
    pub bmax: u64,

    /// Largest C to accept as an exact confirmation (default 10,000,000)
    #[arg(long, default_value_t = 10_000_000)]
    pub cmax: u64,

    /// Number of rayon worker threads (0 = rayon's default parallelism)
    #[arg(long, default_value_t = 0, env = "BEALHUNT_THREADS")]
    pub threads: usize,

    /// Path to the JSONL event log (default: search_<x>_<y>_<z>_<epoch>.jsonl)
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Minimum seconds between CHECKPOINT log records
    #[arg(long, default_value_t = 1)]
    pub progress: u64,

    /// Run the built-in self-validation harness instead of a search
    #[arg(long)]
    pub validate: bool,
}

impl Cli {
    /// Build and validate [`SearchParams`] from the parsed arguments.
    pub fn to_params(&self) -> Result<SearchParams, EngineError> {
        let log_path = self
            .log
            .clone()
            .unwrap_or_else(|| logger::default_log_path(self.x, self.y, self.z));

        let params = SearchParams {
            x: self.x,
            y: self.y,
            z: self.z,
            a_start: self.astart,
            a_max: self.amax,
            b_start: self.bstart,
            b_max: self.bmax,
            c_max: self.cmax,
            threads: self.threads,
            log_path,
            progress_interval_secs: self.progress,
        };
        params.validate()?;
        Ok(params)
    }
}
