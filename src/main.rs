//! # Main — CLI entry point
//!
//! Parses arguments, initializes logging and the global allocator, and runs
//! either the search or the `--validate` self-test harness. Exit codes
//! follow the contract: `0` means the rectangle was searched clean, `42`
//! means a primitive counterexample was found, anything else is a usage or
//! runtime error.

mod cli;

use anyhow::Result;
use clap::Parser;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use bealhunt::search;
use cli::Cli;

const EXIT_CLEAN: i32 = 0;
const EXIT_COUNTEREXAMPLE: i32 = 42;
const EXIT_USAGE_ERROR: i32 = 1;

fn main() -> Result<()> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    if cli.validate {
        let ok = bealhunt::validate::run();
        std::process::exit(if ok { EXIT_CLEAN } else { EXIT_USAGE_ERROR });
    }

    let params = match cli.to_params() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(EXIT_USAGE_ERROR);
        }
    };

    let results = search::run(&params)?;

    println!(
        "status={} total_pairs={} gcd_filtered={} mod_filtered={} exact_checks={} power_hits={} primitive_hits={} runtime_seconds={:.3}",
        results.status(),
        results.total_pairs,
        results.gcd_filtered,
        results.mod_filtered,
        results.exact_checks,
        results.power_hits,
        results.primitive_hits,
        results.runtime_seconds,
    );

    std::process::exit(if results.primitive_hits > 0 { EXIT_COUNTEREXAMPLE } else { EXIT_CLEAN });
}
