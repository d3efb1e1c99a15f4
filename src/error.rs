//! # Engine error taxonomy
//!
//! The library boundary speaks `EngineError`; the CLI boundary wraps it
//! (and everything else) in `anyhow::Error`, mirroring the split the
//! grounding codebase draws between its engine modules and its `main`/`cli`
//! entry points. The sieve and verifier have no fallible paths — only
//! configuration validation and table construction can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid signature ({x}, {y}, {z}): all exponents must be >= 3")]
    InvalidSignature { x: u32, y: u32, z: u32 },

    #[error("invalid range: {axis}_start ({start}) must be <= {axis}_max ({max})")]
    InvalidRange { axis: &'static str, start: u64, max: u64 },

    #[error("invalid range: {axis} bound must be >= 1, got {value}")]
    RangeBelowOne { axis: &'static str, value: u64 },

    #[error("failed to allocate precomputed tables for A_max={a_max}, B_max={b_max}: {source}")]
    TableAllocation {
        a_max: u64,
        b_max: u64,
        #[source]
        source: std::collections::TryReserveError,
    },
}
