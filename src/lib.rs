//! # bealhunt — Core Library
//!
//! An exhaustive search engine for primitive counterexamples to the Beal
//! Conjecture: coprime triples `(A, B, C)` and exponents `x, y, z >= 3`
//! satisfying `A^x + B^y = C^z`. Re-exports the modules that make up the
//! two-stage filter pipeline (GCD skip, then a 20-prime modular sieve) and
//! the arbitrary-precision verifier that confirms anything the sieve lets
//! through.
//!
//! ## Module organization
//!
//! **Pipeline modules**, in the order a candidate pair flows through them:
//! - [`arith`] — GCD, modular exponentiation, 128-bit residue bitmasks
//! - [`primes`] — the fixed list of 20 sieve primes
//! - [`tables`] — precomputed per-residue tables built once per run
//! - [`filter`] — the scalar and batched sieve-survival tests
//! - [`verify`] — exact GMP-backed confirmation of sieve survivors
//!
//! **Orchestration modules**:
//! - [`params`] — validated search input (`SearchParams`)
//! - [`search`] — the rayon-parallel driver tying the pipeline together
//! - [`results`] — atomic counters and the finalized [`results::SearchResults`]
//! - [`digest`] — the FNV-1a integrity hash over a completed run
//! - [`validate`] — the `--validate` self-test harness
//!
//! **Infrastructure modules**:
//! - [`logger`] — the contractual JSONL event log
//! - [`system`] — hostname/platform/cpu probing for the START record
//! - [`error`] — [`error::EngineError`], the library's error type
//! - [`cli`] — argument parsing and dispatch (binary-only, not re-exported)

pub mod arith;
pub mod digest;
pub mod error;
pub mod filter;
pub mod logger;
pub mod params;
pub mod primes;
pub mod results;
pub mod search;
pub mod system;
pub mod tables;
pub mod validate;
pub mod verify;
