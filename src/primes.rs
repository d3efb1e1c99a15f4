//! # Sieve prime set
//!
//! The fixed, ordered sequence of 20 small primes used by the modular
//! sieve. Order and identity are part of the interface: the integrity
//! digest and cross-run comparability both depend on this exact list never
//! changing, so it is a literal constant rather than something computed by
//! a generic prime sieve (contrast with, e.g., a generate-primes-up-to-N
//! utility — that generality is not wanted here).

/// The 20 sieve primes, in the order every table and log record uses.
pub const SIEVE_PRIMES: [u64; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Number of sieve primes (kept as a named constant so table dimensions
/// read as `NUM_SIEVE_PRIMES` rather than a bare `20`).
pub const NUM_SIEVE_PRIMES: usize = SIEVE_PRIMES.len();
