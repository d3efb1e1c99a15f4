//! # Search results
//!
//! Atomic, monotonic counters updated from every worker, plus the hit list
//! appended under a critical section. Mirrors the grounding codebase's
//! `Progress` (atomics updated lock-free from rayon threads) and its
//! per-worker-buffer-then-flush hit handling, rather than a mutex-per-hit
//! design.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::digest::{integrity_hash, DigestInputs};
use crate::verify::VerifiedHit;

/// Process-wide atomic counters, safe to `fetch_add` from any worker
/// without contention beyond the atomic instruction itself.
#[derive(Default)]
pub struct Counters {
    pub total_pairs: AtomicU64,
    pub gcd_filtered: AtomicU64,
    pub mod_filtered: AtomicU64,
    pub exact_checks: AtomicU64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a worker's locally-accumulated counts into the shared atomics.
    /// Called once per finished A rather than once per pair (§4.5).
    pub fn add_local(&self, local: &LocalCounters) {
        self.total_pairs.fetch_add(local.tested, Ordering::Relaxed);
        self.gcd_filtered.fetch_add(local.gcd_skip, Ordering::Relaxed);
        self.mod_filtered.fetch_add(local.mod_skip, Ordering::Relaxed);
        self.exact_checks.fetch_add(local.exact, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            total_pairs: self.total_pairs.load(Ordering::Relaxed),
            gcd_filtered: self.gcd_filtered.load(Ordering::Relaxed),
            mod_filtered: self.mod_filtered.load(Ordering::Relaxed),
            exact_checks: self.exact_checks.load(Ordering::Relaxed),
        }
    }
}

/// A consistent-enough read of the four atomics, taken one load at a time
/// (not a cross-atomic transaction — checkpoint skew is acceptable, per §5).
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterSnapshot {
    pub total_pairs: u64,
    pub gcd_filtered: u64,
    pub mod_filtered: u64,
    pub exact_checks: u64,
}

/// Per-worker scratch counters, folded into [`Counters`] once per A.
#[derive(Default)]
pub struct LocalCounters {
    pub tested: u64,
    pub gcd_skip: u64,
    pub mod_skip: u64,
    pub exact: u64,
}

/// The shared hit list, appended under a single `Mutex` (rare: surviving
/// pairs are a vanishing fraction of the space). Per-worker buffers flush
/// here in batches rather than locking on every hit.
pub struct HitList {
    hits: Mutex<Vec<VerifiedHit>>,
}

impl HitList {
    pub fn new() -> Self {
        HitList { hits: Mutex::new(Vec::new()) }
    }

    /// Append a worker's buffered hits under the critical section.
    pub fn extend(&self, batch: &[VerifiedHit]) {
        if batch.is_empty() {
            return;
        }
        self.hits.lock().expect("hit list mutex poisoned").extend_from_slice(batch);
    }

    pub fn into_vec(self) -> Vec<VerifiedHit> {
        self.hits.into_inner().expect("hit list mutex poisoned")
    }
}

impl Default for HitList {
    fn default() -> Self {
        Self::new()
    }
}

/// Finalized search results: the authoritative counters, the full hit list,
/// and derived performance/verification figures.
pub struct SearchResults {
    pub total_pairs: u64,
    pub gcd_filtered: u64,
    pub mod_filtered: u64,
    pub exact_checks: u64,
    pub hits: Vec<VerifiedHit>,
    pub power_hits: u64,
    pub primitive_hits: u64,
    pub runtime_seconds: f64,
    pub workers_used: usize,
}

impl SearchResults {
    /// Assemble final results from the authoritative atomics and hit list,
    /// computing runtime/rate and the derived hit totals.
    pub fn finalize(
        counters: CounterSnapshot,
        hits: Vec<VerifiedHit>,
        started_at: Instant,
        workers_used: usize,
    ) -> Self {
        let power_hits = hits.len() as u64;
        let primitive_hits = hits.iter().filter(|h| h.is_primitive()).count() as u64;
        SearchResults {
            total_pairs: counters.total_pairs,
            gcd_filtered: counters.gcd_filtered,
            mod_filtered: counters.mod_filtered,
            exact_checks: counters.exact_checks,
            hits,
            power_hits,
            primitive_hits,
            runtime_seconds: started_at.elapsed().as_secs_f64(),
            workers_used,
        }
    }

    pub fn rate_pairs_per_sec(&self) -> f64 {
        if self.runtime_seconds > 0.0 {
            self.total_pairs as f64 / self.runtime_seconds
        } else {
            0.0
        }
    }

    pub fn status(&self) -> &'static str {
        if self.primitive_hits == 0 {
            "CLEAR"
        } else {
            "COUNTEREXAMPLE_FOUND"
        }
    }

    pub fn integrity_hash(&self, a_start: u64, a_max: u64, b_start: u64, b_max: u64, c_max: u64, x: u32, y: u32, z: u32) -> String {
        integrity_hash(&DigestInputs {
            x,
            y,
            z,
            a_start,
            a_max,
            b_start,
            b_max,
            c_max,
            total_pairs: self.total_pairs,
            gcd_filtered: self.gcd_filtered,
            mod_filtered: self.mod_filtered,
            exact_checks: self.exact_checks,
            power_hits: self.power_hits,
            primitive_hits: self.primitive_hits,
        })
    }
}
