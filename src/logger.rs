//! # JSONL logger
//!
//! The one *contractual* output surface (§6): one JSON object per line,
//! UTF-8, written to the path `--log` names (or an auto-generated default).
//! Everything else the engine wants to say — startup banners, table-build
//! timing, I/O warnings — goes through `tracing` instead, the way the
//! grounding codebase keeps its structured event log separate from its
//! ad-hoc `eprintln!`/`tracing` diagnostics.
//!
//! Each record is written with its own open/append/close (§5: logging is
//! infrequent enough — one START, one COMPLETE, throttled CHECKPOINTs, and
//! rare hits — that this never becomes the bottleneck), so a crash between
//! writes never corrupts an earlier line. A write failure is swallowed
//! per-record per §7 (logging must never block or abort the search) but is
//! still surfaced once via `tracing::warn!`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::primes::SIEVE_PRIMES;
use crate::results::SearchResults;
use crate::system::SystemInfo;
use crate::verify::VerifiedHit;

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Build the default log path `search_<x>_<y>_<z>_<epoch>.jsonl`.
pub fn default_log_path(x: u32, y: u32, z: u32) -> PathBuf {
    let epoch = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    PathBuf::from(format!("search_{}_{}_{}_{}.jsonl", x, y, z, epoch))
}

/// Derive a run id from the signature and the wall-clock start time. Not a
/// contractual format — only required to be a stable opaque string that
/// ties every record in one run together.
pub fn new_run_id(x: u32, y: u32, z: u32) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{x}-{y}-{z}-{nanos:x}")
}

#[derive(Serialize)]
pub struct StartRecord {
    pub ts: String,
    pub event: &'static str,
    pub run_id: String,
    pub mode: &'static str,
    pub signature: [u32; 3],
    #[serde(rename = "Astart")]
    pub a_start: u64,
    #[serde(rename = "Amax")]
    pub a_max: u64,
    #[serde(rename = "Bstart")]
    pub b_start: u64,
    #[serde(rename = "Bmax")]
    pub b_max: u64,
    #[serde(rename = "Cmax")]
    pub c_max: u64,
    pub expected_pairs: u64,
    pub system: SystemInfo,
    pub sieve_primes: [u64; 20],
}

impl StartRecord {
    pub fn new(run_id: String, x: u32, y: u32, z: u32, a_start: u64, a_max: u64, b_start: u64, b_max: u64, c_max: u64) -> Self {
        let expected_pairs = (a_max - a_start + 1).saturating_mul(b_max - b_start + 1);
        StartRecord {
            ts: now_iso8601(),
            event: "START",
            run_id,
            mode: "search",
            signature: [x, y, z],
            a_start,
            a_max,
            b_start,
            b_max,
            c_max,
            expected_pairs,
            system: SystemInfo::probe(),
            sieve_primes: SIEVE_PRIMES,
        }
    }
}

#[derive(Serialize)]
pub struct CheckpointRecord {
    pub ts: String,
    pub event: &'static str,
    pub run_id: String,
    pub pairs_completed: u64,
    pub pairs_expected: u64,
    pub percent_complete: f64,
    pub gcd_skips: u64,
    pub mod_skips: u64,
    pub exact_checks: u64,
    pub elapsed_seconds: f64,
    pub rate_pairs_per_sec: f64,
    pub chunks_done: u64,
    pub chunks_total: u64,
}

#[allow(clippy::too_many_arguments)]
impl CheckpointRecord {
    pub fn new(
        run_id: String,
        pairs_completed: u64,
        pairs_expected: u64,
        gcd_skips: u64,
        mod_skips: u64,
        exact_checks: u64,
        elapsed_seconds: f64,
        chunks_done: u64,
        chunks_total: u64,
    ) -> Self {
        let percent_complete = if pairs_expected > 0 {
            pairs_completed as f64 / pairs_expected as f64 * 100.0
        } else {
            100.0
        };
        let rate_pairs_per_sec = if elapsed_seconds > 0.0 {
            pairs_completed as f64 / elapsed_seconds
        } else {
            0.0
        };
        CheckpointRecord {
            ts: now_iso8601(),
            event: "CHECKPOINT",
            run_id,
            pairs_completed,
            pairs_expected,
            percent_complete,
            gcd_skips,
            mod_skips,
            exact_checks,
            elapsed_seconds,
            rate_pairs_per_sec,
            chunks_done,
            chunks_total,
        }
    }
}

#[derive(Serialize)]
pub struct PowerHitRecord {
    pub ts: String,
    pub event: &'static str,
    #[serde(rename = "A")]
    pub a: u64,
    #[serde(rename = "B")]
    pub b: u64,
    #[serde(rename = "C")]
    pub c: u64,
    pub gcd: u64,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl From<VerifiedHit> for PowerHitRecord {
    fn from(hit: VerifiedHit) -> Self {
        PowerHitRecord {
            ts: now_iso8601(),
            event: "POWER_HIT",
            a: hit.a,
            b: hit.b,
            c: hit.c,
            gcd: hit.gcd,
            x: hit.x,
            y: hit.y,
            z: hit.z,
        }
    }
}

#[derive(Serialize)]
pub struct SearchBounds {
    #[serde(rename = "A")]
    pub a: [u64; 2],
    #[serde(rename = "B")]
    pub b: [u64; 2],
    #[serde(rename = "C")]
    pub c: u64,
}

#[derive(Serialize)]
pub struct ResultsBlock {
    pub total_pairs: u64,
    pub gcd_filtered: u64,
    pub mod_filtered: u64,
    pub exact_checks: u64,
    pub power_hits: u64,
    pub primitive_counterexamples: u64,
}

#[derive(Serialize)]
pub struct PerformanceBlock {
    pub runtime_seconds: f64,
    pub avg_rate_pairs_per_sec: f64,
    pub workers_used: usize,
}

#[derive(Serialize)]
pub struct VerificationBlock {
    pub status: &'static str,
    pub integrity_hash: String,
}

#[derive(Serialize)]
pub struct CompleteRecord {
    pub ts: String,
    pub event: &'static str,
    pub run_id: String,
    pub signature: [u32; 3],
    pub search_bounds: SearchBounds,
    pub results: ResultsBlock,
    pub performance: PerformanceBlock,
    pub verification: VerificationBlock,
}

#[allow(clippy::too_many_arguments)]
impl CompleteRecord {
    pub fn new(run_id: String, x: u32, y: u32, z: u32, a_start: u64, a_max: u64, b_start: u64, b_max: u64, c_max: u64, results: &SearchResults) -> Self {
        let status = results.status();
        let hash = results.integrity_hash(a_start, a_max, b_start, b_max, c_max, x, y, z);
        CompleteRecord {
            ts: now_iso8601(),
            event: "COMPLETE",
            run_id,
            signature: [x, y, z],
            search_bounds: SearchBounds { a: [a_start, a_max], b: [b_start, b_max], c: c_max },
            results: ResultsBlock {
                total_pairs: results.total_pairs,
                gcd_filtered: results.gcd_filtered,
                mod_filtered: results.mod_filtered,
                exact_checks: results.exact_checks,
                power_hits: results.power_hits,
                primitive_counterexamples: results.primitive_hits,
            },
            performance: PerformanceBlock {
                runtime_seconds: results.runtime_seconds,
                avg_rate_pairs_per_sec: results.rate_pairs_per_sec(),
                workers_used: results.workers_used,
            },
            verification: VerificationBlock { status, integrity_hash: hash },
        }
    }
}

/// Append-only JSONL sink. Every [`JsonlSink::emit`] call opens, writes one
/// line, and closes — see the module doc for why that's acceptable here.
pub struct JsonlSink {
    path: PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonlSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize and append one record. Returns `false` (without panicking
    /// or propagating an error) on any I/O or serialization failure —
    /// logging must never block or abort the search (§7).
    pub fn emit<T: Serialize>(&self, record: &T) -> bool {
        let line = match serde_json::to_string(record) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize log record");
                return false;
            }
        };
        match OpenOptions::new().create(true).append(true).open(&self.path) {
            Ok(mut f) => match writeln!(f, "{line}") {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, path = %self.path.display(), "failed to append log record");
                    false
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "failed to open log file");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;
    use tempfile::NamedTempFile;

    #[test]
    fn start_record_serializes_expected_shape() {
        let rec = StartRecord::new(new_run_id(3, 4, 5), 3, 4, 5, 1, 100, 1, 100, 10_000_000);
        let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["event"], "START");
        assert_eq!(v["Astart"], 1);
        assert_eq!(v["Amax"], 100);
        assert_eq!(v["sieve_primes"].as_array().unwrap().len(), 20);
        assert_eq!(v["expected_pairs"], 10_000);
    }

    #[test]
    fn power_hit_record_uses_uppercase_coordinate_keys() {
        let hit = VerifiedHit { a: 2, b: 2, c: 2, gcd: 2, x: 6, y: 6, z: 7 };
        let rec: PowerHitRecord = hit.into();
        let v: serde_json::Value = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["A"], 2);
        assert_eq!(v["B"], 2);
        assert_eq!(v["C"], 2);
        assert_eq!(v["event"], "POWER_HIT");
    }

    #[test]
    fn sink_appends_one_json_object_per_line() {
        let file = NamedTempFile::new().unwrap();
        let sink = JsonlSink::new(file.path());
        let rec = StartRecord::new(new_run_id(3, 4, 5), 3, 4, 5, 1, 10, 1, 10, 100);
        assert!(sink.emit(&rec));
        assert!(sink.emit(&rec));

        let reader = std::io::BufReader::new(std::fs::File::open(file.path()).unwrap());
        let lines: Vec<_> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let v: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert_eq!(v["event"], "START");
        }
    }

    #[test]
    fn sink_failure_to_open_returns_false_without_panicking() {
        let sink = JsonlSink::new("/nonexistent-directory-xyz/should-not-exist.jsonl");
        let rec = StartRecord::new(new_run_id(1, 1, 1), 3, 3, 3, 1, 1, 1, 1, 1);
        assert!(!sink.emit(&rec));
    }
}
