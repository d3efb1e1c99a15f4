//! # Self-validation harness
//!
//! `--validate` runs the same known-answer assertions the unit test suite
//! runs, but at runtime against the built binary — useful on a machine where
//! nobody trusts that the GMP linkage or the sieve tables behave the same as
//! they did in CI. Mirrors the grounding codebase's own runtime self-check
//! mode for its Miller-Rabin / Montgomery-multiplication primitives.

use crate::arith::{gcd64, get_bit128, powmod, set_bit128};
use crate::filter::{survives, survives_block8};
use crate::primes::SIEVE_PRIMES;
use crate::tables::PrecomputedTables;
use crate::verify::verify_pair;

struct Check {
    name: &'static str,
    pass: bool,
    detail: String,
}

/// Run every known-answer check and print a PASS/FAIL line for each.
/// Returns `true` iff every check passed.
pub fn run() -> bool {
    let checks = vec![
        check_gcd_known_values(),
        check_powmod_known_values(),
        check_bit128_roundtrip(),
        check_sieve_prime_count(),
        check_filter_agrees_with_scalar(),
        check_known_trivial_solution(),
        check_known_non_coprime_solution(),
    ];

    let mut all_ok = true;
    for check in &checks {
        let status = if check.pass { "PASS" } else { "FAIL" };
        println!("[{status}] {} — {}", check.name, check.detail);
        all_ok &= check.pass;
    }
    println!();
    if all_ok {
        println!("validate: all {} checks passed", checks.len());
    } else {
        let failed = checks.iter().filter(|c| !c.pass).count();
        println!("validate: {failed} of {} checks FAILED", checks.len());
    }
    all_ok
}

fn check_gcd_known_values() -> Check {
    let pass = gcd64(12, 18) == 6 && gcd64(17, 5) == 1 && gcd64(0, 9) == 9 && gcd64(9, 9) == 9;
    Check { name: "gcd64 known values", pass, detail: "gcd(12,18)=6, gcd(17,5)=1, gcd(0,9)=9, gcd(9,9)=9".into() }
}

fn check_powmod_known_values() -> Check {
    let pass = powmod(2, 10, 1000) == 24 && powmod(70, 3, 71) == 70;
    Check { name: "powmod known values", pass, detail: "2^10 mod 1000 = 24, 70^3 mod 71 = 70".into() }
}

fn check_bit128_roundtrip() -> Check {
    let mut mask = (0u64, 0u64);
    set_bit128(&mut mask, 5);
    set_bit128(&mut mask, 70);
    let pass = get_bit128(mask, 5) && get_bit128(mask, 70) && !get_bit128(mask, 6);
    Check { name: "128-bit residue mask", pass, detail: "bits 5 and 70 survive a set/get roundtrip".into() }
}

fn check_sieve_prime_count() -> Check {
    let pass = SIEVE_PRIMES.len() == 20 && SIEVE_PRIMES[0] == 2 && *SIEVE_PRIMES.last().unwrap() == 71;
    Check { name: "sieve prime list", pass, detail: "20 primes from 2 to 71".into() }
}

fn check_filter_agrees_with_scalar() -> Check {
    let tables = match PrecomputedTables::build(3, 4, 5, 64, 64) {
        Ok(t) => t,
        Err(e) => return Check { name: "filter/scalar agreement", pass: false, detail: format!("table build failed: {e}") },
    };
    let mut mismatches = 0;
    for a in 1..=64u64 {
        for block_start in (1..=64u64).step_by(8) {
            let scalar_mask: u8 = (0..8)
                .map(|k| {
                    let b = block_start + k;
                    if b > 64 {
                        0
                    } else {
                        (survives(&tables, a, b) as u8) << k
                    }
                })
                .fold(0, |acc, bit| acc | bit);
            let block_mask = survives_block8(&tables, a, block_start);
            if scalar_mask != block_mask {
                mismatches += 1;
            }
        }
    }
    Check {
        name: "filter/scalar agreement",
        pass: mismatches == 0,
        detail: format!("{mismatches} mismatches over a 64x64 sweep"),
    }
}

fn check_known_trivial_solution() -> Check {
    // 1^x + 2^3 = 9 = not a perfect cube/power in general, so instead use a
    // textbook power-hit: 1^7 + 2^3 = 9, not exact. Use the always-true
    // identity 2^3 + 2^3 = 2^4 (C=2, z=4): A=B=2 so gcd=2, a known power hit
    // that is never primitive.
    let hit = verify_pair(2, 2, 3, 3, 4, 10_000);
    let pass = matches!(&hit, Some(h) if h.c == 2 && h.gcd == 2 && !h.is_primitive());
    Check { name: "known power hit (non-primitive)", pass, detail: "2^3 + 2^3 = 2^4, gcd=2".into() }
}

fn check_known_non_coprime_solution() -> Check {
    let hit = verify_pair(6, 9, 3, 3, 3, 100);
    let pass = hit.is_none() || matches!(&hit, Some(h) if !h.is_primitive());
    Check { name: "non-coprime pair never reports primitive", pass, detail: "gcd(6,9)=3".into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_checks_pass() {
        assert!(run());
    }
}
