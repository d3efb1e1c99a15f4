//! # Sieve filter
//!
//! Given the precomputed tables, decides whether a pair (A, B) *survives*:
//! for every sieve prime p_i, `(A^x + B^y) mod p_i` must lie in the z-th
//! power residue set mod p_i. One prime ruling it out is enough to *kill*
//! the pair — no need to consult the rest (§4.3).
//!
//! Two entry points share the same per-prime reduction:
//! - [`survives`] — one B at a time, short-circuiting on the first killing
//!   prime.
//! - [`survives_block8`] — a block of 8 consecutive B values at fixed A,
//!   returning a survivor bitmask. This is a performance surrogate for
//!   calling [`survives`] eight times; the lane-equivalence property (§8 #3)
//!   is load-bearing and covered below.
//!
//! Soundness: if `A^x + B^y = C^z` holds over the integers, then it holds
//! modulo every prime p_i, so `(A^x + B^y) mod p_i` must equal `C^z mod p_i`
//! for some C — i.e. it must be a member of the residue mask. A pair that
//! fails this for any prime cannot be a solution; the converse is not
//! claimed (the filter is sound but lossy, resolved exactly by `verify`).

use crate::arith::get_bit128;
use crate::primes::NUM_SIEVE_PRIMES;
use crate::tables::PrecomputedTables;

/// `(a + b) mod p` for `a, b < p`, computed without division.
#[inline]
fn add_mod(a: u8, b: u8, p: u64) -> u8 {
    let s = a as u64 + b as u64;
    (if s >= p { s - p } else { s }) as u8
}

/// Decide whether (A, B) survives the sieve for every prime, short-circuiting
/// on the first killing prime.
pub fn survives(tables: &PrecomputedTables, a: u64, b: u64) -> bool {
    let ax_row = tables.ax_row(a);
    for (i, &p) in crate::primes::SIEVE_PRIMES.iter().enumerate() {
        let by = tables.by_row(i)[b as usize];
        let r = add_mod(ax_row[i], by, p);
        if !get_bit128(tables.residue_mask[i], r as u32) {
            return false;
        }
    }
    true
}

/// Decide survival for up to 8 consecutive B values starting at `b_start`,
/// fixed A. Bit `k` of the returned mask is set iff `b_start + k` survives.
/// Lanes with `b_start + k > b_max` are cleared. Exits early once every lane
/// still in range has been killed.
///
/// This must return bit-for-bit the same verdict as calling [`survives`] on
/// each lane individually — that equivalence, not raw throughput, is the
/// acceptance criterion for this routine (§8 #3, §9).
pub fn survives_block8(tables: &PrecomputedTables, a: u64, b_start: u64) -> u8 {
    let ax_row = tables.ax_row(a);
    let mut lane_b = [0u64; 8];
    let mut active = 0u8;
    for k in 0..8u32 {
        let b = b_start + k as u64;
        lane_b[k as usize] = b;
        if b <= tables.b_max {
            active |= 1 << k;
        }
    }
    let mut alive = active;
    if alive == 0 {
        return 0;
    }

    for (i, &p) in crate::primes::SIEVE_PRIMES.iter().enumerate() {
        let by_row = tables.by_row(i);
        let ax = ax_row[i];
        let mask = tables.residue_mask[i];
        for k in 0..8u32 {
            let bit = 1u8 << k;
            if alive & bit == 0 {
                continue;
            }
            let by = by_row[lane_b[k as usize] as usize];
            let r = add_mod(ax, by, p);
            if !get_bit128(mask, r as u32) {
                alive &= !bit;
            }
        }
        if alive == 0 {
            break;
        }
    }
    alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::PrecomputedTables;

    #[test]
    fn gcd_one_known_solution_survives_sieve() {
        // 2^6 + 2^6 = 128 = 2^7 (a known, non-primitive power hit).
        let t = PrecomputedTables::build(6, 6, 7, 2, 2).unwrap();
        assert!(survives(&t, 2, 2));
    }

    #[test]
    fn non_cube_sum_may_or_may_not_survive_but_verifier_resolves_it() {
        // 2^3 + 3^3 = 35; the sieve is lossy, so this only asserts it runs.
        let t = PrecomputedTables::build(3, 3, 3, 2, 3).unwrap();
        let _ = survives(&t, 2, 3);
    }

    #[test]
    fn scalar_and_block8_agree_over_a_dense_sweep() {
        let (x, y, z) = (3u32, 4u32, 5u32);
        let a_max = 40u64;
        let b_max = 40u64;
        let t = PrecomputedTables::build(x, y, z, a_max, b_max).unwrap();
        for a in 0..=a_max {
            let mut b = 0u64;
            while b <= b_max {
                let mask = survives_block8(&t, a, b);
                for k in 0..8u64 {
                    let bk = b + k;
                    let scalar = bk <= b_max && survives(&t, a, bk);
                    let vector = bk <= b_max && (mask & (1 << k)) != 0;
                    assert_eq!(
                        scalar, vector,
                        "lane mismatch at A={} B={} (block start {})",
                        a, bk, b
                    );
                }
                b += 8;
            }
        }
    }

    #[test]
    fn block8_clears_lanes_beyond_b_max() {
        let t = PrecomputedTables::build(3, 4, 5, 5, 3).unwrap();
        let mask = survives_block8(&t, 2, 0);
        // Only lanes for B=0..3 are in range; B=4..7 must be forced dead.
        assert_eq!(mask & 0b1111_0000, 0);
    }

    #[test]
    fn block8_alignment_independence() {
        // Lane equivalence must hold at every block alignment, not just
        // multiples of 8.
        let t = PrecomputedTables::build(3, 4, 5, 30, 30).unwrap();
        for a in [1u64, 5, 17] {
            for b_start in 0u64..=22 {
                let mask = survives_block8(&t, a, b_start);
                for k in 0..8u64 {
                    let bk = b_start + k;
                    if bk > 30 {
                        assert_eq!(mask & (1 << k), 0);
                        continue;
                    }
                    let scalar = survives(&t, a, bk);
                    let vector = (mask & (1 << k)) != 0;
                    assert_eq!(scalar, vector, "A={} bk={}", a, bk);
                }
            }
        }
    }

    #[test]
    fn all_lanes_in_range_counted() {
        assert_eq!(NUM_SIEVE_PRIMES, 20);
    }
}
