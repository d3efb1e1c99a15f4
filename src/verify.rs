//! # Exact verifier
//!
//! The oracle the sieve's candidates are checked against. Computes
//! `S = A^x + B^y` in arbitrary precision (`rug::Integer`, GMP-backed, never
//! floating point), takes the exact integer z-th root and remainder in one
//! call, and reports a hit iff the remainder is zero and the root fits in
//! `[1, C_max]`.
//!
//! This is the one place the engine leaves `u64` for unbounded arithmetic —
//! by the time a pair reaches here, the sieve has already rejected all but
//! a vanishing fraction of the search space (§4.4).

use rug::ops::Pow;
use rug::Integer;

use crate::arith::gcd64;

/// Outcome of verifying one sieve survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedHit {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub gcd: u64,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl VerifiedHit {
    /// A hit is a *primitive* counterexample iff gcd(A, B, C) = 1.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.gcd == 1
    }
}

/// Check whether `A^x + B^y` is an exact z-th power `C^z` with
/// `1 <= C <= c_max`. Returns `None` if not (including when an exact root
/// exists but exceeds `c_max`).
///
/// Never reports a false positive: the returned `C`, if any, satisfies
/// `A^x + B^y == C^z` exactly, verified in arbitrary precision.
pub fn verify_pair(a: u64, b: u64, x: u32, y: u32, z: u32, c_max: u64) -> Option<VerifiedHit> {
    let sum: Integer = Integer::from(a).pow(x) + Integer::from(b).pow(y);
    let (root, remainder) = sum.root_rem(Integer::new(), z);
    if remainder != 0 {
        return None;
    }
    let c = root.to_u64()?;
    if c < 1 || c > c_max {
        return None;
    }
    let gcd = gcd64(a, gcd64(b, c));
    Some(VerifiedHit { a, b, c, gcd, x, y, z })
}
