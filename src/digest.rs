//! # Integrity digest
//!
//! A 64-bit FNV-1a hash over the search's inputs and result counters, in the
//! exact field order the interface contract fixes (§6). Two runs with
//! identical params and identical result counters must produce identical
//! digests regardless of thread count or machine — this is the
//! cross-run-comparability mechanism, so the order below is not
//! refactorable without breaking every previously recorded digest.

const FNV_OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

fn fnv1a_absorb(mut hash: u64, value: u64) -> u64 {
    for byte in value.to_be_bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Fields absorbed into the integrity digest, in contract order.
pub struct DigestInputs {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub a_start: u64,
    pub a_max: u64,
    pub b_start: u64,
    pub b_max: u64,
    pub c_max: u64,
    pub total_pairs: u64,
    pub gcd_filtered: u64,
    pub mod_filtered: u64,
    pub exact_checks: u64,
    pub power_hits: u64,
    pub primitive_hits: u64,
}

/// Compute the 64-bit FNV-1a integrity digest, rendered as 16 lowercase hex
/// digits, matching the COMPLETE record's `integrity_hash` field.
pub fn integrity_hash(inputs: &DigestInputs) -> String {
    let fields: [u64; 14] = [
        inputs.x as u64,
        inputs.y as u64,
        inputs.z as u64,
        inputs.a_start,
        inputs.a_max,
        inputs.b_start,
        inputs.b_max,
        inputs.c_max,
        inputs.total_pairs,
        inputs.gcd_filtered,
        inputs.mod_filtered,
        inputs.exact_checks,
        inputs.power_hits,
        inputs.primitive_hits,
    ];
    let mut hash = FNV_OFFSET_BASIS;
    for field in fields {
        hash = fnv1a_absorb(hash, field);
    }
    format!("{:016x}", hash)
}
