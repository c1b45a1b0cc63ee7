//! 64-bit FNV-1a hashing of station names.
//!
//! The accumulator is advanced one byte at a time, so a hash built up during
//! a scan and a hash of the finished slice always agree.

pub const OFFSET_BASIS: u64 = 14695981039346656037;
pub const PRIME: u64 = 1099511628211;

/// Folds one byte into the accumulator.
#[inline(always)]
pub fn step(hash: u64, byte: u8) -> u64 {
    hash.wrapping_mul(PRIME) ^ byte as u64
}

/// Hashes a full byte slice.
#[inline(always)]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash = step(hash, byte);
    }
    hash
}
