//! # Variable-length unsigned integers
//!
//! Magnitudes are stored as base-128 little-endian digit groups: the low
//! seven bits of every byte carry the next digit, and the high bit is set on
//! every byte except the last. `0` encodes as `[0x00]`, `200` as
//! `[0xC8, 0x01]`, `123456` as `[0xC0, 0xC4, 0x07]`.
//!
//! Encoding always emits the minimal form. Decoding tolerates redundant
//! leading groups, so `[0x80, 0x00]` reads back as `0`.

use crate::errors::DecodeError;
use bytes::Buf;
use num_bigint::BigUint;
use smallvec::SmallVec;

/// Continuation flag: more digit groups follow.
const CONT_BIT: u8 = 0x80;
/// The seven payload bits of a digit group.
const DIGIT_MASK: u8 = 0x7F;

/// Appends the minimal varuint form of `n` to `out`.
pub fn write(out: &mut Vec<u8>, mut n: u64) {
    while n > DIGIT_MASK as u64 {
        out.push((n & DIGIT_MASK as u64) as u8 | CONT_BIT);
        n >>= 7;
    }
    out.push(n as u8);
}

/// Appends the minimal varuint form of an arbitrary-magnitude `n` to `out`.
pub fn write_big(out: &mut Vec<u8>, n: &BigUint) {
    let mut digs = n.to_radix_le(128);
    let last = digs.len() - 1;
    for dig in &mut digs[..last] {
        *dig |= CONT_BIT;
    }
    out.extend_from_slice(&digs);
}

/// Reads one varuint of arbitrary magnitude from `data`.
pub fn read<B: Buf>(data: &mut B) -> Result<BigUint, DecodeError> {
    let mut digs: SmallVec<[u8; 16]> = SmallVec::new();
    loop {
        if !data.has_remaining() {
            return Err(DecodeError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = data.get_u8();
        digs.push(byte & DIGIT_MASK);
        if byte & CONT_BIT == 0 {
            // digits are 7-bit by construction, so the radix is never exceeded
            return Ok(BigUint::from_radix_le(&digs, 128).unwrap_or_default());
        }
    }
}

/// Reads one varuint that must fit a `u64`.
pub fn read_u64<B: Buf>(data: &mut B) -> Result<u64, DecodeError> {
    let mut acc: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        if !data.has_remaining() {
            return Err(DecodeError::Truncated {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = data.get_u8();
        let dig = (byte & DIGIT_MASK) as u64;
        if dig != 0 {
            if shift >= 64 || (dig << shift) >> shift != dig {
                return Err(DecodeError::IntRange("varuint exceeds u64"));
            }
            acc |= dig << shift;
        }
        if byte & CONT_BIT == 0 {
            return Ok(acc);
        }
        shift = shift.saturating_add(7);
    }
}
