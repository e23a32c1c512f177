//! Encode and decode failure modes.

use std::string::FromUtf8Error;
use thiserror::Error;

/// Errors produced while encoding a [`Tson`](crate::Tson) value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// Only finite floats have a wire representation.
    #[error("cannot encode non-finite float {0}")]
    NonFinite(f64),
}

/// Errors produced while decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// Input ended before a required byte or sequence was read.
    #[error("input ended early: needed {needed} more byte(s), {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    /// Leading byte is not an assigned opcode.
    #[error("unknown opcode {0:#04x}")]
    InvalidOpcode(u8),

    /// Leading byte falls in one of the reserved opcode ranges.
    #[error("reserved opcode {0:#04x}")]
    ReservedOpcode(u8),

    /// The low seven bits of a duration unit byte name no unit.
    #[error("unknown duration unit code {0:#04x}")]
    BadDurationUnit(u8),

    /// A string or key back-reference points past the current table.
    #[error("back-reference {index} out of range, table holds {limit}")]
    BadBackref { index: u64, limit: usize },

    /// A string or document key is not valid UTF-8.
    #[error("invalid utf-8 in string: {0}")]
    BadUtf8(#[from] FromUtf8Error),

    /// A varuint is too large for the slot it fills.
    #[error("integer out of range: {0}")]
    IntRange(&'static str),
}
