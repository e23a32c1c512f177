//! # Integers
//!
//! The integer type covers any signed magnitude. Values that fit an `i64`
//! are always held inline; construction from a `BigInt` demotes whenever
//! possible, so the `Big` variant never holds an `i64`-sized value.

use crate::{from_fn, from_prims};
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use std::{cmp::Ordering, convert::TryFrom};

/// [`Inum`]s are either [`i64`]s or [`BigInt`]s (i.e., big integers).
#[derive(Eq, PartialEq, Ord, Clone, Hash, Debug)]
pub enum Inum {
    /// Small integer.
    I64(i64),
    /// Large integer, outside the `i64` range.
    Big(BigInt),
}

use Inum::*;

impl std::fmt::Display for Inum {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            I64(i) => write!(f, "{}", i),
            Big(i) => write!(f, "{}", i),
        }
    }
}

impl PartialOrd for Inum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(match (self, other) {
            (Big(a), Big(b)) => a.cmp(b),
            (I64(a), I64(b)) => a.cmp(b),
            (Big(a), I64(b)) => a.cmp(&BigInt::from(*b)),
            (I64(a), Big(b)) => BigInt::from(*a).cmp(b),
        })
    }
}

impl Inum {
    /// Indicates whether the value is negative.
    pub fn is_negative(&self) -> bool {
        match self {
            I64(i) => *i < 0,
            Big(i) => i.sign() == num_bigint::Sign::Minus,
        }
    }

    /// Rebuilds a value from a decoded magnitude and sign.
    pub(crate) fn from_magnitude(negative: bool, mag: BigUint) -> Inum {
        let mut i = BigInt::from(mag);
        if negative {
            i = -i;
        }
        Inum::from(i)
    }
}

// From implementations

// i64 -> Inum
from_fn!(Inum, i64, I64);

// u64 -> Inum
from_fn!(Inum, u64, |u: u64| {
    match i64::try_from(u) {
        Ok(i) => I64(i),
        Err(_) => Big(BigInt::from(u)),
    }
});

// BigInt -> Inum, demoting when the value fits an i64
from_fn!(Inum, BigInt, |i: BigInt| {
    match i.to_i64() {
        Some(j) => I64(j),
        None => Big(i),
    }
});

// Inum -> BigInt
from_fn!(BigInt, Inum, |i: Inum| {
    match i {
        I64(i) => BigInt::from(i),
        Big(i) => i,
    }
});

// i128 -> Inum
from_fn!(Inum, i128, |i: i128| {
    match i64::try_from(i) {
        Ok(j) => I64(j),
        Err(_) => Big(BigInt::from(i)),
    }
});

// u128 -> Inum
from_fn!(Inum, u128, |i: u128| {
    match i64::try_from(i) {
        Ok(j) => I64(j),
        Err(_) => Big(BigInt::from(i)),
    }
});

// usize -> Inum
from_fn!(Inum, usize, |i| { Inum::from(i as u64) });

// isize -> Inum
from_fn!(Inum, isize, |i| { Inum::from(i as i64) });

// TryFrom implementations

impl TryFrom<Inum> for i64 {
    type Error = BigInt;

    fn try_from(i: Inum) -> Result<Self, BigInt> {
        match i {
            I64(i) => Ok(i),
            Big(i) => Err(i),
        }
    }
}

impl TryFrom<Inum> for u64 {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        match &n {
            I64(i) => u64::try_from(*i).map_err(|_| n),
            Big(_) => Err(n),
        }
    }
}

impl TryFrom<Inum> for i128 {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        match &n {
            I64(i) => Ok(*i as i128),
            Big(i) => i.to_i128().ok_or(n),
        }
    }
}

impl TryFrom<Inum> for u128 {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        match &n {
            I64(i) => u128::try_from(*i).map_err(|_| n),
            Big(i) => i.to_u128().ok_or(n),
        }
    }
}

impl TryFrom<Inum> for usize {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        match &n {
            I64(i) => usize::try_from(*i).map_err(|_| n),
            Big(_) => Err(n),
        }
    }
}

impl TryFrom<Inum> for isize {
    type Error = Inum;

    fn try_from(n: Inum) -> Result<Self, Inum> {
        match &n {
            I64(i) => isize::try_from(*i).map_err(|_| n),
            Big(_) => Err(n),
        }
    }
}

from_prims!(Inum);
