//! # Durations
//!
//! A duration is a signed amount paired with an explicit unit. Before hitting
//! the wire a duration is canonicalized: the amount is promoted to the
//! coarsest unit that still represents it exactly, so `8000` milliseconds is
//! stored as `8` seconds and `-60` seconds as `-1` minute. Decoding trusts
//! the wire form and preserves whatever unit it carries.

use crate::errors::DecodeError;
use std::fmt;

/// Time units a [`Duration`] can carry.
#[derive(Eq, PartialEq, Copy, Clone, Hash, Debug)]
pub enum Unit {
    /// 3600 seconds.
    Hour,
    /// 60 seconds.
    Minute,
    Second,
    /// 1e-3 seconds.
    Millisecond,
    /// 1e-6 seconds.
    Microsecond,
    /// 1e-9 seconds.
    Nanosecond,
}

use Unit::*;

impl Unit {
    /// The wire code, i.e. the low seven bits of the duration unit byte.
    pub(crate) fn code(self) -> u8 {
        match self {
            Second => 1,
            Minute => 2,
            Millisecond => 3,
            Hour => 4,
            Microsecond => 6,
            Nanosecond => 9,
        }
    }

    /// The unit named by a wire code.
    pub(crate) fn from_code(code: u8) -> Result<Unit, DecodeError> {
        match code {
            1 => Ok(Second),
            2 => Ok(Minute),
            3 => Ok(Millisecond),
            4 => Ok(Hour),
            6 => Ok(Microsecond),
            9 => Ok(Nanosecond),
            unknown => Err(DecodeError::BadDurationUnit(unknown)),
        }
    }

    /// The next coarser unit and the exact conversion divisor, if any.
    fn promote(self) -> Option<(Unit, i64)> {
        match self {
            Nanosecond => Some((Microsecond, 1000)),
            Microsecond => Some((Millisecond, 1000)),
            Millisecond => Some((Second, 1000)),
            Second => Some((Minute, 60)),
            Minute => Some((Hour, 60)),
            Hour => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Hour => "h",
            Minute => "min",
            Second => "s",
            Millisecond => "ms",
            Microsecond => "us",
            Nanosecond => "ns",
        }
    }
}

/// A signed amount of time in an explicit [`Unit`].
#[derive(Eq, PartialEq, Copy, Clone, Hash, Debug)]
pub struct Duration {
    /// Signed magnitude, in units of `unit`.
    pub amount: i64,
    /// The unit `amount` is measured in.
    pub unit: Unit,
}

impl Duration {
    /// Creates a new `Duration`.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::duration::{Duration, Unit};
    ///
    /// let d = Duration::new(500, Unit::Minute);
    /// assert_eq!(d.canonicalize(), d);
    /// ```
    pub fn new(amount: i64, unit: Unit) -> Duration { Duration { amount, unit } }

    /// Promotes to the coarsest unit that still represents the amount
    /// exactly.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::duration::{Duration, Unit};
    ///
    /// let d = Duration::new(-60, Unit::Second);
    /// assert_eq!(d.canonicalize(), Duration::new(-1, Unit::Minute));
    /// ```
    pub fn canonicalize(self) -> Duration {
        let Duration {
            mut amount,
            mut unit,
        } = self;
        while let Some((coarser, divisor)) = unit.promote() {
            if amount % divisor != 0 {
                break;
            }
            amount /= divisor;
            unit = coarser;
        }
        Duration { amount, unit }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}
