//! # TSON
//!
//! TSON ("Tiny Serialized Object Notation") is a compact binary interchange
//! format for JSON-shaped data with a richer type set: booleans, null,
//! integers of arbitrary magnitude, floats, UTF-8 strings, raw byte blobs,
//! arrays, keyed documents, timestamps, durations with units, and geographic
//! coordinates.
//!
//! The encoding is biased toward smallness. Small common values get one-byte
//! opcodes, magnitudes are varuints, and repeated strings and document keys
//! are deduplicated through back-references scoped to a single encoded value.
//!
//! ```
//! use tson::prelude::*;
//!
//! let value = Tson::from(vec!["compact", "compact", "compact"]);
//!
//! let bytes = encode_full(&value).unwrap();
//!
//! // the second and third occurrences are two-byte back-references
//! assert_eq!(decode_full(&bytes).unwrap(), value);
//! ```

/// Durations with units.
pub mod duration;
/// TSON binary encoder and decoder.
pub mod encoding;
/// Encode and decode errors.
pub mod errors;
/// Geographic coordinates.
pub mod geo;
/// Integer variants.
pub mod inum;
/// Prelude
pub mod prelude;
pub(crate) mod time;
/// Helper macros.
pub mod util;
/// Variable-length unsigned integers.
pub mod varuint;
/// A map wrapper around a sorted vector of pairs.
pub mod vecmap;

pub use bytes::Bytes;
pub use hashbrown::HashMap;

use chrono::{DateTime, Utc};
use duration::Duration;
use geo::LatLon;
use inum::Inum;
use num_bigint::BigInt;
use std::convert::{TryFrom, TryInto};
use vecmap::VecMap;

#[derive(PartialEq, Clone, Debug)]
/// TSON values.
pub enum Tson {
    /// Null type. Equivalent to `None`.
    Null,
    /// Boolean type.
    Bool(bool),
    /// Integer type, any magnitude.
    Int(Inum),
    /// Double-precision float type.
    Float(f64),
    /// Bytestring type.
    Byt(Bytes),
    /// UTF-8 string type.
    Str(String),
    /// Array type.
    Array(Vec<Tson>),
    /// Document type; entries are kept sorted ascending by key.
    Doc(VecMap<String, Tson>),
    /// Instant type, millisecond precision.
    Time(DateTime<Utc>),
    /// Duration type.
    Dur(Duration),
    /// Coordinate type.
    Geo(LatLon),
}

use Tson::*;

impl Tson {
    /// Converts a `Tson` value to a vector of `Tson`.
    /// This will return `None` if the value is not a `Tson` array.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::Tson;
    ///
    /// let ks = Tson::from(vec![1, 2, 3]);
    ///
    /// let elems = ks.to_vec().unwrap();
    /// assert_eq!(elems.len(), 3);
    /// ```
    pub fn to_vec(&self) -> Option<&Vec<Tson>> {
        match self {
            Array(a) => Some(a),
            _ => None,
        }
    }

    /// Consumes a `Tson` value, converting it into a vector of `Tson`.
    /// This will return `None` if the value is not a `Tson` array.
    pub fn into_vec(self) -> Option<Vec<Tson>> { self.try_into().ok() }

    /// Converts a `Tson` value to a `VecMap`.
    /// This will return `None` if the value is not a `Tson` document.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::{vecmap::VecMap, Tson};
    ///
    /// let doc = Tson::from(VecMap::from(vec![("pi".to_string(), Tson::from(3))]));
    ///
    /// let entries = doc.to_vecmap().unwrap();
    /// assert_eq!(entries.len(), 1);
    /// ```
    pub fn to_vecmap(&self) -> Option<&VecMap<String, Tson>> {
        match self {
            Doc(dmap) => Some(dmap),
            _ => None,
        }
    }

    /// Consumes a `Tson` value, converting it into a `VecMap`.
    /// This will return `None` if the value is not a `Tson` document.
    pub fn into_vecmap(self) -> Option<VecMap<String, Tson>> { self.try_into().ok() }

    /// Consumes a `Tson` value, converting it into a `HashMap`.
    /// This will return `None` if the value is not a `Tson` document.
    pub fn into_map(self) -> Option<HashMap<String, Tson>> {
        Some(self.into_vecmap()?.into_hashmap())
    }

    /// Indicates whether a value is `Null`.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::Tson::Null;
    ///
    /// assert!(Null.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Tries to convert value to a `bool`.
    /// This will return `None` if the value is not a `Tson` bool.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Tries to convert value to an [`Inum`].
    /// This will return `None` if the value is not a `Tson` integer.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::Tson;
    ///
    /// let num = Tson::from(1);
    ///
    /// assert!(num.to_inum().is_some());
    /// ```
    pub fn to_inum(&self) -> Option<&Inum> {
        match self {
            Int(i) => Some(i),
            _ => None,
        }
    }

    /// Tries to convert value to an `f64`.
    /// This will return `None` if the value is not a `Tson` float.
    pub fn to_float(&self) -> Option<f64> {
        match self {
            Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Tries to convert value to a `&str`.
    /// This will return `None` if the value is not a `Tson` string.
    pub fn to_str(&self) -> Option<&str> {
        match self {
            Str(s) => Some(s),
            _ => None,
        }
    }

    /// Tries to convert value to `Bytes`.
    /// This will return `None` if the value is not a `Tson` bytestring.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::{Bytes, Tson};
    ///
    /// let blob = Tson::from_static(b"this is an example");
    ///
    /// let bytes = blob.to_bytes().unwrap();
    /// ```
    pub fn to_bytes(&self) -> Option<&Bytes> {
        match self {
            Byt(b) => Some(b),
            _ => None,
        }
    }

    /// Tries to convert value to an instant.
    /// This will return `None` if the value is not a `Tson` timestamp.
    pub fn to_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            Time(t) => Some(t),
            _ => None,
        }
    }

    /// Tries to convert value to a [`Duration`].
    /// This will return `None` if the value is not a `Tson` duration.
    pub fn to_duration(&self) -> Option<Duration> {
        match self {
            Dur(d) => Some(*d),
            _ => None,
        }
    }

    /// Tries to convert value to a [`LatLon`].
    /// This will return `None` if the value is not a `Tson` coordinate.
    pub fn to_latlon(&self) -> Option<LatLon> {
        match self {
            Geo(g) => Some(*g),
            _ => None,
        }
    }

    /// Converts a bytestring literal to `Tson`.
    ///
    /// # Example
    ///
    /// ```
    /// use tson::Tson;
    ///
    /// let blob = Tson::from_static(b"raw bytes");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Tson { Byt(Bytes::from_static(bytes)) }
}

impl<T: Into<Tson>> From<Vec<T>> for Tson {
    fn from(v: Vec<T>) -> Tson { Array(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Tson>> From<VecMap<String, T>> for Tson {
    fn from(v: VecMap<String, T>) -> Tson {
        Doc(v.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<&str> for Tson {
    fn from(s: &str) -> Tson { Str(s.to_string()) }
}

impl From<f32> for Tson {
    fn from(f: f32) -> Tson { Float(f64::from(f)) }
}

macro_rules! try_from_ctor {
    ($from:ty, $to:ty, $ctor:tt) => {
        impl TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(from: $from) -> Result<$to, $from> {
                match from {
                    $ctor(a) => Ok(a),
                    f => Err(f),
                }
            }
        }
    };
}

from_fn!(Tson, bool, Bool);
try_from_ctor!(Tson, bool, Bool);
from_fn!(Tson, Inum, Int);
try_from_ctor!(Tson, Inum, Int);
from_fn!(Tson, f64, Float);
try_from_ctor!(Tson, f64, Float);
from_fn!(Tson, Bytes, Byt);
try_from_ctor!(Tson, Bytes, Byt);
from_fn!(Tson, String, Str);
try_from_ctor!(Tson, String, Str);
from_fn!(Tson, DateTime<Utc>, Time);
try_from_ctor!(Tson, DateTime<Utc>, Time);
from_fn!(Tson, Duration, Dur);
try_from_ctor!(Tson, Duration, Dur);
from_fn!(Tson, LatLon, Geo);
try_from_ctor!(Tson, LatLon, Geo);

try_from_ctor!(Tson, Vec<Tson>, Array);
try_from_ctor!(Tson, VecMap<String, Tson>, Doc);

compose_from!(Tson, Inum, BigInt);
compose_from!(Tson, Inum, i64);
compose_from!(Tson, Inum, u64);
compose_from!(Tson, Inum, i128);
compose_from!(Tson, Inum, u128);
compose_from!(Tson, Inum, usize);
compose_from!(Tson, Inum, isize);

from_prims!(Tson);
