pub use crate::{
    duration::{Duration, Unit},
    encoding::{decode, decode_full, encode, encode_full},
    errors::{DecodeError, EncodeError},
    geo::LatLon,
    inum::Inum,
    vecmap::VecMap,
    Bytes, HashMap, Tson,
};
pub use chrono::{DateTime, TimeZone, Utc};
pub use std::convert::TryFrom;
