//! # TSON binary encoder and decoder
//!
//! A message is exactly one encoded value: no header, no magic number, no
//! version byte. Encoding and decoding are pure, stack-recursive walks; each
//! call owns two back-reference tables (strings, document keys) that live
//! for that call only, so repeated strings and keys shrink to short indices
//! anywhere inside one value.
//!
//! # Example
//!
//! ```
//! use tson::prelude::*;
//!
//! let value = Tson::from(vec![Tson::from(200), Tson::from("hi")]);
//!
//! // encode into a fresh buffer
//! let bytes = encode_full(&value).unwrap();
//!
//! // or append to one you already have
//! let out = &mut Vec::new();
//! encode(&value, out).unwrap();
//! assert_eq!(*out, bytes);
//!
//! // decoding returns a `Result`
//! let back = decode_full(&bytes).unwrap();
//! assert_eq!(back, value);
//! ```

use crate::{
    errors::{DecodeError, EncodeError},
    Bytes,
    Tson::{self, *},
};
use bytes::Buf;

mod constants;
pub(crate) use constants::*;
mod de;
mod ser;

use de::Decoder;
use ser::Encoder;

/// Encodes a [`Tson`] value, appending the bytes to `out`.
///
/// Fails only on values with no wire representation (non-finite floats).
///
/// # Arguments
///
/// * `t: &Tson` - A reference to the value to be encoded.
/// * `out: &mut Vec<u8>` - The buffer encoder output is appended to.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let out = &mut Vec::new();
///
/// encode(&Tson::Null, out).unwrap();
///
/// assert_eq!(*out, vec![0x07]);
/// ```
pub fn encode(t: &Tson, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    Encoder::new(out).put_tson(t)
}

/// Encodes a [`Tson`] value into a fresh vector of bytes.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let enc: Vec<u8> = encode_full(&Tson::from(27)).unwrap();
///
/// assert_eq!(enc, vec![0x5B]);
/// ```
pub fn encode_full(t: &Tson) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode(t, &mut out)?;
    Ok(out)
}

/// Decodes one [`Tson`] value from a buffer, advancing it past the value.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let enc = encode_full(&Tson::Null).unwrap();
///
/// let mut buf: &[u8] = &enc;
/// assert_eq!(decode(&mut buf), Ok(Tson::Null));
/// ```
pub fn decode<B: Buf>(data: &mut B) -> Result<Tson, DecodeError> {
    Decoder::new(data).read_tson()
}

/// Decodes a byte slice into one [`Tson`] value. Trailing bytes are ignored.
///
/// # Example
///
/// ```
/// use tson::prelude::*;
///
/// let enc = encode_full(&Tson::from(true)).unwrap();
///
/// assert_eq!(decode_full(&enc), Ok(Tson::from(true)));
/// ```
pub fn decode_full<B: AsRef<[u8]>>(bs: B) -> Result<Tson, DecodeError> {
    decode(&mut bs.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        duration::{Duration, Unit},
        geo::LatLon,
        inum::Inum,
        vecmap::VecMap,
    };
    use chrono::{TimeZone, Utc};
    use num_bigint::BigInt;

    fn enc(t: &Tson) -> Vec<u8> { encode_full(t).expect("encoding failed") }

    fn roundtrips(t: &Tson) {
        assert_eq!(decode_full(enc(t)).expect("decoding failed"), *t);
    }

    fn doc(entries: Vec<(&str, Tson)>) -> Tson {
        Doc(entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<VecMap<String, Tson>>())
    }

    #[test]
    fn constants() {
        assert_eq!(enc(&Null), vec![0x07]);
        assert_eq!(enc(&Bool(true)), vec![0x05]);
        assert_eq!(enc(&Bool(false)), vec![0x06]);
    }

    #[test]
    fn small_ints() {
        assert_eq!(enc(&Tson::from(0)), vec![0x40]);
        assert_eq!(enc(&Tson::from(27)), vec![0x5B]);
        assert_eq!(enc(&Tson::from(63)), vec![0x7F]);
        // one past the small range needs a varuint
        assert_eq!(enc(&Tson::from(64)), vec![0x3A, 0x40]);
    }

    #[test]
    fn varuint_ints() {
        assert_eq!(enc(&Tson::from(200)), vec![0x3A, 0xC8, 0x01]);
        assert_eq!(enc(&Tson::from(-2000)), vec![0x3B, 0xD0, 0x0F]);
        assert_eq!(enc(&Tson::from(-1)), vec![0x3B, 0x01]);
        roundtrips(&Tson::from(i64::MIN));
        roundtrips(&Tson::from(u64::MAX));
    }

    #[test]
    fn big_ints() {
        let big: BigInt = BigInt::from(u64::MAX) * 16 + 7;
        roundtrips(&Tson::from(big.clone()));
        roundtrips(&Tson::from(-big));
    }

    #[test]
    fn strings() {
        assert_eq!(enc(&Tson::from("")), vec![0x0E, 0x00]);

        let mut expected = vec![0x27];
        expected.extend_from_slice(&[b'Z'; 24]);
        assert_eq!(enc(&Tson::from("Z".repeat(24))), expected);

        let mut expected = vec![0x0E];
        expected.extend_from_slice(&[b'y'; 25]);
        expected.push(0x00);
        assert_eq!(enc(&Tson::from("y".repeat(25))), expected);

        roundtrips(&Tson::from("snowman \u{2603}"));
    }

    #[test]
    fn bytestrings() {
        let blob = Tson::from_static(&[0x0B, 0x16, 0x21, 0x2C, 0x37, 0x42, 0x4D]);
        assert_eq!(
            enc(&blob),
            vec![0x03, 0x07, 0x0B, 0x16, 0x21, 0x2C, 0x37, 0x42, 0x4D]
        );
        roundtrips(&blob);
        roundtrips(&Tson::from_static(b""));
    }

    #[test]
    fn small_array() {
        let arr = Tson::from(vec![true, false, false, true]);
        assert_eq!(enc(&arr), vec![0x2F, 0x05, 0x06, 0x06, 0x05]);
        roundtrips(&arr);
    }

    #[test]
    fn terminated_array() {
        let arr = Tson::from(vec![0, 2, 0, 63, 200]);
        assert_eq!(
            enc(&arr),
            vec![0x02, 0x40, 0x42, 0x40, 0x7F, 0x3A, 0xC8, 0x01, 0x00]
        );
        roundtrips(&arr);
        roundtrips(&Tson::Array(vec![]));
    }

    #[test]
    fn latlon() {
        let spot = Tson::from(LatLon::new(46.083_529, -118.283_026));
        assert_eq!(
            enc(&spot),
            vec![0x09, 0xA8, 0xD4, 0xE4, 0x89, 0xFA, 0xC5, 0x58]
        );

        let back = decode_full(enc(&spot)).unwrap().to_latlon().unwrap();
        assert!((back.lat - 46.083_529).abs() < 1e-5);
        assert!((back.lon + 118.283_026).abs() < 1e-5);
    }

    #[test]
    fn timestamps() {
        let t = Utc.with_ymd_and_hms(2016, 9, 19, 7, 0, 0).unwrap();
        assert_eq!(
            enc(&Tson::from(t)),
            vec![0x04, 0x80, 0xDB, 0x8A, 0xB6, 0x54]
        );
        roundtrips(&Tson::from(t));

        // pre-epoch instants take the negative opcode
        let old = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(enc(&Tson::from(old))[0], 0x08);
        roundtrips(&Tson::from(old));
    }

    #[test]
    fn durations() {
        assert_eq!(
            enc(&Tson::from(Duration::new(500, Unit::Minute))),
            vec![0x37, 0x02, 0xF4, 0x03]
        );
        assert_eq!(
            enc(&Tson::from(Duration::new(-60, Unit::Second))),
            vec![0x37, 0x82, 0x01]
        );
        assert_eq!(
            enc(&Tson::from(Duration::new(8000, Unit::Millisecond))),
            vec![0x37, 0x01, 0x08]
        );
        roundtrips(&Tson::from(Duration::new(500, Unit::Minute)));
        roundtrips(&Tson::from(Duration::new(i64::MIN, Unit::Nanosecond).canonicalize()));
    }

    #[test]
    fn floats() {
        assert_eq!(enc(&Tson::from(0.25)), vec![0x3C, 0x00, 0x00, 0x80, 0x3E]);
        roundtrips(&Tson::from(0.25));

        // a double that does not survive narrowing keeps all eight bytes
        let x = 0.1f64;
        assert_eq!(enc(&Tson::from(x))[0], 0x3D);
        roundtrips(&Tson::from(x));
    }

    #[test]
    fn integral_floats_collapse() {
        assert_eq!(enc(&Tson::from(200.0)), vec![0x3A, 0xC8, 0x01]);
        assert_eq!(enc(&Tson::from(-6789.0)), vec![0x3B, 0x85, 0x35]);
        assert_eq!(enc(&Tson::from(200.0)), enc(&Tson::from(200)));
        // huge integral doubles go through the big-integer path
        roundtrips(&Tson::from(Inum::from(BigInt::from(1u64 << 60) * 1024)));
        assert_eq!(
            enc(&Tson::from((1u64 << 60) as f64 * 1024.0)),
            enc(&Tson::from(BigInt::from(1u64 << 60) * 1024))
        );
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                encode_full(&Tson::from(x)),
                Err(EncodeError::NonFinite(_))
            ));
        }
    }

    #[test]
    fn string_backrefs() {
        let arr = Tson::from(vec![
            "hello", "kitty", "hello", "world", "here", "kitty", "kitty", "kitty",
        ]);
        assert_eq!(
            enc(&arr),
            vec![
                0x02, 0x14, 0x68, 0x65, 0x6C, 0x6C, 0x6F, 0x14, 0x6B, 0x69, 0x74, 0x74, 0x79,
                0x0F, 0x00, 0x14, 0x77, 0x6F, 0x72, 0x6C, 0x64, 0x13, 0x68, 0x65, 0x72, 0x65,
                0x0F, 0x01, 0x0F, 0x01, 0x0F, 0x01, 0x00,
            ]
        );
        roundtrips(&arr);
    }

    #[test]
    fn single_entry_doc() {
        let d = doc(vec![("1", Null)]);
        assert_eq!(enc(&d), vec![0x28, 0x07, 0x31, 0x00]);
        roundtrips(&d);
    }

    #[test]
    fn repeated_keys_across_nesting() {
        let d = doc(vec![
            ("1", doc(vec![("1", Tson::from(41))])),
            ("2", doc(vec![("2", Tson::from("3"))])),
            ("3", doc(vec![("1", Tson::from_static(b""))])),
            ("4", doc(vec![("2", Bool(false))])),
        ]);
        assert_eq!(
            enc(&d),
            vec![
                0x2B, 0xA8, 0x69, 0x31, 0x00, 0x00, 0xA8, 0x10, 0x33, 0x32, 0x00, 0x01, 0x28,
                0x83, 0x00, 0x00, 0x33, 0x00, 0x28, 0x86, 0x01, 0x34, 0x00,
            ]
        );
        roundtrips(&d);
    }

    #[test]
    fn terminated_doc() {
        let d = doc(vec![
            ("a", Tson::from(1)),
            ("b", Tson::from(2)),
            ("c", Tson::from(3)),
            ("d", Tson::from(4)),
            ("e", Tson::from(5)),
        ]);
        assert_eq!(enc(&d)[0], 0x01);
        assert_eq!(*enc(&d).last().unwrap(), 0x00);
        roundtrips(&d);
        roundtrips(&Doc(VecMap::new()));
    }

    #[test]
    fn truncated_inputs() {
        for bad in [
            &[0x3A, 0x80][..],       // varuint never ends
            &[0x03, 0x05, 0x01][..], // bytestring shorter than its length
            &[0x3C, 0x00, 0x00][..], // four-byte float cut short
            &[0x12, 0x61][..],       // small string cut short
            &[0x02, 0x05][..],       // array missing its terminator
            &[0x28, 0x07, 0x31][..], // key missing its terminator
            &[0x37][..],             // duration missing its unit byte
            &[][..],
        ] {
            assert!(matches!(
                decode_full(bad),
                Err(DecodeError::Truncated { .. })
            ));
        }
    }

    #[test]
    fn reserved_and_unknown_opcodes() {
        for op in [0x0A, 0x0D, 0x30, 0x36, 0x38, 0x39, 0x3E, 0x3F] {
            assert_eq!(decode_full([op]), Err(DecodeError::ReservedOpcode(op)));
        }
        assert_eq!(decode_full([0x00]), Err(DecodeError::InvalidOpcode(0x00)));
    }

    #[test]
    fn bad_backrefs() {
        assert_eq!(
            decode_full([0x0F, 0x00]),
            Err(DecodeError::BadBackref { index: 0, limit: 0 })
        );
        // key table is separate from the string table
        assert_eq!(
            decode_full([0x28, 0x87, 0x05]),
            Err(DecodeError::BadBackref { index: 5, limit: 0 })
        );
    }

    #[test]
    fn bad_duration_unit() {
        assert_eq!(
            decode_full([0x37, 0x05, 0x01]),
            Err(DecodeError::BadDurationUnit(0x05))
        );
        assert_eq!(
            decode_full([0x37, 0x87, 0x01]),
            Err(DecodeError::BadDurationUnit(0x07))
        );
    }

    #[test]
    fn bad_utf8() {
        assert!(matches!(
            decode_full([0x11, 0xFF, 0xFE]),
            Err(DecodeError::BadUtf8(_))
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        assert_eq!(decode_full([0x07, 0x05, 0x06]), Ok(Null));
    }
}
