use super::*;
use crate::{
    duration::Duration,
    geo::LatLon,
    inum::Inum::{self, *},
    time, varuint,
    vecmap::VecMap,
};
use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use num_bigint::{BigInt, Sign};
use num_traits::FromPrimitive;

/// Recursive encoder: the output buffer plus the two back-reference tables
/// that live for one top-level value.
///
/// Strings are memoized by payload, document keys by name. Each table hands
/// out indices in first-emission order, and both flow through the whole
/// recursion so inner containers extend the tables populated by outer ones.
pub(crate) struct Encoder<'a> {
    out: &'a mut Vec<u8>,
    strings: HashMap<String, u64>,
    keys: HashMap<String, u64>,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(out: &'a mut Vec<u8>) -> Encoder<'a> {
        Encoder {
            out,
            strings: HashMap::new(),
            keys: HashMap::new(),
        }
    }

    fn put_byte(&mut self, u: u8) { self.out.push(u) }

    pub(crate) fn put_tson(&mut self, t: &Tson) -> Result<(), EncodeError> {
        match t {
            Null => {
                self.put_byte(OP_NULL);
                Ok(())
            }
            Bool(true) => {
                self.put_byte(OP_TRUE);
                Ok(())
            }
            Bool(false) => {
                self.put_byte(OP_FALSE);
                Ok(())
            }
            Int(i) => {
                self.put_inum(i);
                Ok(())
            }
            Float(x) => self.put_float(*x),
            Byt(b) => {
                self.put_bytes(b);
                Ok(())
            }
            Str(s) => {
                self.put_str(s);
                Ok(())
            }
            Array(a) => self.put_array(a),
            Doc(d) => self.put_doc(d),
            Time(t) => {
                self.put_time(t);
                Ok(())
            }
            Dur(d) => {
                self.put_duration(*d);
                Ok(())
            }
            Geo(g) => {
                self.put_latlon(*g);
                Ok(())
            }
        }
    }

    fn put_inum(&mut self, i: &Inum) {
        match i {
            I64(n) if (0..=SMALL_INT_MAX).contains(n) => {
                self.put_byte(OP_INT_SMALL + *n as u8);
            }
            I64(n) => {
                self.put_byte(if *n < 0 { OP_INT_NEG } else { OP_INT_POS });
                varuint::write(self.out, n.unsigned_abs());
            }
            // `Big` is normalized away from the i64 range, so never small
            Big(b) => {
                self.put_byte(if b.sign() == Sign::Minus {
                    OP_INT_NEG
                } else {
                    OP_INT_POS
                });
                varuint::write_big(self.out, b.magnitude());
            }
        }
    }

    /// Integral floats collapse to the integer encoding; the rest narrow to
    /// single precision when that round-trips, otherwise stay double.
    fn put_float(&mut self, x: f64) -> Result<(), EncodeError> {
        if !x.is_finite() {
            return Err(EncodeError::NonFinite(x));
        }
        if x.round_ties_even() == x {
            if let Some(i) = BigInt::from_f64(x) {
                self.put_inum(&Inum::from(i));
                return Ok(());
            }
        }
        let narrow = x as f32;
        if f64::from(narrow) == x {
            self.put_byte(OP_FLOAT4);
            self.out.extend_from_slice(&narrow.to_le_bytes());
        } else {
            self.put_byte(OP_FLOAT8);
            self.out.extend_from_slice(&x.to_le_bytes());
        }
        Ok(())
    }

    fn put_bytes(&mut self, b: &Bytes) {
        self.put_byte(OP_BYTES);
        varuint::write(self.out, b.len() as u64);
        self.out.extend_from_slice(b);
    }

    fn put_str(&mut self, s: &str) {
        if let Some(&idx) = self.strings.get(s) {
            self.put_byte(OP_STR_REF);
            varuint::write(self.out, idx);
            return;
        }
        let idx = self.strings.len() as u64;
        self.strings.insert(s.to_string(), idx);

        let payload = s.as_bytes();
        if (1..=SMALL_STR_MAX).contains(&payload.len()) {
            self.put_byte(OP_STR_SMALL + payload.len() as u8);
            self.out.extend_from_slice(payload);
        } else {
            self.put_byte(OP_STR_TERM);
            self.out.extend_from_slice(payload);
            self.put_byte(TERMINATOR);
        }
    }

    fn put_array(&mut self, a: &[Tson]) -> Result<(), EncodeError> {
        if (1..=SMALL_COL_MAX).contains(&a.len()) {
            self.put_byte(OP_ARRAY_SMALL + a.len() as u8);
            for t in a {
                self.put_tson(t)?;
            }
        } else {
            self.put_byte(OP_ARRAY);
            for t in a {
                self.put_tson(t)?;
            }
            self.put_byte(TERMINATOR);
        }
        Ok(())
    }

    fn put_doc(&mut self, d: &VecMap<String, Tson>) -> Result<(), EncodeError> {
        if (1..=SMALL_COL_MAX).contains(&d.len()) {
            self.put_byte(OP_DOC_SMALL + d.len() as u8);
            for (key, val) in d.iter() {
                self.put_entry(key, val)?;
            }
        } else {
            self.put_byte(OP_DOC);
            for (key, val) in d.iter() {
                self.put_entry(key, val)?;
            }
            self.put_byte(TERMINATOR);
        }
        Ok(())
    }

    /// Encodes one document entry: the value first, then the key.
    ///
    /// When the key is already in the table, the high bit of the value's
    /// first opcode byte is stolen to flag it and the key shrinks to a
    /// back-reference index. Every legitimate opcode is <= 0x7F, so the bit
    /// is free.
    fn put_entry(&mut self, key: &str, val: &Tson) -> Result<(), EncodeError> {
        let start = self.out.len();
        self.put_tson(val)?;
        if let Some(&idx) = self.keys.get(key) {
            self.out[start] |= KEY_REF_BIT;
            varuint::write(self.out, idx);
        } else {
            let idx = self.keys.len() as u64;
            self.keys.insert(key.to_string(), idx);
            self.out.extend_from_slice(key.as_bytes());
            self.put_byte(TERMINATOR);
        }
        Ok(())
    }

    fn put_time(&mut self, t: &DateTime<Utc>) {
        let delta = time::millis_from_epoch(t);
        self.put_byte(if delta < 0 { OP_TIME_NEG } else { OP_TIME_POS });
        varuint::write(self.out, delta.unsigned_abs());
    }

    fn put_duration(&mut self, d: Duration) {
        let Duration { amount, unit } = d.canonicalize();
        let mut unit_byte = unit.code();
        if amount < 0 {
            unit_byte |= DUR_SIGN_BIT;
        }
        self.put_byte(OP_DURATION);
        self.put_byte(unit_byte);
        varuint::write(self.out, amount.unsigned_abs());
    }

    fn put_latlon(&mut self, g: LatLon) {
        self.put_byte(OP_LATLON);
        varuint::write(self.out, g.hash());
    }
}
