use super::*;
use crate::{
    duration::{Duration, Unit},
    geo::LatLon,
    inum::Inum,
    time, varuint,
    vecmap::VecMap,
};
use bytes::Buf;

/// Recursive decoder: a cursor over the input plus the two back-reference
/// tables that live for one top-level value.
///
/// The tables are appended to in the order back-referenceable items are
/// first read; index `n` names the `n + 1`-th such item.
pub(crate) struct Decoder<'a, B: Buf> {
    data: &'a mut B,
    strings: Vec<String>,
    keys: Vec<String>,
}

impl<'a, B: Buf> Decoder<'a, B> {
    pub(crate) fn new(data: &'a mut B) -> Decoder<'a, B> {
        Decoder {
            data,
            strings: Vec::new(),
            keys: Vec::new(),
        }
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        if self.data.has_remaining() {
            Ok(self.data.get_u8())
        } else {
            Err(DecodeError::Truncated {
                needed: 1,
                remaining: 0,
            })
        }
    }

    fn peek(&mut self) -> Result<u8, DecodeError> {
        if self.data.has_remaining() {
            Ok(self.data.chunk()[0])
        } else {
            Err(DecodeError::Truncated {
                needed: 1,
                remaining: 0,
            })
        }
    }

    fn read_many(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        if self.data.remaining() < len {
            return Err(DecodeError::Truncated {
                needed: len,
                remaining: self.data.remaining(),
            });
        }
        let mut buf = vec![0; len];
        self.data.copy_to_slice(&mut buf);
        Ok(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        if self.data.remaining() < buf.len() {
            return Err(DecodeError::Truncated {
                needed: buf.len(),
                remaining: self.data.remaining(),
            });
        }
        self.data.copy_to_slice(buf);
        Ok(())
    }

    /// Reads bytes up to, and consuming, the next 0x00.
    fn read_terminated(&mut self) -> Result<Vec<u8>, DecodeError> {
        let mut buf = Vec::new();
        loop {
            let byte = self.read_u8()?;
            if byte == TERMINATOR {
                return Ok(buf);
            }
            buf.push(byte);
        }
    }

    pub(crate) fn read_tson(&mut self) -> Result<Tson, DecodeError> {
        let op = self.read_u8()?;
        self.read_tson_op(op)
    }

    fn read_tson_op(&mut self, op: u8) -> Result<Tson, DecodeError> {
        match op {
            OP_NULL => Ok(Null),
            OP_TRUE => Ok(Bool(true)),
            OP_FALSE => Ok(Bool(false)),
            OP_INT_SMALL..=0x7F => Ok(Int(Inum::from((op - OP_INT_SMALL) as i64))),
            OP_INT_POS => {
                let mag = varuint::read(self.data)?;
                Ok(Int(Inum::from_magnitude(false, mag)))
            }
            OP_INT_NEG => {
                let mag = varuint::read(self.data)?;
                Ok(Int(Inum::from_magnitude(true, mag)))
            }
            OP_FLOAT4 => {
                let mut raw = [0u8; 4];
                self.read_exact(&mut raw)?;
                Ok(Float(f64::from(f32::from_le_bytes(raw))))
            }
            OP_FLOAT8 => {
                let mut raw = [0u8; 8];
                self.read_exact(&mut raw)?;
                Ok(Float(f64::from_le_bytes(raw)))
            }
            OP_BYTES => {
                let len = self.read_len()?;
                Ok(Byt(Bytes::from(self.read_many(len)?)))
            }
            OP_STR_TERM => {
                let s = String::from_utf8(self.read_terminated()?)?;
                self.strings.push(s.clone());
                Ok(Str(s))
            }
            OP_STR_REF => {
                let idx = varuint::read_u64(self.data)?;
                Ok(Str(self.string_ref(idx)?))
            }
            0x10..=0x27 => {
                let len = (op - OP_STR_SMALL) as usize;
                let s = String::from_utf8(self.read_many(len)?)?;
                self.strings.push(s.clone());
                Ok(Str(s))
            }
            OP_ARRAY => {
                let mut out = Vec::new();
                while self.peek()? != TERMINATOR {
                    out.push(self.read_tson()?);
                }
                self.data.advance(1);
                Ok(Array(out))
            }
            0x2C..=0x2F => {
                let n = (op - OP_ARRAY_SMALL) as usize;
                let mut out = Vec::with_capacity(n);
                for _ in 0..n {
                    out.push(self.read_tson()?);
                }
                Ok(Array(out))
            }
            OP_DOC => {
                let mut entries = Vec::new();
                while self.peek()? != TERMINATOR {
                    entries.push(self.read_entry()?);
                }
                self.data.advance(1);
                Ok(Doc(VecMap::from(entries)))
            }
            0x28..=0x2B => {
                let n = (op - OP_DOC_SMALL) as usize;
                let mut entries = Vec::with_capacity(n);
                for _ in 0..n {
                    entries.push(self.read_entry()?);
                }
                Ok(Doc(VecMap::from(entries)))
            }
            OP_TIME_POS => self.read_time(false),
            OP_TIME_NEG => self.read_time(true),
            OP_DURATION => {
                let unit_byte = self.read_u8()?;
                let unit = Unit::from_code(unit_byte & DUR_UNIT_MASK)?;
                let mag = varuint::read_u64(self.data)?;
                let amount = if unit_byte & DUR_SIGN_BIT != 0 {
                    0i64.checked_sub_unsigned(mag)
                } else {
                    i64::try_from(mag).ok()
                }
                .ok_or(DecodeError::IntRange("duration amount exceeds i64"))?;
                Ok(Dur(Duration::new(amount, unit)))
            }
            OP_LATLON => {
                let h = varuint::read_u64(self.data)?;
                Ok(Geo(LatLon::from_hash(h)))
            }
            op if is_reserved(op) => Err(DecodeError::ReservedOpcode(op)),
            op => Err(DecodeError::InvalidOpcode(op)),
        }
    }

    /// Reads one document entry: the value, then the inline or
    /// back-referenced key.
    ///
    /// The high bit of the first byte flags a back-referenced key; it is
    /// stripped before the low seven bits are dispatched as the value
    /// opcode.
    fn read_entry(&mut self) -> Result<(String, Tson), DecodeError> {
        let lead = self.read_u8()?;
        let val = self.read_tson_op(lead & !KEY_REF_BIT)?;
        let key = if lead & KEY_REF_BIT != 0 {
            let idx = varuint::read_u64(self.data)?;
            self.key_ref(idx)?
        } else {
            let key = String::from_utf8(self.read_terminated()?)?;
            self.keys.push(key.clone());
            key
        };
        Ok((key, val))
    }

    fn read_len(&mut self) -> Result<usize, DecodeError> {
        let n = varuint::read_u64(self.data)?;
        usize::try_from(n).map_err(|_| DecodeError::IntRange("length exceeds usize"))
    }

    fn read_time(&mut self, negative: bool) -> Result<Tson, DecodeError> {
        let mag = varuint::read_u64(self.data)?;
        let delta = if negative {
            0i64.checked_sub_unsigned(mag)
        } else {
            i64::try_from(mag).ok()
        }
        .ok_or(DecodeError::IntRange("timestamp offset exceeds i64"))?;
        time::from_epoch_millis(delta)
            .map(Time)
            .ok_or(DecodeError::IntRange("timestamp outside representable range"))
    }

    fn string_ref(&self, idx: u64) -> Result<String, DecodeError> {
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.strings.get(i))
            .cloned()
            .ok_or(DecodeError::BadBackref {
                index: idx,
                limit: self.strings.len(),
            })
    }

    fn key_ref(&self, idx: u64) -> Result<String, DecodeError> {
        usize::try_from(idx)
            .ok()
            .and_then(|i| self.keys.get(i))
            .cloned()
            .ok_or(DecodeError::BadBackref {
                index: idx,
                limit: self.keys.len(),
            })
    }
}
