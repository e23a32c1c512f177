/// Document with 0x00-terminated entries.
pub(crate) const OP_DOC: u8 = 0x01;
/// Array with 0x00-terminated elements.
pub(crate) const OP_ARRAY: u8 = 0x02;
/// Bytestring, length-prefixed.
pub(crate) const OP_BYTES: u8 = 0x03;
/// Timestamp at or after the epoch.
pub(crate) const OP_TIME_POS: u8 = 0x04;
/// `True` constant.
pub(crate) const OP_TRUE: u8 = 0x05;
/// `False` constant.
pub(crate) const OP_FALSE: u8 = 0x06;
/// `Null` constant.
pub(crate) const OP_NULL: u8 = 0x07;
/// Timestamp before the epoch.
pub(crate) const OP_TIME_NEG: u8 = 0x08;
/// Coordinate pair as an interleaved hash.
pub(crate) const OP_LATLON: u8 = 0x09;
/// String, 0x00-terminated.
pub(crate) const OP_STR_TERM: u8 = 0x0E;
/// String back-reference.
pub(crate) const OP_STR_REF: u8 = 0x0F;
/// Small-string base; `opcode - OP_STR_SMALL` is the length, 1 through 24.
pub(crate) const OP_STR_SMALL: u8 = 0x0F;
/// Small-document base; `opcode - OP_DOC_SMALL` is the entry count, 1 through 4.
pub(crate) const OP_DOC_SMALL: u8 = 0x27;
/// Small-array base; `opcode - OP_ARRAY_SMALL` is the element count, 1 through 4.
pub(crate) const OP_ARRAY_SMALL: u8 = 0x2B;
/// Duration: unit byte, then magnitude.
pub(crate) const OP_DURATION: u8 = 0x37;
/// Nonnegative integer as a varuint.
pub(crate) const OP_INT_POS: u8 = 0x3A;
/// Negative integer; the varuint holds the magnitude.
pub(crate) const OP_INT_NEG: u8 = 0x3B;
/// Single-precision float, 4 bytes little-endian.
pub(crate) const OP_FLOAT4: u8 = 0x3C;
/// Double-precision float, 8 bytes little-endian.
pub(crate) const OP_FLOAT8: u8 = 0x3D;
/// Small-integer base; `opcode - OP_INT_SMALL` is the value, 0 through 63.
pub(crate) const OP_INT_SMALL: u8 = 0x40;

/// Closes terminated strings, arrays, and documents, and ends inline keys.
pub(crate) const TERMINATOR: u8 = 0x00;
/// Stolen bit: set on an entry's first value byte when the key is a
/// back-reference.
pub(crate) const KEY_REF_BIT: u8 = 0x80;
/// Sign bit of the duration unit byte.
pub(crate) const DUR_SIGN_BIT: u8 = 0x80;
/// Unit-code bits of the duration unit byte.
pub(crate) const DUR_UNIT_MASK: u8 = 0x7F;

/// Longest string the small form can carry.
pub(crate) const SMALL_STR_MAX: usize = 24;
/// Largest array or document the small forms can carry.
pub(crate) const SMALL_COL_MAX: usize = 4;
/// Largest integer the small form can carry.
pub(crate) const SMALL_INT_MAX: i64 = 63;

/// Opcodes that must never appear on the wire.
pub(crate) fn is_reserved(op: u8) -> bool {
    matches!(op, 0x0A..=0x0D | 0x30..=0x36 | 0x38..=0x39 | 0x3E..=0x3F)
}
